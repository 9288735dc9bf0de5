use std::mem;

use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::warn;

use crate::form::FormController;
use crate::models::Song;
use crate::store::RecordStore;
use crate::sync::{SubmitOutcome, SyncOrchestrator};

use super::cards::{render_song_cards, song_cards, CardAction, CardActionKind};
use super::forms::{draw_form, FORM_HEIGHT};
use super::helpers::{centered_rect, clamp_index};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Which half of the screen receives keystrokes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
}

/// Modal overlays on top of the main screen.
enum Mode {
    Normal,
    ConfirmDelete(ConfirmSongDelete),
}

/// State for confirming permanent song deletion.
struct ConfirmSongDelete {
    song: Song,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the synced collection, the form and the
/// little bit of navigation state around them.
pub struct App<S> {
    sync: SyncOrchestrator<S>,
    form: FormController,
    selected: usize,
    focus: Focus,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl<S: RecordStore> App<S> {
    /// Build the app and load the initial list.
    pub fn new(sync: SyncOrchestrator<S>) -> Self {
        let mut app = Self {
            sync,
            form: FormController::new(),
            selected: 0,
            focus: Focus::Form,
            mode: Mode::Normal,
            status: None,
        };
        app.refresh();
        app
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn songs(&self) -> &[Song] {
        self.sync.songs()
    }

    pub fn sync(&self) -> &SyncOrchestrator<S> {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut SyncOrchestrator<S> {
        &mut self.sync
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.sync.songs().get(self.selected)
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn is_confirming_delete(&self) -> bool {
        matches!(self.mode, Mode::ConfirmDelete(_))
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => match self.focus {
                Focus::Form => self.handle_form_key(code),
                Focus::List => self.handle_list_key(code, &mut exit),
            },
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };

        exit
    }

    /// Re-read the collection, e.g. on Ctrl+R. Returns whether the List call
    /// succeeded; on failure the previous collection stays on screen.
    pub fn refresh(&mut self) -> bool {
        let focus_id = self.selected_song().map(|song| song.id);
        let ok = self.sync.refresh();
        self.after_refresh(focus_id);
        ok
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => {
                if self.form.is_editing() {
                    self.form.cancel_edit();
                    self.set_status("Edit cancelled.", StatusKind::Info);
                } else {
                    self.focus = Focus::List;
                    self.clear_status();
                }
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_list_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.sync.songs().len().saturating_sub(1),
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => {
                self.focus = Focus::Form;
                self.clear_status();
            }
            KeyCode::Char('r') => {
                self.clear_status();
                // A notice raised by the refresh itself takes precedence.
                if self.refresh() && self.status.is_none() {
                    self.set_status("Song list refreshed.", StatusKind::Info);
                }
            }
            KeyCode::Char('o') => self.open_selected_image(),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(action) = self.selected_action(CardActionKind::Edit) {
                    return self.apply_card_action(action);
                }
                self.set_status("No song selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(action) = self.selected_action(CardActionKind::Delete) {
                    return self.apply_card_action(action);
                }
                self.set_status("No song selected to delete.", StatusKind::Error);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmSongDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let focus_id = self.selected_song().map(|song| song.id);
                if self.sync.delete_record(confirm.song.id) {
                    self.set_status(format!("Deleted \"{}\".", confirm.song.name), StatusKind::Info);
                } else {
                    self.clear_status();
                }
                self.after_refresh(focus_id);
                Mode::Normal
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn selected_action(&self, kind: CardActionKind) -> Option<CardAction> {
        let songs = self.sync.songs();
        song_cards(songs)
            .get(self.selected)
            .map(|card| card.action(kind))
    }

    fn apply_card_action(&mut self, action: CardAction) -> Mode {
        match action {
            CardAction::Edit(song) => {
                self.form.enter_edit_mode(&song);
                self.focus = Focus::Form;
                self.set_status(format!("Editing song #{}.", song.id), StatusKind::Info);
                Mode::Normal
            }
            CardAction::Delete(id) => match self.sync.songs().iter().find(|song| song.id == id) {
                Some(song) => Mode::ConfirmDelete(ConfirmSongDelete { song: song.clone() }),
                None => Mode::Normal,
            },
        }
    }

    fn submit(&mut self) {
        let focus_id = self.selected_song().map(|song| song.id);
        match self.sync.submit(&mut self.form) {
            SubmitOutcome::Created { ok: true } => self.set_status("Song added.", StatusKind::Info),
            SubmitOutcome::Updated { id, ok: true } => {
                self.set_status(format!("Song #{id} updated."), StatusKind::Info)
            }
            // Failures are only reported in the log.
            SubmitOutcome::Created { ok: false } | SubmitOutcome::Updated { ok: false, .. } => {
                self.clear_status()
            }
        }
        self.after_refresh(focus_id);
    }

    /// Keep the selection on the same song when it survived the refresh and
    /// drop an edit whose target vanished.
    fn after_refresh(&mut self, focus_id: Option<i64>) {
        let songs = self.sync.songs();
        if let Some(id) = focus_id {
            if let Some(index) = songs.iter().position(|song| song.id == id) {
                self.selected = index;
            }
        }
        self.selected = clamp_index(self.selected, songs.len());

        if self.form.reconcile(songs) {
            self.set_status("The song being edited no longer exists.", StatusKind::Info);
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.sync.songs().len();
        if len == 0 {
            return;
        }
        let next = self.selected as isize + offset;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    fn open_selected_image(&mut self) {
        let Some(image) = self
            .selected_song()
            .map(|song| song.image.trim().to_string())
        else {
            self.set_status("No song selected.", StatusKind::Error);
            return;
        };
        if image.is_empty() {
            self.set_status("This song has no image.", StatusKind::Error);
            return;
        }
        match open_link(&image) {
            Ok(()) => self.set_status("Opened image in browser.", StatusKind::Info),
            Err(err) => {
                warn!(url = %image, error = %err, "could not open image");
                self.set_status(format!("Could not open image: {err}"), StatusKind::Error);
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        draw_form(frame, chunks[0], &self.form, self.focus == Focus::Form);
        self.draw_song_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Mode::ConfirmDelete(confirm) = &self.mode {
            self.draw_confirm_delete(frame, area, confirm);
        }
    }

    fn draw_song_list(&self, frame: &mut Frame, area: Rect) {
        let songs = self.sync.songs();
        if songs.is_empty() {
            let message = Paragraph::new("No songs yet. Fill in the form and press Enter to add one.")
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Songs"));
            frame.render_widget(message, area);
            return;
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .title(format!("Songs ({})", songs.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cards = song_cards(songs);
        render_song_cards(frame, inner, &cards, self.selected, self.focus == Focus::List);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.mode, self.focus) {
            (Mode::ConfirmDelete(_), _) => &[("[y]", " Delete   "), ("[n]", " Keep")],
            (Mode::Normal, Focus::Form) if self.form.is_editing() => &[
                ("[Enter]", " Save   "),
                ("[Tab]", " Next field   "),
                ("[Esc]", " Cancel edit   "),
                ("[Ctrl+R]", " Refresh   "),
                ("[Ctrl+C]", " Quit"),
            ],
            (Mode::Normal, Focus::Form) => &[
                ("[Enter]", " Add   "),
                ("[Tab]", " Next field   "),
                ("[Esc]", " Browse songs   "),
                ("[Ctrl+R]", " Refresh   "),
                ("[Ctrl+C]", " Quit"),
            ],
            (Mode::Normal, Focus::List) => &[
                ("[↑↓]", " Navigate   "),
                ("[e]", " Edit   "),
                ("[d]", " Delete   "),
                ("[o]", " Open image   "),
                ("[a]", " Add   "),
                ("[r]", " Refresh   "),
                ("[q]", " Quit"),
            ],
        };

        let spans: Vec<Span<'static>> = keys
            .iter()
            .flat_map(|(key, label)| [Span::styled(*key, key_style), Span::raw(*label)])
            .collect();
        Line::from(spans)
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmSongDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Song").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete \"{}\"?", confirm.song.display_title())),
            Line::from(""),
            Line::from(Span::styled(
                "Enter/Y to confirm • Esc/N to keep it",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
