use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Song;

/// Height of one card: five content lines plus the border.
pub(crate) const SONG_CARD_HEIGHT: u16 = 7;

/// The two affordances every card exposes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CardActionKind {
    Edit,
    Delete,
}

/// A request raised from a card, forwarded by the app to the form or to the
/// sync layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Edit(Song),
    Delete(i64),
}

/// View of a single song, keyed by its id.
#[derive(Debug, Clone, Copy)]
pub struct SongCard<'a> {
    pub id: i64,
    song: &'a Song,
}

impl<'a> SongCard<'a> {
    pub fn song(&self) -> &'a Song {
        self.song
    }

    pub fn action(&self, kind: CardActionKind) -> CardAction {
        match kind {
            CardActionKind::Edit => CardAction::Edit(self.song.clone()),
            CardActionKind::Delete => CardAction::Delete(self.id),
        }
    }

    /// Text of the card. Blank optional fields get a dim placeholder so every
    /// card keeps the same shape.
    pub fn lines(&self, selected: bool) -> Vec<Line<'static>> {
        let song = self.song;
        let dim = Style::default().fg(Color::DarkGray);

        let title = if selected {
            format!("▶ {}", song.name)
        } else {
            song.name.clone()
        };

        let text_or = |value: &str, fallback: &'static str, style: Style| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Span::styled(fallback, dim)
            } else {
                Span::styled(trimmed.to_string(), style)
            }
        };

        vec![
            Line::from(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(text_or(
                &song.performer,
                "Unknown performer",
                Style::default().fg(Color::Gray),
            )),
            Line::from(text_or(&song.description, "No description", Style::default())),
            Line::from(text_or(
                &song.release_year,
                "Unknown year",
                Style::default().fg(Color::Gray),
            )),
            Line::from(text_or(&song.image, "No image", Style::default().fg(Color::Cyan))),
        ]
    }
}

/// One card per song, in collection order.
pub fn song_cards(songs: &[Song]) -> Vec<SongCard<'_>> {
    songs
        .iter()
        .map(|song| SongCard { id: song.id, song })
        .collect()
}

/// Draw as many cards as fit, scrolling so the selected one stays visible.
pub(crate) fn render_song_cards(
    frame: &mut Frame,
    area: Rect,
    cards: &[SongCard<'_>],
    selected: usize,
    highlight: bool,
) {
    if cards.is_empty() || area.height == 0 {
        return;
    }

    let (start, end) = visible_window(cards.len(), selected, area.height);
    let constraints: Vec<Constraint> = (start..end)
        .map(|_| Constraint::Length(SONG_CARD_HEIGHT))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (chunk, index) in rows.iter().zip(start..end) {
        if chunk.height == 0 {
            continue;
        }
        let card = &cards[index];
        let is_selected = index == selected;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!("#{}", card.id));
        let mut style = Style::default();
        if is_selected && highlight {
            block = block.style(Style::default().fg(Color::Yellow));
            style = Style::default().fg(Color::Yellow);
        }

        let paragraph = Paragraph::new(card.lines(is_selected))
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left)
            .style(style);
        frame.render_widget(paragraph, *chunk);
    }
}

/// Range of card indices that fit into `height` rows around `selected`.
fn visible_window(len: usize, selected: usize, height: u16) -> (usize, usize) {
    let capacity = ((height / SONG_CARD_HEIGHT) as usize).max(1);
    let mut start = if selected >= capacity {
        selected + 1 - capacity
    } else {
        0
    };
    if start + capacity > len {
        start = len.saturating_sub(capacity);
    }
    (start, min(start + capacity, len))
}
