use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::form::{FormController, FormMode, SongField};

/// Rows used by the form panel: four inputs, a hint line and the border.
pub(crate) const FORM_HEIGHT: u16 = 7;

/// Width reserved for field labels so the inputs line up.
const LABEL_WIDTH: usize = 14;

/// Panel title reflecting the current mode.
pub(crate) fn form_title(form: &FormController) -> String {
    match form.mode() {
        FormMode::Create => "Add Song".to_string(),
        FormMode::Edit { id } => format!("Edit Song #{id}"),
    }
}

/// Render one input row. The focused field is highlighted only while the
/// form has keyboard focus.
pub(crate) fn field_line(form: &FormController, field: SongField, focused: bool) -> Line<'static> {
    let value = form.active_draft().field(field);
    let is_active = focused && form.active_field() == field;

    let display = if value.is_empty() {
        field.placeholder().to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH)),
        Span::styled(display, style),
    ])
}

/// Draw the add/edit panel and, when focused, park the cursor at the end of
/// the active field.
pub(crate) fn draw_form(frame: &mut Frame, area: Rect, form: &FormController, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(form_title(form))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = SongField::ALL
        .iter()
        .map(|field| field_line(form, *field, focused))
        .collect();

    let hint = if form.is_editing() {
        "Enter to save changes • Tab to switch • Esc to cancel edit"
    } else {
        "Enter to add • Tab to switch • Esc to browse songs"
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Gray))));

    frame.render_widget(Paragraph::new(lines), inner);

    if focused && inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position(cursor_position(inner, form));
    }
}

/// Cell right after the focused value, kept inside `inner`. The column is
/// measured in display cells, so wide characters advance it by two.
pub(crate) fn cursor_position(inner: Rect, form: &FormController) -> Position {
    let field = form.active_field();
    let row = SongField::ALL
        .iter()
        .position(|candidate| *candidate == field)
        .and_then(|row| u16::try_from(row).ok())
        .unwrap_or(0);
    let value_width = Span::raw(form.active_draft().field(field)).width();
    let column = u16::try_from(LABEL_WIDTH.saturating_add(value_width)).unwrap_or(u16::MAX);

    let last_x = inner.right().saturating_sub(1).max(inner.x);
    let last_y = inner.bottom().saturating_sub(1).max(inner.y);
    Position::new(
        inner.x.saturating_add(column).min(last_x),
        inner.y.saturating_add(row).min(last_y),
    )
}
