use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

const NAVIGATE_HINTS: &str =
    "\u{2190}\u{2192} category  \u{2191}\u{2193} task  space toggle  a add  d delete  K/J move  n new  e edit  D remove  q quit";
const ADD_TASK_HINTS: &str = "Enter add  Esc done";

/// Render the status row (bottom of screen): the last message if there is
/// one, otherwise key hints for the current mode.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let span = if let Some(message) = &app.status {
        let color = if app.session.last_save_error.is_some() {
            app.theme.red
        } else {
            app.theme.text
        };
        Span::styled(
            unicode::truncate_to_width(message, width),
            Style::default().fg(color).bg(bg),
        )
    } else {
        let hints = match app.mode {
            Mode::Navigate if app.config.ui.show_key_hints => NAVIGATE_HINTS,
            Mode::AddTask => ADD_TASK_HINTS,
            // Popups carry their own hints
            _ => "",
        };
        Span::styled(
            unicode::truncate_to_width(hints, width),
            Style::default().fg(app.theme.dim).bg(bg),
        )
    };

    let paragraph = Paragraph::new(Line::from(span)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
