use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the yes/no confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.confirm_state else {
        return;
    };

    let bg = app.theme.surface;
    let warn = app.theme.red;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default()
        .fg(warn)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let max_w = area.width.saturating_sub(4).max(1);
    let popup_w = (unicode::display_width(&state.message) as u16 + 6).clamp(30, max_w);
    let text_w = popup_w.saturating_sub(4).max(1) as usize;
    let text_rows = unicode::display_width(&state.message).div_ceil(text_w).max(1) as u16;

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(state.message.as_str(), text_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", key_style),
            Span::styled(" delete   ", dim_style),
            Span::styled("n", key_style),
            Span::styled(" cancel", dim_style),
        ]),
    ];

    let popup_h = text_rows + 5;
    let popup_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(warn).bg(bg))
        .title(Span::styled(" Confirm ", key_style))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .centered()
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
