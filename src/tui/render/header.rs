use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::spans_width;

/// Title on the left, board-wide progress on the right, rule underneath
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let progress = app.session.board().progress();

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            "TASKBOARD",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let counts = format!(
        "{}/{} TASKS COMPLETED ",
        progress.completed, progress.total
    );
    let counts_style = if progress.total > 0 && progress.completed == progress.total {
        Style::default().fg(app.theme.green).bg(bg)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    let used = spans_width(&spans) + counts.chars().count();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    spans.push(Span::styled(counts, counts_style));

    let rule = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    let paragraph = Paragraph::new(vec![Line::from(spans), rule]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
