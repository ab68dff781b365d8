use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Swatch;
use crate::tui::app::{App, FormField};
use crate::tui::theme::swatch_color;

use super::helpers::{centered_rect_fixed, input_spans};

const POPUP_WIDTH: u16 = 48;

/// Render the new/edit category modal
pub fn render_category_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.category_form else {
        return;
    };

    let bg = app.theme.surface;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let label_style = |focused: bool| {
        if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            dim_style
        }
    };

    let popup_w = POPUP_WIDTH.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let title = if form.editing.is_some() {
        " Edit Category "
    } else {
        " New Category "
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    // Name field
    let name_focused = form.field == FormField::Name;
    let mut name_spans = vec![Span::styled("  Name   ", label_style(name_focused))];
    if name_focused {
        name_spans.extend(input_spans(
            form.name.before_cursor(),
            form.name.after_cursor(),
            inner_w.saturating_sub(11),
            Style::default().fg(app.theme.text_bright).bg(bg),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else {
        name_spans.push(Span::styled(form.name.buffer.as_str(), text_style));
    }
    lines.push(Line::from(name_spans));
    lines.push(Line::from(""));

    // Color picker: one block per swatch, the chosen one bracketed
    let color_focused = form.field == FormField::Color;
    let mut color_spans = vec![Span::styled("  Color  ", label_style(color_focused))];
    for swatch in Swatch::ALL {
        let chosen = swatch == form.swatch;
        let (open, close) = if chosen { ("[", "]") } else { (" ", " ") };
        color_spans.push(Span::styled(open, text_style));
        color_spans.push(Span::styled(
            "\u{2588}\u{2588}",
            Style::default().fg(swatch_color(swatch)).bg(bg),
        ));
        color_spans.push(Span::styled(close, text_style));
    }
    lines.push(Line::from(color_spans));
    lines.push(Line::from(vec![
        Span::styled("         ", text_style),
        Span::styled(form.swatch.name(), dim_style),
        Span::styled(" ", dim_style),
        Span::styled(form.swatch.hex(), dim_style),
    ]));
    lines.push(Line::from(""));

    let hint = if color_focused {
        "  \u{2190}/\u{2192} color  Tab name  Enter save  Esc cancel"
    } else {
        "  Tab color  Enter save  Esc cancel"
    };
    lines.push(Line::from(Span::styled(hint, dim_style)));

    let popup_h = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(swatch_color(form.swatch)).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{CategoryForm, LineEdit, Mode};
    use crate::tui::render::test_helpers::*;

    fn open_form(editing: Option<&str>, name: &str, field: FormField) -> crate::tui::app::App {
        let mut app = app_with_defaults();
        app.category_form = Some(CategoryForm {
            editing: editing.map(str::to_string),
            name: LineEdit::with_text(name),
            swatch: Swatch::Green,
            color_changed: false,
            field,
        });
        app.mode = Mode::CategoryForm;
        app
    }

    #[test]
    fn new_form_shows_name_and_chosen_color() {
        let app = open_form(None, "Errands", FormField::Name);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_category_form(frame, &app, area)
        });
        assert!(out.contains("New Category"));
        assert!(out.contains("Name   Errands\u{258C}"));
        assert!(out.contains("[\u{2588}\u{2588}]"));
        assert!(out.contains("green #00FF85"));
        assert!(out.contains("Tab color"));
    }

    #[test]
    fn edit_form_title_and_color_hints() {
        let app = open_form(Some("1"), "Client", FormField::Color);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_category_form(frame, &app, area)
        });
        assert!(out.contains("Edit Category"));
        assert!(out.contains("Name   Client"));
        assert!(!out.contains("Client\u{258C}"));
        assert!(out.contains("color  Tab name"));
    }
}
