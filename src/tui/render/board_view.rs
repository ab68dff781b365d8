use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::Category;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::input_spans;

/// Narrowest a card is allowed to get before dropping a column
const MIN_CARD_WIDTH: u16 = 28;
const MAX_COLUMNS: u16 = 3;
/// Borders plus the progress line
const CARD_CHROME: u16 = 3;

/// Number of card columns that fit in `width`
pub fn column_count(width: u16) -> usize {
    (width / MIN_CARD_WIDTH).clamp(1, MAX_COLUMNS) as usize
}

fn card_height(category: &Category, adding: bool) -> u16 {
    let rows = category.tasks.len().max(1) + usize::from(adding);
    CARD_CHROME + rows as u16
}

/// Render the category grid (or the empty state)
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.session.board().is_empty() {
        render_empty_state(frame, app, area);
        return;
    }

    let columns = column_count(area.width);
    let adding = app.mode == Mode::AddTask;
    let row_heights: Vec<u16> = app
        .session
        .board()
        .categories
        .chunks(columns)
        .enumerate()
        .map(|(row, cats)| {
            cats.iter()
                .enumerate()
                .map(|(col, cat)| {
                    let selected = row * columns + col == app.cursor_category;
                    card_height(cat, adding && selected)
                })
                .max()
                .unwrap_or(CARD_CHROME)
        })
        .collect();

    // Scroll whole rows so the selected card is on screen
    let selected_row = app.cursor_category / columns;
    app.scroll_row = app.scroll_row.min(selected_row);
    while app.scroll_row < selected_row
        && row_heights[app.scroll_row..=selected_row]
            .iter()
            .map(|h| *h as u32)
            .sum::<u32>()
            > area.height as u32
    {
        app.scroll_row += 1;
    }

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (row, height) in row_heights.iter().enumerate().skip(app.scroll_row) {
        if y >= bottom {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, (*height).min(bottom - y));
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_area);

        for (col, cell) in cells.iter().enumerate() {
            let idx = row * columns + col;
            if let Some(cat) = app.session.board().categories.get(idx) {
                render_card(frame, app, cat, idx == app.cursor_category, *cell);
            }
        }
        y += height;
    }
}

fn render_empty_state(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let top = area.height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.push(
        Line::from(Span::styled(
            "No categories yet",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
    );
    lines.push(
        Line::from(Span::styled(
            "press n to create one",
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .centered(),
    );
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_card(frame: &mut Frame, app: &App, category: &Category, selected: bool, area: Rect) {
    let bg = app.theme.surface;
    let accent = app.theme.category_color(category);
    let border = if selected { accent } else { app.theme.dim };

    let title = Span::styled(
        format!(" {} ", category.name),
        Style::default()
            .fg(app.theme.background)
            .bg(accent)
            .add_modifier(Modifier::BOLD),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .title(Line::from(title))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let adding = selected && app.mode == Mode::AddTask;
    let progress = category.progress();

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("{}/{} COMPLETED", progress.completed, progress.total),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    // Rows left for tasks once the progress line and input are placed
    let room = (inner.height as usize).saturating_sub(1 + usize::from(adding));
    let offset = if selected && app.cursor_task >= room {
        app.cursor_task + 1 - room
    } else {
        0
    };

    if category.tasks.is_empty() && !adding {
        lines.push(Line::from(Span::styled(
            "no tasks yet, press a to add",
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    for (i, task) in category.tasks.iter().enumerate().skip(offset).take(room) {
        let is_cursor = selected && i == app.cursor_task && app.mode != Mode::AddTask;
        let mut style = if task.completed {
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let mut box_style = Style::default().fg(accent).bg(bg);
        if is_cursor {
            style = style.fg(app.theme.background).bg(accent);
            box_style = box_style.fg(app.theme.background).bg(accent);
        }
        let text = unicode::pad_to_width(&task.text, width.saturating_sub(4));
        lines.push(Line::from(vec![
            Span::styled(task.checkbox(), box_style),
            Span::styled(" ", box_style),
            Span::styled(text, style),
        ]));
    }

    if adding {
        let prompt_style = Style::default().fg(accent).bg(bg);
        let mut spans = vec![Span::styled("+ ", prompt_style)];
        spans.extend(input_spans(
            app.task_input.before_cursor(),
            app.task_input.after_cursor(),
            width.saturating_sub(2),
            Style::default().fg(app.theme.text_bright).bg(bg),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}
