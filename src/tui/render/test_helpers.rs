use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::session::Session;
use crate::io::storage::MemorySlot;
use crate::model::{Board, BoardConfig, Category, Swatch, Task};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over an in-memory slot already holding `board`
pub fn app_with_board(board: Board) -> App {
    let raw = serde_json::to_string(&board).unwrap();
    let slot = MemorySlot::with_value(raw);
    let mut session = Session::from_slot(Box::new(slot), true, None).unwrap();
    session.set_quiet(true);
    App::new(session, BoardConfig::default())
}

/// The starter board, nothing saved yet
pub fn app_with_defaults() -> App {
    let mut session = Session::from_slot(Box::new(MemorySlot::default()), true, None).unwrap();
    session.set_quiet(true);
    App::new(session, BoardConfig::default())
}

/// One category "Work" (id "1") holding tasks with ids "101", "102", ...
pub fn app_with_tasks(texts: &[&str]) -> App {
    let mut work = Category::new("1", "Work", Swatch::Pink);
    for (i, text) in texts.iter().enumerate() {
        work.tasks.push(Task::new((101 + i).to_string(), *text));
    }
    app_with_board(Board::new(vec![work]))
}
