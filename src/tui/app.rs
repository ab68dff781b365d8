use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::session::Session;
use crate::model::{BoardConfig, Category, Swatch, Task};
use crate::util::unicode;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task into the selected category
    AddTask,
    /// New/edit category modal
    CategoryForm,
    /// Yes/no popup
    Confirm,
}

/// Single-line text input with a grapheme-aware cursor (byte offset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEdit {
    pub buffer: String,
    pub cursor: usize,
}

impl LineEdit {
    pub fn with_text(text: &str) -> Self {
        LineEdit {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        self.buffer.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.drain(self.cursor..next);
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(&self.buffer, self.cursor);
        self.buffer.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn before_cursor(&self) -> &str {
        &self.buffer[..self.cursor]
    }

    pub fn after_cursor(&self) -> &str {
        &self.buffer[self.cursor..]
    }
}

/// Which field of the category modal has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Color,
}

/// State of the new/edit category modal
#[derive(Debug, Clone)]
pub struct CategoryForm {
    /// Id of the category being edited; `None` creates a new one
    pub editing: Option<String>,
    pub name: LineEdit,
    pub swatch: Swatch,
    /// Set once the user picks a color; an untouched form keeps the stored one
    pub color_changed: bool,
    pub field: FormField,
}

/// What a confirmation popup will do on `y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteCategory { id: String },
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

/// Main application state
pub struct App {
    pub session: Session,
    pub config: BoardConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Index of the selected category
    pub cursor_category: usize,
    /// Index of the selected task within the selected category
    pub cursor_task: usize,
    /// First card row drawn (updated while rendering)
    pub scroll_row: usize,
    /// Inline add-task input
    pub task_input: LineEdit,
    pub category_form: Option<CategoryForm>,
    pub confirm_state: Option<ConfirmState>,
    /// One-line message shown in the status row until the next key press
    pub status: Option<String>,
}

impl App {
    pub fn new(session: Session, config: BoardConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            session,
            config,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor_category: 0,
            cursor_task: 0,
            scroll_row: 0,
            task_input: LineEdit::default(),
            category_form: None,
            confirm_state: None,
            status: None,
        }
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.session.board().categories.get(self.cursor_category)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_category()?.tasks.get(self.cursor_task)
    }

    /// Ids of the selected category and task, owned so the board can change
    pub fn selection_ids(&self) -> Option<(String, Option<String>)> {
        let cat = self.selected_category()?;
        let task = cat.tasks.get(self.cursor_task).map(|t| t.id.clone());
        Some((cat.id.clone(), task))
    }

    /// Keep both cursors inside the current board
    pub fn clamp_cursor(&mut self) {
        let board = self.session.board();
        self.cursor_category = self.cursor_category.min(board.len().saturating_sub(1));
        let tasks = board
            .categories
            .get(self.cursor_category)
            .map_or(0, |c| c.tasks.len());
        self.cursor_task = self.cursor_task.min(tasks.saturating_sub(1));
    }

    pub fn select_category(&mut self, id: &str) {
        if let Some(idx) = self.session.board().position(id) {
            self.cursor_category = idx;
            self.cursor_task = 0;
        }
    }

    pub fn select_task(&mut self, task_id: &str) {
        if let Some(idx) = self
            .selected_category()
            .and_then(|c| c.task_position(task_id))
        {
            self.cursor_task = idx;
        }
    }

    /// Color preselected in the new-category modal
    pub fn default_swatch(&self) -> Swatch {
        Swatch::parse(&self.config.board.default_color).unwrap_or(Swatch::Pink)
    }

    /// Surface session warnings (failed saves) in the status row
    pub fn collect_warnings(&mut self) {
        if let Some(last) = self.session.take_warnings().pop() {
            self.status = Some(last);
        }
    }
}

/// Run the TUI application
pub fn run(data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = config_io::resolve_data_dir(data_dir);
    let config = config_io::read_config(&dir)?;
    // Load warnings print to stderr here, before the alternate screen
    let mut session = Session::open(&dir, &config)?;
    session.set_quiet(true);

    let mut app = App::new(session, config);
    app.collect_warnings();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Some(e) = &app.session.last_save_error {
        eprintln!("warning: last change was not saved ({}); see `tb recovery`", e);
    }
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
