use std::collections::HashSet;

use chrono::Utc;

use crate::model::board::Board;

/// Numeric ids above this are treated as opaque so the counter can't run out
const MAX_OBSERVED_ID: u64 = u64::MAX / 2;

/// Issues time-derived ids (Unix milliseconds as decimal strings).
///
/// Ids are strictly increasing: when the clock has not advanced past the
/// last issued value the generator bumps by one instead of repeating.
pub struct IdGenerator {
    last: u64,
    clock: Box<dyn Fn() -> u64>,
}

impl IdGenerator {
    /// Generator backed by the system clock
    pub fn new() -> Self {
        Self::with_clock(now_millis)
    }

    /// Generator backed by a custom clock (tests)
    pub fn with_clock(clock: impl Fn() -> u64 + 'static) -> Self {
        IdGenerator {
            last: 0,
            clock: Box::new(clock),
        }
    }

    /// System-clock generator that will never reissue an id already on the board
    pub fn seeded(board: &Board) -> Self {
        let mut ids = Self::new();
        ids.observe_board(board);
        ids
    }

    /// Make sure future ids sort after `id`. Non-numeric ids and numbers
    /// past `MAX_OBSERVED_ID` are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(n) = id.parse::<u64>()
            && n <= MAX_OBSERVED_ID
        {
            self.last = self.last.max(n);
        }
    }

    pub fn observe_board(&mut self, board: &Board) {
        for cat in &board.categories {
            self.observe(&cat.id);
            for task in &cat.tasks {
                self.observe(&task.id);
            }
        }
    }

    pub fn next_id(&mut self) -> String {
        let now = (self.clock)();
        self.last = now.max(self.last.saturating_add(1));
        self.last.to_string()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Give fresh ids to later duplicates: category ids across the board, task
/// ids within their category. Returns how many ids were replaced.
pub fn reissue_duplicates(board: &mut Board, ids: &mut IdGenerator) -> usize {
    let mut replaced = 0;
    let mut seen_cats = HashSet::new();
    for cat in &mut board.categories {
        if !seen_cats.insert(cat.id.clone()) {
            cat.id = ids.next_id();
            seen_cats.insert(cat.id.clone());
            replaced += 1;
        }
        let mut seen_tasks = HashSet::new();
        for task in &mut cat.tasks {
            if !seen_tasks.insert(task.id.clone()) {
                task.id = ids.next_id();
                seen_tasks.insert(task.id.clone());
                replaced += 1;
            }
        }
    }
    replaced
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
