use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskboard v", env!("CARGO_PKG_VERSION"), " - categories and tasks in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and a starter config
    Init(InitArgs),
    /// List categories and their tasks
    List(ListArgs),
    /// Show completion counts
    Stats,
    /// List the color palette
    Colors,
    /// Category management
    Category(CategoryCmd),
    /// Add a task to a category (prints the new id)
    Add(AddArgs),
    /// Flip a task between open and completed
    Toggle(TaskRefArgs),
    /// Delete a task
    Rm(TaskRefArgs),
    /// Move a task one position up or down
    Mv(MvArgs),
    /// View or manage the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config and board
    #[arg(long)]
    pub force: bool,
    /// Start with no categories instead of the starter set
    #[arg(long)]
    pub empty: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only this category (id or name)
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Category args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CategoryCmd {
    #[command(subcommand)]
    pub action: CategoryAction,
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a category
    Add(CategoryAddArgs),
    /// Rename or recolor a category
    Edit(CategoryEditArgs),
    /// Delete a category and all its tasks
    Rm(CategoryRmArgs),
}

#[derive(Args)]
pub struct CategoryAddArgs {
    /// Category name
    pub name: String,
    /// Palette color, by name or hex (default: board.default_color)
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct CategoryEditArgs {
    /// Category id or name
    pub category: String,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New palette color, by name or hex
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct CategoryRmArgs {
    /// Category id or name
    pub category: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Task args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Category id or name
    pub category: String,
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct TaskRefArgs {
    /// Category id or name
    pub category: String,
    /// Task id or 1-based position
    pub task: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Category id or name
    pub category: String,
    /// Task id or 1-based position
    pub task: String,
    /// up or down
    pub direction: String,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Show entries after this timestamp (ISO-8601)
    #[arg(long)]
    pub since: Option<String>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}
