mod init;
pub use init::cmd_init;

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::recovery;
use crate::io::session::Session;
use crate::model::board::Board;
use crate::model::category::{Category, Swatch};
use crate::model::config::BoardConfig;
use crate::model::task::{MoveDirection, Task};
use crate::ops::category_ops;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let data_dir = cli.data_dir.map(PathBuf::from);
    let data_dir = data_dir.as_deref();

    match cli.command {
        None => crate::tui::run(data_dir),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, data_dir),

            // Read commands
            Commands::List(args) => cmd_list(args, data_dir, json),
            Commands::Stats => cmd_stats(data_dir, json),
            Commands::Colors => cmd_colors(json),
            Commands::Recovery(args) => cmd_recovery(args, data_dir, json),

            // Write commands
            Commands::Category(args) => cmd_category(args, data_dir, json),
            Commands::Add(args) => cmd_add(args, data_dir, json),
            Commands::Toggle(args) => cmd_toggle(args, data_dir),
            Commands::Rm(args) => cmd_rm(args, data_dir),
            Commands::Mv(args) => cmd_mv(args, data_dir),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Everything a command needs: where the data lives, its config, the board
struct Context {
    config: BoardConfig,
    session: Session,
}

fn open_context(data_dir: Option<&Path>) -> Result<Context, Box<dyn std::error::Error>> {
    let dir = config_io::resolve_data_dir(data_dir);
    let config = config_io::read_config(&dir)?;
    let session = Session::open(&dir, &config)?;
    Ok(Context { config, session })
}

/// Report a failed save as a command failure. The session has already
/// warned and written the board to the recovery log.
fn check_saved(session: &Session) -> CmdResult {
    match &session.last_save_error {
        Some(e) => Err(format!("changes were not saved ({}); see `tb recovery`", e).into()),
        None => Ok(()),
    }
}

/// Find a category by id, then by case-insensitive name
pub fn resolve_category<'a>(board: &'a Board, query: &str) -> Result<&'a Category, String> {
    if let Some(cat) = board.find(query) {
        return Ok(cat);
    }
    let wanted = query.trim();
    let matches: Vec<&Category> = board
        .categories
        .iter()
        .filter(|c| c.name.eq_ignore_ascii_case(wanted))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only),
        [] => Err(format!("category \"{}\" not found", query)),
        several => Err(format!(
            "\"{}\" matches {} categories, use an id: {}",
            query,
            several.len(),
            several
                .iter()
                .map(|c| c.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

/// Find a task by id, then by 1-based position
pub fn resolve_task<'a>(category: &'a Category, query: &str) -> Result<&'a Task, String> {
    if let Some(task) = category.find_task(query) {
        return Ok(task);
    }
    query
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| category.tasks.get(i))
        .ok_or_else(|| format!("task \"{}\" not found in {}", query, category.name))
}

fn parse_color(s: &str) -> Result<Swatch, String> {
    Swatch::parse(s).ok_or_else(|| {
        format!(
            "unknown color '{}' (expected: {})",
            s,
            Swatch::ALL
                .iter()
                .map(|sw| sw.name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

/// Resolve `CAT TASK` to owned ids so the board can be mutated afterwards
fn resolve_ids(board: &Board, category: &str, task: &str) -> Result<(String, String), String> {
    let cat = resolve_category(board, category)?;
    let task = resolve_task(cat, task)?;
    Ok((cat.id.clone(), task.id.clone()))
}

fn confirm_on_stdin(prompt: &str) -> std::io::Result<bool> {
    eprint!("{} [y/N] ", prompt);
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let answer = input.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

// ---------------------------------------------------------------------------
// Read handlers
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, data_dir: Option<&Path>, json: bool) -> CmdResult {
    let ctx = open_context(data_dir)?;
    let board = ctx.session.board();
    let categories: Vec<&Category> = match &args.category {
        Some(query) => vec![resolve_category(board, query)?],
        None => board.categories.iter().collect(),
    };

    if json {
        let out: Vec<CategoryJson> = categories.iter().map(|c| category_to_json(c)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if categories.is_empty() {
        println!("(no categories, create one with `tb category add NAME`)");
        return Ok(());
    }
    if args.category.is_none() {
        println!("{}", format_progress_line(board.progress()));
        println!();
    }
    for (i, cat) in categories.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in format_category_listing(cat) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(data_dir: Option<&Path>, json: bool) -> CmdResult {
    let ctx = open_context(data_dir)?;
    let board = ctx.session.board();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(board))?);
    } else {
        for line in format_stats_table(board) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_colors(json: bool) -> CmdResult {
    if json {
        let colors: Vec<ColorJson> = Swatch::ALL
            .iter()
            .map(|s| ColorJson {
                name: s.name(),
                hex: s.hex(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&colors)?);
    } else {
        for s in Swatch::ALL {
            println!("{:<7} {}", s.name(), s.hex());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Category handlers
// ---------------------------------------------------------------------------

fn cmd_category(args: CategoryCmd, data_dir: Option<&Path>, json: bool) -> CmdResult {
    match args.action {
        CategoryAction::Add(a) => cmd_category_add(a, data_dir, json),
        CategoryAction::Edit(a) => cmd_category_edit(a, data_dir),
        CategoryAction::Rm(a) => cmd_category_rm(a, data_dir),
    }
}

fn cmd_category_add(args: CategoryAddArgs, data_dir: Option<&Path>, json: bool) -> CmdResult {
    let mut ctx = open_context(data_dir)?;
    let swatch = match &args.color {
        Some(c) => parse_color(c)?,
        None => parse_color(&ctx.config.board.default_color)
            .map_err(|e| format!("board.default_color: {}", e))?,
    };

    let Some(id) = ctx.session.add_category(&args.name, swatch) else {
        println!("nothing to do: category name is empty");
        return Ok(());
    };
    check_saved(&ctx.session)?;
    if json {
        println!("{}", serde_json::json!({ "id": id }));
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_category_edit(args: CategoryEditArgs, data_dir: Option<&Path>) -> CmdResult {
    if args.name.is_none() && args.color.is_none() {
        return Err("nothing to change (use --name and/or --color)".into());
    }
    let mut ctx = open_context(data_dir)?;
    let color = args.color.as_deref().map(parse_color).transpose()?;
    let edited = {
        let cat = resolve_category(ctx.session.board(), &args.category)?;
        category_ops::edit_category(cat, args.name.as_deref(), color)
    };
    let name = edited.name.clone();

    if !ctx.session.update_category(edited) {
        println!("nothing to do: category unchanged");
        return Ok(());
    }
    check_saved(&ctx.session)?;
    println!("updated {}", name);
    Ok(())
}

fn cmd_category_rm(args: CategoryRmArgs, data_dir: Option<&Path>) -> CmdResult {
    let mut ctx = open_context(data_dir)?;
    let id = resolve_category(ctx.session.board(), &args.category)?
        .id
        .clone();
    let ask = ctx.config.board.confirm_delete && !args.yes;

    let mut prompt_error = None;
    let deleted = ctx.session.delete_category(&id, |cat| {
        if !ask {
            return true;
        }
        let prompt = format!("Delete category \"{}\" and all its tasks?", cat.name);
        confirm_on_stdin(&prompt).unwrap_or_else(|e| {
            prompt_error = Some(e);
            false
        })
    });
    if let Some(e) = prompt_error {
        return Err(e.into());
    }
    if !deleted {
        println!("cancelled");
        return Ok(());
    }
    check_saved(&ctx.session)?;
    println!("deleted category {}", id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Task handlers
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, data_dir: Option<&Path>, json: bool) -> CmdResult {
    let mut ctx = open_context(data_dir)?;
    let cat_id = resolve_category(ctx.session.board(), &args.category)?
        .id
        .clone();
    let Some(id) = ctx.session.add_task(&cat_id, &args.text) else {
        println!("nothing to do: task text is empty");
        return Ok(());
    };
    check_saved(&ctx.session)?;
    if json {
        println!("{}", serde_json::json!({ "category": cat_id, "id": id }));
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_toggle(args: TaskRefArgs, data_dir: Option<&Path>) -> CmdResult {
    let mut ctx = open_context(data_dir)?;
    let (cat_id, task_id) = resolve_ids(ctx.session.board(), &args.category, &args.task)?;
    ctx.session.toggle_task(&cat_id, &task_id);
    check_saved(&ctx.session)?;
    if let Some(task) = ctx
        .session
        .board()
        .find(&cat_id)
        .and_then(|c| c.find_task(&task_id))
    {
        println!("{} {}", task.checkbox(), task.text);
    }
    Ok(())
}

fn cmd_rm(args: TaskRefArgs, data_dir: Option<&Path>) -> CmdResult {
    let mut ctx = open_context(data_dir)?;
    let (cat_id, task_id) = resolve_ids(ctx.session.board(), &args.category, &args.task)?;
    ctx.session.delete_task(&cat_id, &task_id);
    check_saved(&ctx.session)?;
    println!("deleted task {}", task_id);
    Ok(())
}

fn cmd_mv(args: MvArgs, data_dir: Option<&Path>) -> CmdResult {
    let direction = MoveDirection::parse(&args.direction).ok_or_else(|| {
        format!(
            "unknown direction '{}' (expected: up, down)",
            args.direction
        )
    })?;
    let mut ctx = open_context(data_dir)?;
    let (cat_id, task_id) = resolve_ids(ctx.session.board(), &args.category, &args.task)?;

    if !ctx.session.move_task(&cat_id, &task_id, direction) {
        let edge = match direction {
            MoveDirection::Up => "top",
            MoveDirection::Down => "bottom",
        };
        println!("nothing to do: task is already at the {}", edge);
        return Ok(());
    }
    check_saved(&ctx.session)?;
    let position = ctx
        .session
        .board()
        .find(&cat_id)
        .and_then(|c| c.task_position(&task_id))
        .map_or(0, |i| i + 1);
    println!("moved {} {} to position {}", task_id, direction, position);
    Ok(())
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}

fn cmd_recovery(args: RecoveryCmd, data_dir: Option<&Path>, json: bool) -> CmdResult {
    let dir = config_io::resolve_data_dir(data_dir);
    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", recovery::recovery_log_path(&dir).display());
            Ok(())
        }
        Some(RecoveryAction::Prune(prune)) => {
            let before = prune.before.as_deref().map(parse_timestamp).transpose()?;
            let removed = recovery::prune_recovery(&dir, before, prune.all)?;
            println!("removed {} entries", removed);
            Ok(())
        }
        None => {
            let since = args.since.as_deref().map(parse_timestamp).transpose()?;
            let mut entries = recovery::read_recovery_entries(&dir, None);
            if let Some(since) = since {
                entries.retain(|e| e.timestamp > since);
            }
            entries.truncate(args.limit.unwrap_or(10));

            if json {
                let values: Vec<serde_json::Value> =
                    entries.iter().map(|e| e.to_json()).collect();
                println!("{}", serde_json::to_string_pretty(&values)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("(recovery log is empty)");
                return Ok(());
            }
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", entry.to_markdown());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let mut work = Category::new("1", "Work", Swatch::Pink);
        work.tasks.push(Task::new("10", "first"));
        work.tasks.push(Task::new("11", "second"));
        let home = Category::new("2", "Home", Swatch::Cyan);
        Board::new(vec![work, home])
    }

    #[test]
    fn category_resolves_by_id_then_name() {
        let b = board();
        assert_eq!(resolve_category(&b, "2").unwrap().name, "Home");
        assert_eq!(resolve_category(&b, "work").unwrap().id, "1");
        assert!(resolve_category(&b, "garden").is_err());
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let mut b = board();
        b.categories.push(Category::new("3", "HOME", Swatch::Green));
        let err = resolve_category(&b, "home").unwrap_err();
        assert!(err.contains("2, 3"));
    }

    #[test]
    fn task_resolves_by_id_then_position() {
        let b = board();
        let work = &b.categories[0];
        assert_eq!(resolve_task(work, "11").unwrap().text, "second");
        assert_eq!(resolve_task(work, "1").unwrap().text, "first");
        assert!(resolve_task(work, "0").is_err());
        assert!(resolve_task(work, "3").is_err());
    }

    #[test]
    fn color_by_name_or_hex() {
        assert_eq!(parse_color("Purple").unwrap(), Swatch::Purple);
        assert_eq!(parse_color("#00f0ff").unwrap(), Swatch::Cyan);
        let err = parse_color("teal").unwrap_err();
        assert!(err.contains("pink, cyan, yellow, green, purple, orange"));
    }
}
