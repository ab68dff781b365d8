//! Integration tests for the `tb` CLI.
//!
//! Each test points `tb` at a temp data directory with `-C`, runs it as a
//! subprocess, and verifies stdout and/or the stored board.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

const BOARD_FILE: &str = "productivity-dashboard-data.json";

fn tb(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tb"));
    cmd.arg("-C").arg(dir).env_remove("TASKBOARD_DIR");
    cmd
}

/// Run `tb` against `dir`, returning (stdout, stderr, success).
fn run_tb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = tb(dir).args(args).output().expect("failed to run tb");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tb` expecting success, return stdout.
fn run_tb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tb(dir, args);
    if !success {
        panic!(
            "tb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `tb` with `input` on stdin.
fn run_tb_with_input(dir: &Path, args: &[&str], input: &str) -> (String, String, bool) {
    let mut child = tb(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run tb");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn stored(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(dir.join(BOARD_FILE)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_config_and_board() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["init"]);
    assert!(out.contains("initialized taskboard"));
    assert!(out.contains("6 categories"));
    assert!(tmp.path().join("config.toml").exists());
    assert_eq!(stored(tmp.path()).as_array().unwrap().len(), 6);
}

#[test]
fn test_init_twice_needs_force() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["init"]);
    let (_, stderr, success) = run_tb(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already initialized"));

    let out = run_tb_ok(tmp.path(), &["init", "--force", "--empty"]);
    assert!(out.contains("previous board saved to"));
    assert_eq!(stored(tmp.path()), serde_json::json!([]));
    let bak = fs::read_to_string(tmp.path().join(format!("{}.bak", BOARD_FILE))).unwrap();
    assert!(bak.contains("Biz System"));
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_fresh_dir_shows_starter_board_without_writing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["list"]);
    assert!(out.starts_with("0/0 TASKS COMPLETED"));
    for name in ["Client", "Biz System", "Web & Funnel", "AI & Tech", "Learning", "Personal"] {
        assert!(out.contains(name), "missing {}", name);
    }
    assert!(!tmp.path().join(BOARD_FILE).exists());
}

#[test]
fn test_list_empty_board() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["init", "--empty"]);
    let out = run_tb_ok(tmp.path(), &["list"]);
    assert!(out.contains("no categories"));
}

#[test]
fn test_list_single_category_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["add", "learning", "Read the manual"]);
    let out = run_tb_ok(tmp.path(), &["list", "Learning", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], "5");
    assert_eq!(arr[0]["swatch"], "purple");
    assert_eq!(arr[0]["tasks"][0]["text"], "Read the manual");
    assert_eq!(arr[0]["tasks"][0]["completed"], false);
}

#[test]
fn test_colors() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["colors"]);
    assert!(out.contains("pink    #FF005C"));
    assert!(out.contains("orange  #FF6B35"));

    let out = run_tb_ok(tmp.path(), &["colors", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 6);
}

#[test]
fn test_stats() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["add", "1", "one"]);
    run_tb_ok(tmp.path(), &["add", "1", "two"]);
    run_tb_ok(tmp.path(), &["toggle", "1", "2"]);

    let out = run_tb_ok(tmp.path(), &["stats"]);
    assert!(out.contains("1/2 TASKS COMPLETED"));

    let out = run_tb_ok(tmp.path(), &["stats", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["totals"]["completed"], 1);
    assert_eq!(parsed["totals"]["total"], 2);
    assert_eq!(parsed["categories"][0]["name"], "Client");
    assert_eq!(parsed["categories"][0]["total"], 2);
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[test]
fn test_add_prints_id_and_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = run_tb_ok(tmp.path(), &["add", "Client", "  Send invoice  "]);
    let id = id.trim();
    assert!(id.parse::<u64>().is_ok());

    let board = stored(tmp.path());
    let task = &board[0]["tasks"][0];
    assert_eq!(task["id"], id);
    assert_eq!(task["text"], "Send invoice");
    assert_eq!(task["completed"], false);
}

#[test]
fn test_add_blank_text_is_nothing_to_do() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["add", "1", "   "]);
    assert!(out.contains("nothing to do"));
    assert!(!tmp.path().join(BOARD_FILE).exists());
}

#[test]
fn test_toggle_twice_restores_state() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = run_tb_ok(tmp.path(), &["add", "1", "Call back"]);
    let id = id.trim();

    let out = run_tb_ok(tmp.path(), &["toggle", "1", id]);
    assert!(out.contains("[x] Call back"));
    let out = run_tb_ok(tmp.path(), &["toggle", "client", "1"]);
    assert!(out.contains("[ ] Call back"));
    assert_eq!(stored(tmp.path())[0]["tasks"][0]["completed"], false);
}

#[test]
fn test_rm_task_keeps_sibling_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    for text in ["a", "b", "c"] {
        run_tb_ok(tmp.path(), &["add", "1", text]);
    }
    run_tb_ok(tmp.path(), &["rm", "1", "2"]);
    let board = stored(tmp.path());
    let texts: Vec<&str> = board[0]["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["a", "c"]);
}

#[test]
fn test_mv_swaps_neighbors() {
    let tmp = tempfile::TempDir::new().unwrap();
    for text in ["a", "b", "c"] {
        run_tb_ok(tmp.path(), &["add", "1", text]);
    }
    let out = run_tb_ok(tmp.path(), &["mv", "1", "3", "up"]);
    assert!(out.contains("to position 2"));

    let out = run_tb_ok(tmp.path(), &["list", "1"]);
    let a = out.find("] a").unwrap();
    let b = out.find("] b").unwrap();
    let c = out.find("] c").unwrap();
    assert!(a < c && c < b);
}

#[test]
fn test_mv_at_edges_is_nothing_to_do() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["add", "1", "a"]);
    run_tb_ok(tmp.path(), &["add", "1", "b"]);

    let out = run_tb_ok(tmp.path(), &["mv", "1", "1", "up"]);
    assert!(out.contains("already at the top"));
    let out = run_tb_ok(tmp.path(), &["mv", "1", "2", "down"]);
    assert!(out.contains("already at the bottom"));
}

#[test]
fn test_mv_rejects_unknown_direction() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["add", "1", "a"]);
    let (_, stderr, success) = run_tb(tmp.path(), &["mv", "1", "1", "sideways"]);
    assert!(!success);
    assert!(stderr.contains("unknown direction"));
}

#[test]
fn test_unknown_category_and_task_are_errors() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tb(tmp.path(), &["add", "Garden", "weed"]);
    assert!(!success);
    assert!(stderr.contains("error: category \"Garden\" not found"));

    let (_, stderr, success) = run_tb(tmp.path(), &["toggle", "1", "7"]);
    assert!(!success);
    assert!(stderr.contains("not found"));
}

// ---------------------------------------------------------------------------
// Category commands
// ---------------------------------------------------------------------------

#[test]
fn test_category_add_with_color() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = run_tb_ok(tmp.path(), &["category", "add", " Errands ", "--color", "green"]);
    let board = stored(tmp.path());
    let cat = &board[6];
    assert_eq!(cat["id"], id.trim());
    assert_eq!(cat["name"], "Errands");
    assert_eq!(cat["color"], "#00FF85");
    assert_eq!(cat["tasks"], serde_json::json!([]));
}

#[test]
fn test_category_add_uses_default_color() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["init", "--empty"]);
    let config = fs::read_to_string(tmp.path().join("config.toml"))
        .unwrap()
        .replace("default_color = \"#FF005C\"", "default_color = \"cyan\"");
    fs::write(tmp.path().join("config.toml"), config).unwrap();

    run_tb_ok(tmp.path(), &["category", "add", "Home"]);
    assert_eq!(stored(tmp.path())[0]["color"], "#00F0FF");
}

#[test]
fn test_category_add_rejects_unknown_color() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tb(tmp.path(), &["category", "add", "X", "--color", "teal"]);
    assert!(!success);
    assert!(stderr.contains("unknown color 'teal'"));
}

#[test]
fn test_category_edit() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(
        tmp.path(),
        &["category", "edit", "personal", "--name", "Home", "--color", "#ff005c"],
    );
    assert!(out.contains("updated Home"));
    let board = stored(tmp.path());
    assert_eq!(board[5]["name"], "Home");
    assert_eq!(board[5]["color"], "#FF005C");

    let out = run_tb_ok(tmp.path(), &["category", "edit", "home", "--name", "Home"]);
    assert!(out.contains("nothing to do"));
}

#[test]
fn test_category_rm_prompt_declined() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["init"]);
    let (stdout, stderr, success) =
        run_tb_with_input(tmp.path(), &["category", "rm", "Client"], "n\n");
    assert!(success);
    assert!(stderr.contains("Delete category \"Client\" and all its tasks? [y/N]"));
    assert!(stdout.contains("cancelled"));
    assert_eq!(stored(tmp.path()).as_array().unwrap().len(), 6);
}

#[test]
fn test_category_rm_prompt_accepted() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["init"]);
    let (stdout, _, success) = run_tb_with_input(tmp.path(), &["category", "rm", "2"], "y\n");
    assert!(success);
    assert!(stdout.contains("deleted category 2"));
    let board = stored(tmp.path());
    assert_eq!(board.as_array().unwrap().len(), 5);
    assert_eq!(board[1]["name"], "Web & Funnel");
}

#[test]
fn test_category_rm_last_one_persists_empty_board() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["init", "--empty"]);
    let id = run_tb_ok(tmp.path(), &["category", "add", "Work", "--color", "pink"]);
    run_tb_ok(tmp.path(), &["add", "Work", "Write report"]);
    run_tb_ok(tmp.path(), &["category", "rm", id.trim(), "--yes"]);

    let raw = fs::read_to_string(tmp.path().join(BOARD_FILE)).unwrap();
    assert_eq!(raw, "[]");
    // and it stays empty rather than reseeding
    let out = run_tb_ok(tmp.path(), &["list"]);
    assert!(out.contains("no categories"));
}

#[test]
fn test_category_rm_without_confirm_setting() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["init"]);
    let config = fs::read_to_string(tmp.path().join("config.toml"))
        .unwrap()
        .replace("confirm_delete = true", "confirm_delete = false");
    fs::write(tmp.path().join("config.toml"), config).unwrap();

    let (_, stderr, success) = run_tb_with_input(tmp.path(), &["category", "rm", "1"], "");
    assert!(success);
    assert!(!stderr.contains("[y/N]"));
    assert_eq!(stored(tmp.path()).as_array().unwrap().len(), 5);
}

// ---------------------------------------------------------------------------
// Persistence edge cases and the recovery log
// ---------------------------------------------------------------------------

#[test]
fn test_original_dashboard_data_loads() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join(BOARD_FILE),
        r##"[{"id":"1","name":"Client","color":"#FF005C","tasks":[{"id":"1712345678901","text":"Send proposal","completed":true}]},{"id":"1712345679000","name":"Side","color":"#9D4EDD","tasks":[]}]"##,
    )
    .unwrap();
    let out = run_tb_ok(tmp.path(), &["list"]);
    assert!(out.contains("1/1 TASKS COMPLETED"));
    assert!(out.contains("[x] Send proposal"));
    assert!(out.contains("== Side (1712345679000) 0/0 =="));
}

#[test]
fn test_malformed_board_is_backed_up_and_logged() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join(BOARD_FILE), "[{\"id\": oops").unwrap();

    let (stdout, stderr, success) = run_tb(tmp.path(), &["list"]);
    assert!(success);
    assert!(stderr.contains("warning:"));
    assert!(stdout.contains("Client"));
    assert_eq!(
        fs::read_to_string(tmp.path().join(format!("{}.bak", BOARD_FILE))).unwrap(),
        "[{\"id\": oops"
    );

    let out = run_tb_ok(tmp.path(), &["recovery", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["category"], "parser");
    assert_eq!(parsed[0]["body"], "[{\"id\": oops");
}

#[test]
fn test_deleted_category_is_recoverable() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["add", "Learning", "Finish course"]);
    run_tb_ok(tmp.path(), &["category", "rm", "Learning", "--yes"]);

    let out = run_tb_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("[delete] category \"Learning\" deleted"));
    assert!(out.contains("Finish course"));
}

#[test]
fn test_recovery_empty_path_and_prune() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("recovery log is empty"));

    let out = run_tb_ok(tmp.path(), &["recovery", "path"]);
    assert!(out.trim().ends_with(".recovery.log"));

    run_tb_ok(tmp.path(), &["category", "rm", "1", "--yes"]);
    run_tb_ok(tmp.path(), &["category", "rm", "2", "--yes"]);
    let out = run_tb_ok(tmp.path(), &["recovery", "prune"]);
    assert!(out.contains("removed 0 entries"));
    let out = run_tb_ok(tmp.path(), &["recovery", "prune", "--all"]);
    assert!(out.contains("removed 2 entries"));
    let out = run_tb_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("recovery log is empty"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[board\n").unwrap();
    let (_, stderr, success) = run_tb(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.contains("config.toml"));
}

#[test]
fn test_data_dir_from_env() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_tb"))
        .args(["add", "1", "via env"])
        .env("TASKBOARD_DIR", tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stored(tmp.path())[0]["tasks"][0]["text"], "via env");
}
