#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskboard").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }
}

/// Init, create a project and activate it. Returns the project id.
fn setup_with_project(env: &TestEnv) -> i64 {
    env.run_ok(&["init"]);
    let v = env.run_ok(&["project", "create", "Website", "--description", "Landing page"]);
    let id = v["data"]["id"].as_i64().unwrap();
    env.run_ok(&["project", "activate", &id.to_string()]);
    id
}

fn add_task(env: &TestEnv, title: &str) -> i64 {
    let v = env.run_ok(&["task", "add", title]);
    v["data"]["task"]["id"].as_i64().unwrap()
}

fn column<'a>(board: &'a Value, key: &str) -> &'a Value {
    board["data"]["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["key"] == key)
        .unwrap_or_else(|| panic!("column {key} missing: {board}"))
}

fn column_ids(board: &Value, key: &str) -> Vec<String> {
    column(board, key)["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}

fn project_status(env: &TestEnv, id: i64) -> String {
    let v = env.run_ok(&["project", "show", &id.to_string()]);
    v["data"]["project"]["status"].as_str().unwrap().to_string()
}

// ─── 1. init ───────────────────────────────────────────────────────

#[test]
fn test_init() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    let path = v["data"]["path"].as_str().unwrap();
    assert!(path.ends_with(".taskboard/taskboard.db"));
    assert!(PathBuf::from(path).exists());
}

#[test]
fn test_init_idempotent() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["init"]);
    assert!(v["data"]["path"].as_str().unwrap().contains("taskboard.db"));
}

#[test]
fn test_init_required_before_commands() {
    let env = TestEnv::new();
    let v = env.run_err(&["project", "list"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
    let v = env.run_err(&["board"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
    let v = env.run_err(&["profile", "show"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
}

#[test]
fn test_commands_work_from_subdirectory() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let sub = env.dir.path().join("nested/deeper");
    std::fs::create_dir_all(&sub).unwrap();

    let output = Command::cargo_bin("taskboard")
        .unwrap()
        .current_dir(&sub)
        .args(["project", "list", "--json"])
        .output()
        .unwrap();
    let v: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["success"], true);
}

// ─── 2. projects ───────────────────────────────────────────────────

#[test]
fn test_project_crud() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);

    let v = env.run_ok(&["project", "create", "Website", "--description", "Landing page"]);
    let id = v["data"]["id"].as_i64().unwrap();
    assert_eq!(v["data"]["name"], "Website");
    assert_eq!(v["data"]["status"], "active");
    assert!(v["data"]["created_at"].as_str().is_some());

    let v = env.run_ok(&["project", "list"]);
    let projects = v["data"]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "Website");
    assert_eq!(v["data"]["counts"]["active"], 1);

    let v = env.run_ok(&["project", "show", &id.to_string()]);
    assert_eq!(v["data"]["project"]["description"], "Landing page");
    assert_eq!(v["data"]["counts"]["total"], 0);

    let v = env.run_ok(&["project", "activate", &id.to_string()]);
    assert_eq!(v["data"]["activated"]["id"], id);

    let v = env.run_ok(&["project", "list"]);
    assert_eq!(v["data"]["projects"][0]["active"], true);

    let v = env.run_ok(&["project", "delete", &id.to_string()]);
    assert_eq!(v["data"]["deleted"]["name"], "Website");

    let v = env.run_ok(&["project", "list"]);
    assert_eq!(v["data"]["projects"].as_array().unwrap().len(), 0);
}

#[test]
fn test_project_list_newest_first() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env.run_ok(&["project", "create", "First"]);
    env.run_ok(&["project", "create", "Second"]);

    let v = env.run_ok(&["project", "list"]);
    let names: Vec<_> = v["data"]["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[test]
fn test_project_validation() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["project", "create", "   "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["project", "create", "Site", "--status", "archived"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_project_not_found() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["project", "show", "99"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
    let v = env.run_err(&["project", "activate", "99"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
    let v = env.run_err(&["project", "delete", "99"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
}

#[test]
fn test_project_stats() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env.run_ok(&["project", "create", "A"]);
    env.run_ok(&["project", "create", "B", "--status", "paused"]);
    env.run_ok(&["project", "create", "C", "--status", "finished"]);

    let v = env.run_ok(&["project", "stats"]);
    assert_eq!(v["data"]["total"], 3);
    assert_eq!(v["data"]["active"], 1);
    assert_eq!(v["data"]["paused"], 1);
    assert_eq!(v["data"]["finished"], 1);
    assert_eq!(v["data"]["pending"], 0);
}

#[test]
fn test_delete_active_project_clears_it() {
    let env = TestEnv::new();
    let id = setup_with_project(&env);
    add_task(&env, "Write copy");

    env.run_ok(&["project", "delete", &id.to_string()]);
    let v = env.run_err(&["board"]);
    assert_eq!(v["error"]["code"], "NO_ACTIVE_PROJECT");
}

// ─── 3. board ──────────────────────────────────────────────────────

#[test]
fn test_board_requires_active_project() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_err(&["board"]);
    assert_eq!(v["error"]["code"], "NO_ACTIVE_PROJECT");
    let v = env.run_err(&["task", "add", "Orphan"]);
    assert_eq!(v["error"]["code"], "NO_ACTIVE_PROJECT");
}

#[test]
fn test_board_empty_has_four_columns() {
    let env = TestEnv::new();
    setup_with_project(&env);

    let v = env.run_ok(&["board"]);
    let keys: Vec<_> = v["data"]["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(keys, vec!["todo", "doing", "paused", "done"]);
    assert_eq!(column(&v, "todo")["title"], "To Do");
    assert_eq!(v["data"]["counts"]["total"], 0);
}

#[test]
fn test_board_project_flag_overrides_active() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_ok(&["project", "create", "Other"]);
    let other = v["data"]["id"].as_i64().unwrap().to_string();

    env.run_ok(&["task", "add", "Only here", "--project", &other]);

    let v = env.run_ok(&["board", "--project", &other]);
    assert_eq!(column(&v, "todo")["count"], 1);
    let v = env.run_ok(&["board"]);
    assert_eq!(column(&v, "todo")["count"], 0);

    let v = env.run_err(&["board", "--project", "99"]);
    assert_eq!(v["error"]["code"], "PROJECT_NOT_FOUND");
}

// ─── 4. tasks ──────────────────────────────────────────────────────

#[test]
fn test_task_add_lands_in_todo() {
    let env = TestEnv::new();
    setup_with_project(&env);

    let v = env.run_ok(&["task", "add", "Write copy"]);
    assert_eq!(v["data"]["task"]["title"], "Write copy");
    assert_eq!(v["data"]["task"]["status"], "todo");
    assert_eq!(v["data"]["task"]["tag"], "Geral");
    assert_eq!(v["data"]["task"]["tag_class"], "default");
    assert_eq!(v["data"]["project_status"], "pending");

    let v = env.run_ok(&["board"]);
    let todo = column(&v, "todo");
    assert_eq!(todo["count"], 1);
    assert_eq!(todo["items"][0]["content"], "Write copy");
    assert_eq!(todo["items"][0]["tag"], "Geral");
}

#[test]
fn test_task_add_blank_title() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_err(&["task", "add", "  "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_task_move_across_columns_updates_status() {
    let env = TestEnv::new();
    let pid = setup_with_project(&env);
    let a = add_task(&env, "A");
    let b = add_task(&env, "B");

    let v = env.run_ok(&["task", "move", &a.to_string(), "doing"]);
    assert_eq!(v["data"]["moved"]["outcome"], "transferred");
    assert_eq!(v["data"]["moved"]["from"], "todo");
    assert_eq!(v["data"]["moved"]["to"], "doing");
    assert_eq!(v["data"]["project_status"], "active");
    assert_eq!(column_ids(&v, "doing"), vec![a.to_string()]);
    assert_eq!(column_ids(&v, "todo"), vec![b.to_string()]);
    assert_eq!(project_status(&env, pid), "active");

    // Persisted: a fresh board shows the same columns.
    let v = env.run_ok(&["board"]);
    assert_eq!(column_ids(&v, "doing"), vec![a.to_string()]);
}

#[test]
fn test_project_status_follows_tasks() {
    let env = TestEnv::new();
    let pid = setup_with_project(&env);
    let a = add_task(&env, "A");
    let b = add_task(&env, "B");

    env.run_ok(&["task", "move", &a.to_string(), "paused"]);
    assert_eq!(project_status(&env, pid), "paused");

    env.run_ok(&["task", "move", &b.to_string(), "doing"]);
    assert_eq!(project_status(&env, pid), "active");

    env.run_ok(&["task", "move", &b.to_string(), "done"]);
    assert_eq!(project_status(&env, pid), "paused");

    let v = env.run_ok(&["task", "move", &a.to_string(), "done"]);
    assert_eq!(v["data"]["project_status"], "finished");
    assert_eq!(project_status(&env, pid), "finished");
}

#[test]
fn test_task_move_same_column_reorders_only() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = add_task(&env, "A");
    let b = add_task(&env, "B");
    let c = add_task(&env, "C");

    let v = env.run_ok(&["task", "move", &c.to_string(), "todo", "--index", "0"]);
    assert_eq!(v["data"]["moved"]["outcome"], "reordered");
    assert!(v["data"]["project_status"].is_null());
    assert_eq!(
        column_ids(&v, "todo"),
        vec![c.to_string(), a.to_string(), b.to_string()]
    );

    // Order within a column is not stored.
    let v = env.run_ok(&["board"]);
    assert_eq!(
        column_ids(&v, "todo"),
        vec![a.to_string(), b.to_string(), c.to_string()]
    );
}

#[test]
fn test_task_move_index_is_clamped() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = add_task(&env, "A");
    let b = add_task(&env, "B");
    env.run_ok(&["task", "move", &a.to_string(), "doing"]);

    let v = env.run_ok(&["task", "move", &b.to_string(), "doing", "--index", "50"]);
    assert_eq!(column_ids(&v, "doing"), vec![a.to_string(), b.to_string()]);
}

#[test]
fn test_task_move_errors() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = add_task(&env, "A");

    let v = env.run_err(&["task", "move", &a.to_string(), "blocked"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "move", "999", "done"]);
    assert_eq!(v["error"]["code"], "TASK_NOT_FOUND");
}

#[test]
fn test_task_move_reports_failed_write() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = add_task(&env, "A");

    let db = env.dir.path().join(".taskboard/taskboard.db");
    let conn = rusqlite::Connection::open(&db).expect("open db");
    conn.execute_batch(
        "CREATE TRIGGER reject_task_updates BEFORE UPDATE ON tasks
         BEGIN SELECT RAISE(ABORT, 'store unavailable'); END;",
    )
    .expect("create trigger");
    drop(conn);

    let v = env.run_err(&["task", "move", &a.to_string(), "done"]);
    assert_eq!(v["error"]["code"], "STORE_ERROR");

    let v = env.run_ok(&["board"]);
    assert_eq!(column_ids(&v, "todo"), vec![a.to_string()]);
    assert!(column_ids(&v, "done").is_empty());
}

#[test]
fn test_task_delete_rederives_status() {
    let env = TestEnv::new();
    let pid = setup_with_project(&env);
    let a = add_task(&env, "A");
    let b = add_task(&env, "B");
    env.run_ok(&["task", "move", &a.to_string(), "doing"]);
    env.run_ok(&["task", "move", &b.to_string(), "done"]);
    assert_eq!(project_status(&env, pid), "active");

    let v = env.run_ok(&["task", "delete", &a.to_string()]);
    assert_eq!(v["data"]["deleted"]["title"], "A");
    assert_eq!(v["data"]["project_status"], "finished");
    assert_eq!(project_status(&env, pid), "finished");

    let v = env.run_ok(&["board"]);
    assert_eq!(v["data"]["counts"]["total"], 1);
    assert_eq!(column_ids(&v, "done"), vec![b.to_string()]);
}

#[test]
fn test_task_delete_last_task_keeps_status() {
    let env = TestEnv::new();
    let pid = setup_with_project(&env);
    let a = add_task(&env, "A");
    env.run_ok(&["task", "move", &a.to_string(), "paused"]);

    let v = env.run_ok(&["task", "delete", &a.to_string()]);
    assert!(v["data"]["project_status"].is_null());
    assert_eq!(project_status(&env, pid), "paused");
}

#[test]
fn test_task_delete_unknown() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let v = env.run_err(&["task", "delete", "42"]);
    assert_eq!(v["error"]["code"], "TASK_NOT_FOUND");
}

#[test]
fn test_counts_percentage() {
    let env = TestEnv::new();
    setup_with_project(&env);
    let a = add_task(&env, "A");
    add_task(&env, "B");
    add_task(&env, "C");
    add_task(&env, "D");
    env.run_ok(&["task", "move", &a.to_string(), "done"]);

    let v = env.run_ok(&["board"]);
    assert_eq!(v["data"]["counts"]["done"], 1);
    assert_eq!(v["data"]["counts"]["todo"], 3);
    assert_eq!(v["data"]["counts"]["percentage"], 25.0);
}

// ─── 5. team / profile ─────────────────────────────────────────────

#[test]
fn test_team_add_list_remove() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);

    let v = env.run_ok(&["team", "add", "ana.silva@example.com"]);
    let id = v["data"]["id"].as_i64().unwrap();
    assert_eq!(v["data"]["name"], "ana.silva");
    assert_eq!(v["data"]["role"], "Developer");
    assert_eq!(v["data"]["is_admin"], false);

    env.run_ok(&[
        "team", "add", "bo@example.com", "--name", "Bo Chen", "--role", "Designer", "--admin",
    ]);

    let v = env.run_ok(&["team", "list"]);
    let members = v["data"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    let bo = members.iter().find(|m| m["email"] == "bo@example.com").unwrap();
    assert_eq!(bo["initials"], "BC");
    assert_eq!(bo["is_admin"], true);

    env.run_ok(&["team", "remove", &id.to_string()]);
    let v = env.run_ok(&["team", "list"]);
    assert_eq!(v["data"]["members"].as_array().unwrap().len(), 1);

    let v = env.run_err(&["team", "remove", &id.to_string()]);
    assert_eq!(v["error"]["code"], "MEMBER_NOT_FOUND");
}

#[test]
fn test_profile_set_and_show() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);

    let v = env.run_ok(&["profile", "show"]);
    assert_eq!(v["data"]["initials"], "EU");

    let v = env.run_ok(&[
        "profile", "set", "--first-name", "Ana", "--last-name", "Silva", "--email", "ana@example.com",
    ]);
    assert_eq!(v["data"]["full_name"], "Ana Silva");
    assert_eq!(v["data"]["initials"], "AS");

    let v = env.run_ok(&["profile", "show"]);
    assert_eq!(v["data"]["email"], "ana@example.com");

    let v = env.run_err(&["profile", "set", "--email", "not-an-email"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_team_sync_uses_profile() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);

    let v = env.run_err(&["team", "sync"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    env.run_ok(&["profile", "set", "--first-name", "Ana", "--email", "ana@example.com"]);
    let v = env.run_ok(&["team", "sync"]);
    assert_eq!(v["data"]["name"], "Ana");
    assert_eq!(v["data"]["is_admin"], true);
    assert_eq!(v["data"]["role"], "CEO / Founder");

    env.run_ok(&["profile", "set", "--last-name", "Silva"]);
    let v = env.run_ok(&["team", "sync"]);
    assert_eq!(v["data"]["name"], "Ana Silva");

    let v = env.run_ok(&["team", "list"]);
    assert_eq!(v["data"]["members"].as_array().unwrap().len(), 1);
}

#[test]
fn test_board_uses_profile_initials() {
    let env = TestEnv::new();
    setup_with_project(&env);
    env.run_ok(&["profile", "set", "--first-name", "Ana", "--last-name", "Silva"]);
    let v = env.run_ok(&["board"]);
    assert_eq!(v["data"]["initials"], "AS");
}

// ─── 6. text output ────────────────────────────────────────────────

#[test]
fn test_text_output() {
    let env = TestEnv::new();
    setup_with_project(&env);
    add_task(&env, "Write copy");

    env.cmd()
        .args(["board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do"))
        .stdout(predicate::str::contains("Write copy"));

    env.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Website"));
}

#[test]
fn test_text_error_exit_code() {
    let env = TestEnv::new();
    env.cmd()
        .args(["board"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
