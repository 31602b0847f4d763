//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_studybuddy-cli"))
        .args(args)
        .env("STUDYBUDDY_DATA_DIR", data_dir.path())
        .env_remove("STUDYBUDDY_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &TempDir, args: &[&str]) -> (i32, serde_json::Value) {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    let value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON from {args:?}: {e}\nstdout: {stdout}\nstderr: {stderr}"));
    (code, value)
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("checkin"));
    assert!(stdout.contains("shop"));
}

#[test]
fn test_checkin_awards_cycle_rewards() {
    let dir = TempDir::new().unwrap();

    let (code, first) = run_json(&dir, &["checkin", "--date", "2024-10-01", "--json"]);
    assert_eq!(code, 0);
    assert_eq!(first["success"], true);
    assert_eq!(first["coinsAwarded"], 1);
    assert_eq!(first["coins"], 11);

    let (_, second) = run_json(&dir, &["checkin", "--date", "2024-10-02", "--json"]);
    assert_eq!(second["coinsAwarded"], 2);
    assert_eq!(second["currentStreak"], 2);
    assert_eq!(second["coins"], 13);
}

#[test]
fn test_checkin_twice_same_day() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["checkin", "--date", "2024-10-05"]);

    let (code, again) = run_json(&dir, &["checkin", "--date", "2024-10-05", "--json"]);
    assert_eq!(code, 0);
    assert_eq!(again["success"], false);
    assert_eq!(again["coinsAwarded"], 0);
    assert_eq!(again["coins"], 11);
}

#[test]
fn test_checkin_preview_does_not_mutate() {
    let dir = TempDir::new().unwrap();
    let (code, preview) = run_json(&dir, &["checkin", "--date", "2024-10-05", "--preview", "--json"]);
    assert_eq!(code, 0);
    assert_eq!(preview["nextReward"], 1);
    assert_eq!(preview["alreadyCheckedIn"], false);

    let (_, wallet) = run_json(&dir, &["wallet", "show", "--json"]);
    assert_eq!(wallet["coins"], 10);
    assert_eq!(wallet["totalCheckIns"], 0);
}

#[test]
fn test_shop_buy_and_reject() {
    let dir = TempDir::new().unwrap();

    let (code, bought) = run_json(&dir, &["shop", "buy", "theme-forest", "--json"]);
    assert_eq!(code, 0);
    assert_eq!(bought["success"], true);
    assert_eq!(bought["balance"], 2);

    let (code, broke) = run_json(&dir, &["shop", "buy", "music-lofi", "--json"]);
    assert_eq!(code, 1);
    assert_eq!(broke["success"], false);
    assert_eq!(broke["errorKind"], "insufficient_funds");

    let (code, owned) = run_json(&dir, &["shop", "buy", "theme-forest", "--json"]);
    assert_eq!(code, 1);
    assert_eq!(owned["errorKind"], "already_owned");

    let (_, wallet) = run_json(&dir, &["wallet", "show", "--json"]);
    assert_eq!(wallet["coins"], 2);
}

#[test]
fn test_shop_list_marks_owned_items() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["shop", "buy", "music-lofi"]);

    let (code, music) = run_json(&dir, &["shop", "list", "--category", "music", "--json"]);
    assert_eq!(code, 0);
    let items = music.as_array().unwrap();
    assert_eq!(items.len(), 2);
    let lofi = items.iter().find(|i| i["id"] == "music-lofi").unwrap();
    assert_eq!(lofi["owned"], true);
}

#[test]
fn test_wallet_debit_rejects_overdraft() {
    let dir = TempDir::new().unwrap();

    let (code, rejected) = run_json(&dir, &["wallet", "debit", "11", "--json"]);
    assert_eq!(code, 1);
    assert_eq!(rejected["errorKind"], "insufficient_funds");

    let (code, _, stderr) = run_cli(&dir, &["wallet", "credit", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_wallet_negative_amounts_reach_the_ledger() {
    let dir = TempDir::new().unwrap();

    let (code, credit) = run_json(&dir, &["wallet", "credit", "-5", "--json"]);
    assert_eq!(code, 1);
    assert_eq!(credit["errorKind"], "invalid_amount");

    let (code, debit) = run_json(&dir, &["wallet", "debit", "-3", "--json"]);
    assert_eq!(code, 1);
    assert_eq!(debit["errorKind"], "invalid_amount");

    let (_, wallet) = run_json(&dir, &["wallet", "show", "--json"]);
    assert_eq!(wallet["coins"], 10);
}

#[test]
fn test_motivation_adjust_clamps() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["motivation", "adjust", "-200"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Motivation: 0"));

    let (_, stdout, _) = run_cli(&dir, &["motivation", "adjust", "500"]);
    assert!(stdout.contains("Motivation: 100"));
}

#[test]
fn test_task_lifecycle() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["task", "add", "Essay draft", "--due", "2024-11-02T09:00:00Z"]);
    assert_eq!(code, 0);
    let id = stdout.trim().to_string();

    let (_, tasks) = run_json(&dir, &["task", "list", "--json"]);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["reminderMinutes"], 15);

    let (code, _, _) = run_cli(&dir, &["task", "complete", &id]);
    assert_eq!(code, 0);
    let (_, open) = run_json(&dir, &["task", "list", "--json"]);
    assert!(open.as_array().unwrap().is_empty());

    let (code, _, stderr) = run_cli(&dir, &["task", "delete", "no-such-task"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown task"));
}

#[test]
fn test_coach_reply_is_recorded() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["coach", "ask", "hello coach", "--no-delay"]);
    assert_eq!(code, 0);
    assert!(!stdout.trim().is_empty());

    let (_, history) = run_json(&dir, &["coach", "history", "--json"]);
    assert_eq!(history.as_array().unwrap().len(), 2);

    run_cli(&dir, &["coach", "clear"]);
    let (_, history) = run_json(&dir, &["coach", "history", "--json"]);
    assert!(history.as_array().unwrap().is_empty());
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["config", "get", "economy.starting_coins"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10");

    let (code, _, _) = run_cli(&dir, &["config", "set", "economy.starting_coins", "25"]);
    assert_eq!(code, 0);

    let (_, wallet) = run_json(&dir, &["wallet", "show", "--json"]);
    assert_eq!(wallet["coins"], 25);

    let (code, _, stderr) = run_cli(&dir, &["config", "get", "economy.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_state_export_uses_snapshot_layout() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["checkin", "--date", "2024-10-01"]);

    let (code, state) = run_json(&dir, &["state", "export"]);
    assert_eq!(code, 0);
    assert_eq!(state["userProfile"]["coins"], 11);
    assert_eq!(state["lastCheckIn"], "2024-10-01");
    assert_eq!(state["dailyCheckIns"][0]["dateKey"], "2024-10-01");
}

#[test]
fn test_achievements_json() {
    let dir = TempDir::new().unwrap();
    let find = |statuses: &serde_json::Value, id: &str| {
        statuses
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["id"] == id)
            .cloned()
            .unwrap()
    };

    let (code, before) = run_json(&dir, &["achievements", "--json"]);
    assert_eq!(code, 0);
    assert_eq!(find(&before, "first_steps")["unlocked"], false);

    let (_, stdout, _) = run_cli(&dir, &["task", "add", "Lab report", "--due", "2024-11-02T09:00:00Z"]);
    run_cli(&dir, &["task", "complete", stdout.trim()]);
    run_cli(&dir, &["checkin", "--date", "2024-10-01"]);

    let (_, after) = run_json(&dir, &["achievements", "--json"]);
    assert_eq!(find(&after, "first_steps")["unlocked"], true);
    assert_eq!(find(&after, "dedicated")["current"], 1);
}
