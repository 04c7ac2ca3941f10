//! Runs the scalecart binary against the demo catalog and session script

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::{tempdir, TempDir};

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
}

/// Binary isolated from the user's config, working inside `dir`
fn scalecart(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scalecart"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("RUST_LOG", "warn")
        .arg("--catalog")
        .arg(demos_dir().join("items.toml"));
    cmd
}

fn run_with_input(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn json_stdout(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "scalecart failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn workspace() -> TempDir {
    tempdir().unwrap()
}

#[test]
fn test_price_cart_file() {
    let dir = workspace();
    let output = scalecart(dir.path())
        .args(["--format", "json", "price"])
        .arg(demos_dir().join("cart.json"))
        .output()
        .unwrap();

    let receipt = json_stdout(&output);
    assert_eq!(receipt["total_price"], 74.5);
    let items = receipt["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["actual_weight"], 500);
    assert_eq!(items[1]["sold_by_weight"], true);
    assert_eq!(items[2]["message"], "Price not found");
    assert!(!dir.path().join("receipt.json").exists());
}

#[test]
fn test_price_keeps_zero_count() {
    let dir = workspace();
    let cart = dir.path().join("cart.json");
    std::fs::write(&cart, r#"[{"name": "rice", "weight": 600, "count": 0}]"#).unwrap();

    let output = scalecart(dir.path())
        .args(["--format", "json", "price"])
        .arg(&cart)
        .output()
        .unwrap();

    let receipt = json_stdout(&output);
    assert_eq!(receipt["items"][0]["count"], 0);
    assert_eq!(receipt["total_price"], 0.0);
}

#[test]
fn test_saved_receipt_can_be_edited() {
    let dir = workspace();
    let saved = scalecart(dir.path())
        .args(["price", "--save"])
        .arg(demos_dir().join("cart.json"))
        .output()
        .unwrap();
    assert!(saved.status.success());
    assert!(dir.path().join("receipt.json").exists());

    let edited = scalecart(dir.path())
        .args(["--format", "json", "receipt", "--set-count", "0", "3"])
        .output()
        .unwrap();
    let receipt = json_stdout(&edited);
    assert_eq!(receipt["items"][0]["count"], 3);
    assert_eq!(receipt["total_price"], 154.5);

    // sold-by-weight lines have no editable quantity
    let rejected = scalecart(dir.path())
        .args(["receipt", "--set-count", "1", "2"])
        .output()
        .unwrap();
    assert!(!rejected.status.success());
}

#[test]
fn test_simulated_session() {
    let dir = workspace();
    let mut cmd = scalecart(dir.path());
    cmd.args(["run", "--known", "200", "--simulate"])
        .arg(demos_dir().join("session.toml"));

    let output = run_with_input(cmd, "\nr\nr\nr\nq\n\nx\n");
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Registered banana (345 g)"));
    assert!(stdout.contains("Rejected"));
    // no front-end configured: the receipt is issued but nobody paid
    assert!(stdout.contains("Served 0 customer(s)"));
    assert!(stdout.contains("1 checkout(s) did not reach the front-end"));

    let receipt: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("receipt.json")).unwrap()).unwrap();
    assert_eq!(receipt["total_price"], 74.5);
    assert_eq!(receipt["items"].as_array().unwrap().len(), 2);
}

#[test]
fn test_run_without_devices_configured() {
    let dir = workspace();
    let output = scalecart(dir.path()).arg("run").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("sensor_command"));
}
