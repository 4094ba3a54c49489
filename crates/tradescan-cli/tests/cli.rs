use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TRANSCRIPT: &str = "\
#48213377  EURUSD, buy 2 lots
1.10500  ->  1.10600
S/L: 1.10000    T/P: 1.11000
2024.01.15 10:30:00   2024.01.15 14:45:10
Swap: -1.25
Commission: -7.00
Profit: 200.00 USD
";

const SELL_TRANSCRIPT: &str = "\
GBPUSD sell 1
1.25000 1.25300
Profit: -30.00 USD
";

/// Command isolated from the user's real config directory.
fn tradescan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tradescan").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_extract_json_from_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "trade.txt", TRANSCRIPT);

    tradescan(dir.path())
        .args(["extract", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"symbol\": \"EURUSD\""))
        .stdout(predicate::str::contains("\"order_id\": \"48213377\""))
        .stdout(predicate::str::contains("\"operation_type\": \"Buy\""));
}

#[test]
fn test_extract_text_from_stdin() {
    let dir = TempDir::new().unwrap();

    tradescan(dir.path())
        .args(["extract", "-", "--format", "text"])
        .write_stdin(SELL_TRANSCRIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Trade: GBPUSD Sell"))
        .stdout(predicate::str::contains("Pips:       -30.0"));
}

#[test]
fn test_extract_csv_to_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "trade.txt", TRANSCRIPT);
    let output = dir.path().join("trade.csv");

    tradescan(dir.path())
        .args(["extract", input.to_str().unwrap(), "--format", "csv"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("symbol,operation_type,volume"));
    assert!(csv.contains("EURUSD,Buy,2"));
}

#[test]
fn test_extract_missing_input() {
    let dir = TempDir::new().unwrap();

    tradescan(dir.path())
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_show_missing() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "partial.txt", "EURUSD buy\n");

    tradescan(dir.path())
        .args(["extract", input.to_str().unwrap(), "--show-missing"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Not recognized:"))
        .stderr(predicate::str::contains("entry_price"));
}

#[test]
fn test_record_then_report() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "trade.txt", TRANSCRIPT);
    let journal = dir.path().join("journal.csv");

    tradescan(dir.path())
        .args(["record", input.to_str().unwrap(), "--user-id", "7", "--username", "alice"])
        .arg("--journal")
        .arg(&journal)
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded EURUSD Buy (10.0 pips) for alice"));

    tradescan(dir.path())
        .arg("report")
        .arg("--journal")
        .arg(&journal)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total trades:      1"))
        .stdout(predicate::str::contains("Total profit:      10.0 pips"));

    tradescan(dir.path())
        .args(["report", "--user-id", "7"])
        .arg("--journal")
        .arg(&journal)
        .assert()
        .success()
        .stdout(predicate::str::contains("TRADING STATISTICS FOR USER 7"));
}

#[test]
fn test_report_empty_journal() {
    let dir = TempDir::new().unwrap();
    let journal = dir.path().join("journal.csv");

    tradescan(dir.path())
        .arg("report")
        .arg("--journal")
        .arg(&journal)
        .assert()
        .success()
        .stdout(predicate::str::contains("No trades recorded yet."));

    assert!(!journal.exists());
}

#[test]
fn test_batch_records_all_transcripts() {
    let dir = TempDir::new().unwrap();
    let inputs = TempDir::new().unwrap();
    write(&inputs, "a.txt", TRANSCRIPT);
    write(&inputs, "b.txt", SELL_TRANSCRIPT);
    let journal = dir.path().join("journal.csv");
    let summary = dir.path().join("summary.csv");
    let pattern = inputs.path().join("*.txt");

    tradescan(dir.path())
        .args(["batch", pattern.to_str().unwrap(), "--user-id", "9", "--username", "bob"])
        .args(["--jobs", "2"])
        .arg("--journal")
        .arg(&journal)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    let summary = fs::read_to_string(&summary).unwrap();
    assert!(summary.contains("a.txt,success,EURUSD,Buy"));
    assert!(summary.contains("b.txt,success,GBPUSD,Sell"));

    tradescan(dir.path())
        .args(["report", "--by-user"])
        .arg("--journal")
        .arg(&journal)
        .assert()
        .success()
        .stdout(predicate::str::contains("bob:"))
        .stdout(predicate::str::contains("Trades:   2"));
}

#[test]
fn test_batch_no_matches() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.none");

    tradescan(dir.path())
        .args(["batch", pattern.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn test_config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_str().unwrap();

    tradescan(dir.path())
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    tradescan(dir.path())
        .args(["--config", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    tradescan(dir.path())
        .args(["--config", config, "config", "set", "journal.default_username", "desk"])
        .assert()
        .success();

    tradescan(dir.path())
        .args(["--config", config, "config", "get", "journal.default_username"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"desk\""));

    tradescan(dir.path())
        .args(["--config", config, "config", "get", "journal.nope"])
        .assert()
        .failure();
}
