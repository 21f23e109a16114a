use std::process::Command;

fn run(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_zoo-donation"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn valid_submissions() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("history.csv");
    let (stdout, stderr, success) = run(&[
        "tests/fixtures/valid.csv",
        history.to_str().unwrap(),
    ]);

    assert!(success);
    assert!(stderr.is_empty(), "{stderr}");

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "success: Thanks for donating $10 to Memphis Zoo for Cheetahs. Want to donate again?"
    );
    assert_eq!(
        lines[1],
        "success: Thanks for donating $50 to City Zoo for Lion. Want to donate again?"
    );
    assert!(stdout.contains("Your current balance: $140\n"));
    assert!(stdout.contains("  [Submit Donation]\n"));
    assert!(!stdout.contains("No transaction history"));

    // most recent first
    let rows: Vec<&str> = lines
        .iter()
        .copied()
        .skip_while(|l| *l != "Transaction History")
        .skip(1)
        .collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("  Lion"));
    assert!(rows[1].starts_with("  Cheetahs"));

    let written = std::fs::read_to_string(history).unwrap();
    let mut history_lines = written.lines();
    assert_eq!(history_lines.next(), Some("animal,zoo,amount,date"));
    assert!(history_lines.next().unwrap().starts_with("Lion,City Zoo,50,"));
    assert!(history_lines.next().unwrap().starts_with("Cheetahs,Memphis Zoo,10,"));
    assert_eq!(history_lines.next(), None);
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run(&["tests/fixtures/with_errors.csv"]);

    assert!(success);
    assert!(stderr.contains("Select Zoo is required"));
    assert!(stderr.contains("'Tiger' is not one of the offered options"));
    assert!(stderr.contains("'abc' is not a positive whole number"));
    assert!(stderr.contains("submit is disabled"));

    assert!(stdout.contains("error: Insufficient balance. You only have $50 available.\n"));
    assert_eq!(stdout.matches("success: ").count(), 3);
    assert!(stdout.contains("Your current balance: $0\n"));
    assert!(stdout.contains("[Submit Donation] (disabled)"));
}

#[test]
fn missing_input_file_fails() {
    let (stdout, stderr, success) = run(&["tests/fixtures/does_not_exist.csv"]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to open"));
}
