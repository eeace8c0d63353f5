use anyhow::Result;
use std::io::Write;
use std::process::{Command, Stdio};

#[path = "../common/mod.rs"]
mod common;
use common::{write_temp_json, SAMPLE_JSON};

fn jql() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jql"))
}

/// Test that the info command reports the dataset shape
#[test]
fn test_cli_info_command() -> Result<()> {
    let data = write_temp_json(SAMPLE_JSON)?;

    let output = jql().arg(data.path()).arg("info").output()?;
    assert!(output.status.success(), "CLI info command failed");

    let output_str = String::from_utf8(output.stdout)?;
    assert!(output_str.contains("Dataset Information:"));
    assert!(output_str.contains("Rows: 5"));
    assert!(output_str.contains("Columns: id, name, age, score, active"));
    Ok(())
}

/// Test that the CLI can execute a query and format results
#[test]
fn test_cli_query_execution() -> Result<()> {
    let data = write_temp_json(SAMPLE_JSON)?;

    let output = jql()
        .arg(data.path())
        .args(["query", "SELECT id,name FROM people WHERE age >= 30 OR age > 29 LIMIT 1"])
        .output()?;
    // `>=` is not an operator, so this query must fail
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Invalid statement"), "unexpected error: {}", stderr);

    let output = jql()
        .arg(data.path())
        .args(["query", "SELECT id,name FROM people WHERE age > 29 LIMIT 2"])
        .output()?;
    assert!(output.status.success(), "CLI query execution failed");

    let output_str = String::from_utf8(output.stdout)?;
    assert!(output_str.contains("| id  | name      |"));
    assert!(output_str.contains("Bob"));
    assert!(output_str.contains("Charlie"));
    assert!(!output_str.contains("Dave"));
    assert!(output_str.contains("(2 rows)"));
    Ok(())
}

/// Test JSON output
#[test]
fn test_cli_json_format() -> Result<()> {
    let data = write_temp_json(SAMPLE_JSON)?;

    let output = jql()
        .arg(data.path())
        .args(["--format", "json", "query", "SELECT name FROM people WHERE active = false"])
        .output()?;
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed, serde_json::json!([{"name": "Bob"}, {"name": "Dave"}]));
    Ok(())
}

/// Test the CLI shell functionality with input redirection
#[test]
fn test_cli_shell_interaction() -> Result<()> {
    let data = write_temp_json(SAMPLE_JSON)?;
    let history_dir = tempfile::tempdir()?;

    let mut child = jql()
        .arg(data.path())
        .arg("--history-file")
        .arg(history_dir.path().join("history"))
        .arg("shell")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    if let Some(stdin) = child.stdin.as_mut() {
        writeln!(stdin, "SELECT name FROM people WHERE id = 3")?;
        writeln!(stdin, "SELECT name FROM people WHERE id = 1.2.3")?;
        writeln!(stdin, "SELECT ghost FROM people")?;
        writeln!(stdin, "0")?;
    }
    let output = child.wait_with_output()?;
    assert!(output.status.success(), "CLI shell interaction failed");

    let output_str = String::from_utf8(output.stdout)?;
    assert!(output_str.contains("Table of size 5 created."));
    assert!(output_str.contains("Query parsed in"));
    assert!(output_str.contains("Query executed in"));
    assert!(output_str.contains("Charlie"));
    assert!(output_str.contains("Failed to parse query: Invalid number '1.2.3'"));
    assert!(output_str.contains("Failed to execute query: Column not found: ghost"));
    assert!(output_str.contains("Goodbye!"));
    Ok(())
}

/// Test that the CLI reports a missing dataset
#[test]
fn test_cli_missing_dataset() -> Result<()> {
    let output = jql()
        .args(["/nonexistent/jsonql/data.json", "info"])
        .output()?;
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to load dataset"));
    Ok(())
}
