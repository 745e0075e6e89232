//! CLI integration tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fbind"));
    command
        .env_remove("FORM_BINDING_MAX_MODEL_ERRORS")
        .env_remove("FORM_BINDING_CONTAINER_TYPE")
        .env_remove("FBIND_LOG");
    command
}

fn run_cli(args: &[&str]) -> std::io::Result<Output> {
    cli().args(args).output()
}

fn run_cli_with_stdin(args: &[&str], stdin: &str) -> std::io::Result<Output> {
    let mut child = cli()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut input) = child.stdin.take() {
        input.write_all(stdin.as_bytes())?;
    }
    child.wait_with_output()
}

fn parse_json(output: &Output) -> std::io::Result<serde_json::Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).map_err(std::io::Error::other)
}

#[test]
fn cli_version_runs() -> std::io::Result<()> {
    let output = run_cli(&["--version"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.starts_with("fbind "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn bind_valid_form_exits_zero() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let output = cli()
        .args(["bind", "--form", "Day=7&Month=11&Year=1990", "--config"])
        .arg(&config)
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.starts_with("status: ok\n"));
    assert!(stdout.contains("  Year: 1990\n"));
    Ok(())
}

#[test]
fn bind_invalid_form_exits_four_with_report() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let output = cli()
        .args(["--json", "bind", "--form", "Day=abc&Month=&Year=2000.5", "--config"])
        .arg(&config)
        .output()?;

    assert_eq!(output.status.code(), Some(4));
    let value = parse_json(&output)?;
    assert_eq!(value["status"], "invalid");
    let messages: Vec<&str> = value["report"]["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|error| error["message"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(
        messages,
        vec![
            "Day must be a number",
            "Enter the month you were born",
            "Year must be a whole number",
        ]
    );
    assert_eq!(value["report"]["errors"][0]["href"], "#Day");
    Ok(())
}

#[test]
fn bind_reads_form_body_from_stdin() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let config = config.to_string_lossy();
    let output = run_cli_with_stdin(
        &["--output", "json", "bind", "--config", config.as_ref()],
        "Day=1&Month=2&Year=%2B2003\n",
    )?;

    assert_eq!(output.status.code(), Some(0));
    let value = parse_json(&output)?;
    assert_eq!(value["report"]["values"][2]["value"], 2003);
    Ok(())
}

#[test]
fn bind_query_fills_missing_form_keys() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let output = cli()
        .args(["bind", "--form", "Day=1&Month=2", "--query", "?Year=1999&Day=9", "--config"])
        .arg(&config)
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("  Day: 1\n"));
    assert!(stdout.contains("  Year: 1999\n"));
    Ok(())
}

#[test]
fn duplicated_keys_are_fatal() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let output = cli()
        .args(["--json", "bind", "--form", "Day=1&Day=2&Month=3&Year=2000", "--config"])
        .arg(&config)
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let value = parse_json(&output)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"], "ERR_BINDER_MULTIPLE_VALUES");
    assert_eq!(value["error"]["kind"], "INVARIANT");
    Ok(())
}

#[test]
fn field_without_error_text_is_fatal_on_bind() -> std::io::Result<()> {
    let config = fixture_path("missing-error-text.json");
    let output = cli()
        .args(["bind", "--form", "Age=30&Height=180", "--config"])
        .arg(&config)
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("code: ERR_BINDER_MISSING_ERROR_CONFIG"));
    assert!(stderr.contains("Height"), "loader should warn: {stderr}");
    Ok(())
}

#[test]
fn env_override_caps_model_errors() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let output = cli()
        .args(["--json", "bind", "--form", "", "--config"])
        .arg(&config)
        .env("FORM_BINDING_MAX_MODEL_ERRORS", "2")
        .output()?;

    assert_eq!(output.status.code(), Some(4));
    let value = parse_json(&output)?;
    assert_eq!(value["report"]["maxErrorsReached"], true);
    assert_eq!(value["report"]["errors"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn invalid_env_override_is_rejected() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let output = cli()
        .args(["bind", "--form", "Day=1", "--config"])
        .arg(&config)
        .env("FORM_BINDING_MAX_MODEL_ERRORS", "lots")
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("ERR_CONFIG_ENV_INVALID_INT"));
    Ok(())
}

#[test]
fn config_check_lists_fields_missing_error_text() -> std::io::Result<()> {
    let config = fixture_path("missing-error-text.json");
    let output = cli()
        .args(["--json", "config", "check", "--config"])
        .arg(&config)
        .output()?;

    assert!(output.status.success());
    let value = parse_json(&output)?;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["fieldsMissingErrorText"], serde_json::json!(["Height"]));
    assert_eq!(value["effectiveConfig"]["maxModelErrors"], 200);
    Ok(())
}

#[test]
fn config_check_prints_effective_config_with_env_overrides() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let output = cli()
        .args(["config", "check", "--config"])
        .arg(&config)
        .env("FORM_BINDING_MAX_MODEL_ERRORS", "7")
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("maxModelErrors: 7\n"));
    let effective = stdout.split_once("effectiveConfig:\n").map(|(_, toml)| toml);
    assert!(effective.is_some_and(|toml| toml.contains("maxModelErrors = 7")));
    Ok(())
}

#[test]
fn config_check_rejects_invalid_env_override() -> std::io::Result<()> {
    let config = fixture_path("date-of-birth.toml");
    let output = cli()
        .args(["--json", "config", "check", "--config"])
        .arg(&config)
        .env("FORM_BINDING_CONTAINER_TYPE", "  ")
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let value = parse_json(&output)?;
    assert_eq!(value["error"]["code"], "ERR_CONFIG_ENV_EMPTY_VALUE");
    Ok(())
}

#[test]
fn config_check_fails_on_invalid_config() -> std::io::Result<()> {
    let config = fixture_path("no-fields.json");
    let output = cli()
        .args(["config", "check", "--config"])
        .arg(&config)
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("status: error"));
    assert!(stdout.contains("ERR_CONFIG_NO_FIELDS"));
    Ok(())
}

#[test]
fn config_schema_prints_json_schema() -> std::io::Result<()> {
    let output = run_cli(&["config", "schema"])?;

    assert!(output.status.success());
    let value = parse_json(&output)?;
    assert!(value["properties"]["containerType"].is_object());
    assert!(value["properties"]["fields"].is_object());
    Ok(())
}
