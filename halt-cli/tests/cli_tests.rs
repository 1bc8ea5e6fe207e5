use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn halt() -> Command {
    Command::new(env!("CARGO_BIN_EXE_halt"))
}

#[test]
fn test_help_command() {
    halt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CloudWatch alarm"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("invoke"))
        .stdout(predicate::str::contains("sample-event"));
}

#[test]
fn test_version_command() {
    halt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("halt"));
}

#[test]
fn test_invalid_command() {
    halt()
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_resolve_from_event_file() {
    halt()
        .args(["resolve", "--event", &fixture("alarm_event.json")])
        .assert()
        .success()
        .stdout("i-0123456789abcdef0\n");
}

#[test]
fn test_resolve_from_stdin() {
    let event = std::fs::read_to_string(fixture("alarm_event.json")).unwrap();

    halt()
        .arg("resolve")
        .write_stdin(event)
        .assert()
        .success()
        .stdout("i-0123456789abcdef0\n");
}

#[test]
fn test_resolve_with_instance_id_ignores_event() {
    halt()
        .args([
            "resolve",
            "--instance-id",
            "i-aaaa",
            "--event",
            &fixture("alarm_event.json"),
        ])
        .assert()
        .success()
        .stdout("i-aaaa\n");
}

#[test]
fn test_resolve_only_reads_first_metric() {
    halt()
        .args(["resolve", "--event", &fixture("expression_alarm.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "alarmData.configuration.metrics[0].metricStat",
        ));
}

#[test]
fn test_resolve_missing_file() {
    halt()
        .args(["resolve", "--event", &fixture("does_not_exist.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read event file"));
}

#[test]
fn test_resolve_invalid_json() {
    halt()
        .arg("resolve")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_invoke_rejects_unresolvable_event() {
    halt()
        .arg("invoke")
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not resolve target instance"))
        .stderr(predicate::str::contains("alarmData"));
}

#[test]
fn test_invalid_instance_id() {
    halt()
        .args(["resolve", "--instance-id", "i-aa aa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid instance ID"));
}

#[test]
fn test_sample_event_round_trips_through_resolve() {
    let output = halt()
        .args(["sample-event", "--instance-id", "i-0123456789abcdef0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let event: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(event["alarmData"]["alarmName"], "halt-sample");

    halt()
        .arg("resolve")
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout("i-0123456789abcdef0\n");
}

#[test]
fn test_invoke_logs_handler_lines_by_default() {
    // Port 1 refuses connections, so the stop request fails without leaving the host
    halt()
        .args(["invoke", "--instance-id", "i-aaaa"])
        .env("AWS_ENDPOINT_URL", "http://127.0.0.1:1")
        .env("AWS_REGION", "us-east-1")
        .env("AWS_ACCESS_KEY_ID", "AKIDTEST")
        .env("AWS_SECRET_ACCESS_KEY", "secret")
        .env("AWS_MAX_ATTEMPTS", "1")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env("AWS_CONFIG_FILE", fixture("no_aws_config"))
        .env("AWS_SHARED_CREDENTIALS_FILE", fixture("no_aws_credentials"))
        .env("NO_COLOR", "1")
        .env_remove("AWS_PROFILE")
        .env_remove("AWS_SESSION_TOKEN")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Received event"))
        .stderr(predicate::str::contains("Resolved target instance"))
        .stderr(predicate::str::contains("Error stopping instance"))
        .stderr(predicate::str::contains("Alarm handler failed"));
}
