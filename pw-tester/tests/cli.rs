use std::path::PathBuf;
use std::process::{Command, Output};

struct Run {
    output: Output,
    report: Option<String>,
}

fn report_file(label: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("pw-cli-{label}-{nanos}"))
}

/// Run the tester binary; with a label the report is written to a temp file and read back.
fn pw_tester(args: &[&str], report_label: Option<&str>) -> Run {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pw-tester"));
    cmd.args(args)
        .env_remove("PW_AUTH_TOKEN")
        .env_remove("PW_PAYMENT_PASSWORD");
    let path = report_label.map(report_file);
    if let Some(path) = &path {
        cmd.arg("--output").arg(path);
    }
    let output = cmd.output().expect("spawn pw-tester");
    let report = path.map(|path| {
        let text = std::fs::read_to_string(&path).expect("report written");
        let _ = std::fs::remove_file(path);
        text
    });
    Run { output, report }
}

fn json(run: &Run) -> serde_json::Value {
    serde_json::from_str(run.report.as_deref().expect("report")).expect("json report")
}

#[test]
fn listing_covers_logic_and_live_scenarios() {
    let run = pw_tester(&["--list-scenarios"], Some("list"));
    assert!(run.output.status.success());
    let listing = run.report.expect("listing");
    assert!(listing.starts_with("Available scenarios"));
    for key in ["double-confirm", "password-gate", "live-purchase"] {
        assert!(listing.contains(key), "{key} not listed");
    }
}

#[test]
fn logic_scenarios_report_as_json() {
    let run = pw_tester(
        &[
            "--mode",
            "logic",
            "--scenarios",
            "purchase-success,business-failure,network-failure",
            "--report",
            "json",
        ],
        Some("logic"),
    );
    assert!(run.output.status.success());
    let report = json(&run);
    assert_eq!(report["mode"], "logic");
    assert_eq!(report["passed"], 3);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["results"][1]["message"], "余额不足");
}

#[test]
fn unknown_scenario_names_are_warned_and_skipped() {
    let run = pw_tester(&["--scenarios", "smoke", "--report", "markdown"], None);
    assert!(run.output.status.success());
    assert!(String::from_utf8_lossy(&run.output.stderr).contains("Unknown scenario"));
}

#[test]
fn unreachable_backend_fails_with_generic_message() {
    let run = pw_tester(
        &[
            "--mode",
            "live",
            "--base-url",
            "http://127.0.0.1:9/api",
            "--land-id",
            "7",
            "--report",
            "json",
        ],
        Some("live"),
    );
    assert_eq!(run.output.status.code(), Some(1));
    let report = json(&run);
    assert_eq!(report["results"][0]["final_state"], "failed");
    assert_eq!(report["results"][0]["message"], "购买失败，请稍后重试");
}

#[test]
fn live_mode_without_land_id_is_an_error() {
    let run = pw_tester(&["--mode", "live"], None);
    assert!(!run.output.status.success());
    assert!(String::from_utf8_lossy(&run.output.stderr).contains("--land-id"));
}
