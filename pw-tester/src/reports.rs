use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::common::ScenarioResult;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    mode: &'a str,
    passed: usize,
    failed: usize,
    results: &'a [ScenarioResult],
}

fn tally(results: &[ScenarioResult]) -> (usize, usize) {
    let passed = results.iter().filter(|r| r.passed).count();
    (passed, results.len() - passed)
}

#[allow(clippy::cast_precision_loss)]
fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (passed as f64 / total as f64) * 100.0
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Purchase Flow Results".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;

    let (passed, failed) = tally(results);
    writeln!(out, "Total scenarios: {}", results.len())?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(passed, results.len()))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        if let Some(state) = result.final_state {
            writeln!(out, "   Final state: {state}")?;
        }
        writeln!(out, "   Purchase requests: {}", result.purchase_calls)?;
        if let Some(message) = &result.message {
            writeln!(out, "   Message: {message}")?;
        }
        writeln!(out, "   Time: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    mode: &str,
    results: &[ScenarioResult],
) -> Result<()> {
    let (passed, failed) = tally(results);
    let report = JsonReport {
        generated_at: crate::common::run_stamp(),
        mode,
        passed,
        failed,
        results,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Parallel World Purchase Flow Results\n")?;
    writeln!(out, "_Generated {}_\n", crate::common::run_stamp())?;

    let (passed, failed) = tally(results);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {}", results.len())?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {failed}")?;
    writeln!(
        out,
        "- **Success rate**: {:.1}%\n",
        success_rate(passed, results.len())
    )?;

    writeln!(out, "## Detailed Results\n")?;
    writeln!(out, "| Scenario | Result | Final state | Requests | Message |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        let state = result
            .final_state
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        writeln!(
            out,
            "| {} | {status} | {state} | {} | {} |",
            result.scenario_name,
            result.purchase_calls,
            result.message.as_deref().unwrap_or("")
        )?;
    }

    let failures: Vec<_> = results.iter().filter(|r| !r.failures.is_empty()).collect();
    if !failures.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for result in failures {
            for failure in &result.failures {
                writeln!(out, "- `{}`: {failure}", result.scenario_name)?;
            }
        }
    }
    Ok(())
}
