mod common;
mod live;
mod logic;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use pw_market::{ClientConfig, DiscountRatio, GateMode, LandId};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use common::{ScenarioResult, split_csv};
use live::{LiveError, LiveRun};
use logic::{LogicScenario, LogicTester};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Scripted scenarios against an in-memory backend (fast, offline)
    Logic,
    /// One real purchase against a running backend
    Live,
}

impl TestMode {
    const fn label(self) -> &'static str {
        match self {
            Self::Logic => "logic",
            Self::Live => "live",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "pw-tester", version)]
#[command(about = "Drives the Parallel World land purchase flow - scripted scenarios or a live backend")]
struct Args {
    /// Test mode: logic (scripted) or live (HTTP backend)
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    // Live-specific options
    /// Backend API base URL - live mode only
    #[arg(long, default_value = "http://localhost:8080/api")]
    base_url: String,

    /// Land to purchase - live mode only
    #[arg(long)]
    land_id: Option<LandId>,

    /// Campaign discount ratio used for the printed quote
    #[arg(long)]
    discount_ratio: Option<f64>,

    /// Bearer token for the backend
    #[arg(long, env = "PW_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Payment password; enables the password gate
    #[arg(long, env = "PW_PAYMENT_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        let mut out = open_output(args.output.as_deref())?;
        list_scenarios(&mut out)?;
        return out.flush().context("flushing scenario list");
    }

    announce_banner(args.mode);
    let started = Instant::now();
    let results = match args.mode {
        TestMode::Logic => run_logic_scenarios(&args).await,
        TestMode::Live => vec![run_live(&args).await?],
    };

    let mut out = open_output(args.output.as_deref())?;
    write_report(&mut out, &args, &results, started)?;
    out.flush().context("flushing report")?;

    let failed = results.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        log::warn!("{failed} scenario(s) failed");
        std::process::exit(1);
    }
    Ok(())
}

/// Stdout or a freshly created file, buffered either way.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create report file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

fn list_scenarios(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Available scenarios:")?;
    for scenario in LogicScenario::ALL {
        writeln!(out, "  {:25} - {}", scenario.key(), scenario.description())?;
    }
    writeln!(
        out,
        "  {:25} - buy --land-id against --base-url (live mode)",
        live::LIVE_SCENARIO
    )?;
    Ok(())
}

fn announce_banner(mode: TestMode) {
    println!("{}", "🏙️  Parallel World Purchase Tester".bright_cyan().bold());
    println!("{}", "==================================".cyan());
    println!("Mode: {}", mode.label().bright_white());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for scenario in LogicScenario::ALL {
            if !scenarios.iter().any(|s| s == scenario.key()) {
                scenarios.push(scenario.key().to_string());
            }
        }
    }
    scenarios
}

async fn run_logic_scenarios(args: &Args) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Logic Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(args.verbose);
    let mut results = Vec::new();
    for name in expand_scenarios(&args.scenarios) {
        let Some(scenario) = LogicScenario::from_key(&name) else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        let result = tester.run_scenario(scenario).await;
        if result.passed {
            println!("✅ {} - {:?}", name.green(), result.duration);
        } else {
            eprintln!("❌ {} - {:?}", name.red(), result.duration);
        }
        results.push(result);
    }
    results
}

fn live_config(args: &Args) -> Result<ClientConfig> {
    let campaign = args
        .discount_ratio
        .map(DiscountRatio::new)
        .transpose()
        .context("invalid --discount-ratio")?;
    Ok(ClientConfig {
        gate: GateMode::ConfirmOnly,
        campaign,
        ..ClientConfig::default()
    }
    .with_api_base(&args.base_url))
}

async fn run_live(args: &Args) -> Result<ScenarioResult> {
    println!("{}", "🌐 Running Live Purchase".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let land_id = args.land_id.ok_or(LiveError::MissingLandId)?;
    let run = LiveRun {
        config: live_config(args)?,
        land_id,
        token: args.token.clone(),
        password: args.password.clone(),
    };
    let result = run.execute().await?;
    if result.passed {
        println!("✅ Land {land_id} purchased");
    } else {
        eprintln!(
            "❌ Land {land_id}: {}",
            result.message.as_deref().unwrap_or("not purchased")
        );
    }
    Ok(result)
}

fn write_report(
    out: &mut dyn Write,
    args: &Args,
    results: &[ScenarioResult],
    started: Instant,
) -> Result<()> {
    match args.report {
        ReportFormat::Json => reports::generate_json_report(out, args.mode.label(), results),
        ReportFormat::Markdown => reports::generate_markdown_report(out, results),
        ReportFormat::Console => {
            reports::generate_console_report(out, results, started.elapsed())?;
            writeln!(out)?;
            writeln!(out, "🏁 Total time: {:?}", started.elapsed())?;
            Ok(())
        }
    }
}
