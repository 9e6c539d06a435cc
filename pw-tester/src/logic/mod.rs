//! Scripted scenarios exercising the purchase flow against an in-memory backend.
mod scenarios;

pub use scenarios::LogicScenario;

use colored::Colorize;
use std::time::Instant;

use crate::common::ScenarioResult;

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub async fn run_scenario(&self, scenario: LogicScenario) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.key().bright_white());
        }
        let started = Instant::now();
        let run = scenario.run().await;
        ScenarioResult::from_run(scenario.key(), run, started.elapsed())
    }
}
