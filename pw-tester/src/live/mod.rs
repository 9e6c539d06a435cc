//! One real purchase against a running backend.
mod http;

pub use http::HttpMarketApi;

use anyhow::Result;
use colored::Colorize;
use pw_market::{
    ClientConfig, FailureReason, GateMode, LandId, MemoryLandStore, PurchaseEngine,
    PurchaseState,
};
use std::time::Instant;
use thiserror::Error;

use crate::common::ScenarioResult;
use crate::common::result::Observed;

pub const LIVE_SCENARIO: &str = "live-purchase";

#[derive(Debug, Error)]
pub enum LiveError {
    #[error("live mode needs --land-id")]
    MissingLandId,
    #[error("purchase ended {0}")]
    NotPurchased(PurchaseState),
}

pub struct LiveRun {
    pub config: ClientConfig,
    pub land_id: LandId,
    pub token: Option<String>,
    pub password: Option<String>,
}

impl LiveRun {
    pub async fn execute(self) -> Result<ScenarioResult> {
        let started = Instant::now();
        let api = HttpMarketApi::new(self.config.clone(), self.token)?;
        let mut config = self.config;
        if self.password.is_some() {
            config.gate = GateMode::PasswordRequired;
        }
        let engine = PurchaseEngine::new(api, MemoryLandStore::new(), config);

        let observed = match engine.load_land(self.land_id).await {
            Ok(land) => {
                let quoted = engine.quote(&land);
                println!(
                    "🏷️  Land {} quoted at {:.2} TDB ({}% off {:.2})",
                    land.code.bright_white(),
                    quoted.discounted_price,
                    quoted.ratio.percent_off(),
                    quoted.base_price
                );
                let mut flow = engine.new_flow();
                if let Err(err) = flow.begin(&land) {
                    eprintln!("⚠️  Land {} cannot be bought: {err}", land.code.yellow());
                    Observed {
                        final_state: flow.state(),
                        message: Some(err.to_string()),
                        purchase_calls: 0,
                    }
                } else {
                    engine.confirm(&mut flow, |_| {}).await?;
                    if let Some(password) = self.password.as_deref() {
                        flow.enter_credential(password)?;
                        engine.confirm(&mut flow, |_| {}).await?;
                    }
                    Observed {
                        final_state: flow.state(),
                        message: flow.error_message().map(str::to_string),
                        purchase_calls: usize::try_from(flow.submissions()).unwrap_or(usize::MAX),
                    }
                }
            }
            Err(err) => {
                log::error!("loading land {} failed: {err}", self.land_id);
                Observed {
                    final_state: PurchaseState::Failed,
                    message: Some(FailureReason::Transport(err).message().to_string()),
                    purchase_calls: 0,
                }
            }
        };

        let mut result = ScenarioResult::from_run(LIVE_SCENARIO, Ok(observed), started.elapsed());
        if result.final_state != Some(PurchaseState::Succeeded) {
            result.passed = false;
            let state = result.final_state.unwrap_or_default();
            result.failures.push(LiveError::NotPurchased(state).to_string());
        }
        Ok(result)
    }
}
