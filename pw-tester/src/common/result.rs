use pw_market::PurchaseState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a scenario observed once the flow settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observed {
    pub final_state: PurchaseState,
    /// User-facing message for failed purchases.
    pub message: Option<String>,
    pub purchase_calls: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub final_state: Option<PurchaseState>,
    pub message: Option<String>,
    pub purchase_calls: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScenarioResult {
    pub fn from_run(name: &str, run: anyhow::Result<Observed>, duration: Duration) -> Self {
        match run {
            Ok(observed) => Self {
                scenario_name: name.to_string(),
                passed: true,
                final_state: Some(observed.final_state),
                message: observed.message,
                purchase_calls: observed.purchase_calls,
                failures: Vec::new(),
                duration,
            },
            Err(err) => Self {
                scenario_name: name.to_string(),
                passed: false,
                final_state: None,
                message: None,
                purchase_calls: 0,
                failures: vec![format!("{err:#}")],
                duration,
            },
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_runs_record_the_error_chain() {
        let result = ScenarioResult::from_run(
            "network-failure",
            Err(anyhow::anyhow!("expected failed").context("checking state")),
            Duration::from_millis(3),
        );
        assert!(!result.passed);
        assert_eq!(result.failures, vec!["checking state: expected failed"]);
    }

    #[test]
    fn results_serialize_durations_as_millis() {
        let result = ScenarioResult::from_run(
            "purchase-success",
            Ok(Observed {
                final_state: PurchaseState::Succeeded,
                message: None,
                purchase_calls: 1,
            }),
            Duration::from_millis(12),
        );
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["duration"], 12);
        assert_eq!(json["final_state"], "succeeded");
    }
}
