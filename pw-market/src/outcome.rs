//! Interpreting purchase responses and settling the flow.
use serde::{Deserialize, Serialize};

use crate::error::{FailureReason, TransportError};
use crate::flow::{PurchaseFlow, PurchaseState};
use crate::land::LandId;
use crate::store::LandStore;

/// Body returned by `POST /land/purchase`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PurchaseResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
    /// New owner reported by the backend, when it says so.
    #[serde(default)]
    pub owner_id: Option<u64>,
}

impl PurchaseResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            owner_id: None,
        }
    }

    /// # Errors
    ///
    /// Returns a decode error if the body is not a purchase response.
    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Succeeded { owner_id: Option<u64> },
    Failed(FailureReason),
}

impl PurchaseOutcome {
    /// Fold the network result into an outcome. Never fails.
    #[must_use]
    pub fn interpret(result: Result<PurchaseResponse, TransportError>) -> Self {
        match result {
            Ok(response) if response.success => Self::Succeeded {
                owner_id: response.owner_id,
            },
            Ok(response) => {
                let reason = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .map_or(
                        FailureReason::Transport(TransportError::Decode(
                            "failure without message".to_string(),
                        )),
                        FailureReason::Business,
                    );
                Self::Failed(reason)
            }
            Err(err) => Self::Failed(FailureReason::Transport(err)),
        }
    }
}

/// Settle a submitting flow with the network result.
///
/// On success the store receives the optimistic ownership update and
/// `on_complete` runs once with the purchased land. Results arriving when the
/// flow is no longer submitting are dropped and `on_complete` is not called.
pub fn handle_result<S, F>(
    flow: &mut PurchaseFlow,
    result: Result<PurchaseResponse, TransportError>,
    store: &S,
    on_complete: F,
) -> PurchaseState
where
    S: LandStore + ?Sized,
    F: FnOnce(LandId),
{
    let land_id = flow.land_id();
    let outcome = PurchaseOutcome::interpret(result);
    let owner_id = match &outcome {
        PurchaseOutcome::Succeeded { owner_id } => *owner_id,
        PurchaseOutcome::Failed(reason) => {
            match reason {
                FailureReason::Business(message) => {
                    log::warn!("purchase rejected for land {land_id:?}: {message}");
                }
                FailureReason::Transport(err) => {
                    log::error!("purchase request for land {land_id:?} failed: {err}");
                }
            }
            None
        }
    };

    match (flow.resolve(outcome), land_id) {
        (Some(PurchaseState::Succeeded), Some(id)) => {
            store.mark_purchased(id, owner_id);
            on_complete(id);
            PurchaseState::Succeeded
        }
        (Some(state), _) => state,
        (None, _) => flow.state(),
    }
}
