//! Error taxonomy for the purchase flow.

use thiserror::Error;

use crate::flow::PurchaseState;
use crate::land::LandStatus;

/// Message shown when the backend gives no usable explanation for a failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "购买失败，请稍后重试";

/// Client-side validation failures. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("land identifier must be a positive integer, got `{0}`")]
    InvalidLandId(String),
    #[error("payment password is required")]
    MissingCredential,
    #[error("land {id} is not available for purchase (status: {status})")]
    LandUnavailable { id: u64, status: LandStatus },
    #[error("discount ratio must be within (0, 1], got {0}")]
    InvalidDiscountRatio(String),
}

/// Failures of the HTTP exchange itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Backend call a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    LandDetail,
    Purchase,
}

/// Hand a response body on for decoding, or turn its status into an error.
///
/// The purchase endpoint reports business failures as a JSON body on a 4xx,
/// so that body is kept. Any other non-2xx is a `Status` error.
///
/// # Errors
///
/// Returns `TransportError::Status` for a rejected status.
pub fn accept_response(
    endpoint: Endpoint,
    status: u16,
    body: String,
) -> Result<String, TransportError> {
    let json_body = body.trim_start().starts_with('{');
    match endpoint {
        _ if (200..300).contains(&status) => Ok(body),
        Endpoint::Purchase if json_body => Ok(body),
        _ => Err(TransportError::Status(status)),
    }
}

/// An operation was attempted in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: PurchaseState,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Why a submitted purchase ended in the failed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The backend rejected the purchase with its own message.
    Business(String),
    /// The request never produced a usable answer.
    Transport(TransportError),
}

impl FailureReason {
    /// Human-readable message for the error banner.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Business(message) => message,
            Self::Transport(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    #[must_use]
    pub const fn is_business(&self) -> bool {
        matches!(self, Self::Business(_))
    }
}
