//! Lifecycle of a single land purchase attempt.
//!
//! ```text
//! Idle -> AwaitingConfirmation -> [AwaitingCredential] -> Submitting -> Succeeded
//!                 ^                                            |
//!                 +------------------ retry ------------ Failed
//! ```
//!
//! Cancelling returns to `Idle` from every state except `Submitting`; a request
//! in flight cannot be withdrawn.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FailureReason, FlowError, ValidationError};
use crate::land::{Land, LandId};
use crate::outcome::PurchaseOutcome;
use crate::request::{LAND_QUANTITY, PaymentCredential, PurchaseRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseState {
    #[default]
    Idle,
    AwaitingConfirmation,
    AwaitingCredential,
    Submitting,
    Succeeded,
    Failed,
}

impl fmt::Display for PurchaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::AwaitingConfirmation => "awaiting confirmation",
            Self::AwaitingCredential => "awaiting credential",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Whether a purchase needs the secondary payment password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    #[default]
    ConfirmOnly,
    PasswordRequired,
}

impl GateMode {
    #[must_use]
    pub const fn requires_credential(self) -> bool {
        matches!(self, Self::PasswordRequired)
    }
}

/// Client-local record of the purchase being confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseAttempt {
    /// Snapshot of the parcel taken when the attempt began.
    pub land: Land,
    pub quantity: u32,
    credential: Option<PaymentCredential>,
    pub error: Option<FailureReason>,
}

impl PurchaseAttempt {
    fn new(land: Land) -> Self {
        Self {
            land,
            quantity: LAND_QUANTITY,
            credential: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

/// What the caller should do after a confirm action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmStep {
    /// Show the password field; nothing is sent yet.
    NeedsCredential,
    /// Send this request exactly once.
    Submit(PurchaseRequest),
    /// A request is already in flight; the action is ignored.
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurchaseFlow {
    mode: GateMode,
    state: PurchaseState,
    attempt: Option<PurchaseAttempt>,
    in_flight: Option<PurchaseRequest>,
    submissions: u32,
}

impl PurchaseFlow {
    #[must_use]
    pub fn new(mode: GateMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn mode(&self) -> GateMode {
        self.mode
    }

    #[must_use]
    pub const fn state(&self) -> PurchaseState {
        self.state
    }

    #[must_use]
    pub const fn attempt(&self) -> Option<&PurchaseAttempt> {
        self.attempt.as_ref()
    }

    #[must_use]
    pub fn land_id(&self) -> Option<LandId> {
        self.attempt.as_ref().map(|a| a.land.id)
    }

    /// Number of requests this flow has handed out for sending.
    #[must_use]
    pub const fn submissions(&self) -> u32 {
        self.submissions
    }

    /// The request currently awaiting a response.
    #[must_use]
    pub const fn in_flight(&self) -> Option<&PurchaseRequest> {
        self.in_flight.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&FailureReason> {
        self.attempt.as_ref().and_then(|a| a.error.as_ref())
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error().map(FailureReason::message)
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state == PurchaseState::Submitting
    }

    /// Open the confirmation for an unowned parcel.
    ///
    /// # Errors
    ///
    /// Fails if another attempt is active, the identifier is invalid, or the
    /// parcel is already owned.
    pub fn begin(&mut self, land: &Land) -> Result<(), FlowError> {
        if !matches!(self.state, PurchaseState::Idle | PurchaseState::Succeeded) {
            return Err(self.invalid("begin a purchase"));
        }
        if land.id == 0 {
            return Err(ValidationError::InvalidLandId(land.id.to_string()).into());
        }
        if !land.is_purchasable() {
            return Err(ValidationError::LandUnavailable {
                id: land.id,
                status: land.status,
            }
            .into());
        }
        self.attempt = Some(PurchaseAttempt::new(land.clone()));
        self.transition(PurchaseState::AwaitingConfirmation);
        Ok(())
    }

    /// Store the payment password typed into the gate. Blank input clears it.
    ///
    /// # Errors
    ///
    /// Fails unless the flow is waiting for the credential.
    pub fn enter_credential(&mut self, raw: &str) -> Result<(), FlowError> {
        if self.state != PurchaseState::AwaitingCredential {
            return Err(self.invalid("enter a payment password"));
        }
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.credential = PaymentCredential::new(raw);
        }
        Ok(())
    }

    /// Advance the gate. Only a `Submit` step should lead to a network call.
    ///
    /// # Errors
    ///
    /// Fails when the required password is empty or the flow is not
    /// confirming.
    pub fn confirm(&mut self) -> Result<ConfirmStep, FlowError> {
        match self.state {
            PurchaseState::Submitting => Ok(ConfirmStep::AlreadySubmitting),
            PurchaseState::AwaitingConfirmation if self.mode.requires_credential() => {
                self.transition(PurchaseState::AwaitingCredential);
                Ok(ConfirmStep::NeedsCredential)
            }
            PurchaseState::AwaitingConfirmation => self.submit(),
            PurchaseState::AwaitingCredential => {
                if self.attempt.as_ref().is_some_and(PurchaseAttempt::has_credential) {
                    self.submit()
                } else {
                    Err(ValidationError::MissingCredential.into())
                }
            }
            _ => Err(self.invalid("confirm")),
        }
    }

    fn submit(&mut self) -> Result<ConfirmStep, FlowError> {
        let state = self.state;
        let Some(attempt) = self.attempt.as_mut() else {
            return Err(FlowError::InvalidTransition {
                action: "submit",
                state,
            });
        };
        let request = PurchaseRequest::build(attempt.land.id, attempt.credential.take())?;
        attempt.error = None;
        self.in_flight = Some(request.clone());
        self.submissions = self.submissions.saturating_add(1);
        self.transition(PurchaseState::Submitting);
        Ok(ConfirmStep::Submit(request))
    }

    /// Apply the result of the in-flight request.
    ///
    /// Returns the new state, or `None` when no request was in flight.
    pub fn resolve(&mut self, outcome: PurchaseOutcome) -> Option<PurchaseState> {
        if self.state != PurchaseState::Submitting {
            log::debug!("ignoring purchase result while {}", self.state);
            return None;
        }
        self.in_flight = None;
        let next = match outcome {
            PurchaseOutcome::Succeeded { owner_id } => {
                if let Some(attempt) = self.attempt.as_mut() {
                    attempt.error = None;
                    attempt.land.mark_purchased(owner_id);
                }
                PurchaseState::Succeeded
            }
            PurchaseOutcome::Failed(reason) => {
                if let Some(attempt) = self.attempt.as_mut() {
                    attempt.error = Some(reason);
                }
                PurchaseState::Failed
            }
        };
        self.transition(next);
        Some(next)
    }

    /// Reopen the confirmation after a failure.
    ///
    /// # Errors
    ///
    /// Fails unless the last submission failed.
    pub fn retry(&mut self) -> Result<(), FlowError> {
        if self.state != PurchaseState::Failed {
            return Err(self.invalid("retry"));
        }
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.error = None;
        }
        self.transition(PurchaseState::AwaitingConfirmation);
        Ok(())
    }

    /// Dismiss the gate and discard the attempt without contacting the backend.
    ///
    /// # Errors
    ///
    /// Fails while a request is in flight.
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        match self.state {
            PurchaseState::Submitting => Err(self.invalid("cancel")),
            PurchaseState::Idle => Ok(()),
            _ => {
                self.attempt = None;
                self.transition(PurchaseState::Idle);
                Ok(())
            }
        }
    }

    fn transition(&mut self, next: PurchaseState) {
        log::debug!(
            "purchase flow {} -> {} (land {:?})",
            self.state,
            next,
            self.land_id()
        );
        self.state = next;
    }

    const fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            action,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GENERIC_FAILURE_MESSAGE, TransportError};
    use crate::land::LandStatus;

    fn land(id: LandId) -> Land {
        Land {
            id,
            price: 1000.0,
            ..Land::default()
        }
    }

    #[test]
    fn confirm_only_flow_submits_once() {
        let mut flow = PurchaseFlow::new(GateMode::ConfirmOnly);
        flow.begin(&land(5)).expect("begin");
        assert_eq!(flow.state(), PurchaseState::AwaitingConfirmation);

        let first = flow.confirm().expect("confirm");
        assert!(matches!(first, ConfirmStep::Submit(ref r) if r.land_id == 5));
        assert_eq!(flow.confirm(), Ok(ConfirmStep::AlreadySubmitting));
        assert_eq!(flow.submissions(), 1);
        assert!(flow.in_flight().is_some());
    }

    #[test]
    fn password_gate_requires_credential() {
        let mut flow = PurchaseFlow::new(GateMode::PasswordRequired);
        flow.begin(&land(5)).expect("begin");
        assert_eq!(flow.confirm(), Ok(ConfirmStep::NeedsCredential));
        assert_eq!(flow.state(), PurchaseState::AwaitingCredential);

        assert_eq!(
            flow.confirm(),
            Err(FlowError::Validation(ValidationError::MissingCredential))
        );
        assert_eq!(flow.state(), PurchaseState::AwaitingCredential);

        flow.enter_credential("654321").expect("credential");
        let step = flow.confirm().expect("submit");
        let ConfirmStep::Submit(request) = step else {
            panic!("expected submit");
        };
        assert!(request.has_credential());
        assert!(!flow.attempt().expect("attempt").has_credential());
    }

    #[test]
    fn owned_land_cannot_begin() {
        let mut flow = PurchaseFlow::default();
        let owned = Land {
            status: LandStatus::Owned,
            ..land(3)
        };
        assert!(matches!(
            flow.begin(&owned),
            Err(FlowError::Validation(ValidationError::LandUnavailable { id: 3, .. }))
        ));
        assert_eq!(flow.state(), PurchaseState::Idle);
        assert!(flow.attempt().is_none());
    }

    #[test]
    fn cancel_discards_attempt_but_not_in_flight_request() {
        let mut flow = PurchaseFlow::new(GateMode::PasswordRequired);
        flow.begin(&land(8)).expect("begin");
        flow.cancel().expect("cancel from confirmation");
        assert_eq!(flow.state(), PurchaseState::Idle);
        assert!(flow.attempt().is_none());

        flow.begin(&land(8)).expect("begin again");
        let _ = flow.confirm();
        flow.cancel().expect("cancel from credential");
        assert_eq!(flow.state(), PurchaseState::Idle);
        assert_eq!(flow.submissions(), 0);

        flow.begin(&land(8)).expect("begin third time");
        let _ = flow.confirm();
        flow.enter_credential("pw").expect("credential");
        let _ = flow.confirm();
        assert!(flow.cancel().is_err());
        assert_eq!(flow.state(), PurchaseState::Submitting);
    }

    #[test]
    fn failure_then_retry_then_success() {
        let mut flow = PurchaseFlow::default();
        flow.begin(&land(2)).expect("begin");
        let _ = flow.confirm().expect("submit");
        let state = flow.resolve(PurchaseOutcome::Failed(FailureReason::Transport(
            TransportError::Network("offline".into()),
        )));
        assert_eq!(state, Some(PurchaseState::Failed));
        assert_eq!(flow.error_message(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(flow.confirm().is_err());

        flow.retry().expect("retry");
        assert_eq!(flow.state(), PurchaseState::AwaitingConfirmation);
        assert_eq!(flow.error_message(), None);

        let _ = flow.confirm().expect("submit again");
        assert_eq!(
            flow.resolve(PurchaseOutcome::Succeeded { owner_id: Some(9) }),
            Some(PurchaseState::Succeeded)
        );
        let attempt = flow.attempt().expect("attempt kept");
        assert_eq!(attempt.land.status, LandStatus::Owned);
        assert_eq!(flow.submissions(), 2);
        assert!(flow.in_flight().is_none());
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut flow = PurchaseFlow::default();
        assert_eq!(
            flow.resolve(PurchaseOutcome::Succeeded { owner_id: None }),
            None
        );
        assert_eq!(flow.state(), PurchaseState::Idle);
    }

    #[test]
    fn succeeded_is_terminal_but_new_attempt_may_start() {
        let mut flow = PurchaseFlow::default();
        flow.begin(&land(1)).expect("begin");
        let _ = flow.confirm();
        let _ = flow.resolve(PurchaseOutcome::Succeeded { owner_id: None });
        assert!(flow.retry().is_err());
        assert!(flow.confirm().is_err());
        flow.begin(&land(2)).expect("fresh attempt");
        assert_eq!(flow.land_id(), Some(2));
        assert_eq!(flow.state(), PurchaseState::AwaitingConfirmation);
    }
}
