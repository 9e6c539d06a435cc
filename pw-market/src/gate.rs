//! Read model for the confirmation dialog.
use crate::flow::{PurchaseFlow, PurchaseState};
use crate::pricing::{DiscountRatio, PriceQuote, quote_land};

/// Everything the dialog needs to render one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationGate {
    pub state: PurchaseState,
    pub quote: Option<PriceQuote>,
    pub land_code: Option<String>,
    pub show_credential: bool,
    pub confirm_enabled: bool,
    pub cancel_enabled: bool,
    pub can_retry: bool,
    pub error: Option<String>,
}

impl ConfirmationGate {
    /// Derive the gate from the flow. `credential_draft` is the text currently
    /// in the password field, which the flow only sees on change.
    #[must_use]
    pub fn from_flow(flow: &PurchaseFlow, ratio: DiscountRatio, credential_draft: &str) -> Self {
        let state = flow.state();
        let attempt = flow.attempt();
        let show_credential = state == PurchaseState::AwaitingCredential;
        let credential_missing = show_credential && credential_draft.trim().is_empty();
        let confirm_enabled = match state {
            PurchaseState::AwaitingConfirmation => true,
            PurchaseState::AwaitingCredential => !credential_missing,
            _ => false,
        };

        Self {
            state,
            quote: attempt.map(|a| quote_land(&a.land, ratio)),
            land_code: attempt.map(|a| a.land.code.clone()),
            show_credential,
            confirm_enabled,
            cancel_enabled: state != PurchaseState::Submitting,
            can_retry: state == PurchaseState::Failed,
            error: flow.error_message().map(str::to_string),
        }
    }

    /// The dialog is visible for every state except `Idle`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != PurchaseState::Idle
    }
}
