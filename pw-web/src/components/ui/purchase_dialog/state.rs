use pw_market::{FlowError, GateMode, Land, PurchaseFlow, ValidationError};
use std::rc::Rc;
use yew::prelude::*;

/// User and network events feeding the purchase flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowAction {
    EnterCredential(String),
    Confirm,
    Cancel,
    Retry,
    /// The flow after the in-flight request resolved.
    Settled(PurchaseFlow),
}

/// Reducer state owned by the dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowModel {
    pub flow: PurchaseFlow,
    /// Translation key for the last rejected action.
    pub notice: Option<&'static str>,
}

impl FlowModel {
    /// Start an attempt for `land`; a parcel that cannot be bought leaves the
    /// flow idle with a notice.
    #[must_use]
    pub fn opened(mode: GateMode, land: &Land) -> Self {
        let mut flow = PurchaseFlow::new(mode);
        let notice = flow.begin(land).err().and_then(|err| notice_key(&err));
        Self { flow, notice }
    }
}

impl Reducible for FlowModel {
    type Action = FlowAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let result = match action {
            FlowAction::EnterCredential(raw) => next.flow.enter_credential(&raw),
            FlowAction::Confirm => next.flow.confirm().map(|_| ()),
            FlowAction::Cancel => next.flow.cancel(),
            FlowAction::Retry => next.flow.retry(),
            FlowAction::Settled(settled) => {
                // Only the result of the submission we are waiting on counts.
                if self.flow.is_submitting() && settled.submissions() == self.flow.submissions() {
                    next.flow = settled;
                }
                Ok(())
            }
        };
        next.notice = match result {
            Ok(()) => None,
            Err(err) => notice_key(&err),
        };
        Rc::new(next)
    }
}

/// Map a rejected action to the message shown under the gate.
#[must_use]
pub fn notice_key(err: &FlowError) -> Option<&'static str> {
    match err {
        FlowError::Validation(ValidationError::MissingCredential) => {
            Some("purchase.password_required")
        }
        FlowError::Validation(ValidationError::LandUnavailable { .. }) => Some("land.unavailable"),
        FlowError::Validation(ValidationError::InvalidLandId(_)) => Some("land.invalid_id"),
        FlowError::Validation(ValidationError::InvalidDiscountRatio(_)) => {
            Some("purchase.error_generic")
        }
        FlowError::InvalidTransition { .. } => {
            log::debug!("ignored purchase action: {err}");
            None
        }
    }
}
