//! Parallel World Market Core
//!
//! Platform-agnostic land purchase logic for the Parallel World client.
//! This crate provides pricing, the purchase state machine and the backend
//! seam without UI or browser dependencies.

pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod gate;
pub mod land;
pub mod numbers;
pub mod outcome;
pub mod pricing;
pub mod request;
pub mod scripted;
pub mod store;

// Re-export commonly used types
pub use catalog::{GiftBundle, ItemKind, LandType, UnknownCategory};
pub use config::ClientConfig;
pub use error::{
    Endpoint, FailureReason, FlowError, GENERIC_FAILURE_MESSAGE, TransportError, ValidationError,
    accept_response,
};
pub use flow::{ConfirmStep, GateMode, PurchaseAttempt, PurchaseFlow, PurchaseState};
pub use gate::ConfirmationGate;
pub use land::{Coordinate, Land, LandId, LandStatus};
pub use outcome::{PurchaseOutcome, PurchaseResponse, handle_result};
pub use pricing::{DiscountRatio, PriceQuote, quote, quote_land};
pub use request::{PaymentCredential, PurchaseRequest, parse_land_id};
pub use scripted::ScriptedMarketApi;
pub use store::{LandListener, LandStore, MemoryLandStore, SubscriptionId};

/// Backend operations the purchase flow depends on.
/// Platform-specific implementations provide the HTTP transport.
#[async_trait::async_trait(?Send)]
pub trait MarketApi {
    /// Fetch the land detail record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn fetch_land(&self, id: LandId) -> Result<Land, TransportError>;

    /// Submit a purchase.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures; business rejections
    /// arrive as a response with `success == false`.
    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseResponse, TransportError>;
}

/// Ties a backend and a land store to the purchase flow.
pub struct PurchaseEngine<A, S>
where
    A: MarketApi,
    S: LandStore,
{
    api: A,
    store: S,
    config: ClientConfig,
}

impl<A, S> PurchaseEngine<A, S>
where
    A: MarketApi,
    S: LandStore,
{
    /// Create an engine with the provided backend, store and configuration
    pub const fn new(api: A, store: S, config: ClientConfig) -> Self {
        Self { api, store, config }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a flow using the configured gate mode.
    #[must_use]
    pub fn new_flow(&self) -> PurchaseFlow {
        PurchaseFlow::new(self.config.gate)
    }

    #[must_use]
    pub fn quote(&self, land: &Land) -> PriceQuote {
        quote_land(land, self.config.ratio())
    }

    /// Fetch a parcel and refresh the shared store with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or answers garbage.
    pub async fn load_land(&self, id: LandId) -> Result<Land, TransportError> {
        let land = self.api.fetch_land(id).await?;
        self.store.upsert(land.clone());
        Ok(land)
    }

    /// Run one confirm action, sending the request when the gate allows it.
    ///
    /// Returns the state after the action. A confirm issued while a request
    /// is in flight does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error for validation failures or confirms issued in a state
    /// that does not accept them. Network and business failures are not
    /// errors; they leave the flow in `Failed`.
    pub async fn confirm<F>(
        &self,
        flow: &mut PurchaseFlow,
        on_complete: F,
    ) -> Result<PurchaseState, FlowError>
    where
        F: FnOnce(LandId),
    {
        match flow.confirm()? {
            ConfirmStep::NeedsCredential | ConfirmStep::AlreadySubmitting => Ok(flow.state()),
            ConfirmStep::Submit(request) => {
                log::debug!(
                    "submitting purchase for land {} (credential: {})",
                    request.land_id,
                    request.has_credential()
                );
                let result = self.api.purchase(&request).await;
                drop(request);
                Ok(handle_result(flow, result, &self.store, on_complete))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    fn parcel() -> Land {
        Land {
            id: 21,
            code: "PW-021".into(),
            price: 1000.0,
            area: Some(50.0),
            ..Land::default()
        }
    }

    #[test]
    fn engine_loads_and_buys_land() {
        let api = ScriptedMarketApi::new()
            .with_land(parcel())
            .reply(Ok(PurchaseResponse::ok()));
        let store = MemoryLandStore::new();
        let config = ClientConfig {
            campaign: Some(DiscountRatio::new(0.3).expect("ratio")),
            ..ClientConfig::default()
        };
        let engine = PurchaseEngine::new(api.clone(), store.clone(), config);

        let land = block_on(engine.load_land(21)).expect("land loads");
        assert_eq!(engine.quote(&land).unit_price, Some(20.0));
        assert!(store.snapshot(21).is_some());

        let mut flow = engine.new_flow();
        flow.begin(&land).expect("begin");
        let completed = Cell::new(0);
        let state = block_on(engine.confirm(&mut flow, |_| completed.set(completed.get() + 1)))
            .expect("confirm");
        assert_eq!(state, PurchaseState::Succeeded);
        assert_eq!(completed.get(), 1);
        assert_eq!(api.purchase_calls(), 1);
        assert_eq!(
            store.snapshot(21).map(|l| l.status),
            Some(LandStatus::Owned)
        );
    }

    #[test]
    fn missing_land_is_a_transport_error() {
        let engine = PurchaseEngine::new(
            ScriptedMarketApi::new(),
            MemoryLandStore::new(),
            ClientConfig::default(),
        );
        assert_eq!(
            block_on(engine.load_land(404)),
            Err(TransportError::Status(404))
        );
    }

    #[test]
    fn credential_gate_sends_nothing_until_password() {
        let api = ScriptedMarketApi::new().reply(Ok(PurchaseResponse::ok()));
        let engine = PurchaseEngine::new(
            api.clone(),
            MemoryLandStore::with_lands([parcel()]),
            ClientConfig {
                gate: GateMode::PasswordRequired,
                ..ClientConfig::default()
            },
        );
        let mut flow = engine.new_flow();
        flow.begin(&parcel()).expect("begin");
        let state = block_on(engine.confirm(&mut flow, |_| {})).expect("gate");
        assert_eq!(state, PurchaseState::AwaitingCredential);
        assert_eq!(api.purchase_calls(), 0);

        flow.enter_credential("112233").expect("credential");
        let state = block_on(engine.confirm(&mut flow, |_| {})).expect("submit");
        assert_eq!(state, PurchaseState::Succeeded);
        let sent = api.purchases();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].has_credential());
    }
}
