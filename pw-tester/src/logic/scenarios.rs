use anyhow::{Context, Result, ensure};
use pw_market::{
    ClientConfig, ConfirmStep, DiscountRatio, FlowError, GENERIC_FAILURE_MESSAGE, GateMode, Land,
    LandStatus, LandStore, MarketApi, MemoryLandStore, PurchaseEngine, PurchaseFlow,
    PurchaseResponse, PurchaseState, ScriptedMarketApi, TransportError, ValidationError,
    handle_result, quote,
};
use std::cell::Cell;

use crate::common::result::Observed;

const LAND_ID: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicScenario {
    DiscountQuote,
    ZeroPrice,
    PurchaseSuccess,
    BusinessFailure,
    NetworkFailure,
    DoubleConfirm,
    CancelWithoutRequest,
    PasswordGate,
    RetryAfterFailure,
}

impl LogicScenario {
    pub const ALL: [Self; 9] = [
        Self::DiscountQuote,
        Self::ZeroPrice,
        Self::PurchaseSuccess,
        Self::BusinessFailure,
        Self::NetworkFailure,
        Self::DoubleConfirm,
        Self::CancelWithoutRequest,
        Self::PasswordGate,
        Self::RetryAfterFailure,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::DiscountQuote => "discount-quote",
            Self::ZeroPrice => "zero-price",
            Self::PurchaseSuccess => "purchase-success",
            Self::BusinessFailure => "business-failure",
            Self::NetworkFailure => "network-failure",
            Self::DoubleConfirm => "double-confirm",
            Self::CancelWithoutRequest => "cancel-without-request",
            Self::PasswordGate => "password-gate",
            Self::RetryAfterFailure => "retry-after-failure",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::DiscountQuote => "1000 TDB at ratio 0.3 quotes 300 and saves 700",
            Self::ZeroPrice => "price 0 quotes 0/0 with no unit price for zero area",
            Self::PurchaseSuccess => "success reply marks the land owned and completes once",
            Self::BusinessFailure => "rejection message is shown verbatim",
            Self::NetworkFailure => "transport error falls back to the generic message",
            Self::DoubleConfirm => "confirming twice while submitting sends one request",
            Self::CancelWithoutRequest => "cancel closes the gate without contacting the backend",
            Self::PasswordGate => "password gate blocks submission until a password is entered",
            Self::RetryAfterFailure => "a failed attempt can be retried to success",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub async fn run(self) -> Result<Observed> {
        match self {
            Self::DiscountQuote => discount_quote(),
            Self::ZeroPrice => zero_price(),
            Self::PurchaseSuccess => purchase_success().await,
            Self::BusinessFailure => {
                let observed =
                    purchase_with(Ok(PurchaseResponse::rejected("余额不足"))).await?;
                ensure!(
                    observed.final_state == PurchaseState::Failed,
                    "expected failed, got {}",
                    observed.final_state
                );
                ensure!(
                    observed.message.as_deref() == Some("余额不足"),
                    "message was {:?}",
                    observed.message
                );
                Ok(observed)
            }
            Self::NetworkFailure => {
                let observed = purchase_with(Err(TransportError::Network(
                    "connection reset".into(),
                )))
                .await?;
                ensure!(
                    observed.final_state == PurchaseState::Failed,
                    "expected failed, got {}",
                    observed.final_state
                );
                ensure!(
                    observed.message.as_deref() == Some(GENERIC_FAILURE_MESSAGE),
                    "message was {:?}",
                    observed.message
                );
                Ok(observed)
            }
            Self::DoubleConfirm => double_confirm().await,
            Self::CancelWithoutRequest => cancel_without_request(),
            Self::PasswordGate => password_gate().await,
            Self::RetryAfterFailure => retry_after_failure().await,
        }
    }
}

fn parcel(price: f64, area: Option<f64>) -> Land {
    Land {
        id: LAND_ID,
        code: format!("PW-{LAND_ID:03}"),
        price,
        area,
        ..Land::default()
    }
}

fn campaign(ratio: f64, gate: GateMode) -> Result<ClientConfig> {
    Ok(ClientConfig {
        gate,
        campaign: Some(DiscountRatio::new(ratio)?),
        ..ClientConfig::default()
    })
}

fn observe(flow: &PurchaseFlow, api: &ScriptedMarketApi) -> Observed {
    Observed {
        final_state: flow.state(),
        message: flow.error_message().map(str::to_string),
        purchase_calls: api.purchase_calls(),
    }
}

fn discount_quote() -> Result<Observed> {
    let quoted = quote(1000.0, DiscountRatio::new(0.3)?, Some(50.0));
    ensure!(
        (quoted.discounted_price - 300.0).abs() < 1e-9,
        "discounted price was {}",
        quoted.discounted_price
    );
    ensure!(
        (quoted.saved_amount - 700.0).abs() < 1e-9,
        "saved amount was {}",
        quoted.saved_amount
    );
    ensure!(quoted.ratio.percent_off() == 70, "expected 70% off");
    Ok(Observed {
        final_state: PurchaseState::Idle,
        message: None,
        purchase_calls: 0,
    })
}

fn zero_price() -> Result<Observed> {
    let quoted = quote(0.0, DiscountRatio::new(0.3)?, Some(0.0));
    ensure!(quoted.discounted_price == 0.0, "discounted price should be 0");
    ensure!(quoted.saved_amount == 0.0, "saved amount should be 0");
    ensure!(quoted.unit_price.is_none(), "unit price should be unavailable");
    Ok(Observed {
        final_state: PurchaseState::Idle,
        message: None,
        purchase_calls: 0,
    })
}

async fn purchase_with(
    reply: std::result::Result<PurchaseResponse, TransportError>,
) -> Result<Observed> {
    let api = ScriptedMarketApi::new()
        .with_land(parcel(1000.0, Some(50.0)))
        .reply(reply);
    let engine = PurchaseEngine::new(
        api.clone(),
        MemoryLandStore::new(),
        campaign(0.3, GateMode::ConfirmOnly)?,
    );
    let land = engine.load_land(LAND_ID).await?;
    let mut flow = engine.new_flow();
    flow.begin(&land)?;
    engine.confirm(&mut flow, |_| {}).await?;
    Ok(observe(&flow, &api))
}

async fn purchase_success() -> Result<Observed> {
    let api = ScriptedMarketApi::new()
        .with_land(parcel(1000.0, Some(50.0)))
        .reply(Ok(PurchaseResponse::ok()));
    let store = MemoryLandStore::new();
    let engine = PurchaseEngine::new(
        api.clone(),
        store.clone(),
        campaign(0.3, GateMode::ConfirmOnly)?,
    );
    let land = engine.load_land(LAND_ID).await?;
    let mut flow = engine.new_flow();
    flow.begin(&land)?;
    let completions = Cell::new(0_u32);
    let state = engine
        .confirm(&mut flow, |_| completions.set(completions.get() + 1))
        .await?;
    ensure!(state == PurchaseState::Succeeded, "expected succeeded, got {state}");
    ensure!(
        completions.get() == 1,
        "completion ran {} times",
        completions.get()
    );
    let stored = store.snapshot(LAND_ID).context("land missing from store")?;
    ensure!(stored.status == LandStatus::Owned, "store still shows {}", stored.status);
    Ok(observe(&flow, &api))
}

async fn double_confirm() -> Result<Observed> {
    let api = ScriptedMarketApi::new().reply(Ok(PurchaseResponse::ok()));
    let store = MemoryLandStore::new();
    let mut flow = PurchaseFlow::new(GateMode::ConfirmOnly);
    flow.begin(&parcel(1000.0, None))?;

    let ConfirmStep::Submit(request) = flow.confirm()? else {
        anyhow::bail!("first confirm did not submit");
    };
    for _ in 0..3 {
        ensure!(
            flow.confirm()? == ConfirmStep::AlreadySubmitting,
            "repeat confirm was not ignored"
        );
    }
    let result = api.purchase(&request).await;
    handle_result(&mut flow, result, &store, |_| {});
    ensure!(api.purchase_calls() == 1, "sent {} requests", api.purchase_calls());
    Ok(observe(&flow, &api))
}

fn cancel_without_request() -> Result<Observed> {
    let api = ScriptedMarketApi::new();
    let mut flow = PurchaseFlow::new(GateMode::PasswordRequired);
    flow.begin(&parcel(1000.0, None))?;
    flow.confirm()?;
    flow.cancel()?;
    ensure!(flow.state() == PurchaseState::Idle, "gate still {}", flow.state());
    ensure!(flow.attempt().is_none(), "attempt was kept after cancel");
    ensure!(api.purchase_calls() == 0, "cancel contacted the backend");
    Ok(observe(&flow, &api))
}

async fn password_gate() -> Result<Observed> {
    let api = ScriptedMarketApi::new()
        .with_land(parcel(1000.0, Some(50.0)))
        .reply(Ok(PurchaseResponse::ok()));
    let engine = PurchaseEngine::new(
        api.clone(),
        MemoryLandStore::new(),
        campaign(0.3, GateMode::PasswordRequired)?,
    );
    let land = engine.load_land(LAND_ID).await?;
    let mut flow = engine.new_flow();
    flow.begin(&land)?;

    let state = engine.confirm(&mut flow, |_| {}).await?;
    ensure!(
        state == PurchaseState::AwaitingCredential,
        "expected the password step, got {state}"
    );
    match engine.confirm(&mut flow, |_| {}).await {
        Err(FlowError::Validation(ValidationError::MissingCredential)) => {}
        other => anyhow::bail!("empty password was not refused: {other:?}"),
    }
    ensure!(api.purchase_calls() == 0, "request sent without a password");

    flow.enter_credential("246810")?;
    engine.confirm(&mut flow, |_| {}).await?;
    let sent = api.purchases();
    ensure!(
        sent.first().is_some_and(pw_market::PurchaseRequest::has_credential),
        "password missing from the request"
    );
    Ok(observe(&flow, &api))
}

async fn retry_after_failure() -> Result<Observed> {
    let api = ScriptedMarketApi::new()
        .with_land(parcel(1000.0, Some(50.0)))
        .reply(Err(TransportError::Status(502)))
        .reply(Ok(PurchaseResponse::ok()));
    let engine = PurchaseEngine::new(
        api.clone(),
        MemoryLandStore::new(),
        campaign(0.3, GateMode::ConfirmOnly)?,
    );
    let land = engine.load_land(LAND_ID).await?;
    let mut flow = engine.new_flow();
    flow.begin(&land)?;

    let first = engine.confirm(&mut flow, |_| {}).await?;
    ensure!(first == PurchaseState::Failed, "expected failed, got {first}");
    flow.retry()?;
    let second = engine.confirm(&mut flow, |_| {}).await?;
    ensure!(second == PurchaseState::Succeeded, "expected succeeded, got {second}");
    ensure!(api.purchase_calls() == 2, "sent {} requests", api.purchase_calls());
    Ok(observe(&flow, &api))
}
