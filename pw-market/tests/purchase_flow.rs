use futures::executor::block_on;
use pw_market::{
    ClientConfig, ConfirmStep, DiscountRatio, GENERIC_FAILURE_MESSAGE, GateMode, Land,
    LandStatus, LandStore, MarketApi, MemoryLandStore, PurchaseEngine, PurchaseFlow,
    PurchaseResponse, PurchaseState, ScriptedMarketApi, TransportError, handle_result, quote,
};
use std::cell::Cell;

fn unowned_land() -> Land {
    Land {
        id: 1001,
        code: "PW-B-1001".to_string(),
        price: 1000.0,
        region_id: Some(3),
        ..Land::default()
    }
}

fn engine_with(
    api: ScriptedMarketApi,
    gate: GateMode,
) -> PurchaseEngine<ScriptedMarketApi, MemoryLandStore> {
    PurchaseEngine::new(
        api,
        MemoryLandStore::with_lands([unowned_land()]),
        ClientConfig {
            gate,
            campaign: Some(DiscountRatio::new(0.3).expect("ratio")),
            ..ClientConfig::default()
        },
    )
}

#[test]
fn scenario_a_thirty_percent_quote() {
    let q = quote(1000.0, DiscountRatio::new(0.3).expect("ratio"), None);
    assert!((q.discounted_price - 300.0).abs() < 1e-9);
    assert!((q.saved_amount - 700.0).abs() < 1e-9);
}

#[test]
fn scenario_b_zero_price_without_area() {
    let q = quote(0.0, DiscountRatio::new(0.3).expect("ratio"), Some(0.0));
    assert!(q.discounted_price.abs() < f64::EPSILON);
    assert!(q.saved_amount.abs() < f64::EPSILON);
    assert!(q.unit_price.is_none());
}

#[test]
fn scenario_c_success_completes_once() {
    let api = ScriptedMarketApi::new().reply(Ok(PurchaseResponse::ok()));
    let engine = engine_with(api.clone(), GateMode::ConfirmOnly);
    let mut flow = engine.new_flow();
    flow.begin(&unowned_land()).expect("begin");

    let completions = Cell::new(0);
    let state = block_on(engine.confirm(&mut flow, |id| {
        assert_eq!(id, 1001);
        completions.set(completions.get() + 1);
    }))
    .expect("confirm");

    assert_eq!(state, PurchaseState::Succeeded);
    assert_eq!(completions.get(), 1);
    assert_eq!(flow.error_message(), None);
    assert_eq!(
        engine.store().snapshot(1001).map(|l| l.status),
        Some(LandStatus::Owned)
    );

    // A late confirm after success neither resends nor completes again.
    assert!(block_on(engine.confirm(&mut flow, |_| completions.set(99))).is_err());
    assert_eq!(completions.get(), 1);
    assert_eq!(api.purchase_calls(), 1);
}

#[test]
fn scenario_d_business_failure_shows_backend_message() {
    let api = ScriptedMarketApi::new().reply(Ok(PurchaseResponse::rejected("余额不足")));
    let engine = engine_with(api, GateMode::ConfirmOnly);
    let mut flow = engine.new_flow();
    flow.begin(&unowned_land()).expect("begin");

    let completed = Cell::new(false);
    let state = block_on(engine.confirm(&mut flow, |_| completed.set(true))).expect("confirm");

    assert_eq!(state, PurchaseState::Failed);
    assert_eq!(flow.error_message(), Some("余额不足"));
    assert!(!completed.get());
    assert_eq!(
        engine.store().snapshot(1001).map(|l| l.status),
        Some(LandStatus::Unowned)
    );
}

#[test]
fn scenario_e_network_error_uses_generic_message() {
    let api = ScriptedMarketApi::new().reply(Err(TransportError::Network(
        "connection reset".to_string(),
    )));
    let engine = engine_with(api, GateMode::ConfirmOnly);
    let mut flow = engine.new_flow();
    flow.begin(&unowned_land()).expect("begin");

    let state = block_on(engine.confirm(&mut flow, |_| {})).expect("confirm");
    assert_eq!(state, PurchaseState::Failed);
    assert_eq!(flow.error_message(), Some(GENERIC_FAILURE_MESSAGE));
}

#[test]
fn double_confirm_issues_one_network_call() {
    let api = ScriptedMarketApi::new()
        .reply(Ok(PurchaseResponse::ok()))
        .reply(Ok(PurchaseResponse::ok()));
    let store = MemoryLandStore::with_lands([unowned_land()]);
    let mut flow = PurchaseFlow::new(GateMode::ConfirmOnly);
    flow.begin(&unowned_land()).expect("begin");

    let steps = [flow.confirm(), flow.confirm()];
    let completions = Cell::new(0);
    for step in steps {
        if let Ok(ConfirmStep::Submit(request)) = step {
            let result = block_on(api.purchase(&request));
            handle_result(&mut flow, result, &store, |_| {
                completions.set(completions.get() + 1);
            });
        }
    }

    assert_eq!(api.purchase_calls(), 1);
    assert_eq!(completions.get(), 1);
    assert_eq!(flow.state(), PurchaseState::Succeeded);
}

#[test]
fn cancelling_never_touches_the_network() {
    let api = ScriptedMarketApi::new().reply(Ok(PurchaseResponse::ok()));
    let engine = engine_with(api.clone(), GateMode::PasswordRequired);

    let mut flow = engine.new_flow();
    flow.begin(&unowned_land()).expect("begin");
    flow.cancel().expect("cancel while confirming");
    assert_eq!(flow.state(), PurchaseState::Idle);

    flow.begin(&unowned_land()).expect("begin");
    let state = block_on(engine.confirm(&mut flow, |_| {})).expect("gate");
    assert_eq!(state, PurchaseState::AwaitingCredential);
    flow.enter_credential("999999").expect("credential");
    flow.cancel().expect("cancel while awaiting credential");
    assert_eq!(flow.state(), PurchaseState::Idle);
    assert!(flow.attempt().is_none());

    assert_eq!(api.purchase_calls(), 0);
    assert_eq!(api.detail_fetches(), 0);
}

#[test]
fn retry_after_failure_is_user_initiated() {
    let api = ScriptedMarketApi::new()
        .reply(Err(TransportError::Status(503)))
        .reply(Ok(PurchaseResponse::ok()));
    let engine = engine_with(api.clone(), GateMode::ConfirmOnly);
    let mut flow = engine.new_flow();
    flow.begin(&unowned_land()).expect("begin");

    let state = block_on(engine.confirm(&mut flow, |_| {})).expect("first confirm");
    assert_eq!(state, PurchaseState::Failed);
    assert_eq!(api.purchase_calls(), 1);

    flow.retry().expect("retry");
    let state = block_on(engine.confirm(&mut flow, |_| {})).expect("second confirm");
    assert_eq!(state, PurchaseState::Succeeded);
    assert_eq!(api.purchase_calls(), 2);
}

#[test]
fn background_refresh_does_not_block_pending_purchase() {
    let store = MemoryLandStore::with_lands([unowned_land()]);
    let mut flow = PurchaseFlow::new(GateMode::ConfirmOnly);
    flow.begin(&store.snapshot(1001).expect("cached")).expect("begin");
    let Ok(ConfirmStep::Submit(_request)) = flow.confirm() else {
        panic!("expected submit");
    };

    // A sibling refresh lands while the request is in flight.
    store.upsert(Land {
        price: 1200.0,
        ..unowned_land()
    });

    handle_result(&mut flow, Ok(PurchaseResponse::ok()), &store, |_| {});
    let current = store.snapshot(1001).expect("cached");
    assert_eq!(current.status, LandStatus::Owned);
    assert!((current.price - 1200.0).abs() < f64::EPSILON);
}
