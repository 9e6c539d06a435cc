use futures::executor::block_on;
use pw_market::{DiscountRatio, PurchaseState, quote};
use pw_web::components::modal::Modal;
use pw_web::components::ui::debug_trace::DebugTrace;
use pw_web::components::ui::price_quote::PriceQuoteView;
use yew::html::ChildrenRenderer;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn ratio(value: f64) -> DiscountRatio {
    DiscountRatio::new(value).expect("valid ratio")
}

#[test]
fn modal_renders_when_open_and_skips_when_closed() {
    pw_web::i18n::set_lang("en");
    let open_props = pw_web::components::modal::Props {
        open: true,
        title: AttrValue::from("Title"),
        description: Some(AttrValue::from("Desc")),
        on_close: Callback::noop(),
        return_focus_id: None,
        dismissible: true,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(open_props).render());
    assert!(html.contains("modal__header"));
    assert!(html.contains("Desc"));

    let closed_props = pw_web::components::modal::Props {
        open: false,
        title: AttrValue::from("Title"),
        description: None,
        on_close: Callback::noop(),
        return_focus_id: None,
        dismissible: true,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(closed_props).render());
    assert!(!html.contains("modal-backdrop"));
}

#[test]
fn modal_close_button_is_disabled_when_not_dismissible() {
    let props = pw_web::components::modal::Props {
        open: true,
        title: AttrValue::from("Busy"),
        description: None,
        on_close: Callback::noop(),
        return_focus_id: None,
        dismissible: false,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(props).render());
    assert!(html.contains("disabled"));
}

#[test]
fn price_quote_shows_campaign_savings() {
    pw_web::i18n::set_lang("en");
    let props = pw_web::components::ui::price_quote::Props {
        quote: quote(1000.0, ratio(0.3), Some(50.0)),
    };
    let html = block_on(LocalServerRenderer::<PriceQuoteView>::with_props(props).render());
    assert!(html.contains("1000.00 TDB"));
    assert!(html.contains("300.00 TDB"));
    assert!(html.contains("700.00 TDB"));
    assert!(html.contains("70% off"));
    assert!(html.contains("20.00"));
    assert!(html.contains("is-struck"));
}

#[test]
fn price_quote_without_area_has_no_unit_price() {
    pw_web::i18n::set_lang("en");
    let props = pw_web::components::ui::price_quote::Props {
        quote: quote(0.0, ratio(0.3), Some(0.0)),
    };
    let html = block_on(LocalServerRenderer::<PriceQuoteView>::with_props(props).render());
    assert!(html.contains("0.00 TDB"));
    assert!(html.contains("N/A"));
    assert!(!html.contains("% off"));
}

#[test]
fn price_quote_translates_labels() {
    pw_web::i18n::set_lang("zh");
    let props = pw_web::components::ui::price_quote::Props {
        quote: quote(500.0, DiscountRatio::FULL_PRICE, None),
    };
    let html = block_on(LocalServerRenderer::<PriceQuoteView>::with_props(props).render());
    assert!(html.contains("500.00 TDB"));
    assert!(!html.contains("Original price"));
    pw_web::i18n::set_lang("en");
}

#[test]
fn debug_trace_reports_state_and_submissions() {
    pw_web::i18n::set_lang("en");
    let props = pw_web::components::ui::debug_trace::Props {
        state: PurchaseState::Submitting,
        submissions: 2,
        land_id: Some(9),
    };
    let html = block_on(LocalServerRenderer::<DebugTrace>::with_props(props).render());
    assert!(html.contains("State: submitting"));
    assert!(html.contains("Submissions: 2"));
    assert!(html.contains("land: 9"));
}
