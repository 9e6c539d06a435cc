//! Land detail page with the purchase entry point.
use crate::api::ApiHandle;
use crate::components::ui::price_quote::PriceQuoteView;
use crate::components::ui::purchase_dialog::PurchaseDialog;
use crate::i18n::{fmt_tdb, t, tr};
use crate::store::{StoreHandle, use_store_updates};
use pw_market::{ClientConfig, Land, LandId, LandStatus, LandStore, parse_land_id, quote_land};
use std::collections::BTreeMap;
use yew::prelude::*;

pub const BUY_BUTTON_ID: &str = "buy-land-btn";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Raw route parameter.
    pub id: AttrValue,
    pub api: ApiHandle,
    pub store: StoreHandle,
    pub config: ClientConfig,
    pub on_purchased: Callback<LandId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

#[function_component(LandDetailPage)]
pub fn land_detail_page(props: &Props) -> Html {
    let land_id = parse_land_id(&props.id).ok();
    use_store_updates(&props.store);
    let load = use_state(|| LoadState::Loading);
    let reloads = use_state(|| 0_u32);
    let dialog_open = use_state(|| false);

    {
        let load = load.clone();
        let api = props.api.clone();
        let store = props.store.clone();
        use_effect_with((land_id, *reloads), move |(id, _)| {
            if let Some(id) = *id {
                load.set(LoadState::Loading);
                wasm_bindgen_futures::spawn_local(async move {
                    match api.fetch_land(id).await {
                        Ok(land) => {
                            store.upsert(land);
                            load.set(LoadState::Loaded);
                        }
                        Err(err) => {
                            log::error!("loading land {id} failed: {err}");
                            crate::dom::console_error(&format!("loading land {id} failed: {err}"));
                            load.set(LoadState::Failed(err.to_string()));
                        }
                    }
                });
            }
            || {}
        });
    }

    let Some(id) = land_id else {
        return html! {
            <section class="panel land-detail" role="alert">
                <p>{ t("land.invalid_id") }</p>
            </section>
        };
    };

    let Some(land) = props.store.snapshot(id) else {
        let on_reload = {
            let reloads = reloads.clone();
            Callback::from(move |_: MouseEvent| reloads.set(*reloads + 1))
        };
        return match &*load {
            LoadState::Failed(_) => html! {
                <section class="panel land-detail" role="alert">
                    <p>{ t("land.load_failed") }</p>
                    <button type="button" class="btn" onclick={on_reload}>{ t("land.reload") }</button>
                </section>
            },
            LoadState::Loading | LoadState::Loaded => html! {
                <section class="panel land-detail" aria-busy="true">
                    <p>{ t("land.loading") }</p>
                </section>
            },
        };
    };

    let on_buy = {
        let dialog_open = dialog_open.clone();
        Callback::from(move |_: MouseEvent| dialog_open.set(true))
    };
    let on_close = {
        let dialog_open = dialog_open.clone();
        Callback::from(move |()| dialog_open.set(false))
    };

    html! {
        <section class="panel land-detail" data-testid="land-detail">
            { render_summary(&land) }
            <PriceQuoteView quote={quote_land(&land, props.config.ratio())} />
            if land.is_purchasable() {
                <button
                    id={BUY_BUTTON_ID}
                    type="button"
                    class="btn btn-primary"
                    onclick={on_buy}
                >
                    { t("land.buy") }
                </button>
            } else {
                <p class="land-detail__unavailable">{ t("land.unavailable") }</p>
            }
            if *dialog_open {
                <PurchaseDialog
                    land={land.clone()}
                    api={props.api.clone()}
                    store={props.store.clone()}
                    config={props.config.clone()}
                    on_close={on_close}
                    on_complete={props.on_purchased.clone()}
                    return_focus_id={Some(AttrValue::from(BUY_BUTTON_ID))}
                />
            }
        </section>
    }
}

fn render_summary(land: &Land) -> Html {
    let mut heading_args = BTreeMap::new();
    heading_args.insert("code", land.code.as_str());
    let status_key = match land.status {
        LandStatus::Unowned => "land.status.unowned",
        LandStatus::Owned => "land.status.owned",
    };
    let owner = land.owner_id.map(|owner| {
        let owner = owner.to_string();
        let mut args = BTreeMap::new();
        args.insert("id", owner.as_str());
        html! { <p class="land-detail__owner">{ tr("land.owner", Some(&args)) }</p> }
    });
    let gift = land.land_type.map(|kind| {
        let bundle = kind.gift_bundle();
        let yld = bundle.yld.to_string();
        let mut args = BTreeMap::new();
        args.insert("yld", yld.as_str());
        html! {
            <p class="land-detail__gift">
                { tr("land.gift", Some(&args)) }
                { format!(" + {} × {}", bundle.quantity, t(bundle.item.label_key())) }
            </p>
        }
    });

    html! {
        <>
            <h1>{ tr("land.heading", Some(&heading_args)) }</h1>
            <span class="badge" data-status={land.status.to_string()}>{ t(status_key) }</span>
            { owner.unwrap_or_default() }
            <dl class="land-detail__facts">
                <dt>{ t("land.coordinate") }</dt>
                <dd>{ format!("({}, {})", land.coordinate.x, land.coordinate.y) }</dd>
                <dt>{ t("land.region") }</dt>
                <dd>{ land.region_id.map_or_else(|| "-".to_string(), |id| id.to_string()) }</dd>
                <dt>{ t("land.transactions") }</dt>
                <dd>{ land.transactions }</dd>
                <dt>{ t("land.price") }</dt>
                <dd>{ fmt_tdb(land.price) }</dd>
                if let Some(kind) = land.land_type {
                    <>
                        <dt>{ t("land.type") }</dt>
                        <dd>{ t(kind.label_key()) }</dd>
                    </>
                }
            </dl>
            { gift.unwrap_or_default() }
        </>
    }
}
