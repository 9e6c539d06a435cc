//! Purchase confirmation dialog.
//!
//! Owns the purchase flow for one parcel, shows the discounted quote and the
//! optional payment password, and sends the request at most once per confirm.

mod state;
mod view;

pub use state::{FlowAction, FlowModel, notice_key};

use crate::api::ApiHandle;
use crate::store::StoreHandle;
use pw_market::{ClientConfig, Land, LandId, handle_result};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub land: Land,
    pub api: ApiHandle,
    pub store: StoreHandle,
    pub config: ClientConfig,
    pub on_close: Callback<()>,
    /// Runs once after the backend confirms the purchase.
    pub on_complete: Callback<LandId>,
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
}

#[function_component(PurchaseDialog)]
pub fn purchase_dialog(props: &Props) -> Html {
    let model = {
        let mode = props.config.gate;
        let land = props.land.clone();
        use_reducer(move || FlowModel::opened(mode, &land))
    };
    let draft = use_state(String::new);

    {
        let model = model.clone();
        let api = props.api.clone();
        let store = props.store.clone();
        let on_complete = props.on_complete.clone();
        use_effect_with(model.flow.submissions(), move |_| {
            if let Some(request) = model.flow.in_flight().cloned() {
                let mut snapshot = model.flow.clone();
                let dispatcher = model.dispatcher();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = api.purchase(&request).await;
                    handle_result(&mut snapshot, result, &store.0, |id| on_complete.emit(id));
                    dispatcher.dispatch(FlowAction::Settled(snapshot));
                });
            }
            || {}
        });
    }

    {
        let draft = draft.clone();
        use_effect_with(model.flow.state(), move |_| {
            draft.set(String::new());
            || {}
        });
    }

    view::render(props, &model, &draft)
}
