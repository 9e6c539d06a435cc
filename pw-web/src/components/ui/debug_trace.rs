use crate::i18n::t;
use pw_market::PurchaseState;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub state: PurchaseState,
    pub submissions: u32,
    #[prop_or_default]
    pub land_id: Option<u64>,
}

/// State trace panel rendered when the build enables debug mode.
#[function_component(DebugTrace)]
pub fn debug_trace(props: &Props) -> Html {
    let land = props
        .land_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    html! {
        <aside class="debug-trace" data-testid="debug-trace">
            <h3>{ t("debug.title") }</h3>
            <p>{ format!("{}: {}", t("debug.state"), props.state) }</p>
            <p>{ format!("{}: {}", t("debug.submissions"), props.submissions) }</p>
            <p>{ format!("land: {land}") }</p>
        </aside>
    }
}
