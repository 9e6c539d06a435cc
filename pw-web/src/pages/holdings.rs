use crate::i18n::{fmt_tdb, t};
use crate::router::Route;
use crate::store::{StoreHandle, use_store_updates};
use pw_market::LandStore;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub store: StoreHandle,
}

/// Parcels this session has bought or seen as owned.
#[function_component(HoldingsPage)]
pub fn holdings_page(props: &Props) -> Html {
    use_store_updates(&props.store);
    let owned = props.store.owned();

    html! {
        <section class="panel holdings" data-testid="holdings">
            <h1>{ t("holdings.title") }</h1>
            if owned.is_empty() {
                <p class="holdings__empty">{ t("holdings.empty") }</p>
            } else {
                <ul class="holdings__list">
                    { for owned.iter().map(|land| html! {
                        <li key={land.id.to_string()}>
                            <Link<Route> to={Route::LandDetail { id: land.id.to_string() }}>
                                { land.code.clone() }
                            </Link<Route>>
                            <span class="holdings__price">{ fmt_tdb(land.price) }</span>
                        </li>
                    }) }
                </ul>
            }
        </section>
    }
}
