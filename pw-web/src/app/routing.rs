use super::ShellProps;
use crate::pages::holdings::HoldingsPage;
use crate::pages::land_detail::LandDetailPage;
use crate::pages::not_found::NotFound;
use crate::router::Route;
use pw_market::LandId;
use yew::prelude::*;

/// Where the app goes once a purchase is confirmed.
#[must_use]
pub const fn destination_after_purchase() -> Route {
    Route::Holdings
}

pub fn switch(route: Route, props: &ShellProps, on_purchased: Callback<LandId>) -> Html {
    match route {
        Route::Home | Route::Holdings => html! {
            <HoldingsPage store={props.store.clone()} />
        },
        Route::LandDetail { id } => html! {
            <LandDetailPage
                id={AttrValue::from(id)}
                api={props.api.clone()}
                store={props.store.clone()}
                config={props.config.clone()}
                {on_purchased}
            />
        },
        Route::NotFound => html! { <NotFound /> },
    }
}
