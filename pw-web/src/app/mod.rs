use crate::a11y::STATUS_REGION_ID;
use crate::api::ApiHandle;
use crate::i18n::t;
use crate::router::Route;
use crate::store::StoreHandle;
use pw_market::{ClientConfig, LandId};
use yew::prelude::*;
use yew_router::prelude::*;

pub mod routing;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::config::router_base().map(AttrValue::from);
    let config = crate::config::client_config();
    let api = use_memo((), {
        let config = config.clone();
        move |_| ApiHandle::new(crate::api::WebMarketApi::new(config))
    });
    let store = use_memo((), |_| StoreHandle::default());
    html! {
        <BrowserRouter basename={router_base}>
            <AppShell api={(*api).clone()} store={(*store).clone()} {config} />
        </BrowserRouter>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ShellProps {
    pub api: ApiHandle,
    pub store: StoreHandle,
    pub config: ClientConfig,
}

/// Header, routed content and the status live region. Needs a router above it.
#[function_component(AppShell)]
pub fn app_shell(props: &ShellProps) -> Html {
    let navigator = use_navigator();
    let on_purchased = Callback::from(move |id: LandId| {
        log::info!("land {id} purchased; opening holdings");
        crate::a11y::set_status(&t("purchase.success"));
        if let Some(nav) = navigator.as_ref() {
            nav.push(&routing::destination_after_purchase());
        }
    });

    let lang = use_state(crate::i18n::current_lang);
    let on_lang_change = {
        let lang = lang.clone();
        Callback::from(move |e: Event| {
            let code = e.target_unchecked_into::<web_sys::HtmlSelectElement>().value();
            crate::i18n::set_lang(&code);
            lang.set(crate::i18n::current_lang());
        })
    };

    let render = {
        let props = props.clone();
        Callback::from(move |route: Route| {
            routing::switch(route, &props, on_purchased.clone())
        })
    };

    html! {
        <>
            <header class="app-header">
                <h1>{ t("app.title") }</h1>
                <nav>
                    <Link<Route> to={Route::Holdings}>{ t("app.holdings") }</Link<Route>>
                </nav>
                <select id="lang-select" aria-label="Language" onchange={on_lang_change}>
                    { for crate::i18n::locales().iter().map(|meta| html! {
                        <option value={meta.code} selected={*lang == meta.code}>{ meta.name }</option>
                    }) }
                </select>
            </header>
            <main id="main">
                <Switch<Route> {render} />
            </main>
            <div id={STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
        </>
    }
}
