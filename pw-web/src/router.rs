use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    /// Land id stays textual here; the page validates it.
    #[at("/land/:id")]
    LandDetail { id: String },
    #[at("/holdings")]
    Holdings,
    #[at("/404")]
    #[not_found]
    NotFound,
}
