//! Browser implementation of the market backend.
//!
//! This module provides the web-specific `MarketApi` over `fetch` and the
//! handle components use to share it.

use pw_market::{
    ClientConfig, Endpoint, Land, LandId, MarketApi, PurchaseRequest, PurchaseResponse,
    TransportError, accept_response,
};
use std::rc::Rc;

/// localStorage key the auth collaborator writes the session token to.
pub const AUTH_TOKEN_KEY: &str = "pw.auth.token";

/// Market backend reached through the browser `fetch` API.
pub struct WebMarketApi {
    config: ClientConfig,
}

impl WebMarketApi {
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn bearer() -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            crate::dom::local_storage()
                .ok()
                .and_then(|storage| storage.get_item(AUTH_TOKEN_KEY).ok().flatten())
                .filter(|token| !token.is_empty())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    #[allow(clippy::future_not_send)]
    async fn send(
        &self,
        endpoint: Endpoint,
        method: &str,
        url: &str,
        body: Option<&str>,
    ) -> Result<String, TransportError> {
        let token = Self::bearer();
        let fetched = crate::dom::fetch_text(method, url, body, token.as_deref())
            .await
            .map_err(|err| TransportError::Network(crate::dom::js_error_message(&err)))?;
        accept_response(endpoint, fetched.status, fetched.body)
    }
}

#[async_trait::async_trait(?Send)]
impl MarketApi for WebMarketApi {
    async fn fetch_land(&self, id: LandId) -> Result<Land, TransportError> {
        let url = self.config.land_url(id);
        let body = self.send(Endpoint::LandDetail, "GET", &url, None).await?;
        Ok(Land::from_json(&body)?)
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseResponse, TransportError> {
        let payload = request.to_json()?;
        let body = self
            .send(
                Endpoint::Purchase,
                "POST",
                &self.config.purchase_url(),
                Some(&payload),
            )
            .await?;
        PurchaseResponse::from_json(&body)
    }
}

/// Shared backend handle passed through component props.
#[derive(Clone)]
pub struct ApiHandle(pub Rc<dyn MarketApi>);

impl ApiHandle {
    pub fn new(api: impl MarketApi + 'static) -> Self {
        Self(Rc::new(api))
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ApiHandle {
    type Target = dyn MarketApi;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_market::ScriptedMarketApi;

    #[test]
    fn handles_compare_by_identity() {
        let a = ApiHandle::new(ScriptedMarketApi::new());
        let b = a.clone();
        let c = ApiHandle::new(ScriptedMarketApi::new());
        assert!(a == b);
        assert!(a != c);
    }

    #[test]
    fn native_builds_have_no_bearer() {
        assert_eq!(WebMarketApi::bearer(), None);
    }
}
