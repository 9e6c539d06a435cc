use pw_market::{
    ClientConfig, Endpoint, Land, LandId, MarketApi, PurchaseRequest, PurchaseResponse,
    TransportError, accept_response,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Market backend reached over HTTP from the command line.
pub struct HttpMarketApi {
    client: Client,
    config: ClientConfig,
    token: Option<String>,
}

impl HttpMarketApi {
    pub fn new(config: ClientConfig, token: Option<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            config,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read(endpoint: Endpoint, response: Response) -> Result<String, TransportError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network)?;
        accept_response(endpoint, status, body)
    }
}

fn network(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

#[async_trait::async_trait(?Send)]
impl MarketApi for HttpMarketApi {
    async fn fetch_land(&self, id: LandId) -> Result<Land, TransportError> {
        let response = self
            .authorize(self.client.get(self.config.land_url(id)))
            .send()
            .await
            .map_err(network)?;
        let body = Self::read(Endpoint::LandDetail, response).await?;
        Ok(Land::from_json(&body)?)
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseResponse, TransportError> {
        let payload = request.to_json()?;
        let response = self
            .authorize(self.client.post(self.config.purchase_url()))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(network)?;
        let body = Self::read(Endpoint::Purchase, response).await?;
        PurchaseResponse::from_json(&body)
    }
}
