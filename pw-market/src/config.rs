//! Client configuration shared by the web app and the tester.
use serde::{Deserialize, Serialize};

use crate::flow::GateMode;
use crate::land::LandId;
use crate::pricing::DiscountRatio;

pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub api_base: String,
    pub gate: GateMode,
    /// Active campaign ratio. `None` quotes full price.
    pub campaign: Option<DiscountRatio>,
    /// Render the state trace panel and log transitions verbosely.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            gate: GateMode::default(),
            campaign: None,
            debug: false,
        }
    }
}

impl ClientConfig {
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the ratio is out of range.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn ratio(&self) -> DiscountRatio {
        self.campaign.unwrap_or_default()
    }

    #[must_use]
    pub fn land_url(&self, id: LandId) -> String {
        format!("{}/land/{id}", self.base())
    }

    #[must_use]
    pub fn purchase_url(&self) -> String {
        format!("{}/land/purchase", self.base())
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}
