//! Purchase request payloads.
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::ValidationError;
use crate::land::LandId;
use crate::numbers::whole_positive_u64;

/// Land is always bought one parcel at a time.
pub const LAND_QUANTITY: u32 = 1;

/// Secondary payment password. Redacted in every textual representation.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentCredential(String);

impl PaymentCredential {
    /// Returns `None` for blank input.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PaymentCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PaymentCredential(***)")
    }
}

impl fmt::Display for PaymentCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl Serialize for PaymentCredential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Body of `POST /land/purchase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseRequest {
    pub land_id: LandId,
    pub quantity: u32,
    #[serde(rename = "payment_password", skip_serializing_if = "Option::is_none")]
    credential: Option<PaymentCredential>,
}

impl PurchaseRequest {
    /// # Errors
    ///
    /// Returns an error if the identifier is zero.
    pub fn build(
        land_id: LandId,
        credential: Option<PaymentCredential>,
    ) -> Result<Self, ValidationError> {
        if land_id == 0 {
            return Err(ValidationError::InvalidLandId(land_id.to_string()));
        }
        Ok(Self {
            land_id,
            quantity: LAND_QUANTITY,
            credential,
        })
    }

    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Serialize the request body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parse a land identifier from text such as a route parameter.
///
/// # Errors
///
/// Returns an error unless the text is a positive whole number.
pub fn parse_land_id(raw: &str) -> Result<LandId, ValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_positive_u64))
        .ok_or_else(|| ValidationError::InvalidLandId(raw.to_string()))
}
