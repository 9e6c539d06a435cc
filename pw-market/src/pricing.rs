//! Discounted price quotes for land offers.
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::land::Land;
use crate::numbers::normalize_amount;

/// Multiplier applied to a base price, always within `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountRatio(f64);

impl DiscountRatio {
    /// No campaign: the quoted price is the base price.
    pub const FULL_PRICE: Self = Self(1.0);

    /// # Errors
    ///
    /// Returns an error if the ratio is not a finite value in `(0, 1]`.
    pub fn new(ratio: f64) -> Result<Self, ValidationError> {
        if ratio.is_finite() && ratio > 0.0 && ratio <= 1.0 {
            Ok(Self(ratio))
        } else {
            Err(ValidationError::InvalidDiscountRatio(ratio.to_string()))
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Share of the base price the buyer does not pay, as a whole percent.
    #[must_use]
    pub fn percent_off(self) -> u8 {
        let pct = ((1.0 - self.0) * 100.0).round().clamp(0.0, 100.0);
        num_traits::cast::cast::<f64, u8>(pct).unwrap_or(0)
    }
}

impl Default for DiscountRatio {
    fn default() -> Self {
        Self::FULL_PRICE
    }
}

impl TryFrom<f64> for DiscountRatio {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountRatio> for f64 {
    fn from(ratio: DiscountRatio) -> Self {
        ratio.0
    }
}

/// Derived pricing shown on the confirmation gate. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub base_price: f64,
    pub ratio: DiscountRatio,
    pub discounted_price: f64,
    pub saved_amount: f64,
    /// Price per unit of area; `None` when the area is unknown or zero.
    pub unit_price: Option<f64>,
}

impl PriceQuote {
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.saved_amount > 0.0
    }
}

/// Compute a quote from a raw price, a campaign ratio and an optional area.
#[must_use]
pub fn quote(price: f64, ratio: DiscountRatio, area: Option<f64>) -> PriceQuote {
    let base_price = normalize_amount(price);
    let discounted_price = base_price * ratio.value();
    let saved_amount = (base_price - discounted_price).max(0.0);
    let unit_price = area
        .filter(|a| a.is_finite() && *a > 0.0)
        .map(|a| base_price / a)
        .filter(|unit| unit.is_finite());
    PriceQuote {
        base_price,
        ratio,
        discounted_price,
        saved_amount,
        unit_price,
    }
}

/// Quote the current price of a parcel.
#[must_use]
pub fn quote_land(land: &Land, ratio: DiscountRatio) -> PriceQuote {
    quote(land.price, ratio, land.area)
}
