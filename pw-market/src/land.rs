//! Land parcels as the backend describes them.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::LandType;
use crate::numbers::{amount_from_value, lenient_optional_amount};
use serde_json::Value;

/// Backend identifier of a land parcel.
pub type LandId = u64;

/// Ownership status of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandStatus {
    #[default]
    #[serde(alias = "available")]
    Unowned,
    #[serde(alias = "sold")]
    Owned,
}

impl fmt::Display for LandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unowned => f.write_str("unowned"),
            Self::Owned => f.write_str("owned"),
        }
    }
}

/// Grid position of a parcel within its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A purchasable virtual parcel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "LandRecord")]
pub struct Land {
    pub id: LandId,
    pub code: String,
    pub status: LandStatus,
    /// Current price in TDB; strings and garbage from the wire become 0.
    pub price: f64,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub region_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub transactions: u32,
    pub area: Option<f64>,
    pub land_type: Option<LandType>,
}

/// Land as the backend spells it. Each alternative spelling is its own
/// field so a body carrying both still decodes.
#[derive(Deserialize)]
struct LandRecord {
    id: LandId,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    land_code: Option<String>,
    #[serde(default)]
    status: LandStatus,
    /// Base price.
    #[serde(default)]
    price: Option<Value>,
    /// Campaign or listing price; wins over `price` when set.
    #[serde(default)]
    current_price: Option<Value>,
    #[serde(flatten)]
    coordinate: Coordinate,
    #[serde(default)]
    region_id: Option<u64>,
    #[serde(default)]
    owner_id: Option<u64>,
    #[serde(default)]
    transactions: Option<u32>,
    #[serde(default)]
    transaction_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    area: Option<f64>,
    #[serde(default)]
    land_type: Option<LandType>,
}

impl From<LandRecord> for Land {
    fn from(record: LandRecord) -> Self {
        let price = record
            .current_price
            .filter(|value| !value.is_null())
            .or(record.price)
            .as_ref()
            .map_or(0.0, amount_from_value);
        Self {
            id: record.id,
            code: record.code.or(record.land_code).unwrap_or_default(),
            status: record.status,
            price,
            coordinate: record.coordinate,
            region_id: record.region_id,
            owner_id: record.owner_id,
            transactions: record
                .transactions
                .or(record.transaction_count)
                .unwrap_or_default(),
            area: record.area,
            land_type: record.land_type,
        }
    }
}

impl Land {
    /// Parse a land detail response, bare or wrapped as `{"data": {...}}`.
    ///
    /// # Errors
    ///
    /// Returns the decode error of the land object itself when it is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let body = match serde_json::from_str::<Value>(json)? {
            Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
                map.remove("data").unwrap_or_default()
            }
            other => other,
        };
        serde_json::from_value(body)
    }

    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.status == LandStatus::Unowned
    }

    /// Optimistic transition applied after the backend confirms a purchase.
    pub fn mark_purchased(&mut self, owner_id: Option<u64>) {
        self.status = LandStatus::Owned;
        if owner_id.is_some() {
            self.owner_id = owner_id;
        }
        self.transactions = self.transactions.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_price_and_aliases() {
        let land = Land::from_json(
            r#"{"id": 7, "land_code": "PW-A-007", "status": "available",
                "current_price": "1000.00", "x": 3, "y": -2,
                "region_id": 4, "owner_id": null, "transaction_count": 2, "area": "25"}"#,
        )
        .expect("land parses");
        assert_eq!(land.id, 7);
        assert_eq!(land.code, "PW-A-007");
        assert_eq!(land.status, LandStatus::Unowned);
        assert!((land.price - 1000.0).abs() < f64::EPSILON);
        assert_eq!(land.coordinate, Coordinate { x: 3, y: -2 });
        assert_eq!(land.transactions, 2);
        assert_eq!(land.area, Some(25.0));
    }

    #[test]
    fn parses_enveloped_body_with_bad_price() {
        let land =
            Land::from_json(r#"{"data": {"id": 9, "status": "owned", "price": "n/a"}}"#)
                .expect("envelope parses");
        assert_eq!(land.id, 9);
        assert_eq!(land.status, LandStatus::Owned);
        assert!(land.price.abs() < f64::EPSILON);
        assert_eq!(land.area, None);
    }

    #[test]
    fn malformed_land_keeps_its_decode_error() {
        let err = Land::from_json(r#"{"data": {"status": "owned"}}"#).expect_err("id missing");
        assert!(err.to_string().contains("missing field `id`"), "{err}");
    }

    #[test]
    fn serialized_land_reads_back() {
        let land = Land {
            id: 4,
            code: "PW-4".into(),
            price: 12.5,
            transactions: 3,
            ..Land::default()
        };
        let json = serde_json::to_string(&land).expect("serializes");
        assert_eq!(Land::from_json(&json).expect("parses"), land);
    }

    #[test]
    fn mark_purchased_transitions_status() {
        let mut land = Land {
            id: 1,
            transactions: 4,
            ..Land::default()
        };
        assert!(land.is_purchasable());
        land.mark_purchased(Some(88));
        assert_eq!(land.status, LandStatus::Owned);
        assert_eq!(land.owner_id, Some(88));
        assert_eq!(land.transactions, 5);
        assert!(!land.is_purchasable());
    }
}
