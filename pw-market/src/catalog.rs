//! Closed lookup tables for item and land categories.
//!
//! The backend identifies categories with strings; the client maps them onto
//! enums once at the boundary so every lookup below is checked exhaustively.
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Marketplace goods other than land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Material,
    Tool,
}

impl ItemKind {
    pub const ALL: [Self; 2] = [Self::Material, Self::Tool];

    /// Translation key used for the kind's display label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Material => "catalog.material",
            Self::Tool => "catalog.tool",
        }
    }
}

/// Zoning of a land parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandType {
    Residential,
    Commercial,
    Farmland,
    Mining,
}

/// Starter goods granted with a first purchase of a given land type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftBundle {
    /// YLD tokens credited alongside the parcel.
    pub yld: u32,
    pub item: ItemKind,
    pub quantity: u32,
}

impl LandType {
    pub const ALL: [Self; 4] = [
        Self::Residential,
        Self::Commercial,
        Self::Farmland,
        Self::Mining,
    ];

    #[must_use]
    pub const fn gift_bundle(self) -> GiftBundle {
        match self {
            Self::Residential => GiftBundle {
                yld: 10,
                item: ItemKind::Material,
                quantity: 5,
            },
            Self::Commercial => GiftBundle {
                yld: 25,
                item: ItemKind::Tool,
                quantity: 1,
            },
            Self::Farmland => GiftBundle {
                yld: 15,
                item: ItemKind::Material,
                quantity: 10,
            },
            Self::Mining => GiftBundle {
                yld: 20,
                item: ItemKind::Tool,
                quantity: 2,
            },
        }
    }

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Residential => "land_type.residential",
            Self::Commercial => "land_type.commercial",
            Self::Farmland => "land_type.farmland",
            Self::Mining => "land_type.mining",
        }
    }
}

/// A category string the client does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for ItemKind {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "material" | "materials" => Ok(Self::Material),
            "tool" | "tools" => Ok(Self::Tool),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

impl FromStr for LandType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Ok(Self::Residential),
            "commercial" => Ok(Self::Commercial),
            "farmland" | "farm" => Ok(Self::Farmland),
            "mining" | "mine" => Ok(Self::Mining),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_land_type_has_a_bundle() {
        for land_type in LandType::ALL {
            let bundle = land_type.gift_bundle();
            assert!(bundle.yld > 0);
            assert!(bundle.quantity > 0);
        }
    }

    #[test]
    fn category_strings_parse_case_insensitively() {
        assert_eq!("Tools".parse::<ItemKind>(), Ok(ItemKind::Tool));
        assert_eq!(" farm ".parse::<LandType>(), Ok(LandType::Farmland));
        assert_eq!(
            "gems".parse::<ItemKind>(),
            Err(UnknownCategory("gems".to_string()))
        );
    }

    #[test]
    fn gift_items_have_distinct_labels() {
        let labels: Vec<_> = ItemKind::ALL.iter().map(|k| k.label_key()).collect();
        assert_eq!(labels, vec!["catalog.material", "catalog.tool"]);
    }
}
