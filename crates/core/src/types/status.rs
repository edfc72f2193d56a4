//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Physical condition of a second-hand item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    LikeNew,
    #[default]
    Good,
    Fair,
    NeedsRepair,
}

/// Listing status of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

/// Donation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    #[default]
    Submitted,
    Scheduled,
    Collected,
    Rejected,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Reserved => write!(f, "reserved"),
            Self::Sold => write!(f, "sold"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "sold" => Ok(Self::Sold),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_status_round_trip() {
        let status: ProductStatus = "reserved".parse().unwrap();
        assert_eq!(status, ProductStatus::Reserved);
        assert_eq!(status.to_string(), "reserved");
    }

    #[test]
    fn test_product_status_rejects_unknown() {
        assert!("on_fire".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ItemCondition::LikeNew).unwrap();
        assert_eq!(json, "\"like_new\"");
        let back: ItemCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ItemCondition::LikeNew);
    }
}
