//! Static risk allocation table: per-tier asset weights and sample instruments.

use crate::domain::risk::RiskTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Stocks,
    MutualFunds,
    Gold,
    Bonds,
    Cash,
}

impl AssetClass {
    pub const ALL: [AssetClass; 5] = [
        AssetClass::Stocks,
        AssetClass::MutualFunds,
        AssetClass::Gold,
        AssetClass::Bonds,
        AssetClass::Cash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::MutualFunds => "mutual_funds",
            Self::Gold => "gold",
            Self::Bonds => "bonds",
            Self::Cash => "cash",
        }
    }

    pub fn sample_instruments(self) -> &'static [&'static str] {
        match self {
            Self::Stocks => &["large-cap index", "dividend stock sample"],
            Self::MutualFunds => &["index fund SIP", "diversified equity fund"],
            Self::Gold => &["digital gold", "sovereign gold bonds"],
            Self::Bonds => &["govt bonds", "corporate bond funds"],
            Self::Cash => &["savings", "liquid funds"],
        }
    }
}

// Column order follows `AssetClass::ALL`.
const LOW: [f64; 5] = [0.20, 0.30, 0.10, 0.30, 0.10];
const MEDIUM: [f64; 5] = [0.40, 0.30, 0.10, 0.15, 0.05];
const HIGH: [f64; 5] = [0.60, 0.25, 0.05, 0.05, 0.05];

pub fn weights(tier: RiskTier) -> BTreeMap<AssetClass, f64> {
    let row = match tier {
        RiskTier::Low => LOW,
        RiskTier::Medium => MEDIUM,
        RiskTier::High => HIGH,
    };
    AssetClass::ALL.into_iter().zip(row).collect()
}

pub fn sample_instruments() -> BTreeMap<AssetClass, Vec<String>> {
    AssetClass::ALL
        .into_iter()
        .map(|class| {
            let names = class
                .sample_instruments()
                .iter()
                .map(|s| s.to_string())
                .collect();
            (class, names)
        })
        .collect()
}
