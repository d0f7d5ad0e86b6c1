use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetConfigError {
    #[error("Asset symbol cannot be empty")]
    EmptySymbol,

    #[error("{symbol}: mark price must be positive, got {value}")]
    NonPositiveMarkPrice { symbol: String, value: Decimal },

    #[error("{symbol}: contract value must be positive, got {value}")]
    NonPositiveContractValue { symbol: String, value: Decimal },

    #[error("{symbol}: allowed leverage cannot be empty")]
    EmptyLeverage { symbol: String },

    #[error("{symbol}: leverage tiers must be >= 1")]
    ZeroLeverageTier { symbol: String },

    #[error("{symbol}: leverage tiers must be strictly ascending, found {previous} before {next}")]
    UnorderedLeverage { symbol: String, previous: u16, next: u16 },

    #[error("Duplicate asset symbol: {0}")]
    DuplicateSymbol(String),
}

/// Ascending, duplicate-free set of leverage tiers, each >= 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedLeverage(Vec<u16>);

impl AllowedLeverage {
    pub fn new(symbol: &str, tiers: Vec<u16>) -> Result<Self, AssetConfigError> {
        if tiers.is_empty() {
            return Err(AssetConfigError::EmptyLeverage {
                symbol: symbol.to_string(),
            });
        }
        if tiers.contains(&0) {
            return Err(AssetConfigError::ZeroLeverageTier {
                symbol: symbol.to_string(),
            });
        }
        if let Some(pair) = tiers.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(AssetConfigError::UnorderedLeverage {
                symbol: symbol.to_string(),
                previous: pair[0],
                next: pair[1],
            });
        }

        Ok(Self(tiers))
    }

    pub fn contains(&self, leverage: u16) -> bool {
        // tiers are sorted, so a binary search is an exact membership test
        self.0.binary_search(&leverage).is_ok()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }
}

/// Static configuration of a tradable asset.
///
/// Only constructible through [`AssetConfig::new`] (or deserialization, which
/// goes through the same checks), so every instance upholds the registry
/// invariants: positive prices and a valid leverage ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssetConfig")]
pub struct AssetConfig {
    pub symbol: String,
    pub mark_price: Decimal,
    pub contract_value: Decimal,
    pub allowed_leverage: AllowedLeverage,
}

impl AssetConfig {
    pub fn new(
        symbol: impl Into<String>,
        mark_price: Decimal,
        contract_value: Decimal,
        allowed_leverage: Vec<u16>,
    ) -> Result<Self, AssetConfigError> {
        let symbol: String = symbol.into();
        let symbol = normalize_symbol(&symbol);
        if symbol.is_empty() {
            return Err(AssetConfigError::EmptySymbol);
        }
        if mark_price <= Decimal::ZERO {
            return Err(AssetConfigError::NonPositiveMarkPrice {
                symbol,
                value: mark_price,
            });
        }
        if contract_value <= Decimal::ZERO {
            return Err(AssetConfigError::NonPositiveContractValue {
                symbol,
                value: contract_value,
            });
        }
        let allowed_leverage = AllowedLeverage::new(&symbol, allowed_leverage)?;

        Ok(Self {
            symbol,
            mark_price,
            contract_value,
            allowed_leverage,
        })
    }
}

#[derive(Deserialize)]
struct RawAssetConfig {
    symbol: String,
    mark_price: Decimal,
    contract_value: Decimal,
    allowed_leverage: Vec<u16>,
}

impl TryFrom<RawAssetConfig> for AssetConfig {
    type Error = AssetConfigError;

    fn try_from(raw: RawAssetConfig) -> Result<Self, Self::Error> {
        AssetConfig::new(
            raw.symbol,
            raw.mark_price,
            raw.contract_value,
            raw.allowed_leverage,
        )
    }
}

/// Canonical form of a symbol: trimmed and upper-cased.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
