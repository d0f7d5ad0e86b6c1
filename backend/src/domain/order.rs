use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of the order. Carried through validation but never changes the
/// margin arithmetic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

/// Parameters of an order preview as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub asset_symbol: String,
    pub order_size: Decimal,
    pub side: Side,
    /// As submitted; only values matching a configured tier are valid.
    pub leverage: i64,
}

impl OrderRequest {
    pub fn new(
        asset_symbol: impl Into<String>,
        order_size: Decimal,
        side: Side,
        leverage: i64,
    ) -> Self {
        Self {
            asset_symbol: asset_symbol.into(),
            order_size,
            side,
            leverage,
        }
    }

    pub fn has_positive_size(&self) -> bool {
        self.order_size > Decimal::ZERO
    }
}
