use crate::domain::{AssetConfig, MarginFigure};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarginError {
    #[error("Leverage cannot be zero")]
    ZeroLeverage,

    #[error("Overflow in {0} calculation")]
    Overflow(&'static str),
}

pub struct MarginCalculator;

impl MarginCalculator {
    /// Calculate initial margin required to open an order
    /// Formula: Initial Margin = (Mark Price × Order Size × Contract Value) / Leverage
    ///
    /// The result is rounded half away from zero to two decimals. The caller is
    /// expected to have validated leverage against the asset's tiers and the
    /// order size as positive.
    pub fn compute_margin(
        asset: &AssetConfig,
        order_size: Decimal,
        leverage: u16,
    ) -> Result<MarginFigure, MarginError> {
        let notional = Self::notional_value(asset, order_size)?;
        let raw = Self::divide_by_leverage(notional, leverage)?;

        MarginFigure::normalize(raw).ok_or(MarginError::Overflow("margin scale"))
    }

    /// Notional exposure of an order in quote currency
    /// Formula: Mark Price × Order Size × Contract Value
    pub fn notional_value(asset: &AssetConfig, order_size: Decimal) -> Result<Decimal, MarginError> {
        asset
            .mark_price
            .checked_mul(order_size)
            .ok_or(MarginError::Overflow("order value"))?
            .checked_mul(asset.contract_value)
            .ok_or(MarginError::Overflow("notional value"))
    }

    fn divide_by_leverage(notional: Decimal, leverage: u16) -> Result<Decimal, MarginError> {
        if leverage == 0 {
            return Err(MarginError::ZeroLeverage);
        }

        notional
            .checked_div(Decimal::from(leverage))
            .ok_or(MarginError::Overflow("margin"))
    }
}
