use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AssetConfig, MarginFigure, OrderRequest, PreviewResult, RejectReason, Side, ValidationResult,
};

// Request DTOs
#[derive(Debug, Deserialize)]
pub struct ValidateMarginRequest {
    pub asset: String,
    pub order_size: Decimal,
    pub side: Side,
    pub leverage: i64,
    pub margin_client: Decimal,
}

impl ValidateMarginRequest {
    pub fn order(&self) -> OrderRequest {
        OrderRequest::new(self.asset.clone(), self.order_size, self.side, self.leverage)
    }
}

#[derive(Debug, Deserialize)]
pub struct PreviewMarginRequest {
    pub asset: String,
    pub order_size: Decimal,
    pub side: Side,
    pub leverage: i64,
}

impl PreviewMarginRequest {
    pub fn order(&self) -> OrderRequest {
        OrderRequest::new(self.asset.clone(), self.order_size, self.side, self.leverage)
    }
}

// Response DTOs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Body of `/margin/validate` and `/margin/preview`
#[derive(Debug, Serialize)]
pub struct MarginResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_required: Option<MarginFigure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
}

impl MarginResponse {
    fn ok(margin_required: MarginFigure) -> Self {
        Self {
            status: ResponseStatus::Ok,
            margin_required: Some(margin_required),
            message: None,
            reason: None,
        }
    }

    fn error(reason: RejectReason, margin_required: Option<MarginFigure>) -> Self {
        Self {
            status: ResponseStatus::Error,
            margin_required,
            message: Some(reject_message(reason).to_string()),
            reason: Some(reason),
        }
    }
}

impl From<ValidationResult> for MarginResponse {
    fn from(result: ValidationResult) -> Self {
        match result {
            ValidationResult::Accepted { required_margin } => Self::ok(required_margin),
            ValidationResult::Rejected {
                reason,
                required_margin,
            } => Self::error(reason, required_margin),
        }
    }
}

impl From<PreviewResult> for MarginResponse {
    fn from(result: PreviewResult) -> Self {
        match result {
            PreviewResult::Estimated { required_margin } => Self::ok(required_margin),
            PreviewResult::Rejected { reason } => Self::error(reason, None),
        }
    }
}

/// User-facing text for each rejection reason
pub fn reject_message(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::UnknownAsset => "Unsupported asset",
        RejectReason::InvalidOrderSize => "Order size must be greater than zero",
        RejectReason::InvalidLeverage => "Invalid leverage",
        RejectReason::ZeroMargin => "Order size too small - margin rounds to zero",
        RejectReason::MarginMismatch => "Submitted margin does not match required margin",
    }
}

/// Asset listing entry
#[derive(Debug, Serialize)]
pub struct AssetDto {
    pub symbol: String,
    pub mark_price: Decimal,
    pub contract_value: Decimal,
    pub allowed_leverage: Vec<u16>,
}

impl From<AssetConfig> for AssetDto {
    fn from(asset: AssetConfig) -> Self {
        Self {
            symbol: asset.symbol,
            mark_price: asset.mark_price,
            contract_value: asset.contract_value,
            allowed_leverage: asset.allowed_leverage.as_slice().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssetsResponse {
    pub assets: Vec<AssetDto>,
}

#[derive(Debug, Serialize)]
pub struct ReloadAssetsResponse {
    pub status: ResponseStatus,
    pub assets: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
