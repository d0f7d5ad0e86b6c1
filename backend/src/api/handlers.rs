use axum::{
    extract::{Path, State},
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::{dto::*, errors::ApiError};
use crate::domain::{OrderRequest, ValidationResult};
use crate::infrastructure::{AssetRegistry, InMemoryAssetRegistry};
use crate::services::MarginValidator;
use rust_decimal::Decimal;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<InMemoryAssetRegistry>,
    pub validator: MarginValidator,
    pub assets_file: Option<PathBuf>,
}

impl AppState {
    pub fn new(registry: Arc<InMemoryAssetRegistry>, assets_file: Option<PathBuf>) -> Self {
        let validator = MarginValidator::new(registry.clone());
        Self {
            registry,
            validator,
            assets_file,
        }
    }
}

/// GET /health - Health check
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "margin-backend"
    }))
}

/// GET /config/assets - List tradable assets
pub async fn list_assets(State(state): State<AppState>) -> Result<Json<AssetsResponse>, ApiError> {
    let assets = state.registry.list()?;

    Ok(Json(AssetsResponse {
        assets: assets.into_iter().map(AssetDto::from).collect(),
    }))
}

/// GET /config/assets/:symbol - Get a single asset
pub async fn get_asset(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<AssetDto>, ApiError> {
    let asset = state
        .registry
        .lookup(&symbol)?
        .ok_or_else(|| ApiError::NotFound(format!("Asset {} not found", symbol)))?;

    Ok(Json(AssetDto::from(asset)))
}

/// POST /config/assets/reload - Re-read the configured asset file
pub async fn reload_assets(
    State(state): State<AppState>,
) -> Result<Json<ReloadAssetsResponse>, ApiError> {
    let path = state
        .assets_file
        .clone()
        .ok_or_else(|| ApiError::BadRequest("No asset file configured".to_string()))?;

    let count = state.registry.reload_from(&path).map_err(|e| {
        warn!(event = "ASSETS_RELOAD_FAILED", path = %path.display(), "{:#}", e);
        ApiError::BadRequest(format!("Failed to reload assets: {:#}", e))
    })?;

    info!(event = "ASSETS_RELOADED", path = %path.display(), assets = count);

    Ok(Json(ReloadAssetsResponse {
        status: ResponseStatus::Ok,
        assets: count,
    }))
}

/// POST /margin/validate - Authoritative margin check
pub async fn validate_margin(
    State(state): State<AppState>,
    Json(payload): Json<ValidateMarginRequest>,
) -> Result<Json<MarginResponse>, ApiError> {
    let order = payload.order();

    let result = state
        .validator
        .validate(&order, payload.margin_client)
        .map_err(|e| {
            error!(event = "VALIDATION_ERROR", asset = %order.asset_symbol, "{}", e);
            ApiError::from(e)
        })?;

    log_validation(&order, payload.margin_client, &result);

    Ok(Json(MarginResponse::from(result)))
}

/// POST /margin/preview - Margin estimate without a client figure
pub async fn preview_margin(
    State(state): State<AppState>,
    Json(payload): Json<PreviewMarginRequest>,
) -> Result<Json<MarginResponse>, ApiError> {
    let order = payload.order();

    let preview = state.validator.preview(&order).map_err(|e| {
        error!(event = "PREVIEW_ERROR", asset = %order.asset_symbol, "{}", e);
        ApiError::from(e)
    })?;

    Ok(Json(MarginResponse::from(preview)))
}

fn log_validation(order: &OrderRequest, client_margin: Decimal, result: &ValidationResult) {
    if let Some(required) = result.required_margin() {
        info!(
            event = "MARGIN_COMPUTED",
            asset = %order.asset_symbol,
            order_size = %order.order_size,
            leverage = order.leverage,
            client_margin = %client_margin,
            backend_margin = %required
        );
    }

    match result {
        ValidationResult::Accepted { required_margin } => {
            info!(
                event = "VALIDATION_SUCCESS",
                asset = %order.asset_symbol,
                margin_required = %required_margin
            );
        }
        ValidationResult::Rejected { reason, .. } => {
            warn!(
                event = "VALIDATION_FAILED",
                reason = reason.code(),
                asset = %order.asset_symbol,
                order_size = %order.order_size,
                leverage = order.leverage,
                client_margin = %client_margin
            );
        }
    }
}
