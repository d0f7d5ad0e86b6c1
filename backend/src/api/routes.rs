use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::*;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Asset configuration
        .route("/config/assets", get(list_assets))
        .route("/config/assets/reload", post(reload_assets))
        .route("/config/assets/:symbol", get(get_asset))

        // Margin engine
        .route("/margin/validate", post(validate_margin))
        .route("/margin/preview", post(preview_margin))

        .with_state(state)
}
