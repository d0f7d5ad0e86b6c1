use anyhow::{Context, Result};
use axum::http::HeaderValue;
use margin_backend::api::handlers::AppState;
use margin_backend::config::LogFormat;
use margin_backend::create_router;
use margin_backend::infrastructure::{AssetRegistry, InMemoryAssetRegistry};
use margin_backend::AppConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    init_tracing(&config);

    info!("Starting Margin Backend");
    info!("Configuration:");
    info!("  Listen: {}", config.listen_addr());
    info!("  CORS origin: {}", config.cors_origin);
    match &config.assets_file {
        Some(path) => info!("  Assets file: {}", path.display()),
        None => info!("  Assets file: <bundled defaults>"),
    }

    let registry = match &config.assets_file {
        Some(path) => InMemoryAssetRegistry::from_file(path)?,
        None => InMemoryAssetRegistry::with_defaults()?,
    };
    let registry = Arc::new(registry);
    for asset in registry.list()? {
        info!(
            "  Listed {} mark={} contract={} leverage={:?}",
            asset.symbol,
            asset.mark_price,
            asset.contract_value,
            asset.allowed_leverage.as_slice()
        );
    }

    let state = AppState::new(registry, config.assets_file.clone());

    // Create router with middleware
    let app = create_router(state)
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    info!("HTTP server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origin == "*" {
        return Ok(layer.allow_origin(Any));
    }

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS_ORIGIN: {}", config.cors_origin))?;

    Ok(layer.allow_origin(origin))
}
