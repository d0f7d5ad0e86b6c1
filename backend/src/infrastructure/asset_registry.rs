use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;

use crate::domain::{normalize_symbol, AssetConfig, AssetConfigError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Asset registry unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of asset configuration consumed by the margin engine.
pub trait AssetRegistry: Send + Sync {
    /// Resolve a symbol. `Ok(None)` means the asset is not listed.
    fn lookup(&self, symbol: &str) -> Result<Option<AssetConfig>, RegistryError>;

    /// All listed assets, ordered by symbol.
    fn list(&self) -> Result<Vec<AssetConfig>, RegistryError>;
}

/// On-disk document shape, identical to the `GET /config/assets` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssetCatalogue {
    pub assets: Vec<AssetConfig>,
}

pub struct InMemoryAssetRegistry {
    assets: RwLock<HashMap<String, AssetConfig>>,
}

impl InMemoryAssetRegistry {
    pub fn new(assets: Vec<AssetConfig>) -> Result<Self, AssetConfigError> {
        Ok(Self {
            assets: RwLock::new(index_by_symbol(assets)?),
        })
    }

    /// Registry seeded with the default BTC and ETH listings
    pub fn with_defaults() -> Result<Self, AssetConfigError> {
        Self::new(default_assets()?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let assets = read_catalogue(path.as_ref())?;
        Ok(Self::new(assets)?)
    }

    /// Swap in a new snapshot. On error the current snapshot is kept.
    pub fn replace(&self, assets: Vec<AssetConfig>) -> Result<usize> {
        let indexed = index_by_symbol(assets)?;
        let count = indexed.len();

        let mut guard = self
            .assets
            .write()
            .map_err(|_| RegistryError::Unavailable("asset snapshot lock poisoned".to_string()))?;
        *guard = indexed;

        Ok(count)
    }

    pub fn reload_from(&self, path: impl AsRef<Path>) -> Result<usize> {
        let assets = read_catalogue(path.as_ref())?;
        self.replace(assets)
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn lookup(&self, symbol: &str) -> Result<Option<AssetConfig>, RegistryError> {
        let assets = self
            .assets
            .read()
            .map_err(|_| RegistryError::Unavailable("asset snapshot lock poisoned".to_string()))?;

        Ok(assets.get(&normalize_symbol(symbol)).cloned())
    }

    fn list(&self) -> Result<Vec<AssetConfig>, RegistryError> {
        let assets = self
            .assets
            .read()
            .map_err(|_| RegistryError::Unavailable("asset snapshot lock poisoned".to_string()))?;

        let mut listed: Vec<AssetConfig> = assets.values().cloned().collect();
        listed.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(listed)
    }
}

fn read_catalogue(path: &Path) -> Result<Vec<AssetConfig>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read asset file {}", path.display()))?;
    let catalogue: AssetCatalogue = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse asset file {}", path.display()))?;

    Ok(catalogue.assets)
}

fn index_by_symbol(assets: Vec<AssetConfig>) -> Result<HashMap<String, AssetConfig>, AssetConfigError> {
    let mut indexed = HashMap::with_capacity(assets.len());
    for asset in assets {
        if indexed.contains_key(&asset.symbol) {
            return Err(AssetConfigError::DuplicateSymbol(asset.symbol));
        }
        indexed.insert(asset.symbol.clone(), asset);
    }
    Ok(indexed)
}

fn default_assets() -> Result<Vec<AssetConfig>, AssetConfigError> {
    Ok(vec![
        AssetConfig::new(
            "BTC",
            Decimal::new(62000, 0),
            Decimal::new(1, 3),
            vec![5, 10, 20, 50, 100],
        )?,
        AssetConfig::new(
            "ETH",
            Decimal::new(3200, 0),
            Decimal::new(1, 2),
            vec![5, 10, 25, 50],
        )?,
    ])
}
