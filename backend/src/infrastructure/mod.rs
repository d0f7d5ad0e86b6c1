pub mod asset_registry;

pub use asset_registry::*;
