use crate::domain::AssetConfig;

pub struct LeveragePolicy;

impl LeveragePolicy {
    /// True iff `leverage` is one of the asset's configured tiers.
    /// There is no snapping to a nearby tier.
    pub fn is_allowed(asset: &AssetConfig, leverage: i64) -> bool {
        Self::tier(asset, leverage).is_some()
    }

    /// The configured tier equal to `leverage`, if any. Values outside the
    /// tier type's range can never match.
    pub fn tier(asset: &AssetConfig, leverage: i64) -> Option<u16> {
        u16::try_from(leverage)
            .ok()
            .filter(|tier| asset.allowed_leverage.contains(*tier))
    }
}
