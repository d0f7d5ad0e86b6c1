use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::{MarginFigure, OrderRequest, PreviewResult, RejectReason, ValidationResult};
use crate::infrastructure::{AssetRegistry, RegistryError};
use crate::services::{LeveragePolicy, MarginCalculator, MarginError};

/// Failures that are not a verdict on the order itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Arithmetic(#[from] MarginError),
}

/// Authoritative margin check for order previews.
///
/// Stateless apart from the injected registry handle; every call resolves the
/// asset afresh, so a mark price change between preview and submit is picked
/// up here.
#[derive(Clone)]
pub struct MarginValidator {
    registry: Arc<dyn AssetRegistry>,
}

enum Checked {
    Passed(MarginFigure),
    Failed(RejectReason),
}

impl MarginValidator {
    pub fn new(registry: Arc<dyn AssetRegistry>) -> Self {
        Self { registry }
    }

    /// Validate a client-computed margin against the authoritative figure.
    ///
    /// Checks run in order and the first failure wins: asset lookup, order
    /// size, leverage tier, zero margin, then the tolerance comparison.
    pub fn validate(
        &self,
        order: &OrderRequest,
        client_margin: Decimal,
    ) -> Result<ValidationResult, EngineError> {
        let required_margin = match self.check(order)? {
            Checked::Passed(required_margin) => required_margin,
            Checked::Failed(RejectReason::ZeroMargin) => {
                return Ok(ValidationResult::Rejected {
                    reason: RejectReason::ZeroMargin,
                    required_margin: Some(MarginFigure::ZERO),
                })
            }
            Checked::Failed(reason) => return Ok(ValidationResult::rejected(reason)),
        };

        // a figure too large to carry cents cannot match any computed margin
        let matches = MarginFigure::normalize(client_margin)
            .map_or(false, |client| client.within_tolerance(&required_margin));
        if !matches {
            return Ok(ValidationResult::Rejected {
                reason: RejectReason::MarginMismatch,
                required_margin: Some(required_margin),
            });
        }

        Ok(ValidationResult::Accepted { required_margin })
    }

    /// Compute the authoritative margin without comparing a client figure.
    pub fn preview(&self, order: &OrderRequest) -> Result<PreviewResult, EngineError> {
        Ok(match self.check(order)? {
            Checked::Passed(required_margin) => PreviewResult::Estimated { required_margin },
            Checked::Failed(reason) => PreviewResult::Rejected { reason },
        })
    }

    fn check(&self, order: &OrderRequest) -> Result<Checked, EngineError> {
        let Some(asset) = self.registry.lookup(&order.asset_symbol)? else {
            return Ok(Checked::Failed(RejectReason::UnknownAsset));
        };

        if !order.has_positive_size() {
            return Ok(Checked::Failed(RejectReason::InvalidOrderSize));
        }

        let Some(leverage) = LeveragePolicy::tier(&asset, order.leverage) else {
            return Ok(Checked::Failed(RejectReason::InvalidLeverage));
        };

        let required_margin = MarginCalculator::compute_margin(&asset, order.order_size, leverage)?;

        // dust orders would open a position backed by nothing
        if required_margin.is_zero() {
            return Ok(Checked::Failed(RejectReason::ZeroMargin));
        }

        Ok(Checked::Passed(required_margin))
    }
}
