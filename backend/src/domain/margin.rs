use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fractional digits of every margin figure.
pub const MARGIN_SCALE: u32 = 2;

/// Largest accepted gap between a client figure and the authoritative one:
/// one rounding unit.
pub const MARGIN_TOLERANCE: Decimal = dec!(0.01);

/// Currency amount with a fixed scale of two fractional digits.
///
/// Rounding is half away from zero (`2.345 -> 2.35`, `-2.345 -> -2.35`),
/// never banker's rounding, so every tier that produces a figure agrees on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MarginFigure(Decimal);

impl MarginFigure {
    pub const ZERO: MarginFigure = MarginFigure(dec!(0.00));

    /// Round to two decimals and pad the scale, so 65 is carried as 65.00.
    ///
    /// Returns `None` for magnitudes too large to hold two fractional digits;
    /// `rescale` cannot widen those and would leave the scale short.
    pub fn normalize(value: Decimal) -> Option<Self> {
        let mut rounded =
            value.round_dp_with_strategy(MARGIN_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(MARGIN_SCALE);
        if rounded.scale() != MARGIN_SCALE {
            return None;
        }
        Some(Self(rounded))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Absolute distance between two figures, `None` if it overflows.
    pub fn distance(&self, other: &MarginFigure) -> Option<Decimal> {
        self.0.checked_sub(other.0).map(|diff| diff.abs())
    }

    /// A distance too large to represent is never within tolerance.
    pub fn within_tolerance(&self, other: &MarginFigure) -> bool {
        self.distance(other)
            .map_or(false, |distance| distance <= MARGIN_TOLERANCE)
    }
}

impl fmt::Display for MarginFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MarginFigure> for Decimal {
    fn from(figure: MarginFigure) -> Self {
        figure.0
    }
}

/// Why a validation or preview was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnknownAsset,
    InvalidOrderSize,
    InvalidLeverage,
    ZeroMargin,
    MarginMismatch,
}

impl RejectReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::UnknownAsset => "unknown_asset",
            RejectReason::InvalidOrderSize => "invalid_order_size",
            RejectReason::InvalidLeverage => "invalid_leverage",
            RejectReason::ZeroMargin => "zero_margin",
            RejectReason::MarginMismatch => "margin_mismatch",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of validating a client-submitted margin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted {
        required_margin: MarginFigure,
    },
    /// `required_margin` is set once the pipeline got as far as computing it.
    Rejected {
        reason: RejectReason,
        required_margin: Option<MarginFigure>,
    },
}

impl ValidationResult {
    pub fn rejected(reason: RejectReason) -> Self {
        ValidationResult::Rejected {
            reason,
            required_margin: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted { .. })
    }

    pub fn required_margin(&self) -> Option<MarginFigure> {
        match self {
            ValidationResult::Accepted { required_margin } => Some(*required_margin),
            ValidationResult::Rejected { required_margin, .. } => *required_margin,
        }
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            ValidationResult::Accepted { .. } => None,
            ValidationResult::Rejected { reason, .. } => Some(*reason),
        }
    }
}

/// Outcome of a margin preview (no client figure to compare against).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewResult {
    Estimated { required_margin: MarginFigure },
    Rejected { reason: RejectReason },
}
