//! Demo-mode scaling.
//!
//! Demo mode multiplies every monetary figure shown to the user by one
//! random factor so real balances are not revealed. Scaling runs after
//! all arithmetic is done, over finished result structures, and always
//! touches every monetary field of a value.

use crate::core::error::ValuationError;
use crate::core::holding::Holding;
use crate::valuation::aggregate::NetWorthSummary;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A multiplicative factor applied uniformly to monetary outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DemoScale {
    factor: Decimal,
}

impl DemoScale {
    /// Lowest factor (inclusive) drawn by [`DemoScale::random`].
    pub const MIN_FACTOR: Decimal = Decimal::TEN;
    /// Highest factor (exclusive) drawn by [`DemoScale::random`].
    pub const MAX_FACTOR: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

    /// The no-op scale used when demo mode is off.
    pub fn identity() -> Self {
        Self {
            factor: Decimal::ONE,
        }
    }

    /// A factor drawn uniformly from `[10, 20)` in steps of 0.01.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            factor: Decimal::new(rng.gen_range(1000..2000), 2),
        }
    }

    /// # Panics
    ///
    /// Panics if `factor` is not positive.
    pub fn with_factor(factor: Decimal) -> Self {
        assert!(factor > Decimal::ZERO, "Demo factor must be positive, got {}", factor);
        Self { factor }
    }

    pub fn factor(&self) -> Decimal {
        self.factor
    }

    pub fn is_identity(&self) -> bool {
        self.factor == Decimal::ONE
    }

    pub fn apply<T: Monetary>(&self, value: &T) -> T {
        value.scaled(self.factor)
    }
}

impl TryFrom<Decimal> for DemoScale {
    type Error = ValuationError;

    fn try_from(factor: Decimal) -> Result<Self, Self::Error> {
        if factor <= Decimal::ZERO {
            return Err(ValuationError::InvalidDemoFactor { factor });
        }
        Ok(Self { factor })
    }
}

impl From<DemoScale> for Decimal {
    fn from(scale: DemoScale) -> Self {
        scale.factor
    }
}

impl Default for DemoScale {
    fn default() -> Self {
        Self::identity()
    }
}

/// A result structure whose monetary fields can be scaled together.
///
/// Implementations must scale every monetary field and leave counts,
/// dates and percentages untouched.
pub trait Monetary: Sized {
    fn scaled(&self, factor: Decimal) -> Self;
}

impl<T: Monetary> Monetary for Vec<T> {
    fn scaled(&self, factor: Decimal) -> Self {
        self.iter().map(|item| item.scaled(factor)).collect()
    }
}

impl Monetary for Decimal {
    fn scaled(&self, factor: Decimal) -> Self {
        *self * factor
    }
}

impl Monetary for Holding {
    fn scaled(&self, factor: Decimal) -> Self {
        self.scale_values(factor)
    }
}

impl Monetary for NetWorthSummary {
    fn scaled(&self, factor: Decimal) -> Self {
        NetWorthSummary {
            total_assets: self.total_assets * factor,
            total_liabilities: self.total_liabilities * factor,
            net_worth: self.net_worth * factor,
            by_category: self
                .by_category
                .iter()
                .map(|(category, total)| (*category, *total * factor))
                .collect(),
            liquid_total: self.liquid_total * factor,
            illiquid_total: self.illiquid_total * factor,
        }
    }
}
