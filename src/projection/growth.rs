use crate::core::error::ValuationError;
use crate::core::scenario::{AssetClass, Scenario};
use crate::valuation::demo::Monetary;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Rate used when a scenario has no assumption for the requested class.
pub const FALLBACK_GROWTH_RATE: Decimal = dec!(0.07);

/// Projected value at a whole number of years from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year_offset: u32,
    pub projected_value: Decimal,
}

impl ProjectionPoint {
    /// Calendar year of this point when year 0 is `base_year`.
    pub fn calendar_year(&self, base_year: i32) -> i32 {
        base_year + self.year_offset as i32
    }
}

impl Monetary for ProjectionPoint {
    fn scaled(&self, factor: Decimal) -> Self {
        ProjectionPoint {
            year_offset: self.year_offset,
            projected_value: self.projected_value * factor,
        }
    }
}

/// Compound `start_value` at `annual_growth_rate` for `years` years.
///
/// Returns `years + 1` points; point `k` is `start × (1 + rate)^k`.
/// No contributions or withdrawals are modelled.
///
/// # Errors
///
/// [`ValuationError::ProjectionOverflow`] if a point falls outside the
/// range of [`Decimal`] (about ±7.9e28). No points are returned then.
///
/// # Examples
///
/// ```
/// use networth_engine::projection::growth::project;
/// use rust_decimal_macros::dec;
///
/// let points = project(dec!(100), dec!(0.07), 1).unwrap();
/// assert_eq!(points[1].projected_value, dec!(107));
/// ```
pub fn project(
    start_value: Decimal,
    annual_growth_rate: Decimal,
    years: u32,
) -> Result<Vec<ProjectionPoint>, ValuationError> {
    let factor = Decimal::ONE + annual_growth_rate;
    let mut points = Vec::with_capacity(years as usize + 1);
    points.push(ProjectionPoint {
        year_offset: 0,
        projected_value: start_value,
    });

    let mut value = start_value;
    for year_offset in 1..=years {
        value = value
            .checked_mul(factor)
            .ok_or(ValuationError::ProjectionOverflow { year_offset })?;
        points.push(ProjectionPoint {
            year_offset,
            projected_value: value,
        });
    }

    Ok(points)
}

/// Project using the scenario's assumption for `class` as the blended rate.
///
/// Falls back to [`FALLBACK_GROWTH_RATE`] when the scenario has no
/// assumption for `class`.
pub fn project_scenario(
    start_value: Decimal,
    scenario: &Scenario,
    class: AssetClass,
    years: u32,
) -> Result<Vec<ProjectionPoint>, ValuationError> {
    let rate = scenario.growth_rate(class).unwrap_or(FALLBACK_GROWTH_RATE);
    project(start_value, rate, years)
}

/// Apply a percentage move to a price.
///
/// `-100` yields zero; anything lower would produce a negative price and
/// is rejected.
pub fn adjusted_price(base_price: Decimal, adjustment_percent: Decimal) -> Result<Decimal, ValuationError> {
    if adjustment_percent < -Decimal::ONE_HUNDRED {
        return Err(ValuationError::InvalidAdjustment {
            percent: adjustment_percent,
        });
    }
    Ok(base_price * (Decimal::ONE + adjustment_percent / Decimal::ONE_HUNDRED))
}
