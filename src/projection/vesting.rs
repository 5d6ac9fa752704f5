use crate::core::equity::{EquityGrant, VestEvent, VestStatus};
use crate::core::error::ValuationError;
use crate::core::scenario::Scenario;
use crate::projection::growth::adjusted_price;
use crate::valuation::demo::Monetary;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value and progress of a single grant at a given share price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSummary {
    pub vested_value: Decimal,
    pub unvested_value: Decimal,
    /// 0 to 100. Reported as 0 for a grant with no shares.
    pub vest_progress_percent: Decimal,
}

impl Monetary for VestingSummary {
    fn scaled(&self, factor: Decimal) -> Self {
        VestingSummary {
            vested_value: self.vested_value * factor,
            unvested_value: self.unvested_value * factor,
            vest_progress_percent: self.vest_progress_percent,
        }
    }
}

pub fn vesting_summary(grant: &EquityGrant, current_price: Decimal) -> VestingSummary {
    let vest_progress_percent = if grant.total_shares == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(grant.vested_shares) * Decimal::ONE_HUNDRED / Decimal::from(grant.total_shares)
    };

    VestingSummary {
        vested_value: Decimal::from(grant.vested_shares) * current_price,
        unvested_value: Decimal::from(grant.unvested_shares) * current_price,
        vest_progress_percent,
    }
}

/// A grant valued at the current price and at a scenario-adjusted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioVesting {
    pub summary: VestingSummary,
    pub adjusted_price: Decimal,
    pub unvested_value_adjusted: Decimal,
}

impl Monetary for ScenarioVesting {
    fn scaled(&self, factor: Decimal) -> Self {
        ScenarioVesting {
            summary: self.summary.scaled(factor),
            adjusted_price: self.adjusted_price * factor,
            unvested_value_adjusted: self.unvested_value_adjusted * factor,
        }
    }
}

/// Value `grant` under the scenario's equity price adjustment.
pub fn scenario_vesting(
    grant: &EquityGrant,
    current_price: Decimal,
    scenario: &Scenario,
) -> Result<ScenarioVesting, ValuationError> {
    let adjusted = adjusted_price(current_price, scenario.equity_price_adjustment_percent)?;
    Ok(ScenarioVesting {
        summary: vesting_summary(grant, current_price),
        adjusted_price: adjusted,
        unvested_value_adjusted: Decimal::from(grant.unvested_shares) * adjusted,
    })
}

/// Pending vest events in ascending date order.
///
/// The view borrows the events and can be iterated any number of times
/// with different limits.
#[derive(Debug, Clone)]
pub struct PendingVests<'a> {
    events: Vec<&'a VestEvent>,
}

impl<'a> PendingVests<'a> {
    pub fn new(events: &'a [VestEvent]) -> Self {
        let mut pending: Vec<&VestEvent> = events.iter().filter(|e| e.is_pending()).collect();
        // Stable, so same-day events keep input order.
        pending.sort_by_key(|e| e.vest_date);
        Self { events: pending }
    }

    /// The first `limit` pending events, earliest first.
    ///
    /// Pending events dated in the past are included; see
    /// [`PendingVests::overdue`] to pick those out.
    pub fn upcoming(&self, limit: usize) -> impl Iterator<Item = &'a VestEvent> + Clone + '_ {
        self.events.iter().copied().take(limit)
    }

    /// Pending events whose date is already before `as_of`.
    pub fn overdue(&self, as_of: NaiveDate) -> impl Iterator<Item = &'a VestEvent> + '_ {
        self.events
            .iter()
            .copied()
            .take_while(move |e| e.vest_date < as_of)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a VestEvent> + '_ {
        self.events.iter().copied()
    }

    pub fn total_shares(&self) -> u64 {
        self.events.iter().fold(0u64, |acc, e| acc.saturating_add(e.shares))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// The first `limit` pending vests, earliest first.
///
/// `as_of` does not exclude anything: a pending event whose date has
/// passed is still pending and sorts ahead of later ones.
pub fn upcoming_vests(events: &[VestEvent], _as_of: NaiveDate, limit: usize) -> Vec<&VestEvent> {
    PendingVests::new(events).upcoming(limit).collect()
}

/// Share counts summed across grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingTotals {
    pub total_shares: u64,
    pub vested_shares: u64,
    pub unvested_shares: u64,
}

/// Dollar values of [`VestingTotals`] at a price and an adjusted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingValues {
    pub vested_value: Decimal,
    pub unvested_value: Decimal,
    pub unvested_value_adjusted: Decimal,
}

impl Monetary for VestingValues {
    fn scaled(&self, factor: Decimal) -> Self {
        VestingValues {
            vested_value: self.vested_value * factor,
            unvested_value: self.unvested_value * factor,
            unvested_value_adjusted: self.unvested_value_adjusted * factor,
        }
    }
}

impl VestingTotals {
    pub fn valued_at(&self, current_price: Decimal, adjusted_price: Decimal) -> VestingValues {
        VestingValues {
            vested_value: Decimal::from(self.vested_shares) * current_price,
            unvested_value: Decimal::from(self.unvested_shares) * current_price,
            unvested_value_adjusted: Decimal::from(self.unvested_shares) * adjusted_price,
        }
    }
}

/// Element-wise sum of share counts. Inputs are trusted as given.
///
/// Sums saturate at `u64::MAX` rather than wrapping.
pub fn aggregate_vesting(grants: &[EquityGrant]) -> VestingTotals {
    grants.iter().fold(VestingTotals::default(), |acc, g| VestingTotals {
        total_shares: acc.total_shares.saturating_add(g.total_shares),
        vested_shares: acc.vested_shares.saturating_add(g.vested_shares),
        unvested_shares: acc.unvested_shares.saturating_add(g.unvested_shares),
    })
}

/// A disagreement between a grant's share counts and its vest events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VestingMismatch {
    /// `vested + unvested != total` on the grant itself.
    ShareCounts {
        grant: String,
        total: u64,
        vested: u64,
        unvested: u64,
    },
    /// Vested events do not add up to the grant's vested shares.
    VestedEvents {
        grant: String,
        recorded: u64,
        from_events: u64,
    },
}

/// Cross-check grants against their vest events.
///
/// Purely diagnostic: the calculators above never consult this. Grants
/// with no events at all are not checked against events.
pub fn reconcile(grants: &[EquityGrant], events: &[VestEvent]) -> Vec<VestingMismatch> {
    let mut vested_by_grant: HashMap<&str, u64> = HashMap::new();
    let mut has_events: HashMap<&str, bool> = HashMap::new();
    for event in events {
        has_events.insert(event.grant_id.as_str(), true);
        if event.status == VestStatus::Vested {
            let vested = vested_by_grant.entry(event.grant_id.as_str()).or_insert(0);
            *vested = vested.saturating_add(event.shares);
        }
    }

    let mut mismatches = Vec::new();
    for grant in grants {
        if !grant.is_consistent() {
            mismatches.push(VestingMismatch::ShareCounts {
                grant: grant.id.clone(),
                total: grant.total_shares,
                vested: grant.vested_shares,
                unvested: grant.unvested_shares,
            });
        }
        if has_events.contains_key(grant.id.as_str()) {
            let from_events = vested_by_grant.get(grant.id.as_str()).copied().unwrap_or(0);
            if from_events != grant.vested_shares {
                mismatches.push(VestingMismatch::VestedEvents {
                    grant: grant.id.clone(),
                    recorded: grant.vested_shares,
                    from_events,
                });
            }
        }
    }

    for mismatch in &mismatches {
        log::warn!("vesting data mismatch: {:?}", mismatch);
    }
    mismatches
}
