use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employer equity grant (RSU or similar).
///
/// `vested_shares + unvested_shares == total_shares` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityGrant {
    /// Record identifier; vest events reference this.
    pub id: String,
    /// Broker-facing grant number, e.g. "RSU-2022-001".
    pub grant_id: String,
    pub grant_date: NaiveDate,
    #[serde(default)]
    pub grant_type: Option<String>,
    pub total_shares: u64,
    pub vested_shares: u64,
    pub unvested_shares: u64,
    #[serde(default)]
    pub source: Option<String>,
}

impl EquityGrant {
    /// # Panics
    ///
    /// Panics if `total_shares` is zero or `vested_shares` exceeds it.
    pub fn new(
        id: impl Into<String>,
        grant_id: impl Into<String>,
        grant_date: NaiveDate,
        total_shares: u64,
        vested_shares: u64,
    ) -> Self {
        assert!(total_shares > 0, "Grant must have shares, got {}", total_shares);
        assert!(
            vested_shares <= total_shares,
            "Vested shares {} exceed total {}",
            vested_shares,
            total_shares
        );
        Self {
            id: id.into(),
            grant_id: grant_id.into(),
            grant_date,
            grant_type: None,
            total_shares,
            vested_shares,
            unvested_shares: total_shares - vested_shares,
            source: None,
        }
    }

    pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = Some(grant_type.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether the share counts add up.
    pub fn is_consistent(&self) -> bool {
        self.vested_shares.checked_add(self.unvested_shares) == Some(self.total_shares)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VestStatus {
    Vested,
    Pending,
}

/// A single scheduled vest of shares from a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestEvent {
    pub id: String,
    /// References [`EquityGrant::id`].
    pub grant_id: String,
    pub vest_date: NaiveDate,
    pub shares: u64,
    pub status: VestStatus,
}

impl VestEvent {
    /// # Panics
    ///
    /// Panics if `shares` is zero.
    pub fn new(
        id: impl Into<String>,
        grant_id: impl Into<String>,
        vest_date: NaiveDate,
        shares: u64,
        status: VestStatus,
    ) -> Self {
        assert!(shares > 0, "Vest event must release shares");
        Self {
            id: id.into(),
            grant_id: grant_id.into(),
            vest_date,
            shares,
            status,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == VestStatus::Pending
    }

    /// Dollar value of this vest at `price` per share.
    pub fn value_at(&self, price: Decimal) -> Decimal {
        Decimal::from(self.shares) * price
    }
}
