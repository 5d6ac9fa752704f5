use crate::core::currency::ExchangeRateTable;
use crate::core::equity::{EquityGrant, VestEvent};
use crate::core::error::ValuationError;
use crate::core::holding::Holding;
use crate::portfolio::equities::EquityPosition;
use crate::portfolio::family_office::{family_office_totals, FamilyOfficeHolding};
use crate::portfolio::real_estate::Property;
use crate::projection::vesting::aggregate_vesting;
use crate::valuation::aggregate::aggregate;
use crate::valuation::demo::Monetary;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything known about a household at one instant.
///
/// Collaborators fetch this in full before any computation runs; results
/// are as of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioSnapshot {
    pub holdings: Vec<Holding>,
    pub properties: Vec<Property>,
    pub equities: Vec<EquityPosition>,
    pub grants: Vec<EquityGrant>,
    pub vest_events: Vec<VestEvent>,
    pub family_office: Vec<FamilyOfficeHolding>,
    /// Current employer equity price per share.
    pub equity_price: Decimal,
}

/// Household net worth split by where it is held, in base currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioBreakdown {
    /// Net worth of the tracked asset/liability ledger.
    pub tracked_net_worth: Decimal,
    pub real_estate_equity: Decimal,
    pub self_managed_equities: Decimal,
    pub vested_equity: Decimal,
    pub family_office: Decimal,
    pub total: Decimal,
}

impl Monetary for PortfolioBreakdown {
    fn scaled(&self, factor: Decimal) -> Self {
        PortfolioBreakdown {
            tracked_net_worth: self.tracked_net_worth * factor,
            real_estate_equity: self.real_estate_equity * factor,
            self_managed_equities: self.self_managed_equities * factor,
            vested_equity: self.vested_equity * factor,
            family_office: self.family_office * factor,
            total: self.total * factor,
        }
    }
}

impl PortfolioSnapshot {
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
            && self.properties.is_empty()
            && self.equities.is_empty()
            && self.grants.is_empty()
            && self.family_office.is_empty()
    }

    /// Value every component in base currency and total them.
    pub fn breakdown(&self, rates: &ExchangeRateTable) -> Result<PortfolioBreakdown, ValuationError> {
        let tracked_net_worth = aggregate(&self.holdings).net_worth;

        let mut real_estate_equity = Decimal::ZERO;
        for property in &self.properties {
            real_estate_equity += rates.to_base(property.net_equity(), &property.currency)?;
        }

        let mut self_managed_equities = Decimal::ZERO;
        for position in &self.equities {
            self_managed_equities += rates.to_base(position.market_value(), &position.currency)?;
        }

        let vested_equity = Decimal::from(aggregate_vesting(&self.grants).vested_shares) * self.equity_price;
        let family_office = family_office_totals(&self.family_office, rates)?.total;

        Ok(PortfolioBreakdown {
            tracked_net_worth,
            real_estate_equity,
            self_managed_equities,
            vested_equity,
            family_office,
            total: tracked_net_worth + real_estate_equity + self_managed_equities + vested_equity + family_office,
        })
    }
}

impl std::fmt::Display for PortfolioBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Household Breakdown ===")?;
        writeln!(f, "Tracked Holdings:  {}", self.tracked_net_worth)?;
        writeln!(f, "Real Estate:       {}", self.real_estate_equity)?;
        writeln!(f, "Equities:          {}", self.self_managed_equities)?;
        writeln!(f, "Vested Equity:     {}", self.vested_equity)?;
        writeln!(f, "Family Office:     {}", self.family_office)?;
        writeln!(f, "Total:             {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use crate::core::holding::Category;
    use crate::portfolio::family_office::FamilyOfficeCategory;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn rates() -> ExchangeRateTable {
        ExchangeRateTable::from_rates(CurrencyCode::usd(), [(CurrencyCode::new("NIS"), dec!(3.6))]).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = PortfolioSnapshot::default();
        assert!(snapshot.is_empty());
        let breakdown = snapshot.breakdown(&rates()).unwrap();
        assert_eq!(breakdown.total, Decimal::ZERO);
    }

    #[test]
    fn test_breakdown_components() {
        let snapshot = PortfolioSnapshot {
            holdings: vec![
                Holding::new("cash", Category::Cash, dec!(1000)),
                Holding::new("card", Category::Liabilities, dec!(200)),
            ],
            properties: vec![Property {
                id: "re_1".to_string(),
                name: "Flat".to_string(),
                address: String::new(),
                country: String::new(),
                purchase_date: None,
                purchase_price: dec!(1_000_000),
                current_value: dec!(1_800_000),
                currency: CurrencyCode::new("NIS"),
                mortgage_balance: dec!(720_000),
                mortgage_rate: dec!(4),
                monthly_rent: Decimal::ZERO,
                monthly_expenses: Decimal::ZERO,
                appreciation_assumption: Decimal::ZERO,
            }],
            equities: vec![EquityPosition {
                ticker: "VTI".to_string(),
                name: String::new(),
                quantity: dec!(10),
                cost_basis: dec!(195),
                current_price: dec!(250),
                currency: CurrencyCode::usd(),
                as_of_date: None,
            }],
            grants: vec![EquityGrant::new(
                "grant_1",
                "RSU-1",
                NaiveDate::from_ymd_opt(2022, 3, 15).unwrap(),
                400,
                300,
            )],
            vest_events: Vec::new(),
            family_office: vec![FamilyOfficeHolding {
                id: "fo_1".to_string(),
                category: FamilyOfficeCategory::Bonds,
                description: String::new(),
                value: dec!(5000),
                currency: CurrencyCode::usd(),
                as_of_date: None,
            }],
            equity_price: dec!(100),
        };

        let b = snapshot.breakdown(&rates()).unwrap();
        assert_eq!(b.tracked_net_worth, dec!(800));
        assert_eq!(b.real_estate_equity, dec!(300000));
        assert_eq!(b.self_managed_equities, dec!(2500));
        assert_eq!(b.vested_equity, dec!(30000));
        assert_eq!(b.family_office, dec!(5000));
        assert_eq!(b.total, dec!(338300));
    }

    #[test]
    fn test_breakdown_unknown_currency() {
        let mut snapshot = PortfolioSnapshot::default();
        snapshot.family_office.push(FamilyOfficeHolding {
            id: "fo_1".to_string(),
            category: FamilyOfficeCategory::Cash,
            description: String::new(),
            value: dec!(1),
            currency: CurrencyCode::new("CHF"),
            as_of_date: None,
        });
        assert!(snapshot.breakdown(&rates()).is_err());
    }
}
