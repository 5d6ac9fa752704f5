use crate::core::currency::{CurrencyCode, ExchangeRateTable};
use crate::core::error::ValuationError;
use crate::core::holding::{Category, Holding};
use crate::valuation::classify::classify;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net worth totals over a set of holdings, in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthSummary {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    /// Assets minus liabilities. May be negative.
    pub net_worth: Decimal,
    /// Totals per asset category. Never contains `Liabilities`.
    pub by_category: BTreeMap<Category, Decimal>,
    pub liquid_total: Decimal,
    pub illiquid_total: Decimal,
}

impl NetWorthSummary {
    /// Net worth expressed in another currency of `rates`.
    pub fn net_worth_in(
        &self,
        rates: &ExchangeRateTable,
        currency: &CurrencyCode,
    ) -> Result<Decimal, ValuationError> {
        rates.from_base(self.net_worth, currency)
    }

    pub fn category_total(&self, category: Category) -> Decimal {
        self.by_category
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Share of total assets held in `category`, as a percentage.
    pub fn allocation_percent(&self, category: Category) -> f64 {
        if self.total_assets == Decimal::ZERO {
            return 0.0;
        }
        let pct = self.category_total(category) * Decimal::ONE_HUNDRED / self.total_assets;
        pct.to_f64().unwrap_or(0.0)
    }
}

/// Sum holdings into assets, liabilities, categories and liquidity buckets.
///
/// An empty list yields all-zero totals and an empty category map.
pub fn aggregate(holdings: &[Holding]) -> NetWorthSummary {
    let classified = classify(holdings);

    let mut by_category: BTreeMap<Category, Decimal> = BTreeMap::new();
    let mut total_assets = Decimal::ZERO;
    for holding in &classified.assets {
        total_assets += holding.value_in_base();
        *by_category
            .entry(holding.category())
            .or_insert(Decimal::ZERO) += holding.value_in_base();
    }

    let total_liabilities: Decimal = classified
        .liabilities
        .iter()
        .map(|h| h.value_in_base())
        .sum();
    let liquid_total: Decimal = classified.liquid.iter().map(|h| h.value_in_base()).sum();
    let illiquid_total: Decimal = classified.illiquid.iter().map(|h| h.value_in_base()).sum();

    NetWorthSummary {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
        by_category,
        liquid_total,
        illiquid_total,
    }
}

impl std::fmt::Display for NetWorthSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Net Worth ===")?;
        writeln!(f, "Total Assets:      {}", self.total_assets)?;
        writeln!(f, "Total Liabilities: {}", self.total_liabilities)?;
        writeln!(f, "Net Worth:         {}", self.net_worth)?;
        writeln!(f, "Liquid:            {}", self.liquid_total)?;
        writeln!(f, "Illiquid:          {}", self.illiquid_total)?;

        writeln!(f, "\nBy Category:")?;
        for (category, total) in &self.by_category {
            writeln!(
                f,
                "  {:<12} {} ({:.1}%)",
                category.label(),
                total,
                self.allocation_percent(*category)
            )?;
        }
        Ok(())
    }
}
