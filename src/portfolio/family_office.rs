use crate::core::currency::{CurrencyCode, ExchangeRateTable};
use crate::core::error::ValuationError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FamilyOfficeCategory {
    Cash,
    Bonds,
    Funds,
    Alternatives,
}

/// A line from a family-office statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyOfficeHolding {
    pub id: String,
    pub category: FamilyOfficeCategory,
    #[serde(default)]
    pub description: String,
    pub value: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub as_of_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyOfficeTotals {
    pub by_category: BTreeMap<FamilyOfficeCategory, Decimal>,
    pub total: Decimal,
}

/// Convert every holding to base and total per category.
///
/// Fails if any holding's currency is missing from `rates`.
pub fn family_office_totals(
    holdings: &[FamilyOfficeHolding],
    rates: &ExchangeRateTable,
) -> Result<FamilyOfficeTotals, ValuationError> {
    let mut totals = FamilyOfficeTotals::default();
    for holding in holdings {
        let in_base = rates.to_base(holding.value, &holding.currency)?;
        *totals
            .by_category
            .entry(holding.category)
            .or_insert(Decimal::ZERO) += in_base;
        totals.total += in_base;
    }
    Ok(totals)
}
