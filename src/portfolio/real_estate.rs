use crate::core::currency::CurrencyCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// A directly held property, optionally mortgaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: String,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub mortgage_balance: Decimal,
    /// Annual mortgage rate in percent.
    #[serde(default)]
    pub mortgage_rate: Decimal,
    #[serde(default)]
    pub monthly_rent: Decimal,
    #[serde(default)]
    pub monthly_expenses: Decimal,
    /// Expected annual appreciation in percent.
    #[serde(default)]
    pub appreciation_assumption: Decimal,
}

impl Property {
    pub fn net_equity(&self) -> Decimal {
        self.current_value - self.mortgage_balance
    }

    /// Interest-only monthly mortgage cost.
    pub fn monthly_mortgage_interest(&self) -> Decimal {
        self.mortgage_balance * self.mortgage_rate / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
    }

    pub fn net_monthly_cashflow(&self) -> Decimal {
        self.monthly_rent - self.monthly_expenses - self.monthly_mortgage_interest()
    }

    pub fn unrealized_gain(&self) -> Decimal {
        self.current_value - self.purchase_price
    }
}

/// Totals across a set of properties, in their own currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealEstateTotals {
    pub total_value: Decimal,
    pub total_equity: Decimal,
    pub total_mortgage: Decimal,
}

pub fn summarize_properties(properties: &[Property]) -> RealEstateTotals {
    properties
        .iter()
        .fold(RealEstateTotals::default(), |acc, p| RealEstateTotals {
            total_value: acc.total_value + p.current_value,
            total_equity: acc.total_equity + p.net_equity(),
            total_mortgage: acc.total_mortgage + p.mortgage_balance,
        })
}
