use crate::core::currency::CurrencyCode;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A self-managed stock or ETF position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPosition {
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    pub quantity: Decimal,
    /// Average cost per share.
    pub cost_basis: Decimal,
    pub current_price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub as_of_date: Option<NaiveDate>,
}

impl EquityPosition {
    pub fn market_value(&self) -> Decimal {
        self.quantity * self.current_price
    }

    pub fn cost_value(&self) -> Decimal {
        self.quantity * self.cost_basis
    }

    pub fn gain_loss(&self) -> Decimal {
        self.market_value() - self.cost_value()
    }

    pub fn gain_loss_percent(&self) -> f64 {
        percent_of(self.gain_loss(), self.cost_value())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityTotals {
    pub market_value: Decimal,
    pub cost_basis: Decimal,
    pub gain_loss: Decimal,
}

impl EquityTotals {
    pub fn gain_loss_percent(&self) -> f64 {
        percent_of(self.gain_loss, self.cost_basis)
    }
}

pub fn summarize_positions(positions: &[EquityPosition]) -> EquityTotals {
    positions
        .iter()
        .fold(EquityTotals::default(), |acc, p| EquityTotals {
            market_value: acc.market_value + p.market_value(),
            cost_basis: acc.cost_basis + p.cost_value(),
            gain_loss: acc.gain_loss + p.gain_loss(),
        })
}

fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole == Decimal::ZERO {
        return 0.0;
    }
    (part * Decimal::ONE_HUNDRED / whole).to_f64().unwrap_or(0.0)
}
