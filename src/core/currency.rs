use crate::core::error::ValuationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ISO 4217-style currency code.
///
/// Codes are compared verbatim, so `NIS` and `ILS` are distinct
/// unless both are present in the rate table.
///
/// # Examples
///
/// ```
/// use networth_engine::core::currency::CurrencyCode;
///
/// let usd = CurrencyCode::new("USD");
/// let nis = CurrencyCode::new("NIS");
/// assert_ne!(usd, nis);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The default base currency all aggregates are expressed in.
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Exchange rate table quoted against a single base currency.
///
/// Each entry is "units of currency per 1 unit of base", so
/// `NIS: 3.60` means 3.60 NIS buy 1 USD. The base currency always
/// maps to exactly 1 and every rate is strictly positive.
///
/// # Examples
///
/// ```
/// use networth_engine::core::currency::{CurrencyCode, ExchangeRateTable};
/// use rust_decimal_macros::dec;
///
/// let mut rates = ExchangeRateTable::new(CurrencyCode::usd());
/// rates.set_rate(CurrencyCode::new("NIS"), dec!(3.6)).unwrap();
///
/// let usd = rates.to_base(dec!(360), &CurrencyCode::new("NIS")).unwrap();
/// assert_eq!(usd, dec!(100));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateTableRepr", into = "RateTableRepr")]
pub struct ExchangeRateTable {
    base_currency: CurrencyCode,
    rates: BTreeMap<CurrencyCode, Decimal>,
}

#[derive(Serialize, Deserialize)]
struct RateTableRepr {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl TryFrom<RateTableRepr> for ExchangeRateTable {
    type Error = ValuationError;

    fn try_from(repr: RateTableRepr) -> Result<Self, Self::Error> {
        ExchangeRateTable::from_rates(repr.base, repr.rates)
    }
}

impl From<ExchangeRateTable> for RateTableRepr {
    fn from(table: ExchangeRateTable) -> Self {
        RateTableRepr {
            base: table.base_currency,
            rates: table.rates,
        }
    }
}

impl ExchangeRateTable {
    /// Create a table containing only the base currency.
    pub fn new(base_currency: CurrencyCode) -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(base_currency.clone(), Decimal::ONE);
        Self {
            base_currency,
            rates,
        }
    }

    /// Build a table from a list of rates, validating every entry.
    pub fn from_rates(
        base_currency: CurrencyCode,
        rates: impl IntoIterator<Item = (CurrencyCode, Decimal)>,
    ) -> Result<Self, ValuationError> {
        let mut table = Self::new(base_currency);
        for (currency, rate) in rates {
            table.set_rate(currency, rate)?;
        }
        Ok(table)
    }

    pub fn base_currency(&self) -> &CurrencyCode {
        &self.base_currency
    }

    /// Set the rate for `currency`: `rate` units of it equal 1 base unit.
    ///
    /// The base currency only accepts a rate of exactly 1.
    pub fn set_rate(&mut self, currency: CurrencyCode, rate: Decimal) -> Result<(), ValuationError> {
        if rate <= Decimal::ZERO || (currency == self.base_currency && rate != Decimal::ONE) {
            return Err(ValuationError::InvalidRate { currency, rate });
        }
        self.rates.insert(currency, rate);
        Ok(())
    }

    /// Units of `currency` per 1 unit of base.
    pub fn rate(&self, currency: &CurrencyCode) -> Result<Decimal, ValuationError> {
        if *currency == self.base_currency {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| ValuationError::UnknownCurrency {
                currency: currency.clone(),
            })
    }

    /// Convert an amount denominated in `currency` into the base currency.
    pub fn to_base(&self, amount: Decimal, currency: &CurrencyCode) -> Result<Decimal, ValuationError> {
        if *currency == self.base_currency {
            return Ok(amount);
        }
        let rate = self.rate(currency)?;
        Ok(amount / rate)
    }

    /// Convert a base-currency amount into `currency`.
    pub fn from_base(&self, amount: Decimal, currency: &CurrencyCode) -> Result<Decimal, ValuationError> {
        if *currency == self.base_currency {
            return Ok(amount);
        }
        let rate = self.rate(currency)?;
        Ok(amount * rate)
    }

    pub fn contains(&self, currency: &CurrencyCode) -> bool {
        self.rates.contains_key(currency)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.keys()
    }
}

/// Convert `amount` in `currency` to the base currency of `rates`.
pub fn to_base(
    amount: Decimal,
    currency: &CurrencyCode,
    rates: &ExchangeRateTable,
) -> Result<Decimal, ValuationError> {
    rates.to_base(amount, currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn nis_table() -> ExchangeRateTable {
        let mut table = ExchangeRateTable::new(CurrencyCode::usd());
        table.set_rate(CurrencyCode::new("NIS"), dec!(3.6)).unwrap();
        table
    }

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("USD");
        let b = CurrencyCode::usd();
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_base_nis() {
        let table = nis_table();
        let usd = to_base(dec!(360), &CurrencyCode::new("NIS"), &table).unwrap();
        assert_eq!(usd, dec!(100));
    }

    #[test]
    fn test_to_base_identity() {
        let table = nis_table();
        let usd = table.to_base(dec!(1234.56), &CurrencyCode::usd()).unwrap();
        assert_eq!(usd, dec!(1234.56));
    }

    #[test]
    fn test_from_base() {
        let table = nis_table();
        let nis = table.from_base(dec!(2500), &CurrencyCode::new("NIS")).unwrap();
        assert_eq!(nis, dec!(9000));
    }

    #[test]
    fn test_unknown_currency() {
        let table = nis_table();
        let err = table.to_base(dec!(10), &CurrencyCode::new("GBP")).unwrap_err();
        assert_eq!(
            err,
            ValuationError::UnknownCurrency {
                currency: CurrencyCode::new("GBP")
            }
        );
    }

    #[test]
    fn test_invalid_rate() {
        let mut table = ExchangeRateTable::new(CurrencyCode::usd());
        assert!(table.set_rate(CurrencyCode::new("EUR"), dec!(0)).is_err());
        assert!(table.set_rate(CurrencyCode::new("EUR"), dec!(-0.9)).is_err());
        assert!(!table.contains(&CurrencyCode::new("EUR")));
    }

    #[test]
    fn test_base_rate_must_be_one() {
        let mut table = ExchangeRateTable::new(CurrencyCode::usd());
        assert!(table.set_rate(CurrencyCode::usd(), dec!(2)).is_err());
        assert!(table.set_rate(CurrencyCode::usd(), dec!(1)).is_ok());
        assert_eq!(table.rate(&CurrencyCode::usd()).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_deserialize_rejects_non_positive_rate() {
        let json = r#"{"base":"USD","rates":{"NIS":"3.6","EUR":"-1"}}"#;
        let parsed: Result<ExchangeRateTable, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_deserialize_valid_table() {
        let json = r#"{"base":"USD","rates":{"NIS":"3.6","EUR":"0.92"}}"#;
        let table: ExchangeRateTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.rate(&CurrencyCode::new("EUR")).unwrap(), dec!(0.92));
        assert!(table.contains(&CurrencyCode::usd()));
    }
}
