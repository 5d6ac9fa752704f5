use crate::core::catalog::SubtypeCatalog;
use crate::core::currency::{CurrencyCode, ExchangeRateTable};
use crate::core::error::ValuationError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a tracked holding, as assigned by the data store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldingId(String);

impl HoldingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random identifier for records created locally.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HoldingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HoldingId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Top-level bucket a holding is reported under.
///
/// `Liabilities` subtract from net worth; every other category adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Cash,
    Securities,
    #[serde(rename = "Real Estate", alias = "RealEstate")]
    RealEstate,
    Liabilities,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Cash,
        Category::Securities,
        Category::RealEstate,
        Category::Liabilities,
    ];

    pub fn is_liability(self) -> bool {
        self == Category::Liabilities
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Cash => "Cash",
            Category::Securities => "Securities",
            Category::RealEstate => "Real Estate",
            Category::Liabilities => "Liabilities",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Liquidity {
    #[default]
    Liquid,
    Illiquid,
}

/// A tracked asset or liability.
///
/// `value_in_base` is the original value converted through whatever rate
/// table was active when the holding was last saved. It is cached and is
/// not re-derived on read; see [`Holding::revalue_with`] for an explicit
/// re-derivation.
///
/// # Examples
///
/// ```
/// use networth_engine::core::holding::{Category, Holding};
/// use rust_decimal_macros::dec;
///
/// let cash = Holding::new("Checking", Category::Cash, dec!(1000));
/// assert_eq!(cash.value_in_base(), dec!(1000));
/// assert!(!cash.category().is_liability());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    id: HoldingId,
    name: String,
    category: Category,
    #[serde(default)]
    subtype: String,
    #[serde(default)]
    currency: CurrencyCode,
    original_value: Decimal,
    value_in_base: Decimal,
    #[serde(default)]
    liquidity: Liquidity,
    updated_at: DateTime<Utc>,
}

impl Holding {
    /// Create a holding already denominated in the base currency.
    ///
    /// # Panics
    ///
    /// Panics if `value_in_base` is negative.
    pub fn new(name: impl Into<String>, category: Category, value_in_base: Decimal) -> Self {
        assert!(
            value_in_base >= Decimal::ZERO,
            "Holding value must not be negative, got {}",
            value_in_base
        );
        Self {
            id: HoldingId::generate(),
            name: name.into(),
            category,
            subtype: String::new(),
            currency: CurrencyCode::usd(),
            original_value: value_in_base,
            value_in_base,
            liquidity: Liquidity::Liquid,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<HoldingId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = subtype.into();
        self
    }

    pub fn with_liquidity(mut self, liquidity: Liquidity) -> Self {
        self.liquidity = liquidity;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Record the value as originally entered in a foreign currency.
    ///
    /// Leaves `value_in_base` untouched: the cached base value is whatever
    /// was computed at save time.
    ///
    /// # Panics
    ///
    /// Panics if `original_value` is negative.
    pub fn with_original(mut self, currency: CurrencyCode, original_value: Decimal) -> Self {
        assert!(
            original_value >= Decimal::ZERO,
            "Holding value must not be negative, got {}",
            original_value
        );
        self.currency = currency;
        self.original_value = original_value;
        self
    }

    /// Re-derive `value_in_base` from the original value under `rates`.
    pub fn revalue_with(&self, rates: &ExchangeRateTable) -> Result<Holding, ValuationError> {
        let value_in_base = rates.to_base(self.original_value, &self.currency)?;
        Ok(Holding {
            value_in_base,
            ..self.clone()
        })
    }

    // --- Accessors ---

    pub fn id(&self) -> &HoldingId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn original_value(&self) -> Decimal {
        self.original_value
    }

    pub fn value_in_base(&self) -> Decimal {
        self.value_in_base
    }

    pub fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn scale_values(&self, factor: Decimal) -> Holding {
        Holding {
            original_value: self.original_value * factor,
            value_in_base: self.value_in_base * factor,
            ..self.clone()
        }
    }
}

/// Unvalidated holding fields as captured by an entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingDraft {
    #[serde(default)]
    pub id: Option<HoldingId>,
    pub name: String,
    pub category: Option<Category>,
    pub subtype: String,
    pub currency: CurrencyCode,
    pub original_value: Decimal,
    #[serde(default)]
    pub liquidity: Liquidity,
}

impl HoldingDraft {
    /// Validate the draft and freeze its base value under `rates`.
    ///
    /// The base value is computed once here; later rate changes do not
    /// touch it.
    pub fn into_holding(
        self,
        rates: &ExchangeRateTable,
        catalog: &SubtypeCatalog,
    ) -> Result<Holding, ValuationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValuationError::MissingField { field: "name" });
        }
        let category = self
            .category
            .ok_or(ValuationError::MissingField { field: "category" })?;
        if self.subtype.trim().is_empty() {
            return Err(ValuationError::MissingField { field: "subtype" });
        }
        catalog.validate(category, &self.subtype)?;
        if self.original_value < Decimal::ZERO {
            return Err(ValuationError::NegativeValue {
                field: "originalValue",
                value: self.original_value,
            });
        }

        let value_in_base = rates.to_base(self.original_value, &self.currency)?;

        Ok(Holding {
            id: self.id.unwrap_or_else(HoldingId::generate),
            name: name.to_string(),
            category,
            subtype: self.subtype,
            currency: self.currency,
            original_value: self.original_value,
            value_in_base,
            liquidity: self.liquidity,
            updated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rates() -> ExchangeRateTable {
        let mut table = ExchangeRateTable::new(CurrencyCode::usd());
        table.set_rate(CurrencyCode::new("NIS"), dec!(3.6)).unwrap();
        table
    }

    fn draft() -> HoldingDraft {
        HoldingDraft {
            id: None,
            name: "  Leumi checking ".to_string(),
            category: Some(Category::Cash),
            subtype: "Leumi".to_string(),
            currency: CurrencyCode::new("NIS"),
            original_value: dec!(36000),
            liquidity: Liquidity::Liquid,
        }
    }

    #[test]
    fn test_holding_creation() {
        let h = Holding::new("Brokerage", Category::Securities, dec!(2000))
            .with_subtype("Excellence")
            .with_liquidity(Liquidity::Illiquid);
        assert_eq!(h.name(), "Brokerage");
        assert_eq!(h.category(), Category::Securities);
        assert_eq!(h.subtype(), "Excellence");
        assert_eq!(h.currency(), &CurrencyCode::usd());
        assert_eq!(h.original_value(), dec!(2000));
        assert_eq!(h.liquidity(), Liquidity::Illiquid);
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn test_holding_negative_value() {
        Holding::new("Broken", Category::Cash, dec!(-1));
    }

    #[test]
    fn test_draft_freezes_base_value() {
        let holding = draft().into_holding(&rates(), &SubtypeCatalog::default()).unwrap();
        assert_eq!(holding.name(), "Leumi checking");
        assert_eq!(holding.original_value(), dec!(36000));
        assert_eq!(holding.value_in_base(), dec!(10000));

        // A later rate change does not move the cached value.
        let mut newer = rates();
        newer.set_rate(CurrencyCode::new("NIS"), dec!(4)).unwrap();
        assert_eq!(holding.value_in_base(), dec!(10000));

        let revalued = holding.revalue_with(&newer).unwrap();
        assert_eq!(revalued.value_in_base(), dec!(9000));
        assert_eq!(revalued.id(), holding.id());
    }

    #[test]
    fn test_draft_rejects_unknown_subtype() {
        let mut d = draft();
        d.subtype = "Dubai".to_string();
        let err = d.into_holding(&rates(), &SubtypeCatalog::default()).unwrap_err();
        assert!(matches!(err, ValuationError::UnknownSubtype { .. }));
    }

    #[test]
    fn test_draft_rejects_missing_fields() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(
            d.into_holding(&rates(), &SubtypeCatalog::default()).unwrap_err(),
            ValuationError::MissingField { field: "name" }
        );

        let mut d = draft();
        d.category = None;
        assert_eq!(
            d.into_holding(&rates(), &SubtypeCatalog::default()).unwrap_err(),
            ValuationError::MissingField { field: "category" }
        );
    }

    #[test]
    fn test_draft_rejects_negative_value() {
        let mut d = draft();
        d.original_value = dec!(-5);
        let err = d.into_holding(&rates(), &SubtypeCatalog::default()).unwrap_err();
        assert!(matches!(err, ValuationError::NegativeValue { .. }));
    }

    #[test]
    fn test_draft_unknown_currency_propagates() {
        let mut d = draft();
        d.currency = CurrencyCode::new("GBP");
        let err = d.into_holding(&rates(), &SubtypeCatalog::default()).unwrap_err();
        assert!(matches!(err, ValuationError::UnknownCurrency { .. }));
    }

    #[test]
    fn test_category_serde_label() {
        let json = serde_json::to_string(&Category::RealEstate).unwrap();
        assert_eq!(json, "\"Real Estate\"");
        let parsed: Category = serde_json::from_str("\"RealEstate\"").unwrap();
        assert_eq!(parsed, Category::RealEstate);
    }
}
