use crate::core::currency::CurrencyCode;
use crate::core::holding::Category;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the valuation engine.
///
/// Every operation either fully succeeds or fails with one of these;
/// no partial results are returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    #[error("no exchange rate available for {currency}")]
    UnknownCurrency { currency: CurrencyCode },

    #[error("exchange rate must be positive, got {rate} for {currency}")]
    InvalidRate { currency: CurrencyCode, rate: Decimal },

    #[error("price adjustment must be at least -100%, got {percent}%")]
    InvalidAdjustment { percent: Decimal },

    #[error("projected value exceeds the representable range at year {year_offset}")]
    ProjectionOverflow { year_offset: u32 },

    #[error("demo factor must be positive, got {factor}")]
    InvalidDemoFactor { factor: Decimal },

    #[error("subtype '{subtype}' is not allowed for category {category}")]
    UnknownSubtype { category: Category, subtype: String },

    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: Decimal },

    #[error("{field} is required")]
    MissingField { field: &'static str },
}
