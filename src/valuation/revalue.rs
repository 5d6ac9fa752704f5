//! Live revaluation of holdings.
//!
//! Holdings keep the base value frozen at entry time. Revaluation is an
//! explicit opt-in that re-derives every base value from the original
//! amount under a newer rate table.

use crate::core::currency::ExchangeRateTable;
use crate::core::error::ValuationError;
use crate::core::holding::Holding;

/// Re-derive `value_in_base` for every holding under `rates`.
///
/// Fails on the first holding whose currency is missing from `rates`;
/// nothing is returned in that case.
pub fn revalue(holdings: &[Holding], rates: &ExchangeRateTable) -> Result<Vec<Holding>, ValuationError> {
    let revalued = holdings
        .iter()
        .map(|h| h.revalue_with(rates))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "revalued {} holdings against base {}",
        revalued.len(),
        rates.base_currency()
    );
    Ok(revalued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use crate::core::holding::Category;
    use crate::valuation::aggregate::aggregate;
    use rust_decimal_macros::dec;

    fn rates(nis: rust_decimal::Decimal) -> ExchangeRateTable {
        ExchangeRateTable::from_rates(CurrencyCode::usd(), [(CurrencyCode::new("NIS"), nis)]).unwrap()
    }

    #[test]
    fn test_revalue_moves_foreign_holdings_only() {
        let holdings = vec![
            Holding::new("usd cash", Category::Cash, dec!(500)),
            Holding::new("nis cash", Category::Cash, dec!(1000))
                .with_original(CurrencyCode::new("NIS"), dec!(3600)),
        ];

        let revalued = revalue(&holdings, &rates(dec!(4))).unwrap();
        assert_eq!(revalued[0].value_in_base(), dec!(500));
        assert_eq!(revalued[1].value_in_base(), dec!(900));

        assert_eq!(aggregate(&holdings).total_assets, dec!(1500));
        assert_eq!(aggregate(&revalued).total_assets, dec!(1400));
    }

    #[test]
    fn test_revalue_unknown_currency_is_atomic() {
        let holdings = vec![
            Holding::new("nis", Category::Cash, dec!(10)).with_original(CurrencyCode::new("NIS"), dec!(36)),
            Holding::new("gbp", Category::Cash, dec!(10)).with_original(CurrencyCode::new("GBP"), dec!(8)),
        ];
        assert!(revalue(&holdings, &rates(dec!(3.6))).is_err());
    }
}
