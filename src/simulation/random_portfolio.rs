//! Random portfolio generation for benchmarks and sample data.

use crate::core::catalog::SubtypeCatalog;
use crate::core::currency::{CurrencyCode, ExchangeRateTable};
use crate::core::error::ValuationError;
use crate::core::holding::{Category, Holding, HoldingDraft, Liquidity};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random set of holdings.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub holding_count: usize,
    /// Currencies to draw from; each must be present in the rate table.
    pub currencies: Vec<CurrencyCode>,
    /// Probability that a generated holding is a liability.
    pub liability_ratio: f64,
    /// Probability that a generated asset is illiquid.
    pub illiquid_ratio: f64,
    /// Minimum original value, in whole currency units.
    pub min_value: u64,
    /// Maximum original value, in whole currency units.
    pub max_value: u64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            holding_count: 20,
            currencies: vec![CurrencyCode::usd()],
            liability_ratio: 0.2,
            illiquid_ratio: 0.3,
            min_value: 1_000,
            max_value: 2_000_000,
        }
    }
}

/// Generate random holdings through the normal entry path, so every
/// holding carries a catalog subtype and a base value frozen under `rates`.
pub fn generate_random_holdings<R: Rng + ?Sized>(
    rng: &mut R,
    config: &PortfolioConfig,
    rates: &ExchangeRateTable,
) -> Result<Vec<Holding>, ValuationError> {
    let catalog = SubtypeCatalog::default();
    let asset_categories = [Category::Cash, Category::Securities, Category::RealEstate];
    let mut holdings = Vec::with_capacity(config.holding_count);

    for i in 0..config.holding_count {
        let category = if rng.gen_bool(config.liability_ratio.clamp(0.0, 1.0)) {
            Category::Liabilities
        } else {
            asset_categories[rng.gen_range(0..asset_categories.len())]
        };
        let subtypes = catalog.subtypes(category);
        let subtype = subtypes[rng.gen_range(0..subtypes.len())].clone();

        let liquidity = if rng.gen_bool(config.illiquid_ratio.clamp(0.0, 1.0)) {
            Liquidity::Illiquid
        } else {
            Liquidity::Liquid
        };

        let currency = if config.currencies.is_empty() {
            rates.base_currency().clone()
        } else {
            config.currencies[rng.gen_range(0..config.currencies.len())].clone()
        };

        let min_cents = config.min_value.saturating_mul(100);
        let max_cents = config.max_value.saturating_mul(100).max(min_cents + 1);
        let cents = rng.gen_range(min_cents..max_cents);

        let draft = HoldingDraft {
            id: None,
            name: format!("{} {:03}", subtype, i),
            category: Some(category),
            subtype,
            currency,
            original_value: Decimal::new(cents as i64, 2),
            liquidity,
        };
        holdings.push(draft.into_holding(rates, &catalog)?);
    }

    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::aggregate::aggregate;
    use crate::valuation::classify::classify;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn rates() -> ExchangeRateTable {
        ExchangeRateTable::from_rates(CurrencyCode::usd(), [(CurrencyCode::new("NIS"), dec!(3.6))]).unwrap()
    }

    #[test]
    fn test_random_holdings_generation() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = PortfolioConfig {
            holding_count: 50,
            currencies: vec![CurrencyCode::usd(), CurrencyCode::new("NIS")],
            ..Default::default()
        };

        let holdings = generate_random_holdings(&mut rng, &config, &rates()).unwrap();
        assert_eq!(holdings.len(), 50);
        assert_eq!(classify(&holdings).len(), 50);

        let summary = aggregate(&holdings);
        assert_eq!(summary.total_assets - summary.total_liabilities, summary.net_worth);
    }

    #[test]
    fn test_unknown_currency_in_config() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = PortfolioConfig {
            holding_count: 5,
            currencies: vec![CurrencyCode::new("GBP")],
            ..Default::default()
        };
        assert!(generate_random_holdings(&mut rng, &config, &rates()).is_err());
    }
}
