use chrono::NaiveDate;
use networth_engine::core::currency::{to_base, CurrencyCode, ExchangeRateTable};
use networth_engine::core::equity::EquityGrant;
use networth_engine::core::error::ValuationError;
use networth_engine::core::holding::{Category, Holding, Liquidity};
use networth_engine::projection::growth::project;
use networth_engine::projection::vesting::{aggregate_vesting, vesting_summary};
use networth_engine::valuation::aggregate::aggregate;
use networth_engine::valuation::classify::classify;
use networth_engine::valuation::demo::DemoScale;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Generate a random category, liabilities included.
fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn arb_liquidity() -> impl Strategy<Value = Liquidity> {
    prop::sample::select(vec![Liquidity::Liquid, Liquidity::Illiquid])
}

/// Generate a random non-negative value in cents (0 to 100,000,000.00).
fn arb_value() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_holding() -> impl Strategy<Value = Holding> {
    (arb_category(), arb_liquidity(), arb_value()).prop_map(|(category, liquidity, value)| {
        Holding::new("generated", category, value).with_liquidity(liquidity)
    })
}

/// Generate a random holdings list of 0..60 holdings.
fn arb_holdings() -> impl Strategy<Value = Vec<Holding>> {
    prop::collection::vec(arb_holding(), 0..60)
}

/// Generate a positive rate with four decimal places (0.0001 to 100).
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|r| Decimal::new(r, 4))
}

fn arb_grant() -> impl Strategy<Value = EquityGrant> {
    (1u64..100_000u64)
        .prop_flat_map(|total| (Just(total), 0..=total))
        .prop_map(|(total, vested)| {
            EquityGrant::new(
                "grant",
                "RSU",
                NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
                total,
                vested,
            )
        })
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Net worth is exactly assets minus liabilities.
    // ===================================================================
    #[test]
    fn net_worth_is_assets_minus_liabilities(holdings in arb_holdings()) {
        let summary = aggregate(&holdings);
        prop_assert_eq!(summary.total_assets - summary.total_liabilities, summary.net_worth);
    }

    // ===================================================================
    // INVARIANT 2: Categories partition the assets bucket exactly.
    // ===================================================================
    #[test]
    fn categories_sum_to_total_assets(holdings in arb_holdings()) {
        let summary = aggregate(&holdings);
        let sum: Decimal = summary.by_category.values().copied().sum();
        prop_assert_eq!(sum, summary.total_assets);
        prop_assert!(!summary.by_category.contains_key(&Category::Liabilities));
    }

    // ===================================================================
    // INVARIANT 3: Liquidity partitions the assets bucket exactly.
    // ===================================================================
    #[test]
    fn liquidity_sums_to_total_assets(holdings in arb_holdings()) {
        let summary = aggregate(&holdings);
        prop_assert_eq!(summary.liquid_total + summary.illiquid_total, summary.total_assets);
    }

    // ===================================================================
    // INVARIANT 4: Classification never drops or duplicates a holding.
    // ===================================================================
    #[test]
    fn classify_preserves_count(holdings in arb_holdings()) {
        let classified = classify(&holdings);
        prop_assert_eq!(classified.assets.len() + classified.liabilities.len(), holdings.len());
        prop_assert_eq!(
            classified.liquid.len() + classified.illiquid.len(),
            classified.assets.len()
        );
    }

    // ===================================================================
    // INVARIANT 5: Converting the base currency is the identity.
    // ===================================================================
    #[test]
    fn base_conversion_is_identity(amount in arb_value(), rate in arb_rate()) {
        let rates = ExchangeRateTable::from_rates(
            CurrencyCode::usd(),
            [(CurrencyCode::new("NIS"), rate)],
        ).unwrap();
        prop_assert_eq!(to_base(amount, &CurrencyCode::usd(), &rates).unwrap(), amount);
    }

    // ===================================================================
    // INVARIANT 6: Zero-year projection is the start value alone.
    // ===================================================================
    #[test]
    fn zero_year_projection(start in arb_value(), rate in arb_rate()) {
        let points = project(start, rate / Decimal::ONE_HUNDRED, 0).unwrap();
        prop_assert_eq!(points.len(), 1);
        prop_assert_eq!(points[0].projected_value, start);
    }

    // ===================================================================
    // INVARIANT 7: Zero growth is a flat line of years + 1 points.
    // ===================================================================
    #[test]
    fn zero_growth_is_flat(start in arb_value(), years in 0u32..50) {
        let points = project(start, Decimal::ZERO, years).unwrap();
        prop_assert_eq!(points.len(), years as usize + 1);
        for (k, point) in points.iter().enumerate() {
            prop_assert_eq!(point.year_offset as usize, k);
            prop_assert_eq!(point.projected_value, start);
        }
    }

    // ===================================================================
    // INVARIANT 8: Positive growth never decreases a positive start value.
    // ===================================================================
    #[test]
    fn positive_growth_is_monotonic(cents in 1i64..1_000_000_000i64, pct in 1i64..2000i64, years in 1u32..30) {
        let points = project(Decimal::new(cents, 2), Decimal::new(pct, 4), years).unwrap();
        for pair in points.windows(2) {
            prop_assert!(pair[1].projected_value >= pair[0].projected_value);
        }
    }

    // ===================================================================
    // INVARIANT 9: Long horizons either fit or report the failing year.
    // ===================================================================
    #[test]
    fn long_horizon_never_panics(
        cents in -10_000_000_000i64..10_000_000_000i64,
        pct in 0i64..10_000i64,
        years in 0u32..1000,
    ) {
        match project(Decimal::new(cents, 2), Decimal::new(pct, 4), years) {
            Ok(points) => prop_assert_eq!(points.len(), years as usize + 1),
            Err(ValuationError::ProjectionOverflow { year_offset }) => {
                prop_assert!(year_offset >= 1 && year_offset <= years);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    // ===================================================================
    // INVARIANT 10: Demo scaling commutes with aggregation.
    // ===================================================================
    #[test]
    fn demo_scaling_commutes(holdings in arb_holdings(), factor in 1000i64..2000i64) {
        let scale = DemoScale::with_factor(Decimal::new(factor, 2));
        prop_assert_eq!(scale.apply(&aggregate(&holdings)), aggregate(&scale.apply(&holdings)));
    }

    // ===================================================================
    // INVARIANT 11: Vest progress stays within [0, 100].
    // ===================================================================
    #[test]
    fn vest_progress_in_range(grant in arb_grant(), price_cents in 0i64..100_000i64) {
        let summary = vesting_summary(&grant, Decimal::new(price_cents, 2));
        prop_assert!(summary.vest_progress_percent >= Decimal::ZERO);
        prop_assert!(summary.vest_progress_percent <= Decimal::ONE_HUNDRED);
        prop_assert_eq!(
            summary.vested_value + summary.unvested_value,
            Decimal::from(grant.total_shares) * Decimal::new(price_cents, 2)
        );
    }

    // ===================================================================
    // INVARIANT 12: Aggregated share counts stay consistent.
    // ===================================================================
    #[test]
    fn aggregated_shares_consistent(grants in prop::collection::vec(arb_grant(), 0..20)) {
        let totals = aggregate_vesting(&grants);
        prop_assert_eq!(totals.vested_shares + totals.unvested_shares, totals.total_shares);
    }
}
