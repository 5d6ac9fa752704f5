//! Household net worth summary example.
//!
//! Enters holdings in two currencies, aggregates them, and adds the
//! property, brokerage and equity-grant sides of the household.

use chrono::NaiveDate;
use networth_engine::core::catalog::SubtypeCatalog;
use networth_engine::core::currency::{CurrencyCode, ExchangeRateTable};
use networth_engine::core::equity::EquityGrant;
use networth_engine::core::holding::{Category, HoldingDraft, Liquidity};
use networth_engine::portfolio::equities::{summarize_positions, EquityPosition};
use networth_engine::portfolio::real_estate::Property;
use networth_engine::portfolio::snapshot::PortfolioSnapshot;
use networth_engine::valuation::aggregate::aggregate;
use networth_engine::valuation::demo::DemoScale;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  networth-engine: Household Summary Example  ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let usd = CurrencyCode::usd();
    let nis = CurrencyCode::new("NIS");
    let rates = ExchangeRateTable::from_rates(usd.clone(), [(nis.clone(), dec!(3.6))])
        .expect("positive rate");
    let catalog = SubtypeCatalog::default();

    // --- Step 1: Enter holdings ---
    println!("━━━ Step 1: Holdings (1 USD = 3.6 NIS) ━━━\n");

    let entries = [
        ("Leumi checking", Category::Cash, "Leumi", nis.clone(), dec!(180_000), Liquidity::Liquid),
        ("Swiss account", Category::Cash, "Julius Baer", usd.clone(), dec!(250_000), Liquidity::Liquid),
        ("Take Two shares", Category::Securities, "Take Two Interactive", usd.clone(), dec!(420_000), Liquidity::Liquid),
        ("Dubai apartment", Category::RealEstate, "Dubai", usd.clone(), dec!(900_000), Liquidity::Illiquid),
        ("Credit card", Category::Liabilities, "Credit Card", nis.clone(), dec!(18_000), Liquidity::Liquid),
    ];

    let mut holdings = Vec::new();
    for (name, category, subtype, currency, value, liquidity) in entries {
        let draft = HoldingDraft {
            id: None,
            name: name.to_string(),
            category: Some(category),
            subtype: subtype.to_string(),
            currency: currency.clone(),
            original_value: value,
            liquidity,
        };
        let holding = draft.into_holding(&rates, &catalog).expect("valid entry");
        println!(
            "  {:<18} {:>12} {}  ->  {:>12} USD",
            holding.name(),
            value,
            currency,
            holding.value_in_base()
        );
        holdings.push(holding);
    }
    println!();

    // --- Step 2: Aggregate ---
    println!("━━━ Step 2: Aggregate ━━━\n");
    let summary = aggregate(&holdings);
    println!("{}", summary);
    for category in Category::ALL.iter().filter(|c| !c.is_liability()) {
        println!("  {:<12} {:>6.1}%", category, summary.allocation_percent(*category));
    }
    println!();

    // --- Step 3: Household breakdown ---
    println!("━━━ Step 3: Household Breakdown ━━━\n");
    let snapshot = PortfolioSnapshot {
        holdings,
        properties: vec![Property {
            id: "re_tlv".to_string(),
            name: "Tel Aviv Apartment".to_string(),
            address: "Rothschild Blvd".to_string(),
            country: "Israel".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2019, 6, 1),
            purchase_price: dec!(4_200_000),
            current_value: dec!(5_400_000),
            currency: nis.clone(),
            mortgage_balance: dec!(1_900_000),
            mortgage_rate: dec!(4.2),
            monthly_rent: dec!(9_500),
            monthly_expenses: dec!(1_200),
            appreciation_assumption: dec!(3),
        }],
        equities: vec![
            EquityPosition {
                ticker: "VTI".to_string(),
                name: "Vanguard Total Stock Market".to_string(),
                quantity: dec!(600),
                cost_basis: dec!(195),
                current_price: dec!(262.40),
                currency: usd.clone(),
                as_of_date: None,
            },
            EquityPosition {
                ticker: "BND".to_string(),
                name: "Vanguard Total Bond Market".to_string(),
                quantity: dec!(900),
                cost_basis: dec!(78),
                current_price: dec!(72.10),
                currency: usd.clone(),
                as_of_date: None,
            },
        ],
        grants: vec![EquityGrant::new(
            "grant_1",
            "RSU-2022-001",
            NaiveDate::from_ymd_opt(2022, 3, 15).expect("valid date"),
            400,
            300,
        )],
        equity_price: dec!(178.25),
        ..Default::default()
    };

    let property = &snapshot.properties[0];
    println!(
        "  {}: equity {} NIS, cashflow {} NIS/month",
        property.name,
        property.net_equity(),
        property.net_monthly_cashflow().round_dp(2)
    );
    let positions = summarize_positions(&snapshot.equities);
    println!(
        "  Brokerage: {} USD ({:+.2}%)\n",
        positions.market_value,
        positions.gain_loss_percent()
    );

    let breakdown = snapshot.breakdown(&rates).expect("all currencies known");
    println!("{}", breakdown);

    // --- Step 4: Demo mode ---
    println!("━━━ Step 4: Demo Mode ━━━\n");
    let scale = DemoScale::random(&mut rand::thread_rng());
    let shown = scale.apply(&breakdown);
    println!("  Factor: {}x", scale.factor());
    println!("  Displayed total: {}", shown.total);
    println!(
        "  Ratio preserved: {}",
        shown.total / scale.factor() == breakdown.total || breakdown.total == Decimal::ZERO
    );
}
