//! Scenario projection and vesting example.
//!
//! Projects a starting net worth under the three default scenarios and
//! values unvested equity at each scenario's adjusted price.

use chrono::NaiveDate;
use networth_engine::core::equity::{EquityGrant, VestEvent, VestStatus};
use networth_engine::core::scenario::{AssetClass, ScenarioSet};
use networth_engine::projection::growth::project_scenario;
use networth_engine::projection::vesting::{aggregate_vesting, scenario_vesting, upcoming_vests};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn main() {
    println!("╔════════════════════════════════════════════════╗");
    println!("║  networth-engine: Scenario Projection Example  ║");
    println!("╚════════════════════════════════════════════════╝\n");

    let scenarios = ScenarioSet::defaults();
    let start = dec!(2_500_000);
    let years = 20;

    // --- Projection under each scenario ---
    println!("━━━ {}-Year Projection from {} ━━━\n", years, start);
    println!("  {:<22} {:>8} {:>16} {:>16}", "Scenario", "Rate", "Year 10", "Year 20");
    for scenario in scenarios.iter() {
        let points = project_scenario(start, scenario, AssetClass::PublicEquities, years)
            .expect("projection in range");
        let rate = scenario
            .assumption_percent(AssetClass::PublicEquities)
            .unwrap_or_default();
        println!(
            "  {:<22} {:>7}% {:>16} {:>16}",
            scenario.name,
            rate,
            points[10].projected_value.round_dp(0),
            points[20].projected_value.round_dp(0)
        );
    }
    println!();

    // --- Equity grants under each scenario ---
    let grants = vec![
        EquityGrant::new("grant_1", "RSU-2022-001", date(2022, 3, 15), 400, 300),
        EquityGrant::new("grant_2", "RSU-2023-002", date(2023, 6, 1), 600, 225),
        EquityGrant::new("grant_3", "RSU-2024-003", date(2024, 1, 15), 500, 62),
    ];
    let price = dec!(178.50);
    let totals = aggregate_vesting(&grants);

    println!("━━━ Equity Grants @ {} ━━━\n", price);
    println!(
        "  {} shares total, {} vested, {} unvested\n",
        totals.total_shares, totals.vested_shares, totals.unvested_shares
    );
    for scenario in scenarios.iter() {
        let mut adjusted_total = dec!(0);
        for grant in &grants {
            let valued = scenario_vesting(grant, price, scenario).expect("adjustment above -100%");
            adjusted_total += valued.unvested_value_adjusted;
        }
        println!(
            "  {:<22} adjustment {:>4}%  unvested value {}",
            scenario.name, scenario.equity_price_adjustment_percent, adjusted_total
        );
    }
    println!();

    // --- Upcoming vests ---
    let events = vec![
        VestEvent::new("v1", "grant_1", date(2025, 3, 15), 25, VestStatus::Pending),
        VestEvent::new("v2", "grant_2", date(2025, 3, 1), 37, VestStatus::Pending),
        VestEvent::new("v3", "grant_3", date(2025, 4, 15), 31, VestStatus::Pending),
        VestEvent::new("v4", "grant_1", date(2024, 12, 15), 25, VestStatus::Vested),
        VestEvent::new("v5", "grant_2", date(2025, 6, 1), 38, VestStatus::Pending),
    ];
    println!("━━━ Next Vests (as of 2025-01-01) ━━━\n");
    for event in upcoming_vests(&events, date(2025, 1, 1), 3) {
        println!(
            "  {}  {:<8} {:>3} shares  {}",
            event.vest_date,
            event.grant_id,
            event.shares,
            event.value_at(price)
        );
    }
}
