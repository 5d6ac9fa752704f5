//! networth CLI
//!
//! Value a household portfolio snapshot from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Net worth summary from a JSON snapshot
//! networth summary --input portfolio.json
//!
//! # Ten-year projection under the optimistic scenario
//! networth project --input portfolio.json --scenario scenario_high
//!
//! # Update the stored exchange rate
//! networth rate --set 3.72
//! ```

use chrono::{Datelike, NaiveDate, Utc};
use networth_engine::config::settings::{Settings, SettingsStore, SettingsUpdate};
use networth_engine::core::currency::{CurrencyCode, ExchangeRateTable};
use networth_engine::core::scenario::{AssetClass, ScenarioSet};
use networth_engine::portfolio::snapshot::PortfolioSnapshot;
use networth_engine::projection::growth::{adjusted_price, project_scenario};
use networth_engine::projection::vesting::{
    aggregate_vesting, reconcile, scenario_vesting, PendingVests,
};
use networth_engine::simulation::random_portfolio::{generate_random_holdings, PortfolioConfig};
use networth_engine::valuation::aggregate::aggregate;
use networth_engine::valuation::demo::DemoScale;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::process;

const DEFAULT_SETTINGS_PATH: &str = "networth-settings.json";

fn print_usage() {
    eprintln!(
        r#"networth: household net-worth valuation and projection

USAGE:
    networth <COMMAND> [OPTIONS]

COMMANDS:
    summary     Net worth, category and household breakdown
    project     Project household net worth under a scenario
    vesting     Equity grant values and upcoming vests
    rate        Show or update the stored exchange rate and equity price
    demo        Toggle demo mode (scales every monetary output)
    sample      Generate a random portfolio snapshot
    help        Show this message

OPTIONS (summary, project, vesting):
    --input <FILE>      Path to JSON portfolio snapshot
    --settings <FILE>   Settings file (default: networth-settings.json)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (project):
    --scenario <ID>     Scenario id (default: scenario_medium)
    --class <CLASS>     Asset class whose rate drives growth (default: publicEquities)
    --years <N>         Projection horizon in years (default: 10)

OPTIONS (vesting):
    --scenario <ID>     Scenario for the adjusted price (default: scenario_medium)
    --price <PRICE>     Current share price (default: settings, then snapshot)
    --limit <N>         Upcoming vests to list (default: 5)
    --as-of <DATE>      Date for flagging overdue vests, YYYY-MM-DD (default: today)

OPTIONS (rate):
    --set <RATE>        Units of quote currency per 1 base unit
    --price <PRICE>     Employer equity price per share

OPTIONS (sample):
    --holdings <N>      Number of holdings (default: 20)
    --currencies <LIST> Comma-separated currency codes (default: USD)

EXAMPLES:
    networth summary --input portfolio.json
    networth project --input portfolio.json --scenario scenario_low --years 20
    networth vesting --input portfolio.json --as-of 2025-01-01
    networth rate --set 3.72
    networth sample --holdings 30 --currencies USD,NIS"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Parse `--flag value` pairs, rejecting anything not in `allowed`.
fn parse_flags(args: &[String], allowed: &[&str]) -> HashMap<String, String> {
    let mut flags = HashMap::new();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if !allowed.contains(&flag) {
            fail(format!("Unknown option: {}", flag));
        }
        i += 1;
        let value = args
            .get(i)
            .cloned()
            .unwrap_or_else(|| fail(format!("{} requires a value", flag)));
        flags.insert(flag.to_string(), value);
        i += 1;
    }
    flags
}

fn parse_value<T: std::str::FromStr>(flags: &HashMap<String, String>, flag: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match flags.get(flag) {
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|e| fail(format!("invalid {} '{}': {}", flag, raw, e))),
        None => default,
    }
}

fn load_snapshot(flags: &HashMap<String, String>) -> PortfolioSnapshot {
    let path = flags
        .get("--input")
        .unwrap_or_else(|| fail("--input <FILE> is required"));
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));
    serde_json::from_str(&content).unwrap_or_else(|e| fail(format!("parsing snapshot: {}", e)))
}

fn settings_store(flags: &HashMap<String, String>) -> SettingsStore {
    SettingsStore::new(
        flags
            .get("--settings")
            .map(String::as_str)
            .unwrap_or(DEFAULT_SETTINGS_PATH),
    )
}

fn load_settings(flags: &HashMap<String, String>) -> (Settings, ExchangeRateTable) {
    let settings = settings_store(flags)
        .load()
        .unwrap_or_else(|e| fail(e));
    let rates = settings.rate_table().unwrap_or_else(|e| fail(e));
    (settings, rates)
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(e));
    println!("{}", json);
}

fn print_demo_banner(scale: &DemoScale) {
    if !scale.is_identity() {
        eprintln!("(demo mode: values scaled)");
    }
}

fn cmd_summary(args: &[String]) {
    let flags = parse_flags(args, &["--input", "--settings", "--format"]);
    let snapshot = load_snapshot(&flags);
    let (settings, rates) = load_settings(&flags);
    let scale = settings.demo_scale();

    let summary = scale.apply(&aggregate(&snapshot.holdings));
    let breakdown = scale.apply(&snapshot.breakdown(&rates).unwrap_or_else(|e| fail(e)));
    let quote = summary
        .net_worth_in(&rates, &settings.quote_currency)
        .unwrap_or_else(|e| fail(e));

    if flags.get("--format").map(String::as_str) == Some("json") {
        #[derive(serde::Serialize)]
        struct SummaryOutput<'a> {
            summary: &'a networth_engine::valuation::aggregate::NetWorthSummary,
            breakdown: &'a networth_engine::portfolio::snapshot::PortfolioBreakdown,
            net_worth_quote: Decimal,
            quote_currency: &'a CurrencyCode,
            demo_mode: bool,
        }
        print_json(&SummaryOutput {
            summary: &summary,
            breakdown: &breakdown,
            net_worth_quote: quote,
            quote_currency: &settings.quote_currency,
            demo_mode: settings.is_demo_mode(),
        });
    } else {
        print_demo_banner(&scale);
        println!("{}", summary);
        println!("Net Worth ({}):   {}\n", settings.quote_currency, quote.round_dp(2));
        println!("{}", breakdown);
    }
}

fn cmd_project(args: &[String]) {
    let flags = parse_flags(
        args,
        &["--input", "--settings", "--format", "--scenario", "--class", "--years"],
    );
    let snapshot = load_snapshot(&flags);
    let (settings, rates) = load_settings(&flags);
    let scale = settings.demo_scale();

    let scenarios = ScenarioSet::defaults();
    let scenario_id = flags
        .get("--scenario")
        .map(String::as_str)
        .unwrap_or("scenario_medium");
    let scenario = scenarios
        .get(scenario_id)
        .unwrap_or_else(|| fail(format!("unknown scenario '{}'", scenario_id)));
    let class: AssetClass = match flags.get("--class") {
        Some(raw) => serde_json::from_value(serde_json::Value::String(raw.clone()))
            .unwrap_or_else(|_| fail(format!("unknown asset class '{}'", raw))),
        None => AssetClass::PublicEquities,
    };
    let years: u32 = parse_value(&flags, "--years", 10);

    let start = snapshot.breakdown(&rates).unwrap_or_else(|e| fail(e)).total;
    // Scaling is linear, so scale the start and let projection check the range.
    let points = project_scenario(scale.apply(&start), scenario, class, years)
        .unwrap_or_else(|e| fail(e));

    if flags.get("--format").map(String::as_str) == Some("json") {
        print_json(&points);
    } else {
        print_demo_banner(&scale);
        let base_year = Utc::now().year();
        println!("=== Projection: {} ({}) ===", scenario.name, class);
        for point in &points {
            println!(
                "  {}  {}",
                point.calendar_year(base_year),
                point.projected_value.round_dp(0)
            );
        }
    }
}

fn cmd_vesting(args: &[String]) {
    let flags = parse_flags(
        args,
        &["--input", "--settings", "--format", "--scenario", "--price", "--limit", "--as-of"],
    );
    let snapshot = load_snapshot(&flags);
    let (settings, _) = load_settings(&flags);
    let scale = settings.demo_scale();

    let scenarios = ScenarioSet::defaults();
    let scenario_id = flags
        .get("--scenario")
        .map(String::as_str)
        .unwrap_or("scenario_medium");
    let scenario = scenarios
        .get(scenario_id)
        .unwrap_or_else(|| fail(format!("unknown scenario '{}'", scenario_id)));

    let fallback_price = settings.equity_price.unwrap_or(snapshot.equity_price);
    let price: Decimal = parse_value(&flags, "--price", fallback_price);
    let limit: usize = parse_value(&flags, "--limit", 5);
    let as_of: NaiveDate = parse_value(&flags, "--as-of", Utc::now().date_naive());

    let grants: Vec<_> = snapshot
        .grants
        .iter()
        .map(|g| {
            let valued = scenario_vesting(g, price, scenario).unwrap_or_else(|e| fail(e));
            (g, scale.apply(&valued))
        })
        .collect();
    let totals = aggregate_vesting(&snapshot.grants);
    let adjusted = adjusted_price(price, scenario.equity_price_adjustment_percent)
        .unwrap_or_else(|e| fail(e));
    let values = scale.apply(&totals.valued_at(price, adjusted));
    let pending = PendingVests::new(&snapshot.vest_events);
    let upcoming: Vec<_> = pending.upcoming(limit).collect();
    let mismatches = reconcile(&snapshot.grants, &snapshot.vest_events);

    if flags.get("--format").map(String::as_str) == Some("json") {
        #[derive(serde::Serialize)]
        struct VestingOutput<'a> {
            grants: Vec<&'a networth_engine::projection::vesting::ScenarioVesting>,
            totals: networth_engine::projection::vesting::VestingTotals,
            values: networth_engine::projection::vesting::VestingValues,
            upcoming: Vec<&'a networth_engine::core::equity::VestEvent>,
            mismatches: Vec<networth_engine::projection::vesting::VestingMismatch>,
        }
        print_json(&VestingOutput {
            grants: grants.iter().map(|(_, v)| v).collect(),
            totals,
            values,
            upcoming,
            mismatches,
        });
        return;
    }

    print_demo_banner(&scale);
    println!("=== Equity Grants @ {} ({}) ===", price, scenario.name);
    for (grant, valued) in &grants {
        println!(
            "  {:<14} {:>5}/{:<5} vested ({:.1}%)  vested {}  unvested {}  adjusted {}",
            grant.grant_id,
            grant.vested_shares,
            grant.total_shares,
            valued.summary.vest_progress_percent,
            valued.summary.vested_value.round_dp(2),
            valued.summary.unvested_value.round_dp(2),
            valued.unvested_value_adjusted.round_dp(2)
        );
    }
    println!(
        "\nTotals: {} shares, {} vested, {} unvested",
        totals.total_shares, totals.vested_shares, totals.unvested_shares
    );
    println!("Vested value:            {}", values.vested_value.round_dp(2));
    println!("Unvested value:          {}", values.unvested_value.round_dp(2));
    println!("Unvested value adjusted: {}", values.unvested_value_adjusted.round_dp(2));

    println!("\nUpcoming vests (as of {}):", as_of);
    if upcoming.is_empty() {
        println!("  none");
    }
    for event in &upcoming {
        let marker = if event.vest_date < as_of { "  (overdue)" } else { "" };
        println!(
            "  {}  {:<10} {} shares{}",
            event.vest_date, event.grant_id, event.shares, marker
        );
    }
    let overdue = pending.overdue(as_of).count();
    if overdue > 0 {
        println!("  ({} pending vests are past their date)", overdue);
    }
    if !mismatches.is_empty() {
        println!("\n{} vesting data mismatches (see log)", mismatches.len());
    }
}

fn cmd_rate(args: &[String]) {
    let flags = parse_flags(args, &["--settings", "--set", "--price"]);
    let store = settings_store(&flags);

    let update = SettingsUpdate {
        exchange_rate: flags.get("--set").map(|_| parse_value(&flags, "--set", Decimal::ZERO)),
        equity_price: flags.get("--price").map(|_| parse_value(&flags, "--price", Decimal::ZERO)),
        ..Default::default()
    };
    let settings = if update == SettingsUpdate::default() {
        store.load()
    } else {
        store.update(update)
    }
    .unwrap_or_else(|e| fail(e));

    println!(
        "1 {} = {} {}",
        settings.base_currency, settings.exchange_rate, settings.quote_currency
    );
    match settings.equity_price {
        Some(price) => println!("Equity price: {}", price),
        None => println!("Equity price: not set"),
    }
}

fn cmd_demo(args: &[String]) {
    let flags = parse_flags(args, &["--settings"]);
    let store = settings_store(&flags);
    let mut settings = store.load().unwrap_or_else(|e| fail(e));

    let on = settings.toggle_demo_mode(&mut rand::thread_rng());
    store.save(&settings).unwrap_or_else(|e| fail(e));

    if on {
        println!("Demo mode: ON ({:.1}x real values)", settings.demo_scale().factor());
    } else {
        println!("Demo mode: OFF");
    }
}

fn cmd_sample(args: &[String]) {
    let flags = parse_flags(args, &["--settings", "--holdings", "--currencies"]);
    let (_, rates) = load_settings(&flags);

    let currencies: Vec<CurrencyCode> = flags
        .get("--currencies")
        .map(String::as_str)
        .unwrap_or("USD")
        .split(',')
        .map(|s| CurrencyCode::new(s.trim()))
        .collect();
    let config = PortfolioConfig {
        holding_count: parse_value(&flags, "--holdings", 20),
        currencies,
        ..Default::default()
    };

    let holdings = generate_random_holdings(&mut rand::thread_rng(), &config, &rates)
        .unwrap_or_else(|e| fail(e));
    eprintln!("Generated {} holdings", holdings.len());
    print_json(&PortfolioSnapshot {
        holdings,
        ..Default::default()
    });
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "summary" => cmd_summary(rest),
        "project" => cmd_project(rest),
        "vesting" => cmd_vesting(rest),
        "rate" => cmd_rate(rest),
        "demo" => cmd_demo(rest),
        "sample" => cmd_sample(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
