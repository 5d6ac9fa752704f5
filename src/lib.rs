//! # networth-engine
//!
//! Household net-worth valuation, aggregation, and projection engine.
//!
//! Given snapshots of holdings, liabilities, equity grants and an exchange
//! rate table, this engine computes net worth, category and liquidity
//! breakdowns, compound-growth projections under named scenarios, and
//! equity vesting values. Every computation is a pure function of its
//! inputs.
//!
//! ## Architecture
//!
//! - **core**: Foundational types: currencies, holdings, grants, scenarios
//! - **valuation**: Classification, aggregation, revaluation, demo scaling
//! - **projection**: Compound growth and vesting calculations
//! - **portfolio**: Real estate, equities, family office, household snapshot
//! - **config**: User settings and their JSON-file persistence
//! - **simulation**: Random portfolio generation

pub mod config;
pub mod core;
pub mod portfolio;
pub mod projection;
pub mod simulation;
pub mod valuation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::settings::{Settings, SettingsStore, SettingsUpdate};
    pub use crate::core::currency::{to_base, CurrencyCode, ExchangeRateTable};
    pub use crate::core::equity::{EquityGrant, VestEvent, VestStatus};
    pub use crate::core::error::ValuationError;
    pub use crate::core::holding::{Category, Holding, HoldingDraft, Liquidity};
    pub use crate::core::scenario::{AssetClass, Scenario, ScenarioSet};
    pub use crate::portfolio::snapshot::{PortfolioBreakdown, PortfolioSnapshot};
    pub use crate::projection::growth::{adjusted_price, project, project_scenario, ProjectionPoint};
    pub use crate::projection::vesting::{
        aggregate_vesting, upcoming_vests, vesting_summary, VestingSummary, VestingTotals,
    };
    pub use crate::valuation::aggregate::{aggregate, NetWorthSummary};
    pub use crate::valuation::classify::{classify, Classification};
    pub use crate::valuation::demo::{DemoScale, Monetary};
}
