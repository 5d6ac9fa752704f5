use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Asset classes a scenario carries a growth assumption for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetClass {
    RealEstate,
    PublicEquities,
    ManagedPortfolio,
    Bonds,
    Alternatives,
    Cash,
    #[serde(alias = "ttwoEquity")]
    EmployerEquity,
}

impl AssetClass {
    pub const ALL: [AssetClass; 7] = [
        AssetClass::RealEstate,
        AssetClass::PublicEquities,
        AssetClass::ManagedPortfolio,
        AssetClass::Bonds,
        AssetClass::Alternatives,
        AssetClass::Cash,
        AssetClass::EmployerEquity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssetClass::RealEstate => "Real Estate",
            AssetClass::PublicEquities => "Public Equities",
            AssetClass::ManagedPortfolio => "Managed Portfolio",
            AssetClass::Bonds => "Bonds",
            AssetClass::Alternatives => "Alternatives",
            AssetClass::Cash => "Cash",
            AssetClass::EmployerEquity => "Employer Equity",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A named set of annual growth assumptions.
///
/// Assumptions are annual percentages (7.0 means 7% a year). Scenarios
/// are values: editing one produces a new scenario, so a projection that
/// already referenced the old one is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub assumptions: BTreeMap<AssetClass, Decimal>,
    /// Percent move applied to the current employer equity price.
    #[serde(alias = "ttwoAdjustment")]
    pub equity_price_adjustment_percent: Decimal,
}

impl Scenario {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            assumptions: BTreeMap::new(),
            equity_price_adjustment_percent: Decimal::ZERO,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_assumption(mut self, class: AssetClass, percent: Decimal) -> Self {
        self.assumptions.insert(class, percent);
        self
    }

    pub fn with_equity_adjustment(mut self, percent: Decimal) -> Self {
        self.equity_price_adjustment_percent = percent;
        self
    }

    /// Annual growth assumption for `class` in percent.
    pub fn assumption_percent(&self, class: AssetClass) -> Option<Decimal> {
        self.assumptions.get(&class).copied()
    }

    /// Annual growth assumption for `class` as a decimal rate (7% -> 0.07).
    pub fn growth_rate(&self, class: AssetClass) -> Option<Decimal> {
        self.assumption_percent(class).map(|p| p / Decimal::ONE_HUNDRED)
    }

    pub fn conservative() -> Self {
        Scenario::new("scenario_low", "Low / Conservative")
            .with_description("Conservative growth assumptions with lower risk")
            .with_assumptions([
                (AssetClass::RealEstate, dec!(1.5)),
                (AssetClass::PublicEquities, dec!(4.0)),
                (AssetClass::ManagedPortfolio, dec!(3.5)),
                (AssetClass::Bonds, dec!(2.0)),
                (AssetClass::Alternatives, dec!(5.0)),
                (AssetClass::Cash, dec!(1.0)),
                (AssetClass::EmployerEquity, dec!(3.0)),
            ])
            .with_equity_adjustment(dec!(-20))
    }

    pub fn base_case() -> Self {
        Scenario::new("scenario_medium", "Medium / Base Case")
            .with_description("Moderate growth based on historical averages")
            .with_assumptions([
                (AssetClass::RealEstate, dec!(3.0)),
                (AssetClass::PublicEquities, dec!(7.0)),
                (AssetClass::ManagedPortfolio, dec!(6.0)),
                (AssetClass::Bonds, dec!(3.5)),
                (AssetClass::Alternatives, dec!(8.0)),
                (AssetClass::Cash, dec!(2.0)),
                (AssetClass::EmployerEquity, dec!(7.0)),
            ])
    }

    pub fn optimistic() -> Self {
        Scenario::new("scenario_high", "High / Optimistic")
            .with_description("Optimistic growth with higher risk tolerance")
            .with_assumptions([
                (AssetClass::RealEstate, dec!(5.0)),
                (AssetClass::PublicEquities, dec!(10.0)),
                (AssetClass::ManagedPortfolio, dec!(9.0)),
                (AssetClass::Bonds, dec!(4.5)),
                (AssetClass::Alternatives, dec!(12.0)),
                (AssetClass::Cash, dec!(3.0)),
                (AssetClass::EmployerEquity, dec!(12.0)),
            ])
            .with_equity_adjustment(dec!(30))
    }

    fn with_assumptions(mut self, assumptions: impl IntoIterator<Item = (AssetClass, Decimal)>) -> Self {
        self.assumptions.extend(assumptions);
        self
    }
}

/// The scenarios a user can pick from, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
        }
    }

    /// Low, medium and high scenarios.
    pub fn defaults() -> Self {
        Self {
            scenarios: vec![
                Scenario::conservative(),
                Scenario::base_case(),
                Scenario::optimistic(),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Add a scenario, or replace the one with the same id.
    ///
    /// Returns the scenario that was replaced, if any.
    pub fn upsert(&mut self, scenario: Scenario) -> Option<Scenario> {
        match self.scenarios.iter_mut().find(|s| s.id == scenario.id) {
            Some(existing) => Some(std::mem::replace(existing, scenario)),
            None => {
                self.scenarios.push(scenario);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Scenario> {
        let idx = self.scenarios.iter().position(|s| s.id == id)?;
        Some(self.scenarios.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl FromIterator<Scenario> for ScenarioSet {
    fn from_iter<T: IntoIterator<Item = Scenario>>(iter: T) -> Self {
        Self {
            scenarios: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenarios() {
        let set = ScenarioSet::defaults();
        assert_eq!(set.len(), 3);

        let low = set.get("scenario_low").unwrap();
        assert_eq!(low.equity_price_adjustment_percent, dec!(-20));
        assert_eq!(low.growth_rate(AssetClass::PublicEquities), Some(dec!(0.04)));

        let high = set.get("scenario_high").unwrap();
        assert_eq!(high.assumption_percent(AssetClass::Alternatives), Some(dec!(12.0)));
    }

    #[test]
    fn test_missing_assumption() {
        let s = Scenario::new("empty", "Empty");
        assert_eq!(s.growth_rate(AssetClass::Bonds), None);
    }

    #[test]
    fn test_edit_produces_new_value() {
        let mut set = ScenarioSet::defaults();
        let original = set.get("scenario_medium").unwrap().clone();
        let edited = original
            .clone()
            .with_assumption(AssetClass::PublicEquities, dec!(8));

        let replaced = set.upsert(edited).unwrap();
        assert_eq!(replaced, original);
        assert_eq!(original.assumption_percent(AssetClass::PublicEquities), Some(dec!(7.0)));
        assert_eq!(
            set.get("scenario_medium").unwrap().assumption_percent(AssetClass::PublicEquities),
            Some(dec!(8))
        );
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut set = ScenarioSet::new();
        assert!(set.upsert(Scenario::new("custom", "Custom")).is_none());
        assert_eq!(set.len(), 1);
        assert!(set.remove("custom").is_some());
        assert!(set.is_empty());
        assert!(set.remove("custom").is_none());
    }

    #[test]
    fn test_scenario_from_source_json() {
        let json = r#"{
            "id": "scenario_x", "name": "X",
            "assumptions": { "publicEquities": 6.5, "ttwoEquity": 4 },
            "ttwoAdjustment": -10
        }"#;
        let s: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(s.assumption_percent(AssetClass::EmployerEquity), Some(dec!(4)));
        assert_eq!(s.equity_price_adjustment_percent, dec!(-10));
    }
}
