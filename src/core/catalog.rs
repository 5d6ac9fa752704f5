use crate::core::error::ValuationError;
use crate::core::holding::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowed subtypes per category.
///
/// Checked when a holding is first entered, never during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtypeCatalog {
    subtypes: BTreeMap<Category, Vec<String>>,
}

impl SubtypeCatalog {
    /// An empty catalog that allows nothing.
    pub fn empty() -> Self {
        Self {
            subtypes: BTreeMap::new(),
        }
    }

    pub fn with_subtypes<I, S>(mut self, category: Category, subtypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtypes
            .entry(category)
            .or_default()
            .extend(subtypes.into_iter().map(Into::into));
        self
    }

    pub fn subtypes(&self, category: Category) -> &[String] {
        self.subtypes
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn allows(&self, category: Category, subtype: &str) -> bool {
        self.subtypes(category).iter().any(|s| s == subtype)
    }

    pub fn validate(&self, category: Category, subtype: &str) -> Result<(), ValuationError> {
        if self.allows(category, subtype) {
            Ok(())
        } else {
            Err(ValuationError::UnknownSubtype {
                category,
                subtype: subtype.to_string(),
            })
        }
    }
}

impl Default for SubtypeCatalog {
    fn default() -> Self {
        Self::empty()
            .with_subtypes(Category::Cash, ["Leumi", "Julius Baer", "Excellence"])
            .with_subtypes(
                Category::Securities,
                ["Atai", "Bioharvest", "Excellence", "Take Two Interactive"],
            )
            .with_subtypes(Category::RealEstate, ["Tel Aviv", "Dubai"])
            .with_subtypes(
                Category::Liabilities,
                ["Mortgage", "Credit Card", "Personal Loan", "Business Debt", "Other"],
            )
    }
}
