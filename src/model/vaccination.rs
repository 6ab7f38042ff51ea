//! Vaccination catalog record.

use serde::Deserialize;

/// One vaccine entry as served by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vaccination {
    /// Catalog identifier.
    pub id: u64,
    /// Product name.
    pub name: String,
    /// Marketing authorisation holder.
    pub manufacturer: String,
    /// Free-text summary, searched along with name and manufacturer.
    #[serde(default)]
    pub description: Option<String>,
    /// Number of doses in the primary series.
    #[serde(default)]
    pub doses: Option<u32>,
}

impl Vaccination {
    /// True if `query` occurs in the name, manufacturer or description.
    ///
    /// `query` is expected already lower-cased; record fields are lower-cased here.
    pub fn matches(&self, query: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(query);
        contains(&self.name)
            || contains(&self.manufacturer)
            || self.description.as_deref().is_some_and(contains)
    }
}
