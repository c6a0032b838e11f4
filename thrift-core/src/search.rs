use serde::{Deserialize, Serialize};

/// A comparable lookup request for one inventory item.
///
/// Lookups walk a ladder of progressively broader terms; matches from every
/// rung are accumulated (not deduplicated) so a brand-wide sample can pad out
/// a sparse exact-match sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparableQuery {
    pub brand: String,
    pub name: String,
    pub category: String,
    /// Maximum rows fetched per search term, not in total.
    pub limit_per_term: u32,
}

impl ComparableQuery {
    pub fn new(brand: &str, name: &str, category: &str, limit_per_term: u32) -> Self {
        Self {
            brand: brand.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            limit_per_term,
        }
    }

    /// The search-term ladder, most specific first:
    /// `"{brand} {name}"`, `"{brand}"`, `"{name}"`.
    pub fn terms(&self) -> Vec<String> {
        vec![
            format!("{} {}", self.brand, self.name),
            self.brand.clone(),
            self.name.clone(),
        ]
    }
}
