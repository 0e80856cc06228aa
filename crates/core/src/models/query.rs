use serde::{Deserialize, Serialize};

use super::holding::Category;
use crate::errors::CoreError;

/// Sort order for holding listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Alphabetical by name
    #[serde(rename = "name-asc")]
    NameAsc,
    /// Reverse alphabetical by name
    #[serde(rename = "name-desc")]
    NameDesc,
    /// Smallest market value first
    #[serde(rename = "value-asc")]
    ValueAsc,
    /// Largest market value first (default for display)
    #[default]
    #[serde(rename = "value-desc")]
    ValueDesc,
    /// Worst percentage gain first
    #[serde(rename = "profit-asc")]
    ProfitAsc,
    /// Best percentage gain first
    #[serde(rename = "profit-desc")]
    ProfitDesc,
}

impl SortKey {
    pub fn token(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::ValueAsc => "value-asc",
            SortKey::ValueDesc => "value-desc",
            SortKey::ProfitAsc => "profit-asc",
            SortKey::ProfitDesc => "profit-desc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            "value-asc" => Ok(SortKey::ValueAsc),
            "value-desc" => Ok(SortKey::ValueDesc),
            "profit-asc" => Ok(SortKey::ProfitAsc),
            "profit-desc" => Ok(SortKey::ProfitDesc),
            _ => Err(CoreError::UnknownToken {
                kind: "sort key",
                token: s.to_string(),
            }),
        }
    }
}

/// Category restriction for listings. `"all"` on the wire means no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Search, category filter and sort order for a holdings listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl HoldingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn category(mut self, filter: CategoryFilter) -> Self {
        self.category = filter;
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = key;
        self
    }
}
