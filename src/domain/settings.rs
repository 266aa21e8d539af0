use serde::{Deserialize, Serialize};

/// Cutoffs used by the insight steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub countries_per_title: usize,
    pub categories_per_title: usize,
    pub categories: usize,
    pub category_combinations: usize,
    pub country_combinations: usize,
    pub top_countries: usize,
    pub lower_percentile: f64,
    pub upper_percentile: f64,
}

pub const DEFAULT_CUTOFF: usize = 15;
pub const DEFAULT_TOP_COUNTRIES: usize = 10;

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            countries_per_title: DEFAULT_CUTOFF,
            categories_per_title: DEFAULT_CUTOFF,
            categories: DEFAULT_CUTOFF,
            category_combinations: 25,
            country_combinations: 30,
            top_countries: DEFAULT_TOP_COUNTRIES,
            lower_percentile: 2.0,
            upper_percentile: 98.0,
        }
    }
}
