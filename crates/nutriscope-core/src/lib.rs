//! # nutriscope-core
//!
//! Data core of the NutriScope recipe dashboard: load a recipe nutrition CSV,
//! score and classify every recipe, and render declarative chart
//! descriptions for the dashboard views.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nutriscope_core::{NutrientSelection, heatmap_view, load_prepared};
//!
//! let table = load_prepared("Dv_Final.csv").unwrap();
//! println!("{} recipes retained", table.len());
//!
//! let view = heatmap_view(&table, NutrientSelection::All);
//! println!("{} heat map panels", view.panels.len());
//! ```
//!
//! ## Architecture
//!
//! CSV → [`RawRecipe`] → [`prepare`] → [`PreparedTable`] → views
//!
//! Preparation runs once. It drops incomplete rows, computes the health
//! score, keeps rows with `calories < 2000` and a score strictly inside
//! `(-100, 100)`, classifies each row and cuts the tier and band columns.
//! The resulting table is immutable; every view is a pure function of it plus
//! a small piece of UI state (clicked recipe, selected nutrient).

pub mod binning;
pub mod error;
pub mod nutrient;
pub mod pivot;
pub mod prepare;
pub mod record;
pub mod stats;
pub mod table;
pub mod views;

use std::path::Path;

pub use binning::{HealthScoreRange, QuantileCut, RatingCategory, Tier, TimeCategory, quantile};
pub use error::{LoadError, SelectionError};
pub use nutrient::{Nutrient, NutrientSelection};
pub use pivot::{GroupAxis, PivotTable, pivot};
pub use prepare::{
    Category, NutrientLevels, PrepareReport, PreparedRecipe, classify, health_score, prepare,
    within_range,
};
pub use record::{RawRecipe, Recipe, load_csv, read_csv};
pub use stats::{
    CellExtreme, NutrientCorrelation, StatsPanel, TrendLine, correlations, ols, pearson,
    stats_panel,
};
pub use table::{MAX_SIDEBAR_RECIPES, PreparedTable};
pub use views::{
    HeatmapPanel, HeatmapView, OverviewView, PopularityView, health_popularity_view,
    health_rating_view, heatmap_view, nutrient_impact_view, nutrient_profile_view, overview_view,
    popularity_view,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load a CSV file and run preparation on it.
pub fn load_prepared(path: impl AsRef<Path>) -> Result<PreparedTable, LoadError> {
    Ok(prepare(load_csv(path)?))
}
