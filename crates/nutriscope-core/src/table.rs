//! The immutable prepared table shared by every view.

use std::collections::HashSet;
use std::io::Write;

use serde::Serialize;

use crate::nutrient::Nutrient;
use crate::prepare::{Category, PrepareReport, PreparedRecipe};

/// Cap on the distinct names shown in the sidebar list.
pub const MAX_SIDEBAR_RECIPES: usize = 10_000;

/// Snapshot produced by [`crate::prepare::prepare`]. There is no mutating
/// API; share it behind an `Arc` for the process lifetime.
#[derive(Debug, Clone)]
pub struct PreparedTable {
    rows: Vec<PreparedRecipe>,
    sidebar: Vec<String>,
    report: PrepareReport,
}

impl PreparedTable {
    pub(crate) fn new(rows: Vec<PreparedRecipe>, report: PrepareReport) -> Self {
        let sidebar = distinct_names(&rows, MAX_SIDEBAR_RECIPES);
        Self {
            rows,
            sidebar,
            report,
        }
    }

    /// All retained rows, in source order.
    pub fn recipes(&self) -> &[PreparedRecipe] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn report(&self) -> &PrepareReport {
        &self.report
    }

    /// Distinct recipe names in first-seen order, capped at
    /// [`MAX_SIDEBAR_RECIPES`].
    pub fn sidebar_names(&self) -> &[String] {
        &self.sidebar
    }

    /// First row whose name matches the sidebar entry at `index`.
    pub fn recipe_by_sidebar_index(&self, index: usize) -> Option<&PreparedRecipe> {
        let name = self.sidebar.get(index)?;
        self.rows.iter().find(|r| &r.recipe.name == name)
    }

    /// Row count per category, in [`Category::ALL`] order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.rows.iter().filter(|r| r.category == c).count()))
            .collect()
    }

    /// Nutrient column with missing values kept as `None`.
    pub fn column(&self, nutrient: Nutrient) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.recipe.nutrient(nutrient)).collect()
    }

    /// Write the table, source plus derived columns, as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(ExportRow::from(row))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn distinct_names(rows: &[PreparedRecipe], cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|r| &r.recipe.name)
        .filter(|name| seen.insert(name.as_str()))
        .take(cap)
        .cloned()
        .collect()
}

/// Flat CSV row using the dataset's column names.
#[derive(Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    calories: f64,
    protein: f64,
    fat: f64,
    sugar: f64,
    carbs: Option<f64>,
    minutes: f64,
    n_steps: Option<f64>,
    rating: f64,
    #[serde(rename = "Diet_Type")]
    diet_type: &'a str,
    #[serde(rename = "Health_Score")]
    health_score: f64,
    #[serde(rename = "Category")]
    category: &'static str,
    protein_level: Option<&'static str>,
    carbs_level: Option<&'static str>,
    sugar_level: Option<&'static str>,
    fat_level: Option<&'static str>,
    calories_level: Option<&'static str>,
    #[serde(rename = "Health_Score_Range")]
    health_score_range: Option<&'static str>,
    #[serde(rename = "Time_Category")]
    time_category: Option<&'static str>,
    #[serde(rename = "Rating_Category")]
    rating_category: &'static str,
}

impl<'a> From<&'a PreparedRecipe> for ExportRow<'a> {
    fn from(row: &'a PreparedRecipe) -> Self {
        let r = &row.recipe;
        let level = |n| row.levels.get(n).map(|t| t.label());
        Self {
            name: &r.name,
            calories: r.calories,
            protein: r.protein,
            fat: r.fat,
            sugar: r.sugar,
            carbs: r.carbs,
            minutes: r.minutes,
            n_steps: r.n_steps,
            rating: r.rating,
            diet_type: &r.diet_type,
            health_score: row.health_score,
            category: row.category.label(),
            protein_level: level(Nutrient::Protein),
            carbs_level: level(Nutrient::Carbs),
            sugar_level: level(Nutrient::Sugar),
            fat_level: level(Nutrient::Fat),
            calories_level: level(Nutrient::Calories),
            health_score_range: row.health_score_range.map(|h| h.label()),
            time_category: row.time_category.map(|t| t.label()),
            rating_category: row.rating_category.label(),
        }
    }
}
