//! Data preparation: health scoring, range filtering, classification, and
//! derived band columns.
//!
//! Pipeline:
//! 1. Drop rows missing any essential field
//! 2. Compute the health score per row
//! 3. Keep rows with `calories < 2000` and `-100 < score < 100`
//! 4. Classify into Healthy / Moderate / Unhealthy
//! 5. Cut nutrient tiers, preparation-time bands, score and rating bands

use std::fmt;

use log::{info, warn};
use serde::Serialize;

use crate::binning::{HealthScoreRange, QuantileCut, RatingCategory, Tier, TimeCategory};
use crate::nutrient::Nutrient;
use crate::record::{RawRecipe, Recipe};
use crate::table::PreparedTable;

/// Rows at or above this calorie count are excluded.
pub const MAX_CALORIES: f64 = 2000.0;

/// Retained scores lie strictly inside `(-SCORE_LIMIT, SCORE_LIMIT)`.
pub const SCORE_LIMIT: f64 = 100.0;

/// Calorie threshold of the classification rule (vertical reference line).
pub const CALORIE_THRESHOLD: f64 = 200.0;

/// Minimum score for Healthy.
pub const HEALTHY_SCORE: f64 = 7.0;

/// Maximum score for Unhealthy.
pub const UNHEALTHY_SCORE: f64 = 4.0;

// ---------------------------------------------------------------------------
// Scoring and classification
// ---------------------------------------------------------------------------

/// Health category of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Healthy,
    Moderate,
    Unhealthy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Healthy, Category::Moderate, Category::Unhealthy];

    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Moderate => "Moderate",
            Self::Unhealthy => "Unhealthy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `(protein/calories)*100 − (sugar/calories)*50 − (fat/calories)*30`.
///
/// Zero calories gives a non-finite result; [`within_range`] rejects it.
pub fn health_score(protein: f64, sugar: f64, fat: f64, calories: f64) -> f64 {
    (protein / calories) * 100.0 - (sugar / calories) * 50.0 - (fat / calories) * 30.0
}

/// Dataset-level filter. Non-finite scores are out of range.
pub fn within_range(calories: f64, score: f64) -> bool {
    score.is_finite() && calories < MAX_CALORIES && score > -SCORE_LIMIT && score < SCORE_LIMIT
}

/// Two-threshold rule. Low-calorie rows below the healthy score fall through
/// to Moderate, not Unhealthy.
pub fn classify(calories: f64, score: f64) -> Category {
    if calories <= CALORIE_THRESHOLD && score >= HEALTHY_SCORE {
        Category::Healthy
    } else if calories > CALORIE_THRESHOLD && score <= UNHEALTHY_SCORE {
        Category::Unhealthy
    } else {
        Category::Moderate
    }
}

// ---------------------------------------------------------------------------
// Prepared rows
// ---------------------------------------------------------------------------

/// Tier of each nutrient; `None` where the value is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutrientLevels {
    pub protein: Option<Tier>,
    pub calories: Option<Tier>,
    pub fat: Option<Tier>,
    pub sugar: Option<Tier>,
    pub carbs: Option<Tier>,
}

impl NutrientLevels {
    pub fn get(&self, nutrient: Nutrient) -> Option<Tier> {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Calories => self.calories,
            Nutrient::Fat => self.fat,
            Nutrient::Sugar => self.sugar,
            Nutrient::Carbs => self.carbs,
        }
    }

    fn set(&mut self, nutrient: Nutrient, tier: Option<Tier>) {
        let slot = match nutrient {
            Nutrient::Protein => &mut self.protein,
            Nutrient::Calories => &mut self.calories,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Sugar => &mut self.sugar,
            Nutrient::Carbs => &mut self.carbs,
        };
        *slot = tier;
    }
}

/// A retained recipe with all derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub health_score: f64,
    pub category: Category,
    pub levels: NutrientLevels,
    pub health_score_range: Option<HealthScoreRange>,
    pub time_category: Option<TimeCategory>,
    pub rating_category: RatingCategory,
}

/// Row counts at each preparation stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrepareReport {
    pub rows_read: usize,
    pub dropped_incomplete: usize,
    pub dropped_out_of_range: usize,
    pub retained: usize,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full preparation pass and freeze the result.
pub fn prepare(raw: Vec<RawRecipe>) -> PreparedTable {
    let mut report = PrepareReport {
        rows_read: raw.len(),
        ..PrepareReport::default()
    };

    let complete: Vec<Recipe> = raw.into_iter().filter_map(RawRecipe::complete).collect();
    report.dropped_incomplete = report.rows_read - complete.len();

    let scored: Vec<(Recipe, f64)> = complete
        .into_iter()
        .map(|r| {
            let score = health_score(r.protein, r.sugar, r.fat, r.calories);
            (r, score)
        })
        .filter(|(r, score)| within_range(r.calories, *score))
        .collect();
    report.dropped_out_of_range = report.rows_read - report.dropped_incomplete - scored.len();
    report.retained = scored.len();

    if report.dropped_incomplete > 0 {
        warn!(
            "dropped {} row(s) missing essential fields",
            report.dropped_incomplete
        );
    }

    let tier_cuts: Vec<(Nutrient, Option<QuantileCut>)> = Nutrient::ALL
        .into_iter()
        .map(|n| {
            let cut = QuantileCut::new(scored.iter().filter_map(|(r, _)| r.nutrient(n)), 3);
            (n, cut)
        })
        .collect();
    let time_cut = QuantileCut::new(scored.iter().map(|(r, _)| r.minutes), 4);

    let rows = scored
        .into_iter()
        .map(|(recipe, score)| {
            let mut levels = NutrientLevels::default();
            for (nutrient, cut) in &tier_cuts {
                let tier = cut
                    .as_ref()
                    .zip(recipe.nutrient(*nutrient))
                    .and_then(|(cut, v)| cut.bin(v))
                    .and_then(Tier::from_index);
                levels.set(*nutrient, tier);
            }
            let time_category = time_cut
                .as_ref()
                .and_then(|cut| cut.bin(recipe.minutes))
                .and_then(TimeCategory::from_index);

            PreparedRecipe {
                category: classify(recipe.calories, score),
                health_score_range: HealthScoreRange::from_score(score),
                rating_category: RatingCategory::from_rating(recipe.rating),
                health_score: score,
                levels,
                time_category,
                recipe,
            }
        })
        .collect();

    info!(
        "prepared {} of {} rows ({} incomplete, {} out of range)",
        report.retained, report.rows_read, report.dropped_incomplete, report.dropped_out_of_range
    );

    PreparedTable::new(rows, report)
}
