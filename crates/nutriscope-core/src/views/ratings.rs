//! How nutrient levels and health score ranges line up with ratings.

use std::collections::BTreeSet;

use log::debug;

use super::{CountSeries, GroupedCountChart};
use crate::binning::{HealthScoreRange, RatingCategory, Tier};
use crate::nutrient::Nutrient;
use crate::table::PreparedTable;

/// Panel order of the nutrient impact tab.
const IMPACT_ORDER: [Nutrient; 5] = [
    Nutrient::Protein,
    Nutrient::Carbs,
    Nutrient::Sugar,
    Nutrient::Fat,
    Nutrient::Calories,
];

/// Half-point rating bin, as twice the rounded rating.
fn rating_bin(rating: f64) -> i64 {
    (rating * 2.0).round() as i64
}

/// Rating distribution split by each nutrient's tier, one chart per nutrient.
pub fn nutrient_impact_view(table: &PreparedTable) -> Vec<GroupedCountChart> {
    let bins: Vec<i64> = table
        .recipes()
        .iter()
        .map(|r| rating_bin(r.recipe.rating))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let categories: Vec<String> = bins.iter().map(|&b| format!("{:.1}", b as f64 / 2.0)).collect();

    let charts: Vec<GroupedCountChart> = IMPACT_ORDER
        .into_iter()
        .map(|nutrient| {
            let series = Tier::ALL
                .into_iter()
                .map(|tier| {
                    let mut counts = vec![0; bins.len()];
                    for r in table.recipes() {
                        if r.levels.get(nutrient) != Some(tier) {
                            continue;
                        }
                        if let Ok(i) = bins.binary_search(&rating_bin(r.recipe.rating)) {
                            counts[i] += 1;
                        }
                    }
                    CountSeries {
                        name: tier.to_string(),
                        counts,
                    }
                })
                .collect();

            let topic = match nutrient {
                Nutrient::Carbs => "Carbohydrate",
                other => other.title(),
            };
            GroupedCountChart {
                title: format!("Rating Distribution by {topic} Level"),
                x_title: "Rating".to_string(),
                y_title: "Count".to_string(),
                legend_title: format!("{} Level", nutrient.title()),
                categories: categories.clone(),
                series,
            }
        })
        .collect();

    debug!("nutrient impact: {} rating bins", bins.len());
    charts
}

/// Recipe counts per health-score range, grouped by rating band.
pub fn health_rating_view(table: &PreparedTable) -> GroupedCountChart {
    let series = RatingCategory::ALL
        .into_iter()
        .map(|band| CountSeries {
            name: band.to_string(),
            counts: HealthScoreRange::ALL
                .into_iter()
                .map(|range| {
                    table
                        .recipes()
                        .iter()
                        .filter(|r| {
                            r.rating_category == band && r.health_score_range == Some(range)
                        })
                        .count()
                })
                .collect(),
        })
        .collect();

    GroupedCountChart {
        title: "Count of Recipes by Health Score and Rating Category".to_string(),
        x_title: "Health Score Range".to_string(),
        y_title: "Count of Recipes".to_string(),
        legend_title: "Rating Category".to_string(),
        categories: HealthScoreRange::ALL
            .into_iter()
            .map(|r| r.span_label().to_string())
            .collect(),
        series,
    }
}
