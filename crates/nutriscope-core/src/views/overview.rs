//! Overview charts: protein and health bands against rating, plus the
//! diet by category protein grid.

use log::debug;
use serde::Serialize;
use statrs::statistics::Statistics;

use super::{BarChart, HeatmapChart};
use crate::binning::{HealthScoreRange, Tier};
use crate::nutrient::Nutrient;
use crate::pivot::{GroupAxis, pivot};
use crate::prepare::PreparedRecipe;
use crate::table::PreparedTable;

/// Summary figure combining the aggregate charts of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub title: String,
    pub rating_by_protein: BarChart,
    pub rating_by_health_range: BarChart,
    pub protein_by_diet_and_category: HeatmapChart,
}

pub fn overview_view(table: &PreparedTable) -> OverviewView {
    let protein_grid = pivot(table, GroupAxis::DietType, GroupAxis::Category, Nutrient::Protein);

    let view = OverviewView {
        title: "Recipe Analysis Dashboard".to_string(),
        rating_by_protein: mean_rating_bars(
            table,
            "Average Rating by Protein Level",
            "Protein Level",
            "#3498db",
            Tier::ALL.map(|t| (t.label(), t)).to_vec(),
            |r, t| r.levels.protein == Some(*t),
        ),
        rating_by_health_range: mean_rating_bars(
            table,
            "Average Rating by Health Score Range",
            "Health Score Range",
            "#e74c3c",
            HealthScoreRange::ALL.map(|h| (h.label(), h)).to_vec(),
            |r, h| r.health_score_range == Some(*h),
        ),
        protein_by_diet_and_category: HeatmapChart::from_pivot(
            "Nutrient Heatmap".to_string(),
            &protein_grid,
        ),
    };
    debug!("overview: {} diet types", view.protein_by_diet_and_category.y.len());
    view
}

fn mean_rating_bars<K>(
    table: &PreparedTable,
    title: &str,
    x_title: &str,
    color: &'static str,
    groups: Vec<(&str, K)>,
    member: impl Fn(&PreparedRecipe, &K) -> bool,
) -> BarChart {
    let values = groups
        .iter()
        .map(|(_, key)| {
            let ratings: Vec<f64> = table
                .recipes()
                .iter()
                .filter(|r| member(r, key))
                .map(|r| r.recipe.rating)
                .collect();
            (!ratings.is_empty()).then(|| ratings.iter().mean())
        })
        .collect();

    BarChart {
        title: title.to_string(),
        x_title: x_title.to_string(),
        y_title: "Average Rating".to_string(),
        color,
        categories: groups.iter().map(|(label, _)| label.to_string()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepare::prepare;
    use crate::record::RawRecipe;

    fn recipe(diet: &str, calories: f64, protein: f64, rating: f64) -> RawRecipe {
        RawRecipe {
            name: Some(format!("{diet}-{protein}")),
            calories: Some(calories),
            protein: Some(protein),
            fat: Some(1.0),
            sugar: Some(2.0),
            carbs: Some(20.0),
            minutes: Some(30.0),
            n_steps: Some(6.0),
            rating: Some(rating),
            diet_type: Some(diet.to_string()),
        }
    }

    #[test]
    fn test_rating_by_protein_level() {
        let table = prepare(vec![
            recipe("Vegan", 150.0, 5.0, 3.0),
            recipe("Vegan", 150.0, 10.0, 4.0),
            recipe("Keto", 150.0, 15.0, 4.0),
            recipe("Keto", 150.0, 20.0, 5.0),
            recipe("Paleo", 150.0, 25.0, 4.5),
            recipe("Paleo", 150.0, 30.0, 5.0),
        ]);
        let view = overview_view(&table);
        let bars = &view.rating_by_protein;
        assert_eq!(bars.categories, vec!["Low", "Medium", "High"]);
        assert_eq!(bars.values, vec![Some(3.5), Some(4.5), Some(4.75)]);
    }

    #[test]
    fn test_empty_health_range_is_blank() {
        let table = prepare(vec![recipe("Vegan", 150.0, 20.0, 4.0)]);
        let view = overview_view(&table);
        let bars = &view.rating_by_health_range;
        assert_eq!(bars.categories, vec!["Very Low", "Low", "High", "Very High"]);
        assert_eq!(bars.values, vec![None, None, Some(4.0), None]);
    }

    #[test]
    fn test_protein_heatmap_has_blank_cells() {
        let table = prepare(vec![
            recipe("Vegan", 150.0, 20.0, 4.0),
            recipe("Keto", 500.0, 5.0, 3.0),
        ]);
        let heat = overview_view(&table).protein_by_diet_and_category;
        assert_eq!(heat.y, vec!["Keto", "Vegan"]);
        assert_eq!(heat.x_title, "Health Category");
        assert_eq!(heat.y_title, "Diet Type");
        assert!(heat.z.iter().flatten().any(Option::is_none));
    }
}
