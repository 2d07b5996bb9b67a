//! Calories against health score, split by category.

use log::debug;

use super::{Annotation, Orientation, Point, ReferenceLine, ScatterChart, ScatterTrace};
use crate::prepare::{CALORIE_THRESHOLD, Category, HEALTHY_SCORE, UNHEALTHY_SCORE};
use crate::table::PreparedTable;

/// Trace order and styling of the profile scatter.
const TRACES: [(Category, &str, &str); 3] = [
    (Category::Moderate, "red", "Moderate (High)"),
    (Category::Healthy, "green", "Healthy (Low)"),
    (Category::Unhealthy, "blue", "Unhealthy (Medium)"),
];

/// Calories vs health score, one trace per category, with the classification
/// thresholds drawn as guides.
///
/// `selected` is an index into the sidebar list. When it resolves, the first
/// row with that name is annotated; otherwise the chart carries no annotation.
pub fn nutrient_profile_view(table: &PreparedTable, selected: Option<usize>) -> ScatterChart {
    let mut chart = ScatterChart::new("Nutrient Profile Explorer", "Calories", "Health Score");

    chart.traces = TRACES
        .into_iter()
        .map(|(category, color, name)| ScatterTrace {
            name: name.to_string(),
            color,
            points: table
                .recipes()
                .iter()
                .filter(|r| r.category == category)
                .map(|r| Point {
                    x: r.recipe.calories,
                    y: r.health_score,
                    label: r.recipe.name.clone(),
                })
                .collect(),
            trend: None,
        })
        .collect();

    chart.reference_lines = vec![
        ReferenceLine {
            orientation: Orientation::Vertical,
            value: CALORIE_THRESHOLD,
            color: "gray",
        },
        ReferenceLine {
            orientation: Orientation::Horizontal,
            value: HEALTHY_SCORE,
            color: "green",
        },
        ReferenceLine {
            orientation: Orientation::Horizontal,
            value: UNHEALTHY_SCORE,
            color: "blue",
        },
    ];

    chart.annotation = selected
        .and_then(|idx| table.recipe_by_sidebar_index(idx))
        .map(|row| Annotation {
            x: row.recipe.calories,
            y: row.health_score,
            text: format!("<b>{}</b><br>Category: {}", row.recipe.name, row.category),
        });

    debug!(
        "nutrient profile: {} points, selected={selected:?}, annotated={}",
        chart.point_count(),
        chart.annotation.is_some()
    );
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepare::prepare;
    use crate::record::RawRecipe;

    fn recipe(name: &str, calories: f64, protein: f64, sugar: f64, fat: f64) -> RawRecipe {
        RawRecipe {
            name: Some(name.to_string()),
            calories: Some(calories),
            protein: Some(protein),
            fat: Some(fat),
            sugar: Some(sugar),
            carbs: Some(12.0),
            minutes: Some(25.0),
            n_steps: Some(6.0),
            rating: Some(4.0),
            diet_type: Some("Vegan".to_string()),
        }
    }

    fn sample() -> PreparedTable {
        prepare(vec![
            recipe("Lentil Soup", 150.0, 20.0, 2.0, 1.0),
            recipe("Chocolate Cake", 500.0, 5.0, 30.0, 20.0),
            recipe("Fruit Cup", 150.0, 5.0, 10.0, 5.0),
        ])
    }

    #[test]
    fn test_traces_in_fixed_order() {
        let chart = nutrient_profile_view(&sample(), None);
        let names: Vec<_> = chart.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Moderate (High)", "Healthy (Low)", "Unhealthy (Medium)"]
        );
        let colors: Vec<_> = chart.traces.iter().map(|t| t.color).collect();
        assert_eq!(colors, vec!["red", "green", "blue"]);
        assert_eq!(chart.traces[0].points[0].label, "Fruit Cup");
        assert_eq!(chart.traces[1].points[0].label, "Lentil Soup");
        assert_eq!(chart.traces[2].points[0].label, "Chocolate Cake");
        assert_eq!(chart.point_count(), 3);
    }

    #[test]
    fn test_reference_lines() {
        let chart = nutrient_profile_view(&sample(), None);
        let lines: Vec<_> = chart
            .reference_lines
            .iter()
            .map(|l| (l.orientation, l.value))
            .collect();
        assert_eq!(
            lines,
            vec![
                (Orientation::Vertical, 200.0),
                (Orientation::Horizontal, 7.0),
                (Orientation::Horizontal, 4.0),
            ]
        );
    }

    #[test]
    fn test_selected_recipe_is_annotated() {
        let chart = nutrient_profile_view(&sample(), Some(1));
        let note = chart.annotation.unwrap();
        assert_eq!(note.x, 500.0);
        assert!((note.y - -3.2).abs() < 1e-9);
        assert!(note.text.contains("Chocolate Cake"));
        assert!(note.text.contains("Category: Unhealthy"));
    }

    #[test]
    fn test_out_of_range_click_has_no_annotation() {
        let table = sample();
        assert!(nutrient_profile_view(&table, Some(3)).annotation.is_none());
        assert!(nutrient_profile_view(&table, Some(usize::MAX)).annotation.is_none());
        assert!(nutrient_profile_view(&table, None).annotation.is_none());
    }

    #[test]
    fn test_empty_table_gives_empty_traces() {
        let chart = nutrient_profile_view(&prepare(Vec::new()), Some(0));
        assert_eq!(chart.traces.len(), 3);
        assert_eq!(chart.point_count(), 0);
        assert!(chart.annotation.is_none());
    }
}
