//! Rating scatters: preparation effort and health score against rating.

use log::debug;
use serde::Serialize;

use super::{Point, ScatterChart, ScatterTrace, Trend};
use crate::prepare::{Category, PreparedRecipe};
use crate::stats::ols;
use crate::table::PreparedTable;

const TREND_COLOR: &str = "#e74c3c";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularityView {
    pub by_minutes: ScatterChart,
    pub by_steps: ScatterChart,
}

/// Preparation time and step count against rating, each with a fitted line.
pub fn popularity_view(table: &PreparedTable) -> PopularityView {
    let view = PopularityView {
        by_minutes: rating_scatter(
            table,
            "Preparation Time vs Ratings",
            "Time (minutes)",
            "#2ecc71",
            |r| Some(r.recipe.minutes),
        ),
        by_steps: rating_scatter(
            table,
            "Number of Steps vs Ratings",
            "Number of Steps",
            "#3498db",
            |r| r.recipe.n_steps,
        ),
    };
    debug!(
        "popularity: {} minute points, {} step points",
        view.by_minutes.point_count(),
        view.by_steps.point_count()
    );
    view
}

fn rating_scatter(
    table: &PreparedTable,
    title: &str,
    x_title: &str,
    color: &'static str,
    x_of: impl Fn(&PreparedRecipe) -> Option<f64>,
) -> ScatterChart {
    let points: Vec<Point> = table
        .recipes()
        .iter()
        .filter_map(|r| {
            Some(Point {
                x: x_of(r)?,
                y: r.recipe.rating,
                label: r.recipe.name.clone(),
            })
        })
        .collect();

    let mut chart = ScatterChart::new(title, x_title, "Rating");
    chart.traces.push(ScatterTrace {
        name: "Recipes".to_string(),
        color,
        trend: fit(&points, TREND_COLOR),
        points,
    });
    chart
}

fn fit(points: &[Point], color: &'static str) -> Option<Trend> {
    let xy: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    ols(&xy).map(|line| Trend { color, line })
}

/// Health score against rating, coloured by category, with one fitted line
/// per category trace.
pub fn health_popularity_view(table: &PreparedTable) -> ScatterChart {
    let mut chart = ScatterChart::new(
        "Relationship Between Health Score and Rating",
        "Health Score",
        "Rating",
    );
    chart.traces = [
        (Category::Moderate, "orange"),
        (Category::Healthy, "green"),
        (Category::Unhealthy, "red"),
    ]
    .into_iter()
    .map(|(category, color)| {
        let points: Vec<Point> = table
            .recipes()
            .iter()
            .filter(|r| r.category == category)
            .map(|r| Point {
                x: r.health_score,
                y: r.recipe.rating,
                label: r.recipe.name.clone(),
            })
            .collect();
        ScatterTrace {
            name: category.to_string(),
            color,
            trend: fit(&points, "darkgray"),
            points,
        }
    })
    .collect();

    debug!(
        "health popularity: {} points, {} fitted traces",
        chart.point_count(),
        chart.traces.iter().filter(|t| t.trend.is_some()).count()
    );
    chart
}
