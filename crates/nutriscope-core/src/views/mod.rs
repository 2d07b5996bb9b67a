//! Declarative chart descriptions for the dashboard views.
//!
//! Every view is a pure function of the prepared table and a small piece of UI
//! state. Output is plain serializable data; drawing it is left to whatever
//! renders the JSON.

mod heatmap;
mod overview;
mod popularity;
mod profile;
mod ratings;

use serde::Serialize;

use crate::pivot::PivotTable;
use crate::stats::TrendLine;

pub use heatmap::{HEATMAP_GRID_COLUMNS, HeatmapPanel, HeatmapView, heatmap_view};
pub use overview::{OverviewView, overview_view};
pub use popularity::{PopularityView, health_popularity_view, popularity_view};
pub use profile::nutrient_profile_view;
pub use ratings::{health_rating_view, nutrient_impact_view};

/// Diverging colour scale shared by the heat maps.
pub const HEATMAP_COLORSCALE: &str = "RdBu";

// ---------------------------------------------------------------------------
// Scatter charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Hover text, usually the recipe name.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub color: &'static str,
    pub points: Vec<Point>,
    /// Least-squares fit over this trace's points only.
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Dashed guide line across the whole plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Fitted line drawn over a scatter trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub color: &'static str,
    #[serde(flatten)]
    pub line: TrendLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub traces: Vec<ScatterTrace>,
    pub reference_lines: Vec<ReferenceLine>,
    pub annotation: Option<Annotation>,
}

impl ScatterChart {
    fn new(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            traces: Vec::new(),
            reference_lines: Vec::new(),
            annotation: None,
        }
    }

    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.points.len()).sum()
    }

    /// Trend of the first trace, for single-trace charts.
    pub fn trend(&self) -> Option<&Trend> {
        self.traces.first().and_then(|t| t.trend.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Heat maps
// ---------------------------------------------------------------------------

/// Grid chart. `z[r][c]` is blank (`None`) where no rows fell in the cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub z: Vec<Vec<Option<f64>>>,
    /// Cell labels, one decimal, empty for blank cells.
    pub text: Vec<Vec<String>>,
    pub hover: Vec<Vec<String>>,
    pub colorscale: &'static str,
}

impl HeatmapChart {
    pub(crate) fn from_pivot(title: String, pivot: &PivotTable) -> Self {
        let nutrient = pivot.nutrient.title();
        let text = pivot
            .mean
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.map(|v| format!("{v:.1}")).unwrap_or_default())
                    .collect()
            })
            .collect();
        let hover = pivot
            .rows
            .iter()
            .enumerate()
            .map(|(r, row_label)| {
                pivot
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(c, col_label)| {
                        let mean = pivot.mean[r][c]
                            .map(|v| format!("{v:.1}"))
                            .unwrap_or_else(|| "n/a".to_string());
                        let sd = pivot.std_dev[r][c]
                            .map(|v| format!("{v:.2}"))
                            .unwrap_or_else(|| "n/a".to_string());
                        format!(
                            "{}: {col_label}<br>{}: {row_label}<br>Average {nutrient}: {mean}<br>Std Dev: {sd}<br>Sample Size: {}",
                            pivot.column_axis.title(),
                            pivot.row_axis.title(),
                            pivot.count[r][c],
                        )
                    })
                    .collect()
            })
            .collect();

        Self {
            title,
            x_title: pivot.column_axis.title().to_string(),
            y_title: pivot.row_axis.title().to_string(),
            x: pivot.columns.clone(),
            y: pivot.rows.clone(),
            z: pivot.mean.clone(),
            text,
            hover,
            colorscale: HEATMAP_COLORSCALE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One bar per category; `None` where the category has no rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub color: &'static str,
    pub categories: Vec<String>,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountSeries {
    pub name: String,
    /// Aligned with the chart's `categories`.
    pub counts: Vec<usize>,
}

/// Grouped bar chart of counts, one series per legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedCountChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub legend_title: String,
    pub categories: Vec<String>,
    pub series: Vec<CountSeries>,
}

impl GroupedCountChart {
    pub fn total(&self) -> usize {
        self.series.iter().flat_map(|s| &s.counts).sum()
    }
}
