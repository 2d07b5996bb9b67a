//! Statistics panel for the heat map, plus the correlation and trend-line
//! helpers shared by the scatter views.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::nutrient::Nutrient;
use crate::pivot::PivotTable;
use crate::table::PreparedTable;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// An extreme pivot cell and where it sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellExtreme {
    pub value: f64,
    pub row: String,
    pub column: String,
}

/// Correlation of the selected nutrient with another one. `None` when
/// undefined (fewer than two paired values or zero variance).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientCorrelation {
    pub nutrient: Nutrient,
    pub coefficient: Option<f64>,
}

/// Summary shown next to a heat map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsPanel {
    pub nutrient: Nutrient,
    pub highest: Option<CellExtreme>,
    pub lowest: Option<CellExtreme>,
    /// Mean of the per-column means over non-empty cells.
    pub average: Option<f64>,
    /// Sorted by absolute coefficient, descending; undefined ones last.
    pub correlations: Vec<NutrientCorrelation>,
}

/// Ordinary least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: Option<f64>,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pearson correlation of paired samples.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let cov = xs.iter().covariance(ys.iter());
    let denom = xs.iter().std_dev() * ys.iter().std_dev();
    if !denom.is_finite() || denom < 1e-12 {
        return None;
    }
    Some(cov / denom)
}

/// Least-squares line through `points`. `None` for fewer than two points
/// or when every x is equal.
pub fn ols(points: &[(f64, f64)]) -> Option<TrendLine> {
    if points.len() < 2 {
        return None;
    }
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let var_x = xs.iter().variance();
    if !var_x.is_finite() || var_x < 1e-12 {
        return None;
    }
    let slope = xs.iter().covariance(ys.iter()) / var_x;
    let intercept = ys.iter().mean() - slope * xs.iter().mean();
    Some(TrendLine {
        slope,
        intercept,
        r_squared: pearson(&xs, &ys).map(|r| r * r),
    })
}

/// Correlations of `nutrient` with each other nutrient over all prepared
/// rows, using only rows where both values are present.
pub fn correlations(table: &PreparedTable, nutrient: Nutrient) -> Vec<NutrientCorrelation> {
    let mut out: Vec<NutrientCorrelation> = Nutrient::ALL
        .into_iter()
        .filter(|&other| other != nutrient)
        .map(|other| {
            let (xs, ys): (Vec<f64>, Vec<f64>) = table
                .recipes()
                .iter()
                .filter_map(|r| Some((r.recipe.nutrient(nutrient)?, r.recipe.nutrient(other)?)))
                .unzip();
            NutrientCorrelation {
                nutrient: other,
                coefficient: pearson(&xs, &ys),
            }
        })
        .collect();

    out.sort_by(|a, b| match (a.coefficient, b.coefficient) {
        (Some(x), Some(y)) => y.abs().total_cmp(&x.abs()),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    out
}

/// Build the statistics panel for one pivot.
pub fn stats_panel(table: &PreparedTable, pivot: &PivotTable) -> StatsPanel {
    let mut highest: Option<(usize, usize, f64)> = None;
    let mut lowest: Option<(usize, usize, f64)> = None;
    // Row-major scan; the first cell wins ties.
    for (r, c, v) in pivot.cells() {
        if highest.is_none_or(|(_, _, h)| v > h) {
            highest = Some((r, c, v));
        }
        if lowest.is_none_or(|(_, _, l)| v < l) {
            lowest = Some((r, c, v));
        }
    }
    let locate = |(r, c, value): (usize, usize, f64)| CellExtreme {
        value,
        row: pivot.rows[r].clone(),
        column: pivot.columns[c].clone(),
    };

    StatsPanel {
        nutrient: pivot.nutrient,
        highest: highest.map(locate),
        lowest: lowest.map(locate),
        average: mean_of_column_means(pivot),
        correlations: correlations(table, pivot.nutrient),
    }
}

fn mean_of_column_means(pivot: &PivotTable) -> Option<f64> {
    let column_means: Vec<f64> = (0..pivot.columns.len())
        .filter_map(|c| {
            let col: Vec<f64> = pivot.mean.iter().filter_map(|row| row[c]).collect();
            (!col.is_empty()).then(|| col.iter().mean())
        })
        .collect();
    (!column_means.is_empty()).then(|| column_means.iter().mean())
}
