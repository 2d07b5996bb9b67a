//! Two-axis pivot of a nutrient over the prepared table.
//!
//! Cells aggregate with mean, sample standard deviation and count. A cell with
//! no supporting rows has no mean (blank), never zero. Axis labels appear only
//! if at least one row with a value falls on them.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::nutrient::Nutrient;
use crate::prepare::PreparedRecipe;
use crate::table::PreparedTable;

/// A categorical column usable as a pivot axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupAxis {
    TimeCategory,
    DietType,
    Category,
}

impl GroupAxis {
    pub fn title(self) -> &'static str {
        match self {
            Self::TimeCategory => "Time Category",
            Self::DietType => "Diet Type",
            Self::Category => "Health Category",
        }
    }

    /// Sort key and label of a row on this axis. Ordered bands sort by rank,
    /// free-text labels alphabetically.
    fn key(self, row: &PreparedRecipe) -> Option<(usize, String)> {
        match self {
            Self::TimeCategory => row
                .time_category
                .map(|t| (t as usize, t.label().to_string())),
            Self::DietType => Some((0, row.recipe.diet_type.clone())),
            Self::Category => Some((row.category as usize, row.category.label().to_string())),
        }
    }
}

/// Aggregated grid, `rows × columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub row_axis: GroupAxis,
    pub column_axis: GroupAxis,
    pub nutrient: Nutrient,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub mean: Vec<Vec<Option<f64>>>,
    pub std_dev: Vec<Vec<Option<f64>>>,
    pub count: Vec<Vec<usize>>,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Non-empty mean cells with their row and column indices, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.mean.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, v)| v.map(|v| (r, c, v)))
        })
    }
}

/// Group prepared rows by two axes and aggregate `nutrient`.
pub fn pivot(
    table: &PreparedTable,
    row_axis: GroupAxis,
    column_axis: GroupAxis,
    nutrient: Nutrient,
) -> PivotTable {
    let mut groups: BTreeMap<(usize, String), BTreeMap<(usize, String), Vec<f64>>> =
        BTreeMap::new();
    let mut column_keys: BTreeSet<(usize, String)> = BTreeSet::new();

    for row in table.recipes() {
        let (Some(rk), Some(ck), Some(value)) = (
            row_axis.key(row),
            column_axis.key(row),
            row.recipe.nutrient(nutrient),
        ) else {
            continue;
        };
        column_keys.insert(ck.clone());
        groups
            .entry(rk)
            .or_default()
            .entry(ck)
            .or_default()
            .push(value);
    }

    let columns: Vec<(usize, String)> = column_keys.into_iter().collect();
    let mut mean = Vec::with_capacity(groups.len());
    let mut std_dev = Vec::with_capacity(groups.len());
    let mut count = Vec::with_capacity(groups.len());

    for cells in groups.values() {
        let mut mean_row = Vec::with_capacity(columns.len());
        let mut std_row = Vec::with_capacity(columns.len());
        let mut count_row = Vec::with_capacity(columns.len());
        for ck in &columns {
            let values = cells.get(ck).map(Vec::as_slice).unwrap_or(&[]);
            count_row.push(values.len());
            mean_row.push((!values.is_empty()).then(|| values.iter().mean()));
            std_row.push((values.len() > 1).then(|| values.iter().std_dev()));
        }
        mean.push(mean_row);
        std_dev.push(std_row);
        count.push(count_row);
    }

    PivotTable {
        row_axis,
        column_axis,
        nutrient,
        rows: groups.into_keys().map(|(_, label)| label).collect(),
        columns: columns.into_iter().map(|(_, label)| label).collect(),
        mean,
        std_dev,
        count,
    }
}
