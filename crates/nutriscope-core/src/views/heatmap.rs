//! Nutrient heat maps over diet type and cooking time.

use log::debug;
use serde::Serialize;

use super::HeatmapChart;
use crate::nutrient::{Nutrient, NutrientSelection};
use crate::pivot::{GroupAxis, pivot};
use crate::stats::{StatsPanel, stats_panel};
use crate::table::PreparedTable;

/// Panels per row in "all nutrients" mode.
pub const HEATMAP_GRID_COLUMNS: usize = 3;

/// One nutrient's heat map with its own statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapPanel {
    pub nutrient: Nutrient,
    pub grid_row: usize,
    pub grid_col: usize,
    pub chart: HeatmapChart,
    pub stats: StatsPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapView {
    pub selection: NutrientSelection,
    pub title: String,
    pub columns: usize,
    pub panels: Vec<HeatmapPanel>,
}

/// Mean of the selected nutrient by preparation-time band (rows) and diet
/// type (columns). `All` lays out one independent panel per nutrient.
pub fn heatmap_view(table: &PreparedTable, selection: NutrientSelection) -> HeatmapView {
    let nutrients = selection.nutrients();
    let title = match selection {
        NutrientSelection::All => {
            "Nutrient Heat Maps by Diet Type and Preparation Time".to_string()
        }
        NutrientSelection::Single(n) => {
            format!("Average {} by Diet Type and Preparation Time", n.title())
        }
    };
    let columns = nutrients.len().min(HEATMAP_GRID_COLUMNS);

    let panels = nutrients
        .into_iter()
        .enumerate()
        .map(|(i, nutrient)| {
            let grid = pivot(table, GroupAxis::TimeCategory, GroupAxis::DietType, nutrient);
            let chart_title = match selection {
                NutrientSelection::All => nutrient.title().to_string(),
                NutrientSelection::Single(_) => title.clone(),
            };
            HeatmapPanel {
                nutrient,
                grid_row: i / columns,
                grid_col: i % columns,
                stats: stats_panel(table, &grid),
                chart: HeatmapChart::from_pivot(chart_title, &grid),
            }
        })
        .collect::<Vec<_>>();

    debug!("heatmap: selection={selection}, {} panel(s)", panels.len());
    HeatmapView {
        selection,
        title,
        columns,
        panels,
    }
}
