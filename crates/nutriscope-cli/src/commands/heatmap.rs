use std::fmt::Write as _;

use nutriscope_core::{HeatmapPanel, NutrientSelection, heatmap_view};

use super::fmt_opt;

pub fn run(data: &str, selection: NutrientSelection, output_path: Option<&str>) {
    let table = super::load_table(data);
    let view = heatmap_view(&table, selection);

    println!("🔥 {}", view.title);
    for panel in &view.panels {
        println!();
        print!("{}", render_panel(panel));
    }

    if let Some(path) = output_path {
        let json = match serde_json::to_string_pretty(&view) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error encoding heat map: {e}");
                std::process::exit(1);
            }
        };
        match std::fs::write(path, json) {
            Ok(()) => println!("\nChart written to {path}"),
            Err(e) => {
                eprintln!("\nFailed to write {path}: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Text rendering of one panel: the mean grid followed by its statistics.
fn render_panel(panel: &HeatmapPanel) -> String {
    let chart = &panel.chart;
    let stats = &panel.stats;
    let mut out = String::new();

    let _ = writeln!(out, "  {}", panel.nutrient.title());
    if chart.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    let _ = write!(out, "  {:<10}", "");
    for col in &chart.x {
        let _ = write!(out, " {col:>12}");
    }
    let _ = writeln!(out);
    for (label, row) in chart.y.iter().zip(&chart.text) {
        let _ = write!(out, "  {label:<10}");
        for cell in row {
            let _ = write!(out, " {cell:>12}");
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out);
    if let Some(hi) = &stats.highest {
        let _ = writeln!(out, "  Highest: {:.1} ({}, {})", hi.value, hi.row, hi.column);
    }
    if let Some(lo) = &stats.lowest {
        let _ = writeln!(out, "  Lowest:  {:.1} ({}, {})", lo.value, lo.row, lo.column);
    }
    let _ = writeln!(out, "  Average: {}", fmt_opt(stats.average, 1));
    let _ = writeln!(out, "  Correlations:");
    for c in &stats.correlations {
        let _ = writeln!(
            out,
            "    {:<10} {:>7}",
            c.nutrient.title(),
            fmt_opt(c.coefficient, 3)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriscope_core::{Nutrient, RawRecipe, prepare};

    fn recipe(diet: &str, protein: f64) -> RawRecipe {
        RawRecipe {
            name: Some(format!("{diet}-{protein}")),
            calories: Some(150.0),
            protein: Some(protein),
            fat: Some(1.0),
            sugar: Some(2.0),
            carbs: Some(protein * 1.5),
            minutes: Some(protein),
            n_steps: Some(3.0),
            rating: Some(4.0),
            diet_type: Some(diet.to_string()),
        }
    }

    #[test]
    fn test_render_panel_lists_grid_and_stats() {
        let table = prepare(vec![recipe("Vegan", 10.0), recipe("Keto", 30.0)]);
        let view = heatmap_view(&table, NutrientSelection::Single(Nutrient::Protein));
        let text = render_panel(&view.panels[0]);
        assert!(text.contains("Keto"));
        assert!(text.contains("Vegan"));
        assert!(text.contains("Highest: 30.0"));
        assert!(text.contains("Lowest:  10.0"));
        assert!(text.contains("Carbs"));
    }

    #[test]
    fn test_render_empty_panel() {
        let table = prepare(Vec::new());
        let view = heatmap_view(&table, NutrientSelection::Single(Nutrient::Sugar));
        assert!(render_panel(&view.panels[0]).contains("(no data)"));
    }
}
