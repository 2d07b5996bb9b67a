pub mod export;
pub mod heatmap;
pub mod serve;
pub mod summary;

use nutriscope_core::PreparedTable;

/// Load and prepare the dataset, exiting with status 1 on failure.
pub fn load_table(path: &str) -> PreparedTable {
    match nutriscope_core::load_prepared(path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error loading {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Format an optional statistic, `-` when absent.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}
