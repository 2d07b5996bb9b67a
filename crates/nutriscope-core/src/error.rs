//! Error types for loading the dataset and parsing view selections.

use std::path::PathBuf;

/// Fatal errors raised while reading the recipe dataset.
///
/// Any of these aborts startup: there is exactly one data source and no
/// partial dashboard is served without it.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("line {line}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// A UI selection that does not name a known nutrient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown nutrient '{0}' (expected one of: all, protein, calories, fat, sugar, carbs)")]
    UnknownNutrient(String),
}
