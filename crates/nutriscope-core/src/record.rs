//! Recipe records and CSV loading.
//!
//! The dataset is read once at startup. Header names are trimmed before
//! column lookup; empty cells and the usual NA spellings are treated as
//! missing values. Any other unparsable number aborts the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::LoadError;
use crate::nutrient::Nutrient;

/// Cell values read as missing, matching common NA spellings.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
];

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One row of the source file, every field possibly missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecipe {
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub sugar: Option<f64>,
    pub carbs: Option<f64>,
    pub minutes: Option<f64>,
    pub n_steps: Option<f64>,
    pub rating: Option<f64>,
    pub diet_type: Option<String>,
}

/// A row with every essential field present.
///
/// `carbs` and `n_steps` are not essential; aggregations skip rows where
/// they are missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub carbs: Option<f64>,
    pub minutes: f64,
    pub n_steps: Option<f64>,
    pub rating: f64,
    pub diet_type: String,
}

impl RawRecipe {
    /// Promote to a [`Recipe`] if protein, calories, sugar, fat, name,
    /// rating, minutes and diet type are all present.
    pub fn complete(self) -> Option<Recipe> {
        Some(Recipe {
            name: self.name?,
            calories: self.calories?,
            protein: self.protein?,
            fat: self.fat?,
            sugar: self.sugar?,
            carbs: self.carbs,
            minutes: self.minutes?,
            n_steps: self.n_steps,
            rating: self.rating?,
            diet_type: self.diet_type?,
        })
    }
}

impl Recipe {
    /// Value of a nutrient column; `None` only for missing carbs.
    pub fn nutrient(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::Protein => Some(self.protein),
            Nutrient::Calories => Some(self.calories),
            Nutrient::Fat => Some(self.fat),
            Nutrient::Sugar => Some(self.sugar),
            Nutrient::Carbs => self.carbs,
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loading
// ---------------------------------------------------------------------------

/// Read every row of the CSV file at `path`.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<RawRecipe>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// Read every row from any CSV source.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRecipe>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnIndex::locate(&headers)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(columns.parse(&record)?);
    }
    Ok(rows)
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    name: usize,
    calories: usize,
    protein: usize,
    fat: usize,
    sugar: usize,
    carbs: usize,
    minutes: usize,
    n_steps: usize,
    rating: usize,
    diet_type: usize,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or(LoadError::MissingColumn(column))
        };

        Ok(Self {
            name: find("name")?,
            calories: find("calories")?,
            protein: find("protein")?,
            fat: find("fat")?,
            sugar: find("sugar")?,
            carbs: find("carbs")?,
            minutes: find("minutes")?,
            n_steps: find("n_steps")?,
            rating: find("rating")?,
            diet_type: find("Diet_Type")?,
        })
    }

    fn parse(&self, record: &csv::StringRecord) -> Result<RawRecipe, LoadError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let number = |idx: usize, column: &'static str| parse_number(record.get(idx), line, column);

        Ok(RawRecipe {
            name: parse_text(record.get(self.name)),
            calories: number(self.calories, "calories")?,
            protein: number(self.protein, "protein")?,
            fat: number(self.fat, "fat")?,
            sugar: number(self.sugar, "sugar")?,
            carbs: number(self.carbs, "carbs")?,
            minutes: number(self.minutes, "minutes")?,
            n_steps: number(self.n_steps, "n_steps")?,
            rating: number(self.rating, "rating")?,
            diet_type: parse_text(record.get(self.diet_type)),
        })
    }
}

fn is_missing(field: &str) -> bool {
    MISSING_TOKENS.contains(&field.trim())
}

fn parse_text(field: Option<&str>) -> Option<String> {
    field.filter(|f| !is_missing(f)).map(str::to_string)
}

fn parse_number(
    field: Option<&str>,
    line: u64,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    let Some(raw) = field.filter(|f| !is_missing(f)) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f64>()
        // Any NaN spelling is a missing value, not a number.
        .map(|v| (!v.is_nan()).then_some(v))
        .map_err(|_| LoadError::InvalidNumber {
            line,
            column,
            value: raw.to_string(),
        })
}
