//! The five nutrient columns and the heat-map nutrient selector.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SelectionError;

/// A numeric nutrient column of the recipe table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Protein,
    Calories,
    Fat,
    Sugar,
    Carbs,
}

impl Nutrient {
    /// Dropdown order, also the panel order of the "all nutrients" grid.
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Protein,
        Nutrient::Calories,
        Nutrient::Fat,
        Nutrient::Sugar,
        Nutrient::Carbs,
    ];

    /// Column name in the source CSV.
    pub fn column(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Calories => "calories",
            Self::Fat => "fat",
            Self::Sugar => "sugar",
            Self::Carbs => "carbs",
        }
    }

    /// Title-cased display name.
    pub fn title(self) -> &'static str {
        match self {
            Self::Protein => "Protein",
            Self::Calories => "Calories",
            Self::Fat => "Fat",
            Self::Sugar => "Sugar",
            Self::Carbs => "Carbs",
        }
    }

    /// Name of the derived tier column, e.g. `protein_level`.
    pub fn level_column(self) -> &'static str {
        match self {
            Self::Protein => "protein_level",
            Self::Calories => "calories_level",
            Self::Fat => "fat_level",
            Self::Sugar => "sugar_level",
            Self::Carbs => "carbs_level",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Nutrient {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nutrient::ALL
            .into_iter()
            .find(|n| n.column() == s)
            .ok_or_else(|| SelectionError::UnknownNutrient(s.to_string()))
    }
}

/// Value emitted by the heat-map dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientSelection {
    All,
    Single(Nutrient),
}

impl NutrientSelection {
    /// Nutrients the selection expands to, in grid order.
    pub fn nutrients(self) -> Vec<Nutrient> {
        match self {
            Self::All => Nutrient::ALL.to_vec(),
            Self::Single(n) => vec![n],
        }
    }
}

impl Default for NutrientSelection {
    fn default() -> Self {
        Self::Single(Nutrient::Protein)
    }
}

impl fmt::Display for NutrientSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Single(n) => n.fmt(f),
        }
    }
}

impl FromStr for NutrientSelection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Single)
        }
    }
}

impl Serialize for NutrientSelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_nutrient() {
        for n in Nutrient::ALL {
            assert_eq!(n.column().parse::<Nutrient>(), Ok(n));
        }
    }

    #[test]
    fn test_parse_selection_all() {
        assert_eq!("all".parse(), Ok(NutrientSelection::All));
        assert_eq!(NutrientSelection::All.nutrients().len(), 5);
    }

    #[test]
    fn test_parse_selection_single() {
        assert_eq!(
            "sugar".parse(),
            Ok(NutrientSelection::Single(Nutrient::Sugar))
        );
    }

    #[test]
    fn test_parse_unknown_is_error() {
        let err = "fiber".parse::<NutrientSelection>().unwrap_err();
        assert_eq!(err, SelectionError::UnknownNutrient("fiber".to_string()));
        // Case-sensitive, like the dropdown values.
        assert!("Protein".parse::<Nutrient>().is_err());
    }

    #[test]
    fn test_selection_serializes_as_value() {
        let json = serde_json::to_string(&NutrientSelection::Single(Nutrient::Carbs)).unwrap();
        assert_eq!(json, "\"carbs\"");
        let json = serde_json::to_string(&NutrientSelection::All).unwrap();
        assert_eq!(json, "\"all\"");
    }
}
