//! Categorical bands derived from numeric columns.
//!
//! Two kinds of cut are used: quantile cuts (nutrient tiers, preparation-time
//! bands) whose edges come from the data, and fixed-edge cuts (health-score
//! range, rating band).

use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Quantile cut
// ---------------------------------------------------------------------------

/// Quantile of an ascending-sorted slice, linear interpolation between order
/// statistics. `q` is clamped to `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Equal-frequency bin edges over a sample.
///
/// Bin `i` covers `(edges[i], edges[i + 1]]`, with the minimum itself placed
/// in bin 0. Repeated edges leave the corresponding bins empty.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileCut {
    edges: Vec<f64>,
}

impl QuantileCut {
    /// Compute `bins` equal-frequency bins. Non-finite values are ignored.
    /// Returns `None` for an empty sample or zero bins.
    pub fn new(values: impl IntoIterator<Item = f64>, bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let edges = (0..=bins)
            .map(|i| quantile(&sorted, i as f64 / bins as f64))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { edges })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Index of the bin holding `value`, or `None` outside the sample range.
    pub fn bin(&self, value: f64) -> Option<usize> {
        let (first, last) = (*self.edges.first()?, *self.edges.last()?);
        if !(value >= first && value <= last) {
            return None;
        }
        self.edges[1..].iter().position(|&upper| value <= upper)
    }
}

// ---------------------------------------------------------------------------
// Band labels
// ---------------------------------------------------------------------------

/// Tertile of a nutrient's distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Quartile band of preparation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TimeCategory {
    Quick,
    Short,
    Medium,
    Long,
}

impl TimeCategory {
    pub const ALL: [TimeCategory; 4] = [
        TimeCategory::Quick,
        TimeCategory::Short,
        TimeCategory::Medium,
        TimeCategory::Long,
    ];

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Quick => "Quick",
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }
}

/// Fixed-edge band of the health score, left-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum HealthScoreRange {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl HealthScoreRange {
    pub const ALL: [HealthScoreRange; 4] = [
        HealthScoreRange::VeryLow,
        HealthScoreRange::Low,
        HealthScoreRange::High,
        HealthScoreRange::VeryHigh,
    ];

    /// `[-100,-50)`, `[-50,0)`, `[0,50)`, `[50,100)`; anything else is `None`.
    pub fn from_score(score: f64) -> Option<Self> {
        if !(-100.0..100.0).contains(&score) {
            None
        } else if score < -50.0 {
            Some(Self::VeryLow)
        } else if score < 0.0 {
            Some(Self::Low)
        } else if score < 50.0 {
            Some(Self::High)
        } else {
            Some(Self::VeryHigh)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Label with the numeric span, used as a chart axis tick.
    pub fn span_label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low (-100 to -50)",
            Self::Low => "Low (-50 to 0)",
            Self::High => "High (0 to 50)",
            Self::VeryHigh => "Very High (50 to 100)",
        }
    }
}

/// Band of the user rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RatingCategory {
    Low,
    Average,
    High,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 3] = [
        RatingCategory::Low,
        RatingCategory::Average,
        RatingCategory::High,
    ];

    /// Below 3 is low, below 4 average, the rest high.
    pub fn from_rating(rating: f64) -> Self {
        if rating < 3.0 {
            Self::Low
        } else if rating < 4.0 {
            Self::Average
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Average => "Average",
            Self::High => "High",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(Tier, TimeCategory, HealthScoreRange, RatingCategory);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_tertile_bins() {
        let cut = QuantileCut::new((1..=9).map(f64::from), 3).unwrap();
        // Edges at 1, 11/3, 19/3, 9.
        assert_eq!(cut.bin(1.0), Some(0));
        assert_eq!(cut.bin(3.0), Some(0));
        assert_eq!(cut.bin(4.0), Some(1));
        assert_eq!(cut.bin(6.0), Some(1));
        assert_eq!(cut.bin(7.0), Some(2));
        assert_eq!(cut.bin(9.0), Some(2));
    }

    #[test]
    fn test_bin_outside_range() {
        let cut = QuantileCut::new([1.0, 2.0, 3.0], 3).unwrap();
        assert_eq!(cut.bin(0.5), None);
        assert_eq!(cut.bin(3.5), None);
        assert_eq!(cut.bin(f64::NAN), None);
    }

    #[test]
    fn test_duplicate_edges_do_not_fail() {
        // Heavily tied data collapses the middle bin.
        let cut = QuantileCut::new([0.0, 0.0, 0.0, 0.0, 0.0, 10.0], 3).unwrap();
        assert_eq!(cut.bin(0.0), Some(0));
        assert_eq!(cut.bin(10.0), Some(2));
    }

    #[test]
    fn test_empty_sample() {
        assert!(QuantileCut::new(Vec::<f64>::new(), 3).is_none());
        assert!(QuantileCut::new([f64::NAN], 3).is_none());
        assert!(QuantileCut::new([1.0], 0).is_none());
    }

    #[test]
    fn test_health_score_range_edges() {
        assert_eq!(HealthScoreRange::from_score(-100.0), Some(HealthScoreRange::VeryLow));
        assert_eq!(HealthScoreRange::from_score(-50.0), Some(HealthScoreRange::Low));
        assert_eq!(HealthScoreRange::from_score(-0.1), Some(HealthScoreRange::Low));
        assert_eq!(HealthScoreRange::from_score(0.0), Some(HealthScoreRange::High));
        assert_eq!(HealthScoreRange::from_score(50.0), Some(HealthScoreRange::VeryHigh));
        assert_eq!(HealthScoreRange::from_score(100.0), None);
        assert_eq!(HealthScoreRange::from_score(f64::NAN), None);
    }

    #[test]
    fn test_rating_category() {
        assert_eq!(RatingCategory::from_rating(2.9), RatingCategory::Low);
        assert_eq!(RatingCategory::from_rating(3.0), RatingCategory::Average);
        assert_eq!(RatingCategory::from_rating(4.0), RatingCategory::High);
        assert_eq!(RatingCategory::from_rating(5.0), RatingCategory::High);
    }

    #[test]
    fn test_labels_serialize_with_spaces() {
        let json = serde_json::to_string(&HealthScoreRange::VeryHigh).unwrap();
        assert_eq!(json, "\"Very High\"");
        assert_eq!(HealthScoreRange::VeryLow.to_string(), "Very Low");
    }
}
