//! Experience band model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named range of years of experience, e.g. `SNR` for 5-10 years.
///
/// `code` is both the natural key and the primary key. Bands are created by
/// seeding and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExperienceBand {
    /// Short code, e.g. "JNR", "MID", "SNR", "LDR", "TRN".
    pub code: String,
    /// Human-readable label.
    pub label: String,
    /// Lower bound in years, if any.
    pub min_years: Option<i64>,
    /// Upper bound in years, if any.
    pub max_years: Option<i64>,
    /// Seniority level usually associated with this band.
    pub default_seniority_level: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

impl ExperienceBand {
    /// Creates a band with only the required fields set.
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            min_years: None,
            max_years: None,
            default_seniority_level: None,
            description: None,
        }
    }

    /// Sets the year range.
    pub fn with_years(mut self, min_years: Option<i64>, max_years: Option<i64>) -> Self {
        self.min_years = min_years;
        self.max_years = max_years;
        self
    }

    /// Returns false only when both bounds are present and `min_years > max_years`.
    ///
    /// The range is expected to be ordered but is not enforced; seeding logs
    /// a warning for bands where this returns false.
    pub fn has_ordered_range(&self) -> bool {
        match (self.min_years, self.max_years) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

impl fmt::Display for ExperienceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.label)
    }
}
