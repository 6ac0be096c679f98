//! Categorical labels shared by job titles and salary observations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seniority of a job title.
///
/// Stored as free text on [`JobTitle`](super::JobTitle) so seeding never
/// rejects an unexpected label; use [`SeniorityLevel::from_str`] to interpret
/// the known ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeniorityLevel {
    /// Entry level.
    Entry,
    /// Mid level.
    Mid,
    /// Senior individual contributor.
    Senior,
    /// People manager.
    Manager,
    /// Executive.
    #[serde(rename = "C-Level")]
    CLevel,
}

impl SeniorityLevel {
    /// All seniority levels, from most junior to most senior.
    pub const ALL: [SeniorityLevel; 5] = [
        SeniorityLevel::Entry,
        SeniorityLevel::Mid,
        SeniorityLevel::Senior,
        SeniorityLevel::Manager,
        SeniorityLevel::CLevel,
    ];

    /// Returns the stored label for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::Entry => "Entry",
            SeniorityLevel::Mid => "Mid",
            SeniorityLevel::Senior => "Senior",
            SeniorityLevel::Manager => "Manager",
            SeniorityLevel::CLevel => "C-Level",
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not a known level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level: {0}")]
pub struct UnknownLevel(pub String);

impl FromStr for SeniorityLevel {
    type Err = UnknownLevel;

    /// Parses a label case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SeniorityLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLevel(trimmed.to_string()))
    }
}

/// How trustworthy a salary observation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// Few or unverified data points.
    Low,
    /// Reasonable sample.
    Medium,
    /// Large or verified sample.
    High,
}

impl ConfidenceLevel {
    /// Returns the stored label for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::High => "High",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfidenceLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [
            ConfidenceLevel::Low,
            ConfidenceLevel::Medium,
            ConfidenceLevel::High,
        ]
        .into_iter()
        .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| UnknownLevel(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seniority_case_insensitive() {
        assert_eq!("senior".parse::<SeniorityLevel>(), Ok(SeniorityLevel::Senior));
        assert_eq!(" C-LEVEL ".parse::<SeniorityLevel>(), Ok(SeniorityLevel::CLevel));
    }

    #[test]
    fn test_parse_unknown_seniority() {
        assert_eq!(
            "Principal".parse::<SeniorityLevel>(),
            Err(UnknownLevel("Principal".to_string()))
        );
    }

    #[test]
    fn test_unknown_level_message() {
        let err = "certain".parse::<ConfidenceLevel>().unwrap_err();
        assert_eq!(err.to_string(), "unknown level: certain");
    }

    #[test]
    fn test_seniority_display_round_trips_labels() {
        for level in SeniorityLevel::ALL {
            assert_eq!(level.to_string().parse::<SeniorityLevel>(), Ok(level));
        }
    }

    #[test]
    fn test_seniority_serializes_c_level_with_hyphen() {
        let json = serde_json::to_string(&SeniorityLevel::CLevel).unwrap();
        assert_eq!(json, "\"C-Level\"");
    }

    #[test]
    fn test_parse_confidence() {
        assert_eq!("high".parse::<ConfidenceLevel>(), Ok(ConfidenceLevel::High));
        assert!("certain".parse::<ConfidenceLevel>().is_err());
    }
}
