//! Job title model.
//!
//! Job titles are reference data: they are created by seeding and looked up
//! by salary bands through `job_title_id`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SeniorityLevel;

/// Separator between alternate names in [`JobTitle::aliases`].
pub const ALIAS_DELIMITER: char = '|';

/// A canonical job title.
///
/// `canonical_title` is the natural key and is unique across all job titles;
/// the storage layer enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobTitle {
    /// Surrogate identifier.
    pub id: i64,
    /// The canonical name of the title (natural key).
    pub canonical_title: String,
    /// The job family, e.g. "Engineering".
    pub category: String,
    /// Seniority label, normally one of the [`SeniorityLevel`] labels.
    pub seniority_level: String,
    /// Alternate names, delimited by [`ALIAS_DELIMITER`].
    pub aliases: Option<String>,
}

impl JobTitle {
    /// Returns the alternate names for this title, trimmed, skipping blanks.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_benchmarks::models::JobTitle;
    ///
    /// let title = JobTitle {
    ///     id: 1,
    ///     canonical_title: "Backend Engineer".to_string(),
    ///     category: "Engineering".to_string(),
    ///     seniority_level: "Senior".to_string(),
    ///     aliases: Some("Server Developer| API Engineer ||".to_string()),
    /// };
    /// assert_eq!(title.alias_list(), vec!["Server Developer", "API Engineer"]);
    /// ```
    pub fn alias_list(&self) -> Vec<&str> {
        self.aliases
            .as_deref()
            .map(|aliases| {
                aliases
                    .split(ALIAS_DELIMITER)
                    .map(str::trim)
                    .filter(|alias| !alias.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Interprets the stored seniority label, if it is a known level.
    pub fn seniority(&self) -> Option<SeniorityLevel> {
        self.seniority_level.parse().ok()
    }
}

impl fmt::Display for JobTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_title)
    }
}

/// A job title that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJobTitle {
    /// The canonical name of the title.
    pub canonical_title: String,
    /// The job family.
    pub category: String,
    /// Seniority label.
    pub seniority_level: String,
    /// Alternate names, delimited by [`ALIAS_DELIMITER`].
    pub aliases: Option<String>,
}

impl NewJobTitle {
    /// Creates a job title without aliases.
    pub fn new(
        canonical_title: impl Into<String>,
        category: impl Into<String>,
        seniority_level: impl Into<String>,
    ) -> Self {
        Self {
            canonical_title: canonical_title.into(),
            category: category.into(),
            seniority_level: seniority_level.into(),
            aliases: None,
        }
    }

    /// Sets the delimited alias list.
    pub fn with_aliases(mut self, aliases: impl Into<String>) -> Self {
        self.aliases = Some(aliases.into());
        self
    }
}
