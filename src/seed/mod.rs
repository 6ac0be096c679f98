//! Idempotent seeding of the reference tables.
//!
//! Experience bands and job titles are imported from a [`TabularSource`].
//! For each row:
//!
//! 1. The natural key (`experience_band_code` or `canonical_title`) is read
//!    and trimmed; rows with a blank key are skipped.
//! 2. Rows whose key already exists are skipped without updating anything.
//!    This includes keys inserted earlier in the same run, so re-running a
//!    seed, or a source that repeats a key, never hits the unique constraint.
//! 3. Otherwise a record is built: required text trimmed verbatim, optional
//!    text trimmed and blank-to-`None`, optional integers parsed leniently.
//!
//! All inserts of one run share a single transaction, committed once after
//! the last row. A storage error rolls the whole run back.
//!
//! # Example
//!
//! ```no_run
//! use salary_benchmarks::seed::{seed_experience_bands_from_csv, SeedOutcome};
//! use salary_benchmarks::store::Store;
//!
//! # async fn example() -> salary_benchmarks::error::BenchmarkResult<()> {
//! let store = Store::connect("sqlite://salary_db.sqlite3").await?;
//! store.init_schema().await?;
//!
//! match seed_experience_bands_from_csv(&store, "data/experience_bands.csv").await? {
//!     SeedOutcome::Seeded(report) => println!("Seeded {} experience bands", report.inserted),
//!     SeedOutcome::SourceMissing { path } => println!("{} not found", path),
//! }
//! # Ok(())
//! # }
//! ```

mod source;

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::BenchmarkResult;
use crate::models::{ExperienceBand, NewJobTitle};
use crate::parse::{optional_text, parse_optional_int, required_text};
use crate::store::{
    Store, fetch_experience_band, fetch_job_title_by_title, insert_experience_band,
    insert_job_title,
};

pub use source::{CsvSource, MemorySource, SourceRow, TabularSource};

/// Counts from one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Rows that produced a new record.
    pub inserted: usize,
    /// Rows skipped because the natural key was blank.
    pub skipped_blank_key: usize,
    /// Rows skipped because the natural key already existed.
    pub skipped_existing: usize,
}

impl SeedReport {
    /// Total number of rows read from the source.
    pub fn rows_read(&self) -> usize {
        self.inserted + self.skipped_blank_key + self.skipped_existing
    }
}

/// Result of seeding from a file that may not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The source was read and processed.
    Seeded(SeedReport),
    /// The source file does not exist; nothing was written.
    SourceMissing {
        /// The path that was looked for.
        path: String,
    },
}

impl SeedOutcome {
    /// Number of inserted records, zero when the source was missing.
    pub fn inserted(&self) -> usize {
        match self {
            SeedOutcome::Seeded(report) => report.inserted,
            SeedOutcome::SourceMissing { .. } => 0,
        }
    }
}

fn field<'a>(row: &'a SourceRow, name: &str) -> Option<&'a str> {
    row.get(name).map(String::as_str)
}

/// Imports experience bands keyed by the `experience_band_code` field.
///
/// Reads `label`, `min_years`, `max_years`, `default_seniority_level` and
/// `description`. Bands whose `min_years` exceeds `max_years` are stored
/// anyway, with a warning.
pub async fn seed_experience_bands<S>(store: &Store, source: &S) -> BenchmarkResult<SeedReport>
where
    S: TabularSource + ?Sized,
{
    let rows = source.rows()?;
    let mut report = SeedReport::default();
    let mut tx = store.pool().begin().await?;

    for row in &rows {
        let code = required_text(row, "experience_band_code");
        if code.is_empty() {
            report.skipped_blank_key += 1;
            continue;
        }

        if fetch_experience_band(&mut *tx, &code).await?.is_some() {
            report.skipped_existing += 1;
            continue;
        }

        let band = ExperienceBand {
            code,
            label: required_text(row, "label"),
            min_years: parse_optional_int(field(row, "min_years")),
            max_years: parse_optional_int(field(row, "max_years")),
            default_seniority_level: optional_text(row, "default_seniority_level"),
            description: optional_text(row, "description"),
        };
        if !band.has_ordered_range() {
            warn!(
                code = %band.code,
                min_years = ?band.min_years,
                max_years = ?band.max_years,
                "Experience band has min_years above max_years"
            );
        }

        insert_experience_band(&mut *tx, &band).await?;
        report.inserted += 1;
    }

    tx.commit().await?;

    info!(
        source = %source.describe(),
        inserted = report.inserted,
        skipped_existing = report.skipped_existing,
        skipped_blank_key = report.skipped_blank_key,
        "Seeded experience bands"
    );
    Ok(report)
}

/// Imports job titles keyed by the `canonical_title` field.
///
/// Reads `category`, `seniority_level` and `aliases`.
pub async fn seed_job_titles<S>(store: &Store, source: &S) -> BenchmarkResult<SeedReport>
where
    S: TabularSource + ?Sized,
{
    let rows = source.rows()?;
    let mut report = SeedReport::default();
    let mut tx = store.pool().begin().await?;

    for row in &rows {
        let canonical_title = required_text(row, "canonical_title");
        if canonical_title.is_empty() {
            report.skipped_blank_key += 1;
            continue;
        }

        if fetch_job_title_by_title(&mut *tx, &canonical_title)
            .await?
            .is_some()
        {
            report.skipped_existing += 1;
            continue;
        }

        let title = NewJobTitle {
            canonical_title,
            category: required_text(row, "category"),
            seniority_level: required_text(row, "seniority_level"),
            aliases: optional_text(row, "aliases"),
        };

        insert_job_title(&mut *tx, &title).await?;
        report.inserted += 1;
    }

    tx.commit().await?;

    info!(
        source = %source.describe(),
        inserted = report.inserted,
        skipped_existing = report.skipped_existing,
        skipped_blank_key = report.skipped_blank_key,
        "Seeded job titles"
    );
    Ok(report)
}

/// Seeds experience bands from a CSV file, reporting a missing file
/// instead of failing.
pub async fn seed_experience_bands_from_csv(
    store: &Store,
    path: impl AsRef<Path>,
) -> BenchmarkResult<SeedOutcome> {
    let path = path.as_ref();
    let Some(source) = CsvSource::open(path) else {
        warn!(path = %path.display(), "Experience band source not found");
        return Ok(SeedOutcome::SourceMissing {
            path: path.display().to_string(),
        });
    };

    let report = seed_experience_bands(store, &source).await?;
    Ok(SeedOutcome::Seeded(report))
}

/// Seeds job titles from a CSV file, reporting a missing file instead of
/// failing.
pub async fn seed_job_titles_from_csv(
    store: &Store,
    path: impl AsRef<Path>,
) -> BenchmarkResult<SeedOutcome> {
    let path = path.as_ref();
    let Some(source) = CsvSource::open(path) else {
        warn!(path = %path.display(), "Job title source not found");
        return Ok(SeedOutcome::SourceMissing {
            path: path.display().to_string(),
        });
    };

    let report = seed_job_titles(store, &source).await?;
    Ok(SeedOutcome::Seeded(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchmarkError;

    fn band_source() -> MemorySource {
        MemorySource::new("experience bands")
            .with_row([
                ("experience_band_code", "SNR"),
                ("label", " Senior "),
                ("min_years", "5"),
                ("max_years", "10"),
                ("default_seniority_level", "Senior"),
                ("description", ""),
            ])
            .with_row([
                ("experience_band_code", "JNR"),
                ("label", "Junior"),
                ("min_years", "zero"),
                ("max_years", " 2 "),
                ("default_seniority_level", "  "),
            ])
            .with_row([("experience_band_code", "  "), ("label", "Blank")])
            .with_row([("label", "No code at all")])
    }

    fn title_source() -> MemorySource {
        MemorySource::new("job titles")
            .with_row([
                ("canonical_title", "Backend Engineer"),
                ("category", "Engineering"),
                ("seniority_level", "Senior"),
                ("aliases", "API Engineer|Server Developer"),
            ])
            .with_row([
                ("canonical_title", " Accountant "),
                ("category", " Finance "),
                ("seniority_level", "Mid"),
                ("aliases", ""),
            ])
            .with_row([("canonical_title", ""), ("category", "Nothing")])
    }

    #[tokio::test]
    async fn test_seed_experience_bands_parses_leniently() {
        let store = Store::in_memory().await.unwrap();
        let report = seed_experience_bands(&store, &band_source()).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                inserted: 2,
                skipped_blank_key: 2,
                skipped_existing: 0,
            }
        );

        let senior = store.get_experience_band("SNR").await.unwrap().unwrap();
        assert_eq!(senior.label, "Senior");
        assert_eq!(senior.min_years, Some(5));
        assert_eq!(senior.max_years, Some(10));
        assert_eq!(senior.default_seniority_level.as_deref(), Some("Senior"));
        assert_eq!(senior.description, None);

        let junior = store.get_experience_band("JNR").await.unwrap().unwrap();
        assert_eq!(junior.min_years, None);
        assert_eq!(junior.max_years, Some(2));
        assert_eq!(junior.default_seniority_level, None);
    }

    #[tokio::test]
    async fn test_seed_experience_bands_twice_is_idempotent() {
        let store = Store::in_memory().await.unwrap();
        seed_experience_bands(&store, &band_source()).await.unwrap();
        let second = seed_experience_bands(&store, &band_source()).await.unwrap();

        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped_existing, 2);
        assert_eq!(store.count_experience_bands().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seed_does_not_update_existing() {
        let store = Store::in_memory().await.unwrap();
        store
            .insert_experience_band(&ExperienceBand::new("SNR", "Original label"))
            .await
            .unwrap();

        seed_experience_bands(&store, &band_source()).await.unwrap();

        let senior = store.get_experience_band("SNR").await.unwrap().unwrap();
        assert_eq!(senior.label, "Original label");
        assert_eq!(senior.min_years, None);
    }

    #[tokio::test]
    async fn test_repeated_key_in_one_source_inserted_once() {
        let store = Store::in_memory().await.unwrap();
        let source = MemorySource::new("dupes")
            .with_row([("experience_band_code", "MID"), ("label", "First")])
            .with_row([("experience_band_code", "MID"), ("label", "Second")]);

        let report = seed_experience_bands(&store, &source).await.unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped_existing, 1);
        assert_eq!(
            store.get_experience_band("MID").await.unwrap().unwrap().label,
            "First"
        );
    }

    #[tokio::test]
    async fn test_seed_job_titles() {
        let store = Store::in_memory().await.unwrap();
        let report = seed_job_titles(&store, &title_source()).await.unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped_blank_key, 1);
        assert_eq!(report.rows_read(), 3);

        let accountant = store
            .find_job_title_by_title("Accountant")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(accountant.category, "Finance");
        assert_eq!(accountant.aliases, None);

        let backend = store
            .find_job_title_by_title("Backend Engineer")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(backend.alias_list(), vec!["API Engineer", "Server Developer"]);
    }

    #[tokio::test]
    async fn test_seed_job_titles_twice_keeps_row_count() {
        let store = Store::in_memory().await.unwrap();
        seed_job_titles(&store, &title_source()).await.unwrap();
        let once = store.count_job_titles().await.unwrap();
        seed_job_titles(&store, &title_source()).await.unwrap();
        assert_eq!(store.count_job_titles().await.unwrap(), once);
    }

    #[tokio::test]
    async fn test_missing_csv_is_reported_not_fatal() {
        let store = Store::in_memory().await.unwrap();
        let outcome = seed_job_titles_from_csv(&store, "/no/such/job_titles.csv")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SeedOutcome::SourceMissing {
                path: "/no/such/job_titles.csv".to_string(),
            }
        );
        assert_eq!(outcome.inserted(), 0);
        assert_eq!(store.count_job_titles().await.unwrap(), 0);
    }

    struct FailingSource;

    impl TabularSource for FailingSource {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        fn rows(&self) -> BenchmarkResult<Vec<SourceRow>> {
            Err(BenchmarkError::SourceParseError {
                path: self.describe(),
                message: "unreadable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_unreadable_source_writes_nothing() {
        let store = Store::in_memory().await.unwrap();
        let result = seed_job_titles(&store, &FailingSource).await;

        assert!(matches!(result, Err(BenchmarkError::SourceParseError { .. })));
        assert_eq!(store.count_job_titles().await.unwrap(), 0);
    }
}
