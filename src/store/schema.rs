//! Table definitions.
//!
//! Every statement is `IF NOT EXISTS`, so [`create_all`] can run on each
//! startup.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::BenchmarkResult;

/// Job titles, unique by `canonical_title`.
pub const CREATE_JOB_TITLES: &str = r#"
    CREATE TABLE IF NOT EXISTS job_titles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        canonical_title TEXT NOT NULL UNIQUE,
        category TEXT NOT NULL,
        seniority_level TEXT NOT NULL,
        aliases TEXT
    )
"#;

/// Experience bands, keyed by `code`.
pub const CREATE_EXPERIENCE_BANDS: &str = r#"
    CREATE TABLE IF NOT EXISTS experience_bands (
        code TEXT PRIMARY KEY NOT NULL,
        label TEXT NOT NULL,
        min_years INTEGER,
        max_years INTEGER,
        default_seniority_level TEXT,
        description TEXT
    )
"#;

/// Salary bands. Money columns hold two-decimal text.
pub const CREATE_SALARY_BANDS: &str = r#"
    CREATE TABLE IF NOT EXISTS salary_bands (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        job_title_id INTEGER NOT NULL REFERENCES job_titles (id),
        experience_band_code TEXT NOT NULL REFERENCES experience_bands (code),
        location TEXT NOT NULL DEFAULT 'Malta',
        industry TEXT,
        company_size_band TEXT,
        currency TEXT NOT NULL DEFAULT 'EUR',
        salary_min TEXT,
        salary_max TEXT,
        salary_avg TEXT,
        sample_size INTEGER,
        source_type TEXT,
        confidence_level TEXT,
        last_updated TEXT NOT NULL DEFAULT (date('now')),
        notes TEXT
    )
"#;

const CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_salary_bands_job_title ON salary_bands (job_title_id)",
    "CREATE INDEX IF NOT EXISTS idx_salary_bands_experience_band ON salary_bands (experience_band_code)",
];

/// Creates all tables and indexes that do not exist yet.
pub async fn create_all(pool: &SqlitePool) -> BenchmarkResult<()> {
    for statement in [CREATE_JOB_TITLES, CREATE_EXPERIENCE_BANDS, CREATE_SALARY_BANDS] {
        sqlx::query(statement).execute(pool).await?;
    }
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    debug!("Schema ready");
    Ok(())
}
