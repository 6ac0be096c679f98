//! SQLite storage for job titles, experience bands and salary bands.
//!
//! [`Store`] is the explicit storage handle passed to every query, mutation
//! and seeding operation. Uniqueness, foreign keys and NOT NULL columns are
//! enforced by the schema in [`schema`], so writes that bypass this crate
//! cannot break referential integrity either.
//!
//! # Example
//!
//! ```no_run
//! use salary_benchmarks::store::Store;
//!
//! # async fn example() -> salary_benchmarks::error::BenchmarkResult<()> {
//! let store = Store::connect("sqlite://salary_db.sqlite3").await?;
//! store.init_schema().await?;
//!
//! for title in store.list_job_titles(Some("engineer")).await? {
//!     println!("{} ({})", title.canonical_title, title.category);
//! }
//! # Ok(())
//! # }
//! ```

mod experience_bands;
mod job_titles;
mod salary_bands;
pub mod schema;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::BenchmarkResult;

pub use salary_bands::SalaryBandFilter;

pub(crate) use experience_bands::{fetch_experience_band, insert_experience_band};
pub(crate) use job_titles::{fetch_job_title_by_title, insert_job_title};

const MAX_CONNECTIONS: u32 = 5;

/// Handle to the salary benchmark database.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens the database at `url`, creating the file if it does not exist.
    ///
    /// Foreign key enforcement is switched on for every connection. The
    /// schema is not created; call [`Store::init_schema`] for that.
    pub async fn connect(url: &str) -> BenchmarkResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        info!(url = %url, "Opened salary benchmark database");
        Ok(Self { pool })
    }

    /// Opens a private in-memory database with the schema already created.
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// the data lives only as long as that connection.
    pub async fn in_memory() -> BenchmarkResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        debug!("Opened in-memory salary benchmark database");
        Ok(store)
    }

    /// Creates any missing tables and indexes. Safe to call repeatedly.
    pub async fn init_schema(&self) -> BenchmarkResult<()> {
        schema::create_all(&self.pool).await
    }

    /// Returns the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Escapes `%`, `_` and `\` so the text matches literally inside
/// `LIKE ... ESCAPE '\'`.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
        assert_eq!(escape_like("Engineer"), "Engineer");
    }

    #[tokio::test]
    async fn test_in_memory_store_has_schema() {
        let store = Store::in_memory().await.unwrap();
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(store.pool())
        .await
        .unwrap();

        assert_eq!(tables, vec!["experience_bands", "job_titles", "salary_bands"]);
    }

    #[tokio::test]
    async fn test_in_memory_stores_are_isolated() {
        let first = Store::in_memory().await.unwrap();
        let second = Store::in_memory().await.unwrap();

        sqlx::query("INSERT INTO experience_bands (code, label) VALUES ('SNR', 'Senior')")
            .execute(first.pool())
            .await
            .unwrap();

        assert_eq!(first.count_experience_bands().await.unwrap(), 1);
        assert_eq!(second.count_experience_bands().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let store = Store::in_memory().await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
