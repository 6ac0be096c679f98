//! Job title queries.

use sqlx::{Executor, Sqlite};
use tracing::debug;

use crate::error::BenchmarkResult;
use crate::models::{JobTitle, NewJobTitle};

use super::{Store, escape_like};

const SELECT_JOB_TITLE: &str =
    "SELECT id, canonical_title, category, seniority_level, aliases FROM job_titles";

pub(crate) async fn insert_job_title<'e, E>(executor: E, title: &NewJobTitle) -> BenchmarkResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO job_titles (canonical_title, category, seniority_level, aliases) VALUES (?, ?, ?, ?)",
    )
    .bind(&title.canonical_title)
    .bind(&title.category)
    .bind(&title.seniority_level)
    .bind(&title.aliases)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn fetch_job_title_by_title<'e, E>(
    executor: E,
    canonical_title: &str,
) -> BenchmarkResult<Option<JobTitle>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let title = sqlx::query_as::<_, JobTitle>(&format!(
        "{} WHERE canonical_title = ?",
        SELECT_JOB_TITLE
    ))
    .bind(canonical_title)
    .fetch_optional(executor)
    .await?;

    Ok(title)
}

impl Store {
    /// Inserts a job title and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a `Unique` [`ConstraintViolation`](crate::error::BenchmarkError::ConstraintViolation)
    /// if the canonical title already exists.
    pub async fn insert_job_title(&self, title: &NewJobTitle) -> BenchmarkResult<i64> {
        let id = insert_job_title(&self.pool, title).await?;
        debug!(id, canonical_title = %title.canonical_title, "Inserted job title");
        Ok(id)
    }

    /// Looks up a job title by id.
    pub async fn get_job_title(&self, id: i64) -> BenchmarkResult<Option<JobTitle>> {
        let title = sqlx::query_as::<_, JobTitle>(&format!("{} WHERE id = ?", SELECT_JOB_TITLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(title)
    }

    /// Looks up a job title by its exact canonical title.
    pub async fn find_job_title_by_title(
        &self,
        canonical_title: &str,
    ) -> BenchmarkResult<Option<JobTitle>> {
        fetch_job_title_by_title(&self.pool, canonical_title).await
    }

    /// Lists job titles ordered by `(category, canonical_title)`.
    ///
    /// When `search` is non-blank after trimming, only titles containing it
    /// are returned. The match is a literal substring match: `%` and `_` in
    /// the search text have no special meaning. ASCII letters match
    /// regardless of case; other letters only match in the same case, so
    /// `"é"` does not find `"École"`.
    pub async fn list_job_titles(&self, search: Option<&str>) -> BenchmarkResult<Vec<JobTitle>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let titles = match search {
            Some(search) => {
                sqlx::query_as::<_, JobTitle>(&format!(
                    r"{} WHERE canonical_title LIKE ? ESCAPE '\' ORDER BY category, canonical_title",
                    SELECT_JOB_TITLE
                ))
                .bind(format!("%{}%", escape_like(search)))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, JobTitle>(&format!(
                    "{} ORDER BY category, canonical_title",
                    SELECT_JOB_TITLE
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(search = ?search, count = titles.len(), "Listed job titles");
        Ok(titles)
    }

    /// Lists every job title ordered by `canonical_title` alone.
    ///
    /// This is the ordering used when offering titles to choose from.
    pub async fn list_job_title_options(&self) -> BenchmarkResult<Vec<JobTitle>> {
        let titles = sqlx::query_as::<_, JobTitle>(&format!(
            "{} ORDER BY canonical_title",
            SELECT_JOB_TITLE
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(titles)
    }

    /// Returns the number of job titles.
    pub async fn count_job_titles(&self) -> BenchmarkResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM job_titles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
