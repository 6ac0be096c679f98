//! Experience band queries.

use sqlx::{Executor, Sqlite};
use tracing::debug;

use crate::error::BenchmarkResult;
use crate::models::ExperienceBand;

use super::Store;

const SELECT_EXPERIENCE_BAND: &str = "SELECT code, label, min_years, max_years, default_seniority_level, description FROM experience_bands";

pub(crate) async fn insert_experience_band<'e, E>(
    executor: E,
    band: &ExperienceBand,
) -> BenchmarkResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO experience_bands (code, label, min_years, max_years, default_seniority_level, description) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&band.code)
    .bind(&band.label)
    .bind(band.min_years)
    .bind(band.max_years)
    .bind(&band.default_seniority_level)
    .bind(&band.description)
    .execute(executor)
    .await?;

    Ok(())
}

pub(crate) async fn fetch_experience_band<'e, E>(
    executor: E,
    code: &str,
) -> BenchmarkResult<Option<ExperienceBand>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let band = sqlx::query_as::<_, ExperienceBand>(&format!(
        "{} WHERE code = ?",
        SELECT_EXPERIENCE_BAND
    ))
    .bind(code)
    .fetch_optional(executor)
    .await?;

    Ok(band)
}

impl Store {
    /// Inserts an experience band.
    ///
    /// # Errors
    ///
    /// Returns a `Unique` [`ConstraintViolation`](crate::error::BenchmarkError::ConstraintViolation)
    /// if the code already exists.
    pub async fn insert_experience_band(&self, band: &ExperienceBand) -> BenchmarkResult<()> {
        insert_experience_band(&self.pool, band).await?;
        debug!(code = %band.code, "Inserted experience band");
        Ok(())
    }

    /// Looks up an experience band by code.
    pub async fn get_experience_band(&self, code: &str) -> BenchmarkResult<Option<ExperienceBand>> {
        fetch_experience_band(&self.pool, code).await
    }

    /// Lists every experience band ordered by `min_years`.
    ///
    /// Bands without `min_years` come last; ties are broken by `code`, so
    /// the order is total.
    pub async fn list_experience_bands(&self) -> BenchmarkResult<Vec<ExperienceBand>> {
        let bands = sqlx::query_as::<_, ExperienceBand>(&format!(
            "{} ORDER BY min_years IS NULL, min_years, code",
            SELECT_EXPERIENCE_BAND
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(bands)
    }

    /// Returns the number of experience bands.
    pub async fn count_experience_bands(&self) -> BenchmarkResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM experience_bands")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
