//! Salary band queries and creation.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, info, warn};

use crate::error::BenchmarkResult;
use crate::forms::SalaryBandForm;
use crate::models::{NewSalaryBand, SalaryBand, SalaryBandListing};

use super::Store;

const SELECT_SALARY_BAND: &str = "SELECT id, job_title_id, experience_band_code, location, industry, company_size_band, currency, salary_min, salary_max, salary_avg, sample_size, source_type, confidence_level, last_updated, notes FROM salary_bands";

const SELECT_SALARY_BAND_LISTING: &str = "SELECT sb.id, sb.job_title_id, sb.experience_band_code, sb.location, sb.industry, sb.company_size_band, sb.currency, sb.salary_min, sb.salary_max, sb.salary_avg, sb.sample_size, sb.source_type, sb.confidence_level, sb.last_updated, sb.notes, jt.canonical_title AS job_title, eb.label AS experience_band_label FROM salary_bands sb JOIN job_titles jt ON jt.id = sb.job_title_id JOIN experience_bands eb ON eb.code = sb.experience_band_code";

/// Optional equality filters for [`Store::list_salary_bands`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryBandFilter {
    /// Only bands for this job title.
    pub job_title_id: Option<i64>,
    /// Only bands for this experience band.
    pub experience_band_code: Option<String>,
}

impl SalaryBandFilter {
    /// A filter that matches every band.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the filter to one job title.
    pub fn job_title(mut self, job_title_id: i64) -> Self {
        self.job_title_id = Some(job_title_id);
        self
    }

    /// Restricts the filter to one experience band.
    pub fn experience_band(mut self, code: impl Into<String>) -> Self {
        self.experience_band_code = Some(code.into());
        self
    }
}

impl Store {
    /// Lists salary bands joined with their job title and experience band.
    ///
    /// Only the filters that are set are applied. Results are ordered by
    /// `(canonical_title, experience_band_code, id)`.
    pub async fn list_salary_bands(
        &self,
        filter: &SalaryBandFilter,
    ) -> BenchmarkResult<Vec<SalaryBandListing>> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_SALARY_BAND_LISTING);
        query.push(" WHERE 1 = 1");
        if let Some(job_title_id) = filter.job_title_id {
            query.push(" AND sb.job_title_id = ").push_bind(job_title_id);
        }
        if let Some(code) = &filter.experience_band_code {
            query
                .push(" AND sb.experience_band_code = ")
                .push_bind(code.as_str());
        }
        query.push(" ORDER BY jt.canonical_title, sb.experience_band_code, sb.id");

        let bands = query
            .build_query_as::<SalaryBandListing>()
            .fetch_all(&self.pool)
            .await?;

        debug!(filter = ?filter, count = bands.len(), "Listed salary bands");
        Ok(bands)
    }

    /// Looks up a salary band by id.
    pub async fn get_salary_band(&self, id: i64) -> BenchmarkResult<Option<SalaryBand>> {
        let band = sqlx::query_as::<_, SalaryBand>(&format!("{} WHERE id = ?", SELECT_SALARY_BAND))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(band)
    }

    /// Looks up a salary band by id, joined with its title and band label.
    pub async fn get_salary_band_listing(
        &self,
        id: i64,
    ) -> BenchmarkResult<Option<SalaryBandListing>> {
        let listing = sqlx::query_as::<_, SalaryBandListing>(&format!(
            "{} WHERE sb.id = ?",
            SELECT_SALARY_BAND_LISTING
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(listing)
    }

    /// Returns the number of salary bands.
    pub async fn count_salary_bands(&self) -> BenchmarkResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM salary_bands")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts a validated salary band and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a `ForeignKey`
    /// [`ConstraintViolation`](crate::error::BenchmarkError::ConstraintViolation)
    /// if the job title or experience band does not exist.
    pub async fn insert_salary_band(&self, band: &NewSalaryBand) -> BenchmarkResult<i64> {
        let result = sqlx::query(
            "INSERT INTO salary_bands (job_title_id, experience_band_code, location, industry, company_size_band, currency, salary_min, salary_max, salary_avg, sample_size, source_type, confidence_level, last_updated, notes) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(band.job_title_id)
        .bind(&band.experience_band_code)
        .bind(&band.location)
        .bind(&band.industry)
        .bind(&band.company_size_band)
        .bind(&band.currency)
        .bind(band.salary_min.map(|amount| amount.to_string()))
        .bind(band.salary_max.map(|amount| amount.to_string()))
        .bind(band.salary_avg.map(|amount| amount.to_string()))
        .bind(band.sample_size)
        .bind(&band.source_type)
        .bind(&band.confidence_level)
        .bind(band.last_updated)
        .bind(&band.notes)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Validates a salary band form and stores the result.
    ///
    /// `today` is recorded as `last_updated`. On any failure nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// - [`Validation`](crate::error::BenchmarkError::Validation) when a
    ///   reference is missing or the job title id is not a number.
    /// - [`ConstraintViolation`](crate::error::BenchmarkError::ConstraintViolation)
    ///   when a reference does not exist.
    pub async fn create_salary_band(
        &self,
        form: &SalaryBandForm,
        today: NaiveDate,
    ) -> BenchmarkResult<i64> {
        let band = form.validate(today)?;

        match self.insert_salary_band(&band).await {
            Ok(id) => {
                info!(
                    id,
                    job_title_id = band.job_title_id,
                    experience_band_code = %band.experience_band_code,
                    "Salary band created"
                );
                Ok(id)
            }
            Err(err) => {
                warn!(
                    job_title_id = band.job_title_id,
                    experience_band_code = %band.experience_band_code,
                    error = %err,
                    "Salary band rejected by storage"
                );
                Err(err)
            }
        }
    }
}
