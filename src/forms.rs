//! Salary band form input.
//!
//! A [`SalaryBandForm`] holds the raw text fields submitted by a caller.
//! [`SalaryBandForm::validate`] turns it into a [`NewSalaryBand`] by applying
//! the coercion policy for each field:
//!
//! | Field | Blank | Unparsable |
//! |-------|-------|------------|
//! | `job_title_id` | validation error | validation error |
//! | `experience_band_code` | validation error | n/a |
//! | `location` | `"Malta"` | n/a |
//! | `currency` | `"EUR"` | n/a |
//! | `salary_min`, `salary_max`, `salary_avg` | `None` | `None` |
//! | `sample_size` | `None` | `None` |
//! | other text fields | `None` | n/a |
//!
//! `last_updated` is never read from the form; it is the creation date.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{BenchmarkError, BenchmarkResult};
use crate::models::{DEFAULT_CURRENCY, DEFAULT_LOCATION, NewSalaryBand};
use crate::parse::{non_blank, optional_text, parse_optional_decimal, parse_optional_int};

/// Reason given when either reference is missing.
pub const MISSING_REFERENCES_MESSAGE: &str = "Job title and experience band are required.";

/// Reason given when `job_title_id` is not a whole number.
pub const INVALID_JOB_TITLE_ID_MESSAGE: &str = "Job title id must be a whole number.";

/// Raw salary band input, one text value per field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryBandForm {
    fields: HashMap<String, String>,
}

impl SalaryBandForm {
    /// Creates a form from a field map.
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Sets a single field, replacing any previous value.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Validates the form and applies defaults.
    ///
    /// `today` becomes `last_updated`. The experience band code is kept
    /// exactly as submitted; only its blankness is checked here. Whether the
    /// references exist is left to the storage layer's foreign keys.
    ///
    /// # Errors
    ///
    /// Returns [`BenchmarkError::Validation`] with
    /// [`MISSING_REFERENCES_MESSAGE`] when either reference is blank, or with
    /// [`INVALID_JOB_TITLE_ID_MESSAGE`] when the job title id is not a whole
    /// number.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use salary_benchmarks::forms::SalaryBandForm;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    /// let band = SalaryBandForm::default()
    ///     .with("job_title_id", "4")
    ///     .with("experience_band_code", "SNR")
    ///     .with("salary_min", "abc")
    ///     .validate(today)
    ///     .unwrap();
    ///
    /// assert_eq!(band.job_title_id, 4);
    /// assert_eq!(band.location, "Malta");
    /// assert_eq!(band.salary_min, None);
    /// ```
    pub fn validate(&self, today: NaiveDate) -> BenchmarkResult<NewSalaryBand> {
        let job_title_id = self.get("job_title_id").and_then(non_blank);
        let experience_band_code = self
            .get("experience_band_code")
            .filter(|code| !code.trim().is_empty());

        let (Some(job_title_id), Some(experience_band_code)) = (job_title_id, experience_band_code)
        else {
            return Err(BenchmarkError::validation(MISSING_REFERENCES_MESSAGE));
        };

        let job_title_id = job_title_id
            .parse::<i64>()
            .map_err(|_| BenchmarkError::validation(INVALID_JOB_TITLE_ID_MESSAGE))?;

        Ok(NewSalaryBand {
            job_title_id,
            experience_band_code: experience_band_code.to_string(),
            location: optional_text(&self.fields, "location")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            industry: optional_text(&self.fields, "industry"),
            company_size_band: optional_text(&self.fields, "company_size_band"),
            currency: optional_text(&self.fields, "currency")
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            salary_min: parse_optional_decimal(self.get("salary_min")),
            salary_max: parse_optional_decimal(self.get("salary_max")),
            salary_avg: parse_optional_decimal(self.get("salary_avg")),
            sample_size: parse_optional_int(self.get("sample_size")),
            source_type: optional_text(&self.fields, "source_type"),
            confidence_level: optional_text(&self.fields, "confidence_level"),
            last_updated: today,
            notes: optional_text(&self.fields, "notes"),
        })
    }
}

impl From<HashMap<String, String>> for SalaryBandForm {
    fn from(fields: HashMap<String, String>) -> Self {
        Self::from_fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn valid_form() -> SalaryBandForm {
        SalaryBandForm::default()
            .with("job_title_id", "12")
            .with("experience_band_code", "SNR")
    }

    fn expect_validation(result: BenchmarkResult<NewSalaryBand>, expected: &str) {
        match result {
            Err(BenchmarkError::Validation { message }) => assert_eq!(message, expected),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_job_title_fails() {
        let form = SalaryBandForm::default().with("experience_band_code", "SNR");
        expect_validation(form.validate(today()), MISSING_REFERENCES_MESSAGE);
    }

    #[test]
    fn test_missing_experience_band_fails() {
        let form = SalaryBandForm::default().with("job_title_id", "12");
        expect_validation(form.validate(today()), MISSING_REFERENCES_MESSAGE);
    }

    #[test]
    fn test_blank_references_fail() {
        let form = SalaryBandForm::default()
            .with("job_title_id", "  ")
            .with("experience_band_code", "");
        expect_validation(form.validate(today()), MISSING_REFERENCES_MESSAGE);
    }

    #[test]
    fn test_non_numeric_job_title_fails() {
        let form = valid_form().with("job_title_id", "backend");
        expect_validation(form.validate(today()), INVALID_JOB_TITLE_ID_MESSAGE);
    }

    #[test]
    fn test_defaults_applied() {
        let band = valid_form()
            .with("location", "")
            .with("currency", "  ")
            .with("industry", "")
            .validate(today())
            .unwrap();

        assert_eq!(band.job_title_id, 12);
        assert_eq!(band.experience_band_code, "SNR");
        assert_eq!(band.location, "Malta");
        assert_eq!(band.currency, "EUR");
        assert_eq!(band.industry, None);
        assert_eq!(band.last_updated, today());
    }

    #[test]
    fn test_supplied_values_kept() {
        let band = valid_form()
            .with("location", "Gozo")
            .with("currency", "USD")
            .with("industry", "Finance")
            .with("company_size_band", "51-200")
            .with("salary_avg", "52500.5")
            .with("sample_size", "30")
            .with("source_type", "Employer-reported")
            .with("confidence_level", "High")
            .with("notes", "Q1 survey")
            .validate(today())
            .unwrap();

        assert_eq!(band.location, "Gozo");
        assert_eq!(band.currency, "USD");
        assert_eq!(band.industry.as_deref(), Some("Finance"));
        assert_eq!(band.company_size_band.as_deref(), Some("51-200"));
        assert_eq!(band.salary_avg, Some(Decimal::new(5_250_050, 2)));
        assert_eq!(band.sample_size, Some(30));
        assert_eq!(band.source_type.as_deref(), Some("Employer-reported"));
        assert_eq!(band.confidence_level.as_deref(), Some("High"));
        assert_eq!(band.notes.as_deref(), Some("Q1 survey"));
    }

    #[test]
    fn test_unparsable_numbers_become_none() {
        let band = valid_form()
            .with("salary_min", "abc")
            .with("salary_max", "60k")
            .with("sample_size", "a dozen")
            .validate(today())
            .unwrap();

        assert_eq!(band.salary_min, None);
        assert_eq!(band.salary_max, None);
        assert_eq!(band.sample_size, None);
    }

    #[test]
    fn test_experience_band_code_kept_verbatim() {
        let band = valid_form()
            .with("experience_band_code", "snr")
            .validate(today())
            .unwrap();
        assert_eq!(band.experience_band_code, "snr");
    }
}
