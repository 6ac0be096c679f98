//! Salary band model and its joined listing view.
//!
//! Monetary amounts are stored as two-decimal text so that no float
//! rounding touches them; the row mapping here parses them back into
//! [`Decimal`].

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use super::ConfidenceLevel;

/// Location used when a salary band is created without one.
pub const DEFAULT_LOCATION: &str = "Malta";

/// Currency used when a salary band is created without one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// A salary observation for one job title at one experience band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    /// Surrogate identifier.
    pub id: i64,
    /// The job title this band belongs to.
    pub job_title_id: i64,
    /// The experience band this band belongs to.
    pub experience_band_code: String,
    /// Where the salary applies.
    pub location: String,
    /// Industry, if recorded.
    pub industry: Option<String>,
    /// Company size bucket, e.g. "11-50".
    pub company_size_band: Option<String>,
    /// ISO currency code.
    pub currency: String,
    /// Lower bound of the band.
    pub salary_min: Option<Decimal>,
    /// Upper bound of the band.
    pub salary_max: Option<Decimal>,
    /// Average salary.
    pub salary_avg: Option<Decimal>,
    /// Number of data points behind the observation.
    pub sample_size: Option<i64>,
    /// Where the observation came from, e.g. "Employer-reported".
    pub source_type: Option<String>,
    /// Low / Medium / High, see [`ConfidenceLevel`].
    pub confidence_level: Option<String>,
    /// Date the record was created.
    pub last_updated: NaiveDate,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl SalaryBand {
    /// Interprets the stored confidence label, if it is a known level.
    pub fn confidence(&self) -> Option<ConfidenceLevel> {
        self.confidence_level.as_deref()?.parse().ok()
    }
}

impl<'r> FromRow<'r, SqliteRow> for SalaryBand {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            job_title_id: row.try_get("job_title_id")?,
            experience_band_code: row.try_get("experience_band_code")?,
            location: row.try_get("location")?,
            industry: row.try_get("industry")?,
            company_size_band: row.try_get("company_size_band")?,
            currency: row.try_get("currency")?,
            salary_min: money_column(row, "salary_min")?,
            salary_max: money_column(row, "salary_max")?,
            salary_avg: money_column(row, "salary_avg")?,
            sample_size: row.try_get("sample_size")?,
            source_type: row.try_get("source_type")?,
            confidence_level: row.try_get("confidence_level")?,
            last_updated: row.try_get("last_updated")?,
            notes: row.try_get("notes")?,
        })
    }
}

fn money_column(row: &SqliteRow, column: &str) -> Result<Option<Decimal>, sqlx::Error> {
    let text: Option<String> = row.try_get(column)?;
    text.map(|value| Decimal::from_str(&value))
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

/// A salary band joined with the names of the records it references.
///
/// Returned by salary band listings in place of object back-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBandListing {
    /// The salary band itself.
    #[serde(flatten)]
    pub band: SalaryBand,
    /// `canonical_title` of the referenced job title.
    pub job_title: String,
    /// `label` of the referenced experience band.
    pub experience_band_label: String,
}

impl<'r> FromRow<'r, SqliteRow> for SalaryBandListing {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            band: SalaryBand::from_row(row)?,
            job_title: row.try_get("job_title")?,
            experience_band_label: row.try_get("experience_band_label")?,
        })
    }
}

/// A validated salary band ready to be inserted.
///
/// Built from caller input by
/// [`SalaryBandForm::validate`](crate::forms::SalaryBandForm::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSalaryBand {
    /// The job title this band belongs to.
    pub job_title_id: i64,
    /// The experience band this band belongs to.
    pub experience_band_code: String,
    /// Where the salary applies.
    pub location: String,
    /// Industry, if recorded.
    pub industry: Option<String>,
    /// Company size bucket.
    pub company_size_band: Option<String>,
    /// ISO currency code.
    pub currency: String,
    /// Lower bound of the band.
    pub salary_min: Option<Decimal>,
    /// Upper bound of the band.
    pub salary_max: Option<Decimal>,
    /// Average salary.
    pub salary_avg: Option<Decimal>,
    /// Number of data points.
    pub sample_size: Option<i64>,
    /// Where the observation came from.
    pub source_type: Option<String>,
    /// Confidence label.
    pub confidence_level: Option<String>,
    /// Creation date.
    pub last_updated: NaiveDate,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl NewSalaryBand {
    /// Creates a band with defaults for every optional field.
    pub fn new(
        job_title_id: i64,
        experience_band_code: impl Into<String>,
        last_updated: NaiveDate,
    ) -> Self {
        Self {
            job_title_id,
            experience_band_code: experience_band_code.into(),
            location: DEFAULT_LOCATION.to_string(),
            industry: None,
            company_size_band: None,
            currency: DEFAULT_CURRENCY.to_string(),
            salary_min: None,
            salary_max: None,
            salary_avg: None,
            sample_size: None,
            source_type: None,
            confidence_level: None,
            last_updated,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_band() -> SalaryBand {
        SalaryBand {
            id: 1,
            job_title_id: 3,
            experience_band_code: "SNR".to_string(),
            location: DEFAULT_LOCATION.to_string(),
            industry: None,
            company_size_band: Some("11-50".to_string()),
            currency: DEFAULT_CURRENCY.to_string(),
            salary_min: Some(Decimal::new(4_000_000, 2)),
            salary_max: Some(Decimal::new(6_000_000, 2)),
            salary_avg: None,
            sample_size: Some(12),
            source_type: None,
            confidence_level: Some("medium".to_string()),
            last_updated: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn test_new_salary_band_defaults() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let band = NewSalaryBand::new(3, "SNR", date);
        assert_eq!(band.location, "Malta");
        assert_eq!(band.currency, "EUR");
        assert_eq!(band.salary_min, None);
        assert_eq!(band.last_updated, date);
    }

    #[test]
    fn test_confidence_parses_stored_label() {
        assert_eq!(sample_band().confidence(), Some(ConfidenceLevel::Medium));
    }

    #[test]
    fn test_serialize_money_as_two_decimal_strings() {
        let json = serde_json::to_value(sample_band()).unwrap();
        assert_eq!(json["salary_min"], "40000.00");
        assert_eq!(json["salary_max"], "60000.00");
        assert_eq!(json["salary_avg"], serde_json::Value::Null);
        assert_eq!(json["last_updated"], "2026-01-15");
    }

    #[test]
    fn test_listing_flattens_band_fields() {
        let listing = SalaryBandListing {
            band: sample_band(),
            job_title: "Backend Engineer".to_string(),
            experience_band_label: "Senior".to_string(),
        };
        let json = serde_json::to_value(listing).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["experience_band_code"], "SNR");
        assert_eq!(json["job_title"], "Backend Engineer");
        assert_eq!(json["experience_band_label"], "Senior");
    }
}
