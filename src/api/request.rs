//! Request types for the salary benchmark API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BenchmarkError, BenchmarkResult};
use crate::forms::{INVALID_JOB_TITLE_ID_MESSAGE, SalaryBandForm};
use crate::store::SalaryBandFilter;

/// Body of `POST /login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Submitted username.
    #[serde(default)]
    pub username: String,
    /// Submitted password.
    #[serde(default)]
    pub password: String,
}

/// Query string of `GET /job-titles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobTitleQuery {
    /// Substring to search for in canonical titles.
    #[serde(default)]
    pub q: Option<String>,
}

/// Query string of `GET /salary-bands`.
///
/// Parameters arrive as text so that blank values (from an unselected
/// filter) can be told apart from invalid ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalaryBandQuery {
    /// Job title id to filter by.
    #[serde(default)]
    pub job_title_id: Option<String>,
    /// Experience band code to filter by.
    #[serde(default)]
    pub experience_band_code: Option<String>,
}

impl SalaryBandQuery {
    /// Converts the query into a storage filter, ignoring blank parameters.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `job_title_id` is not a whole number.
    pub fn into_filter(self) -> BenchmarkResult<SalaryBandFilter> {
        let mut filter = SalaryBandFilter::all();

        if let Some(id) = self.job_title_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let id = id
                .parse::<i64>()
                .map_err(|_| BenchmarkError::validation(INVALID_JOB_TITLE_ID_MESSAGE))?;
            filter = filter.job_title(id);
        }

        if let Some(code) = self
            .experience_band_code
            .filter(|code| !code.trim().is_empty())
        {
            filter = filter.experience_band(code);
        }

        Ok(filter)
    }
}

/// Body of `POST /salary-bands`: a JSON object of form fields.
///
/// Values may be strings, numbers or booleans; they are passed on as text.
/// `null` values and nested arrays or objects are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalaryBandRequest {
    /// Field name to submitted value.
    pub fields: HashMap<String, Value>,
}

impl SalaryBandRequest {
    /// Converts the submitted values into a form.
    pub fn into_form(self) -> SalaryBandForm {
        let fields = self
            .fields
            .into_iter()
            .filter_map(|(name, value)| {
                let text = match value {
                    Value::String(text) => text,
                    Value::Number(number) => number.to_string(),
                    Value::Bool(flag) => flag.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((name, text))
            })
            .collect();
        SalaryBandForm::from_fields(fields)
    }
}
