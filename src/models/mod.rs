//! Core data models for the salary benchmark database.
//!
//! This module contains the three stored record types and the categorical
//! labels they use. Relationships are plain foreign-key fields; joined views
//! such as [`SalaryBandListing`] are produced at query time.

mod experience_band;
mod job_title;
mod salary_band;
mod seniority;

pub use experience_band::ExperienceBand;
pub use job_title::{ALIAS_DELIMITER, JobTitle, NewJobTitle};
pub use salary_band::{
    DEFAULT_CURRENCY, DEFAULT_LOCATION, NewSalaryBand, SalaryBand, SalaryBandListing,
};
pub use seniority::{ConfidenceLevel, SeniorityLevel, UnknownLevel};
