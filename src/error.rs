//! Error types for the salary benchmark database.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the storage, seeding and mutation layers can report.
//! Lenient field coercion never produces an error; it degrades to `None`
//! (see [`crate::parse`]).

use std::fmt;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// The kind of storage constraint that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A unique or primary key constraint (duplicate natural key).
    Unique,
    /// A foreign key constraint (dangling reference).
    ForeignKey,
    /// A NOT NULL constraint.
    NotNull,
    /// A CHECK constraint.
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::NotNull => "not null",
            ConstraintKind::Check => "check",
        };
        f.write_str(name)
    }
}

/// The main error type for the salary benchmark database.
///
/// All fallible operations return this error type. Storage errors caused by
/// a constraint are classified into [`BenchmarkError::ConstraintViolation`]
/// on conversion from [`sqlx::Error`], so callers can tell a rejected write
/// apart from an unavailable database.
///
/// # Example
///
/// ```
/// use salary_benchmarks::error::BenchmarkError;
///
/// let error = BenchmarkError::Validation {
///     message: "Job title and experience band are required.".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Validation failed: Job title and experience band are required."
/// );
/// ```
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A seeding source was not found.
    #[error("Seed source not found: {path}")]
    SourceNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A seeding source exists but could not be read as a table.
    #[error("Failed to read seed source '{path}': {message}")]
    SourceParseError {
        /// The source that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Caller input failed validation; nothing was written.
    #[error("Validation failed: {message}")]
    Validation {
        /// Human-readable reason, suitable for showing to the end user.
        message: String,
    },

    /// The storage engine rejected a write because of a constraint.
    #[error("Constraint violation ({kind}): {message}")]
    ConstraintViolation {
        /// Which kind of constraint rejected the write.
        kind: ConstraintKind,
        /// The message reported by the storage engine.
        message: String,
    },

    /// A record looked up by key does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: &'static str,
        /// The key that was looked up.
        key: String,
    },

    /// Any other storage error.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl BenchmarkError {
    /// Creates a validation error with the given reason.
    pub fn validation(message: impl Into<String>) -> Self {
        BenchmarkError::Validation {
            message: message.into(),
        }
    }

    /// Returns true if this error is a storage constraint rejection.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, BenchmarkError::ConstraintViolation { .. })
    }
}

impl From<sqlx::Error> for BenchmarkError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            let kind = match db_error.kind() {
                ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                _ => None,
            };
            if let Some(kind) = kind {
                return BenchmarkError::ConstraintViolation {
                    kind,
                    message: db_error.message().to_string(),
                };
            }
        }
        BenchmarkError::Database(error)
    }
}

/// A type alias for Results that return BenchmarkError.
pub type BenchmarkResult<T> = Result<T, BenchmarkError>;
