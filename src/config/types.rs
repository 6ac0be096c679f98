//! Configuration types.
//!
//! Every field has a default, so an empty or partial YAML file is valid.

use std::path::PathBuf;

use serde::Deserialize;

use crate::auth::Credentials;

/// Default database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://salary_db.sqlite3";

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite connection URL.
    pub database_url: String,
    /// Address the HTTP server listens on.
    pub bind_address: String,
    /// Directory holding the seed CSV files.
    pub data_dir: PathBuf,
    /// Experience band CSV file name, relative to `data_dir`.
    pub experience_bands_file: String,
    /// Job title CSV file name, relative to `data_dir`.
    pub job_titles_file: String,
    /// The admin login.
    pub admin: Credentials,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            data_dir: PathBuf::from("data"),
            experience_bands_file: "experience_bands.csv".to_string(),
            job_titles_file: "job_titles_malta_master.csv".to_string(),
            admin: Credentials::default(),
        }
    }
}

impl AppConfig {
    /// Full path of the experience band seed file.
    pub fn experience_bands_path(&self) -> PathBuf {
        self.data_dir.join(&self.experience_bands_file)
    }

    /// Full path of the job title seed file.
    pub fn job_titles_path(&self) -> PathBuf {
        self.data_dir.join(&self.job_titles_file)
    }
}
