//! Configuration loading.
//!
//! Configuration comes from an optional YAML file, then environment
//! variables override individual fields:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DATABASE_URL` | `database_url` |
//! | `BIND_ADDRESS` | `bind_address` |
//! | `DATA_DIR` | `data_dir` |
//! | `ADMIN_USERNAME` | `admin.username` |
//! | `ADMIN_PASSWORD` | `admin.password` |

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BenchmarkError, BenchmarkResult};

use super::types::AppConfig;

impl AppConfig {
    /// Loads configuration from a YAML file.
    ///
    /// Fields missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if the file cannot be read
    /// - `ConfigParseError` if the file is not valid YAML for this type
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_benchmarks::config::AppConfig;
    ///
    /// let config = AppConfig::load("./salary-benchmarks.yaml")?;
    /// println!("Database: {}", config.database_url);
    /// # Ok::<(), salary_benchmarks::error::BenchmarkError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> BenchmarkResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| BenchmarkError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::from_yaml(&content).map_err(|e| match e {
            BenchmarkError::ConfigParseError { message, .. } => BenchmarkError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path_str, "Loaded configuration file");
        Ok(config)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml(content: &str) -> BenchmarkResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| BenchmarkError::ConfigParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Applies overrides from a variable lookup, normally `std::env::var`.
    ///
    /// Blank values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = get("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(address) = get("BIND_ADDRESS") {
            self.bind_address = address;
        }
        if let Some(dir) = get("DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(username) = get("ADMIN_USERNAME") {
            self.admin.username = username;
        }
        if let Some(password) = get("ADMIN_PASSWORD") {
            self.admin.password = password;
        }
        self
    }

    /// Loads the file if given, otherwise the defaults, then applies the
    /// process environment.
    pub fn resolve(path: Option<&Path>) -> BenchmarkResult<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }
}
