//! Configuration loading and management.
//!
//! This module provides [`AppConfig`], loaded from an optional YAML file and
//! overridden by environment variables.
//!
//! # Example
//!
//! ```no_run
//! use salary_benchmarks::config::AppConfig;
//!
//! let config = AppConfig::resolve(None).unwrap();
//! println!("Serving on {}", config.bind_address);
//! ```

mod loader;
mod types;

pub use types::{AppConfig, DEFAULT_BIND_ADDRESS, DEFAULT_DATABASE_URL};
