//! Salary benchmark database
//!
//! This crate stores salary benchmarks for job titles at different levels of
//! experience. It provides the storage layer, idempotent seeding from CSV
//! reference files, validated creation of salary bands and a small
//! session-protected JSON API over all of it.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod parse;
pub mod seed;
pub mod store;
