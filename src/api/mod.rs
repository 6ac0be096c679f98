//! HTTP API module for the salary benchmark database.
//!
//! This module provides the JSON endpoints for logging in, browsing the
//! reference data and adding salary bands.

mod handlers;
mod request;
mod response;
mod session;
mod state;

pub use handlers::create_router;
pub use request::{JobTitleQuery, LoginRequest, SalaryBandQuery, SalaryBandRequest};
pub use response::{ApiError, ApiErrorResponse, IndexResponse, LoginResponse, SalaryBandOptions};
pub use session::{require_session, SESSION_COOKIE};
pub use state::AppState;
