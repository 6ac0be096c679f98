//! HTTP request handlers for the salary benchmark API.
//!
//! This module contains the router and the handler functions for all API
//! endpoints. Everything except `/login` and `/logout` requires a session.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::Session;
use crate::error::BenchmarkError;

use super::request::{JobTitleQuery, LoginRequest, SalaryBandQuery, SalaryBandRequest};
use super::response::{ApiErrorResponse, IndexResponse, LoginResponse, SalaryBandOptions};
use super::session::{cleared_cookie, require_session, session_cookie, session_token};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(index_handler))
        .route("/job-titles", get(list_job_titles_handler))
        .route("/experience-bands", get(list_experience_bands_handler))
        .route(
            "/salary-bands",
            get(list_salary_bands_handler).post(create_salary_band_handler),
        )
        .route("/salary-bands/options", get(salary_band_options_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .merge(protected)
        .with_state(state)
}

/// Handler for POST /login.
///
/// Opens a session and sets the session cookie when the credentials match.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let Json(request) = payload?;

    let Some(session) = state.auth().login(&request.username, &request.password) else {
        return Err(ApiErrorResponse::invalid_credentials());
    };

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(session.token))],
        Json(LoginResponse {
            username: session.username,
        }),
    )
        .into_response())
}

/// Handler for POST /logout.
///
/// Closes the session named by the cookie, if any, and clears the cookie.
async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.auth().logout(token);
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, cleared_cookie())],
    )
        .into_response()
}

/// Handler for GET /.
///
/// Returns the logged-in user and the size of each table.
async fn index_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<IndexResponse>, ApiErrorResponse> {
    let store = state.store();
    Ok(Json(IndexResponse {
        username: session.username,
        job_titles: store.count_job_titles().await?,
        experience_bands: store.count_experience_bands().await?,
        salary_bands: store.count_salary_bands().await?,
    }))
}

/// Handler for GET /job-titles.
async fn list_job_titles_handler(
    State(state): State<AppState>,
    Query(query): Query<JobTitleQuery>,
) -> Result<Response, ApiErrorResponse> {
    let titles = state.store().list_job_titles(query.q.as_deref()).await?;
    Ok(Json(titles).into_response())
}

/// Handler for GET /experience-bands.
async fn list_experience_bands_handler(
    State(state): State<AppState>,
) -> Result<Response, ApiErrorResponse> {
    let bands = state.store().list_experience_bands().await?;
    Ok(Json(bands).into_response())
}

/// Handler for GET /salary-bands.
async fn list_salary_bands_handler(
    State(state): State<AppState>,
    Query(query): Query<SalaryBandQuery>,
) -> Result<Response, ApiErrorResponse> {
    let filter = query.into_filter()?;
    let bands = state.store().list_salary_bands(&filter).await?;
    Ok(Json(bands).into_response())
}

/// Handler for GET /salary-bands/options.
async fn salary_band_options_handler(
    State(state): State<AppState>,
) -> Result<Json<SalaryBandOptions>, ApiErrorResponse> {
    let store = state.store();
    Ok(Json(SalaryBandOptions {
        job_titles: store.list_job_title_options().await?,
        experience_bands: store.list_experience_bands().await?,
    }))
}

/// Handler for POST /salary-bands.
///
/// Accepts the new band form as a JSON object and returns the created row.
async fn create_salary_band_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<SalaryBandRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        username = %session.username,
        "Processing salary band submission"
    );

    let Json(request) = payload.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Rejected request body");
        ApiErrorResponse::from(rejection)
    })?;

    let form = request.into_form();
    let today = Local::now().date_naive();
    let id = state
        .store()
        .create_salary_band(&form, today)
        .await
        .map_err(|err| {
            warn!(correlation_id = %correlation_id, error = %err, "Salary band not created");
            ApiErrorResponse::from(err)
        })?;

    let listing = state
        .store()
        .get_salary_band_listing(id)
        .await?
        .ok_or_else(|| BenchmarkError::NotFound {
            entity: "salary band",
            key: id.to_string(),
        })?;

    info!(correlation_id = %correlation_id, id, "Salary band added");
    Ok((StatusCode::CREATED, Json(listing)).into_response())
}
