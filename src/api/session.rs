//! Session cookies and the login gate for protected routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Extracts the session token from the request's `Cookie` headers.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == SESSION_COOKIE)
        .find_map(|(_, token)| Uuid::parse_str(token.trim()).ok())
}

/// `Set-Cookie` value that stores the token.
pub(crate) fn session_cookie(token: Uuid) -> String {
    format!("{}={}; HttpOnly; Path=/; SameSite=Lax", SESSION_COOKIE, token)
}

/// `Set-Cookie` value that clears the cookie.
pub(crate) fn cleared_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Rejects requests without an open session with 401.
///
/// On success the resolved [`Session`](crate::auth::Session) is inserted into
/// the request extensions for handlers to extract.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiErrorResponse> {
    let session = session_token(request.headers()).and_then(|token| state.auth().session(token));

    let Some(session) = session else {
        debug!(path = %request.uri().path(), "Request without a valid session");
        return Err(ApiErrorResponse::unauthenticated());
    };

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
