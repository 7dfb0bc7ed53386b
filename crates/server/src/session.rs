// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session resolution and the dashboard auth gate.
//!
//! Every request passes through [`resolve_session`], which looks up the
//! token carried in the `earthen_session` cookie or an
//! `Authorization: Bearer` header and, when it names a known session, stores
//! that [`Session`] in the request extensions. Protected routes add
//! [`require_session`], which sends anyone without a live session to the
//! sign-in page.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use earthen_api::Session;
use time::OffsetDateTime;
use tracing::{debug, error, warn};

use crate::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "earthen_session";

/// Where unauthenticated visitors are sent.
pub const SIGN_IN_PATH: &str = "/auth/signin";

/// Reads the session token from the request headers.
///
/// A bearer token wins over the cookie when both are present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer: Option<&str> = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Resolves the request's session token, if any, into a [`Session`].
///
/// Lookup failures are logged and treated as "no session"; the gate then
/// decides what to do with the request.
pub async fn resolve_session(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = session_token(request.headers()) {
        let mut persistence = app_state.persistence.lock().await;
        match app_state.sessions.current_session(&mut persistence, &token) {
            Ok(Some(session)) => {
                debug!(login_name = %session.identity.login_name, "Resolved session");
                request.extensions_mut().insert(session);
            }
            Ok(None) => debug!("Unknown session token"),
            Err(e) => error!(error = %e, "Session lookup failed"),
        }
    }

    next.run(request).await
}

/// Lets the request through only with a session that has not expired.
pub async fn require_session(request: Request, next: Next) -> Response {
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    match request.extensions().get::<Session>() {
        Some(session) if !session.is_expired(now) => next.run(request).await,
        Some(session) => {
            warn!(
                login_name = %session.identity.login_name,
                path = %request.uri().path(),
                "Expired session"
            );
            redirect_to_sign_in(request.uri().path())
        }
        None => {
            debug!(path = %request.uri().path(), "No session");
            redirect_to_sign_in(request.uri().path())
        }
    }
}

/// `302 Found` to the sign-in page, carrying `path` as the callback.
pub fn redirect_to_sign_in(path: &str) -> Response {
    found(&format!(
        "{SIGN_IN_PATH}?callbackUrl={}",
        urlencoding::encode(path)
    ))
}

/// A plain `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            error!(location, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `Set-Cookie` value for a new session lasting `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value that removes the session cookie.
pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Callback targets are honoured only when they stay on this site.
///
/// Browsers drop tabs and newlines from URLs, so a path carrying any
/// whitespace or control character is refused outright.
pub fn safe_callback(callback: Option<&str>) -> &str {
    match callback.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path
                    .chars()
                    .any(|c| c.is_ascii_control() || c.is_whitespace()) =>
        {
            path
        }
        _ => "/dashboard",
    }
}
