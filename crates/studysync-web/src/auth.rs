//! Session-cookie authentication.
//!
//! Sessions are DB-backed opaque tokens; the cookie carries only the token.

use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Redirect, Response};

use studysync_store::User;

use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "studysync_session";

/// Why a request couldn't be tied to a logged-in user.
pub enum AuthRejection {
    NotLoggedIn,
    Failure(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::NotLoggedIn => Redirect::to("/login").into_response(),
            AuthRejection::Failure(e) => e.into_response(),
        }
    }
}

/// Pull the session token out of the Cookie header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Resolve the request's session cookie to a user, if logged in.
pub fn current_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, AppError> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };
    Ok(state.store().user_for_token(&token)?)
}

/// Resolve the logged-in user; unauthenticated requests get a login redirect.
pub fn require_user(state: &AppState, headers: &HeaderMap) -> Result<User, AuthRejection> {
    match current_user(state, headers) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(AuthRejection::NotLoggedIn),
        Err(e) => Err(AuthRejection::Failure(e)),
    }
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(token: &str) -> HeaderValue {
    // Session tokens are lowercase hex, always a valid header value
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Set-Cookie value clearing the session cookie.
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "studysync_session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_token_parsed() {
        let headers = headers_with_cookie("studysync_session=abc123");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; studysync_session=abc123; lang=en");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_no_cookie_header() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_unrelated_cookies_only() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_cookie_values() {
        let set = session_cookie("deadbeef");
        assert_eq!(
            set.to_str().unwrap(),
            "studysync_session=deadbeef; HttpOnly; SameSite=Lax; Path=/"
        );
        assert!(clear_session_cookie().to_str().unwrap().contains("Max-Age=0"));
    }
}
