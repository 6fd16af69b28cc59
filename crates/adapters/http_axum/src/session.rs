//! Session token extraction and the auth cookie.
//!
//! Dashboard pages read the token from the [`AUTH_COOKIE`] cookie and send
//! the browser to `/login` without one. The JSON API also accepts an
//! `Authorization: Bearer` header and answers 401 instead of redirecting.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Redirect, Response};

use zabdash_domain::auth::AuthToken;
use zabdash_domain::error::DashError;

use crate::error::ApiError;

/// Name of the cookie holding the Zabbix session token.
pub const AUTH_COOKIE: &str = "zabbix_auth_token";

/// Where pages without a session are sent.
pub const LOGIN_PATH: &str = "/login";

/// Token from the auth cookie, if present and non-blank.
#[must_use]
pub fn token_from_cookie(headers: &HeaderMap) -> Option<AuthToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .and_then(|(_, value)| AuthToken::new(value))
}

/// Token from a Bearer `Authorization` header, falling back to the cookie.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<AuthToken> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(AuthToken::new)
        .or_else(|| token_from_cookie(headers))
}

/// `Set-Cookie` value storing `token`.
#[must_use]
pub fn session_cookie(token: &AuthToken) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{AUTH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        token.expose()
    ))
    .ok()
}

/// `Set-Cookie` value deleting the auth cookie.
#[must_use]
pub fn cleared_cookie() -> HeaderValue {
    HeaderValue::from_static("zabbix_auth_token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Redirect to the login page, dropping any stale cookie.
#[must_use]
pub fn to_login() -> Response {
    (
        [(header::SET_COOKIE, cleared_cookie())],
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}

/// Session of a dashboard page; redirects to `/login` when missing.
#[derive(Debug, Clone)]
pub struct PageSession(pub AuthToken);

impl<S: Send + Sync> FromRequestParts<S> for PageSession {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        token_from_cookie(&parts.headers)
            .map(Self)
            .ok_or_else(|| Redirect::to(LOGIN_PATH).into_response())
    }
}

/// Session of a JSON API call; answers 401 when missing.
#[derive(Debug, Clone)]
pub struct ApiSession(pub AuthToken);

impl<S: Send + Sync> FromRequestParts<S> for ApiSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        token_from_headers(&parts.headers)
            .map(Self)
            .ok_or_else(|| ApiError::from(DashError::Unauthorized))
    }
}
