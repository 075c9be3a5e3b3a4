//! Shared-secret admin gate backed by an `admin_secret` cookie.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use armory_core::error::CoreError;
use sha2::{Digest, Sha256};

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the admin secret.
pub const ADMIN_COOKIE: &str = "admin_secret";

/// Proof that the request carries the configured admin secret.
///
/// Use as an extractor parameter on every admin handler:
///
/// ```ignore
/// async fn delete_part(_admin: AdminSession, ...) -> AppResult<StatusCode> { ... }
/// ```
///
/// Rejects with 401 when `ADMIN_SECRET` is unset, the cookie is missing,
/// or the cookie does not match.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.admin_secret.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Admin access is not configured".into(),
            ))
        })?;

        let presented = cookie_value(&parts.headers, ADMIN_COOKIE).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing admin session".into()))
        })?;

        if !secrets_match(&presented, expected) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin session".into(),
            )));
        }

        Ok(AdminSession)
    }
}

/// Compare two secrets by SHA-256 digest so the comparison does not
/// short-circuit on the raw secret bytes.
pub fn secrets_match(presented: &str, expected: &str) -> bool {
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Find a cookie by name across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie` value that stores the admin secret.
pub fn session_cookie(secret: &str, config: &ServerConfig) -> String {
    let mut cookie = format!("{ADMIN_COOKIE}={secret}; HttpOnly; SameSite=Lax; Path=/");
    if config.admin_cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the admin cookie.
pub fn cleared_cookie(config: &ServerConfig) -> String {
    let mut cookie =
        format!("{ADMIN_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    if config.admin_cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; admin_secret=s3cret; lang=en"),
        );
        assert_eq!(cookie_value(&headers, ADMIN_COOKIE).as_deref(), Some("s3cret"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("admin_secret="));
        assert_eq!(cookie_value(&headers, ADMIN_COOKIE), None);
    }

    #[test]
    fn secret_comparison() {
        assert!(secrets_match("abc", "abc"));
        assert!(!secrets_match("abc", "abd"));
        assert!(!secrets_match("", "abc"));
    }
}
