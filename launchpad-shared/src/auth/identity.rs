/// Caller identity resolution
///
/// [`IdentityResolver`] is the seam between the front end and whatever
/// actually knows who the caller is. The front end asks once per request and
/// forwards the answer untouched; it never inspects the resolved user.
///
/// # Credentials
///
/// [`JwtIdentityResolver`] looks for a session token in, in order:
/// 1. `Authorization: Bearer <token>`
/// 2. the session cookie (default name `session_token`)
///
/// The first token that validates wins, so a stale bearer header does not
/// hide a good cookie. When no candidate validates (missing, malformed,
/// expired or foreign tokens) the resolver answers `Ok(None)` rather than an
/// error.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, Claims, DEFAULT_ISSUER};

/// Cookie carrying the session token when none is configured
pub const DEFAULT_SESSION_COOKIE: &str = "session_token";

/// The authenticated user as resolved by the identity collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID
    pub id: Uuid,

    /// Account email
    pub email: String,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Failure to reach a verdict about the caller
///
/// "No identity" is not an error; it is `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The identity backend could not be consulted
    #[error("Identity backend unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the caller's identity from request headers
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns the caller, `None` when the request carries no usable identity
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<AuthUser>, IdentityError>;
}

/// Identity resolver backed by HS256 session tokens
#[derive(Clone)]
pub struct JwtIdentityResolver {
    secret: String,
    issuer: String,
    cookie_name: String,
}

impl JwtIdentityResolver {
    /// Creates a resolver with the default issuer and cookie name
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    /// Overrides the expected token issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Overrides the session cookie name
    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = cookie_name.into();
        self
    }
}

impl std::fmt::Debug for JwtIdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityResolver")
            .field("issuer", &self.issuer)
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<AuthUser>, IdentityError> {
        let candidates = [
            ("bearer", bearer_token(headers)),
            ("cookie", cookie_token(headers, &self.cookie_name)),
        ];

        let mut presented = false;
        for (source, token) in candidates {
            let Some(token) = token else { continue };
            presented = true;

            match validate_token(token, &self.secret, &self.issuer) {
                Ok(claims) => return Ok(Some(claims.into())),
                Err(e) => tracing::debug!(source, error = %e, "Rejected session token"),
            }
        }

        if !presented {
            tracing::debug!("No session credential on request");
        }
        Ok(None)
    }
}

/// Pulls the raw session token out of the request headers
///
/// A bearer token wins over the cookie whenever both are present, even if the
/// bearer token later fails validation. Empty values count as absent.
/// [`JwtIdentityResolver`] does not stop here: it validates the bearer token
/// first and falls back to the cookie when that fails.
pub fn extract_credential<'h>(headers: &'h HeaderMap, cookie_name: &str) -> Option<&'h str> {
    bearer_token(headers).or_else(|| cookie_token(headers, cookie_name))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn cookie_token<'h>(headers: &'h HeaderMap, cookie_name: &str) -> Option<&'h str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_token;
    use axum::http::HeaderValue;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn token_for(user_id: Uuid) -> String {
        let claims = Claims::new(user_id, "ada@example.com", Some("Ada".to_string()));
        create_token(&claims, SECRET).unwrap()
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));

        assert_eq!(extract_credential(&headers, DEFAULT_SESSION_COOKIE), Some("abc.def"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_token=abc.def; lang=en"),
        );

        assert_eq!(extract_credential(&headers, DEFAULT_SESSION_COOKIE), Some("abc.def"));
        assert_eq!(extract_credential(&headers, "other"), None);
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token=from-cookie"));

        assert_eq!(extract_credential(&headers, DEFAULT_SESSION_COOKIE), Some("from-header"));
    }

    #[test]
    fn test_extract_ignores_other_schemes_and_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token="));

        assert_eq!(extract_credential(&headers, DEFAULT_SESSION_COOKIE), None);
    }

    #[tokio::test]
    async fn test_resolve_without_credentials() {
        let resolver = JwtIdentityResolver::new(SECRET);
        let user = resolver.resolve(&HeaderMap::new()).await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_resolve_valid_token() {
        let user_id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token_for(user_id))).unwrap(),
        );

        let user = JwtIdentityResolver::new(SECRET)
            .resolve(&headers)
            .await
            .unwrap()
            .expect("identity should resolve");

        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_resolve_from_custom_cookie() {
        let user_id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("sid={}", token_for(user_id))).unwrap(),
        );

        let resolver = JwtIdentityResolver::new(SECRET).with_cookie_name("sid");
        let user = resolver.resolve(&headers).await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
    }

    #[tokio::test]
    async fn test_resolve_rejected_tokens_are_anonymous() {
        let expired = Claims::with_expiration(
            Uuid::new_v4(),
            "ada@example.com",
            None,
            Duration::seconds(-3600),
        );
        let tokens = [
            create_token(&expired, SECRET).unwrap(),
            token_for(Uuid::new_v4()) + "tampered",
            "garbage".to_string(),
        ];

        let resolver = JwtIdentityResolver::new(SECRET);
        for token in tokens {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
            );
            assert!(resolver.resolve(&headers).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_cookie_when_bearer_is_rejected() {
        let user_id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer stale-token"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("session_token={}", token_for(user_id))).unwrap(),
        );

        // Raw extraction still prefers the header
        assert_eq!(extract_credential(&headers, DEFAULT_SESSION_COOKIE), Some("stale-token"));

        let user = JwtIdentityResolver::new(SECRET)
            .resolve(&headers)
            .await
            .unwrap()
            .expect("cookie identity should resolve");
        assert_eq!(user.id, user_id);
    }

    #[tokio::test]
    async fn test_resolve_prefers_valid_bearer_over_cookie() {
        let bearer_user = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token_for(bearer_user))).unwrap(),
        );
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("session_token={}", token_for(Uuid::new_v4()))).unwrap(),
        );

        let user = JwtIdentityResolver::new(SECRET).resolve(&headers).await.unwrap().unwrap();
        assert_eq!(user.id, bearer_user);
    }

    #[tokio::test]
    async fn test_resolve_wrong_issuer_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token_for(Uuid::new_v4()))).unwrap(),
        );

        let resolver = JwtIdentityResolver::new(SECRET).with_issuer("accounts.example.com");
        assert!(resolver.resolve(&headers).await.unwrap().is_none());
    }

    #[test]
    fn test_auth_user_serialization_omits_missing_name() {
        let user = AuthUser {
            id: Uuid::nil(),
            email: "ada@example.com".to_string(),
            name: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "email": "ada@example.com"
            })
        );
    }
}
