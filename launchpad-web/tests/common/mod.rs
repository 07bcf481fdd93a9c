/// Common test utilities for router tests
///
/// Builds the full application router without a database and with either
/// the real JWT identity resolver or a scripted one.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, Response},
};
use launchpad_shared::auth::{
    identity::{AuthUser, IdentityError, IdentityResolver},
    jwt::{create_token, Claims},
};
use launchpad_web::app::{build_router, AppState};
use launchpad_web::config::Config;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing the router and the config it was built from
pub struct TestContext {
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Router with the JWT resolver the server uses in production
    pub fn new() -> Self {
        let config = test_config();
        let state = AppState::from_config(config.clone()).expect("state should build");

        Self {
            app: build_router(state),
            config,
        }
    }

    /// Router whose identity collaborator is `resolver`
    pub fn with_resolver(resolver: Arc<dyn IdentityResolver>) -> Self {
        let config = test_config();
        let state = AppState::new(None, config.clone(), resolver);

        Self {
            app: build_router(state),
            config,
        }
    }

    /// Mints a session token the router will accept
    pub fn token_for(&self, user_id: Uuid) -> String {
        let claims = Claims::new(user_id, "ada@example.com", Some("Ada Lovelace".to_string()))
            .issued_by(self.config.auth.issuer.clone());
        create_token(&claims, &self.config.auth.jwt_secret).expect("token should encode")
    }

    /// Sends a GET request with extra headers
    pub async fn get(&self, uri: &str, headers: &[(&str, String)]) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(uri);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        self.app
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        _ => None,
    })
    .expect("test config should load")
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Reads a response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Identity collaborator that answers from a script
pub struct ScriptedResolver {
    pub answer: Result<Option<AuthUser>, String>,
    pub calls: AtomicUsize,
}

impl ScriptedResolver {
    pub fn returning(user: Option<AuthUser>) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(user),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityResolver for ScriptedResolver {
    async fn resolve(&self, _headers: &HeaderMap) -> Result<Option<AuthUser>, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .map_err(IdentityError::Unavailable)
    }
}
