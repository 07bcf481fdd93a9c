/// Router-level tests for the web front end
///
/// These drive the complete router (middleware included) with in-memory
/// requests. No database is needed.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, body_text, ScriptedResolver, TestContext};
use launchpad_shared::auth::identity::AuthUser;
use launchpad_web::pages::Section;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_auth_check_without_credentials() {
    let ctx = TestContext::new();

    let response = ctx.get("/api/auth/check", &[]).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_text(response).await,
        r#"{"success":false,"message":"Not authenticated"}"#
    );
}

#[tokio::test]
async fn test_auth_check_with_bearer_token() {
    let ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let token = ctx.token_for(user_id);

    let response = ctx
        .get("/api/auth/check", &[("authorization", format!("Bearer {}", token))])
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "success": true,
            "user": {
                "id": user_id.to_string(),
                "email": "ada@example.com",
                "name": "Ada Lovelace"
            }
        })
    );
}

#[tokio::test]
async fn test_auth_check_with_session_cookie() {
    let ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let cookie = format!("theme=dark; session_token={}", ctx.token_for(user_id));

    let response = ctx.get("/api/auth/check", &[("cookie", cookie)]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user_id.to_string());
}

#[tokio::test]
async fn test_auth_check_stale_bearer_does_not_hide_cookie() {
    let ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    let response = ctx
        .get(
            "/api/auth/check",
            &[
                ("authorization", "Bearer not-a-token".to_string()),
                ("cookie", format!("session_token={}", ctx.token_for(user_id))),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["id"], user_id.to_string());
}

#[tokio::test]
async fn test_auth_check_with_invalid_token() {
    let ctx = TestContext::new();

    let response = ctx
        .get("/api/auth/check", &[("authorization", "Bearer not-a-token".to_string())])
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Not authenticated");
}

#[tokio::test]
async fn test_auth_check_is_idempotent() {
    let ctx = TestContext::new();
    let token = ctx.token_for(Uuid::new_v4());
    let headers = [("authorization", format!("Bearer {}", token))];

    let first = body_text(ctx.get("/api/auth/check", &headers).await).await;
    for _ in 0..3 {
        assert_eq!(body_text(ctx.get("/api/auth/check", &headers).await).await, first);
    }

    let anonymous = body_text(ctx.get("/api/auth/check", &[]).await).await;
    for _ in 0..3 {
        assert_eq!(body_text(ctx.get("/api/auth/check", &[]).await).await, anonymous);
    }
}

#[tokio::test]
async fn test_auth_check_passes_resolved_user_through() {
    let user = AuthUser {
        id: Uuid::new_v4(),
        email: "grace@example.com".to_string(),
        name: None,
    };
    let resolver = ScriptedResolver::returning(Some(user.clone()));
    let ctx = TestContext::with_resolver(resolver.clone());

    let response = ctx.get("/api/auth/check", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"], serde_json::to_value(&user).unwrap());
    assert_eq!(resolver.calls(), 1);
}

#[tokio::test]
async fn test_auth_check_when_identity_backend_is_down() {
    let resolver = ScriptedResolver::failing("connection refused");
    let ctx = TestContext::with_resolver(resolver);

    let response = ctx.get("/api/auth/check", &[]).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"], "service_unavailable");
    assert!(!json["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_auth_check_rejects_post() {
    let ctx = TestContext::with_resolver(Arc::new(ScriptedResolver {
        answer: Ok(None),
        calls: Default::default(),
    }));

    let response = ctx
        .app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/auth/check")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_landing_page() {
    let ctx = TestContext::new();

    let response = ctx.get("/", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(response.headers().get("content-security-policy").is_some());

    let page = body_text(response).await;
    let mut last = 0;
    for section in Section::ORDER {
        let marker = format!("data-section=\"{}\"", section.slug());
        let at = page.find(&marker).expect("section missing");
        assert!(at >= last, "{} out of order", section.slug());
        last = at;
    }
}

#[tokio::test]
async fn test_health_without_database() {
    let ctx = TestContext::new();

    let response = ctx.get("/health", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "not_configured");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route() {
    let ctx = TestContext::new();

    let response = ctx.get("/nowhere", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
}
