/// Session check endpoint
///
/// The client-side app calls this to learn whether the visitor is signed in.
/// The handler asks the identity collaborator and forwards its answer.
///
/// # Endpoint
///
/// ```text
/// GET /api/auth/check
/// ```
///
/// # Responses
///
/// Signed in (200):
/// ```json
/// { "success": true, "user": { "id": "uuid", "email": "ada@example.com", "name": "Ada" } }
/// ```
///
/// Not signed in (401):
/// ```json
/// { "success": false, "message": "Not authenticated" }
/// ```
///
/// # Errors
///
/// - `503 Service Unavailable`: the identity collaborator could not be consulted

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use launchpad_shared::auth::identity::AuthUser;
use serde::Serialize;

/// Message sent with every 401 from the session check
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Outcome of a session check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCheck {
    /// The collaborator resolved a user
    Authenticated(AuthUser),

    /// No usable identity on the request
    Unauthenticated,
}

#[derive(Serialize)]
struct AuthenticatedBody<'a> {
    success: bool,
    user: &'a AuthUser,
}

#[derive(Serialize)]
struct UnauthenticatedBody {
    success: bool,
    message: &'static str,
}

impl From<Option<AuthUser>> for AuthCheck {
    fn from(user: Option<AuthUser>) -> Self {
        match user {
            Some(user) => AuthCheck::Authenticated(user),
            None => AuthCheck::Unauthenticated,
        }
    }
}

impl IntoResponse for AuthCheck {
    fn into_response(self) -> Response {
        match self {
            AuthCheck::Authenticated(user) => Json(AuthenticatedBody {
                success: true,
                user: &user,
            })
            .into_response(),
            AuthCheck::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(UnauthenticatedBody {
                    success: false,
                    message: NOT_AUTHENTICATED,
                }),
            )
                .into_response(),
        }
    }
}

/// Session check handler
pub async fn check(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<AuthCheck> {
    let user = state.identity.resolve(&headers).await?;

    match &user {
        Some(user) => tracing::debug!(user_id = %user.id, "Session check: authenticated"),
        None => tracing::debug!("Session check: not authenticated"),
    }

    Ok(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_unauthenticated_response() {
        let response = AuthCheck::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            r#"{"success":false,"message":"Not authenticated"}"#
        );
    }

    #[tokio::test]
    async fn test_authenticated_response_passes_user_through() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
        };

        let response = AuthCheck::Authenticated(user.clone()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["user"], serde_json::to_value(&user).unwrap());
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(AuthCheck::from(None), AuthCheck::Unauthenticated);
    }
}
