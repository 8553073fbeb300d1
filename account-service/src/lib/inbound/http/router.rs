use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_account::current_account;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        account_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/account/register", post(register))
        .route("/api/account/login", post(login));

    let protected_routes = Router::new()
        .route("/api/account/me", get(current_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::Identity;
    use auth::SigningKey;
    use axum::body::to_bytes;
    use axum::http::header;
    use axum::http::StatusCode;
    use serde_json::json;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::account::service::AccountService;
    use crate::outbound::repositories::InMemoryAccountRepository;

    const SECRET: &str = "router-test-secret-key-that-is-at-least-sixty-four-bytes-long-ok";

    fn app() -> (Router, Arc<Authenticator>) {
        let authenticator = Arc::new(Authenticator::new(
            &SigningKey::from_secret(SECRET).expect("valid key"),
        ));
        let repository = Arc::new(InMemoryAccountRepository::new());
        let service = Arc::new(AccountService::new(repository, Arc::clone(&authenticator)));
        (create_router(service, Arc::clone(&authenticator)), authenticator)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_returns_token() {
        let (router, authenticator) = app();

        let response = router
            .oneshot(post_json(
                "/api/account/register",
                json!({ "username": "Alice", "password": "pw123" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status_code"], 200);
        assert_eq!(body["data"]["username"], "alice");

        let token = body["data"]["token"].as_str().unwrap();
        let claims = authenticator.validate_token(token).unwrap();
        assert_eq!(claims.identity(), Some(Identity::new("alice")));
    }

    #[tokio::test]
    async fn test_register_invalid_username() {
        let (router, _) = app();

        let response = router
            .oneshot(post_json(
                "/api/account/register",
                json!({ "username": "", "password": "pw123" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (router, _) = app();

        let response = router
            .oneshot(post_json(
                "/api/account/login",
                json!({ "username": "nouser", "password": "x" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["data"]["message"], "Invalid credentials");
        assert!(body["data"].get("token").is_none());
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let (router, _) = app();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/account/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["data"]["message"], "Missing Authorization header");
    }

    #[tokio::test]
    async fn test_me_with_valid_token() {
        let (router, authenticator) = app();
        let token = authenticator
            .generate_token(&Identity::new("carol"))
            .unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/account/me")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["username"], "carol");
        assert!(body["data"]["expires_at"].is_string());
    }
}
