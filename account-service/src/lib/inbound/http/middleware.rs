use auth::Identity;
use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub identity: Identity,
    pub expires_at: DateTime<Utc>,
}

/// Middleware that validates bearer tokens and adds the identity to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        let message = match e {
            JwtError::TokenExpired => "Token has expired",
            _ => "Invalid or expired token",
        };
        unauthorized(message)
    })?;

    let identity = claims.identity().ok_or_else(|| {
        tracing::error!("Missing 'sub' claim in token");
        unauthorized("Invalid token format")
    })?;

    let expires_at = claims
        .exp
        .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
        .ok_or_else(|| {
            tracing::error!("Missing or out-of-range 'exp' claim in token");
            unauthorized("Invalid token format")
        })?;

    req.extensions_mut().insert(AuthenticatedAccount {
        identity,
        expires_at,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization header format. Expected: Bearer <token>"))
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
