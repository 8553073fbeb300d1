use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Echo the identity carried by the caller's bearer token.
pub async fn current_account(
    Extension(account): Extension<AuthenticatedAccount>,
) -> ApiSuccess<CurrentAccountResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        CurrentAccountResponseData {
            username: account.identity.username,
            expires_at: account.expires_at,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentAccountResponseData {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}
