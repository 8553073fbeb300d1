use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::AccountToken;

pub mod current_account;
pub mod login;
pub mod register;

/// Message for every credential failure, so callers cannot probe which usernames exist.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidUsername(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::UsernameTaken(_) => ApiError::Conflict(err.to_string()),
            AccountError::UnknownUsername(_) | AccountError::InvalidPassword => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            AccountError::Password(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body returned by both register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponseData {
    pub username: String,
    pub token: String,
}

impl From<AccountToken> for AccountResponseData {
    fn from(result: AccountToken) -> Self {
        Self {
            username: result.username.as_str().to_string(),
            token: result.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtError;
    use auth::PasswordError;

    use super::*;
    use crate::account::errors::UsernameError;

    #[test]
    fn test_credential_failures_share_one_message() {
        let unknown = ApiError::from(AccountError::UnknownUsername("nouser".to_string()));
        let wrong = ApiError::from(AccountError::InvalidPassword);

        assert_eq!(unknown, ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        assert_eq!(unknown, wrong);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            ApiError::from(AccountError::UsernameTaken("alice".to_string())),
            ApiError::Conflict(message) if message.contains("taken")
        ));
        assert!(matches!(
            ApiError::from(AccountError::InvalidUsername(UsernameError::Empty)),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let errors = [
            AccountError::Password(PasswordError::InvalidArgument("stored salt is empty".into())),
            AccountError::Token(JwtError::EncodingFailed("boom".into())),
            AccountError::DatabaseError("connection refused".into()),
        ];

        for error in errors {
            assert_eq!(
                ApiError::from(error),
                ApiError::InternalServerError("Internal server error".to_string())
            );
        }
    }
}
