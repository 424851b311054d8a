use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use service::auth::errors::AuthError;

use crate::validation::FieldError;

/// Errors leaving an HTTP handler. Only translates; never mints business errors.
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    Auth(AuthError),
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self { ApiError::Auth(e) }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self { ApiError::Validation(errors) }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(AuthError::EmailAlreadyExists) => StatusCode::CONFLICT,
            ApiError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(fields) => ErrorBody {
                error: "ValidationError".into(),
                message: "request validation failed".into(),
                fields,
            },
            ApiError::Auth(e) if e.is_business() => ErrorBody {
                error: e.kind().into(),
                message: e.to_string(),
                fields: Vec::new(),
            },
            ApiError::Auth(e) => {
                // internal detail stays in the log
                error!(code = e.code(), error = %e, "unexpected auth failure");
                ErrorBody {
                    error: e.kind().into(),
                    message: "internal server error".into(),
                    fields: Vec::new(),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
