use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mailstub_core::error::CoreError;
use mailstub_core::messages::INTERNAL_SERVER_ERROR;
use mailstub_core::validation::FieldErrors;
use mailstub_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures. Implements [`IntoResponse`] so every handler produces one of
/// two JSON shapes:
///
/// - `400 { "errors": { <field>: <message> } }` for validation failures;
/// - `500 { "message": "Internal server error." }` for anything unexpected.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mailstub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from `mailstub_db`.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A request that could not be read at all (malformed JSON, wrong
    /// content type, unparsable query string).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Core(CoreError::Validation(errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(CoreError::Validation(errors)) => {
                tracing::debug!(%errors, "Request failed validation");
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                internal_error_response()
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "message": msg }))).into_response()
            }
        }
    }
}

/// The opaque 500 response. Never carries details of the failure.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "message": INTERNAL_SERVER_ERROR })),
    )
        .into_response()
}
