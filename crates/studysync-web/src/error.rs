use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use studysync_extract::ExtractError;
use studysync_store::StoreError;

/// Handler-level failure rendered as an error page.
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Extract(ExtractError),
    BadRequest(String),
    NotFound,
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        AppError::Extract(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Store(StoreError::Io(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong on our side.".to_string(),
                )
            }
            AppError::Extract(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Could not read that document: {e}"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found.".to_string()),
        };

        let body = crate::template::render_error(status.as_u16(), &message);
        (status, Html(body)).into_response()
    }
}
