use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hbnb_storage::StorageError;
use serde_json::json;
use std::borrow::Cow;
use tracing::error;

/// Every failure a handler can report.
///
/// Client errors carry the description returned in `{"error": ...}`; server errors are logged
/// and answered with a generic message.
#[hbnb_derive::hbnb_error]
pub enum ApiError {
    #[error("Not found{}", format_context(.context))]
    NotFound { context: Option<Cow<'static, str>> },

    #[error("{message}")]
    BadRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    #[must_use]
    pub const fn not_found() -> Self {
        Self::NotFound { context: None }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into(), context: None }
    }

    /// `400 Missing <field>`.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::bad_request(format!("Missing {field}"))
    }

    /// `400 Not a JSON`.
    #[must_use]
    pub const fn not_a_json() -> Self {
        Self::BadRequest { message: Cow::Borrowed("Not a JSON"), context: None }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Storage { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::NotFound { .. } => Cow::Borrowed("Not found"),
            Self::BadRequest { message, .. } => message.clone(),
            Self::Storage { .. } | Self::Internal { .. } => {
                error!(error = %self, "Request failed");
                Cow::Borrowed("Internal server error")
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::missing("name").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::missing("name").to_string(), "Missing name");
        assert_eq!(ApiError::not_a_json().to_string(), "Not a JSON");

        let closed = ApiError::from(StorageError::Closed { context: None });
        assert_eq!(closed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::from("boom").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
