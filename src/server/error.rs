use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{event, Level};

#[derive(Debug)]
pub enum ServerError {
    /// The request could not be interpreted. Nothing was changed.
    MalformedInput {
        error: &'static str,
        details: String,
    },
    Internal(String),
}

impl ServerError {
    pub fn malformed(error: &'static str, details: impl ToString) -> Self {
        ServerError::MalformedInput {
            error,
            details: details.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MalformedInput { .. } => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ServerError::MalformedInput { error, details } => {
                event!(Level::WARN, error, %details, "rejected request");
                json!({ "error": error, "details": details })
            }
            ServerError::Internal(details) => {
                event!(Level::ERROR, %details, "request failed");
                json!({ "error": "Internal error", "details": details })
            }
        };

        (status, Json(body)).into_response()
    }
}
