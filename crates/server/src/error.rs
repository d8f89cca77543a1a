use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use funcsearch_common::FuncSearchError;
use std::fmt;

/// HTTP wrapper around `FuncSearchError`
#[derive(Debug)]
pub struct ApiError(pub FuncSearchError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FuncSearchError> for ApiError {
    fn from(err: FuncSearchError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.0.to_string(),
        }))
    }
}
