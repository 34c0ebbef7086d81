//! Error -> HTTP response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use hostgate_core::error::{ClientCode, HostgateError};

/// Handler error; wraps the core error so it can become a response.
#[derive(Debug)]
pub struct ApiError(pub HostgateError);

impl From<HostgateError> for ApiError {
    fn from(e: HostgateError) -> Self {
        Self(e)
    }
}

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "message": msg }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.client_code() {
            ClientCode::Conflict => StatusCode::CONFLICT.into_response(),
            ClientCode::NotFoundThis => message(StatusCode::NOT_FOUND, "not found this"),
            ClientCode::NotFoundOther => message(StatusCode::NOT_FOUND, "not found other"),
            ClientCode::NotListed => match &self.0 {
                HostgateError::NotListed { list, .. } => {
                    message(StatusCode::NOT_FOUND, &format!("not found in {list}"))
                }
                _ => StatusCode::NOT_FOUND.into_response(),
            },
            ClientCode::BadRequest => {
                tracing::debug!(error = %self.0, "bad request");
                StatusCode::BAD_REQUEST.into_response()
            }
            ClientCode::Internal => {
                tracing::error!(error = %self.0, "request failed");
                message(StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}
