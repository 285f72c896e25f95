pub mod calendars;
pub mod campaigns;
pub mod dates;
pub mod export;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use comemora_core::ComemoraError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Convert errors to HTTP responses
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<ComemoraError>() {
            Some(ComemoraError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            Some(ComemoraError::CalendarNotFound(_) | ComemoraError::CampaignNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let details = self.0.chain().nth(1).map(|cause| cause.to_string());
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
            details,
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
