use crate::services::CalendarServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

#[derive(Debug)]
pub struct ServerError {
    status: StatusCode,
    body: Option<Value>,
}

impl ServerError {
    pub fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self.body {
            Some(v) => (self.status, Json(v)).into_response(),
            None => self.status.into_response(),
        }
    }
}

impl From<CalendarServiceError> for ServerError {
    fn from(err: CalendarServiceError) -> Self {
        match err {
            CalendarServiceError::CalendarNotFound => ServerError::new(StatusCode::NOT_FOUND, None),
            CalendarServiceError::InvalidName(_) => ServerError::new(
                StatusCode::BAD_REQUEST,
                Some(json!({ "error": "Invalid calendar name" })),
            ),
            // I/O details stay in the logs
            CalendarServiceError::StorageError(_) => ServerError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(json!({ "error": "Internal Server Error" })),
            ),
        }
    }
}
