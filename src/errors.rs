use axum::http::StatusCode;
use thiserror::Error;

/// Failures the check-in store can report. None of them leave the store
/// partially updated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckInError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("not entitled: {0}")]
    NotEntitled(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<CheckInError> for AppError {
    fn from(err: CheckInError) -> Self {
        let status = match &err {
            CheckInError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CheckInError::NotEntitled(_) => StatusCode::FORBIDDEN,
            CheckInError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_entitled_maps_to_forbidden() {
        let err = AppError::from(CheckInError::NotEntitled("evening opens at 17:00".into()));
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert!(err.message.contains("17:00"));
    }

    #[test]
    fn invalid_argument_maps_to_bad_request() {
        let err = AppError::from(CheckInError::InvalidArgument("kind".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
