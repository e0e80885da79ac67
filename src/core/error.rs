// Centralized error handling for the dashboard

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Errors returned by the remote Siswa API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API answered 401; the stored token is no longer valid
    #[error("Session expired")]
    SessionExpired,

    #[error("API returned error status: {0}")]
    Status(reqwest::StatusCode),

    /// Login refused by the API, carrying its message
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode API response: {0}")]
    Decode(String),
}

/// Errors raised while validating a score field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("skor harus berupa angka bulat, bukan '{0}'")]
    NotANumber(String),

    #[error("skor harus di antara 0 dan 100, bukan {0}")]
    OutOfRange(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session file: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No records to export")]
    Empty,

    #[error("Failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

/// Errors surfaced by the dashboard web handlers
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let page = crate::render::pages::error_page(status, &self.to_string());

        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_server_message() {
        let err = ApiError::Rejected("Password salah".to_string());
        assert_eq!(err.to_string(), "Password salah");
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_score_error_display() {
        let err = ScoreError::NotANumber("abc".to_string());
        assert_eq!(err.to_string(), "skor harus berupa angka bulat, bukan 'abc'");

        let err = ScoreError::OutOfRange("101".to_string());
        assert_eq!(err.to_string(), "skor harus di antara 0 dan 100, bukan 101");
    }

    #[test]
    fn test_dashboard_error_status_codes() {
        let response = DashboardError::NotFound("/nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = DashboardError::InternalError("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
