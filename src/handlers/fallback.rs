use crate::core::error::DashboardError;
use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};

pub async fn fallback_handler(uri: Uri) -> Response {
    DashboardError::NotFound(uri.path().to_string()).into_response()
}
