use crate::core::state::AppState;
use crate::export::excel::XLSX_CONTENT_TYPE;
use crate::handlers::table_location;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Download the held collection as a spreadsheet
///
/// GET /export
pub async fn export_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.list.export(&state.export) {
        Some(file) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.filename.replace('"', "")),
                ),
            ],
            file.bytes,
        )
            .into_response(),
        // The toast explains why nothing was downloaded
        None => table_location(&state),
    }
}
