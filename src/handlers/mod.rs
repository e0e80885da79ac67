pub mod auth;
pub mod export;
pub mod fallback;
pub mod health;
pub mod siswa;

use crate::core::state::AppState;
use crate::views::route::Route;
use axum::response::{IntoResponse, Redirect, Response};

pub(crate) fn redirect(route: &Route) -> Response {
    Redirect::to(&route.path()).into_response()
}

/// Back to the table on its current page without refetching
pub(crate) fn table_location(state: &AppState) -> Response {
    let page = state.list.table().page();
    Redirect::to(&format!("/?page={}", page)).into_response()
}
