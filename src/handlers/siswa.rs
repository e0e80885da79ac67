use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::handlers::{redirect, table_location};
use crate::render::pages::{confirm_delete_page, edit_page, list_page};
use crate::table::comparator::{Order, SortKey};
use crate::views::edit::{EditView, FormField};
use crate::views::row_menu::RowActionMenu;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Table events carried by list links; no parameters means a fresh visit
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub rows: Option<usize>,
    pub order_by: Option<String>,
    pub order: Option<String>,
    pub filter: Option<String>,
}

impl ListQuery {
    fn is_table_event(&self) -> bool {
        self.page.is_some()
            || self.rows.is_some()
            || self.order_by.is_some()
            || self.order.is_some()
            || self.filter.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct EditFormInput {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub kelas: String,
    #[serde(default)]
    pub sekolah: String,
    #[serde(default)]
    pub skor_bangun_datar: String,
    #[serde(default)]
    pub skor_luas_keliling: String,
}

/// The Siswa table
///
/// GET /?page=<n>&rows=<n>&order_by=<column>&order=<asc|desc>&filter=<text>
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    // A plain visit fetches the collection anew; table events reuse it
    if !query.is_table_event() || !state.list.is_loaded() {
        if let Some(route) = state.list.load().await {
            return redirect(&route);
        }
    }

    state.list.update_table(|table| {
        if let Some(rows) = query.rows {
            table.set_rows_per_page(rows);
        }
        if let Some(filter) = query.filter {
            if filter != table.filter_name() {
                table.set_filter_name(filter);
            }
        }
        // Absolute sort; toggling lives in the header links
        let order_by = query.order_by.as_deref().and_then(SortKey::from_name);
        let order = query.order.as_deref().and_then(Order::from_name);
        if order_by.is_some() || order.is_some() {
            let key = order_by.unwrap_or(table.order_by());
            table.set_sort(key, order.unwrap_or_default());
        }
        if let Some(page) = query.page {
            table.set_page(page);
        }
    });

    let records = state.list.records();
    let table = state.list.table();
    let view = table.view(&records);

    debug!(
        page = table.page(),
        rows_per_page = table.rows_per_page(),
        order_by = table.order_by().as_str(),
        order = table.order().as_str(),
        visible = view.rows.len(),
        "Rendering siswa table"
    );

    let toasts = state.toasts.drain();
    Html(list_page(&toasts, &table, &view, state.list.is_loaded(), records.len())).into_response()
}

/// Edit form of one record
///
/// GET /siswa/edit/{id}
pub async fn edit_page_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let view = EditView::new(state.view_context(), id);

    if let Some(route) = view.load().await {
        return redirect(&route);
    }

    let toasts = state.toasts.drain();
    Html(edit_page(&toasts, view.id(), &view.form())).into_response()
}

/// Submit the edit form
///
/// POST /siswa/edit/{id}
pub async fn edit_submit_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(input): Form<EditFormInput>,
) -> Response {
    let view = EditView::new(state.view_context(), id);
    view.set_field(FormField::Nama, &input.nama);
    view.set_field(FormField::Kelas, &input.kelas);
    view.set_field(FormField::Sekolah, &input.sekolah);
    view.set_field(FormField::SkorBangunDatar, &input.skor_bangun_datar);
    view.set_field(FormField::SkorLuasKeliling, &input.skor_luas_keliling);

    if let Some(route) = view.submit().await {
        return redirect(&route);
    }

    let toasts = state.toasts.drain();
    Html(edit_page(&toasts, view.id(), &view.form())).into_response()
}

fn row_menu(state: &AppState, id: &str) -> Result<RowActionMenu, DashboardError> {
    let record = state
        .list
        .find(id)
        .ok_or_else(|| DashboardError::NotFound(format!("Siswa {}", id)))?;

    let mut menu = RowActionMenu::new(&record);
    menu.open();
    menu.request_delete();
    Ok(menu)
}

/// Delete confirmation dialog
///
/// GET /siswa/{id}/delete
pub async fn delete_confirm_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, DashboardError> {
    let menu = row_menu(&state, &id)?;

    let toasts = state.toasts.drain();
    Ok(Html(confirm_delete_page(&toasts, &menu, &id)).into_response())
}

/// Answer of the delete confirmation dialog
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteDecision {
    #[default]
    Confirm,
    Cancel,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub decision: DeleteDecision,
}

/// Confirm or cancel a delete
///
/// POST /siswa/{id}/delete
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, DashboardError> {
    let mut menu = row_menu(&state, &id)?;

    if let DeleteDecision::Cancel = form.decision {
        menu.dismiss();
        debug!(id = %id, "Delete cancelled");
        return Ok(table_location(&state));
    }

    if let Some(id) = menu.confirm() {
        if let Some(route) = state.list.delete(&id).await {
            return Ok(redirect(&route));
        }
    }

    Ok(table_location(&state))
}
