use crate::core::error::ExportError;
use crate::export::excel::{export_records, ExportFile, ExportSettings};
use crate::models::siswa::Siswa;
use crate::table::state::TableState;
use crate::views::route::Route;
use crate::views::scope::ViewScope;
use crate::views::{report_failure, ViewContext};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

pub const LOAD_FAILED: &str = "Terjadi kesalahan saat meload data. Silakan refresh kembali";
pub const DELETE_FAILED: &str = "Terjadi kesalahan saat menghapus data. Silakan coba lagi nanti";
pub const DELETE_SUCCESS: &str = "Data Berhasil Dihapus";
pub const EXPORT_EMPTY: &str = "Data Kosong";

/// The Siswa table: record collection, table state and row operations
pub struct SiswaListView {
    ctx: ViewContext,
    records: RwLock<Vec<Siswa>>,
    table: RwLock<TableState>,
    loaded: AtomicBool,
    /// Replaced on reset, so calls started before a reset never land
    scope: RwLock<Arc<ViewScope>>,
}

impl SiswaListView {
    pub fn new(ctx: ViewContext, rows_per_page: usize) -> Self {
        Self {
            ctx,
            records: RwLock::new(Vec::new()),
            table: RwLock::new(TableState::new(rows_per_page)),
            loaded: AtomicBool::new(false),
            scope: RwLock::new(Arc::new(ViewScope::new())),
        }
    }

    pub fn scope(&self) -> Arc<ViewScope> {
        Arc::clone(&self.scope.read().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    /// Snapshot of the in-memory collection
    pub fn records(&self) -> Vec<Siswa> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn find(&self, id: &str) -> Option<Siswa> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Whether a fetch has succeeded since the view was created or reset
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn table(&self) -> TableState {
        self.table
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn update_table(&self, update: impl FnOnce(&mut TableState)) {
        let mut table = self.table.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        update(&mut table);
    }

    /// Fetch the whole collection, replacing what is held
    pub async fn load(&self) -> Option<Route> {
        // A closed scope means the view was reset; leave its state alone
        match self.scope().run(self.ctx.api.list_siswa()).await? {
            Ok(records) => {
                info!(count = records.len(), "Siswa collection loaded");
                *self.records.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = records;
                self.loaded.store(true, Ordering::Release);
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load siswa collection");
                report_failure(&self.ctx.toasts, &e, LOAD_FAILED)
            }
        }
    }

    /// Delete a record on the server, then drop it locally
    pub async fn delete(&self, id: &str) -> Option<Route> {
        match self.scope().run(self.ctx.api.delete_siswa(id)).await? {
            Ok(()) => {
                self.records
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .retain(|record| record.id != id);
                self.ctx.toasts.success(DELETE_SUCCESS);
                None
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to delete siswa");
                report_failure(&self.ctx.toasts, &e, DELETE_FAILED)
            }
        }
    }

    /// Build the spreadsheet of every held record, in collection order
    pub fn export(&self, settings: &ExportSettings) -> Option<ExportFile> {
        let records = self.records();

        match export_records(&records, settings) {
            Ok(file) => {
                info!(rows = records.len(), filename = %file.filename, "Siswa exported");
                Some(file)
            }
            Err(ExportError::Empty) => {
                self.ctx.toasts.error(EXPORT_EMPTY);
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to export siswa");
                self.ctx.toasts.error(e.to_string());
                None
            }
        }
    }

    /// Forget everything held, e.g. after signing out
    pub fn reset(&self) {
        let previous = std::mem::replace(
            &mut *self.scope.write().unwrap_or_else(|poisoned| poisoned.into_inner()),
            Arc::new(ViewScope::new()),
        );
        previous.close();

        self.records
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        self.loaded.store(false, Ordering::Release);

        let rows_per_page = self.table().rows_per_page();
        *self.table.write().unwrap_or_else(|poisoned| poisoned.into_inner()) =
            TableState::new(rows_per_page);
    }
}
