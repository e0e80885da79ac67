use crate::models::siswa::Siswa;
use crate::views::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
    ConfirmingDelete,
}

/// Per-row action popover with its delete confirmation dialog.
///
/// Only [`RowActionMenu::edit`] and [`RowActionMenu::confirm`] produce
/// anything to act on; every other transition is side-effect free.
#[derive(Debug, Clone)]
pub struct RowActionMenu {
    id: String,
    nama: String,
    state: MenuState,
}

impl RowActionMenu {
    pub fn new(record: &Siswa) -> Self {
        Self {
            id: record.id.clone(),
            nama: record.nama.clone(),
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn open(&mut self) {
        self.state = MenuState::Open;
    }

    pub fn dismiss(&mut self) {
        self.state = MenuState::Closed;
    }

    /// Route to this row's edit page
    pub fn edit(&mut self) -> Option<Route> {
        if self.state != MenuState::Open {
            return None;
        }
        self.state = MenuState::Closed;
        Some(Route::EditSiswa(self.id.clone()))
    }

    pub fn request_delete(&mut self) {
        if self.state == MenuState::Open {
            self.state = MenuState::ConfirmingDelete;
        }
    }

    /// Confirmation text of the delete dialog
    pub fn confirmation_prompt(&self) -> String {
        format!("Apakah Anda yakin ingin menghapus data {}?", self.nama)
    }

    /// Confirm the dialog, yielding the id to delete. Rows without an id
    /// yield nothing.
    pub fn confirm(&mut self) -> Option<String> {
        if self.state != MenuState::ConfirmingDelete {
            return None;
        }
        self.state = MenuState::Closed;
        Some(self.id.clone()).filter(|id| !id.is_empty())
    }
}
