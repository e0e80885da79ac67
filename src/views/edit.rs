use crate::core::error::ScoreError;
use crate::models::siswa::{Score, Siswa, SiswaUpdate};
use crate::views::route::Route;
use crate::views::{report_failure, ViewContext};
use std::sync::Mutex;
use tracing::{info, warn};

pub const LOAD_FAILED: &str = "Terjadi kesalahan saat meload data. Silakan refresh kembali";
pub const UPDATE_FAILED: &str = "Terjadi kesalahan saat update data. Silakan coba kembali";
pub const UPDATE_SUCCESS: &str = "Data Berhasil di update";

/// Score inputs keep at most this many characters as typed
pub const SCORE_INPUT_MAX_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Nama,
    Kelas,
    Sekolah,
    SkorBangunDatar,
    SkorLuasKeliling,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Nama => "Nama Siswa",
            FormField::Kelas => "Kelas",
            FormField::Sekolah => "Sekolah",
            FormField::SkorBangunDatar => "Skor Bangun Datar",
            FormField::SkorLuasKeliling => "Skor Luas & Keliling",
        }
    }

    fn is_score(self) -> bool {
        matches!(self, FormField::SkorBangunDatar | FormField::SkorLuasKeliling)
    }
}

/// A rejected form submission, tied to the offending field
#[derive(Debug, Clone, PartialEq)]
pub struct FormError {
    pub field: FormField,
    pub error: ScoreError,
}

impl FormError {
    /// The message shown to the user
    pub fn message(&self) -> String {
        match &self.error {
            ScoreError::OutOfRange(_) => {
                format!("{} tidak bisa lebih dari 100", self.field.label())
            }
            ScoreError::NotANumber(_) => format!("{} harus berupa angka", self.field.label()),
        }
    }
}

/// Raw field values of the edit form, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub nama: String,
    pub kelas: String,
    pub sekolah: String,
    pub skor_bangun_datar: String,
    pub skor_luas_keliling: String,
}

impl EditForm {
    pub fn from_record(record: &Siswa) -> Self {
        let score_text = |score: Option<Score>| score.map(|s| s.to_string()).unwrap_or_default();

        Self {
            nama: record.nama.clone(),
            kelas: record.kelas.clone(),
            sekolah: record.sekolah.clone(),
            skor_bangun_datar: score_text(record.skor_bangun_datar),
            skor_luas_keliling: score_text(record.skor_luas_keliling),
        }
    }

    /// Set a field the way typing into it would; score fields are cut to
    /// [`SCORE_INPUT_MAX_CHARS`]
    pub fn set(&mut self, field: FormField, value: &str) {
        let value = if field.is_score() {
            value.chars().take(SCORE_INPUT_MAX_CHARS).collect()
        } else {
            value.to_string()
        };

        match field {
            FormField::Nama => self.nama = value,
            FormField::Kelas => self.kelas = value,
            FormField::Sekolah => self.sekolah = value,
            FormField::SkorBangunDatar => self.skor_bangun_datar = value,
            FormField::SkorLuasKeliling => self.skor_luas_keliling = value,
        }
    }

    /// Check both scores and build the update body
    pub fn validate(&self) -> Result<SiswaUpdate, FormError> {
        let score = |field: FormField, text: &str| {
            Score::parse(text).map_err(|error| FormError { field, error })
        };

        let skor_bangun_datar = score(FormField::SkorBangunDatar, &self.skor_bangun_datar)?;
        let skor_luas_keliling = score(FormField::SkorLuasKeliling, &self.skor_luas_keliling)?;

        Ok(SiswaUpdate {
            nama: self.nama.clone(),
            kelas: self.kelas.clone(),
            sekolah: self.sekolah.clone(),
            skor_bangun_datar,
            skor_luas_keliling,
        })
    }
}

/// Edit page of a single record
pub struct EditView {
    ctx: ViewContext,
    id: String,
    form: Mutex<EditForm>,
}

impl EditView {
    pub fn new(ctx: ViewContext, id: impl Into<String>) -> Self {
        Self::with_form(ctx, id, EditForm::default())
    }

    /// A view whose fields were already typed, e.g. from a posted form
    pub fn with_form(ctx: ViewContext, id: impl Into<String>, form: EditForm) -> Self {
        Self {
            ctx,
            id: id.into(),
            form: Mutex::new(form),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn form(&self) -> EditForm {
        self.form
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_field(&self, field: FormField, value: &str) {
        self.form
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .set(field, value);
    }

    /// Fetch the record and fill the form with it
    pub async fn load(&self) -> Option<Route> {
        match self.ctx.scope.run(self.ctx.api.get_siswa(&self.id)).await? {
            Ok(record) => {
                *self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) =
                    EditForm::from_record(&record);
                None
            }
            Err(e) => {
                warn!(id = %self.id, error = %e, "Failed to load siswa");
                report_failure(&self.ctx.toasts, &e, LOAD_FAILED)
            }
        }
    }

    /// Validate and send the form. Invalid scores never reach the network.
    pub async fn submit(&self) -> Option<Route> {
        let update = match self.form().validate() {
            Ok(update) => update,
            Err(e) => {
                self.ctx.toasts.error(e.message());
                return None;
            }
        };

        match self.ctx.scope.run(self.ctx.api.update_siswa(&self.id, &update)).await? {
            Ok(()) => {
                info!(id = %self.id, "Siswa form submitted");
                self.ctx.toasts.success(UPDATE_SUCCESS);
                Some(Route::Home)
            }
            Err(e) => {
                warn!(id = %self.id, error = %e, "Failed to update siswa");
                report_failure(&self.ctx.toasts, &e, UPDATE_FAILED)
            }
        }
    }
}
