use crate::core::config::ExportConfig;
use crate::core::error::ExportError;
use crate::models::siswa::{Score, Siswa};
use crate::utils::time::format_date;
use rust_xlsxwriter::Workbook;

/// Header row of the exported sheet
pub const COLUMNS: [&str; 7] = [
    "no",
    "nama",
    "kelas",
    "sekolah",
    "skor_bangun_datar",
    "skor_luas_keliling",
    "tanggal_submit",
];

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub filename: String,
    pub sheet_name: String,
}

impl From<&ExportConfig> for ExportSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            filename: config.filename.clone(),
            sheet_name: config.sheet_name.clone(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

/// One flattened spreadsheet row
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub no: usize,
    pub nama: String,
    pub kelas: String,
    pub sekolah: String,
    pub skor_bangun_datar: Option<Score>,
    pub skor_luas_keliling: Option<Score>,
    pub tanggal_submit: String,
}

/// A generated file ready to hand to the user
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Flatten records in collection order, numbering them from 1
pub fn project_rows(records: &[Siswa]) -> Vec<ExportRow> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| ExportRow {
            no: index + 1,
            nama: record.nama.clone(),
            kelas: record.kelas.clone(),
            sekolah: record.sekolah.clone(),
            skor_bangun_datar: record.skor_bangun_datar,
            skor_luas_keliling: record.skor_luas_keliling,
            tanggal_submit: format_date(record.created_at.seconds),
        })
        .collect()
}

/// Render rows into an xlsx workbook held in memory
pub fn build_workbook(rows: &[ExportRow], sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let r = (index + 1) as u32;

        worksheet.write_number(r, 0, row.no as f64)?;
        worksheet.write_string(r, 1, &row.nama)?;
        worksheet.write_string(r, 2, &row.kelas)?;
        worksheet.write_string(r, 3, &row.sekolah)?;
        if let Some(score) = row.skor_bangun_datar {
            worksheet.write_number(r, 4, f64::from(score.value()))?;
        }
        if let Some(score) = row.skor_luas_keliling {
            worksheet.write_number(r, 5, f64::from(score.value()))?;
        }
        worksheet.write_string(r, 6, &row.tanggal_submit)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Export the given records. An empty collection produces no file.
pub fn export_records(records: &[Siswa], settings: &ExportSettings) -> Result<ExportFile, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let rows = project_rows(records);
    let bytes = build_workbook(&rows, &settings.sheet_name)?;

    Ok(ExportFile {
        filename: settings.filename.clone(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::siswa::Timestamp;

    fn record(id: &str, nama: &str, skor: Option<u8>) -> Siswa {
        Siswa {
            id: id.to_string(),
            nama: nama.to_string(),
            kelas: "5A".to_string(),
            sekolah: "SDN 1".to_string(),
            skor_bangun_datar: skor.and_then(|s| Score::new(s).ok()),
            skor_luas_keliling: None,
            created_at: Timestamp { seconds: 1_700_000_000, nanoseconds: 0 },
        }
    }

    #[test]
    fn test_project_rows_numbers_in_collection_order() {
        let rows = project_rows(&[record("b", "Budi", Some(80)), record("a", "Andi", None)]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].no, 1);
        assert_eq!(rows[0].nama, "Budi");
        assert_eq!(rows[0].skor_bangun_datar.map(Score::value), Some(80));
        assert_eq!(rows[0].tanggal_submit, "14 Nov 2023");
        assert_eq!(rows[1].no, 2);
        assert_eq!(rows[1].nama, "Andi");
    }

    #[test]
    fn test_empty_export_produces_no_file() {
        let result = export_records(&[], &ExportSettings::default());
        assert!(matches!(result, Err(ExportError::Empty)));
    }

    #[test]
    fn test_export_builds_xlsx() {
        let file = export_records(&[record("1", "Budi", Some(90))], &ExportSettings::default())
            .unwrap();

        assert_eq!(file.filename, "Data-Scratch-Siswa.xlsx");
        // xlsx files are zip archives
        assert!(file.bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_sheet_name_is_an_error() {
        let settings = ExportSettings {
            filename: "x.xlsx".to_string(),
            sheet_name: "bad[name]".to_string(),
        };
        let result = export_records(&[record("1", "Budi", None)], &settings);
        assert!(matches!(result, Err(ExportError::Workbook(_))));
    }
}
