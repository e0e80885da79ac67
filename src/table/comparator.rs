use crate::models::siswa::Siswa;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }

    pub fn from_name(name: &str) -> Option<Order> {
        match name {
            "asc" => Some(Order::Asc),
            "desc" => Some(Order::Desc),
            _ => None,
        }
    }
}

/// Sortable table columns, keyed by their API field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Nama,
    Kelas,
    Sekolah,
    SkorBangunDatar,
    SkorLuasKeliling,
    TanggalSubmit,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Nama,
        SortKey::Kelas,
        SortKey::Sekolah,
        SortKey::SkorBangunDatar,
        SortKey::SkorLuasKeliling,
        SortKey::TanggalSubmit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Nama => "nama",
            SortKey::Kelas => "kelas",
            SortKey::Sekolah => "sekolah",
            SortKey::SkorBangunDatar => "skor_bangun_datar",
            SortKey::SkorLuasKeliling => "skor_luas_keliling",
            SortKey::TanggalSubmit => "tanggal_submit",
        }
    }

    pub fn from_name(name: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|key| key.as_str() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Nama => "Nama",
            SortKey::Kelas => "Kelas",
            SortKey::Sekolah => "Sekolah",
            SortKey::SkorBangunDatar => "Skor Bangun Datar",
            SortKey::SkorLuasKeliling => "Skor Luas & Keliling",
            SortKey::TanggalSubmit => "Tanggal Submit",
        }
    }

    /// Compare the field this key names. Absent scores sort lowest.
    fn compare(self, a: &Siswa, b: &Siswa) -> Ordering {
        match self {
            SortKey::Nama => a.nama.cmp(&b.nama),
            SortKey::Kelas => a.kelas.cmp(&b.kelas),
            SortKey::Sekolah => a.sekolah.cmp(&b.sekolah),
            SortKey::SkorBangunDatar => a.skor_bangun_datar.cmp(&b.skor_bangun_datar),
            SortKey::SkorLuasKeliling => a.skor_luas_keliling.cmp(&b.skor_luas_keliling),
            SortKey::TanggalSubmit => a.created_at.cmp(&b.created_at),
        }
    }
}

/// `Less` when `b`'s key sorts before `a`'s, i.e. larger keys come first
pub fn descending_comparator(a: &Siswa, b: &Siswa, order_by: SortKey) -> Ordering {
    order_by.compare(b, a)
}

/// Two-argument comparator for the given direction and column.
///
/// Equal keys compare `Equal`; callers that need a stable order must break
/// ties themselves (see [`crate::table::state::apply_filter`]).
pub fn get_comparator(order: Order, order_by: SortKey) -> impl Fn(&Siswa, &Siswa) -> Ordering {
    move |a, b| match order {
        Order::Desc => descending_comparator(a, b, order_by),
        Order::Asc => descending_comparator(a, b, order_by).reverse(),
    }
}
