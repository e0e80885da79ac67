use crate::models::siswa::Siswa;
use crate::table::comparator::{get_comparator, Order, SortKey};
use std::cmp::Ordering;

pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Sort the records by `comparator`, breaking ties by input position, then
/// keep those whose name contains `filter_name` case-insensitively.
///
/// Filtering happens after sorting; the result is the same either way but
/// the order of operations is kept as the dashboard always did it.
pub fn apply_filter<'a, F>(records: &'a [Siswa], comparator: F, filter_name: &str) -> Vec<&'a Siswa>
where
    F: Fn(&Siswa, &Siswa) -> Ordering,
{
    let mut indexed: Vec<(usize, &Siswa)> = records.iter().enumerate().collect();
    indexed.sort_unstable_by(|(ia, a), (ib, b)| comparator(a, b).then(ia.cmp(ib)));

    let sorted = indexed.into_iter().map(|(_, record)| record);

    if filter_name.is_empty() {
        return sorted.collect();
    }

    let needle = filter_name.to_lowercase();
    sorted
        .filter(|record| record.nama.to_lowercase().contains(&needle))
        .collect()
}

/// Filler rows keeping a short last page as tall as a full one
pub fn empty_rows(slice_len: usize, rows_per_page: usize) -> usize {
    if slice_len == 0 {
        0
    } else {
        rows_per_page.saturating_sub(slice_len)
    }
}

/// Pagination, sort and filter state of the Siswa table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    page: usize,
    rows_per_page: usize,
    order_by: SortKey,
    order: Order,
    filter_name: String,
}

impl TableState {
    pub fn new(rows_per_page: usize) -> Self {
        let rows_per_page = if ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            rows_per_page
        } else {
            ROWS_PER_PAGE_OPTIONS[1]
        };

        Self {
            page: 0,
            rows_per_page,
            order_by: SortKey::default(),
            order: Order::default(),
            filter_name: String::new(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn order_by(&self) -> SortKey {
        self.order_by
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn filter_name(&self) -> &str {
        &self.filter_name
    }

    /// The order a click on `key` selects: the active ascending column
    /// flips to descending, any other click sorts ascending.
    pub fn sort_target(&self, key: SortKey) -> Order {
        if self.order_by == key && self.order == Order::Asc {
            Order::Desc
        } else {
            Order::Asc
        }
    }

    /// Toggle the sort as a click on `key` would
    pub fn sort(&mut self, key: SortKey) {
        let order = self.sort_target(key);
        self.set_sort(key, order);
    }

    pub fn set_sort(&mut self, key: SortKey, order: Order) {
        self.order_by = key;
        self.order = order;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn reset_page(&mut self) {
        self.page = 0;
    }

    /// Unknown sizes are ignored
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        if ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            self.rows_per_page = rows_per_page;
            self.reset_page();
        }
    }

    pub fn set_filter_name(&mut self, filter_name: impl Into<String>) {
        self.filter_name = filter_name.into();
        self.reset_page();
    }

    /// Derive what the table should display for `records`
    pub fn view<'a>(&self, records: &'a [Siswa]) -> TableView<'a> {
        let filtered = apply_filter(
            records,
            get_comparator(self.order, self.order_by),
            &self.filter_name,
        );

        let start = self.page.saturating_mul(self.rows_per_page);
        let visible: Vec<(usize, &Siswa)> = filtered
            .iter()
            .enumerate()
            .skip(start)
            .take(self.rows_per_page)
            .map(|(index, record)| (index + 1, *record))
            .collect();

        TableView {
            empty_rows: empty_rows(visible.len(), self.rows_per_page),
            not_found: filtered.is_empty() && !self.filter_name.is_empty(),
            total: filtered.len(),
            page_count: filtered.len().div_ceil(self.rows_per_page),
            rows: visible,
        }
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(ROWS_PER_PAGE_OPTIONS[1])
    }
}

/// The visible slice of the filtered and sorted collection
#[derive(Debug)]
pub struct TableView<'a> {
    /// Rows on the current page with their 1-based rank in the filtered view
    pub rows: Vec<(usize, &'a Siswa)>,
    pub empty_rows: usize,
    /// A filter is active and nothing matched
    pub not_found: bool,
    /// Number of records after filtering
    pub total: usize,
    pub page_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::siswa::{Score, Timestamp};

    fn siswa(id: &str, nama: &str, kelas: &str) -> Siswa {
        Siswa {
            id: id.to_string(),
            nama: nama.to_string(),
            kelas: kelas.to_string(),
            sekolah: "SDN 1".to_string(),
            skor_bangun_datar: Score::new(50).ok(),
            skor_luas_keliling: None,
            created_at: Timestamp::default(),
        }
    }

    fn numbered(count: usize) -> Vec<Siswa> {
        (0..count)
            .map(|i| siswa(&i.to_string(), &format!("Siswa {:02}", i), "5A"))
            .collect()
    }

    fn ids(records: &[&Siswa]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let records = vec![
            siswa("1", "Budi Santoso", "5A"),
            siswa("2", "Siti", "5B"),
            siswa("3", "ABUDIMAN", "6A"),
        ];

        let result = apply_filter(&records, get_comparator(Order::Asc, SortKey::Nama), "budi");
        assert_eq!(ids(&result), vec!["3", "1"]);
    }

    #[test]
    fn test_filter_never_grows_and_every_match_contains_filter() {
        let records = vec![
            siswa("1", "Andi", "5A"),
            siswa("2", "andika", "5B"),
            siswa("3", "Rina", "6A"),
            siswa("4", "Dina", "6A"),
        ];

        for filter in ["", "a", "AND", "in", "zzz", "Dina"] {
            let result = apply_filter(&records, get_comparator(Order::Desc, SortKey::Kelas), filter);
            assert!(result.len() <= records.len());
            for record in &result {
                assert!(record.nama.to_lowercase().contains(&filter.to_lowercase()));
            }
        }
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let records = vec![
            siswa("1", "Ana", "5B"),
            siswa("2", "Bayu", "5A"),
            siswa("3", "Cici", "5B"),
            siswa("4", "Dedi", "5A"),
            siswa("5", "Eka", "5B"),
        ];

        let asc = apply_filter(&records, get_comparator(Order::Asc, SortKey::Kelas), "");
        assert_eq!(ids(&asc), vec!["2", "4", "1", "3", "5"]);

        let desc = apply_filter(&records, get_comparator(Order::Desc, SortKey::Kelas), "");
        assert_eq!(ids(&desc), vec!["1", "3", "5", "2", "4"]);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let records = numbered(7);
        let result = apply_filter(&records, get_comparator(Order::Asc, SortKey::Nama), "");
        assert_eq!(result.len(), 7);
    }

    #[test]
    fn test_pagination_slice() {
        let records = numbered(12);
        let mut table = TableState::new(5);

        let view = table.view(&records);
        let visible: Vec<&str> = view.rows.iter().map(|(_, r)| r.id.as_str()).collect();
        assert_eq!(visible, vec!["0", "1", "2", "3", "4"]);
        assert_eq!(view.empty_rows, 0);
        assert_eq!(view.page_count, 3);

        table.set_page(2);
        let view = table.view(&records);
        let visible: Vec<&str> = view.rows.iter().map(|(_, r)| r.id.as_str()).collect();
        assert_eq!(visible, vec!["10", "11"]);
        assert_eq!(view.rows[0].0, 11);
        assert_eq!(view.empty_rows, 3);
    }

    #[test]
    fn test_page_past_the_end_is_empty_without_padding() {
        let records = numbered(3);
        let mut table = TableState::new(5);
        table.set_page(4);

        let view = table.view(&records);
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_rows, 0);
    }

    #[test]
    fn test_empty_rows_only_on_short_page() {
        assert_eq!(empty_rows(10, 10), 0);
        assert_eq!(empty_rows(3, 10), 7);
        assert_eq!(empty_rows(0, 10), 0);
    }

    #[test]
    fn test_not_found_only_with_active_filter() {
        let records = numbered(3);
        let mut table = TableState::default();

        assert!(!table.view(&[]).not_found);

        table.set_filter_name("nobody");
        assert!(table.view(&records).not_found);

        table.set_filter_name("siswa 01");
        let view = table.view(&records);
        assert!(!view.not_found);
        assert_eq!(view.total, 1);
    }

    #[test]
    fn test_filter_and_rows_per_page_reset_page() {
        let mut table = TableState::default();
        table.set_page(3);
        table.set_filter_name("a");
        assert_eq!(table.page(), 0);

        table.set_page(2);
        table.set_rows_per_page(25);
        assert_eq!(table.page(), 0);
        assert_eq!(table.rows_per_page(), 25);
    }

    #[test]
    fn test_unknown_rows_per_page_is_ignored() {
        let mut table = TableState::default();
        table.set_page(2);
        table.set_rows_per_page(7);
        assert_eq!(table.rows_per_page(), 10);
        assert_eq!(table.page(), 2);
        assert_eq!(TableState::new(7).rows_per_page(), 10);
    }

    #[test]
    fn test_sort_toggles_direction() {
        let mut table = TableState::default();
        assert_eq!(table.order_by(), SortKey::Nama);
        assert_eq!(table.order(), Order::Asc);

        table.sort(SortKey::Nama);
        assert_eq!(table.order(), Order::Desc);

        table.sort(SortKey::Nama);
        assert_eq!(table.order(), Order::Asc);

        table.sort(SortKey::Nama);
        table.sort(SortKey::Kelas);
        assert_eq!(table.order_by(), SortKey::Kelas);
        assert_eq!(table.order(), Order::Asc);
    }

    #[test]
    fn test_set_sort_is_idempotent() {
        let mut table = TableState::default();
        assert_eq!(table.sort_target(SortKey::Kelas), Order::Asc);

        table.set_sort(SortKey::Kelas, Order::Desc);
        table.set_sort(SortKey::Kelas, Order::Desc);
        assert_eq!(table.order_by(), SortKey::Kelas);
        assert_eq!(table.order(), Order::Desc);
        assert_eq!(table.sort_target(SortKey::Kelas), Order::Asc);

        table.set_sort(SortKey::Kelas, Order::Asc);
        assert_eq!(table.sort_target(SortKey::Kelas), Order::Desc);
        assert_eq!(table.sort_target(SortKey::Nama), Order::Asc);
    }

    #[test]
    fn test_huge_page_renders_empty_slice() {
        let records = numbered(3);
        let mut table = TableState::new(25);
        table.set_page(usize::MAX);

        let view = table.view(&records);
        assert!(view.rows.is_empty());
        assert_eq!(view.total, 3);
    }
}
