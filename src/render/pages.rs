use crate::models::siswa::{Score, Siswa};
use crate::render::html::{encode_query, escape, layout};
use crate::table::comparator::{Order, SortKey};
use crate::table::state::{TableState, TableView, ROWS_PER_PAGE_OPTIONS};
use crate::utils::time::format_date;
use crate::views::edit::{EditForm, SCORE_INPUT_MAX_CHARS};
use crate::views::notify::Toast;
use crate::views::route::Route;
use crate::views::row_menu::RowActionMenu;
use axum::http::StatusCode;
use std::fmt::Write;

pub fn sign_in_page(toasts: &[Toast], username: &str) -> String {
    let body = format!(
        r#"<div class="card" style="max-width:420px;margin:auto">
<h2>Sign in</h2>
<form method="post" action="/sign-in">
<label for="username">Username</label>
<input type="text" id="username" name="username" placeholder="input username" value="{username}">
<label for="password">Password</label>
<input type="password" id="password" name="password" placeholder="input password">
<p><button type="submit">Sign in</button></p>
</form>
</div>"#,
        username = escape(username),
    );

    layout("Sign in", toasts, false, &body)
}

fn score_cell(score: Option<Score>) -> String {
    match score {
        Some(score) => format!(r#"<span class="label">{}</span>"#, score),
        None => r#"<span class="label">-</span>"#.to_string(),
    }
}

fn sort_header(key: SortKey, table: &TableState) -> String {
    let marker = if table.order_by() == key {
        match table.order() {
            Order::Asc => " &#9650;",
            Order::Desc => " &#9660;",
        }
    } else {
        ""
    };

    format!(
        r#"<th><a href="/?order_by={}&amp;order={}">{}</a>{}</th>"#,
        key.as_str(),
        table.sort_target(key).as_str(),
        escape(key.label()),
        marker
    )
}

fn record_row(rank: usize, record: &Siswa) -> String {
    let id = encode_query(&record.id);
    let mut menu = RowActionMenu::new(record);
    let prompt = menu.confirmation_prompt();
    menu.open();
    let edit_link = menu
        .edit()
        .map(|route| format!(r#"<a href="{}">Edit</a>"#, escape(&route.path())))
        .unwrap_or_default();

    format!(
        r#"<tr>
<td class="center">{rank}</td>
<td>{nama}</td>
<td>{kelas}</td>
<td>{sekolah}</td>
<td class="center">{bangun_datar}</td>
<td class="center">{luas_keliling}</td>
<td class="center">{tanggal}</td>
<td class="actions"><details><summary>&#8942;</summary>
{edit_link}
<a class="danger" href="/siswa/{id}/delete" title="{prompt}">Delete</a>
</details></td>
</tr>"#,
        nama = escape(&record.nama),
        kelas = escape(&record.kelas),
        sekolah = escape(&record.sekolah),
        bangun_datar = score_cell(record.skor_bangun_datar),
        luas_keliling = score_cell(record.skor_luas_keliling),
        tanggal = format_date(record.created_at.seconds),
        prompt = escape(&prompt),
    )
}

/// The Siswa table page
pub fn list_page(
    toasts: &[Toast],
    table: &TableState,
    view: &TableView<'_>,
    loaded: bool,
    collection_len: usize,
) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<div class="toolbar"><h2>Data Siswa</h2><a href="/export"><button type="button">Export Excel</button></a></div>
<div class="card">
<form method="get" action="/"><input type="text" name="filter" placeholder="Cari siswa..." value="{}"></form>
<table>
<thead><tr><th class="center">No</th>"#,
        escape(table.filter_name())
    );

    for key in SortKey::ALL {
        body.push_str(&sort_header(key, table));
    }
    body.push_str("<th></th></tr></thead>\n<tbody>\n");

    if !loaded {
        body.push_str(r#"<tr><td colspan="8" class="empty">Memuat data...</td></tr>"#);
    } else {
        for (rank, record) in &view.rows {
            body.push_str(&record_row(*rank, record));
        }

        for _ in 0..view.empty_rows {
            body.push_str(r#"<tr class="filler"><td colspan="8"></td></tr>"#);
        }

        if view.not_found {
            let _ = write!(
                body,
                r#"<tr><td colspan="8" class="empty"><h3>Tidak ditemukan</h3>
<p>Tidak ada hasil untuk <strong>&quot;{}&quot;</strong>. Coba periksa ejaan atau gunakan kata lengkap.</p></td></tr>"#,
                escape(table.filter_name())
            );
        } else if collection_len == 0 {
            body.push_str(r#"<tr><td colspan="8" class="empty"><h3>Data Kosong</h3></td></tr>"#);
        }
    }

    body.push_str("</tbody>\n</table>\n");

    let page = table.page();
    let start = page.saturating_mul(table.rows_per_page());
    let (from, to) = if view.rows.is_empty() {
        (0, 0)
    } else {
        (start + 1, start.saturating_add(view.rows.len()).min(view.total))
    };

    let _ = write!(body, r#"<div class="pagination"><span>Rows per page:"#);
    for option in ROWS_PER_PAGE_OPTIONS {
        if option == table.rows_per_page() {
            let _ = write!(body, " <strong>{}</strong>", option);
        } else {
            let _ = write!(body, r#" <a href="/?rows={0}">{0}</a>"#, option);
        }
    }
    let _ = write!(body, "</span><span>{}–{} of {}</span>", from, to, view.total);

    if page > 0 {
        // From past the end, step back to the last page
        let previous = (page - 1).min(view.page_count.saturating_sub(1));
        let _ = write!(body, r#"<a href="/?page={}">&lsaquo; Prev</a>"#, previous);
    }
    if page.saturating_add(1) < view.page_count {
        let _ = write!(body, r#"<a href="/?page={}">Next &rsaquo;</a>"#, page + 1);
    }
    body.push_str("</div>\n</div>");

    layout("Data Siswa", toasts, true, &body)
}

/// The edit form for one record
pub fn edit_page(toasts: &[Toast], id: &str, form: &EditForm) -> String {
    let body = format!(
        r#"<h2>Edit Data Siswa</h2>
<div class="card">
<form method="post" action="{action}">
<label for="nama">Nama Siswa</label>
<input type="text" id="nama" name="nama" placeholder="Nama Siswa" value="{nama}">
<label for="kelas">Kelas</label>
<input type="text" id="kelas" name="kelas" placeholder="Kelas" value="{kelas}">
<label for="sekolah">Sekolah</label>
<input type="text" id="sekolah" name="sekolah" placeholder="Sekolah" value="{sekolah}">
<label for="skor_bangun_datar">Skor Bangun Datar</label>
<input type="text" inputmode="numeric" maxlength="{max_chars}" id="skor_bangun_datar" name="skor_bangun_datar" placeholder="Skor Bangun Datar" value="{bangun_datar}">
<label for="skor_luas_keliling">Skor Luas Keliling</label>
<input type="text" inputmode="numeric" maxlength="{max_chars}" id="skor_luas_keliling" name="skor_luas_keliling" placeholder="Skor Luas Keliling" value="{luas_keliling}">
<p style="text-align:center"><button type="submit">Submit</button></p>
</form>
</div>"#,
        action = escape(&Route::EditSiswa(id.to_string()).path()),
        nama = escape(&form.nama),
        kelas = escape(&form.kelas),
        sekolah = escape(&form.sekolah),
        bangun_datar = escape(&form.skor_bangun_datar),
        luas_keliling = escape(&form.skor_luas_keliling),
        max_chars = SCORE_INPUT_MAX_CHARS,
    );

    layout("Edit Siswa", toasts, true, &body)
}

/// The delete confirmation dialog
pub fn confirm_delete_page(toasts: &[Toast], menu: &RowActionMenu, id: &str) -> String {
    let body = format!(
        r#"<div class="card" style="max-width:480px;margin:auto">
<h3>Konfirmasi Penghapusan</h3>
<p>{prompt}</p>
<form method="post" action="/siswa/{id}/delete">
<button type="submit" name="decision" value="cancel">Batal</button>
<button type="submit" name="decision" value="confirm" class="danger">Hapus</button>
</form>
</div>"#,
        prompt = escape(&menu.confirmation_prompt()),
        id = encode_query(id),
    );

    layout("Hapus Siswa", toasts, true, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<div class="card empty"><h2>{}</h2><p>{}</p><p><a href="/">Kembali</a></p></div>"#,
        status.as_u16(),
        escape(message)
    );

    layout("Error", &[], false, &body)
}
