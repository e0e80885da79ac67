use crate::views::notify::Toast;
use std::fmt::Write;

/// Escape text for HTML element content and quoted attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a query parameter value
pub fn encode_query(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f8; color: #1c252e; }
header { background: #fff; padding: 16px 32px; display: flex; justify-content: space-between; align-items: center; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
main { max-width: 1100px; margin: 32px auto; padding: 0 16px; }
.card { background: #fff; border-radius: 16px; padding: 24px; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.toast { padding: 12px 16px; border-radius: 8px; margin-bottom: 12px; color: #fff; }
.toast-success { background: #22c55e; }
.toast-error { background: #ff5630; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 12px; border-bottom: 1px solid #eee; text-align: left; }
td.center, th.center { text-align: center; }
tr.filler td { height: 44px; border-bottom: none; }
.label { background: #d3fcd2; color: #118d57; border-radius: 6px; padding: 2px 8px; font-weight: 600; }
.actions a, .actions button { margin-left: 8px; }
.danger { color: #b71d18; }
label { display: block; margin: 16px 0 4px; font-weight: 600; }
input[type=text], input[type=password], input[type=number] { width: 100%; padding: 10px; box-sizing: border-box; }
.toolbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; }
.pagination { display: flex; justify-content: flex-end; gap: 12px; align-items: center; margin-top: 16px; }
.empty { text-align: center; padding: 48px 0; }
"#;

/// Wrap page content in the dashboard shell, flushing pending toasts on top
pub fn layout(title: &str, toasts: &[Toast], signed_in: bool, body: &str) -> String {
    let mut notices = String::new();
    for toast in toasts {
        let _ = write!(
            notices,
            r#"<div class="toast toast-{}" role="alert">{}</div>"#,
            toast.level.as_str(),
            escape(&toast.message)
        );
    }

    let nav = if signed_in {
        r#"<nav><a href="/">Siswa</a> <a href="https://scratch-bangun-datar.vercel.app/">Scratch Game</a>
<form method="post" action="/sign-out" style="display:inline"><button type="submit">Sign out</button></form></nav>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<header><strong>Dashboard Siswa</strong>{nav}</header>
<main>
{notices}
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}
