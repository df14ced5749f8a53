// src/report/html.rs
// Self-contained HTML page for a snapshot. No external assets.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::config::consts::TIMESTAMP_FORMAT;
use crate::core::sanitize::escape_html;
use crate::store::GuildSnapshot;

const STYLE: &str = "\
body{font-family:sans-serif;margin:2em;background:#1e1f22;color:#ddd}\
table{border-collapse:collapse}\
th,td{padding:4px 10px;border:1px solid #444;text-align:right}\
th:first-child,td:first-child{text-align:left}\
th{background:#2b2d31}\
.primary{background:#3a3f2a}\
tr.average td{font-weight:bold;border-top:2px solid #888}\
.meta{color:#999}";

pub struct PageMeta<'a> {
    pub title: &'a str,
    pub countdown: &'a str,
    pub generated_at: DateTime<Local>,
    /// Browser reload interval; `None` for one-shot runs.
    pub refresh: Option<Duration>,
}

pub fn render(snapshot: &GuildSnapshot, meta: &PageMeta<'_>) -> String {
    let ds = snapshot.to_dataset();
    let title = escape_html(meta.title);
    // +2 for the Name and Timestamp columns.
    let primary_idx = snapshot
        .primary_skill
        .as_deref()
        .and_then(|p| snapshot.columns.iter().position(|c| c == p))
        .map(|i| i + 2);

    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    if let Some(r) = meta.refresh {
        let _ = writeln!(out, "<meta http-equiv=\"refresh\" content=\"{}\">", r.as_secs().max(1));
    }
    let _ = writeln!(out, "<title>{title}</title>");
    out.push_str(&join!("<style>", STYLE, "</style>\n</head>\n<body>\n"));
    let _ = writeln!(out, "<h1>{title}</h1>");
    let _ = writeln!(
        out,
        "<p class=\"meta\">Generated {} &middot; {}</p>",
        meta.generated_at.format(TIMESTAMP_FORMAT),
        escape_html(meta.countdown),
    );

    out.push_str("<table>\n<thead><tr>");
    for (i, h) in ds.headers.iter().flatten().enumerate() {
        out.push_str(&cell("th", h, Some(i) == primary_idx));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    let last = ds.rows.len().saturating_sub(1);
    for (r, row) in ds.rows.iter().enumerate() {
        out.push_str(if r == last { "<tr class=\"average\">" } else { "<tr>" });
        for (i, v) in row.iter().enumerate() {
            out.push_str(&cell("td", v, Some(i) == primary_idx));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}

fn cell(tag: &str, text: &str, primary: bool) -> String {
    let class = if primary { " class=\"primary\"" } else { "" };
    format!("<{tag}{class}>{}</{tag}>", escape_html(text))
}
