//! HTML report generation.
//!
//! Reports are published through Jekyll, so every document is wrapped in
//! `{% raw %}` / `{% endraw %}` to keep Liquid away from its braces.

use crate::report::ReportTable;

const STYLE: &str = "body{font-family:sans-serif;background:#fff;color:#303030}\
table{border-collapse:collapse;margin-bottom:2em}\
th{background:#FFD681}\
th,td{border:1px solid #edebf0;padding:4px 10px;text-align:center}";

/// Escape text for use in HTML element content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render one table as an HTML fragment.
pub fn render_table(table: &ReportTable) -> String {
    let mut html = String::new();

    html.push_str(&format!("<h2>{}</h2>\n", escape(&table.title)));
    html.push_str("<table>\n<thead><tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    html
}

/// Render a standalone HTML document, wrapped for Jekyll.
pub fn render_document(title: &str, tables: &[ReportTable]) -> String {
    let mut body = String::new();
    for table in tables {
        body.push_str(&render_table(table));
    }

    format!(
        "{{% raw %}}\n<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n{{% endraw %}}",
        escape(title)
    )
}
