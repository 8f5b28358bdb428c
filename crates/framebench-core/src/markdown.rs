//! Markdown report generation.

use crate::report::ReportTable;
use chrono::{DateTime, Utc};

/// Render one table as a Markdown section with a GitHub pipe table.
pub fn render_table(table: &ReportTable) -> String {
    let mut md = String::new();

    md.push_str(&format!("## {}\n\n", table.title));

    if table.is_empty() {
        md.push_str("_No data._\n");
        return md;
    }

    md.push_str(&format!("| {} |\n", join_cells(&table.headers)));
    md.push_str(&format!("|{}|\n", vec!["---"; table.headers.len()].join("|")));
    for row in &table.rows {
        md.push_str(&format!("| {} |\n", join_cells(row)));
    }

    md
}

/// Render a complete report document from one or more tables.
pub fn generate_report(title: &str, tables: &[ReportTable], generated_at: DateTime<Utc>) -> String {
    let mut md = format!("# {title}\n\n");

    for table in tables {
        md.push_str(&render_table(table));
        md.push('\n');
    }

    md.push_str(&format!(
        "_Generated at {}_\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md
}

fn join_cells(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| cell.replace('|', "\\|"))
        .collect::<Vec<_>>()
        .join(" | ")
}
