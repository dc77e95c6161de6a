//! Plain-text rendering of a [`MemoryView`], used by `--print`.

use std::fmt::Write;

use crate::core::{PLACEHOLDER, RowKey, TableContainer};
use crate::render::memory::MemoryView;
use crate::services::view::TableBody;

const BAR_WIDTH: u64 = 30;

pub fn render(view: &MemoryView) -> String {
    let mut out = String::new();

    match &view.overview {
        Some(o) => {
            let _ = writeln!(out, "Report: {}  ({})", or_placeholder(&o.name), or_placeholder(&o.source_file));
            let _ = writeln!(
                out,
                "Generated: {}   Rows: {}   Columns: {}",
                o.generated_at, o.row_count, o.column_count
            );
        }
        None => out.push_str("Report: (not loaded)\n"),
    }

    out.push_str("\nColumns\n");
    match view.table(TableContainer::Columns) {
        Some(body) => {
            let active = view.active_row(TableContainer::Columns);
            write_table(&mut out, body, |key| Some(key) == active);
        }
        None => out.push_str("  (none)\n"),
    }

    if let Some(panel) = &view.detail {
        let _ = writeln!(
            out,
            "\nColumn {}: {} ({})",
            panel.position,
            or_placeholder(&panel.name),
            or_placeholder(&panel.data_type)
        );
        let entries = panel.entries();
        let width = entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        for (label, text) in entries.iter().skip(3) {
            let _ = writeln!(out, "  {label:<width$}  {text}");
        }
        for issue in &panel.issues {
            let _ = writeln!(out, "  ! {issue}");
        }
    }

    if let Some((series, _)) = view.chart() {
        out.push_str("\nDistribution\n");
        let max = series.values.iter().copied().max().unwrap_or(0).max(1);
        let width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        for (label, value) in series.labels.iter().zip(&series.values) {
            let bar = "█".repeat(((value * BAR_WIDTH).div_ceil(max)) as usize);
            let _ = writeln!(out, "  {label:<width$}  {bar} {value}");
        }
    }

    if let Some(body) = view.table(TableContainer::Frequencies) {
        out.push_str("\nFrequencies\n");
        write_table(&mut out, body, |_| false);
    }

    for error in &view.errors {
        let _ = writeln!(out, "\nerror: {error}");
    }

    out
}

fn or_placeholder(s: &str) -> &str {
    if s.is_empty() { PLACEHOLDER } else { s }
}

fn write_table(out: &mut String, body: &TableBody, is_active: impl Fn(RowKey) -> bool) {
    let cells: Vec<Vec<String>> = body
        .rows
        .iter()
        .map(|row| row.cells.iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = body.headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |marker: &str, values: &[String]| {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{v:<w$}", w = *w))
            .collect();
        format!("{marker} {}", padded.join("  ").trim_end())
    };

    let headers: Vec<String> = body.headers.iter().map(|h| h.to_string()).collect();
    let _ = writeln!(out, "{}", line(" ", &headers));
    for (row, values) in body.rows.iter().zip(&cells) {
        let marker = if is_active(row.key) { ">" } else { " " };
        let _ = writeln!(out, "{}", line(marker, values));
    }
}
