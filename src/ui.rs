//! Terminal output helpers.
//!
//! [`Table`] draws a box-bordered table that shrinks its widest columns to
//! fit the terminal; [`target_table`] builds the summary printed after a
//! build file has been generated.

use crate::target::Target;
use colored::*;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Columns are never shrunk below this many characters.
const MIN_COLUMN_WIDTH: usize = 8;

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        for line in self.render(term_width as usize) {
            println!("{line}");
        }
    }

    /// Lay the table out for a terminal `max_width` columns wide.
    pub fn render(&self, max_width: usize) -> Vec<String> {
        if self.headers.is_empty() {
            return Vec::new();
        }

        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| console::measure_text_width(h))
            .collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(console::measure_text_width(&flatten(cell)));
            }
        }
        fit_widths(&mut widths, max_width.saturating_sub(3 + 3 * self.headers.len()));

        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {left}{}{right}", segments.join(mid))
        };

        let mut lines = vec![border("┌", "┬", "┐")];
        let header_cells: Vec<String> = self.headers.iter().map(|h| h.bold().to_string()).collect();
        lines.push(render_row(&header_cells, &widths));
        lines.push(border("├", "┼", "┤"));
        for row in &self.rows {
            lines.push(render_row(row, &widths));
        }
        lines.push(border("└", "┴", "┘"));
        lines
    }
}

/// Shrink the widest column one step at a time until the total fits.
fn fit_widths(widths: &mut [usize], available: usize) {
    let mut total: usize = widths.iter().sum();
    while total > available {
        let Some(widest) = widths
            .iter_mut()
            .filter(|w| **w > MIN_COLUMN_WIDTH)
            .max_by_key(|w| **w)
        else {
            break;
        };
        *widest -= 1;
        total -= 1;
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("  │");
    for (cell, &width) in cells.iter().zip(widths) {
        let text = console::truncate_str(&flatten(cell), width, "...").to_string();
        let padding = width.saturating_sub(console::measure_text_width(&text));
        line.push_str(&format!(" {}{} │", text, " ".repeat(padding)));
    }
    line
}

fn flatten(s: &str) -> String {
    s.replace(['\n', '\r', '\t'], " ")
}

/// Summary of generated targets: name, kind, source count and artifact.
pub fn target_table(targets: &[Target]) -> Table {
    let mut table = Table::new(&["Target", "Type", "Sources", "Artifact"]);
    for target in targets {
        table.add_row(vec![
            target.name.bold().green().to_string(),
            target.kind.tag().to_string(),
            target.sources.len().to_string(),
            target.artifact_file.cyan().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_table() {
        colored::control::set_override(false);
        let mut table = Table::new(&["Name", "Value"]);
        table.add_row(vec!["app".into(), "app.exe".into()]);
        table.add_row(vec!["too".into(), "many".into(), "cells".into()]);

        let lines = table.render(80);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  ┌──────┬─────────┐");
        assert_eq!(lines[3], "  │ app  │ app.exe │");
        assert_eq!(lines[4], "  └──────┴─────────┘");
    }

    #[test]
    fn test_render_shrinks_wide_columns() {
        let mut table = Table::new(&["Name", "Path"]);
        table.add_row(vec!["x".into(), "a".repeat(60)]);

        let lines = table.render(40);
        assert!(lines.iter().all(|l| console::measure_text_width(l) <= 40));
        assert!(lines[3].contains("..."));
    }

    #[test]
    fn test_fit_widths_respects_minimum() {
        let mut widths = vec![10, 12];
        fit_widths(&mut widths, 0);
        assert_eq!(widths, vec![MIN_COLUMN_WIDTH, MIN_COLUMN_WIDTH]);
    }
}
