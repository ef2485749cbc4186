//! Terminal UI utilities.
//!
//! ## Example
//!
//! ```rust
//! use libprobe::ui::Table;
//!
//! let mut table = Table::new(&["Uselib", "Outcome"]);
//! table.add_row(vec!["jsonformoderncpp".to_string(), "found".to_string()]);
//! table.print();
//! ```

use colored::*;
use console::measure_text_width;

/// Box-drawn table with a bold header row
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

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

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }
        let widths = self.widths();

        let sep = |left: &str, mid: &str, right: &str| -> String {
            let cells: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}\n", left, cells.join(mid), right)
        };
        let line = |cells: Vec<String>| -> String {
            let mut s = String::from("  │");
            for (cell, width) in cells.iter().zip(&widths) {
                let padding = width.saturating_sub(measure_text_width(cell));
                s.push_str(&format!(" {}{} │", cell, " ".repeat(padding)));
            }
            s.push('\n');
            s
        };

        let mut out = sep("┌", "┬", "┐");
        out.push_str(&line(
            self.headers.iter().map(|h| h.bold().to_string()).collect(),
        ));
        out.push_str(&sep("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row.clone()));
        }
        out.push_str(&sep("└", "┴", "┘"));
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_align() {
        colored::control::set_override(false);
        let mut table = Table::new(&["Uselib", "Outcome"]);
        table.add_row(vec!["jsonformoderncpp".to_string(), "found".to_string()]);
        table.add_row(vec!["short".to_string()]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        let width = measure_text_width(lines[0]);
        assert!(lines.iter().all(|l| measure_text_width(l) == width));
        assert!(lines[3].contains("jsonformoderncpp"));
    }
}
