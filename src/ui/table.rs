//! Column-aligned text tables.

use console::measure_text_width;

/// A borderless table; columns are padded to their widest cell.
///
/// Widths ignore ANSI escapes, so cells may be pre-styled.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; missing trailing cells render empty, extra cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
        widths
    }

    /// Render the table, one line per row, header first.
    pub fn render(&self) -> Vec<String> {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_row(&self.headers, &widths));
        for row in &self.rows {
            lines.push(render_row(row, &widths));
        }
        lines
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if i + 1 < widths.len() {
            line.push_str(&" ".repeat(width.saturating_sub(measure_text_width(cell))));
        }
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_columns_to_widest_cell() {
        let mut table = Table::new(&["NAME", "SOURCE"]);
        table.add_row(vec!["Node JS".into(), "builtin".into()]);
        table.add_row(vec!["Go".into(), "directory".into()]);

        let lines = table.render();
        assert_eq!(lines[0], "NAME     SOURCE");
        assert_eq!(lines[1], "Node JS  builtin");
        assert_eq!(lines[2], "Go       directory");
    }

    #[test]
    fn short_rows_render_blank_cells() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.add_row(vec!["x".into()]);
        assert_eq!(table.render()[1], "x");
        assert_eq!(table.row_count(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn styled_cells_do_not_affect_width() {
        let mut table = Table::new(&["AVAILABLE", "NAME"]);
        table.add_row(vec!["\u{1b}[32myes\u{1b}[0m".into(), "PHP".into()]);
        let lines = table.render();
        assert!(lines[1].ends_with("PHP"));
        assert_eq!(measure_text_width(&lines[1]), "AVAILABLE  PHP".len());
    }
}
