// Plain-text tables for terminal output
use deliverdesk_core::format::truncate;
use deliverdesk_core::Page;

/// Fixed-width table; cells longer than their column are truncated
pub struct Table {
    headers: Vec<&'static str>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            headers: columns.iter().map(|(h, _)| *h).collect(),
            widths: columns.iter().map(|(_, w)| *w).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn print(&self) {
        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        println!("{}", self.line(&header));
        println!(
            "{}",
            self.widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  ")
        );
        for row in &self.rows {
            println!("{}", self.line(row));
        }
    }

    fn line(&self, cells: &[String]) -> String {
        self.widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", truncate(cell, *width), width = *width)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

pub fn page_footer<T>(page: &Page<T>) {
    if page.total_items == 0 {
        println!("\nNo results.");
        return;
    }
    if page.items.is_empty() {
        println!(
            "\nPage {} is past the end ({} results over {} pages)",
            page.page, page.total_items, page.total_pages
        );
        return;
    }
    println!(
        "\nShowing {}-{} of {} (page {}/{})",
        page.first_row(),
        page.first_row() + page.items.len() - 1,
        page.total_items,
        page.page,
        page.total_pages
    );
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}
