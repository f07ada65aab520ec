//! Output formatting for the CLI.

use bookstore_models::catalog::{Book, BookCategory};
use bookstore_models::search::PaginationMeta;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print books as a table.
    pub fn books(&self, books: &[Book]) {
        if self.json {
            return;
        }
        if books.is_empty() {
            self.info("No books found");
            return;
        }

        let widths = [6, 36, 24, 9, 6, 10];
        self.table_row(&["ID", "TITLE", "AUTHOR", "PRICE", "RATING", "STOCK"], &widths);
        for book in books {
            let price = format_price(book.price);
            let rating = format!("{:.1}", book.rating);
            let title = truncate(&book.title, widths[1]);
            let author = truncate(&book.author, widths[2]);
            self.table_row(
                &[
                    book.id.as_str(),
                    &title,
                    &author,
                    &price,
                    &rating,
                    &stock_label(book),
                ],
                &widths,
            );
        }
    }

    /// Print a single book with all its details.
    pub fn book_detail(&self, book: &Book) {
        if self.json {
            return;
        }
        self.header(&book.title);
        self.kv("id", book.id.as_str());
        self.kv("author", &book.author);
        self.kv("price", &format_price(book.price));
        self.kv(
            "rating",
            &format!("{:.1} ({} reviews)", book.rating, book.review_count),
        );
        self.kv("stock", &stock_label(book));
        if !book.category.name.is_empty() {
            self.kv("category", &book.category.name);
        }
        if !book.isbn.is_empty() {
            self.kv("isbn", &book.isbn);
        }
        if !book.publisher.is_empty() {
            self.kv("publisher", &book.publisher);
        }
        self.kv("published", &book.published_date.format("%Y-%m-%d").to_string());
        if book.page_count > 0 {
            self.kv("pages", &book.page_count.to_string());
        }
        if !book.tags.is_empty() {
            self.kv("tags", &book.tags.join(", "));
        }
        if !book.description.is_empty() {
            println!("\n{}", book.description);
        }
    }

    /// Print categories, children indented under their parent.
    pub fn categories(&self, categories: &[BookCategory]) {
        if self.json {
            return;
        }
        for category in categories.iter().filter(|c| c.is_root()) {
            self.list_item(&format!("{} {}", category.name, style(&category.id).dim()));
            for child in categories.iter().filter(|c| c.is_child_of(category)) {
                println!("      {} {}", child.name, style(&child.id).dim());
            }
        }
        let orphans = categories.iter().filter(|c| {
            !c.is_root() && !categories.iter().any(|parent| c.is_child_of(parent))
        });
        for category in orphans {
            self.list_item(&format!("{} {}", category.name, style(&category.id).dim()));
        }
    }

    /// Print the position of a page within its result set.
    pub fn page_footer(&self, meta: &PaginationMeta) {
        if self.json {
            return;
        }
        println!(
            "\n  {}",
            style(format!(
                "{}-{} of {} (page {}/{})",
                meta.start_item(),
                meta.end_item(),
                meta.total,
                meta.page,
                meta.total_pages
            ))
            .dim()
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format a price in dollars.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Stock label, colored by availability.
pub fn stock_label(book: &Book) -> String {
    if !book.in_stock || book.stock_quantity == 0 {
        style("out").red().to_string()
    } else if book.stock_quantity < 5 {
        style(format!("{} left", book.stock_quantity)).yellow().to_string()
    } else {
        style(book.stock_quantity).green().to_string()
    }
}

/// Shorten `text` to at most `max` characters, marking the cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12.5), "$12.50");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("The Left Hand of Darkness", 8), "The Lef…");
        assert_eq!(truncate("Ça va", 5), "Ça va");
    }

    #[test]
    fn test_stock_label_out_of_stock() {
        console::set_colors_enabled(false);
        let mut book = Book::new("1", "Dune");
        assert_eq!(stock_label(&book), "out");

        book.in_stock = true;
        book.stock_quantity = 3;
        assert_eq!(stock_label(&book), "3 left");

        book.stock_quantity = 40;
        assert_eq!(stock_label(&book), "40");
    }
}
