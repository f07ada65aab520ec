//! CLI command implementations.

pub mod admin;
pub mod browse;
pub mod config;
pub mod showcase;

use anyhow::{bail, Result};
use bookstore_models::api::FilterValue;
use bookstore_models::search::{BookSortOption, SortDirection};
use clap::{Args, Subcommand};

/// Arguments for the showcase commands (featured, bestsellers, recent).
#[derive(Args)]
pub struct ShowcaseArgs {
    /// Number of books to show.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the featured (home page) command.
#[derive(Args)]
pub struct FeaturedArgs {
    /// Number of featured books to show.
    #[arg(short, long, default_value = "8")]
    pub limit: u32,

    /// Skip the category list.
    #[arg(long)]
    pub no_categories: bool,
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Free-text search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page number (1-indexed).
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Page size.
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Field to sort by.
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc or desc).
    #[arg(long)]
    pub sort_order: Option<SortDirection>,

    /// Extra filter passed through as a query parameter (key=value).
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, FilterValue)>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Category name.
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Author name.
    #[arg(short, long)]
    pub author: Option<String>,

    /// Minimum rating.
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Stock availability (true or false).
    #[arg(long, value_name = "true|false")]
    pub in_stock: Option<bool>,

    /// Free-text search term.
    #[arg(short, long)]
    pub term: Option<String>,

    /// Sort as field[:asc|desc], e.g. price:desc.
    #[arg(short, long)]
    pub sort: Option<BookSortOption>,

    /// Page number (1-indexed).
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Page size.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the category command.
#[derive(Args)]
pub struct CategoryArgs {
    /// Category ID.
    pub id: String,

    /// Page number (1-indexed).
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Page size.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Book ID.
    pub id: String,

    /// Also list related books.
    #[arg(short, long)]
    pub related: bool,
}

/// Arguments for the related command.
#[derive(Args)]
pub struct RelatedArgs {
    /// Book ID.
    pub id: String,

    /// Number of related books.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the stock command.
#[derive(Args)]
pub struct StockArgs {
    /// Book ID.
    pub id: String,

    /// New stock quantity.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// JSON file with the book fields.
    #[arg(short, long)]
    pub file: String,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Book ID.
    pub id: String,

    /// JSON file with the fields to change.
    #[arg(short, long)]
    pub file: String,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Book ID.
    pub id: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse a `key=value` filter argument.
///
/// The value is sent exactly as typed, so `isbn=0451524934` keeps its leading
/// zero. Only surrounding whitespace is trimmed.
pub fn parse_filter(arg: &str) -> Result<(String, FilterValue)> {
    let Some((key, value)) = arg.split_once('=') else {
        bail!("filter `{}` must be key=value", arg);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("filter `{}` has an empty key", arg);
    }

    Ok((key.to_string(), FilterValue::Text(value.trim().to_string())))
}
