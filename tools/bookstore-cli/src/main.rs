//! Bookstore CLI - command line client for the book catalog.
//!
//! Commands:
//! - `bookstore featured` - Home page: featured books and categories
//! - `bookstore bestsellers` / `recent` - Showcase lists
//! - `bookstore list` / `search` / `category` - Browse the catalog
//! - `bookstore categories` - List categories
//! - `bookstore show` / `related` - Book details
//! - `bookstore stock` / `add` / `update` / `delete` - Catalog mutations
//! - `bookstore config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use bookstore_observability::{init_logging, LogLevel};
use clap::{Parser, Subcommand};
use tracing::error;

use commands::{
    AddArgs, CategoryArgs, ConfigArgs, DeleteArgs, FeaturedArgs, ListArgs, RelatedArgs,
    SearchArgs, ShowArgs, ShowcaseArgs, StockArgs, UpdateArgs,
};

/// Bookstore CLI - Browse and manage the book catalog
#[derive(Parser)]
#[command(name = "bookstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog API base URL (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show featured books and categories
    Featured(FeaturedArgs),

    /// Show bestselling books
    Bestsellers(ShowcaseArgs),

    /// Show recently added books
    Recent(ShowcaseArgs),

    /// List books with optional search, sort and filters
    List(ListArgs),

    /// Search books by category, price, author, rating or text
    Search(SearchArgs),

    /// List books in a category
    Category(CategoryArgs),

    /// List all categories
    Categories,

    /// Show a book
    Show(ShowArgs),

    /// Show books related to a book
    Related(RelatedArgs),

    /// Set a book's stock quantity
    Stock(StockArgs),

    /// Add a book from a JSON file
    Add(AddArgs),

    /// Update a book from a JSON file
    Update(UpdateArgs),

    /// Delete a book
    Delete(DeleteArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);
    let mut ctx = context::Context::load(cli.config.as_deref(), output)?;

    if let Some(base_url) = cli.base_url {
        ctx.config.api.base_url = base_url;
    }
    if cli.verbose {
        ctx.config.logging.level = ctx.config.logging.level.min(LogLevel::Debug);
    }
    if let Err(e) = init_logging(&ctx.config.logging) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    let result = match cli.command {
        Commands::Featured(args) => commands::showcase::featured(args, &ctx).await,
        Commands::Bestsellers(args) => commands::showcase::bestsellers(args, &ctx).await,
        Commands::Recent(args) => commands::showcase::recent(args, &ctx).await,
        Commands::List(args) => commands::browse::list(args, &ctx).await,
        Commands::Search(args) => commands::browse::search(args, &ctx).await,
        Commands::Category(args) => commands::browse::category(args, &ctx).await,
        Commands::Categories => commands::browse::categories(&ctx).await,
        Commands::Show(args) => commands::browse::show(args, &ctx).await,
        Commands::Related(args) => commands::browse::related(args, &ctx).await,
        Commands::Stock(args) => commands::admin::stock(args, &ctx).await,
        Commands::Add(args) => commands::admin::add(args, &ctx).await,
        Commands::Update(args) => commands::admin::update(args, &ctx).await,
        Commands::Delete(args) => commands::admin::delete(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        error!(error = %format!("{:#}", e), "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
