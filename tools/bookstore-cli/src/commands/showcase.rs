//! Home page showcases: featured, bestsellers, recently added.

use anyhow::{Context as _, Result};
use bookstore_data::{BookService, FetchError};
use bookstore_models::catalog::{Book, BookCategory};
use serde::Serialize;
use tracing::error;

use super::{FeaturedArgs, ShowcaseArgs};
use crate::context::Context;

/// What the home page shows.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub featured: Vec<Book>,
    pub categories: Vec<BookCategory>,
}

/// Fetch featured books and, optionally, categories concurrently.
///
/// A failed category fetch is logged and leaves the list empty; a failed
/// featured fetch fails the page.
pub async fn load_home(
    service: &BookService,
    limit: u32,
    with_categories: bool,
) -> Result<HomePage, FetchError> {
    let categories = async {
        if with_categories {
            service.get_categories().await.map(Some)
        } else {
            Ok(None)
        }
    };
    let (featured, categories) = tokio::join!(service.get_featured_books(Some(limit)), categories);

    let categories = match categories {
        Ok(categories) => categories.unwrap_or_default(),
        Err(err) => {
            error!(error = %err, "failed to load categories");
            service.categories().current()
        }
    };

    Ok(HomePage {
        featured: featured?,
        categories,
    })
}

/// Run the featured command.
pub async fn featured(args: FeaturedArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;

    let spinner = ctx.output.spinner("Loading featured books...");
    let page = load_home(&service, args.limit, !args.no_categories).await;
    spinner.finish_and_clear();
    let page = page.context("Failed to load featured books")?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Featured books");
    ctx.output.books(&page.featured);

    if !page.categories.is_empty() {
        ctx.output.header("Browse by category");
        ctx.output.categories(&page.categories);
    }

    Ok(())
}

/// Run the bestsellers command.
pub async fn bestsellers(args: ShowcaseArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;

    let spinner = ctx.output.spinner("Loading bestsellers...");
    let books = service.get_bestseller_books(args.limit).await;
    spinner.finish_and_clear();
    let books = books.context("Failed to load bestsellers")?;

    show(ctx, "Bestsellers", &books);
    Ok(())
}

/// Run the recent command.
pub async fn recent(args: ShowcaseArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;

    let spinner = ctx.output.spinner("Loading recently added books...");
    let books = service.get_recently_added_books(args.limit).await;
    spinner.finish_and_clear();
    let books = books.context("Failed to load recently added books")?;

    show(ctx, "Recently added", &books);
    Ok(())
}

fn show(ctx: &Context, title: &str, books: &[Book]) {
    if ctx.output.is_json() {
        ctx.output.json(&books);
        return;
    }
    ctx.output.header(title);
    ctx.output.books(books);
}
