//! Catalog mutations: stock, add, update, delete.

use std::fs;

use anyhow::{bail, Context as _, Result};
use bookstore_models::catalog::{Book, BookPatch};
use bookstore_models::ids::BookId;
use dialoguer::Confirm;

use super::{AddArgs, DeleteArgs, StockArgs, UpdateArgs};
use crate::context::Context;

/// Read a partial book from a JSON file.
pub fn read_patch(ctx: &Context, path: &str) -> Result<BookPatch> {
    let path = ctx.resolve_path(path);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_patch(&content).with_context(|| format!("Invalid book JSON in {}", path.display()))
}

/// Parse a partial book, rejecting one with no fields set.
pub fn parse_patch(content: &str) -> Result<BookPatch> {
    let patch: BookPatch = serde_json::from_str(content)?;
    if patch.is_empty() {
        bail!("no book fields given");
    }
    Ok(patch)
}

/// Run the stock command.
pub async fn stock(args: StockArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let id = BookId::new(args.id);

    if args.quantity < 0 {
        ctx.output.warn(&format!("Sending negative quantity {}", args.quantity));
    }

    let spinner = ctx.output.spinner("Updating stock...");
    let book = service.update_book_stock(&id, args.quantity).await;
    spinner.finish_and_clear();
    let book = book.with_context(|| format!("Failed to update stock for {}", id))?;

    report(ctx, &format!("Stock for {} set to {}", id, book.stock_quantity), &book);
    Ok(())
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let patch = read_patch(ctx, &args.file)?;

    let spinner = ctx.output.spinner("Adding book...");
    let book = service.add_book(&patch).await;
    spinner.finish_and_clear();
    let book = book.context("Failed to add book")?;

    report(ctx, &format!("Added {} ({})", book.title, book.id), &book);
    Ok(())
}

/// Run the update command.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let id = BookId::new(args.id);
    let patch = read_patch(ctx, &args.file)?;

    let spinner = ctx.output.spinner("Updating book...");
    let book = service.update_book(&id, &patch).await;
    spinner.finish_and_clear();
    let book = book.with_context(|| format!("Failed to update book {}", id))?;

    report(ctx, &format!("Updated {}", book.id), &book);
    Ok(())
}

/// Run the delete command.
pub async fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let id = BookId::new(args.id);

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete book {}?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Delete cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Deleting book...");
    let result = service.delete_book(&id).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to delete book {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
    } else {
        ctx.output.success(&format!("Deleted {}", id));
    }
    Ok(())
}

fn report(ctx: &Context, message: &str, book: &Book) {
    if ctx.output.is_json() {
        ctx.output.json(book);
        return;
    }
    ctx.output.success(message);
    ctx.output.book_detail(book);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_patch() {
        let patch = parse_patch(r#"{ "title": "Dune", "price": 9.99, "stockQuantity": 4 }"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Dune"));
        assert_eq!(patch.price, Some(9.99));
        assert_eq!(patch.stock_quantity, Some(4));
    }

    #[test]
    fn test_parse_patch_rejects_empty_object() {
        let err = parse_patch("{}").unwrap_err();
        assert!(err.to_string().contains("no book fields"));
    }

    #[test]
    fn test_parse_patch_rejects_invalid_json() {
        assert!(parse_patch("{ title: Dune }").is_err());
    }
}
