//! Catalog browsing: listing, search, categories and book details.

use anyhow::{Context as _, Result};
use bookstore_data::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use bookstore_models::api::{PaginationParams, SearchParams};
use bookstore_models::ids::{BookId, CategoryId};
use bookstore_models::search::BookFilter;

use super::{CategoryArgs, ListArgs, RelatedArgs, SearchArgs, ShowArgs};
use crate::context::Context;

/// Build listing parameters from the command line.
///
/// Pagination is only sent when a page, limit or sort was given.
pub fn list_params(args: &ListArgs) -> Option<SearchParams> {
    let mut params = SearchParams::new();
    let mut empty = true;

    if let Some(search) = &args.search {
        params = params.with_query(search.clone());
        empty = false;
    }

    if args.page.is_some()
        || args.limit.is_some()
        || args.sort_by.is_some()
        || args.sort_order.is_some()
    {
        let mut pagination = PaginationParams::new(
            args.page.unwrap_or(DEFAULT_PAGE),
            args.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        );
        pagination.sort_by = args.sort_by.clone();
        pagination.sort_order = args.sort_order;
        params = params.with_pagination(pagination);
        empty = false;
    }

    for (key, value) in &args.filters {
        params = params.with_filter(key.clone(), value.clone());
        empty = false;
    }

    (!empty).then_some(params)
}

/// Build a search filter from the command line.
pub fn search_filter(args: &SearchArgs) -> BookFilter {
    let mut filter = BookFilter::new();
    if let Some(category) = &args.category {
        filter = filter.with_category(category.clone());
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        filter = filter.with_price_range(args.min_price, args.max_price);
    }
    if let Some(author) = &args.author {
        filter = filter.with_author(author.clone());
    }
    if let Some(rating) = args.rating {
        filter = filter.with_min_rating(rating);
    }
    if let Some(in_stock) = args.in_stock {
        filter = filter.with_in_stock(in_stock);
    }
    if let Some(term) = &args.term {
        filter = filter.with_search_term(term.clone());
    }
    filter
}

/// Run the list command.
///
/// The page goes through the books store; what is printed is the store's
/// current contents.
pub async fn list(args: ListArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let params = list_params(&args);

    let spinner = ctx.output.spinner("Loading books...");
    let page = service.load_books(params.as_ref()).await;
    spinner.finish_and_clear();
    let page = page.context("Failed to load books")?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Books");
    service.books().with_current(|books| ctx.output.books(books));
    ctx.output.page_footer(&page.pagination);
    Ok(())
}

/// Run the search command.
pub async fn search(args: SearchArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let filter = search_filter(&args);

    let spinner = ctx.output.spinner("Searching...");
    let result = service
        .search(&filter, args.sort.as_ref(), args.page, args.limit)
        .await;
    spinner.finish_and_clear();
    let result = result.context("Search failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    ctx.output.header(&format!("{} result(s)", result.total_count));
    ctx.output.books(&result.books);
    ctx.output.kv(
        "page",
        &format!("{}/{}", result.current_page, result.total_pages),
    );
    if result.has_next_page {
        ctx.output.debug("more results on the next page");
    }
    Ok(())
}

/// Run the category command.
pub async fn category(args: CategoryArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let id = CategoryId::new(args.id);

    let spinner = ctx.output.spinner("Loading category...");
    let page = service.get_books_by_category(&id, args.page, args.limit).await;
    spinner.finish_and_clear();
    let page = page.with_context(|| format!("Failed to load category {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&format!("Category {}", id));
    ctx.output.books(&page.data);
    ctx.output.page_footer(&page.pagination);
    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;

    let spinner = ctx.output.spinner("Loading categories...");
    let result = service.get_categories().await;
    spinner.finish_and_clear();
    result.context("Failed to load categories")?;

    let categories = service.categories().current();
    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    ctx.output.categories(&categories);
    Ok(())
}

/// Run the show command.
pub async fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let id = BookId::new(args.id);

    let spinner = ctx.output.spinner("Loading book...");
    let book = service.get_by_id(&id).await;
    spinner.finish_and_clear();
    let book = book.with_context(|| format!("Failed to load book {}", id))?;

    if !args.related {
        if ctx.output.is_json() {
            ctx.output.json(&book);
        } else {
            ctx.output.book_detail(&book);
        }
        return Ok(());
    }

    let related = service
        .get_related_books(&id, None)
        .await
        .with_context(|| format!("Failed to load books related to {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "book": book, "related": related }));
        return Ok(());
    }

    ctx.output.book_detail(&book);
    ctx.output.header("Related books");
    ctx.output.books(&related);
    Ok(())
}

/// Run the related command.
pub async fn related(args: RelatedArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let id = BookId::new(args.id);

    let spinner = ctx.output.spinner("Loading related books...");
    let books = service.get_related_books(&id, args.limit).await;
    spinner.finish_and_clear();
    let books = books.with_context(|| format!("Failed to load books related to {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&books);
        return Ok(());
    }

    ctx.output.header(&format!("Related to {}", id));
    ctx.output.books(&books);
    Ok(())
}
