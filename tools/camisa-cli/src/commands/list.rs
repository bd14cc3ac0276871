//! Category listing command.

use anyhow::Result;
use camisa_commerce::catalog::Category;
use camisa_commerce::search::SortMode;

use super::ListArgs;
use crate::context::Context;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let category: Category = args.category.parse()?;
    let mut catalog = ctx.load_catalog().await?;
    args.filters.apply(&mut catalog);

    let products = catalog.filtered(category);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} ({} of {})",
        category.display_name(),
        products.len(),
        catalog.raw(category).len()
    ));
    let sort = catalog.filters().sort;
    if sort != SortMode::None {
        ctx.output.kv("sort", sort.display_name());
    }

    if products.is_empty() {
        if catalog.filters().has_filters() {
            ctx.output.info("No products match the current filters.");
        } else {
            ctx.output.info("No products in this category yet.");
        }
        return Ok(());
    }

    ctx.output.product_table(&products);
    Ok(())
}
