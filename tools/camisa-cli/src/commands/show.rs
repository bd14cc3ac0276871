//! Product detail command.

use anyhow::{bail, Result};
use camisa_commerce::ids::ProductId;

use super::ShowArgs;
use crate::context::Context;
use crate::output::flag_badges;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let mut catalog = ctx.load_catalog().await?;
    let id = ProductId::new(args.id);

    catalog.select_product(&id);
    let Some(product) = catalog.selected() else {
        bail!("Product not found: {}", id);
    };

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    if let Some(tag) = &product.category_tag {
        ctx.output.kv("category", tag);
    }
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }
    ctx.output.kv("sizes", &product.sizes.join(", "));
    ctx.output.kv("colors", &product.colors.join(", "));
    if !product.subcategories.is_empty() {
        ctx.output.kv("subcategories", &product.subcategories.join(", "));
    }
    if let Some(price) = product.price {
        let mut line = price.display();
        if let (Some(previous), Some(off)) = (product.previous_price, product.discount_percent()) {
            line = format!("{} (antes {}, -{}%)", line, previous.display(), off);
        }
        ctx.output.kv("price", &line);
    }
    let badges = flag_badges(product.on_sale, product.is_new);
    if !badges.is_empty() {
        ctx.output.kv("flags", &badges);
    }
    if let Some(created) = product.created_at {
        ctx.output.kv("added", &created.format("%Y-%m-%d").to_string());
    }
    ctx.output.kv("image", &product.image_url);

    Ok(())
}
