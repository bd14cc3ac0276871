//! Cart building and checkout link command.

use anyhow::{Context as _, Result};
use camisa_commerce::cart::Cart;
use camisa_commerce::ids::ProductId;
use camisa_commerce::CommerceError;
use serde::Serialize;
use thiserror::Error;

use super::CartArgs;
use crate::context::Context;

/// A parsed `--item` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemSpecError {
    #[error("expected id:size:color[:quantity], got '{0}'")]
    Malformed(String),

    #[error("invalid quantity '{0}'")]
    Quantity(String),
}

impl ItemSpec {
    /// Parse `id:size:color[:quantity]`. Quantity defaults to 1.
    pub fn parse(spec: &str) -> Result<Self, ItemSpecError> {
        let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
        let (id, size, color, quantity) = match parts.as_slice() {
            [id, size, color] => (*id, *size, *color, 1),
            [id, size, color, qty] => {
                let quantity = qty
                    .parse::<u32>()
                    .map_err(|_| ItemSpecError::Quantity(qty.to_string()))?;
                (*id, *size, *color, quantity)
            }
            _ => return Err(ItemSpecError::Malformed(spec.to_string())),
        };

        if id.is_empty() || size.is_empty() || color.is_empty() {
            return Err(ItemSpecError::Malformed(spec.to_string()));
        }

        Ok(Self {
            id: ProductId::new(id),
            size: size.to_string(),
            color: color.to_string(),
            quantity,
        })
    }
}

#[derive(Serialize)]
struct CartReport<'a> {
    cart: &'a Cart,
    total_items: u64,
    summary: Option<String>,
    link: String,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let specs = args
        .items
        .iter()
        .map(|s| ItemSpec::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = ctx.load_catalog().await?;
    let mut cart = Cart::new();
    for spec in &specs {
        let product = catalog
            .find_by_id(&spec.id)
            .ok_or_else(|| CommerceError::ProductNotFound(spec.id.to_string()))?;
        cart.add_item(product, spec.size.as_str(), spec.color.as_str(), spec.quantity)
            .with_context(|| format!("Failed to add {} to the cart", spec.id))?;
    }

    let mut checkout = ctx.config.checkout_link();
    if let Some(phone) = args.phone {
        checkout.phone = phone;
    }
    let summary = checkout.summary(&cart);
    let link = checkout.build(&cart);

    if ctx.output.is_json() {
        ctx.output.json(&CartReport {
            cart: &cart,
            total_items: cart.total_item_count(),
            summary,
            link,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    for (i, item) in cart.items.iter().enumerate() {
        ctx.output.list_item(&format!(
            "{}. {} ({} / {}) x{}",
            i + 1,
            item.product.name,
            item.size,
            item.color,
            item.quantity
        ));
    }
    ctx.output.kv("total items", &cart.total_item_count().to_string());
    if let Some(subtotal) = cart.estimated_subtotal() {
        ctx.output.kv("estimated subtotal", &subtotal.display());
    }

    if let Some(text) = summary {
        ctx.output.header("Order message");
        ctx.output.raw(&text);
    }

    ctx.output.header("WhatsApp link");
    ctx.output.raw(&link);
    Ok(())
}
