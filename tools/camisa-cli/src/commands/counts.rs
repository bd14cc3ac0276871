//! Subcategory counts command.

use anyhow::Result;
use camisa_commerce::catalog::Category;
use serde::Serialize;

use super::CountsArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CountsReport<'a> {
    category: &'a str,
    total: usize,
    matching: usize,
    subcategories: Vec<camisa_commerce::search::SubcategoryCount>,
}

/// Run the counts command.
pub async fn run(args: CountsArgs, ctx: &Context) -> Result<()> {
    let category: Category = args.category.parse()?;
    let mut catalog = ctx.load_catalog().await?;
    args.filters.apply(&mut catalog);

    let view = catalog.view(category);
    let report = CountsReport {
        category: category.slug(),
        total: catalog.raw(category).len(),
        matching: view.products.len(),
        subcategories: view.counts,
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("{} subcategories", category.display_name()));
    if report.subcategories.is_empty() {
        ctx.output.info("No subcategories configured for this category.");
    }
    let active = catalog.filters().active_subcategory.as_deref();
    for count in &report.subcategories {
        let marker = if active == Some(count.name.as_str()) { " *" } else { "" };
        ctx.output
            .kv(&format!("{}{}", count.name, marker), &count.count.to_string());
    }

    ctx.output.blank();
    ctx.output.info(&format!(
        "{} of {} products match the current filters",
        report.matching, report.total
    ));
    Ok(())
}
