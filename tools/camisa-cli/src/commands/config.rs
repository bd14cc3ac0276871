//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.section("catalog");
    ctx.output.kv("data_file", &ctx.config.catalog.data_file);
    if let Some(ref url) = ctx.config.catalog.base_url {
        ctx.output.kv("base_url", url);
    }

    ctx.output.section("checkout");
    ctx.output.kv("phone", &ctx.config.checkout.phone);
    ctx.output.kv("header", &ctx.config.checkout.header);
    ctx.output.kv("closing", &ctx.config.checkout.closing);

    ctx.output.section("fetch");
    ctx.output.kv("max_retries", &ctx.config.fetch.max_retries.to_string());
    ctx.output.kv("backoff_ms", &ctx.config.fetch.backoff_ms.to_string());

    if !ctx.config.taxonomy.is_empty() {
        ctx.output.section("taxonomy");
        for (slug, names) in &ctx.config.taxonomy {
            ctx.output.kv(slug, &names.join(", "));
        }
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("camisa.toml");

    if config_path.exists() && !force {
        if ctx.output.is_json() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
        let overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.warn("Config init cancelled");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    let data_file = ctx.resolve_path(&ctx.config.catalog.data_file);
    let mut warnings = warnings;
    if !data_file.exists() {
        warnings.push(format!("catalog.data_file not found: {}", data_file.display()));
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Static checks on a config. Returns `(errors, warnings)`.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let phone = &config.checkout.phone;
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        errors.push("checkout.phone must be digits only, with country code".to_string());
    }

    if config.checkout.header.trim().is_empty() {
        warnings.push("checkout.header is empty".to_string());
    }

    if config.fetch.max_retries > 10 {
        warnings.push(format!(
            "fetch.max_retries = {} will stall the CLI on a dead backend",
            config.fetch.max_retries
        ));
    }

    let (_, unknown) = config.taxonomy();
    for slug in unknown {
        errors.push(format!("taxonomy.{} does not name a category", slug));
    }
    for (slug, names) in &config.taxonomy {
        if names.is_empty() {
            warnings.push(format!("taxonomy.{} has no subcategories", slug));
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        let (errors, warnings) = check_config(&CliConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_bad_phone_and_taxonomy() {
        let mut config = CliConfig::default();
        config.checkout.phone = "+52 33 5555".to_string();
        config.taxonomy.insert("zapatos".to_string(), vec!["Tenis".to_string()]);
        config.taxonomy.insert("bordadas".to_string(), Vec::new());

        let (errors, warnings) = check_config(&config);
        assert_eq!(errors.len(), 2);
        assert_eq!(warnings.len(), 1);
    }
}
