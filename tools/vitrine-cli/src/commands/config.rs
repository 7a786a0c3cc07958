//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_file {
        Some(path) => ctx.output.subtitle(&format!("from {}", path.display())),
        None => ctx.output.subtitle("defaults (no config file found)"),
    }

    let config = &ctx.config;

    ctx.output.info("[catalog]");
    ctx.output.kv("path", &config.catalog.path);
    if let Some(dir) = &config.catalog.variations_dir {
        ctx.output.kv("variations_dir", dir);
    }
    ctx.output.kv("currency", &config.catalog.currency);

    ctx.output.info("[search]");
    ctx.output.kv("brand", &config.search.brand);
    ctx.output.kv("default_sort", &config.search.default_sort);
    ctx.output.kv("limit", &config.search.limit.to_string());

    ctx.output.info("[shipping]");
    ctx.output.kv("fast_days", &config.shipping.fast_days.to_string());
    ctx.output.kv("standard_days", &config.shipping.standard_days.to_string());
    ctx.output.kv("latency_ms", &config.shipping.latency_ms.to_string());
    for range in &config.shipping.fast_ranges {
        ctx.output.list_item(&format!("fast range {:08}..={:08}", range.start, range.end));
    }

    ctx.output.info("[log]");
    ctx.output.kv("filter", &config.log.filter);

    Ok(())
}

async fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("vitrine.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    if let Some(other) = ctx.local_config_file().filter(|p| *p != config_path) {
        ctx.output.warn(&format!("{} also exists and may be picked up first", other.display()));
    }

    fs::write(&config_path, generate_default_config(catalog))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let config = &ctx.config;
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = config.currency() {
        errors.push(format!("catalog.currency: {}", e));
    }

    if let Err(e) = config.extractor() {
        errors.push(format!("search.brand: {:#}", e));
    }

    if !matches!(
        config.search.default_sort.as_str(),
        "relevance" | "price_asc" | "price_desc" | "menor_preco" | "maior_preco"
    ) {
        warnings.push(format!(
            "search.default_sort '{}' is unknown and falls back to relevance",
            config.search.default_sort
        ));
    }

    if config.search.limit == 0 {
        warnings.push("search.limit is 0, no results will be printed".to_string());
    }

    for (i, range) in config.shipping.fast_ranges.iter().enumerate() {
        if range.start > range.end {
            errors.push(format!("shipping.fast_ranges[{}]: start is after end", i));
        }
        if range.end > 99_999_999 {
            errors.push(format!("shipping.fast_ranges[{}]: end has more than 8 digits", i));
        }
    }

    if config.shipping.fast_days > config.shipping.standard_days {
        warnings.push("shipping.fast_days is longer than shipping.standard_days".to_string());
    }

    if !ctx.resolve_path(&config.catalog.path).exists() {
        warnings.push(format!("catalog.path '{}' does not exist", config.catalog.path));
    }

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
