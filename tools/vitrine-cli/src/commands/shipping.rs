//! Delivery estimate for a postal code.

use std::time::Duration;

use anyhow::{Context as _, Result};

use super::ShippingArgs;
use crate::context::Context;

/// Run the shipping command.
pub async fn run(args: ShippingArgs, ctx: &Context) -> Result<()> {
    let estimator = ctx.config.estimator()?;
    let today = args.from.unwrap_or_else(|| chrono::Local::now().date_naive());

    let spinner = ctx.output.spinner("Calculando frete...");
    tokio::time::sleep(Duration::from_millis(ctx.config.shipping.latency_ms)).await;
    let quote = estimator.estimate(&args.cep, today);
    spinner.finish_and_clear();

    let quote = quote.context("Digite um CEP válido")?;

    if ctx.output.is_json() {
        ctx.output.json(&quote);
        return Ok(());
    }

    ctx.output.success(&quote.price_label());
    ctx.output.kv("CEP", &quote.formatted_cep());
    ctx.output.kv("Entrega estimada", &quote.date_label());
    ctx.output.kv("Prazo", &format!("({})", quote.days_label()));

    Ok(())
}
