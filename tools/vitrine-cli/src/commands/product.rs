//! Product page: price, stock, variations and best sellers.

use anyhow::Result;
use serde::Serialize;
use vitrine_commerce::catalog::{CartLine, Product, ProductVariations, StockStatus, VariantSelection};
use vitrine_commerce::search::{best_sellers, BEST_SELLERS_LIMIT};
use vitrine_commerce::{CommerceError, Currency, Money};

use super::ProductArgs;
use crate::context::Context;
use crate::output::{stock_badge, swatch};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductReport<'a> {
    product: &'a Product,
    variations: Option<&'a ProductVariations>,
    selection: &'a VariantSelection,
    price: Money,
    installment: Money,
    stock: StockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart_line: Option<CartLine>,
    best_sellers: Vec<&'a Product>,
}

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let products = ctx.load_catalog(args.catalog.as_deref())?;
    let product = products
        .iter()
        .find(|p| p.id.as_str() == args.id)
        .ok_or_else(|| CommerceError::ProductNotFound(args.id.clone()))?;
    let variations = ctx.load_variations(product, args.variations.as_deref())?;
    let variations = variations.as_ref();

    let mut selection = VariantSelection::initial(variations);
    if let Some(color) = &args.color {
        selection.select_color(color.clone());
    }
    if let Some(capacity) = &args.capacity {
        selection.select_capacity(capacity.clone());
    }

    let stock = selection.current_stock(product, variations);
    selection.quantity = args.quantity;
    selection.sync_quantity(stock);

    let price = selection.current_price(product, variations);
    let cart_line = if args.add_to_cart {
        Some(selection.cart_line(product, variations)?)
    } else {
        None
    };

    let report = ProductReport {
        product,
        variations,
        selection: &selection,
        price: Money::from_decimal(price, currency),
        installment: product.installment_price(price, currency),
        stock: StockStatus::from_stock(stock),
        cart_line,
        best_sellers: best_sellers(&products, Some(&product.id), BEST_SELLERS_LIMIT),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    print_report(ctx, &report, currency);
    Ok(())
}

fn print_report(ctx: &Context, report: &ProductReport<'_>, currency: Currency) {
    let product = report.product;

    ctx.output.header(&product.name);
    if let Some(condition) = product.condition_text() {
        ctx.output.subtitle(condition);
    }
    if let Some(description) = product.condition_description.as_deref() {
        ctx.output.subtitle(description);
    }

    println!();
    if product.is_discounted() {
        let original = Money::from_decimal(product.original_price, currency);
        ctx.output.kv("De", &original.display());
    }
    ctx.output.kv("Por", &report.price.display());
    if product.installments > 1 {
        ctx.output.kv(
            "Parcelado",
            &format!("{}x de {} sem juros", product.installments, report.installment),
        );
    }
    ctx.output.kv("Estoque", &stock_badge(report.stock));
    if product.reviews > 0 {
        ctx.output.kv(
            "Avaliação",
            &format!("{:.1} ({} avaliações)", product.rating, product.reviews),
        );
    }

    if let Some(variations) = report.variations {
        print_variations(ctx, variations, report.selection);
    }

    if let Some(line) = &report.cart_line {
        println!();
        ctx.output.success(&line.confirmation());
    }

    if !report.best_sellers.is_empty() {
        ctx.output.header("Mais vendidos");
        for other in &report.best_sellers {
            ctx.output.list_item(&format!(
                "{} {}",
                other.name,
                other.price_money(currency)
            ));
        }
    }
}

fn print_variations(ctx: &Context, variations: &ProductVariations, selection: &VariantSelection) {
    let selected = |current: &Option<String>, value: &str| current.as_deref() == Some(value);

    if !variations.colors.is_empty() {
        println!();
        println!("Cor");
        for color in &variations.colors {
            let available = color.available && selection.is_color_available(Some(variations), &color.name);
            let label = match color.hex.as_deref() {
                Some(hex) => format!("{} {}", swatch(hex), color.name),
                None => color.name.clone(),
            };
            let label = if available { label } else { format!("{} (indisponível)", label) };
            ctx.output.option(selected(&selection.color, &color.name), &label, None);
        }
    }

    if !variations.capacities.is_empty() {
        println!();
        println!("Capacidade");
        for capacity in &variations.capacities {
            let available =
                capacity.available && selection.is_capacity_available(Some(variations), &capacity.value);
            let label = if available {
                capacity.value.clone()
            } else {
                format!("{} (indisponível)", capacity.value)
            };
            ctx.output.option(selected(&selection.capacity, &capacity.value), &label, None);
        }
    }
}
