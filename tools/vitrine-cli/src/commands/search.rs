//! Catalog search with facet filters.

use anyhow::Result;
use console::style;
use vitrine_commerce::search::{SearchEngine, SearchParams, SearchStatus, SortOption};

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let products = ctx.load_catalog(args.catalog.as_deref())?;

    let mut engine = SearchEngine::with_extractor(ctx.config.extractor()?);
    engine.set_products(Some(products));
    engine.set_params(build_params(&args, ctx.config.default_sort()));

    for value in args.selected_values() {
        engine.toggle(value);
    }

    let limit = args.limit.unwrap_or(ctx.config.search.limit);
    let mut page = engine.page();
    let total = page.total();
    page.items.truncate(limit);

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&page.label);
    ctx.output.subtitle(&format!(
        "{} · {}",
        page.status.summary(),
        page.sort.display_name()
    ));

    if !page.active_filters.is_empty() {
        let pills: Vec<String> = page
            .active_filters
            .iter()
            .map(|pill| format!("[{} ×]", pill.label))
            .collect();
        ctx.output.kv("Filtros", &pills.join(" "));
    }

    if let SearchStatus::Empty { message, can_clear_filters } = &page.status {
        ctx.output.warn(message);
        if *can_clear_filters {
            ctx.output.info("Remova filtros para ver mais produtos");
        }
        return Ok(());
    }

    println!();
    let name_width = ctx.output.term_width().saturating_sub(58).clamp(24, 60);
    let widths = [6, name_width, 22, 14];
    ctx.output.table_row(&["ID", "Produto", "Condição", "Preço"], &widths);

    for product in &page.items {
        let price = product.price_money(currency).display();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                product.condition_text().unwrap_or("-"),
                &price,
            ],
            &widths,
        );

        if ctx.output.is_verbose() && product.installments > 1 {
            let share = product.installment_price(product.price, currency);
            println!(
                "  {:6}  {}",
                "",
                style(format!("ou {}x de {}", product.installments, share)).dim()
            );
        }
    }

    if total > page.items.len() {
        ctx.output.info(&format!(
            "Mostrando {} de {} produtos (use --limit para ver mais)",
            page.items.len(),
            total
        ));
    }

    Ok(())
}

fn build_params(args: &SearchArgs, default_sort: SortOption) -> SearchParams {
    let mut params = match &args.url {
        Some(qs) => SearchParams::from_query_string(qs),
        None => SearchParams::new().with_sort(default_sort),
    };

    if let Some(q) = &args.query {
        params = params.with_query(q.clone());
    }
    if let Some(category) = &args.category {
        params = params.with_category(category.clone());
    }
    if let Some(sort) = &args.sort {
        params = params.with_sort(SortOption::from_str(sort));
    }

    params
}
