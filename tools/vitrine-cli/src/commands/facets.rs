//! Facet picker for a catalog.

use anyhow::Result;
use serde::Serialize;
use vitrine_commerce::catalog::{condition_sections, ConditionSection};
use vitrine_commerce::search::{AvailableFacets, FacetGroup, FacetKind, FilterSelection};

use super::FacetsArgs;
use crate::context::Context;
use crate::output::swatch;

#[derive(Serialize)]
struct FacetsReport<'a> {
    facets: &'a AvailableFacets,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<Vec<ConditionSection>>,
}

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_catalog(args.catalog.as_deref())?;
    let extractor = ctx.config.extractor()?;

    let mut facets = AvailableFacets::derive(&extractor, Some(&products));
    if let Some(search) = args.model_search.as_deref() {
        facets.models = facets.search_models(search).into_iter().cloned().collect();
    }
    let sections = args.sections.then(|| condition_sections(&products));

    if ctx.output.is_json() {
        ctx.output.json(&FacetsReport {
            facets: &facets,
            sections,
        });
        return Ok(());
    }

    ctx.output.header("Filtros");
    ctx.output.subtitle(&format!("{} produtos no catálogo", products.len()));

    for group in facets.groups(&FilterSelection::new()) {
        print_group(ctx, &group);
    }

    if let Some(sections) = sections {
        ctx.output.header("Seções da página inicial");
        for section in &sections {
            ctx.output.list_item(&format!("{} ({})", section.title, section.code));
        }
    }

    Ok(())
}

fn print_group(ctx: &Context, group: &FacetGroup) {
    println!();
    println!("{}", group.title);

    for option in &group.options {
        let label = match (&group.kind, option.color_code.as_deref()) {
            (FacetKind::Color, Some(code)) => format!("{} {}", swatch(code), option.label),
            _ => option.label.clone(),
        };
        ctx.output.option(option.selected, &label, option.count);
    }
}
