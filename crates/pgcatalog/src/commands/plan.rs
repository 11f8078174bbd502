//! Plan command: show the selection without resolving digests

use super::skopeo_generator;
use crate::cli::PlanArgs;
use crate::output::Reporter;
use anyhow::{Context, Result};
use pgcatalog_core::{CatalogConfig, SuffixPlan};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled, Serialize)]
struct PlanRow {
    suffix: String,
    major: u64,
    tag: String,
    file: String,
}

fn rows(config: &CatalogConfig, plans: Vec<SuffixPlan>) -> Vec<PlanRow> {
    let mut rows = Vec::new();
    for plan in plans {
        let file = config.output_path(&plan.suffix).to_string();
        // Catalog order: ascending by major
        for selected in plan.selections.into_iter().rev() {
            rows.push(PlanRow {
                suffix: plan.suffix.clone(),
                major: selected.major,
                tag: selected.tag,
                file: file.clone(),
            });
        }
    }
    rows
}

pub async fn run(args: PlanArgs, config: CatalogConfig, out: Reporter) -> Result<()> {
    let generator = skopeo_generator(config)?;

    let spinner = out.spinner(&format!("Listing tags of {}", generator.config().repository));
    let result = generator.plan().await;
    spinner.finish_and_clear();
    let plans = result.context("Failed to plan catalogs")?;

    let rows = rows(generator.config(), plans);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        out.warning("No tags matched any configured suffix");
    } else {
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{}", table);
        out.note("Digests are resolved only by `pgcatalog generate`");
    }

    Ok(())
}
