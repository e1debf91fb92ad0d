//! The `studyforge concepts` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde_json::Value;

use studyforge_core::config::load_config_from;
use studyforge_core::error::InputError;
use studyforge_core::model::RawCorpus;
use studyforge_core::store::{read_json, write_json_atomic};
use studyforge_extract::concepts::build_concept_dictionary;

pub fn execute(
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let input = input.unwrap_or(config.paths.raw_corpus);
    let out = out.unwrap_or(config.paths.concepts);

    let value: Value = read_json(&input)?;
    if !value.get("domains").is_some_and(Value::is_array) {
        return Err(
            InputError::unsupported_shape(&input, &["an object with { domains: [...] }"]).into(),
        );
    }
    let corpus: RawCorpus = serde_json::from_value(value)
        .with_context(|| format!("failed to read study notes: {}", input.display()))?;

    let dict = build_concept_dictionary(&corpus);
    write_json_atomic(&out, &dict.concepts)?;
    tracing::debug!(path = %out.display(), "wrote concept dictionary");

    let stats = &dict.stats;
    let mut table = Table::new();
    table.set_header(vec!["Stage", "Count"]);
    for (label, n) in [
        ("Bullets processed", stats.total_bullets),
        ("Skipped (quality rules)", stats.skipped),
        ("Curated (section match)", stats.curated),
        ("Dash rule (Term - definition)", stats.dash_rule),
        ("Copula rule (X is/are Y)", stats.copula_rule),
        ("Duplicate terms", stats.duplicates),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(n)]);
    }

    println!("Generated {} concepts", dict.concepts.len());
    println!("{table}");

    if !stats.rejections.is_empty() {
        println!("\nRejections by rule:");
        for (rule, n) in &stats.rejections {
            println!("  {rule}: {n}");
        }
    }

    println!("\nConcepts per domain:");
    for (domain, n) in dict.per_domain() {
        println!("  Domain {domain}: {n}");
    }
    println!("\nOutput: {}", out.display());

    Ok(())
}
