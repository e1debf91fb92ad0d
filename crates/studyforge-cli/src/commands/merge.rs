//! The `studyforge merge` command.

use std::path::PathBuf;

use anyhow::Result;

use studyforge_core::config::load_config_from;
use studyforge_merge::{run_merge, MergeOptions};

pub fn execute(
    new: PathBuf,
    existing: Option<PathBuf>,
    out: Option<PathBuf>,
    practice_out: Option<PathBuf>,
    no_dedupe: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let opts = MergeOptions {
        new,
        existing: existing.unwrap_or_else(|| config.paths.raw_corpus.clone()),
        out: out.unwrap_or_else(|| config.paths.raw_corpus.clone()),
        practice_out: practice_out.unwrap_or(config.paths.practice_questions),
        dedupe: !no_dedupe,
    };

    let report = run_merge(&opts)?;

    if !report.existing_found {
        println!("Existing file not found, using new file only.");
    }
    println!(
        "Merged {} new + {} existing → {} total",
        report.new_cards, report.existing_cards, report.total
    );
    println!("Output: {}", opts.out.display());
    if report.practice_questions > 0 {
        println!(
            "Extracted {} practice questions → {}",
            report.practice_questions,
            opts.practice_out.display()
        );
    }

    Ok(())
}
