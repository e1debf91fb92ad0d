//! The `studyforge flashcards` command.

use std::path::PathBuf;

use anyhow::Result;

use studyforge_core::config::load_config_from;
use studyforge_core::model::{domain_distribution, FlashcardSet};
use studyforge_core::sampling::make_rng;
use studyforge_core::store::write_json_atomic;
use studyforge_extract::flashcards::{generate_flashcards, FlashcardInput};

use super::distribution_table;

pub fn execute(
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    max: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let input = input.unwrap_or(config.paths.raw_corpus);
    let out = out.unwrap_or(config.paths.flashcards);

    let mut plan = config.flashcards.plan()?;
    if let Some(max) = max {
        plan.total = max;
    }
    let mut rng = make_rng(seed.or(config.seed));

    let parsed = FlashcardInput::load(&input)?;
    let run = generate_flashcards(parsed, &plan, &mut rng);
    let dist = domain_distribution(&run.cards, |c| c.domain);

    let set = FlashcardSet::new(run.cards);
    write_json_atomic(&out, &set)?;

    println!("Generated {} flashcards", set.count);
    println!(
        "Normalized {} cards, dropped {} duplicates, sampled {} (target {})",
        run.normalized,
        run.duplicates,
        set.count,
        plan.total
    );
    println!("{}", distribution_table(&dist));
    println!("Input:  {}", input.display());
    println!("Output: {}", out.display());

    Ok(())
}
