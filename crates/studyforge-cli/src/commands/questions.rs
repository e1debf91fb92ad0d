//! The `studyforge questions` command.

use std::path::PathBuf;

use anyhow::Result;

use studyforge_core::config::load_config_from;
use studyforge_core::model::{domain_distribution, Question, QuestionSet};
use studyforge_core::sampling::make_rng;
use studyforge_core::store::write_json_atomic;
use studyforge_quiz::questions::{generate_questions, load_source_cards, QuestionOptions};

use super::distribution_table;

pub fn execute(
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    max: Option<usize>,
    seed: Option<u64>,
    include_short: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let input = input.unwrap_or(config.paths.flashcards);
    let out = out.unwrap_or(config.paths.questions);

    let options = QuestionOptions {
        max_cards: max.unwrap_or(config.questions.max_cards),
        plan: config.questions.plan(),
        include_short,
    };
    let mut rng = make_rng(seed.or(config.seed));

    let cards = load_source_cards(&input)?;
    if cards.len() > options.max_cards {
        tracing::info!(
            total = cards.len(),
            max = options.max_cards,
            "considering only the first cards of the deck"
        );
    }
    let run = generate_questions(&cards, &options, &mut rng);

    let mcqs: Vec<&Question> = run
        .questions
        .iter()
        .filter(|q| q.as_mcq().is_some())
        .collect();
    let dist = domain_distribution(&mcqs, |q| q.domain());
    let mcq_count = mcqs.len();

    let set = QuestionSet::new(run.questions);
    write_json_atomic(&out, &set)?;

    println!("Generated {mcq_count} MCQs");
    if include_short {
        println!("Included {} short-answer items", set.count - mcq_count);
    }
    println!(
        "Considered {} cards, skipped {} thin cards and {} without four distinct choices",
        run.cards_considered, run.skipped_cards, run.skipped_mcqs
    );
    println!("{}", distribution_table(&dist));
    println!("Input:  {}", input.display());
    println!("Output: {}", out.display());

    Ok(())
}
