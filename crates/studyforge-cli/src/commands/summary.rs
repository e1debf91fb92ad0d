//! The `studyforge summary` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyforge_core::config::load_config_from;
use studyforge_core::model::Domain;
use studyforge_core::study_data::{StudyData, StudyDataPaths};

pub fn execute(domain: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let filter = domain.as_deref().map(str::parse::<Domain>).transpose()?;

    let data = StudyData::load(&StudyDataPaths::from(&config.paths))?;

    let mut table = Table::new();
    table.set_header(vec!["Domain", "Name", "Flashcards", "Questions"]);
    for stats in data.domain_stats() {
        if filter.is_some_and(|d| d != stats.domain) {
            continue;
        }
        table.add_row(vec![
            Cell::new(stats.domain),
            Cell::new(&stats.name),
            Cell::new(stats.flashcards),
            Cell::new(stats.questions),
        ]);
    }
    // Cards without a domain are only counted here.
    if filter.is_none() {
        table.add_row(vec![
            Cell::new("all"),
            Cell::new(""),
            Cell::new(data.flashcards().len()),
            Cell::new(data.practice_questions().len()),
        ]);
    }
    println!("{table}");

    println!(
        "{} flashcards, {} practice questions",
        data.flashcards_in_domain(filter).len(),
        data.questions_in_domain(filter).len()
    );

    Ok(())
}
