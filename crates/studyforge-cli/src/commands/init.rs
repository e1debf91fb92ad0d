//! The `studyforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = Path::new("studyforge.toml");
    if path.exists() {
        println!("studyforge.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created studyforge.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point [paths] raw_corpus at your study notes");
    println!("  2. Run: studyforge concepts");
    println!("  3. Run: studyforge flashcards && studyforge questions");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studyforge configuration

# Fixed seed for reproducible samples. Leave unset for a fresh sample per run.
# seed = 42

[paths]
raw_corpus = "SECPLUS_COMPLETE_STUDY_DATA.json"
concepts = "src/data/concept_dictionary.json"
flashcards = "src/data/flashcards.generated.json"
questions = "src/data/questions.generated.json"
practice_questions = "src/data/practice_questions.static.json"

[flashcards]
total = 300
targets = [36, 72, 39, 87, 66]
fallback_order = [4, 2, 5, 3, 1]

[questions]
max_cards = 600
total = 295
targets = [35, 71, 38, 86, 65]
"#;
