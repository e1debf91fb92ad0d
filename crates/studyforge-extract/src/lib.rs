//! studyforge-extract: Turn study notes into concepts and flashcards.
//!
//! The concept extractor keeps only bullets that read as complete
//! "term: definition" statements. The flashcard generator accepts either
//! raw notes or pre-authored cards and draws a blueprint-weighted sample.

pub mod concepts;
pub mod curated;
pub mod flashcards;
pub mod rules;
