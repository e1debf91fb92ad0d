//! studyforge-quiz: Practice questions synthesized from flashcards.
//!
//! Every card yields a four-choice MCQ; cards phrased "What is X?" also
//! yield a short-answer item. Wrong choices come from a hand-curated table
//! of commonly confused terms, falling back to other answers in the deck.

pub mod distractors;
pub mod questions;
