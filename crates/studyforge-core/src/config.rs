//! Pipeline configuration.
//!
//! Default file locations and sampling quotas, optionally overridden by a
//! `studyforge.toml`. Command-line flags and environment variables are
//! layered on top by the CLI.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{
    FALLBACK_ORDER, FLASHCARD_TARGETS, FLASHCARD_TOTAL, QUESTION_TARGETS, QUESTION_TOTAL,
};
use crate::model::Domain;
use crate::sampling::{DomainTargets, SamplePlan, TopUp};

/// File locations used when no flag overrides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw study notes; also the merged corpus the merge tool rewrites.
    pub raw_corpus: PathBuf,
    pub concepts: PathBuf,
    pub flashcards: PathBuf,
    pub questions: PathBuf,
    pub practice_questions: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_corpus: PathBuf::from("SECPLUS_COMPLETE_STUDY_DATA.json"),
            concepts: PathBuf::from("src/data/concept_dictionary.json"),
            flashcards: PathBuf::from("src/data/flashcards.generated.json"),
            questions: PathBuf::from("src/data/questions.generated.json"),
            practice_questions: PathBuf::from("src/data/practice_questions.static.json"),
        }
    }
}

/// Flashcard sampler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashcardConfig {
    pub total: usize,
    pub targets: DomainTargets,
    /// Domain numbers drained, in order, when a quota is short.
    pub fallback_order: Vec<u8>,
}

impl Default for FlashcardConfig {
    fn default() -> Self {
        Self {
            total: FLASHCARD_TOTAL,
            targets: FLASHCARD_TARGETS,
            fallback_order: FALLBACK_ORDER.iter().map(|d| d.number()).collect(),
        }
    }
}

impl FlashcardConfig {
    pub fn plan(&self) -> Result<SamplePlan> {
        let order = self
            .fallback_order
            .iter()
            .map(|&n| {
                Domain::from_number(u64::from(n))
                    .ok_or_else(|| anyhow::anyhow!("invalid domain in fallback_order: {n}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SamplePlan {
            targets: self.targets,
            total: self.total,
            top_up: TopUp::DomainOrder(order),
        })
    }
}

/// Question generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionConfig {
    /// How many input cards are considered at most.
    pub max_cards: usize,
    pub total: usize,
    pub targets: DomainTargets,
}

impl Default for QuestionConfig {
    fn default() -> Self {
        Self {
            max_cards: 600,
            total: QUESTION_TOTAL,
            targets: QUESTION_TARGETS,
        }
    }
}

impl QuestionConfig {
    pub fn plan(&self) -> SamplePlan {
        SamplePlan {
            targets: self.targets,
            total: self.total,
            top_up: TopUp::AnyLeftover,
        }
    }
}

/// Top-level studyforge configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyforgeConfig {
    pub paths: PathsConfig,
    pub flashcards: FlashcardConfig,
    pub questions: QuestionConfig,
    /// Fixed RNG seed for reproducible sampling; unset means a fresh seed per run.
    pub seed: Option<u64>,
}

static ENV_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"));

/// Expand `${VAR}` references from the environment; unset variables expand to nothing.
fn resolve_env_vars(s: &str) -> String {
    ENV_REF
        .replace_all(s, |caps: &regex::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

impl PathsConfig {
    fn resolved(&self) -> Self {
        Self {
            raw_corpus: resolve_path(&self.raw_corpus),
            concepts: resolve_path(&self.concepts),
            flashcards: resolve_path(&self.flashcards),
            questions: resolve_path(&self.questions),
            practice_questions: resolve_path(&self.practice_questions),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `studyforge.toml` in the current directory
/// 2. `~/.config/studyforge/config.toml`
///
/// An explicit path that does not exist is an error; missing default
/// locations fall back to built-in defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<StudyforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studyforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let parsed = toml::from_str::<StudyforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parsed
        }
        None => StudyforgeConfig::default(),
    };

    config.paths = config.paths.resolved();
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studyforge"))
}
