//! studyforge CLI: batch transforms over certification study material.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "studyforge",
    version,
    about = "Turn study notes into concepts, flashcards, and practice questions"
)]
struct Cli {
    /// Config file path (default: ./studyforge.toml, then ~/.config/studyforge/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a term/definition dictionary from raw study notes
    Concepts {
        /// Raw study notes JSON
        #[arg(long = "in")]
        input: Option<PathBuf>,

        /// Concept dictionary output
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a blueprint-weighted flashcard set
    Flashcards {
        /// Study notes or card array JSON
        #[arg(long = "in", env = "FLASHCARDS_INPUT")]
        input: Option<PathBuf>,

        /// Flashcard set output
        #[arg(long, env = "FLASHCARDS_OUTPUT")]
        out: Option<PathBuf>,

        /// Total number of cards to sample
        #[arg(long, env = "FLASHCARDS_MAX")]
        max: Option<usize>,

        /// RNG seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate practice questions from a flashcard set
    Questions {
        /// Flashcard set JSON
        #[arg(long = "in")]
        input: Option<PathBuf>,

        /// Question set output
        #[arg(long)]
        out: Option<PathBuf>,

        /// Maximum number of input cards considered
        #[arg(long)]
        max: Option<usize>,

        /// RNG seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,

        /// Also emit short-answer items for the sampled cards
        #[arg(long)]
        include_short: bool,
    },

    /// Merge a new batch of cards into the corpus
    Merge {
        /// New cards JSON
        #[arg(long)]
        new: PathBuf,

        /// Current corpus (default: the raw corpus path)
        #[arg(long)]
        existing: Option<PathBuf>,

        /// Merged output (default: the raw corpus path)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Practice questions side file
        #[arg(long)]
        practice_out: Option<PathBuf>,

        /// Keep duplicate front/back pairs
        #[arg(long)]
        no_dedupe: bool,
    },

    /// Show per-domain counts of the study data
    Summary {
        /// Only show this domain (1-5)
        #[arg(long)]
        domain: Option<String>,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studyforge=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Concepts { input, out } => commands::concepts::execute(input, out, config),
        Commands::Flashcards {
            input,
            out,
            max,
            seed,
        } => commands::flashcards::execute(input, out, max, seed, config),
        Commands::Questions {
            input,
            out,
            max,
            seed,
            include_short,
        } => commands::questions::execute(input, out, max, seed, include_short, config),
        Commands::Merge {
            new,
            existing,
            out,
            practice_out,
            no_dedupe,
        } => commands::merge::execute(new, existing, out, practice_out, no_dedupe, config),
        Commands::Summary { domain } => commands::summary::execute(domain, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
