//! CLI argument parsing and structure definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Multi-sieve coreference resolution
#[derive(Parser, Debug)]
#[command(name = "multisieve")]
#[command(
    author,
    version,
    about = "Deterministic multi-sieve coreference resolution",
    long_about = r#"
multisieve - rule-based coreference resolution (Lee et al., 2013)

INPUT:
  terms     : terms, dependencies and named entities; mentions are extracted
  mentions  : pre-materialised mentions with an offset-to-string table

OUTPUT:
  One JSON object per document with its coreference groups (co1, co2, ...).

EXAMPLES:
  multisieve doc.json
  multisieve --input-format mentions -s --pretty doc.json
  multisieve --output-dir out/ a.json b.json
  cat doc.json | multisieve -o result.json
  multisieve --config multisieve.toml --print-config
"#
)]
pub struct Cli {
    /// Input JSON documents (reads stdin when none are given)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Shape of the input documents
    #[arg(long, value_enum, default_value_t = InputFormat::Terms)]
    pub input_format: InputFormat,

    /// Write the result to a file (single input only)
    #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Write one `<name>.json` per input into this directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Keep entities with a single mention in the output
    #[arg(short = 's', long)]
    pub include_singletons: bool,

    /// Keep span gaps instead of filling them with the offsets in between
    #[arg(short = 'g', long)]
    pub keep_gaps: bool,

    /// Language of the built-in stopword list (RFC 5646 tag)
    #[arg(long, value_name = "TAG")]
    pub language: Option<String>,

    /// Stopword file, one word per line (overrides --language)
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<PathBuf>,

    /// Sentence window of pronoun resolution
    #[arg(long, value_name = "N")]
    pub max_pronoun_distance: Option<u32>,

    /// TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(short, long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Input document shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Term-level document; mentions are extracted (default)
    #[default]
    Terms,
    /// Mention-level document
    Mentions,
}

/// Log verbosity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors (default)
    #[default]
    Warn,
    /// Pipeline progress
    Info,
    /// Every merge and extraction detail
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// The matching `log` filter.
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}
