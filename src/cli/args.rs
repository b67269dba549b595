//! Command line argument parsing for the FastSS CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::index::DEFAULT_MAX_DISTANCE;

/// fastss - approximate string matching with FastSS deletion neighborhoods
#[derive(Parser, Debug, Clone)]
#[command(name = "fastss")]
#[command(about = "Build and query FastSS approximate string matching indexes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FastssArgs {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FastssArgs {
    /// Get the effective verbosity level: 0 when quiet, 1 by default, one more per `-v`.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a new, empty index
    Create(CreateArgs),

    /// Add words to an index, creating it if missing
    Add(AddArgs),

    /// Remove words from an index
    Remove(WordsArgs),

    /// Find indexed words close to each query word
    Query(WordsArgs),

    /// Check whether words are indexed
    Contains(WordsArgs),

    /// Show index settings and size
    Info(InfoArgs),
}

/// Words given on the command line and/or read from a file.
#[derive(clap::Args, Debug, Clone)]
pub struct WordSource {
    /// Words to process
    #[arg(value_name = "WORDS")]
    pub words: Vec<String>,

    /// Read additional words from a file, one per line ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Arguments for creating an index
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    /// Maximum edit distance the index supports
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DISTANCE)]
    pub max_distance: u8,

    /// Overwrite an existing index
    #[arg(long)]
    pub force: bool,
}

/// Arguments for adding words
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    /// Maximum edit distance, used only when the index is created by this command
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DISTANCE)]
    pub max_distance: u8,

    #[command(flatten)]
    pub source: WordSource,
}

/// Arguments for commands that take an index and a list of words
#[derive(Parser, Debug, Clone)]
pub struct WordsArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    #[command(flatten)]
    pub source: WordSource,
}

/// Arguments for showing index information
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output, one document per line
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_command() {
        let args =
            FastssArgs::try_parse_from(["fastss", "query", "words.db", "tes", "taste"]).unwrap();

        if let Command::Query(query_args) = args.command {
            assert_eq!(query_args.index_path, PathBuf::from("words.db"));
            assert_eq!(query_args.source.words, vec!["tes", "taste"]);
            assert!(query_args.source.input.is_none());
        } else {
            panic!("Expected Query command");
        }
    }

    #[test]
    fn test_create_command() {
        let args = FastssArgs::try_parse_from([
            "fastss",
            "create",
            "words.db",
            "--max-distance",
            "3",
            "--force",
        ])
        .unwrap();

        if let Command::Create(create_args) = args.command {
            assert_eq!(create_args.max_distance, 3);
            assert!(create_args.force);
        } else {
            panic!("Expected Create command");
        }
    }

    #[test]
    fn test_add_command_defaults() {
        let args =
            FastssArgs::try_parse_from(["fastss", "add", "words.db", "-i", "words.txt"]).unwrap();

        if let Command::Add(add_args) = args.command {
            assert_eq!(add_args.max_distance, DEFAULT_MAX_DISTANCE);
            assert_eq!(add_args.source.input, Some(PathBuf::from("words.txt")));
            assert!(add_args.source.words.is_empty());
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_verbosity() {
        let args = FastssArgs::try_parse_from(["fastss", "info", "words.db"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = FastssArgs::try_parse_from(["fastss", "-v", "info", "words.db"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = FastssArgs::try_parse_from(["fastss", "-vv", "info", "words.db"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = FastssArgs::try_parse_from(["fastss", "info", "words.db", "-q"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            FastssArgs::try_parse_from(["fastss", "--format", "json", "info", "words.db"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
