//! Output formatting for CLI commands.

use std::fmt;

use serde::Serialize;

use crate::cli::args::{FastssArgs, OutputFormat};
use crate::error::Result;
use crate::index::QueryResult;

/// Result of creating an index, also used by `info`.
#[derive(Debug, Serialize)]
pub struct IndexInfo {
    pub path: String,
    pub max_distance: u8,
    pub keys: usize,
}

impl fmt::Display for IndexInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index: {}", self.path)?;
        writeln!(f, "Max distance: {}", self.max_distance)?;
        write!(f, "Keys: {}", self.keys)
    }
}

/// Result of adding words.
#[derive(Debug, Serialize)]
pub struct AddResult {
    pub words_added: usize,
    pub duration_ms: u64,
}

impl fmt::Display for AddResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added {} words in {}ms",
            self.words_added, self.duration_ms
        )
    }
}

/// Result of removing words.
#[derive(Debug, Default, Serialize)]
pub struct RemoveResult {
    pub removed: Vec<String>,
    pub not_found: Vec<String>,
}

impl fmt::Display for RemoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Removed {} words", self.removed.len())?;
        if !self.not_found.is_empty() {
            write!(f, "\nNot found: {}", self.not_found.join(", "))?;
        }
        Ok(())
    }
}

/// Matches for a single query word.
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub word: String,
    pub matches: QueryResult,
}

impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{", self.word)?;
        for (distance, words) in self.matches.iter() {
            if distance > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{distance}: [{}]", words.join(", "))?;
        }
        write!(f, "}}")
    }
}

/// Membership of a single word.
#[derive(Debug, Serialize)]
pub struct ContainsOutput {
    pub word: String,
    pub found: bool,
}

impl fmt::Display for ContainsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.found)
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + fmt::Display>(result: &T, args: &FastssArgs) -> Result<()> {
    println!("{}", render(result, args)?);
    Ok(())
}

/// Render a result to a string in the specified format.
pub fn render<T: Serialize + fmt::Display>(result: &T, args: &FastssArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.to_string()),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}
