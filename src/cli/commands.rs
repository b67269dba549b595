//! Command implementations for the FastSS CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{FastssError, Result};
use crate::index::{FastSsIndex, IndexConfig};
use crate::storage::OpenMode;
use crate::storage::file::FileStore;

/// Execute a CLI command.
pub fn execute_command(args: FastssArgs) -> Result<()> {
    match &args.command {
        Command::Create(create_args) => create_index(create_args, &args),
        Command::Add(add_args) => add_words(add_args, &args),
        Command::Remove(words_args) => remove_words(words_args, &args),
        Command::Query(words_args) => query_words(words_args, &args),
        Command::Contains(words_args) => contains_words(words_args, &args),
        Command::Info(info_args) => show_info(info_args, &args),
    }
}

/// Create a new, empty index.
fn create_index(args: &CreateArgs, cli_args: &FastssArgs) -> Result<()> {
    if args.index_path.exists() && !args.force {
        return Err(FastssError::invalid_argument(format!(
            "index {} already exists. Use --force to overwrite.",
            args.index_path.display()
        )));
    }

    let index = FastSsIndex::open_path(
        &args.index_path,
        OpenMode::CreateNew,
        IndexConfig::new(args.max_distance),
    )?;
    let result = index_info(&args.index_path, &index)?;
    index.close()?;

    output_result(&result, cli_args)
}

/// Add words to an index, creating it if needed.
fn add_words(args: &AddArgs, cli_args: &FastssArgs) -> Result<()> {
    let words = collect_words(&args.source)?;
    let start_time = Instant::now();

    let mut index = FastSsIndex::open_path(
        &args.index_path,
        OpenMode::ReadWriteCreate,
        IndexConfig::new(args.max_distance),
    )?;
    let words_added = index.add_all(&words)?;
    index.close()?;

    info!("added {words_added} words to {}", args.index_path.display());

    output_result(
        &AddResult {
            words_added,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Remove words from an existing index.
///
/// Words that are not indexed are reported and skipped; any other error aborts.
fn remove_words(args: &WordsArgs, cli_args: &FastssArgs) -> Result<()> {
    let words = collect_words(&args.source)?;

    let mut index = open_existing(&args.index_path, OpenMode::ReadWrite)?;
    let mut result = RemoveResult::default();
    for word in words {
        match index.remove(&word) {
            Ok(()) => result.removed.push(word),
            Err(FastssError::NotFound(_)) => {
                warn!("{word:?} is not in the index");
                result.not_found.push(word);
            }
            Err(e) => return Err(e),
        }
    }
    index.close()?;

    output_result(&result, cli_args)
}

/// Query an index with each word.
fn query_words(args: &WordsArgs, cli_args: &FastssArgs) -> Result<()> {
    let words = collect_words(&args.source)?;

    let index = open_existing(&args.index_path, OpenMode::ReadOnly)?;
    for word in words {
        let matches = index.query(&word)?;
        output_result(&QueryOutput { word, matches }, cli_args)?;
    }
    index.close()
}

/// Check whether each word is indexed.
fn contains_words(args: &WordsArgs, cli_args: &FastssArgs) -> Result<()> {
    let words = collect_words(&args.source)?;

    let index = open_existing(&args.index_path, OpenMode::ReadOnly)?;
    for word in words {
        let found = index.contains(&word)?;
        output_result(&ContainsOutput { word, found }, cli_args)?;
    }
    index.close()
}

/// Show index settings.
fn show_info(args: &InfoArgs, cli_args: &FastssArgs) -> Result<()> {
    let index = open_existing(&args.index_path, OpenMode::ReadOnly)?;
    let result = index_info(&args.index_path, &index)?;
    index.close()?;

    output_result(&result, cli_args)
}

fn open_existing(path: &Path, mode: OpenMode) -> Result<FastSsIndex<FileStore>> {
    FastSsIndex::open_path(path, mode, IndexConfig::default())
}

fn index_info(path: &Path, index: &FastSsIndex<FileStore>) -> Result<IndexInfo> {
    Ok(IndexInfo {
        path: path.to_string_lossy().to_string(),
        max_distance: index.max_distance(),
        keys: index.key_count()?,
    })
}

/// Gather words from the command line and the optional input file.
pub fn collect_words(source: &WordSource) -> Result<Vec<String>> {
    let mut words = source.words.clone();

    if let Some(input) = &source.input {
        if input.as_os_str() == "-" {
            words.extend(read_words(io::stdin().lock())?);
        } else {
            let file = File::open(input)
                .with_context(|| format!("failed to open word list {}", input.display()))?;
            words.extend(read_words(BufReader::new(file))?);
        }
    }

    Ok(words)
}

/// Read one word per line, skipping blank lines.
pub fn read_words<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim_end_matches('\r');
        if !word.trim().is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}
