//! CSV corpus reader for the offline index builder.
//!
//! Walks a directory of `.csv` files and turns every text cell into cleaned,
//! bounded chunks. Recovery is per-file: a structurally empty file falls back
//! to raw line-oriented processing, a malformed file is skipped with a
//! warning, and the run continues either way.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use answerbox_core::config::CorpusConfig;

use crate::preprocess::{chunk, clean};

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a single file failed structured parsing.
enum TabularError {
    /// Headers parsed but no data rows; candidate for line fallback.
    Empty,
    /// Anything else; the file is skipped.
    Parse(String),
}

/// Collect cleaned chunks from every `.csv` file in `corpus_dir`, in file
/// name order. Zero-length files are skipped outright.
pub fn collect_chunks(cfg: &CorpusConfig) -> Result<Vec<String>, CorpusError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(&cfg.corpus_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|e| e == "csv").unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut chunks = Vec::new();
    for path in &files {
        if std::fs::metadata(path)?.len() == 0 {
            info!("Skipping empty file: {}", path.display());
            continue;
        }

        match read_text_cells(path, &cfg.text_column) {
            Ok(cells) => {
                let before = chunks.len();
                for cell in &cells {
                    chunks.extend(chunk(&clean(cell), cfg.chunk_size));
                }
                debug!(
                    "{}: {} rows -> {} chunks",
                    path.display(),
                    cells.len(),
                    chunks.len() - before
                );
            }
            Err(TabularError::Empty) => {
                warn!(
                    "Empty or unstructured data in {}; falling back to line-by-line",
                    path.display()
                );
                match std::fs::read_to_string(path) {
                    Ok(text) => {
                        for line in text.lines() {
                            chunks.extend(chunk(&clean(line), cfg.chunk_size));
                        }
                    }
                    Err(e) => warn!("Failed to read {}: {}", path.display(), e),
                }
            }
            Err(TabularError::Parse(e)) => {
                warn!("Error reading {}: {}", path.display(), e);
                continue;
            }
        }
    }

    Ok(chunks)
}

/// Structured parse of one CSV file, returning the non-empty cells of the
/// text column. Falls back to the first column (with a warning) when the
/// configured column is absent.
fn read_text_cells(path: &Path, text_column: &str) -> Result<Vec<String>, TabularError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| TabularError::Parse(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| TabularError::Parse(e.to_string()))?
        .clone();
    if headers.is_empty() {
        return Err(TabularError::Empty);
    }

    let column = match headers.iter().position(|h| h == text_column) {
        Some(i) => i,
        None => {
            warn!(
                "Column '{}' not found in {}; using first available column '{}'",
                text_column,
                path.display(),
                headers.get(0).unwrap_or_default()
            );
            0
        }
    };

    let mut rows = 0usize;
    let mut cells = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| TabularError::Parse(e.to_string()))?;
        rows += 1;
        if let Some(cell) = record.get(column) {
            if !cell.trim().is_empty() {
                cells.push(cell.to_string());
            }
        }
    }

    if rows == 0 {
        return Err(TabularError::Empty);
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cfg(dir: &Path) -> CorpusConfig {
        CorpusConfig {
            corpus_dir: dir.to_path_buf(),
            text_column: "text".to_string(),
            chunk_size: 500,
        }
    }

    #[test]
    fn empty_file_is_skipped_and_rows_become_chunks() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("docs.csv"),
            "text\nfirst row of text\nsecond row of text\nthird row of text\n",
        )
        .unwrap();
        fs::write(dir.path().join("empty.csv"), "").unwrap();

        let chunks = collect_chunks(&cfg(dir.path())).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "first row of text");
        assert_eq!(chunks[2], "third row of text");
    }

    #[test]
    fn missing_text_column_falls_back_to_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("docs.csv"),
            "title,body\nsome title,some body\n",
        )
        .unwrap();

        let chunks = collect_chunks(&cfg(dir.path())).unwrap();
        assert_eq!(chunks, vec!["some title".to_string()]);
    }

    #[test]
    fn malformed_file_is_skipped_but_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        // Ragged row: three fields under a two-field header.
        fs::write(dir.path().join("bad.csv"), "text,extra\na,b,c\n").unwrap();
        fs::write(dir.path().join("good.csv"), "text\nusable row\n").unwrap();

        let chunks = collect_chunks(&cfg(dir.path())).unwrap();
        assert_eq!(chunks, vec!["usable row".to_string()]);
    }

    #[test]
    fn header_only_file_falls_back_to_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("docs.csv"), "text\n").unwrap();

        let chunks = collect_chunks(&cfg(dir.path())).unwrap();
        assert_eq!(chunks, vec!["text".to_string()]);
    }

    #[test]
    fn non_csv_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "not tabular at all").unwrap();

        let chunks = collect_chunks(&cfg(dir.path())).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn long_rows_are_split_into_bounded_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let long_row = (0..120).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        fs::write(dir.path().join("docs.csv"), format!("text\n{long_row}\n")).unwrap();

        let mut config = cfg(dir.path());
        config.chunk_size = 50;
        let chunks = collect_chunks(&config).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.split_whitespace().count() <= 50));
    }
}
