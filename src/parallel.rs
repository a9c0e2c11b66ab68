//! Batch processing of saved result pages.
//!
//! Pages are independent of each other, so a batch is split into chunks and
//! every chunk is parsed on its own std::thread. Each thread builds its own
//! document trees; only the read-only label table is shared.

use crate::error::{Result, ScanError};
use crate::labels::LabelTable;
use crate::page::{parse_document, PageKind, ParsedPage};
use crate::word::Word;
use bzip2::read::BzDecoder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub num_threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self { num_threads: cpus }
    }
}

/// Result of parsing one input page
#[derive(Debug)]
pub struct ProcessedPage {
    pub source: PathBuf,
    pub page_id: usize,
    pub outcome: Result<ParsedPage>,
}

/// One output line.
#[derive(Debug, Serialize)]
pub struct PageRecord<'a> {
    pub source: String,
    pub kind: PageKind,
    pub words: &'a [Word],
}

#[derive(Debug, Default)]
pub struct Stats {
    pub pages_processed: usize,
    pub entry_pages: usize,
    pub suggestion_pages: usize,
    pub missing_pages: usize,
    pub failed_pages: usize,
    pub words_written: usize,
    pub samples_written: usize,
    pub elapsed: Duration,
}

/// Open a saved page, decompressing `.bz2` files on the fly.
pub fn open_page(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

pub fn process_page(path: &Path, page_id: usize, labels: &LabelTable) -> ProcessedPage {
    let outcome = open_page(path).and_then(|reader| parse_document(reader, labels));
    ProcessedPage {
        source: path.to_path_buf(),
        page_id,
        outcome,
    }
}

/// Parse a batch of pages using multiple threads. Results keep input order.
pub fn process_batch_threaded(
    batch: &[PathBuf],
    labels: &LabelTable,
    num_threads: usize,
) -> Vec<ProcessedPage> {
    if batch.is_empty() {
        return vec![];
    }

    let num_threads = num_threads.min(batch.len()).max(1);
    let chunk_size = (batch.len() + num_threads - 1) / num_threads;
    let labels = Arc::new(labels.clone());

    // Split batch into chunks for each thread
    let chunks: Vec<Vec<(usize, PathBuf)>> = batch
        .iter()
        .cloned()
        .enumerate()
        .collect::<Vec<_>>()
        .chunks(chunk_size)
        .map(|c| c.to_vec())
        .collect();

    let handles: Vec<(Vec<(usize, PathBuf)>, JoinHandle<Vec<ProcessedPage>>)> = chunks
        .into_iter()
        .map(|chunk| {
            let labels = Arc::clone(&labels);
            let pages = chunk.clone();
            let handle = thread::spawn(move || {
                chunk
                    .into_iter()
                    .map(|(page_id, path)| process_page(&path, page_id, &labels))
                    .collect()
            });
            (pages, handle)
        })
        .collect();

    // Chunks are contiguous, so joining in spawn order preserves input order
    let mut results = Vec::with_capacity(batch.len());
    for (pages, handle) in handles {
        results.extend(join_chunk(handle, &pages));
    }

    results
}

/// Collect a worker's results. If the worker panicked, every page of its
/// chunk is reported as failed.
fn join_chunk(
    handle: JoinHandle<Vec<ProcessedPage>>,
    pages: &[(usize, PathBuf)],
) -> Vec<ProcessedPage> {
    match handle.join() {
        Ok(chunk_results) => chunk_results,
        Err(_) => {
            log::warn!("page worker thread panicked; {} pages marked as failed", pages.len());
            pages
                .iter()
                .map(|(page_id, path)| ProcessedPage {
                    source: path.clone(),
                    page_id: *page_id,
                    outcome: Err(ScanError::WorkerPanicked),
                })
                .collect()
        }
    }
}

pub fn update_stats_from_result(stats: &mut Stats, result: &ProcessedPage) {
    stats.pages_processed += 1;
    match &result.outcome {
        Err(_) => stats.failed_pages += 1,
        Ok(page) => {
            match page.kind {
                PageKind::Entry => stats.entry_pages += 1,
                PageKind::Suggestions => stats.suggestion_pages += 1,
                PageKind::Missing => stats.missing_pages += 1,
            }
            stats.words_written += page.words.len();
            stats.samples_written += page.words.iter().map(|w| w.samples.len()).sum::<usize>();
        }
    }
}

/// Write one JSON line per successfully parsed page. Failures are returned
/// to the caller for reporting and do not stop the batch.
pub fn write_results<W: Write>(
    results: &[ProcessedPage],
    writer: &mut W,
    stats: &mut Stats,
) -> Result<Vec<(PathBuf, String)>> {
    let mut failures = Vec::new();

    for result in results {
        update_stats_from_result(stats, result);
        match &result.outcome {
            Ok(page) => {
                let record = PageRecord {
                    source: result.source.display().to_string(),
                    kind: page.kind,
                    words: &page.words,
                };
                let json = serde_json::to_string(&record)?;
                writeln!(writer, "{}", json)?;
            }
            Err(e) => failures.push((result.source.clone(), e.to_string())),
        }
    }

    writer.flush()?;
    Ok(failures)
}
