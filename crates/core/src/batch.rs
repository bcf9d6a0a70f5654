//! Batch processing for whole documentation sets.
//!
//! Documents are independent: each is parsed on its own, possibly on another
//! thread, and a failing document never prevents results for the others.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::document::{ParseOutcome, SourceDocument, parse_document};
use crate::options::ExtractOptions;

/// A single unit of batch work.
#[derive(Debug, Clone)]
pub enum BatchInput {
    /// Already loaded document.
    Document(SourceDocument),
    /// File to be read by the worker.
    Path(PathBuf),
}

impl BatchInput {
    /// Identifier reported in the matching [`BatchResult`].
    pub fn id(&self) -> String {
        match self {
            BatchInput::Document(document) => document.id().to_string(),
            BatchInput::Path(path) => path.to_string_lossy().into_owned(),
        }
    }
}

impl From<SourceDocument> for BatchInput {
    fn from(document: SourceDocument) -> Self {
        BatchInput::Document(document)
    }
}

impl From<PathBuf> for BatchInput {
    fn from(path: PathBuf) -> Self {
        BatchInput::Path(path)
    }
}

/// Options for batch processing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Whether to continue processing after a failing document. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Extraction options used for every document.
    pub extract: ExtractOptions,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Parse outcome; absent only when the document could not be read.
    pub outcome: Option<ParseOutcome>,
    /// Failure summary (read failure or error-level diagnostics).
    pub error: Option<String>,
}

impl BatchResult {
    /// Whether this document failed.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Statistics for batch processing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Total number of documents submitted.
    pub total: usize,
    /// Number of documents processed without error-level diagnostics.
    pub succeeded: usize,
    /// Number of failed documents.
    pub failed: usize,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// All results of a batch plus statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProcessingResult {
    /// Results in input order.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

impl BatchProcessingResult {
    /// Results of documents that succeeded.
    pub fn succeeded(&self) -> impl Iterator<Item = &BatchResult> {
        self.results.iter().filter(|r| !r.is_failure())
    }

    /// Results of documents that failed.
    pub fn failed(&self) -> impl Iterator<Item = &BatchResult> {
        self.results.iter().filter(|r| r.is_failure())
    }
}

/// Parse many documents, in parallel unless `continue_on_error` is false.
///
/// With `continue_on_error == false` documents are processed in order and the
/// batch stops after the first failure; later documents get no result.
pub fn process_batch(inputs: Vec<BatchInput>, options: &BatchOptions) -> BatchProcessingResult {
    let start = Instant::now();
    let continue_on_error = options.continue_on_error.unwrap_or(true);
    let extract = &options.extract;

    let pool = options.max_threads.and_then(|threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| log::warn!("falling back to the global thread pool: {err}"))
            .ok()
    });

    let total = inputs.len();
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let result = process_one(input, extract);
        if result.is_failure() {
            failed.fetch_add(1, Ordering::Relaxed);
        } else {
            succeeded.fetch_add(1, Ordering::Relaxed);
        }
        result
    };

    let results: Vec<BatchResult> = if continue_on_error {
        match pool {
            Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
            None => inputs.into_par_iter().map(process_input).collect(),
        }
    } else {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let stop = result.is_failure();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    };

    let elapsed = start.elapsed();
    let stats = BatchStats {
        total,
        succeeded: succeeded.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
        processing_time_ms: elapsed.as_secs_f64() * 1000.0,
    };
    log::debug!(
        "batch: {} document(s), {} failed, {:.2}ms",
        stats.total,
        stats.failed,
        stats.processing_time_ms
    );

    BatchProcessingResult { results, stats }
}

/// Convenience wrapper reading every path inside the workers.
pub fn process_paths<I, P>(paths: I, options: &BatchOptions) -> BatchProcessingResult
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let inputs = paths
        .into_iter()
        .map(|path| BatchInput::Path(path.into()))
        .collect();
    process_batch(inputs, options)
}

fn process_one(input: BatchInput, options: &ExtractOptions) -> BatchResult {
    let id = input.id();
    let document = match input {
        BatchInput::Document(document) => document,
        BatchInput::Path(path) => match SourceDocument::from_path(&path) {
            Ok(document) => document,
            Err(err) => {
                log::warn!("{id}: {err}");
                return BatchResult {
                    id,
                    outcome: None,
                    error: Some(err.to_string()),
                };
            }
        },
    };

    let outcome = parse_document(&document, options);
    let error = outcome.diagnostics.has_errors().then(|| {
        outcome
            .diagnostics
            .errors()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    });

    BatchResult {
        id,
        outcome: Some(outcome),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "<Editor title=\"Loops\" compare={true}>\n```js !! js\nfor (;;) {}\n```\n```go !! go\nfor {}\n```\n</Editor>\n";
    const BROKEN: &str = "<Editor title=\"Broken\">\n```js\nx\n```\n";

    fn docs() -> Vec<BatchInput> {
        vec![
            SourceDocument::with_path("a.mdx", GOOD).into(),
            SourceDocument::with_path("b.mdx", BROKEN).into(),
            SourceDocument::with_path("c.mdx", GOOD).into(),
        ]
    }

    #[test]
    fn failing_document_is_isolated() {
        let result = process_batch(docs(), &BatchOptions::default());
        assert_eq!(result.stats.total, 3);
        assert_eq!(result.stats.succeeded, 2);
        assert_eq!(result.stats.failed, 1);

        let ids: Vec<_> = result.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a.mdx", "b.mdx", "c.mdx"]);

        let broken = &result.results[1];
        assert!(broken.is_failure());
        assert!(broken.error.as_deref().unwrap().contains("unterminated <Editor> region"));
        assert!(broken.outcome.as_ref().unwrap().layout.is_empty());

        for ok in result.succeeded() {
            assert_eq!(ok.outcome.as_ref().unwrap().layout.len(), 1);
        }
    }

    #[test]
    fn stop_on_first_failure() {
        let options = BatchOptions {
            continue_on_error: Some(false),
            ..BatchOptions::default()
        };
        let result = process_batch(docs(), &options);
        assert_eq!(result.results.len(), 2);
        assert_eq!(result.stats.total, 3);
        assert_eq!(result.stats.failed, 1);
        assert_eq!(result.failed().count(), 1);
    }

    #[test]
    fn dedicated_pool() {
        let options = BatchOptions {
            max_threads: Some(2),
            ..BatchOptions::default()
        };
        let result = process_batch(docs(), &options);
        assert_eq!(result.results.len(), 3);
        assert_eq!(result.stats.succeeded, 2);
    }

    #[test]
    fn unreadable_path_becomes_failed_result() {
        let result = process_paths(["/no/such/file.mdx"], &BatchOptions::default());
        assert_eq!(result.stats.failed, 1);
        let only = &result.results[0];
        assert_eq!(only.id, "/no/such/file.mdx");
        assert!(only.outcome.is_none());
        assert!(only.error.as_deref().unwrap().starts_with("IO error"));
    }

    #[test]
    fn options_deserialize_from_json() {
        let options: BatchOptions = serde_json::from_str(
            r#"{ "maxThreads": 4, "continueOnError": false, "extract": { "roleMarker": "@@" } }"#,
        )
        .unwrap();
        assert_eq!(options.max_threads, Some(4));
        assert_eq!(options.continue_on_error, Some(false));
        assert_eq!(options.extract.role_marker, "@@");
        assert!(options.extract.recognizes("UniversalEditor"));
    }
}
