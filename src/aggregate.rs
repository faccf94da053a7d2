// src/aggregate.rs

use crate::adjust;
use crate::categories::CategoryTable;
use crate::extract::{self, LineGrammar, SECTION_MARKER};
use crate::pdf_text;
use crate::totals::CategoryTotals;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Compiled once, shared by every worker.
static LINE_GRAMMAR: LazyLock<LineGrammar> = LazyLock::new(LineGrammar::new);

/// Concurrency and deadline knobs for a batch run.
#[derive(Debug, Clone)]
pub struct BatchLimits {
    /// Worker-pool bound; independent workers, no shared mutable state.
    pub max_concurrent: usize,
    /// Per-document deadline. A document that exceeds it degrades to
    /// the same all-zero totals as a read failure.
    pub document_timeout: Duration,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_concurrent: num_cpus::get(),
            document_timeout: Duration::from_secs(60),
        }
    }
}

/// Scan already-extracted document text: locate the data section, parse
/// its line items, adjust each quantity, and accumulate into totals
/// seeded at zero for every category.
pub fn aggregate_text(text: &str, table: &CategoryTable) -> CategoryTotals {
    let mut totals = CategoryTotals::zeroed(table);
    let section = extract::locate_section(text, SECTION_MARKER);

    for item in LINE_GRAMMAR.line_items(section, table) {
        // line_items only yields codes present in the table
        let Some(category) = table.label_for(&item.code) else {
            continue;
        };
        let adjusted = adjust::adjust(item.value);
        if adjusted.zero {
            warn!(code = %item.code, category = %category, "zero quantity for matched line");
        }
        totals.add(category, adjusted.contribution);
    }

    totals
}

/// Process one document end to end. A document whose text cannot be
/// extracted yields all-zero totals: the failure is logged here and
/// absorbed, so one bad input never aborts the batch.
pub fn aggregate_document(path: &Path, table: &CategoryTable) -> CategoryTotals {
    match pdf_text::extract_document_text(path) {
        Ok(text) => aggregate_text(&text, table),
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to extract document text");
            CategoryTotals::zeroed(table)
        }
    }
}

/// Fan the batch out across a bounded pool of workers, one task per
/// document, and fold the per-document totals into one batch total.
/// The fold is element-wise addition, so completion order never
/// affects the result. Returns only after every task has finished.
pub async fn aggregate_batch(
    paths: Vec<PathBuf>,
    table: Arc<CategoryTable>,
    limits: &BatchLimits,
) -> CategoryTotals {
    aggregate_batch_with(paths, table, limits, aggregate_document).await
}

/// Batch fan-out over an injectable per-document worker.
async fn aggregate_batch_with<F>(
    paths: Vec<PathBuf>,
    table: Arc<CategoryTable>,
    limits: &BatchLimits,
    worker: F,
) -> CategoryTotals
where
    F: Fn(&Path, &CategoryTable) -> CategoryTotals + Send + Sync + 'static,
{
    let mut batch_totals = CategoryTotals::zeroed(&table);
    if paths.is_empty() {
        return batch_totals;
    }

    let worker = Arc::new(worker);
    let semaphore = Arc::new(Semaphore::new(limits.max_concurrent.max(1)));
    let document_timeout = limits.document_timeout;
    let mut tasks = JoinSet::new();

    for path in paths {
        let table = Arc::clone(&table);
        let worker = Arc::clone(&worker);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore is never closed");

            let worker_table = Arc::clone(&table);
            let worker_path = path.clone();
            let mut work = tokio::task::spawn_blocking(move || {
                let span = tracing::info_span!("document", path = %worker_path.display());
                let _guard = span.enter();
                worker(&worker_path, &worker_table)
            });

            match timeout(document_timeout, &mut work).await {
                Ok(Ok(totals)) => totals,
                Ok(Err(join_err)) => {
                    error!(path = %path.display(), error = %join_err, "document worker panicked");
                    CategoryTotals::zeroed(&table)
                }
                Err(_) => {
                    error!(
                        path = %path.display(),
                        timeout_secs = document_timeout.as_secs(),
                        "document processing timed out"
                    );
                    // The blocking worker runs to completion in the
                    // background and its result is dropped. The permit
                    // rides along so a stalled worker keeps occupying
                    // its pool slot until it actually finishes.
                    tokio::spawn(async move {
                        let _permit = permit;
                        let _ = work.await;
                    });
                    CategoryTotals::zeroed(&table)
                }
            }
        });
    }

    let mut documents = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(document_totals) => {
                batch_totals.merge(&document_totals);
                documents += 1;
            }
            Err(join_err) => {
                error!(error = %join_err, "batch task failed to join");
            }
        }
    }

    info!(documents, "batch reduction complete");
    batch_totals
}
