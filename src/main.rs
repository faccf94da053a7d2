mod adjust;
mod aggregate;
mod categories;
mod config;
mod extract;
mod pdf_text;
mod report;
mod totals;

use aggregate::BatchLimits;
use categories::CategoryTable;
use config::Config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // init tracing
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter("info")
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let cfg = Config::load(&config_path)?;

    let table = Arc::new(CategoryTable::load(&cfg.categories_file)?);
    info!(
        path = %cfg.categories_file,
        categories = table.len(),
        "category table loaded"
    );

    let pdf_files = list_pdf_files(Path::new(&cfg.input_folder))?;
    if pdf_files.is_empty() {
        info!(folder = %cfg.input_folder, "no PDF files in the input folder");
        return Ok(());
    }

    let limits = BatchLimits {
        max_concurrent: cfg.processing.max_concurrent.unwrap_or_else(num_cpus::get),
        document_timeout: Duration::from_secs(cfg.processing.document_timeout_secs),
    };
    info!(
        files = pdf_files.len(),
        workers = limits.max_concurrent,
        grammar_version = extract::GRAMMAR_VERSION,
        "starting batch processing"
    );

    let totals = aggregate::aggregate_batch(pdf_files, Arc::clone(&table), &limits).await;

    let output_path = Path::new(&cfg.output_file);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    report::write_report(output_path, &totals, cfg.report.include_zero_categories)?;
    info!(output = %cfg.output_file, "batch complete");

    Ok(())
}

/// PDF files in the input folder, in name order. Non-PDF entries and
/// subdirectories are skipped.
fn list_pdf_files(folder: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
