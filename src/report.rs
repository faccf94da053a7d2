use crate::totals::CategoryTotals;
use std::path::Path;
use tracing::info;

/// Column headers of the rendered report.
const HEADERS: [&str; 2] = ["Kolor", "Suma (m)"];

/// Render batch totals to a CSV file, one row per category in label
/// order. With `include_zero_categories` off, categories that never
/// contributed are dropped from the file; they remain in the totals.
pub fn write_report(
    path: &Path,
    totals: &CategoryTotals,
    include_zero_categories: bool,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADERS)?;

    let mut rows = 0usize;
    for (category, total) in totals.iter() {
        if !include_zero_categories && total == 0.0 {
            continue;
        }
        writer.write_record([category, format!("{total:.2}").as_str()])?;
        rows += 1;
    }
    writer.flush()?;

    info!(
        path = %path.display(),
        rows,
        categories = totals.len(),
        "report written"
    );
    Ok(())
}
