// CSV export of report rows.

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Serialize `rows` as CSV with a header row taken from the field names.
/// With no rows, `headers` is written on its own so the file still parses.
/// Returns the number of data rows written.
pub fn write_csv<T, W>(rows: &[T], headers: &[&str], writer: W) -> Result<usize, ExportError>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        wtr.write_record(headers)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(rows.len())
}

/// Write `rows` to a CSV file at `path`, creating or truncating it.
pub fn write_csv_file<T: Serialize>(
    rows: &[T],
    headers: &[&str],
    path: &Path,
) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let n = write_csv(rows, headers, file)?;
    info!("wrote {} rows to {}", n, path.display());
    Ok(n)
}
