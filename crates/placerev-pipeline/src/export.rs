//! CSV export of the classified record set.
//!
//! Columns are `entityName,text,sentiment,rating` in that order. The header
//! is written even when there are no records.

use std::fs::File;
use std::io;
use std::path::Path;

use placerev_core::ClassifiedReview;

use crate::error::ExportError;

pub const CSV_HEADER: [&str; 4] = ["entityName", "text", "sentiment", "rating"];

/// Writes `records` as CSV to `writer`, one row per record.
///
/// # Errors
///
/// Returns [`ExportError`] if a row cannot be written or the writer fails
/// to flush.
pub fn write_csv<W: io::Write>(records: &[ClassifiedReview], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        let rating = record.rating().to_string();
        wtr.write_record([
            record.entity_name(),
            record.review.text.as_str(),
            record.sentiment.as_str(),
            rating.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the CSV export to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created.
pub fn write_csv_file(records: &[ClassifiedReview], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(records, io::BufWriter::new(file))?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV export");
    Ok(())
}

/// Renders the CSV export into a `String`.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization fails.
pub fn to_csv_string(records: &[ClassifiedReview]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
