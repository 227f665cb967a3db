//! Reader for FASTA sequence batches using noodles.
//!
//! Extracts record ids and sequences from FASTA files.
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)
//!
//! Sequences are uppercased on read so that soft-masked (lowercase) regions
//! still match during scoring.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::warn;

/// Maximum number of records allowed in a single file (DOS protection)
pub const MAX_RECORDS: usize = 100_000;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse FASTA: {0}")]
    Fasta(String),

    #[error("No sequences found in FASTA file")]
    Empty,

    #[error("Too many records in FASTA file (limit {MAX_RECORDS})")]
    TooManyRecords,
}

/// One FASTA record: identifier from the header line plus its sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
}

/// Check if the path has a FASTA extension
#[must_use]
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    // Check for uncompressed FASTA
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read all records from a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Fasta`
/// if parsing fails, `ParseError::Empty` if no records are found, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn read_fasta_records(path: &Path) -> Result<Vec<SequenceRecord>, ParseError> {
    if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let decoder = GzDecoder::new(file);
        let reader = BufReader::new(decoder);
        read_records(&mut fasta::io::Reader::new(reader))
    } else {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        read_records(&mut fasta::io::Reader::new(reader))
    }
}

/// Read the reference sequence from a FASTA file: the first record.
///
/// The tree supports multiple reference strings, but the contamination use
/// case supplies exactly one; extra records are ignored with a warning.
///
/// # Errors
///
/// Same failure modes as [`read_fasta_records`].
pub fn read_reference(path: &Path) -> Result<SequenceRecord, ParseError> {
    let mut records = read_fasta_records(path)?;
    if records.len() > 1 {
        warn!(
            extra = records.len() - 1,
            "reference file has multiple records; using the first"
        );
    }
    Ok(records.swap_remove(0))
}

/// Read from a noodles FASTA reader
fn read_records<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record =
            result.map_err(|e| ParseError::Fasta(format!("Failed to parse FASTA record: {e}")))?;

        if records.len() >= MAX_RECORDS {
            return Err(ParseError::TooManyRecords);
        }

        let id = String::from_utf8_lossy(record.name()).to_string();
        let sequence: String = record
            .sequence()
            .as_ref()
            .iter()
            .map(|b| b.to_ascii_uppercase() as char)
            .collect();

        records.push(SequenceRecord { id, sequence });
    }

    if records.is_empty() {
        return Err(ParseError::Empty);
    }

    Ok(records)
}
