//! Opening the input byte stream.
//!
//! The reader only ever sees decoded text; this module is where gzip
//! dispatch happens. Compression is detected by the literal `.gz` filename
//! extension, never by content sniffing. The file handle is owned by the
//! returned reader and released when it is dropped, on every exit path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::FqmerError;

/// True iff the path ends in a literal `.gz` extension.
fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Opens the FASTQ file at `path` as a buffered, decoded byte source.
///
/// # Errors
///
/// Returns [`FqmerError::OpenInput`] when the file cannot be opened.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>, FqmerError> {
    let file = File::open(path).map_err(|source| FqmerError::OpenInput {
        source,
        path: path.to_path_buf(),
    })?;

    if is_gzip_path(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
