//! Streaming FASTQ record parsing.
//!
//! [`RecordReader`] consumes a decoded byte source one character at a time
//! and yields validated four-line records. It never loads more than one
//! record into memory, and it survives malformed input: separator-line
//! problems flag the affected record rather than aborting the stream, and
//! over-long fields are truncated with the rest of the physical line
//! discarded so the parser stays synchronized.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use fqmer::fastq::RecordReader;
//!
//! let fastq = b"@r1 a description\nacgt\n+\nIIII\n";
//! let mut reader = RecordReader::new(Cursor::new(&fastq[..]));
//!
//! let record = reader.next().unwrap()?;
//! assert_eq!(record.id, "r1");
//! assert_eq!(&record.bases[..], b"ACGT");
//! assert_eq!(&record.quality[..], b"IIII");
//! assert!(reader.next().is_none());
//! # Ok::<(), fqmer::FqmerError>(())
//! ```

use std::io::{self, BufRead};

use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::FqmerError;

/// Longest record id retained; further characters are dropped.
pub const MAX_ID_LEN: usize = 255;

/// Longest sequence or quality field retained; the remainder of the
/// physical line is discarded so the stream does not desynchronize.
pub const MAX_SEQ_LEN: usize = 1023;

/// One FASTQ record: id, base calls, and the parallel quality string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Record identifier from the header line, without the leading `@` and
    /// without the free-text description.
    pub id: String,
    /// Base calls, upper-cased, whitespace stripped.
    pub bases: Bytes,
    /// Quality characters, whitespace stripped, no case transformation.
    pub quality: Bytes,
    /// False when the `+` separator line was malformed. The
    /// sequence/quality alignment of such a record cannot be trusted.
    pub separator_verified: bool,
}

impl SequenceRecord {
    /// True when the record's k-mers may be counted: the separator was
    /// verified and the quality string is parallel to the base calls.
    #[must_use]
    pub fn is_trusted(&self) -> bool {
        self.separator_verified && self.bases.len() == self.quality.len()
    }
}

/// Counters accumulated while parsing a stream, reported at end of run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Records emitted, trusted or not.
    pub records: u64,
    /// Records whose quality separator line did not begin with `+`.
    pub separator_warnings: u64,
    /// Id, sequence, or quality fields that exceeded their maximum length.
    pub truncated_fields: u64,
}

/// Streaming reader producing [`SequenceRecord`]s from a byte source.
///
/// The source is expected to already be decoded text; transparent gzip
/// decompression is the job of [`crate::input`]. The stream terminates
/// cleanly at end-of-input on a record boundary. A record head that is not
/// `@` marks the definitive end of usable input: a warning is logged and
/// the iterator ends rather than guessing at a resynchronization point.
pub struct RecordReader<R> {
    inner: R,
    stats: ParseStats,
    saw_eof: bool,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            stats: ParseStats::default(),
            saw_eof: false,
            done: false,
        }
    }

    /// Parse statistics accumulated so far.
    #[must_use]
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let buf = self.inner.fill_buf()?;
        match buf.first().copied() {
            Some(byte) => {
                self.inner.consume(1);
                Ok(Some(byte))
            }
            None => {
                self.saw_eof = true;
                Ok(None)
            }
        }
    }

    /// Consumes bytes up to and including the next newline, returning
    /// whether any non-whitespace content was dropped.
    fn discard_rest_of_line(&mut self) -> io::Result<bool> {
        let mut dropped = false;
        while let Some(byte) = self.next_byte()? {
            if byte == b'\n' {
                break;
            }
            if !byte.is_ascii_whitespace() {
                dropped = true;
            }
        }
        Ok(dropped)
    }

    /// Reads the record id: non-whitespace characters up to [`MAX_ID_LEN`].
    /// The remainder of the header line (the optional description) is
    /// discarded. Returns the id and whether it was truncated.
    fn read_id(&mut self) -> io::Result<(String, bool)> {
        let mut id = String::new();
        let mut truncated = false;
        loop {
            match self.next_byte()? {
                None | Some(b'\n') => break,
                Some(byte) if byte.is_ascii_whitespace() => {
                    self.discard_rest_of_line()?;
                    break;
                }
                Some(byte) => {
                    if id.len() < MAX_ID_LEN {
                        id.push(char::from(byte));
                    } else {
                        truncated = true;
                    }
                }
            }
        }
        Ok((id, truncated))
    }

    /// Reads a sequence or quality field: whitespace skipped, capped at
    /// [`MAX_SEQ_LEN`]. On overflow the rest of the physical line is
    /// discarded. Returns the field and whether content was dropped.
    fn read_field(&mut self, uppercase: bool) -> io::Result<(Vec<u8>, bool)> {
        let mut field = Vec::new();
        let mut truncated = false;
        loop {
            match self.next_byte()? {
                None | Some(b'\n') => break,
                Some(byte) if byte.is_ascii_whitespace() => {}
                Some(byte) => {
                    field.push(if uppercase {
                        byte.to_ascii_uppercase()
                    } else {
                        byte
                    });
                    if field.len() == MAX_SEQ_LEN {
                        truncated = self.discard_rest_of_line()?;
                        break;
                    }
                }
            }
        }
        Ok((field, truncated))
    }

    fn note_truncation(&mut self, id: &str, field: &str) {
        self.stats.truncated_fields += 1;
        debug!(id, field, "field exceeded maximum length and was truncated");
    }

    /// Reads the next record, or `None` at the end of usable input.
    fn read_record(&mut self) -> Result<Option<SequenceRecord>, FqmerError> {
        // ExpectHeader
        let head = match self.next_byte().map_err(read_failed)? {
            None => return Ok(None),
            Some(byte) => byte,
        };
        if head != b'@' {
            warn!(
                byte = head,
                "record does not begin with '@'; treating remaining input as unusable"
            );
            return Ok(None);
        }

        // ReadID
        let (id, id_truncated) = self.read_id().map_err(read_failed)?;
        if id_truncated {
            self.note_truncation(&id, "id");
        }

        // ReadSequence
        let (bases, seq_truncated) = self.read_field(true).map_err(read_failed)?;
        if seq_truncated {
            self.note_truncation(&id, "sequence");
        }

        // ExpectPlus
        let mut separator_verified = true;
        match self.next_byte().map_err(read_failed)? {
            None => {}
            Some(b'+') => {
                self.discard_rest_of_line().map_err(read_failed)?;
            }
            Some(_) => {
                separator_verified = false;
                self.stats.separator_warnings += 1;
                warn!(id = %id, "quality separator line does not begin with '+'");
                self.discard_rest_of_line().map_err(read_failed)?;
            }
        }

        // ReadQuality
        let (quality, qual_truncated) = self.read_field(false).map_err(read_failed)?;
        if qual_truncated {
            self.note_truncation(&id, "quality");
        }

        // A record cut short by end-of-stream is only worth emitting once
        // it has an id and some sequence.
        if self.saw_eof && (id.is_empty() || bases.is_empty()) {
            return Ok(None);
        }

        Ok(Some(SequenceRecord {
            id,
            bases: Bytes::from(bases),
            quality: Bytes::from(quality),
            separator_verified,
        }))
    }
}

fn read_failed(source: io::Error) -> FqmerError {
    FqmerError::ReadInput { source }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<SequenceRecord, FqmerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => {
                self.stats.records += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
