//! Quality-gated k-mer extraction.
//!
//! Slides a window of length `k` across a record's base calls, admitting a
//! window only when every parallel quality character decodes to at least
//! the configured cutoff.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use fqmer::{Config, SequenceRecord};
//! use fqmer::extract::QualityGatedKmers;
//!
//! let record = SequenceRecord {
//!     id: "r1".to_string(),
//!     bases: Bytes::from_static(b"ACGTACGT"),
//!     quality: Bytes::from_static(b"IIIIIIII"),
//!     separator_verified: true,
//! };
//! let config = Config::new(4, 0)?;
//!
//! let kmers: Vec<_> = QualityGatedKmers::new(&record, &config).collect();
//! assert_eq!(kmers.len(), 5);
//! assert_eq!(&kmers[0][..], b"ACGT");
//! # Ok::<(), fqmer::FqmerError>(())
//! ```

use bytes::Bytes;

use crate::config::Config;
use crate::fastq::SequenceRecord;

/// Lowest character of the Phred+33 quality alphabet. A quality
/// character's numeric score is its offset from this character.
pub const PHRED_OFFSET: u8 = b'!';

/// Highest score representable in Phred+33 (`'~'` minus the offset).
pub const MAX_QUALITY_SCORE: u8 = b'~' - PHRED_OFFSET;

/// Decodes one Phred+33 quality character to its numeric score.
///
/// Characters below the offset (which are not legal quality characters)
/// saturate to zero rather than wrapping.
#[must_use]
pub const fn quality_score(byte: u8) -> u8 {
    byte.saturating_sub(PHRED_OFFSET)
}

/// Lazy iterator over the admitted k-mer windows of a single record.
///
/// The window starting at `i` is admitted iff it fits within the sequence
/// and every quality character in `quality[i..i + k]` meets the cutoff.
/// Untrusted records (unverified separator, or quality not parallel to the
/// bases) yield nothing. Windows are never deduplicated: each admitted
/// position is one occurrence.
pub struct QualityGatedKmers {
    bases: Bytes,
    quality: Bytes,
    k: usize,
    cutoff: u8,
    i: usize,
}

impl QualityGatedKmers {
    /// Builds the window iterator for one record under `config`.
    #[must_use]
    pub fn new(record: &SequenceRecord, config: &Config) -> Self {
        // A record whose quality alignment cannot be trusted contributes
        // zero k-mers.
        let (bases, quality) = if record.is_trusted() {
            (record.bases.clone(), record.quality.clone())
        } else {
            (Bytes::new(), Bytes::new())
        };
        Self {
            bases,
            quality,
            k: config.k(),
            cutoff: config.quality_cutoff(),
            i: 0,
        }
    }
}

impl Iterator for QualityGatedKmers {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        while self.i + self.k <= self.bases.len() {
            let start = self.i;
            let end = start + self.k;

            // Jump past the last below-cutoff base in the window rather
            // than re-testing it k more times.
            match (start..end).rfind(|&j| quality_score(self.quality[j]) < self.cutoff) {
                None => {
                    self.i += 1;
                    return Some(self.bases.slice(start..end));
                }
                Some(bad) => self.i = bad + 1,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bases: &'static [u8], quality: &'static [u8]) -> SequenceRecord {
        SequenceRecord {
            id: "r1".to_string(),
            bases: Bytes::from_static(bases),
            quality: Bytes::from_static(quality),
            separator_verified: true,
        }
    }

    fn admitted(record: &SequenceRecord, k: usize, cutoff: u8) -> Vec<Bytes> {
        let config = Config::new(k, cutoff).unwrap();
        QualityGatedKmers::new(record, &config).collect()
    }

    #[test]
    fn high_quality_record_admits_every_window() {
        let rec = record(b"ACGTACGT", b"IIIIIIII");
        let kmers = admitted(&rec, 4, 0);
        let expected: Vec<&[u8]> = vec![b"ACGT", b"CGTA", b"GTAC", b"TACG", b"ACGT"];
        assert_eq!(kmers.len(), rec.bases.len() - 4 + 1);
        for (kmer, want) in kmers.iter().zip(expected) {
            assert_eq!(&kmer[..], want);
        }
    }

    #[test]
    fn sequence_shorter_than_k_admits_nothing() {
        let rec = record(b"ACG", b"III");
        assert!(admitted(&rec, 4, 0).is_empty());
    }

    #[test]
    fn k_equal_to_length_admits_one_window() {
        let rec = record(b"ACGT", b"IIII");
        let kmers = admitted(&rec, 4, 0);
        assert_eq!(kmers.len(), 1);
        assert_eq!(&kmers[0][..], b"ACGT");
    }

    #[test]
    fn low_quality_base_blocks_overlapping_windows() {
        // 'I' is Phred 40, '#' is Phred 2. The low base at index 3 blocks
        // every window containing it.
        let rec = record(b"ACGTACGT", b"III#IIII");
        let kmers = admitted(&rec, 4, 20);
        // Only windows starting at 4 survive: ACGT.
        assert_eq!(kmers.len(), 1);
        assert_eq!(&kmers[0][..], b"ACGT");
    }

    #[test]
    fn cutoff_is_inclusive() {
        // '5' is Phred 20 exactly.
        let rec = record(b"ACGT", b"5555");
        assert_eq!(admitted(&rec, 4, 20).len(), 1);
        assert!(admitted(&rec, 4, 21).is_empty());
    }

    #[test]
    fn raising_cutoff_never_admits_more() {
        let rec = record(b"ACGTACGTAC", b"II#5I!I5II");
        let mut previous = usize::MAX;
        for cutoff in [0, 2, 20, 40] {
            let count = admitted(&rec, 4, cutoff).len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn unverified_separator_record_admits_nothing() {
        let mut rec = record(b"ACGTACGT", b"IIIIIIII");
        rec.separator_verified = false;
        assert!(admitted(&rec, 4, 0).is_empty());
    }

    #[test]
    fn mismatched_quality_length_admits_nothing() {
        let rec = record(b"ACGTACGT", b"IIII");
        assert!(admitted(&rec, 4, 0).is_empty());
    }

    #[test]
    fn quality_score_decoding() {
        assert_eq!(quality_score(b'!'), 0);
        assert_eq!(quality_score(b'#'), 2);
        assert_eq!(quality_score(b'5'), 20);
        assert_eq!(quality_score(b'I'), 40);
        assert_eq!(quality_score(b'~'), MAX_QUALITY_SCORE);
        // Below the alphabet saturates instead of wrapping.
        assert_eq!(quality_score(b' '), 0);
    }
}
