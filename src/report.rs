//! Deterministic rendering of the final count report.
//!
//! The report is sorted by count descending with ties broken by
//! lexicographic k-mer order, so identical input always produces
//! byte-identical output.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::FqmerError;

/// A k-mer with its count, used for JSON serialization.
#[derive(Serialize)]
struct KmerCount<'a> {
    kmer: &'a str,
    count: u64,
}

/// Orders count pairs by count descending, ties by k-mer ascending.
#[must_use]
pub fn sort_counts(mut counts: Vec<(String, u64)>) -> Vec<(String, u64)> {
    counts.sort_unstable_by(|(kmer_a, count_a), (kmer_b, count_b)| {
        count_b.cmp(count_a).then_with(|| kmer_a.cmp(kmer_b))
    });
    counts
}

/// Writes the sorted report to `out` in the requested format.
///
/// # Errors
///
/// Returns [`FqmerError::WriteReport`] on I/O failure and
/// [`FqmerError::Json`] on serialization failure.
pub fn write_report<W: Write>(
    out: &mut W,
    counts: &[(String, u64)],
    format: OutputFormat,
) -> Result<(), FqmerError> {
    match format {
        OutputFormat::Tsv => {
            for (kmer, count) in counts {
                writeln!(out, "{kmer}\t{count}")
                    .map_err(|source| FqmerError::WriteReport { source })?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<KmerCount<'_>> = counts
                .iter()
                .map(|(kmer, count)| KmerCount {
                    kmer,
                    count: *count,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out).map_err(|source| FqmerError::WriteReport { source })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs
            .iter()
            .map(|(kmer, count)| ((*kmer).to_string(), *count))
            .collect()
    }

    #[test]
    fn sorts_by_count_descending_then_kmer_ascending() {
        let sorted = sort_counts(counts(&[
            ("TACG", 1),
            ("ACGT", 2),
            ("GTAC", 1),
            ("CGTA", 1),
        ]));
        assert_eq!(
            sorted,
            counts(&[("ACGT", 2), ("CGTA", 1), ("GTAC", 1), ("TACG", 1)])
        );
    }

    #[test]
    fn tsv_layout() {
        let sorted = sort_counts(counts(&[("ACGT", 2), ("CGTA", 1)]));
        let mut out = Vec::new();
        write_report(&mut out, &sorted, OutputFormat::Tsv).unwrap();
        assert_eq!(out, b"ACGT\t2\nCGTA\t1\n");
    }

    #[test]
    fn emission_is_idempotent() {
        let sorted = sort_counts(counts(&[("ACGT", 2), ("TACG", 1), ("CGTA", 1)]));

        let mut first = Vec::new();
        write_report(&mut first, &sorted, OutputFormat::Tsv).unwrap();
        let mut second = Vec::new();
        write_report(&mut second, &sorted, OutputFormat::Tsv).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn json_report_is_ordered_and_newline_terminated() {
        let sorted = sort_counts(counts(&[("CGTA", 1), ("ACGT", 2)]));
        let mut out = Vec::new();
        write_report(&mut out, &sorted, OutputFormat::Json).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let acgt = text.find("ACGT").unwrap();
        let cgta = text.find("CGTA").unwrap();
        assert!(acgt < cgta);
    }

    #[test]
    fn empty_report_is_empty_output() {
        let mut out = Vec::new();
        write_report(&mut out, &[], OutputFormat::Tsv).unwrap();
        assert!(out.is_empty());
    }
}
