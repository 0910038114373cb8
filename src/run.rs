//! The sequential counting pipeline.
//!
//! Data flows strictly one way: byte stream → records → admitted k-mers →
//! count table → report. Each record is read, extracted, and counted
//! before the next one is touched.

use std::io::{stdout, BufRead, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::{
    cli::OutputFormat,
    config::Config,
    counts::CountTable,
    error::FqmerError,
    extract::QualityGatedKmers,
    fastq::{ParseStats, RecordReader},
    input, report,
};

/// Counts quality-gated k-mers in the FASTQ file at `path` and writes the
/// sorted report to stdout.
///
/// # Errors
///
/// Returns [`FqmerError::OpenInput`] / [`FqmerError::ReadInput`] for
/// resource failures (no partial report is emitted) and
/// [`FqmerError::WriteReport`] if the report cannot be written.
pub fn run(path: &Path, config: &Config, format: OutputFormat) -> Result<(), FqmerError> {
    let table = count_kmers(path, config)?;
    let sorted = report::sort_counts(table.snapshot());

    let mut buf = BufWriter::new(stdout());
    report::write_report(&mut buf, &sorted, format)?;
    buf.flush()
        .map_err(|source| FqmerError::WriteReport { source })?;

    Ok(())
}

/// Counts k-mers in the file at `path`, decompressing transparently when
/// the filename carries a `.gz` extension.
///
/// # Errors
///
/// Returns [`FqmerError::OpenInput`] if the file cannot be opened and
/// [`FqmerError::ReadInput`] on stream failure.
pub fn count_kmers(path: &Path, config: &Config) -> Result<CountTable, FqmerError> {
    let reader = input::open(path)?;
    count_from_reader(reader, config)
}

/// Counts k-mers from any decoded FASTQ byte source.
///
/// This is the library entry point when the data is already in memory or
/// arrives from a non-file source.
///
/// # Errors
///
/// Returns [`FqmerError::ReadInput`] on stream failure.
pub fn count_from_reader<R: BufRead>(reader: R, config: &Config) -> Result<CountTable, FqmerError> {
    let mut records = RecordReader::new(reader);
    let mut table = CountTable::new();

    for record in records.by_ref() {
        let record = record?;
        for kmer in QualityGatedKmers::new(&record, config) {
            table.increment(kmer);
        }
    }

    let ParseStats {
        records,
        separator_warnings,
        truncated_fields,
    } = records.stats();
    info!(
        records,
        separator_warnings,
        truncated_fields,
        distinct_kmers = table.distinct(),
        total_kmers = table.total(),
        "finished counting"
    );

    Ok(table)
}
