//! fqmer: a quality-aware k-mer counter for short reads in FASTQ files.
//!
//! The pipeline is strictly sequential: a streaming FASTQ parser
//! ([`fastq::RecordReader`]) yields one record at a time, a quality gate
//! ([`extract::QualityGatedKmers`]) admits the windows whose every base
//! meets the configured Phred cutoff, and a [`counts::CountTable`]
//! accumulates occurrences until the sorted report is emitted.
//!
//! Input may be plain text or gzip-compressed; compression is dispatched
//! on the `.gz` filename extension by [`input::open`].
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use fqmer::{count_from_reader, Config};
//!
//! let fastq = b"@r1\nACGTACGT\n+\nIIIIIIII\n";
//! let config = Config::new(4, 20)?;
//!
//! let table = count_from_reader(Cursor::new(&fastq[..]), &config)?;
//! assert_eq!(table.get(b"ACGT"), 2);
//! assert_eq!(table.distinct(), 4);
//! # Ok::<(), fqmer::FqmerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod counts;
pub mod error;
pub mod extract;
pub mod fastq;
pub mod input;
pub mod report;
pub mod run;

pub use cli::OutputFormat;
pub use config::Config;
pub use counts::CountTable;
pub use error::FqmerError;
pub use fastq::{RecordReader, SequenceRecord};
pub use run::{count_from_reader, count_kmers};
