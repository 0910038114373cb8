//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// A quality-aware k-mer counter for short reads in FASTQ files.
#[derive(Parser, Debug)]
#[command(name = "fqmer")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// K-mer length (at least 1)
    #[arg(value_parser = parse_k)]
    pub k: usize,

    /// Path to a FASTQ file, optionally gzip-compressed (.gz)
    pub path: PathBuf,

    /// Minimum per-base Phred score; windows containing any base below
    /// this are not counted
    #[arg(short = 'q', long, default_value = "0")]
    pub min_quality: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub format: OutputFormat,

    /// Suppress informational output (only emit the count report)
    #[arg(long)]
    pub quiet: bool,
}

/// Output format for k-mer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Tab-separated values (kmer\tcount), count descending then k-mer
    /// ascending
    #[default]
    Tsv,
    /// JSON array of {kmer, count} objects in the same order
    Json,
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if k == 0 {
        return Err("k-mer length must be at least 1".to_string());
    }
    Ok(k)
}
