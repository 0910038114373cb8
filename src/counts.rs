//! K-mer occurrence counting.
//!
//! [`CountTable`] is the only mutable state in the pipeline, touched once
//! per admitted k-mer. It is backed by a dynamically growing hash map with
//! [`FxHasher`](rustc_hash::FxHasher) for cheap hashing of short keys;
//! capacity grows amortized with the number of distinct k-mers actually
//! observed, never pre-sized to the theoretical key space.

use bytes::Bytes;
use rustc_hash::FxHashMap;

/// Per-k-mer occurrence counts for a whole run.
#[derive(Debug, Default)]
pub struct CountTable {
    counts: FxHashMap<Bytes, u64>,
}

impl CountTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `kmer`, creating the entry at 1 if absent.
    pub fn increment(&mut self, kmer: Bytes) {
        *self.counts.entry(kmer).or_insert(0) += 1;
    }

    /// The count recorded for `kmer`, zero if unseen.
    #[must_use]
    pub fn get(&self, kmer: &[u8]) -> u64 {
        self.counts.get(kmer).copied().unwrap_or(0)
    }

    /// Number of distinct k-mers observed.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total occurrences across all k-mers.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The full k-mer → count mapping as owned pairs, in no particular
    /// order. Ordering is imposed only at report time.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        self.counts
            .iter()
            .map(|(kmer, &count)| (String::from_utf8_lossy(kmer).into_owned(), count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_creates_then_accumulates() {
        let mut table = CountTable::new();
        assert_eq!(table.get(b"ACGT"), 0);

        table.increment(Bytes::from_static(b"ACGT"));
        assert_eq!(table.get(b"ACGT"), 1);

        table.increment(Bytes::from_static(b"ACGT"));
        assert_eq!(table.get(b"ACGT"), 2);
        assert_eq!(table.distinct(), 1);
        assert_eq!(table.total(), 2);
    }

    #[test]
    fn distinct_keys_are_independent() {
        let mut table = CountTable::new();
        table.increment(Bytes::from_static(b"ACGT"));
        table.increment(Bytes::from_static(b"CGTA"));

        assert_eq!(table.distinct(), 2);
        assert_eq!(table.get(b"ACGT"), 1);
        assert_eq!(table.get(b"CGTA"), 1);
    }

    #[test]
    fn snapshot_does_not_mutate() {
        let mut table = CountTable::new();
        table.increment(Bytes::from_static(b"ACGT"));

        let first = table.snapshot();
        let second = table.snapshot();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(table.get(b"ACGT"), 1);
    }

    #[test]
    fn empty_table() {
        let table = CountTable::new();
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.total(), 0);
        assert!(table.snapshot().is_empty());
    }
}
