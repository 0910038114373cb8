//! Run configuration.
//!
//! A [`Config`] is validated once at startup and then passed explicitly
//! into the reader/extractor pipeline; there is no process-wide mutable
//! configuration state.

use crate::error::FqmerError;
use crate::extract::MAX_QUALITY_SCORE;

/// Immutable per-run configuration: the window length and the minimum
/// acceptable Phred score for every base inside an admitted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    k: usize,
    quality_cutoff: u8,
}

impl Config {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FqmerError::InvalidKmerLength`] for `k == 0` and
    /// [`FqmerError::InvalidQualityCutoff`] for cutoffs beyond the
    /// Phred+33 score range.
    pub fn new(k: usize, quality_cutoff: u8) -> Result<Self, FqmerError> {
        if k == 0 {
            return Err(FqmerError::InvalidKmerLength { k });
        }
        if quality_cutoff > MAX_QUALITY_SCORE {
            return Err(FqmerError::InvalidQualityCutoff {
                cutoff: quality_cutoff,
                max: MAX_QUALITY_SCORE,
            });
        }
        Ok(Self { k, quality_cutoff })
    }

    /// The k-mer window length.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// The minimum acceptable per-base Phred score.
    #[must_use]
    pub const fn quality_cutoff(&self) -> u8 {
        self.quality_cutoff
    }
}
