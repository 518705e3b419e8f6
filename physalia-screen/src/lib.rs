//! Similarity ranking and diversity selection for compound triage.
//!
//! Operates on SMILES candidate pools via Morgan fingerprints and the
//! Tanimoto metric from `physalia-chem`. Two entry points:
//!
//! - [`rank_by_similarity`] — score a pool against a query and return the
//!   top hits, best first.
//! - [`pick_diverse`] — greedily select a subset maximizing minimum pairwise
//!   distance (MaxMin picking), for chemical-space coverage.
//!
//! Every call is pure and synchronous: fingerprints are recomputed from the
//! SMILES input each time, and nothing is cached or shared between calls.
//!
//! # Example
//!
//! ```
//! use physalia_screen::{pick_diverse, rank_by_similarity};
//!
//! let ranked = rank_by_similarity("CCO", &["CCCO", "CC", "c1ccccc1"], 2).unwrap();
//! assert_eq!(ranked.len(), 2);
//! assert!(ranked[0].score >= ranked[1].score);
//!
//! // Pools no larger than the requested count come back unchanged.
//! let subset = pick_diverse(&["CCO", "CCCO"], 10, 0.4).unwrap();
//! assert_eq!(subset, vec!["CCO".to_string(), "CCCO".to_string()]);
//! ```

mod diversity;
mod rank;

pub use diversity::{pick_diverse, pick_diverse_with};
pub use rank::{rank_by_similarity, rank_by_similarity_with, tanimoto_between, RankedCandidate};

/// Default Morgan fingerprint radius (ECFP4).
pub const DEFAULT_RADIUS: usize = 2;

/// Default fingerprint width in bits.
pub const DEFAULT_NBITS: usize = 2048;

/// Default number of ranked results returned.
pub const DEFAULT_TOP_K: usize = 10;

/// Default diverse-subset size.
pub const DEFAULT_MAX_PICKS: usize = 10;

/// Default picker stopping threshold: once even the most diverse remaining
/// candidate is at least this similar to the selected set, picking stops.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.4;

/// Morgan fingerprint generation parameters.
///
/// Results from different parameter sets are not comparable; use one set per
/// ranking or picking call (the functions here guarantee that internally).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerprintParams {
    pub radius: usize,
    pub nbits: usize,
}

impl Default for FingerprintParams {
    fn default() -> Self {
        FingerprintParams {
            radius: DEFAULT_RADIUS,
            nbits: DEFAULT_NBITS,
        }
    }
}
