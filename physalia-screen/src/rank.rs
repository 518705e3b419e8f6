//! Tanimoto similarity ranking of candidate pools against a query.

use physalia_chem::{morgan_fingerprint, parse_smiles, tanimoto, Fingerprint};
use physalia_core::{PhysaliaError, Result, Scored};
use serde::Serialize;

use crate::FingerprintParams;

/// A candidate SMILES with its Tanimoto similarity to the query.
///
/// Serializes directly to tabular rows for downstream export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub smiles: String,
    pub score: f64,
}

impl Scored for RankedCandidate {
    fn score(&self) -> f64 {
        self.score
    }
}

/// Rank `candidates` by Tanimoto similarity to `query`, best first, using
/// default fingerprint parameters. See [`rank_by_similarity_with`].
pub fn rank_by_similarity<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    top_k: usize,
) -> Result<Vec<RankedCandidate>> {
    rank_by_similarity_with(query, candidates, top_k, &FingerprintParams::default())
}

/// Rank `candidates` by Tanimoto similarity to `query`, best first.
///
/// The query is strict: a malformed query SMILES fails the whole call with
/// [`PhysaliaError::Parse`]. Candidates are lenient: pool entries that fail
/// to parse are silently dropped, since candidate pools routinely come from
/// noisy external datasets. Only the parse-failure kind is swallowed;
/// anything else propagates.
///
/// The sort is stable, so candidates with equal scores keep their input
/// order, and output is truncated to at most `top_k` entries. `top_k == 0`
/// returns an empty list rather than an error.
pub fn rank_by_similarity_with<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    top_k: usize,
    params: &FingerprintParams,
) -> Result<Vec<RankedCandidate>> {
    let query_fp = fingerprint_for(query, params)?;
    if top_k == 0 {
        return Ok(Vec::new());
    }

    let mut ranked = Vec::new();
    for candidate in candidates {
        let smiles = candidate.as_ref();
        let fp = match fingerprint_for(smiles, params) {
            Ok(fp) => fp,
            Err(PhysaliaError::Parse(_)) => continue,
            Err(err) => return Err(err),
        };
        ranked.push(RankedCandidate {
            smiles: smiles.to_string(),
            score: tanimoto(&query_fp, &fp),
        });
    }

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_k);
    Ok(ranked)
}

/// Tanimoto similarity between two SMILES strings, with default fingerprint
/// parameters. Strict on both inputs.
pub fn tanimoto_between(a: &str, b: &str) -> Result<f64> {
    let params = FingerprintParams::default();
    let fa = fingerprint_for(a, &params)?;
    let fb = fingerprint_for(b, &params)?;
    Ok(tanimoto(&fa, &fb))
}

/// Parse and fingerprint one SMILES string.
pub(crate) fn fingerprint_for(smiles: &str, params: &FingerprintParams) -> Result<Fingerprint> {
    let mol = parse_smiles(smiles)?;
    Ok(morgan_fingerprint(&mol, params.radius, params.nbits))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const VOCABULARY: &[&str] = &[
        "CCO", "CC", "CCC", "CCCO", "c1ccccc1", "CC(C)C", "C(=O)(N)N", "c1ccncc1", "CCN", "CO",
    ];

    fn pool() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(
            proptest::sample::select(VOCABULARY).prop_map(str::to_string),
            0..=24,
        )
    }

    proptest! {
        #[test]
        fn truncation_bound(pool in pool(), top_k in 0usize..=30) {
            let ranked = rank_by_similarity("CCO", &pool, top_k).unwrap();
            prop_assert_eq!(ranked.len(), top_k.min(pool.len()));
        }

        #[test]
        fn scores_descending(pool in pool()) {
            let ranked = rank_by_similarity("CCO", &pool, pool.len()).unwrap();
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }

        #[test]
        fn scores_bounded(pool in pool()) {
            let ranked = rank_by_similarity("CCO", &pool, pool.len()).unwrap();
            for r in &ranked {
                prop_assert!((0.0..=1.0).contains(&r.score));
            }
        }
    }
}
