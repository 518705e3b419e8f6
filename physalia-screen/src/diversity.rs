//! MaxMin diverse-subset selection.

use physalia_chem::{parse_smiles, tanimoto, Fingerprint};
use physalia_core::{PhysaliaError, Result};

use crate::rank::fingerprint_for;
use crate::FingerprintParams;

/// Select a diverse subset with default fingerprint parameters.
/// See [`pick_diverse_with`].
pub fn pick_diverse<S: AsRef<str>>(
    pool: &[S],
    max_picks: usize,
    threshold: f64,
) -> Result<Vec<String>> {
    pick_diverse_with(pool, max_picks, threshold, &FingerprintParams::default())
}

/// Select up to `max_picks` mutually diverse SMILES from `pool` by greedy
/// MaxMin picking, returned in selection order.
///
/// When the pool is no larger than `max_picks` it is returned verbatim, but
/// only after every element parses; a single malformed entry fails the whole
/// call with [`PhysaliaError::Parse`], because silently dropping it would
/// break the return-all contract. On the general path, malformed entries are
/// dropped the same way the ranker drops them.
///
/// The selection is seeded with the first parseable element — a deliberate,
/// deterministic bias, not a similarity-driven choice. Each following round
/// scans the remaining candidates in order, measures each one's similarity
/// to its closest selected neighbor, and takes the candidate whose closest
/// neighbor is farthest (ties go to the earliest candidate). Once even that
/// candidate is at least `threshold`-similar to the selected set, no
/// remaining candidate can be more diverse, and picking stops for good.
///
/// Runs O(n²) fingerprint comparisons; fine for the tens-to-low-thousands
/// pools this targets. `max_picks == 0` returns an empty list.
pub fn pick_diverse_with<S: AsRef<str>>(
    pool: &[S],
    max_picks: usize,
    threshold: f64,
    params: &FingerprintParams,
) -> Result<Vec<String>> {
    if max_picks == 0 || pool.is_empty() {
        return Ok(Vec::new());
    }

    if pool.len() <= max_picks {
        for smiles in pool {
            parse_smiles(smiles.as_ref())?;
        }
        return Ok(pool.iter().map(|s| s.as_ref().to_string()).collect());
    }

    // One source of truth for the eligible candidates: original string and
    // fingerprint side by side, indexed the same way everywhere below.
    let mut eligible: Vec<(&str, Fingerprint)> = Vec::with_capacity(pool.len());
    for candidate in pool {
        let smiles = candidate.as_ref();
        match fingerprint_for(smiles, params) {
            Ok(fp) => eligible.push((smiles, fp)),
            Err(PhysaliaError::Parse(_)) => continue,
            Err(err) => return Err(err),
        }
    }
    if eligible.is_empty() {
        return Ok(Vec::new());
    }

    let mut selected: Vec<usize> = vec![0];
    let mut remaining: Vec<usize> = (1..eligible.len()).collect();

    while selected.len() < max_picks && !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_score = f64::INFINITY;
        for (pos, &idx) in remaining.iter().enumerate() {
            let nearest_selected = selected
                .iter()
                .map(|&sel| tanimoto(&eligible[idx].1, &eligible[sel].1))
                .fold(f64::INFINITY, f64::min);
            // Strictly-smaller keeps the earliest candidate on ties.
            if nearest_selected < best_score {
                best_score = nearest_selected;
                best_pos = pos;
            }
        }

        if best_score >= threshold {
            break;
        }
        selected.push(remaining.remove(best_pos));
    }

    Ok(selected
        .into_iter()
        .map(|idx| eligible[idx].0.to_string())
        .collect())
}
