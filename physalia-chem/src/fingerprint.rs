//! Morgan (circular) fingerprints and the Tanimoto similarity metric.

use physalia_core::{hash, ContentAddressable};

use crate::molecule::Molecule;
use crate::ring::ring_membership;

/// A fixed-width binary feature vector, backed by 64-bit words.
///
/// Two fingerprints are only comparable when generated with the same width
/// and radius; [`tanimoto`] documents this as a precondition and does not
/// enforce it across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    words: Vec<u64>,
    nbits: usize,
}

impl Fingerprint {
    /// Create an all-zero fingerprint of `nbits` bits (`nbits > 0`).
    pub fn new(nbits: usize) -> Self {
        assert!(nbits > 0, "fingerprint width must be positive");
        Fingerprint {
            words: vec![0u64; nbits.div_ceil(64)],
            nbits,
        }
    }

    fn set(&mut self, pos: usize) {
        let pos = pos % self.nbits;
        self.words[pos / 64] |= 1u64 << (pos % 64);
    }

    /// Whether the bit at `pos` (taken modulo the width) is set.
    pub fn bit(&self, pos: usize) -> bool {
        let pos = pos % self.nbits;
        (self.words[pos / 64] >> (pos % 64)) & 1 == 1
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Width in bits.
    pub fn nbits(&self) -> usize {
        self.nbits
    }
}

impl ContentAddressable for Fingerprint {
    fn content_hash(&self) -> String {
        let mut buf = Vec::with_capacity(self.words.len() * 8);
        for word in &self.words {
            buf.extend_from_slice(&word.to_le_bytes());
        }
        hash::sha256(&buf)
    }
}

/// Compute a Morgan (ECFP-like) fingerprint.
///
/// `radius` controls the neighborhood size (2 = ECFP4, 3 = ECFP6) and
/// `nbits` the fingerprint width (commonly 2048). Pure and deterministic:
/// the same molecule and parameters always produce the same bits.
pub fn morgan_fingerprint(mol: &Molecule, radius: usize, nbits: usize) -> Fingerprint {
    let n = mol.atom_count();
    let mut fp = Fingerprint::new(nbits);
    if n == 0 {
        return fp;
    }

    let in_ring = ring_membership(mol);

    // Initial invariants: hash of local atom properties.
    let mut identifiers: Vec<u64> = mol
        .atoms
        .iter()
        .enumerate()
        .map(|(i, atom)| {
            let mut h = Fnv1a::new();
            h.update(atom.atomic_number as u64);
            h.update(mol.degree(i) as u64);
            h.update(atom.implicit_hydrogens as u64);
            h.update(atom.formal_charge as u64);
            h.update(in_ring[i] as u64);
            h.update(atom.is_aromatic as u64);
            h.finish()
        })
        .collect();

    for &id in &identifiers {
        fp.set(id as usize);
    }

    // Each round folds the sorted neighbor environment into every atom's
    // identifier, widening the captured neighborhood by one bond.
    for _ in 0..radius {
        let mut next = Vec::with_capacity(n);
        for i in 0..n {
            let mut h = Fnv1a::new();
            h.update(identifiers[i]);

            let mut neighborhood: Vec<(u64, u8)> = mol.adjacency[i]
                .iter()
                .map(|&(neighbor, bond_idx)| {
                    (identifiers[neighbor], mol.bonds[bond_idx].order as u8)
                })
                .collect();
            neighborhood.sort_unstable();

            for (nid, order) in &neighborhood {
                h.update(*nid);
                h.update(*order as u64);
            }

            let id = h.finish();
            next.push(id);
            fp.set(id as usize);
        }
        identifiers = next;
    }

    fp
}

/// Tanimoto similarity coefficient between two fingerprints.
///
/// Defined as `|A ∩ B| / |A ∪ B|` over the set bits; always in `[0, 1]`,
/// exactly symmetric, and 1.0 for bit-identical inputs. Two all-zero
/// fingerprints compare as 1.0 (the 0/0 case reads as identical).
///
/// Precondition: both fingerprints were generated with the same width;
/// mismatched widths are outside the contract.
pub fn tanimoto(a: &Fingerprint, b: &Fingerprint) -> f64 {
    debug_assert_eq!(a.nbits, b.nbits, "fingerprints must have the same width");

    let mut intersection = 0u32;
    let mut union = 0u32;
    for (wa, wb) in a.words.iter().zip(b.words.iter()) {
        intersection += (wa & wb).count_ones();
        union += (wa | wb).count_ones();
    }

    if union == 0 {
        return 1.0;
    }
    intersection as f64 / union as f64
}

/// Tanimoto similarity of a query against each of `targets`, in order.
pub fn tanimoto_bulk(query: &Fingerprint, targets: &[Fingerprint]) -> Vec<f64> {
    targets.iter().map(|t| tanimoto(query, t)).collect()
}

// FNV-1a over little-endian u64 values, for deterministic invariant hashing.
struct Fnv1a(u64);

impl Fnv1a {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Fnv1a(Self::OFFSET)
    }

    fn update(&mut self, value: u64) {
        for byte in value.to_le_bytes() {
            self.0 ^= byte as u64;
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    #[test]
    fn bit_operations() {
        let mut fp = Fingerprint::new(128);
        assert!(!fp.bit(42));
        fp.set(42);
        assert!(fp.bit(42));
        fp.set(100);
        assert_eq!(fp.count_ones(), 2);
        assert_eq!(fp.nbits(), 128);
    }

    #[test]
    fn width_rounds_up_to_words() {
        let fp = Fingerprint::new(100);
        assert_eq!(fp.words.len(), 2);
        assert_eq!(fp.nbits(), 100);
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let mol = parse_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        let fp1 = morgan_fingerprint(&mol, 2, 2048);
        let fp2 = morgan_fingerprint(&mol, 2, 2048);
        assert_eq!(fp1, fp2);
        assert_eq!(fp1.content_hash(), fp2.content_hash());
    }

    #[test]
    fn tanimoto_identical_is_one() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        let fp = morgan_fingerprint(&mol, 2, 2048);
        assert!(fp.count_ones() > 0);
        assert_eq!(tanimoto(&fp, &fp), 1.0);
    }

    #[test]
    fn tanimoto_related_in_open_interval() {
        let fp1 = morgan_fingerprint(&parse_smiles("CCO").unwrap(), 2, 2048);
        let fp2 = morgan_fingerprint(&parse_smiles("CCCO").unwrap(), 2, 2048);
        let sim = tanimoto(&fp1, &fp2);
        assert!(sim > 0.0 && sim < 1.0, "tanimoto = {sim}");
    }

    #[test]
    fn tanimoto_empty_pair_is_one() {
        let a = Fingerprint::new(2048);
        let b = Fingerprint::new(2048);
        assert_eq!(tanimoto(&a, &b), 1.0);
    }

    #[test]
    fn bulk_matches_pairwise() {
        let fps: Vec<Fingerprint> = ["CCO", "CC", "c1ccccc1"]
            .iter()
            .map(|s| morgan_fingerprint(&parse_smiles(s).unwrap(), 2, 2048))
            .collect();
        let bulk = tanimoto_bulk(&fps[0], &fps);
        assert_eq!(bulk.len(), 3);
        assert_eq!(bulk[0], 1.0);
        assert_eq!(bulk[2], tanimoto(&fps[0], &fps[2]));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::smiles::parse_smiles;
    use proptest::prelude::*;

    fn chain_smiles() -> impl Strategy<Value = String> {
        let atoms = prop_oneof![Just("C"), Just("N"), Just("O"), Just("S")];
        proptest::collection::vec(atoms, 1..=16).prop_map(|parts| parts.join(""))
    }

    proptest! {
        #[test]
        fn symmetry(a in chain_smiles(), b in chain_smiles()) {
            let fa = morgan_fingerprint(&parse_smiles(&a).unwrap(), 2, 2048);
            let fb = morgan_fingerprint(&parse_smiles(&b).unwrap(), 2, 2048);
            prop_assert_eq!(tanimoto(&fa, &fb), tanimoto(&fb, &fa));
        }

        #[test]
        fn identity(a in chain_smiles()) {
            let fa = morgan_fingerprint(&parse_smiles(&a).unwrap(), 2, 2048);
            prop_assert_eq!(tanimoto(&fa, &fa), 1.0);
        }

        #[test]
        fn bounded(a in chain_smiles(), b in chain_smiles()) {
            let fa = morgan_fingerprint(&parse_smiles(&a).unwrap(), 2, 2048);
            let fb = morgan_fingerprint(&parse_smiles(&b).unwrap(), 2, 2048);
            let sim = tanimoto(&fa, &fb);
            prop_assert!((0.0..=1.0).contains(&sim));
        }
    }
}
