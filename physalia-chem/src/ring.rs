//! Ring membership detection.

use std::collections::VecDeque;

use crate::molecule::Molecule;

/// Mark which atoms sit in a ring, by iteratively pruning terminal
/// (degree <= 1) atoms until only cycles remain.
///
/// The fingerprint invariants only need membership, not the ring systems
/// themselves, so no SSSR perception is done here.
pub fn ring_membership(mol: &Molecule) -> Vec<bool> {
    let n = mol.atom_count();
    let mut degree: Vec<usize> = (0..n).map(|i| mol.adjacency[i].len()).collect();

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| degree[i] <= 1).collect();
    let mut pruned = vec![false; n];

    while let Some(atom) = queue.pop_front() {
        if pruned[atom] {
            continue;
        }
        pruned[atom] = true;
        for &(neighbor, _) in &mol.adjacency[atom] {
            if !pruned[neighbor] {
                degree[neighbor] -= 1;
                if degree[neighbor] <= 1 {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    pruned.iter().map(|&p| !p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    #[test]
    fn benzene_all_ring() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        let ring = ring_membership(&mol);
        assert_eq!(ring, vec![true; 6]);
    }

    #[test]
    fn toluene_methyl_outside() {
        let mol = parse_smiles("Cc1ccccc1").unwrap();
        let ring = ring_membership(&mol);
        assert!(!ring[0]);
        assert!(ring[1..].iter().all(|&r| r));
    }

    #[test]
    fn acyclic_no_ring_atoms() {
        let mol = parse_smiles("CCCC").unwrap();
        assert!(ring_membership(&mol).iter().all(|&r| !r));
    }

    #[test]
    fn fused_rings_all_members() {
        // Naphthalene
        let mol = parse_smiles("c1ccc2ccccc2c1").unwrap();
        assert!(ring_membership(&mol).iter().all(|&r| r));
    }
}
