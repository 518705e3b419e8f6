//! Molecular structure support for the physalia compound-triage toolkit.
//!
//! Provides a molecular graph representation, a SMILES parser, and Morgan
//! (circular) fingerprints with Tanimoto similarity. This crate is the
//! structure collaborator consumed by `physalia-screen`; it deliberately
//! stops at what a fingerprint and a similarity metric require — no
//! canonicalization, no stereochemistry, no descriptors.
//!
//! # Example
//!
//! ```
//! use physalia_chem::{morgan_fingerprint, parse_smiles, tanimoto};
//!
//! let ethanol = parse_smiles("CCO").unwrap();
//! assert_eq!(ethanol.atom_count(), 3);
//!
//! let fp1 = morgan_fingerprint(&ethanol, 2, 2048);
//! let fp2 = morgan_fingerprint(&ethanol, 2, 2048);
//! assert!((tanimoto(&fp1, &fp2) - 1.0).abs() < 1e-12);
//! ```

pub mod element;
pub mod fingerprint;
pub mod molecule;
pub mod smiles;

mod ring;

pub use element::{element_by_number, element_by_symbol, Element};
pub use fingerprint::{morgan_fingerprint, tanimoto, tanimoto_bulk, Fingerprint};
pub use molecule::{Atom, Bond, BondOrder, Molecule};
pub use smiles::{parse_smiles, parse_smiles_named};
