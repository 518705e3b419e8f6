//! SMILES string parser.

use std::collections::BTreeMap;

use physalia_core::{PhysaliaError, Result};

use crate::element::{element_by_number, element_by_symbol};
use crate::molecule::{Atom, Bond, BondOrder, Molecule};

/// Parse a SMILES string into a [`Molecule`].
pub fn parse_smiles(smiles: &str) -> Result<Molecule> {
    parse_smiles_named(smiles, "")
}

/// Parse a SMILES string into a [`Molecule`] with a given name.
pub fn parse_smiles_named(smiles: &str, name: &str) -> Result<Molecule> {
    let mut parser = Parser::new(smiles);
    parser.run()?;
    parser.finish()?;
    parser.assign_implicit_hydrogens();
    Ok(Molecule::new(name.to_string(), parser.atoms, parser.bonds))
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// Marks atoms written in brackets; their hydrogen count is explicit.
    bracket: Vec<bool>,
    /// open_rings[number] = (atom_idx, bond symbol seen at the opening)
    open_rings: BTreeMap<u16, (usize, Option<BondOrder>)>,
    branch_stack: Vec<usize>,
    prev: Option<usize>,
    pending_bond: Option<BondOrder>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            input: input.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            bracket: Vec::new(),
            open_rings: BTreeMap::new(),
            branch_stack: Vec::new(),
            prev: None,
            pending_bond: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn err(&self, msg: impl Into<String>) -> PhysaliaError {
        PhysaliaError::Parse(msg.into())
    }

    fn run(&mut self) -> Result<()> {
        while let Some(ch) = self.peek() {
            match ch {
                b'(' => {
                    self.bump();
                    let prev = self
                        .prev
                        .ok_or_else(|| self.err("branch with no preceding atom"))?;
                    self.branch_stack.push(prev);
                }
                b')' => {
                    self.bump();
                    let parent = self
                        .branch_stack
                        .pop()
                        .ok_or_else(|| self.err("unmatched ')' in SMILES"))?;
                    self.prev = Some(parent);
                    self.pending_bond = None;
                }
                b'-' => {
                    self.bump();
                    self.pending_bond = Some(BondOrder::Single);
                }
                b'=' => {
                    self.bump();
                    self.pending_bond = Some(BondOrder::Double);
                }
                b'#' => {
                    self.bump();
                    self.pending_bond = Some(BondOrder::Triple);
                }
                b':' => {
                    self.bump();
                    self.pending_bond = Some(BondOrder::Aromatic);
                }
                // Stereo bond markers are accepted and ignored.
                b'/' | b'\\' => {
                    self.bump();
                }
                b'.' => {
                    self.bump();
                    self.prev = None;
                    self.pending_bond = None;
                }
                b'%' => {
                    self.bump();
                    let ring = self.two_digit_ring()?;
                    self.ring_closure(ring)?;
                }
                b'[' => self.bracket_atom()?,
                b'0'..=b'9' => {
                    self.bump();
                    self.ring_closure((ch - b'0') as u16)?;
                }
                _ if is_organic_atom_start(ch) => self.organic_atom()?,
                _ => {
                    return Err(self.err(format!(
                        "unexpected character '{}' at position {}",
                        ch as char, self.pos
                    )));
                }
            }
        }
        Ok(())
    }

    /// An atom of the organic subset, written without brackets.
    fn organic_atom(&mut self) -> Result<()> {
        let ch = self.bump().ok_or_else(|| self.err("unexpected end of SMILES"))?;
        let is_aromatic = ch.is_ascii_lowercase();
        let upper = ch.to_ascii_uppercase();

        // Two-letter organic-subset symbols are only spelled in uppercase.
        let symbol = match (upper, self.peek()) {
            (b'B', Some(b'r')) if !is_aromatic => {
                self.bump();
                "Br"
            }
            (b'C', Some(b'l')) if !is_aromatic => {
                self.bump();
                "Cl"
            }
            (b'S', Some(b'i')) if !is_aromatic => {
                self.bump();
                "Si"
            }
            (b'S', Some(b'e')) if !is_aromatic => {
                self.bump();
                "Se"
            }
            (b'B', _) => "B",
            (b'C', _) => "C",
            (b'N', _) => "N",
            (b'O', _) => "O",
            (b'P', _) => "P",
            (b'S', _) => "S",
            (b'F', _) => "F",
            (b'I', _) => "I",
            _ => {
                return Err(self.err(format!("unknown organic atom '{}'", upper as char)));
            }
        };

        let elem = element_by_symbol(symbol)
            .ok_or_else(|| self.err(format!("unknown element '{symbol}'")))?;

        self.push_atom(
            Atom {
                atomic_number: elem.atomic_number,
                formal_charge: 0,
                isotope: None,
                is_aromatic,
                implicit_hydrogens: 0, // assigned after parsing
            },
            false,
        )
    }

    /// A bracket atom: `[isotope? symbol chirality? Hcount? charge?]`.
    fn bracket_atom(&mut self) -> Result<()> {
        self.bump(); // consume '['

        let isotope = match self.number() {
            Some(n) if n > u16::MAX as u32 => {
                return Err(self.err(format!("isotope {n} out of range")));
            }
            other => other.map(|n| n as u16),
        };

        let ch = self
            .bump()
            .ok_or_else(|| self.err("unexpected end of SMILES in bracket atom"))?;
        let is_aromatic = ch.is_ascii_lowercase();
        let upper = ch.to_ascii_uppercase();

        // Prefer a two-letter symbol when the next character completes one.
        let symbol = match self.peek() {
            Some(next) if next.is_ascii_lowercase() => {
                let two = format!("{}{}", upper as char, next as char);
                if element_by_symbol(&two).is_some() {
                    self.bump();
                    two
                } else {
                    (upper as char).to_string()
                }
            }
            _ => (upper as char).to_string(),
        };

        let elem = element_by_symbol(&symbol)
            .ok_or_else(|| self.err(format!("unknown element '{symbol}'")))?;

        // Chirality markers are accepted and ignored.
        while self.peek() == Some(b'@') {
            self.bump();
        }

        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.bump();
            hydrogens = match self.peek() {
                Some(d) if d.is_ascii_digit() => {
                    self.bump();
                    d - b'0'
                }
                _ => 1,
            };
        }

        let charge = match self.peek() {
            Some(sign @ (b'+' | b'-')) => {
                self.bump();
                self.charge_magnitude(sign)
            }
            _ => 0,
        };

        if self.bump() != Some(b']') {
            return Err(self.err("expected ']' in bracket atom"));
        }

        self.push_atom(
            Atom {
                atomic_number: elem.atomic_number,
                formal_charge: charge,
                isotope,
                is_aromatic,
                implicit_hydrogens: hydrogens,
            },
            true,
        )
    }

    /// Charge magnitude after a consumed sign: a digit, repeated signs, or 1.
    fn charge_magnitude(&mut self, sign: u8) -> i8 {
        let mut magnitude: i8 = 1;
        if let Some(d) = self.peek() {
            if d.is_ascii_digit() {
                self.bump();
                magnitude = (d - b'0') as i8;
            } else {
                while self.peek() == Some(sign) {
                    self.bump();
                    magnitude = magnitude.saturating_add(1);
                }
            }
        }
        if sign == b'-' {
            -magnitude
        } else {
            magnitude
        }
    }

    fn number(&mut self) -> Option<u32> {
        let mut n: u32 = 0;
        let mut found = false;
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.bump();
            n = n.saturating_mul(10).saturating_add((ch - b'0') as u32);
            found = true;
        }
        found.then_some(n)
    }

    fn two_digit_ring(&mut self) -> Result<u16> {
        let d1 = self.bump().ok_or_else(|| self.err("expected digit after '%'"))?;
        let d2 = self
            .bump()
            .ok_or_else(|| self.err("expected second digit after '%'"))?;
        if !d1.is_ascii_digit() || !d2.is_ascii_digit() {
            return Err(self.err("invalid ring closure number after '%'"));
        }
        Ok((d1 - b'0') as u16 * 10 + (d2 - b'0') as u16)
    }

    fn ring_closure(&mut self, ring: u16) -> Result<()> {
        let current = self
            .prev
            .ok_or_else(|| self.err("ring closure without preceding atom"))?;

        match self.open_rings.remove(&ring) {
            Some((open_atom, _)) if open_atom == current => {
                Err(self.err(format!("ring closure {ring} bonds an atom to itself")))
            }
            Some((open_atom, open_bond)) => {
                let both_aromatic =
                    self.atoms[open_atom].is_aromatic && self.atoms[current].is_aromatic;
                let mut order = self
                    .pending_bond
                    .take()
                    .or(open_bond)
                    .unwrap_or(BondOrder::Single);
                if both_aromatic && order == BondOrder::Single {
                    order = BondOrder::Aromatic;
                }
                self.bonds.push(Bond {
                    a: open_atom,
                    b: current,
                    order,
                    is_aromatic: order == BondOrder::Aromatic,
                });
                Ok(())
            }
            None => {
                self.open_rings.insert(ring, (current, self.pending_bond.take()));
                Ok(())
            }
        }
    }

    fn push_atom(&mut self, atom: Atom, in_bracket: bool) -> Result<()> {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        self.bracket.push(in_bracket);

        if let Some(prev) = self.prev {
            let both_aromatic = self.atoms[prev].is_aromatic && self.atoms[idx].is_aromatic;
            let order = self.pending_bond.take().unwrap_or(if both_aromatic {
                BondOrder::Aromatic
            } else {
                BondOrder::Single
            });
            self.bonds.push(Bond {
                a: prev,
                b: idx,
                order,
                is_aromatic: order == BondOrder::Aromatic,
            });
        }
        self.pending_bond = None;
        self.prev = Some(idx);
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        if !self.open_rings.is_empty() {
            let open: Vec<u16> = self.open_rings.keys().copied().collect();
            return Err(self.err(format!("unmatched ring closure(s): {open:?}")));
        }
        if !self.branch_stack.is_empty() {
            return Err(self.err(format!("{} unmatched '(' in SMILES", self.branch_stack.len())));
        }
        Ok(())
    }

    /// Fill in implicit hydrogens for organic-subset atoms from default
    /// valences. Bracket atoms keep the count they spelled out.
    fn assign_implicit_hydrogens(&mut self) {
        let n = self.atoms.len();
        let mut degree = vec![0usize; n];
        let mut order_sum = vec![0.0f64; n];
        for bond in &self.bonds {
            for idx in [bond.a, bond.b] {
                degree[idx] += 1;
                order_sum[idx] += bond.order.as_f64();
            }
        }

        for i in 0..n {
            if self.bracket[i] {
                continue;
            }
            let atom = &self.atoms[i];
            let Some(elem) = element_by_number(atom.atomic_number) else {
                continue;
            };
            let valence = elem.default_valence as usize;
            // An aromatic atom gives one electron to the pi system; the rest
            // of its valence is split between sigma bonds and implicit H.
            let (available, used) = if atom.is_aromatic {
                (valence.saturating_sub(1), degree[i])
            } else {
                (valence, order_sum[i].round() as usize)
            };
            self.atoms[i].implicit_hydrogens = available.saturating_sub(used) as u8;
        }
    }
}

fn is_organic_atom_start(ch: u8) -> bool {
    matches!(
        ch,
        b'B' | b'C' | b'N' | b'O' | b'P' | b'S' | b'F' | b'I'
            | b'b' | b'c' | b'n' | b'o' | b'p' | b's'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_methane() {
        let mol = parse_smiles("C").unwrap();
        assert_eq!(mol.atom_count(), 1);
        assert_eq!(mol.bond_count(), 0);
        assert_eq!(mol.atoms[0].atomic_number, 6);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 4);
    }

    #[test]
    fn parse_ethanol() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 3);
        assert_eq!(mol.atoms[1].implicit_hydrogens, 2);
        assert_eq!(mol.atoms[2].implicit_hydrogens, 1);
    }

    #[test]
    fn parse_benzene() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6); // 5 chain + 1 ring closure
        for atom in &mol.atoms {
            assert!(atom.is_aromatic);
            assert_eq!(atom.implicit_hydrogens, 1);
        }
    }

    #[test]
    fn parse_branching() {
        // Isobutane
        let mol = parse_smiles("CC(C)C").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.bond_count(), 3);
        assert_eq!(mol.degree(1), 3);
    }

    #[test]
    fn parse_double_and_triple_bonds() {
        let ethene = parse_smiles("C=C").unwrap();
        assert_eq!(ethene.bonds[0].order, BondOrder::Double);
        assert_eq!(ethene.atoms[0].implicit_hydrogens, 2);

        let ethyne = parse_smiles("C#C").unwrap();
        assert_eq!(ethyne.bonds[0].order, BondOrder::Triple);
        assert_eq!(ethyne.atoms[0].implicit_hydrogens, 1);
    }

    #[test]
    fn parse_bracket_atom() {
        // Ammonium
        let mol = parse_smiles("[NH4+]").unwrap();
        assert_eq!(mol.atom_count(), 1);
        assert_eq!(mol.atoms[0].atomic_number, 7);
        assert_eq!(mol.atoms[0].formal_charge, 1);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 4);
    }

    #[test]
    fn parse_isotope_and_negative_charge() {
        let mol = parse_smiles("[13C]").unwrap();
        assert_eq!(mol.atoms[0].isotope, Some(13));

        let mol = parse_smiles("[O-]").unwrap();
        assert_eq!(mol.atoms[0].formal_charge, -1);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 0);
    }

    #[test]
    fn parse_two_letter_halogens() {
        let mol = parse_smiles("ClCBr").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.atoms[0].atomic_number, 17);
        assert_eq!(mol.atoms[2].atomic_number, 35);
    }

    #[test]
    fn parse_disconnected_fragments() {
        let mol = parse_smiles("[Na+].[Cl-]").unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 0);
    }

    #[test]
    fn parse_two_digit_ring_closure() {
        let mol = parse_smiles("C%10CCCCCCCCC%10").unwrap();
        assert_eq!(mol.atom_count(), 10);
        assert_eq!(mol.bond_count(), 10);
    }

    #[test]
    fn stereo_markers_are_ignored() {
        let mol = parse_smiles("F/C=C/F").unwrap();
        assert_eq!(mol.atom_count(), 4);
        let chiral = parse_smiles("N[C@@H](C)C(=O)O").unwrap();
        assert_eq!(chiral.atom_count(), 6);
    }

    #[test]
    fn invalid_smiles_error() {
        assert!(parse_smiles("C(").is_err());
        assert!(parse_smiles("(C)C").is_err()); // branch before any atom
        assert!(parse_smiles("C)").is_err());
        assert!(parse_smiles("C1CC").is_err()); // unmatched ring closure
        assert!(parse_smiles("[").is_err());
        assert!(parse_smiles("C1C1").is_ok()); // parallel bond tolerated
        assert!(parse_smiles("C11").is_err()); // self bond
        assert!(parse_smiles("INVALID").is_err());
    }

    #[test]
    fn named_parse_carries_name() {
        let mol = parse_smiles_named("CCO", "ethanol").unwrap();
        assert_eq!(mol.name, "ethanol");
    }
}
