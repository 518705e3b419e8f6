//! Periodic table data and element lookup.

/// A chemical element from the periodic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    /// Default valence used for implicit-hydrogen assignment.
    pub default_valence: u8,
}

const fn el(atomic_number: u8, symbol: &'static str, default_valence: u8) -> Element {
    Element { atomic_number, symbol, default_valence }
}

/// Elements 1–54 (H through Xe). Heavier elements do not occur in the
/// SMILES subset this crate parses.
static ELEMENTS: [Element; 54] = [
    el(1, "H", 1),
    el(2, "He", 0),
    el(3, "Li", 1),
    el(4, "Be", 2),
    el(5, "B", 3),
    el(6, "C", 4),
    el(7, "N", 3),
    el(8, "O", 2),
    el(9, "F", 1),
    el(10, "Ne", 0),
    el(11, "Na", 1),
    el(12, "Mg", 2),
    el(13, "Al", 3),
    el(14, "Si", 4),
    el(15, "P", 3),
    el(16, "S", 2),
    el(17, "Cl", 1),
    el(18, "Ar", 0),
    el(19, "K", 1),
    el(20, "Ca", 2),
    el(21, "Sc", 3),
    el(22, "Ti", 4),
    el(23, "V", 5),
    el(24, "Cr", 3),
    el(25, "Mn", 2),
    el(26, "Fe", 3),
    el(27, "Co", 3),
    el(28, "Ni", 2),
    el(29, "Cu", 2),
    el(30, "Zn", 2),
    el(31, "Ga", 3),
    el(32, "Ge", 4),
    el(33, "As", 3),
    el(34, "Se", 2),
    el(35, "Br", 1),
    el(36, "Kr", 0),
    el(37, "Rb", 1),
    el(38, "Sr", 2),
    el(39, "Y", 3),
    el(40, "Zr", 4),
    el(41, "Nb", 5),
    el(42, "Mo", 6),
    el(43, "Tc", 7),
    el(44, "Ru", 4),
    el(45, "Rh", 3),
    el(46, "Pd", 2),
    el(47, "Ag", 1),
    el(48, "Cd", 2),
    el(49, "In", 3),
    el(50, "Sn", 4),
    el(51, "Sb", 3),
    el(52, "Te", 2),
    el(53, "I", 1),
    el(54, "Xe", 0),
];

/// Look up an element by its symbol (e.g. "C", "Cl").
pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Look up an element by its atomic number (1-based).
pub fn element_by_number(n: u8) -> Option<&'static Element> {
    if (1..=54).contains(&n) {
        Some(&ELEMENTS[(n - 1) as usize])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_symbol() {
        let c = element_by_symbol("C").unwrap();
        assert_eq!(c.atomic_number, 6);
        assert_eq!(c.default_valence, 4);
    }

    #[test]
    fn lookup_by_number() {
        let n = element_by_number(7).unwrap();
        assert_eq!(n.symbol, "N");
        assert_eq!(n.default_valence, 3);
    }

    #[test]
    fn two_letter_symbols() {
        assert_eq!(element_by_symbol("Cl").unwrap().atomic_number, 17);
        assert_eq!(element_by_symbol("Br").unwrap().atomic_number, 35);
    }

    #[test]
    fn unknown_returns_none() {
        assert!(element_by_symbol("Zz").is_none());
        assert!(element_by_number(0).is_none());
        assert!(element_by_number(55).is_none());
    }
}
