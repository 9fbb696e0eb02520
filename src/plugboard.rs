//! Plugboard (Steckerbrett): symbol-pair swaps before and after the rotors.

use crate::alphabet::Alphabet;
use crate::error::MachineError;
use crate::validation::{self, Defect};
use crate::wiring::SubstitutionTable;

/// Self-inverse substitution built from disjoint symbol pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    table: SubstitutionTable,
}

impl Plugboard {
    /// Creates an unplugged board (identity wiring).
    ///
    /// # Errors
    /// Returns [`MachineError::InvalidCharacterCount`] when
    /// `num_characters` is zero.
    pub fn new(num_characters: usize) -> Result<Self, MachineError> {
        Ok(Plugboard {
            table: SubstitutionTable::identity(num_characters)?,
        })
    }

    /// Creates a board from raw wiring; no pairing is enforced here.
    ///
    /// Use [`validate`](Self::validate) to check that the wiring is a
    /// self-inverse permutation.
    pub fn with_wiring(num_characters: usize, wiring: Vec<usize>) -> Result<Self, MachineError> {
        Ok(Plugboard {
            table: SubstitutionTable::with_size(num_characters, wiring)?,
        })
    }

    /// Creates a board with every pair in `pairs` cross-wired.
    ///
    /// # Errors
    /// Returns [`MachineError::InvalidPlugPair`] for a pair of two equal or
    /// unknown symbols, and [`MachineError::PlugboardConflict`] when a
    /// symbol appears in more than one pair.
    pub fn from_pairs(alphabet: &Alphabet, pairs: &[(char, char)]) -> Result<Self, MachineError> {
        let mut wiring: Vec<usize> = (0..alphabet.len()).collect();
        for &(a, b) in pairs {
            let invalid = || MachineError::InvalidPlugPair {
                pair: format!("{}{}", a, b),
            };
            let ia = alphabet.index_of(a).ok_or_else(invalid)?;
            let ib = alphabet.index_of(b).ok_or_else(invalid)?;
            if ia == ib {
                return Err(invalid());
            }
            for (index, symbol) in [(ia, a), (ib, b)] {
                if wiring[index] != index {
                    return Err(MachineError::PlugboardConflict { symbol });
                }
            }
            wiring[ia] = ib;
            wiring[ib] = ia;
        }
        Self::with_wiring(alphabet.len(), wiring)
    }

    /// Parses space-separated pairs such as `"AV BS CG"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::{Alphabet, Plugboard};
    ///
    /// let board = Plugboard::parse(&Alphabet::latin(), "AB CD").unwrap();
    /// assert_eq!(board.encode(0), 1);
    /// assert_eq!(board.encode(3), 2);
    /// assert_eq!(board.encode(25), 25);
    /// ```
    pub fn parse(alphabet: &Alphabet, pairs: &str) -> Result<Self, MachineError> {
        let pairs = pairs
            .split_whitespace()
            .map(|pair| {
                let mut symbols = pair.chars();
                match (symbols.next(), symbols.next(), symbols.next()) {
                    (Some(a), Some(b), None) => Ok((a, b)),
                    _ => Err(MachineError::InvalidPlugPair {
                        pair: pair.to_string(),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(alphabet, &pairs)
    }

    /// Swaps `index` with its partner, or passes it through unplugged.
    pub fn encode(&self, index: usize) -> usize {
        self.table.forward(index)
    }

    /// Cross-wired index pairs, each listed once with the lower index first.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.table
            .targets()
            .iter()
            .enumerate()
            .filter(|&(i, &t)| i < t)
            .map(|(i, &t)| (i, t))
            .collect()
    }

    /// Duplicate-target and self-inverse defects of the wiring.
    pub fn validate(&self) -> Vec<Defect> {
        validation::involution_defects(&self.table)
    }

    /// Number of contacts.
    pub fn num_characters(&self) -> usize {
        self.table.len()
    }

    /// Wiring table.
    pub fn wiring(&self) -> &SubstitutionTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_swap_and_rest_pass_through() {
        let board = Plugboard::from_pairs(&Alphabet::latin(), &[('A', 'B'), ('C', 'D')]).unwrap();
        assert_eq!(board.encode(0), 1);
        assert_eq!(board.encode(1), 0);
        assert_eq!(board.encode(2), 3);
        assert_eq!(board.encode(3), 2);
        for x in 4..26 {
            assert_eq!(board.encode(x), x);
        }
        assert_eq!(board.pairs(), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_involution() {
        let board = Plugboard::parse(&Alphabet::latin(), "AV BS CG DL FU HZ IN KM OW RX").unwrap();
        for i in 0..26 {
            assert_eq!(board.encode(board.encode(i)), i);
        }
        assert!(board.validate().is_empty());
    }

    #[test]
    fn test_conflicting_pairs() {
        assert_eq!(
            Plugboard::parse(&Alphabet::latin(), "AB BC"),
            Err(MachineError::PlugboardConflict { symbol: 'B' })
        );
    }

    #[test]
    fn test_invalid_pairs() {
        let alphabet = Alphabet::latin();
        assert_eq!(
            Plugboard::parse(&alphabet, "AA"),
            Err(MachineError::InvalidPlugPair {
                pair: "AA".to_string()
            })
        );
        assert_eq!(
            Plugboard::parse(&alphabet, "ABC"),
            Err(MachineError::InvalidPlugPair {
                pair: "ABC".to_string()
            })
        );
        assert_eq!(
            Plugboard::parse(&alphabet, "A1"),
            Err(MachineError::InvalidPlugPair {
                pair: "A1".to_string()
            })
        );
    }

    #[test]
    fn test_empty_parse_is_identity() {
        let board = Plugboard::parse(&Alphabet::latin(), "  ").unwrap();
        assert_eq!(board, Plugboard::new(26).unwrap());
    }

    #[test]
    fn test_validate_non_involution() {
        let board = Plugboard::with_wiring(3, vec![1, 2, 0]).unwrap();
        assert_eq!(board.validate().len(), 3);
    }
}
