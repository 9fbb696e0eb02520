//! SubstitutionTable: the permutation shared by every component.
//!
//! Stators, rotors, reflectors and plugboards all own one table and apply
//! it through composition. The table stores the forward mapping as given
//! and derives the inverse once at construction so that the return pass
//! through a rotor costs a single lookup.

use crate::alphabet::Alphabet;
use crate::error::MachineError;
use crate::utils::circular;
use crate::utils::duplicates::{self, Duplicate};

/// Direction of travel through a two-way component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the reflector (forward table).
    Forward,
    /// Back from the reflector (inverse table).
    Return,
}

/// Checks a component label and returns an owned copy.
///
/// # Errors
/// Returns [`MachineError::EmptyLabel`] for an empty or blank label.
pub(crate) fn require_label(label: &str) -> Result<String, MachineError> {
    if label.trim().is_empty() {
        return Err(MachineError::EmptyLabel);
    }
    Ok(label.to_string())
}

/// Fixed wiring over `N` contacts.
///
/// Construction guarantees a non-empty table whose targets lie in
/// `[0, N)`. It does not guarantee distinct targets: duplicate targets
/// are reported by [`duplicates`](Self::duplicates) so that `validate()`
/// can collect them instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl SubstitutionTable {
    /// Creates a table from explicit target indices.
    ///
    /// # Errors
    /// Returns [`MachineError::InvalidCharacterCount`] for an empty table
    /// and [`MachineError::WiringIndexOutOfRange`] for a target `>= N`.
    pub fn new(forward: Vec<usize>) -> Result<Self, MachineError> {
        let size = forward.len();
        if size == 0 {
            return Err(MachineError::InvalidCharacterCount);
        }
        if let Some((position, &value)) = forward.iter().enumerate().find(|&(_, &v)| v >= size) {
            return Err(MachineError::WiringIndexOutOfRange {
                position,
                value,
                size,
            });
        }

        // Unreached targets of a defective table keep an identity back-edge.
        let mut inverse: Vec<usize> = (0..size).collect();
        for (position, &value) in forward.iter().enumerate().rev() {
            inverse[value] = position;
        }

        Ok(SubstitutionTable { forward, inverse })
    }

    /// Creates a table of exactly `size` targets.
    ///
    /// # Errors
    /// As [`new`](Self::new), plus [`MachineError::InvalidCharacterCount`]
    /// when `size` is zero and [`MachineError::WiringLengthMismatch`] when
    /// the lengths differ.
    pub fn with_size(size: usize, forward: Vec<usize>) -> Result<Self, MachineError> {
        if size == 0 {
            return Err(MachineError::InvalidCharacterCount);
        }
        if forward.len() != size {
            return Err(MachineError::WiringLengthMismatch {
                expected: size,
                actual: forward.len(),
            });
        }
        Self::new(forward)
    }

    /// Parses a wiring string over `alphabet`.
    ///
    /// The string must hold exactly one symbol per alphabet symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::{Alphabet, SubstitutionTable};
    ///
    /// let latin = Alphabet::latin();
    /// let table = SubstitutionTable::from_symbols(&latin, "EKMFLGDQVZNTOWYHXUSPAIBRCJ").unwrap();
    /// assert_eq!(table.forward(0), 4);
    /// assert_eq!(table.inverse(4), 0);
    /// ```
    pub fn from_symbols(alphabet: &Alphabet, wiring: &str) -> Result<Self, MachineError> {
        Self::with_size(alphabet.len(), alphabet.parse_wiring(wiring)?)
    }

    /// The identity permutation over `size` contacts.
    pub fn identity(size: usize) -> Result<Self, MachineError> {
        Self::new((0..size).collect())
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Forward lookup; `index` is wrapped into range first.
    pub fn forward(&self, index: usize) -> usize {
        self.forward[circular::offset(index, 0, self.len())]
    }

    /// Inverse lookup; `index` is wrapped into range first.
    pub fn inverse(&self, index: usize) -> usize {
        self.inverse[circular::offset(index, 0, self.len())]
    }

    /// Forward lookup through a ring turned by `shift` contacts.
    ///
    /// Computes `table[(index + shift) mod N] - shift (mod N)`.
    pub fn forward_shifted(&self, index: usize, shift: i64) -> usize {
        let n = self.len();
        let entry = self.forward(circular::offset(index, shift, n));
        circular::offset(entry, -shift.rem_euclid(n as i64), n)
    }

    /// Inverse lookup through a ring turned by `shift` contacts.
    pub fn inverse_shifted(&self, index: usize, shift: i64) -> usize {
        let n = self.len();
        let entry = self.inverse(circular::offset(index, shift, n));
        circular::offset(entry, -shift.rem_euclid(n as i64), n)
    }

    /// Lookup in the given direction through a ring turned by `shift`.
    pub fn lookup(&self, index: usize, shift: i64, direction: Direction) -> usize {
        match direction {
            Direction::Forward => self.forward_shifted(index, shift),
            Direction::Return => self.inverse_shifted(index, shift),
        }
    }

    /// Raw forward targets.
    pub fn targets(&self) -> &[usize] {
        &self.forward
    }

    /// Every repeated target, one record per repeat occurrence.
    pub fn duplicates(&self) -> Vec<Duplicate> {
        duplicates::find_duplicates(&self.forward)
    }

    /// Positions `i` where `table[table[i]] != i`.
    ///
    /// Returns `(position, target)` pairs. Empty for a self-inverse table.
    pub fn involution_violations(&self) -> Vec<(usize, usize)> {
        self.forward
            .iter()
            .enumerate()
            .filter(|&(i, &target)| self.forward[target] != i)
            .map(|(i, &target)| (i, target))
            .collect()
    }

    /// Whether every target is distinct.
    pub fn is_permutation(&self) -> bool {
        self.duplicates().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            SubstitutionTable::new(vec![]),
            Err(MachineError::InvalidCharacterCount)
        );
        assert_eq!(
            SubstitutionTable::with_size(0, vec![]),
            Err(MachineError::InvalidCharacterCount)
        );
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert_eq!(
            SubstitutionTable::with_size(4, vec![0, 1, 2]),
            Err(MachineError::WiringLengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            SubstitutionTable::new(vec![0, 3, 1]),
            Err(MachineError::WiringIndexOutOfRange {
                position: 1,
                value: 3,
                size: 3
            })
        );
    }

    #[test]
    fn test_forward_inverse_are_inverse() {
        let table = SubstitutionTable::from_symbols(&Alphabet::latin(), ROTOR_I).unwrap();
        for i in 0..26 {
            assert_eq!(table.inverse(table.forward(i)), i);
            assert_eq!(table.forward(table.inverse(i)), i);
        }
    }

    #[test]
    fn test_shifted_lookups_are_inverse() {
        let table = SubstitutionTable::from_symbols(&Alphabet::latin(), ROTOR_I).unwrap();
        for shift in [-27i64, -1, 0, 1, 5, 25, 40] {
            for i in 0..26 {
                assert_eq!(table.inverse_shifted(table.forward_shifted(i, shift), shift), i);
            }
        }
    }

    #[test]
    fn test_forward_shifted_known_value() {
        // Rotor I at B: A enters at B, B -> K, exits one contact back at J.
        let table = SubstitutionTable::from_symbols(&Alphabet::latin(), ROTOR_I).unwrap();
        assert_eq!(table.forward_shifted(0, 1), 9);
    }

    #[test]
    fn test_duplicates_reported() {
        let table = SubstitutionTable::new(vec![1, 1, 2, 0]).unwrap();
        let found = table.duplicates();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, 1);
        assert_eq!(found[0].first_position, 0);
        assert!(!table.is_permutation());
    }

    #[test]
    fn test_involution_violations() {
        let swap = SubstitutionTable::new(vec![1, 0, 2]).unwrap();
        assert!(swap.involution_violations().is_empty());

        let cycle = SubstitutionTable::new(vec![1, 2, 0]).unwrap();
        assert_eq!(cycle.involution_violations().len(), 3);
    }

    #[test]
    fn test_require_label() {
        assert_eq!(require_label("I").unwrap(), "I");
        assert_eq!(require_label(""), Err(MachineError::EmptyLabel));
        assert_eq!(require_label("  "), Err(MachineError::EmptyLabel));
    }

    #[test]
    fn test_identity() {
        let table = SubstitutionTable::identity(10).unwrap();
        assert!((0..10).all(|i| table.forward(i) == i && table.inverse(i) == i));
    }
}
