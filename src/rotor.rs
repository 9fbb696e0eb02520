//! Rotor: rotating wheel (Walze) with notches.
//!
//! A rotor is a fixed wiring core turned inside the machine. Its
//! effective offset is `position - ring`: the window position turns the
//! whole wheel, the ring setting turns the core back relative to the
//! alphabet tyre.
//!
//! The signal crosses a rotor twice. Toward the reflector it follows the
//! forward wiring; coming back it follows the inverse wiring. Using the
//! forward wiring on both passes is wrong for every wiring that is not
//! self-inverse.

use crate::alphabet::Alphabet;
use crate::error::MachineError;
use crate::utils::circular;
use crate::validation::{self, Defect};
use crate::wiring::{self, Direction, SubstitutionTable};

/// Rotating substitution wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    label: String,
    table: SubstitutionTable,
    notches: Vec<usize>,
    fixed: bool,
    ring: usize,
    starting_position: usize,
    position: usize,
}

impl Rotor {
    /// Creates a rotor with `num_characters` contacts.
    ///
    /// # Parameters
    /// - `label`: Non-empty name (e.g. `"IV"`).
    /// - `num_characters`: Contact count.
    /// - `wiring`: Forward targets, one per contact.
    /// - `notches`: Positions at which the next rotor is carried. Wrapped
    ///   into range; repeats are ignored.
    ///
    /// # Errors
    /// [`MachineError::EmptyLabel`], [`MachineError::InvalidCharacterCount`],
    /// [`MachineError::WiringLengthMismatch`] or
    /// [`MachineError::WiringIndexOutOfRange`].
    pub fn new(
        label: &str,
        num_characters: usize,
        wiring: Vec<usize>,
        notches: &[usize],
    ) -> Result<Self, MachineError> {
        let label = wiring::require_label(label)?;
        let table = SubstitutionTable::with_size(num_characters, wiring)?;
        Ok(Self::assemble(label, table, notches))
    }

    /// Creates a rotor from a wiring string and notch symbols over `alphabet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::{Alphabet, Rotor};
    ///
    /// let wiring = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";
    /// let mut rotor = Rotor::from_symbols("I", &Alphabet::latin(), wiring, "Q").unwrap();
    /// rotor.setup(16);
    /// assert!(rotor.at_notch());
    /// rotor.advance(1);
    /// assert!(!rotor.at_notch());
    /// ```
    pub fn from_symbols(
        label: &str,
        alphabet: &Alphabet,
        wiring: &str,
        notches: &str,
    ) -> Result<Self, MachineError> {
        let label = wiring::require_label(label)?;
        let table = SubstitutionTable::from_symbols(alphabet, wiring)?;
        let notches = alphabet.parse_wiring(notches)?;
        Ok(Self::assemble(label, table, &notches))
    }

    fn assemble(label: String, table: SubstitutionTable, notches: &[usize]) -> Self {
        let n = table.len();
        let mut notches: Vec<usize> = notches.iter().map(|&p| circular::offset(p, 0, n)).collect();
        notches.sort_unstable();
        notches.dedup();
        Rotor {
            label,
            table,
            notches,
            fixed: false,
            ring: 0,
            starting_position: 0,
            position: 0,
        }
    }

    /// Marks the rotor as fixed: the machine never steps it.
    ///
    /// Used for the thin Greek wheels of the M4.
    pub fn into_fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Sets the starting position (Grundstellung) and moves there.
    pub fn setup(&mut self, start: usize) {
        let n = self.table.len();
        self.starting_position = circular::offset(start, 0, n);
        self.position = self.starting_position;
    }

    /// Sets ring setting (Ringstellung) and starting position together.
    pub fn setup_with_ring(&mut self, start: usize, ring: usize) {
        self.ring = circular::offset(ring, 0, self.table.len());
        self.setup(start);
    }

    /// Turns the rotor by `steps` positions.
    pub fn advance(&mut self, steps: usize) {
        self.position = circular::forward(self.position, steps, self.table.len());
    }

    /// Returns to the starting position.
    pub fn reset(&mut self) {
        self.position = self.starting_position;
    }

    /// Whether the current position is a notch position.
    pub fn at_notch(&self) -> bool {
        self.notches.binary_search(&self.position).is_ok()
    }

    /// Maps `index` through the turned wiring in `direction`.
    pub fn encode(&self, index: usize, direction: Direction) -> usize {
        self.table.lookup(index, self.offset(), direction)
    }

    /// Effective rotation of the core: `position - ring`.
    pub fn offset(&self) -> i64 {
        self.position as i64 - self.ring as i64
    }

    /// Duplicate-target defects of the wiring.
    pub fn validate(&self) -> Vec<Defect> {
        validation::duplicate_defects(&self.table)
    }

    /// Component label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of contacts.
    pub fn num_characters(&self) -> usize {
        self.table.len()
    }

    /// Wiring table.
    pub fn wiring(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Notch positions, ascending.
    pub fn notches(&self) -> &[usize] {
        &self.notches
    }

    /// Whether the rotor is excluded from stepping.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Ring setting.
    pub fn ring(&self) -> usize {
        self.ring
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Starting position.
    pub fn starting_position(&self) -> usize {
        self.starting_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";
    const ROTOR_VI: &str = "JPGVOUMFYQBENHZRDKASXLICTW";

    fn rotor_i() -> Rotor {
        Rotor::from_symbols("I", &Alphabet::latin(), ROTOR_I, "Q").unwrap()
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            Rotor::new("", 2, vec![1, 0], &[]),
            Err(MachineError::EmptyLabel)
        );
        assert_eq!(
            Rotor::new("X", 0, vec![], &[]),
            Err(MachineError::InvalidCharacterCount)
        );
        assert_eq!(
            Rotor::new("X", 3, vec![1, 0], &[]),
            Err(MachineError::WiringLengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_advance_wraps() {
        let mut rotor = rotor_i();
        rotor.setup(24);
        rotor.advance(1);
        assert_eq!(rotor.position(), 25);
        rotor.advance(1);
        assert_eq!(rotor.position(), 0);
        rotor.advance(27);
        assert_eq!(rotor.position(), 1);
    }

    #[test]
    fn test_advance_max_steps_turns_forward() {
        let mut rotor = rotor_i();
        rotor.setup(0);
        rotor.advance(usize::MAX);
        assert_eq!(rotor.position(), usize::MAX % 26);
        assert_eq!(rotor.position(), 15);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut rotor = rotor_i();
        rotor.setup(5);
        rotor.advance(13);
        rotor.reset();
        assert_eq!(rotor.position(), 5);
        assert_eq!(rotor.starting_position(), 5);
    }

    #[test]
    fn test_setup_wraps() {
        let mut rotor = rotor_i();
        rotor.setup(27);
        assert_eq!(rotor.position(), 1);
    }

    #[test]
    fn test_single_notch() {
        let mut rotor = rotor_i();
        let hits: Vec<usize> = (0..26)
            .filter(|_| {
                let hit = rotor.at_notch();
                rotor.advance(1);
                hit
            })
            .collect();
        assert_eq!(hits, vec![16]);
    }

    #[test]
    fn test_double_notch() {
        let mut rotor = Rotor::from_symbols("VI", &Alphabet::latin(), ROTOR_VI, "ZM").unwrap();
        assert_eq!(rotor.notches(), &[12, 25]);
        rotor.setup(12);
        assert!(rotor.at_notch());
        rotor.setup(25);
        assert!(rotor.at_notch());
        rotor.setup(0);
        assert!(!rotor.at_notch());
    }

    #[test]
    fn test_encode_at_home() {
        let rotor = rotor_i();
        assert_eq!(rotor.encode(0, Direction::Forward), 4);
        assert_eq!(rotor.encode(4, Direction::Return), 0);
    }

    #[test]
    fn test_return_inverts_forward_at_every_setting() {
        let mut rotor = rotor_i();
        for ring in [0, 1, 7] {
            for start in 0..26 {
                rotor.setup_with_ring(start, ring);
                for i in 0..26 {
                    let there = rotor.encode(i, Direction::Forward);
                    assert_eq!(rotor.encode(there, Direction::Return), i);
                }
            }
        }
    }

    #[test]
    fn test_ring_cancels_position() {
        // Same position and ring: the core sits at home.
        let mut turned = rotor_i();
        turned.setup_with_ring(3, 3);
        let home = rotor_i();
        for i in 0..26 {
            assert_eq!(
                turned.encode(i, Direction::Forward),
                home.encode(i, Direction::Forward)
            );
        }
    }

    #[test]
    fn test_forward_is_not_its_own_inverse() {
        let rotor = rotor_i();
        let a = rotor.encode(0, Direction::Forward);
        assert_ne!(rotor.encode(a, Direction::Forward), 0);
    }

    #[test]
    fn test_validate() {
        assert!(rotor_i().validate().is_empty());

        let bad = Rotor::new("bad", 4, vec![0, 2, 2, 3], &[0]).unwrap();
        let defects = bad.validate();
        assert_eq!(
            defects,
            vec![Defect::DuplicateTarget {
                position: 2,
                value: 2,
                first_position: 1
            }]
        );
    }

    #[test]
    fn test_fixed_flag() {
        let rotor = rotor_i();
        assert!(!rotor.is_fixed());
        assert!(rotor.into_fixed().is_fixed());
    }
}
