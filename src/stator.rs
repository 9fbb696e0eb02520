//! Stator: the static entry wheel (Eintrittswalze).

use crate::alphabet::Alphabet;
use crate::error::MachineError;
use crate::validation::{self, Defect};
use crate::wiring::{self, Direction, SubstitutionTable};

/// Entry wheel between the keyboard/plugboard and the rotor stack.
///
/// Never moves. The signal crosses it twice: forward on the way in and
/// through the inverse wiring on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stator {
    label: String,
    table: SubstitutionTable,
}

impl Stator {
    /// Creates a stator with `num_characters` contacts.
    ///
    /// # Errors
    /// [`MachineError::EmptyLabel`], [`MachineError::InvalidCharacterCount`],
    /// [`MachineError::WiringLengthMismatch`] or
    /// [`MachineError::WiringIndexOutOfRange`].
    pub fn new(
        label: &str,
        num_characters: usize,
        wiring: Vec<usize>,
    ) -> Result<Self, MachineError> {
        let label = wiring::require_label(label)?;
        let table = SubstitutionTable::with_size(num_characters, wiring)?;
        Ok(Stator { label, table })
    }

    /// Creates a stator from a wiring string over `alphabet`.
    pub fn from_symbols(
        label: &str,
        alphabet: &Alphabet,
        wiring: &str,
    ) -> Result<Self, MachineError> {
        let label = wiring::require_label(label)?;
        let table = SubstitutionTable::from_symbols(alphabet, wiring)?;
        Ok(Stator { label, table })
    }

    /// Creates a stator from the keys wired to each contact, in contact order.
    ///
    /// `keys[i]` is the key whose signal enters at contact `i`, so a
    /// `QWERTZU...` entry wheel sends key `Q` to contact `A`. Duplicate keys
    /// are not reported by [`Stator::validate`].
    pub fn from_keyboard(
        label: &str,
        alphabet: &Alphabet,
        keys: &str,
    ) -> Result<Self, MachineError> {
        let label = wiring::require_label(label)?;
        let contacts = SubstitutionTable::from_symbols(alphabet, keys)?;
        let forward = (0..contacts.len()).map(|key| contacts.inverse(key)).collect();
        let table = SubstitutionTable::with_size(contacts.len(), forward)?;
        Ok(Stator { label, table })
    }

    /// Straight-through entry wheel (`ABC...` wiring).
    pub fn identity(num_characters: usize) -> Result<Self, MachineError> {
        Self::new("ETW", num_characters, (0..num_characters).collect())
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

    /// Maps `index` through the wiring in `direction`.
    pub fn encode(&self, index: usize, direction: Direction) -> usize {
        self.table.lookup(index, 0, direction)
    }

    /// Duplicate-target defects of the wiring.
    pub fn validate(&self) -> Vec<Defect> {
        validation::duplicate_defects(&self.table)
    }
}
