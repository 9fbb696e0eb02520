//! Reflector (Umkehrwalze): sends the signal back through the rotors.
//!
//! The wiring must be self-inverse, otherwise the machine loses
//! reciprocity. Turning a self-inverse wiring keeps it self-inverse, so a
//! settable or moving reflector is just as valid as a static one.

use crate::alphabet::Alphabet;
use crate::error::MachineError;
use crate::utils::circular;
use crate::validation::{self, Defect};
use crate::wiring::{self, SubstitutionTable};

/// Terminal substitution component, optionally rotating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    label: String,
    table: SubstitutionTable,
    moving: bool,
    starting_position: usize,
    position: usize,
}

impl Reflector {
    /// Creates a static reflector with `num_characters` contacts.
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
        Ok(Self::assemble(label, table))
    }

    /// Creates a static reflector from a wiring string over `alphabet`.
    pub fn from_symbols(
        label: &str,
        alphabet: &Alphabet,
        wiring: &str,
    ) -> Result<Self, MachineError> {
        let label = wiring::require_label(label)?;
        let table = SubstitutionTable::from_symbols(alphabet, wiring)?;
        Ok(Self::assemble(label, table))
    }

    fn assemble(label: String, table: SubstitutionTable) -> Self {
        Reflector {
            label,
            table,
            moving: false,
            starting_position: 0,
            position: 0,
        }
    }

    /// Makes the reflector turn one position per processed symbol.
    pub fn into_moving(mut self) -> Self {
        self.moving = true;
        self
    }

    /// Sets the starting position and moves there.
    pub fn setup(&mut self, start: usize) {
        self.starting_position = circular::offset(start, 0, self.table.len());
        self.position = self.starting_position;
    }

    /// Turns the reflector by `steps`; no-op for a static reflector.
    pub fn advance(&mut self, steps: usize) {
        if self.moving {
            self.position = circular::forward(self.position, steps, self.table.len());
        }
    }

    /// Returns to the starting position.
    pub fn reset(&mut self) {
        self.position = self.starting_position;
    }

    /// Reflects `index` through the wiring at the current position.
    pub fn encode(&self, index: usize) -> usize {
        self.table.forward_shifted(index, self.position as i64)
    }

    /// Duplicate-target and self-inverse defects of the wiring.
    pub fn validate(&self) -> Vec<Defect> {
        validation::involution_defects(&self.table)
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

    /// Whether the reflector turns while processing.
    pub fn is_moving(&self) -> bool {
        self.moving
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
