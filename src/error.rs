//! Error types for the rotormachine library.
//!
//! Construction and processing failures are errors. Wiring defects that a
//! machine can still run with (duplicate targets, size mismatches, a
//! missing reflector) are reported as [`Finding`](crate::validation::Finding)s
//! by `validate()` instead.

use thiserror::Error;

/// Errors produced by the rotormachine library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// Component label is empty.
    #[error("Component label must not be empty")]
    EmptyLabel,

    /// Character count is zero.
    #[error("Character count must be positive")]
    InvalidCharacterCount,

    /// Wiring length differs from the declared character count.
    #[error("Wiring length {actual} does not match character count {expected}")]
    WiringLengthMismatch {
        /// Declared character count.
        expected: usize,
        /// Length of the supplied wiring.
        actual: usize,
    },

    /// A wiring target lies outside `[0, size)`.
    #[error("Wiring target {value} at position {position} is outside [0, {size})")]
    WiringIndexOutOfRange {
        /// Position in the wiring array.
        position: usize,
        /// Offending target value.
        value: usize,
        /// Table size.
        size: usize,
    },

    /// A wiring string uses a symbol the alphabet does not contain.
    #[error("Wiring symbol '{symbol}' is not in the alphabet")]
    UnknownWiringSymbol {
        /// The unknown symbol.
        symbol: char,
    },

    /// Alphabet has no symbols.
    #[error("Alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// Alphabet lists the same symbol twice.
    #[error("Alphabet symbol '{symbol}' appears more than once")]
    DuplicateAlphabetSymbol {
        /// The repeated symbol.
        symbol: char,
    },

    /// A symbol is used by more than one plug pair.
    #[error("Plugboard symbol '{symbol}' is already wired")]
    PlugboardConflict {
        /// The symbol wired twice.
        symbol: char,
    },

    /// A plug pair is not exactly two distinct symbols.
    #[error("Invalid plug pair \"{pair}\"")]
    InvalidPlugPair {
        /// The malformed pair as written.
        pair: String,
    },

    /// The machine has no reflector and cannot encode.
    #[error("Machine has no reflector installed")]
    MissingReflector,

    /// Character input was empty or held more than one symbol.
    #[error("Expected exactly one symbol, got {length}")]
    InvalidInputLength {
        /// Number of symbols received.
        length: usize,
    },

    /// A preset lookup named a component the model does not have.
    #[error("Unknown {kind} \"{label}\"")]
    UnknownComponent {
        /// Component kind ("rotor", "reflector").
        kind: &'static str,
        /// Requested label.
        label: String,
    },

    /// Wrong number of rotors for a preset model.
    #[error("Model takes {expected} rotors, got {actual}")]
    RotorCountMismatch {
        /// Rotor count of the model.
        expected: usize,
        /// Rotors supplied.
        actual: usize,
    },

    /// Position or ring string length differs from the rotor count.
    #[error("{setting} setting has {actual} symbols, expected {expected}")]
    SettingLengthMismatch {
        /// Setting name ("position", "ring").
        setting: &'static str,
        /// Rotor count.
        expected: usize,
        /// Symbols supplied.
        actual: usize,
    },

    /// Plugs were requested for a model that has no plugboard.
    #[error("Model has no plugboard")]
    PlugboardNotInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_empty_label() {
        let err = MachineError::EmptyLabel;
        assert_eq!(format!("{}", err), "Component label must not be empty");
    }

    #[test]
    fn test_display_wiring_length_mismatch() {
        let err = MachineError::WiringLengthMismatch {
            expected: 26,
            actual: 25,
        };
        assert_eq!(
            format!("{}", err),
            "Wiring length 25 does not match character count 26"
        );
    }

    #[test]
    fn test_display_invalid_input_length() {
        let err = MachineError::InvalidInputLength { length: 2 };
        assert_eq!(format!("{}", err), "Expected exactly one symbol, got 2");
    }

    #[test]
    fn test_display_unknown_component() {
        let err = MachineError::UnknownComponent {
            kind: "rotor",
            label: "IX".to_string(),
        };
        assert_eq!(format!("{}", err), "Unknown rotor \"IX\"");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(MachineError::MissingReflector, MachineError::MissingReflector);
        assert_ne!(MachineError::MissingReflector, MachineError::EmptyLabel);
    }

    #[test]
    fn test_error_clone() {
        let err = MachineError::PlugboardConflict { symbol: 'A' };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
