//! Rotor cipher machine simulator.
//!
//! Simulates electromechanical rotor cipher devices of the Enigma family.
//! Each symbol is substituted through a chain of wired components whose
//! positions advance mechanically between symbols. The configuration that
//! encodes a message also decodes it.
//!
//! # Architecture
//!
//! ```text
//! SubstitutionTable  (shared permutation, forward + inverse)
//!     ↕ owned by
//! Stator / Rotor / Reflector / Plugboard   (add position, notches, movement)
//!     ↕ ordered and owned by
//! Machine  (stepping rule + signal path + validation + trace)
//!     ↑ built from
//! presets  (historical wiring tables, consumed at build time only)
//! ```
//!
//! # Examples
//!
//! Encode and decode with an M3 preset:
//!
//! ```
//! use rotormachine::presets::{Model, Settings};
//!
//! let settings = Settings::new(&["I", "II", "III"], "B")
//!     .with_positions("AAA")
//!     .with_plugs("AB CD");
//!
//! let mut machine = Model::M3.build(&settings).unwrap();
//! let ciphertext = machine.encode("HELLOWORLD").unwrap();
//! assert_ne!(ciphertext, "HELLOWORLD");
//!
//! machine.reset();
//! assert_eq!(machine.encode(&ciphertext).unwrap(), "HELLOWORLD");
//! ```
//!
//! Inspect every sub-step of one key press:
//!
//! ```
//! use rotormachine::presets::{Model, Settings};
//! use rotormachine::StepKind;
//!
//! let mut machine = Model::EnigmaI.build(&Settings::new(&["I", "II", "III"], "B")).unwrap();
//! let (lamp, trace) = machine.process_character("A", 'X').unwrap();
//! assert_eq!(lamp, 'B');
//! assert_eq!(trace.of_kind(StepKind::RotorReturn).count(), 3);
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod error;
pub mod machine;
pub mod plugboard;
pub mod presets;
pub mod reflector;
pub mod rotor;
pub mod stator;
pub mod trace;
pub mod utils;
pub mod validation;
pub mod wiring;

pub use alphabet::Alphabet;
pub use error::MachineError;
pub use machine::{Machine, MachineBuilder, Stepping, DEFAULT_FALLBACK};
pub use plugboard::Plugboard;
pub use reflector::Reflector;
pub use rotor::Rotor;
pub use stator::Stator;
pub use trace::{NoTrace, Recorder, Step, StepKind, Trace};
pub use validation::{ComponentId, Defect, Finding};
pub use wiring::{Direction, SubstitutionTable};
