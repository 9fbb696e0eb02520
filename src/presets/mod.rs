//! Named historical machine presets.
//!
//! Presets are immutable data consumed once, when a [`Machine`] is built.
//! The machine keeps no reference back to the catalog.

pub mod catalog;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::MachineError;
use crate::machine::Machine;
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::stator::Stator;

use catalog::{ModelSpec, RotorSpec};

/// Historical Enigma model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    /// Enigma I (Army and Air Force).
    EnigmaI,
    /// Naval M3.
    M3,
    /// Naval M4 (four rotors, thin reflector).
    M4,
    /// Commercial Enigma D.
    EnigmaD,
    /// Abwehr Enigma G.
    EnigmaG,
}

/// Operator key sheet for one machine.
///
/// Rotor, position and ring lists read left to right, as the operator
/// sees the machine. Positions and rings default to `A` on every wheel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Rotor labels, left to right (Greek wheel first on the M4).
    pub rotors: Vec<String>,
    /// Reflector label.
    pub reflector: String,
    /// Window letters (Grundstellung).
    pub positions: Option<String>,
    /// Ring letters (Ringstellung).
    pub rings: Option<String>,
    /// Plug pairs, space-separated.
    pub plugs: Option<String>,
    /// Reflector starting letter.
    pub reflector_position: Option<char>,
}

impl Settings {
    /// Creates settings for the given rotors and reflector.
    pub fn new(rotors: &[&str], reflector: &str) -> Self {
        Settings {
            rotors: rotors.iter().map(|r| r.to_string()).collect(),
            reflector: reflector.to_string(),
            ..Self::default()
        }
    }

    /// Sets the window letters.
    pub fn with_positions(mut self, positions: &str) -> Self {
        self.positions = Some(positions.to_string());
        self
    }

    /// Sets the ring letters.
    pub fn with_rings(mut self, rings: &str) -> Self {
        self.rings = Some(rings.to_string());
        self
    }

    /// Sets the plug pairs.
    pub fn with_plugs(mut self, plugs: &str) -> Self {
        self.plugs = Some(plugs.to_string());
        self
    }

    /// Sets the reflector starting letter.
    pub fn with_reflector_position(mut self, position: char) -> Self {
        self.reflector_position = Some(position);
        self
    }
}

impl Model {
    /// Every model in the catalog.
    pub const ALL: [Model; 5] = [
        Model::EnigmaI,
        Model::M3,
        Model::M4,
        Model::EnigmaD,
        Model::EnigmaG,
    ];

    /// Catalog entry for this model.
    pub fn spec(self) -> &'static ModelSpec {
        match self {
            Model::EnigmaI => &catalog::ENIGMA_I,
            Model::M3 => &catalog::ENIGMA_M3,
            Model::M4 => &catalog::ENIGMA_M4,
            Model::EnigmaD => &catalog::ENIGMA_D,
            Model::EnigmaG => &catalog::ENIGMA_G,
        }
    }

    /// Model name.
    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// Number of rotor slots.
    pub fn rotor_count(self) -> usize {
        self.spec().rotor_slots
    }

    /// Whether the model has a plugboard.
    pub fn has_plugboard(self) -> bool {
        self.spec().plugboard
    }

    /// Labels of the stepping rotors.
    pub fn rotor_labels(self) -> Vec<&'static str> {
        self.spec().rotors.iter().map(|r| r.label).collect()
    }

    /// Labels of the reflectors.
    pub fn reflector_labels(self) -> Vec<&'static str> {
        self.spec().reflectors.iter().map(|r| r.label).collect()
    }

    /// Builds a machine set up per `settings`.
    ///
    /// # Errors
    /// [`MachineError::RotorCountMismatch`],
    /// [`MachineError::UnknownComponent`],
    /// [`MachineError::PlugboardNotInstalled`],
    /// [`MachineError::SettingLengthMismatch`], or any construction error
    /// of the parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::presets::{Model, Settings};
    ///
    /// let settings = Settings::new(&["I", "II", "III"], "B").with_positions("AAA");
    /// let mut machine = Model::M3.build(&settings).unwrap();
    /// assert_eq!(machine.encode("AAAAA").unwrap(), "BDZGO");
    /// ```
    pub fn build(self, settings: &Settings) -> Result<Machine, MachineError> {
        let spec = self.spec();
        let alphabet = Alphabet::new(spec.alphabet)?;

        if settings.rotors.len() != spec.rotor_slots {
            return Err(MachineError::RotorCountMismatch {
                expected: spec.rotor_slots,
                actual: settings.rotors.len(),
            });
        }

        // Settings list rotors left to right; the machine wants rightmost first.
        let mut rotors = Vec::with_capacity(spec.rotor_slots);
        for (slot, label) in settings.rotors.iter().enumerate().rev() {
            let greek_slot = slot == 0 && !spec.greek.is_empty();
            let (kind, candidates) = if greek_slot {
                ("greek rotor", spec.greek)
            } else {
                ("rotor", spec.rotors)
            };
            let rotor_spec =
                find_rotor(candidates, label).ok_or_else(|| MachineError::UnknownComponent {
                    kind,
                    label: label.clone(),
                })?;
            let rotor = Rotor::from_symbols(
                rotor_spec.label,
                &alphabet,
                rotor_spec.wiring,
                rotor_spec.notches,
            )?;
            rotors.push(if greek_slot { rotor.into_fixed() } else { rotor });
        }

        let reflector_spec = spec
            .reflectors
            .iter()
            .find(|r| r.label.eq_ignore_ascii_case(&settings.reflector))
            .ok_or_else(|| MachineError::UnknownComponent {
                kind: "reflector",
                label: settings.reflector.clone(),
            })?;
        let mut reflector =
            Reflector::from_symbols(reflector_spec.label, &alphabet, reflector_spec.wiring)?;
        if reflector_spec.moving {
            reflector = reflector.into_moving();
        }

        let mut builder = Machine::builder(spec.label, alphabet.clone())
            .entry_wheel(Stator::from_keyboard("ETW", &alphabet, spec.entry_wheel)?)
            .rotors(rotors)
            .reflector(reflector)
            .stepping(spec.stepping);

        match (&settings.plugs, spec.plugboard) {
            (Some(plugs), true) => builder = builder.plugboard(Plugboard::parse(&alphabet, plugs)?),
            (None, true) => builder = builder.plugboard(Plugboard::new(alphabet.len())?),
            (Some(plugs), false) if !plugs.trim().is_empty() => {
                return Err(MachineError::PlugboardNotInstalled);
            }
            _ => {}
        }

        let mut machine = builder.build()?;
        if let Some(rings) = &settings.rings {
            machine.set_rings(rings)?;
        }
        if let Some(positions) = &settings.positions {
            machine.set_positions(positions)?;
        }
        if let Some(position) = settings.reflector_position {
            machine.set_reflector_position(position)?;
        }

        debug!(
            model = spec.label,
            rotors = ?settings.rotors,
            reflector = %settings.reflector,
            positions = %machine.position_symbols(),
            "preset resolved"
        );
        Ok(machine)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn find_rotor<'a>(candidates: &'a [RotorSpec], label: &str) -> Option<&'a RotorSpec> {
    candidates.iter().find(|r| r.label.eq_ignore_ascii_case(label))
}
