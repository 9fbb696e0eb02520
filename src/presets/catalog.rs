//! Wiring tables of historical Enigma models.
//!
//! Wiring strings list the contact each alphabet position is wired to.
//! Notch strings list the window letters at which a rotor carries its
//! left-hand neighbour on the next key press.

use crate::machine::Stepping;

/// Rotor definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorSpec {
    /// Name engraved on the wheel.
    pub label: &'static str,
    /// Forward wiring.
    pub wiring: &'static str,
    /// Turnover letters.
    pub notches: &'static str,
}

/// Reflector definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectorSpec {
    /// Name of the reflector.
    pub label: &'static str,
    /// Self-inverse wiring.
    pub wiring: &'static str,
    /// Whether it turns while enciphering.
    pub moving: bool,
}

/// Full model definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    /// Model name.
    pub label: &'static str,
    /// Symbols of the keyboard.
    pub alphabet: &'static str,
    /// Entry wheel as the keys wired to contacts `A..Z` in order, the
    /// way entry wheels are catalogued (`QWERTZU...` sends key `Q` to `A`).
    pub entry_wheel: &'static str,
    /// Rotors for the stepping slots.
    pub rotors: &'static [RotorSpec],
    /// Thin wheels for the leftmost, non-stepping slot (empty if none).
    pub greek: &'static [RotorSpec],
    /// Reflectors.
    pub reflectors: &'static [ReflectorSpec],
    /// Number of rotor slots, including a Greek slot.
    pub rotor_slots: usize,
    /// Drive mechanism.
    pub stepping: Stepping,
    /// Whether a plugboard is fitted.
    pub plugboard: bool,
}

const fn rotor(label: &'static str, wiring: &'static str, notches: &'static str) -> RotorSpec {
    RotorSpec {
        label,
        wiring,
        notches,
    }
}

const fn reflector(label: &'static str, wiring: &'static str) -> ReflectorSpec {
    ReflectorSpec {
        label,
        wiring,
        moving: false,
    }
}

const fn moving_reflector(label: &'static str, wiring: &'static str) -> ReflectorSpec {
    ReflectorSpec {
        label,
        wiring,
        moving: true,
    }
}

const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const QWERTZU: &str = "QWERTZUIOASDFGHJKPYXCVBNML";

const ROTOR_I: RotorSpec = rotor("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q");
const ROTOR_II: RotorSpec = rotor("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", "E");
const ROTOR_III: RotorSpec = rotor("III", "BDFHJLCPRTXVZNYEIWGAKMUSQO", "V");
const ROTOR_IV: RotorSpec = rotor("IV", "ESOVPZJAYQUIRHXLNFTGKDCMWB", "J");
const ROTOR_V: RotorSpec = rotor("V", "VZBRGITYUPSDNHLXAWMJQOFECK", "Z");
const ROTOR_VI: RotorSpec = rotor("VI", "JPGVOUMFYQBENHZRDKASXLICTW", "ZM");
const ROTOR_VII: RotorSpec = rotor("VII", "NZJHGRCXMYSWBOUFAIVLPEKQDT", "ZM");
const ROTOR_VIII: RotorSpec = rotor("VIII", "FKQHTLXOCBJSPDZRAMEWNIUYGV", "ZM");

const BETA: RotorSpec = rotor("Beta", "LEYJVCNIXWPBQMDRTAKZGFUHOS", "");
const GAMMA: RotorSpec = rotor("Gamma", "FSOKANUERHMBTIYCWLQPZXVGJD", "");

const UKW_A: ReflectorSpec = reflector("A", "EJMZALYXVBWFCRQUONTSPIKHGD");
const UKW_B: ReflectorSpec = reflector("B", "YRUHQSLDPXNGOKMIEBFZCWVJAT");
const UKW_C: ReflectorSpec = reflector("C", "FVPJIAOYEDRZXWGCTKUQSBNMHL");
const UKW_B_THIN: ReflectorSpec = reflector("B-thin", "ENKQAUYWJICOPBLMDXZVFTHRGS");
const UKW_C_THIN: ReflectorSpec = reflector("C-thin", "RDOBJNTKVEHMLFCWZAXGYIPSUQ");

/// Wehrmacht/Luftwaffe Enigma I.
pub const ENIGMA_I: ModelSpec = ModelSpec {
    label: "Enigma I",
    alphabet: LATIN,
    entry_wheel: LATIN,
    rotors: &[ROTOR_I, ROTOR_II, ROTOR_III, ROTOR_IV, ROTOR_V],
    greek: &[],
    reflectors: &[UKW_A, UKW_B, UKW_C],
    rotor_slots: 3,
    stepping: Stepping::Lever,
    plugboard: true,
};

/// Kriegsmarine M3.
pub const ENIGMA_M3: ModelSpec = ModelSpec {
    label: "Enigma M3",
    alphabet: LATIN,
    entry_wheel: LATIN,
    rotors: &[
        ROTOR_I, ROTOR_II, ROTOR_III, ROTOR_IV, ROTOR_V, ROTOR_VI, ROTOR_VII, ROTOR_VIII,
    ],
    greek: &[],
    reflectors: &[UKW_B, UKW_C],
    rotor_slots: 3,
    stepping: Stepping::Lever,
    plugboard: true,
};

/// Kriegsmarine M4 with thin reflector and Greek wheel.
pub const ENIGMA_M4: ModelSpec = ModelSpec {
    label: "Enigma M4",
    alphabet: LATIN,
    entry_wheel: LATIN,
    rotors: &[
        ROTOR_I, ROTOR_II, ROTOR_III, ROTOR_IV, ROTOR_V, ROTOR_VI, ROTOR_VII, ROTOR_VIII,
    ],
    greek: &[BETA, GAMMA],
    reflectors: &[UKW_B_THIN, UKW_C_THIN],
    rotor_slots: 4,
    stepping: Stepping::Lever,
    plugboard: true,
};

/// Commercial Enigma D: QWERTZU entry wheel, settable reflector.
pub const ENIGMA_D: ModelSpec = ModelSpec {
    label: "Enigma D",
    alphabet: LATIN,
    entry_wheel: QWERTZU,
    rotors: &[
        rotor("I", "LPGSZMHAEOQKVXRFYBUTNICJDW", "Y"),
        rotor("II", "SLVGBTFXJQOHEWIRZYAMKPCNDU", "E"),
        rotor("III", "CJGDPSHKTURAWZXFMYNQOBVLIE", "N"),
    ],
    greek: &[],
    reflectors: &[reflector("UKW", "IMETCGFRAYSQBZXWLHKDVUPOJN")],
    rotor_slots: 3,
    stepping: Stepping::Lever,
    plugboard: false,
};

/// Abwehr Enigma G (G-312): gear drive, many notches, turning reflector.
///
/// The reflector here turns one position on every key press, before it
/// encodes. On the real machine it is driven through the gear train along
/// with the rotors, so this preset is a simplified model of that drive.
pub const ENIGMA_G: ModelSpec = ModelSpec {
    label: "Enigma G",
    alphabet: LATIN,
    entry_wheel: QWERTZU,
    rotors: &[
        rotor("I", "DMTWSILRUYQNKFEJCAZBPGXOHV", "SUVWZABCEFGIKLOPQ"),
        rotor("II", "HQZGPJTMOBLNCIFDYAWVEUSRKX", "STVYZACDFGHKMNQ"),
        rotor("III", "UQNTLSZFMREHDPXKIBVYGJCWOA", "UWXAEFHKMNR"),
    ],
    greek: &[],
    reflectors: &[moving_reflector("UKW", "RULQMZJSYGOCETKWDAHNBXPVIF")],
    rotor_slots: 3,
    stepping: Stepping::Cog,
    plugboard: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ModelSpec; 5] = [ENIGMA_I, ENIGMA_M3, ENIGMA_M4, ENIGMA_D, ENIGMA_G];

    fn is_permutation(wiring: &str, alphabet: &str) -> bool {
        let mut sorted: Vec<char> = wiring.chars().collect();
        sorted.sort_unstable();
        sorted.into_iter().eq(alphabet.chars())
    }

    #[test]
    fn test_every_wiring_is_a_permutation() {
        for model in ALL {
            assert!(
                is_permutation(model.entry_wheel, model.alphabet),
                "{}",
                model.label
            );
            for spec in model.rotors.iter().chain(model.greek) {
                assert!(
                    is_permutation(spec.wiring, model.alphabet),
                    "{} {}",
                    model.label,
                    spec.label
                );
            }
            for spec in model.reflectors {
                assert!(
                    is_permutation(spec.wiring, model.alphabet),
                    "{} {}",
                    model.label,
                    spec.label
                );
            }
        }
    }

    #[test]
    fn test_greek_slot_only_on_m4() {
        for model in ALL {
            assert_eq!(
                !model.greek.is_empty(),
                model.rotor_slots == 4,
                "{}",
                model.label
            );
        }
    }
}
