//! Validation findings.
//!
//! `validate()` never fails: it collects every [`Defect`] it can see and
//! returns them all. Components report bare defects; the machine tags each
//! one with the component it came from as a [`Finding`].

use thiserror::Error;

use crate::wiring::SubstitutionTable;

/// Identifies a component slot inside a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Key press entering the machine.
    Keyboard,
    /// Plugboard (Steckerbrett).
    Plugboard,
    /// Entry wheel (Eintrittswalze).
    EntryWheel,
    /// Rotor at the given index (0 = rightmost).
    Rotor(usize),
    /// Reflector (Umkehrwalze).
    Reflector,
    /// Lamp lit by the output.
    Lampboard,
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentId::Keyboard => write!(f, "keyboard"),
            ComponentId::Plugboard => write!(f, "plugboard"),
            ComponentId::EntryWheel => write!(f, "entry wheel"),
            ComponentId::Rotor(index) => write!(f, "rotor[{}]", index),
            ComponentId::Reflector => write!(f, "reflector"),
            ComponentId::Lampboard => write!(f, "lampboard"),
        }
    }
}

/// A problem found in one component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Defect {
    /// Two contacts wired to the same target.
    #[error("target {value} at position {position} already used at position {first_position}")]
    DuplicateTarget {
        /// Position of the repeat.
        position: usize,
        /// Repeated target.
        value: usize,
        /// Position of the first use.
        first_position: usize,
    },

    /// Wiring is not its own inverse.
    #[error("position {position} maps to {target}, which does not map back")]
    NotSelfInverse {
        /// Position whose round trip fails.
        position: usize,
        /// Its target.
        target: usize,
    },

    /// Component size differs from the machine alphabet.
    #[error("has {actual} characters, machine has {expected}")]
    CharacterCountMismatch {
        /// Machine character count.
        expected: usize,
        /// Component character count.
        actual: usize,
    },

    /// No reflector installed.
    #[error("missing")]
    MissingReflector,
}

/// A defect tagged with the component that has it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{component} ({label}): {defect}")]
pub struct Finding {
    /// Slot of the component.
    pub component: ComponentId,
    /// Component label (empty for unlabeled slots).
    pub label: String,
    /// What is wrong.
    pub defect: Defect,
}

impl Finding {
    /// Tags every defect in `defects` with `component` and `label`.
    pub(crate) fn tag(component: ComponentId, label: &str, defects: Vec<Defect>) -> Vec<Finding> {
        defects
            .into_iter()
            .map(|defect| Finding {
                component,
                label: label.to_string(),
                defect,
            })
            .collect()
    }
}

/// Duplicate-target defects of a table.
pub(crate) fn duplicate_defects(table: &SubstitutionTable) -> Vec<Defect> {
    table
        .duplicates()
        .into_iter()
        .map(|d| Defect::DuplicateTarget {
            position: d.position,
            value: d.value,
            first_position: d.first_position,
        })
        .collect()
}

/// Duplicate-target defects followed by self-inverse defects.
///
/// Self-inverse defects are only reported for an otherwise valid
/// permutation; a table with duplicates fails the round trip everywhere
/// the duplicates touch, which would only repeat the same problem.
pub(crate) fn involution_defects(table: &SubstitutionTable) -> Vec<Defect> {
    let mut defects = duplicate_defects(table);
    if defects.is_empty() {
        defects.extend(
            table
                .involution_violations()
                .into_iter()
                .map(|(position, target)| Defect::NotSelfInverse { position, target }),
        );
    }
    defects
}

/// Character-count check against the owning machine.
pub(crate) fn count_defect(expected: usize, actual: usize) -> Option<Defect> {
    (expected != actual).then_some(Defect::CharacterCountMismatch { expected, actual })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_defects() {
        let table = SubstitutionTable::new(vec![0, 0, 1]).unwrap();
        assert_eq!(
            duplicate_defects(&table),
            vec![Defect::DuplicateTarget {
                position: 1,
                value: 0,
                first_position: 0
            }]
        );
    }

    #[test]
    fn test_involution_defects_skip_round_trip_when_duplicated() {
        let table = SubstitutionTable::new(vec![1, 1, 0]).unwrap();
        let defects = involution_defects(&table);
        assert_eq!(defects.len(), 1);
        assert!(matches!(defects[0], Defect::DuplicateTarget { .. }));
    }

    #[test]
    fn test_involution_defects_on_cycle() {
        let table = SubstitutionTable::new(vec![1, 2, 0, 3]).unwrap();
        let defects = involution_defects(&table);
        assert_eq!(defects.len(), 3);
        assert!(defects
            .iter()
            .all(|d| matches!(d, Defect::NotSelfInverse { .. })));
    }

    #[test]
    fn test_count_defect() {
        assert_eq!(count_defect(26, 26), None);
        assert_eq!(
            count_defect(26, 10),
            Some(Defect::CharacterCountMismatch {
                expected: 26,
                actual: 10
            })
        );
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding {
            component: ComponentId::Rotor(2),
            label: "III".to_string(),
            defect: Defect::CharacterCountMismatch {
                expected: 26,
                actual: 10,
            },
        };
        assert_eq!(
            finding.to_string(),
            "rotor[2] (III): has 10 characters, machine has 26"
        );
    }
}
