//! Machine: the assembled rotor cipher device.
//!
//! Orchestrates one symbol at a time through
//!
//! ```text
//! plugboard → entry wheel → rotor 0 … rotor N-1 → reflector
//!           ← entry wheel ← rotor 0 … rotor N-1 ←
//! plugboard ←
//! ```
//!
//! stepping the rotors immediately before the forward rotor pass. Rotor 0
//! is the rightmost (fast) wheel.
//!
//! A machine is plain mutable state: positions change with every symbol.
//! Callers that share one across threads must serialize access.

use tracing::{debug, trace, warn};

use crate::alphabet::Alphabet;
use crate::error::MachineError;
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::stator::Stator;
use crate::trace::{NoTrace, Recorder, Step, StepKind, Trace};
use crate::validation::{self, ComponentId, Defect, Finding};
use crate::wiring::{self, Direction};

/// Symbol substituted for input outside the alphabet when none is given.
pub const DEFAULT_FALLBACK: char = 'X';

/// How rotors carry each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stepping {
    /// Gear drive: rotor 0 always steps, rotor `i > 0` steps iff rotor
    /// `i - 1` sat at a notch before this key press.
    #[default]
    Cog,
    /// Pawl-and-ratchet drive: as [`Cog`](Self::Cog), plus a middle rotor
    /// sitting at its own notch steps again (double stepping).
    Lever,
}

/// Assembled rotor machine.
#[derive(Debug, Clone)]
pub struct Machine {
    label: String,
    alphabet: Alphabet,
    entry_wheel: Stator,
    rotors: Vec<Rotor>,
    reflector: Option<Reflector>,
    plugboard: Option<Plugboard>,
    stepping: Stepping,
}

/// Builder for [`Machine`].
#[derive(Debug, Clone)]
pub struct MachineBuilder {
    label: String,
    alphabet: Alphabet,
    entry_wheel: Option<Stator>,
    rotors: Vec<Rotor>,
    reflector: Option<Reflector>,
    plugboard: Option<Plugboard>,
    stepping: Stepping,
}

impl MachineBuilder {
    /// Installs the entry wheel. Defaults to a straight-through wheel.
    pub fn entry_wheel(mut self, stator: Stator) -> Self {
        self.entry_wheel = Some(stator);
        self
    }

    /// Appends a rotor to the left of those already installed.
    pub fn rotor(mut self, rotor: Rotor) -> Self {
        self.rotors.push(rotor);
        self
    }

    /// Appends rotors in index order (rightmost first).
    pub fn rotors(mut self, rotors: impl IntoIterator<Item = Rotor>) -> Self {
        self.rotors.extend(rotors);
        self
    }

    /// Installs the reflector.
    pub fn reflector(mut self, reflector: Reflector) -> Self {
        self.reflector = Some(reflector);
        self
    }

    /// Installs a plugboard.
    pub fn plugboard(mut self, plugboard: Plugboard) -> Self {
        self.plugboard = Some(plugboard);
        self
    }

    /// Selects the stepping mechanism.
    pub fn stepping(mut self, stepping: Stepping) -> Self {
        self.stepping = stepping;
        self
    }

    /// Assembles the machine.
    ///
    /// Only the label is checked here. Size mismatches and wiring defects
    /// are left to [`Machine::validate`].
    ///
    /// # Errors
    /// Returns [`MachineError::EmptyLabel`] for an empty label.
    pub fn build(self) -> Result<Machine, MachineError> {
        let label = wiring::require_label(&self.label)?;
        let entry_wheel = match self.entry_wheel {
            Some(stator) => stator,
            None => Stator::identity(self.alphabet.len())?,
        };
        debug!(
            machine = %label,
            characters = self.alphabet.len(),
            rotors = self.rotors.len(),
            reflector = self.reflector.as_ref().map(Reflector::label),
            plugboard = self.plugboard.is_some(),
            "machine assembled"
        );
        Ok(Machine {
            label,
            alphabet: self.alphabet,
            entry_wheel,
            rotors: self.rotors,
            reflector: self.reflector,
            plugboard: self.plugboard,
            stepping: self.stepping,
        })
    }
}

impl Machine {
    /// Starts building a machine over `alphabet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::{Alphabet, Machine, Reflector, Rotor, Stepping};
    ///
    /// let latin = Alphabet::latin();
    /// let mut machine = Machine::builder("M3", latin.clone())
    ///     .rotor(Rotor::from_symbols("III", &latin, "BDFHJLCPRTXVZNYEIWGAKMUSQO", "V").unwrap())
    ///     .rotor(Rotor::from_symbols("II", &latin, "AJDKSIRUXBLHWTMCQGZNPYFVOE", "E").unwrap())
    ///     .rotor(Rotor::from_symbols("I", &latin, "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q").unwrap())
    ///     .reflector(Reflector::from_symbols("B", &latin, "YRUHQSLDPXNGOKMIEBFZCWVJAT").unwrap())
    ///     .stepping(Stepping::Lever)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(machine.encode("AAAAA").unwrap(), "BDZGO");
    /// machine.reset();
    /// assert_eq!(machine.encode("BDZGO").unwrap(), "AAAAA");
    /// ```
    pub fn builder(label: &str, alphabet: Alphabet) -> MachineBuilder {
        MachineBuilder {
            label: label.to_string(),
            alphabet,
            entry_wheel: None,
            rotors: Vec::new(),
            reflector: None,
            plugboard: None,
            stepping: Stepping::default(),
        }
    }

    /// Encodes one symbol and returns it with the trace of every sub-step.
    ///
    /// `input` must hold exactly one symbol. A symbol outside the alphabet
    /// is replaced by `fallback` before encoding.
    ///
    /// # Errors
    /// [`MachineError::MissingReflector`] when no reflector is installed,
    /// [`MachineError::InvalidInputLength`] when `input` is empty or holds
    /// more than one symbol.
    pub fn process_character(
        &mut self,
        input: &str,
        fallback: char,
    ) -> Result<(char, Trace), MachineError> {
        self.require_reflector()?;
        let symbol = single_symbol(input)?;
        let mut trace = Trace::new();
        let output = self.process_symbol(symbol, fallback, &mut trace);
        Ok((output, trace))
    }

    /// Encodes a message, one trace per symbol.
    ///
    /// An empty message is returned unchanged with no traces, even on a
    /// machine without a reflector.
    ///
    /// # Errors
    /// [`MachineError::MissingReflector`] for a non-empty message on a
    /// machine without a reflector.
    pub fn process_message(
        &mut self,
        text: &str,
        fallback: char,
    ) -> Result<(String, Vec<Trace>), MachineError> {
        if text.is_empty() {
            return Ok((String::new(), Vec::new()));
        }
        self.require_reflector()?;
        debug!(machine = %self.label, symbols = text.chars().count(), "processing message");

        let mut output = String::with_capacity(text.len());
        let mut traces = Vec::with_capacity(text.len());
        for symbol in text.chars() {
            let mut trace = Trace::new();
            output.push(self.process_symbol(symbol, fallback, &mut trace));
            traces.push(trace);
        }
        Ok((output, traces))
    }

    /// Encodes one symbol without recording a trace.
    ///
    /// # Errors
    /// [`MachineError::MissingReflector`] when no reflector is installed.
    pub fn encode_char(&mut self, symbol: char) -> Result<char, MachineError> {
        self.require_reflector()?;
        Ok(self.process_symbol(symbol, DEFAULT_FALLBACK, &mut NoTrace))
    }

    /// Encodes a message without recording traces.
    ///
    /// Unknown symbols become [`DEFAULT_FALLBACK`].
    ///
    /// # Errors
    /// [`MachineError::MissingReflector`] for a non-empty message on a
    /// machine without a reflector.
    pub fn encode(&mut self, text: &str) -> Result<String, MachineError> {
        if text.is_empty() {
            return Ok(String::new());
        }
        self.require_reflector()?;
        Ok(text
            .chars()
            .map(|symbol| self.process_symbol(symbol, DEFAULT_FALLBACK, &mut NoTrace))
            .collect())
    }

    /// Returns every rotor and the reflector to its starting position.
    pub fn reset(&mut self) {
        for rotor in &mut self.rotors {
            rotor.reset();
        }
        if let Some(reflector) = &mut self.reflector {
            reflector.reset();
        }
        debug!(machine = %self.label, positions = %self.position_symbols(), "machine reset");
    }

    /// Collects every configuration finding. Never stops early.
    pub fn validate(&self) -> Vec<Finding> {
        let n = self.alphabet.len();
        let mut findings = Vec::new();

        findings.extend(Self::component_findings(
            ComponentId::EntryWheel,
            self.entry_wheel.label(),
            n,
            self.entry_wheel.num_characters(),
            self.entry_wheel.validate(),
        ));

        for (index, rotor) in self.rotors.iter().enumerate() {
            findings.extend(Self::component_findings(
                ComponentId::Rotor(index),
                rotor.label(),
                n,
                rotor.num_characters(),
                rotor.validate(),
            ));
        }

        match &self.reflector {
            Some(reflector) => findings.extend(Self::component_findings(
                ComponentId::Reflector,
                reflector.label(),
                n,
                reflector.num_characters(),
                reflector.validate(),
            )),
            None => findings.push(Finding {
                component: ComponentId::Reflector,
                label: String::new(),
                defect: Defect::MissingReflector,
            }),
        }

        if let Some(plugboard) = &self.plugboard {
            findings.extend(Self::component_findings(
                ComponentId::Plugboard,
                "",
                n,
                plugboard.num_characters(),
                plugboard.validate(),
            ));
        }

        findings
    }

    fn component_findings(
        component: ComponentId,
        label: &str,
        expected: usize,
        actual: usize,
        defects: Vec<Defect>,
    ) -> Vec<Finding> {
        let mut all: Vec<Defect> = validation::count_defect(expected, actual).into_iter().collect();
        all.extend(defects);
        Finding::tag(component, label, all)
    }

    // ──────── Pipeline ────────

    fn require_reflector(&self) -> Result<(), MachineError> {
        if self.reflector.is_none() {
            return Err(MachineError::MissingReflector);
        }
        Ok(())
    }

    /// Runs one symbol through the full signal path.
    fn process_symbol<R: Recorder>(&mut self, symbol: char, fallback: char, rec: &mut R) -> char {
        if !self.alphabet.contains(symbol) {
            warn!(
                machine = %self.label,
                %symbol,
                %fallback,
                "symbol not in alphabet, substituting"
            );
        }
        let input = self.alphabet.symbol_to_index(symbol, fallback);
        rec.record(|| Step {
            input_symbol: symbol,
            ..self.step(StepKind::Input, ComponentId::Keyboard, "", input, input)
        });

        let mut x = input;

        if let Some(plugboard) = &self.plugboard {
            let out = plugboard.encode(x);
            rec.record(|| self.step(StepKind::Plugboard, ComponentId::Plugboard, "", x, out));
            x = out;
        }

        let out = self.entry_wheel.encode(x, Direction::Forward);
        rec.record(|| {
            self.step(
                StepKind::EntryWheel,
                ComponentId::EntryWheel,
                self.entry_wheel.label(),
                x,
                out,
            )
        });
        x = out;

        self.step_rotors(rec);

        for (index, rotor) in self.rotors.iter().enumerate() {
            let out = rotor.encode(x, Direction::Forward);
            rec.record(|| {
                self.step(
                    StepKind::RotorForward,
                    ComponentId::Rotor(index),
                    rotor.label(),
                    x,
                    out,
                )
            });
            x = out;
        }

        if let Some(reflector) = &mut self.reflector {
            if reflector.is_moving() {
                let before = reflector.position();
                reflector.advance(1);
                let after = reflector.position();
                rec.record(|| Step {
                    kind: StepKind::Advance,
                    component: ComponentId::Reflector,
                    label: reflector.label().to_string(),
                    input: before,
                    input_symbol: self.alphabet.index_to_symbol(before),
                    output: after,
                    output_symbol: self.alphabet.index_to_symbol(after),
                });
            }
        }
        if let Some(reflector) = &self.reflector {
            let out = reflector.encode(x);
            rec.record(|| {
                self.step(
                    StepKind::Reflector,
                    ComponentId::Reflector,
                    reflector.label(),
                    x,
                    out,
                )
            });
            x = out;
        }

        for (index, rotor) in self.rotors.iter().enumerate().rev() {
            let out = rotor.encode(x, Direction::Return);
            rec.record(|| {
                self.step(
                    StepKind::RotorReturn,
                    ComponentId::Rotor(index),
                    rotor.label(),
                    x,
                    out,
                )
            });
            x = out;
        }

        let out = self.entry_wheel.encode(x, Direction::Return);
        rec.record(|| {
            self.step(
                StepKind::EntryWheelReturn,
                ComponentId::EntryWheel,
                self.entry_wheel.label(),
                x,
                out,
            )
        });
        x = out;

        if let Some(plugboard) = &self.plugboard {
            let out = plugboard.encode(x);
            rec.record(|| self.step(StepKind::PlugboardReturn, ComponentId::Plugboard, "", x, out));
            x = out;
        }

        let output = self.alphabet.index_to_symbol(x);
        rec.record(|| self.step(StepKind::Output, ComponentId::Lampboard, "", x, x));
        trace!(
            machine = %self.label,
            %symbol,
            %output,
            positions = %self.position_symbols(),
            "symbol processed"
        );
        output
    }

    /// Steps the rotors for one key press.
    ///
    /// Every decision is taken against the notch state before any rotor
    /// moves, then applied in index order. Fixed rotors neither step nor
    /// carry.
    fn step_rotors<R: Recorder>(&mut self, rec: &mut R) {
        let chain: Vec<usize> = (0..self.rotors.len())
            .filter(|&i| !self.rotors[i].is_fixed())
            .collect();
        let at_notch: Vec<bool> = chain.iter().map(|&i| self.rotors[i].at_notch()).collect();
        let last = chain.len().saturating_sub(1);

        for (k, &index) in chain.iter().enumerate() {
            let carried = k == 0 || at_notch[k - 1];
            let double_step = self.stepping == Stepping::Lever && k > 0 && k < last && at_notch[k];
            if !(carried || double_step) {
                continue;
            }
            let before = self.rotors[index].position();
            self.rotors[index].advance(1);
            let after = self.rotors[index].position();
            rec.record(|| {
                self.step(
                    StepKind::Advance,
                    ComponentId::Rotor(index),
                    self.rotors[index].label(),
                    before,
                    after,
                )
            });
        }
    }

    fn step(
        &self,
        kind: StepKind,
        component: ComponentId,
        label: &str,
        input: usize,
        output: usize,
    ) -> Step {
        Step {
            kind,
            component,
            label: label.to_string(),
            input,
            input_symbol: self.alphabet.index_to_symbol(input),
            output,
            output_symbol: self.alphabet.index_to_symbol(output),
        }
    }

    // ──────── Settings and accessors ────────

    /// Rotor positions in index order (rightmost first).
    pub fn positions(&self) -> Vec<usize> {
        self.rotors.iter().map(Rotor::position).collect()
    }

    /// Rotor window letters read left to right, as on the machine.
    pub fn position_symbols(&self) -> String {
        self.rotors
            .iter()
            .rev()
            .map(|r| self.alphabet.index_to_symbol(r.position()))
            .collect()
    }

    /// Sets the starting positions from window letters read left to right.
    ///
    /// Ring settings are kept. The machine is left at the new positions.
    ///
    /// # Errors
    /// [`MachineError::SettingLengthMismatch`] when the letter count differs
    /// from the rotor count, [`MachineError::UnknownWiringSymbol`] for a
    /// letter outside the alphabet.
    pub fn set_positions(&mut self, positions: &str) -> Result<(), MachineError> {
        let starts = self.parse_setting("position", positions)?;
        for (rotor, start) in self.rotors.iter_mut().zip(starts) {
            let ring = rotor.ring();
            rotor.setup_with_ring(start, ring);
        }
        Ok(())
    }

    /// Sets the ring settings from letters read left to right.
    ///
    /// Starting positions are kept and every rotor returns to its start.
    ///
    /// # Errors
    /// As [`set_positions`](Self::set_positions).
    pub fn set_rings(&mut self, rings: &str) -> Result<(), MachineError> {
        let rings = self.parse_setting("ring", rings)?;
        for (rotor, ring) in self.rotors.iter_mut().zip(rings) {
            let start = rotor.starting_position();
            rotor.setup_with_ring(start, ring);
        }
        Ok(())
    }

    /// Sets the reflector's starting position.
    ///
    /// # Errors
    /// [`MachineError::MissingReflector`] without a reflector,
    /// [`MachineError::UnknownWiringSymbol`] for a letter outside the
    /// alphabet.
    pub fn set_reflector_position(&mut self, position: char) -> Result<(), MachineError> {
        let index = self
            .alphabet
            .index_of(position)
            .ok_or(MachineError::UnknownWiringSymbol { symbol: position })?;
        let reflector = self.reflector.as_mut().ok_or(MachineError::MissingReflector)?;
        reflector.setup(index);
        Ok(())
    }

    /// Parses left-to-right setting letters into index order.
    fn parse_setting(
        &self,
        setting: &'static str,
        letters: &str,
    ) -> Result<Vec<usize>, MachineError> {
        let mut indices = self.alphabet.parse_wiring(letters)?;
        if indices.len() != self.rotors.len() {
            return Err(MachineError::SettingLengthMismatch {
                setting,
                expected: self.rotors.len(),
                actual: indices.len(),
            });
        }
        indices.reverse();
        Ok(indices)
    }

    /// Machine label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of symbols.
    pub fn num_characters(&self) -> usize {
        self.alphabet.len()
    }

    /// Entry wheel.
    pub fn entry_wheel(&self) -> &Stator {
        &self.entry_wheel
    }

    /// Rotors in index order (rightmost first).
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Reflector, if installed.
    pub fn reflector(&self) -> Option<&Reflector> {
        self.reflector.as_ref()
    }

    /// Plugboard, if installed.
    pub fn plugboard(&self) -> Option<&Plugboard> {
        self.plugboard.as_ref()
    }

    /// Stepping mechanism.
    pub fn stepping(&self) -> Stepping {
        self.stepping
    }
}

/// Extracts the only symbol of `input`.
fn single_symbol(input: &str) -> Result<char, MachineError> {
    let mut symbols = input.chars();
    match (symbols.next(), symbols.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(MachineError::InvalidInputLength {
            length: input.chars().count(),
        }),
    }
}
