//! Per-symbol diagnostic trace.
//!
//! The pipeline reports every sub-step to a [`Recorder`]. Recording is
//! strictly write-only: the pipeline never reads a trace back, so running
//! with [`NoTrace`] produces exactly the same output as running with
//! [`Trace`].

use std::fmt;

use crate::validation::ComponentId;

/// Kind of sub-step in the signal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Symbol mapped to its contact index.
    Input,
    /// Plugboard on the way in.
    Plugboard,
    /// Entry wheel on the way in.
    EntryWheel,
    /// A rotor or reflector moved; input/output are positions.
    Advance,
    /// Rotor traversed right to left.
    RotorForward,
    /// Reflector.
    Reflector,
    /// Rotor traversed left to right (inverse wiring).
    RotorReturn,
    /// Entry wheel on the way out.
    EntryWheelReturn,
    /// Plugboard on the way out.
    PlugboardReturn,
    /// Contact index mapped to the output symbol.
    Output,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Input => "input",
            StepKind::Plugboard => "plugboard",
            StepKind::EntryWheel => "entry",
            StepKind::Advance => "advance",
            StepKind::RotorForward => "rotor",
            StepKind::Reflector => "reflect",
            StepKind::RotorReturn => "rotor-return",
            StepKind::EntryWheelReturn => "entry-return",
            StepKind::PlugboardReturn => "plugboard-return",
            StepKind::Output => "output",
        };
        f.write_str(name)
    }
}

/// One sub-step record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// What happened.
    pub kind: StepKind,
    /// Where it happened.
    pub component: ComponentId,
    /// Component label, empty for unlabeled slots.
    pub label: String,
    /// Index before the step.
    pub input: usize,
    /// Symbol for `input`.
    pub input_symbol: char,
    /// Index after the step.
    pub output: usize,
    /// Symbol for `output`.
    pub output_symbol: char,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16} {}", self.kind, self.component)?;
        if !self.label.is_empty() {
            write!(f, " {}", self.label)?;
        }
        write!(
            f,
            ": {}({}) -> {}({})",
            self.input_symbol, self.input, self.output_symbol, self.output
        )
    }
}

/// Sink for pipeline sub-steps.
pub trait Recorder {
    /// Records a step. `step` is only evaluated when the recorder keeps it.
    fn record<F: FnOnce() -> Step>(&mut self, step: F);
}

/// Recorder that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Recorder for NoTrace {
    #[inline]
    fn record<F: FnOnce() -> Step>(&mut self, _step: F) {}
}

/// Ordered record of every sub-step for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps of one kind.
    pub fn of_kind(&self, kind: StepKind) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.kind == kind)
    }
}

impl Recorder for Trace {
    fn record<F: FnOnce() -> Step>(&mut self, step: F) {
        self.steps.push(step());
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(kind: StepKind) -> Step {
        Step {
            kind,
            component: ComponentId::Rotor(1),
            label: "II".to_string(),
            input: 0,
            input_symbol: 'A',
            output: 9,
            output_symbol: 'J',
        }
    }

    #[test]
    fn test_no_trace_never_builds_steps() {
        let mut rec = NoTrace;
        let mut built = false;
        rec.record(|| {
            built = true;
            step(StepKind::Input)
        });
        assert!(!built);
    }

    #[test]
    fn test_trace_keeps_order() {
        let mut trace = Trace::new();
        trace.record(|| step(StepKind::RotorForward));
        trace.record(|| step(StepKind::Reflector));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.steps()[0].kind, StepKind::RotorForward);
        assert_eq!(trace.of_kind(StepKind::Reflector).count(), 1);
    }

    #[test]
    fn test_step_display() {
        let rendered = step(StepKind::RotorForward).to_string();
        assert!(rendered.starts_with("rotor"));
        assert!(rendered.ends_with("rotor[1] II: A(0) -> J(9)"));
    }
}
