//! Per-field validation state machine.

use serde::Serialize;

/// Where a field is in its edit/validate cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    #[default]
    Empty,
    Typing,
    Blurred,
    Valid,
    Invalid,
}

impl FieldState {
    /// Returns true once validation has produced a verdict.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        matches!(self, FieldState::Valid | FieldState::Invalid)
    }
}

/// Tracks the state of one field.
///
/// Only a blur triggers validation, and a verdict is accepted only while the
/// field is still `Blurred`: typing after the blur discards the pending result.
#[derive(Debug, Clone, Default)]
pub struct FieldMachine {
    state: FieldState,
}

impl FieldMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> FieldState {
        self.state
    }

    /// The field's text changed.
    pub fn on_input(&mut self, now_empty: bool) -> FieldState {
        self.state = if now_empty {
            FieldState::Empty
        } else {
            FieldState::Typing
        };
        self.state
    }

    /// The field lost focus; validation should start.
    pub fn on_blur(&mut self) -> FieldState {
        self.state = FieldState::Blurred;
        self.state
    }

    /// Records a validation verdict. Returns false (and changes nothing) if
    /// the field is no longer waiting for one.
    pub fn resolve(&mut self, valid: bool) -> bool {
        if self.state != FieldState::Blurred {
            return false;
        }
        self.state = if valid {
            FieldState::Valid
        } else {
            FieldState::Invalid
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut machine = FieldMachine::new();
        assert_eq!(machine.state(), FieldState::Empty);
        assert_eq!(machine.on_input(false), FieldState::Typing);
        assert_eq!(machine.on_blur(), FieldState::Blurred);
        assert!(machine.resolve(true));
        assert_eq!(machine.state(), FieldState::Valid);
        assert!(machine.state().is_resolved());
    }

    #[test]
    fn test_typing_after_verdict_resets() {
        let mut machine = FieldMachine::new();
        machine.on_input(false);
        machine.on_blur();
        machine.resolve(false);
        assert_eq!(machine.state(), FieldState::Invalid);

        assert_eq!(machine.on_input(false), FieldState::Typing);
        assert!(!machine.state().is_resolved());
    }

    #[test]
    fn test_clearing_returns_to_empty() {
        let mut machine = FieldMachine::new();
        machine.on_input(false);
        assert_eq!(machine.on_input(true), FieldState::Empty);
    }

    #[test]
    fn test_verdict_ignored_unless_blurred() {
        let mut machine = FieldMachine::new();
        assert!(!machine.resolve(true));
        assert_eq!(machine.state(), FieldState::Empty);

        machine.on_input(false);
        machine.on_blur();
        machine.on_input(false);
        assert!(!machine.resolve(true));
        assert_eq!(machine.state(), FieldState::Typing);
    }

    #[test]
    fn test_second_verdict_ignored() {
        let mut machine = FieldMachine::new();
        machine.on_input(false);
        machine.on_blur();
        assert!(machine.resolve(false));
        assert!(!machine.resolve(true));
        assert_eq!(machine.state(), FieldState::Invalid);
    }
}
