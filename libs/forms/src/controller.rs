//! Per-field event controller.

use barblab_ident::MaskKind;
use tracing::debug;

use crate::field::FormField;
use crate::guard::{SequenceGuard, Ticket};
use crate::handlers::Verdict;
use crate::state::{FieldMachine, FieldState};

/// Owns the state of one field: its mask, state machine and sequence guard.
#[derive(Debug, Default)]
pub struct FieldController {
    mask: Option<MaskKind>,
    machine: FieldMachine,
    guard: SequenceGuard,
}

impl FieldController {
    /// Controller for an unmasked field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller that re-masks the field on every input.
    #[must_use]
    pub fn masked(kind: MaskKind) -> Self {
        Self {
            mask: Some(kind),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn state(&self) -> FieldState {
        self.machine.state()
    }

    #[must_use]
    pub fn mask(&self) -> Option<MaskKind> {
        self.mask
    }

    /// Input event: applies the mask and moves the field back to typing.
    /// Any validation still in flight becomes stale.
    pub fn on_input<F: FormField + ?Sized>(&mut self, field: &mut F) -> FieldState {
        let mut value = field.value();
        if let Some(kind) = self.mask {
            let masked = kind.apply(&value);
            if masked != value {
                field.set_value(&masked);
            }
            value = masked;
        }

        self.guard.invalidate();
        self.machine.on_input(value.trim().is_empty())
    }

    /// Blur event: starts a validation and returns its ticket.
    pub fn on_blur(&mut self) -> Ticket {
        self.machine.on_blur();
        self.guard.issue()
    }

    /// Applies a finished validation if it is still the newest one.
    ///
    /// Returns false when the verdict was discarded as stale.
    pub fn complete<F: FormField + ?Sized>(
        &mut self,
        ticket: Ticket,
        field: &mut F,
        verdict: Verdict,
    ) -> bool {
        if !self.guard.is_current(ticket) {
            debug!(?ticket, "Discarding stale validation result");
            return false;
        }
        if !self.machine.resolve(verdict.valid) {
            debug!(state = ?self.machine.state(), "Field no longer awaiting validation");
            return false;
        }
        field.set_feedback(verdict.feedback);
        true
    }
}
