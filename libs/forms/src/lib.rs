//! # barblab-forms
//!
//! Form behavior for the BarbLab booking flows, independent of any UI toolkit.
//!
//! A UI binds its widgets to the [`FormField`] capability (read value, write
//! value, show feedback) and forwards input and blur events to a
//! [`FieldController`]. The controller owns the per-field state machine and
//! the sequence guard that keeps a slow lookup from overwriting the result
//! of a newer one.
//!
//! ```text
//! Empty ──input──▶ Typing ──blur──▶ Blurred ──resolve──▶ Valid | Invalid
//!                    ▲                                      │
//!                    └────────────────input─────────────────┘
//! ```
//!
//! Submission validators in [`submit`] turn raw form values into payloads
//! carrying digits-only CPF, phone and CEP.

mod availability;
mod controller;
mod error;
mod field;
mod guard;
mod handlers;
mod state;
pub mod submit;

pub use availability::{Availability, AvailabilityCheck};
pub use controller::FieldController;
pub use error::FormError;
pub use field::{Feedback, FormField, TextField, Tone};
pub use guard::{SequenceGuard, Ticket};
pub use handlers::{check_cep_value, check_cpf_value, on_cep_blur, on_cpf_blur, Verdict};
pub use state::{FieldMachine, FieldState};
