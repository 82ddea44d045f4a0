//! The form field capability.

use serde::Serialize;

/// How a feedback message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// A message shown next to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub message: String,
    pub tone: Tone,
}

impl Feedback {
    pub fn positive(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Positive,
        }
    }

    pub fn negative(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Negative,
        }
    }

    pub fn neutral(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Neutral,
        }
    }
}

/// What the form logic needs from a UI widget.
pub trait FormField {
    /// Current text of the field.
    fn value(&self) -> String;

    /// Replaces the text of the field.
    fn set_value(&mut self, value: &str);

    /// Shows `feedback` next to the field.
    fn set_feedback(&mut self, feedback: Feedback);
}

/// In-memory field, for non-graphical front ends and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    feedback: Option<Feedback>,
}

impl TextField {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            feedback: None,
        }
    }

    /// The last feedback shown, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }
}

impl FormField for TextField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
    }
}
