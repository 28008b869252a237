//! User input for creating or editing a record.

use crate::error::ValidationErrors;
use serde::{Deserialize, Serialize};

pub const TITLE_REQUIRED: &str = "title is required";
pub const DURATION_REQUIRED: &str = "duration is required";
pub const DURATION_NEGATIVE: &str = "duration must be 0 or greater";

/// Unvalidated title/duration pair as typed by the user.
///
/// An empty duration field, a zero and a non-number are all treated as
/// "not entered".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    pub title: String,
    pub duration: Option<f64>,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    title: String,
    duration: f64,
}

impl ValidDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl RecordDraft {
    pub fn new(title: impl Into<String>, duration: impl Into<Option<f64>>) -> Self {
        Self {
            title: title.into(),
            duration: duration.into(),
        }
    }

    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<ValidDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title", TITLE_REQUIRED);
        }

        let duration = match self.duration {
            None => {
                errors.push("duration", DURATION_REQUIRED);
                0.0
            }
            Some(d) if d.is_nan() || d == 0.0 => {
                errors.push("duration", DURATION_REQUIRED);
                0.0
            }
            Some(d) if d < 0.0 => {
                errors.push("duration", DURATION_NEGATIVE);
                0.0
            }
            Some(d) if d.is_infinite() => {
                errors.push("duration", DURATION_REQUIRED);
                0.0
            }
            Some(d) => d,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidDraft {
            title: title.to_string(),
            duration,
        })
    }
}
