//! View models handed to the presentation layer.

use serde::Serialize;

use crate::{
    Timestamp,
    constants::{REVEAL_DATE_FORMAT, TARGET_DISPLAY_FORMAT},
    message::{Message, timestamp_format},
};

/// Shown when a submission could not be saved.
pub const SAVE_FAILED_MESSAGE: &str =
    "Something went wrong saving your message. Please try again.";

/// Everything needed to draw the capsule page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewModel {
    Locked(LockedView),
    Open(OpenView),
}

impl ViewModel {
    pub fn target(&self) -> Timestamp {
        match self {
            ViewModel::Locked(view) => view.target,
            ViewModel::Open(view) => view.target,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ViewModel::Open(_))
    }
}

/// The sealed capsule: who has written, never what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedView {
    #[serde(with = "timestamp_format")]
    pub target: Timestamp,
    pub target_display: String,
    pub participant_count: usize,
    pub capacity: usize,
    /// Author names in submission order
    pub authors: Vec<String>,
    pub can_submit: bool,
}

impl LockedView {
    pub(crate) fn new(target: Timestamp, messages: &[Message], capacity: usize) -> Self {
        let participant_count = messages.len();
        Self {
            target,
            target_display: target.format(TARGET_DISPLAY_FORMAT).to_string(),
            participant_count,
            capacity,
            authors: messages.iter().map(|m| m.author.clone()).collect(),
            can_submit: participant_count < capacity,
        }
    }
}

/// The opened capsule with every message in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenView {
    #[serde(with = "timestamp_format")]
    pub target: Timestamp,
    pub target_display: String,
    pub messages: Vec<Message>,
}

impl OpenView {
    pub(crate) fn new(target: Timestamp, messages: Vec<Message>) -> Self {
        Self {
            target,
            target_display: target.format(REVEAL_DATE_FORMAT).to_string(),
            messages,
        }
    }
}

/// Result of a submission that reached the controller without a storage failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The message was appended.
    Success,
    /// Name or body was empty; the store was not touched.
    ValidationFailed { hint: String },
    /// The capsule already holds its full complement of messages.
    CapacityReached,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }

    /// Stable machine-readable name of the outcome.
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionOutcome::Success => "success",
            SubmissionOutcome::ValidationFailed { .. } => "validation_failed",
            SubmissionOutcome::CapacityReached => "capacity_reached",
        }
    }

    /// Text to show the submitter.
    pub fn user_message(&self) -> &str {
        match self {
            SubmissionOutcome::Success => {
                "Your message is sealed in the capsule. See you on reveal day!"
            }
            SubmissionOutcome::ValidationFailed { hint } => hint.as_str(),
            SubmissionOutcome::CapacityReached => {
                "The capsule is full: every message is in. Now we wait for the reveal."
            }
        }
    }
}
