//! Unified error types for story scripting and replay
//!
//! Every failure a story double can produce is a variant of [`StoryError`],
//! so doubles and the tests driving them can match on a single type without
//! falling back to strings or boxed errors.

use thiserror::Error;

use crate::event::DeliveryMode;
use crate::outcome::ScriptedError;

/// Unified error type for story operations
#[derive(Debug, Error, Clone)]
pub enum StoryError {
    /// The event name was never registered on the double
    #[error("Unknown story event type \"{event}\"")]
    UnknownEvent { event: String },

    /// An expected argument was supplied for an event without a matcher
    #[error("Story event \"{event}\" does not accept an argument")]
    ArgumentNotAllowed { event: String },

    /// A double called an event through the wrong delivery channel
    #[error("Story event \"{event}\" is registered as {registered} but was called as {requested}")]
    ModeMismatch {
        event: String,
        registered: DeliveryMode,
        requested: DeliveryMode,
    },

    /// `ok`/`fail` was called before any step was expected
    #[error("Cannot set an outcome before any step is expected")]
    EmptyStory,

    /// A call arrived after every scripted step was consumed
    #[error("Got event of type \"{event}\" but story is empty")]
    StoryExhausted { event: String },

    /// A call arrived for a different event than the next scripted step
    #[error(
        "Expected story event of type \"{expected}\", but got \"{actual}\" (remainingSteps = {remaining})"
    )]
    UnexpectedEvent {
        expected: String,
        actual: String,
        remaining: usize,
    },

    /// A call's argument was rejected by the step's matcher
    #[error(
        "Story event \"{event}\" got data {actual}, but expected {expected} (remainingSteps = {remaining})"
    )]
    ArgumentMismatch {
        event: String,
        actual: String,
        expected: String,
        remaining: usize,
    },

    /// The matched step was scripted to fail
    #[error(transparent)]
    Scripted(ScriptedError),

    /// The completion check found unconsumed steps
    #[error("Story not done (remainingSteps = {remaining}): {steps}")]
    StoryNotDone { remaining: usize, steps: String },
}

impl StoryError {
    /// Create an unknown event error
    pub fn unknown_event(event: impl Into<String>) -> Self {
        Self::UnknownEvent {
            event: event.into(),
        }
    }

    /// Create an argument-not-allowed error
    pub fn argument_not_allowed(event: impl Into<String>) -> Self {
        Self::ArgumentNotAllowed {
            event: event.into(),
        }
    }

    /// Create a mode mismatch error
    pub fn mode_mismatch(
        event: impl Into<String>,
        registered: DeliveryMode,
        requested: DeliveryMode,
    ) -> Self {
        Self::ModeMismatch {
            event: event.into(),
            registered,
            requested,
        }
    }

    /// Create a story exhausted error
    pub fn story_exhausted(event: impl Into<String>) -> Self {
        Self::StoryExhausted {
            event: event.into(),
        }
    }

    /// Creates an unexpected event error.
    ///
    /// `remaining` is the number of steps left in the current story as
    /// measured *before* the mismatching step was popped.
    pub fn unexpected_event(
        expected: impl Into<String>,
        actual: impl Into<String>,
        remaining: usize,
    ) -> Self {
        Self::UnexpectedEvent {
            expected: expected.into(),
            actual: actual.into(),
            remaining,
        }
    }

    /// Creates an argument mismatch error.
    ///
    /// `actual` and `expected` are the already serialized values; `remaining`
    /// is measured before the pop, as for [`StoryError::unexpected_event`].
    pub fn argument_mismatch(
        event: impl Into<String>,
        actual: impl Into<String>,
        expected: impl Into<String>,
        remaining: usize,
    ) -> Self {
        Self::ArgumentMismatch {
            event: event.into(),
            actual: actual.into(),
            expected: expected.into(),
            remaining,
        }
    }

    /// Create a story-not-done error
    pub fn story_not_done(remaining: usize, steps: impl Into<String>) -> Self {
        Self::StoryNotDone {
            remaining,
            steps: steps.into(),
        }
    }

    /// Returns true for failures raised while scripting rather than replaying.
    pub fn is_scripting_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownEvent { .. } | Self::ArgumentNotAllowed { .. } | Self::EmptyStory
        )
    }

    /// Returns true for replay failures that indicate the double was misused
    /// (as opposed to a deliberately scripted failure).
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::StoryExhausted { .. } | Self::UnexpectedEvent { .. } | Self::ArgumentMismatch { .. }
        )
    }

    /// Returns the scripted error if this failure was scripted.
    pub fn as_scripted(&self) -> Option<&ScriptedError> {
        match self {
            Self::Scripted(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ScriptedError> for StoryError {
    fn from(err: ScriptedError) -> Self {
        Self::Scripted(err)
    }
}
