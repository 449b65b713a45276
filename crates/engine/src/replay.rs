//! Replay: resolving intercepted calls against the current story.
//!
//! Every call pops the head of the current story and compares it with the
//! call. One internal resolution feeds three entry points:
//!
//! - [`Story::outcome_of`] delivers through the event's registered mode,
//! - [`Story::call`] hands back the result directly, for sync events only,
//! - [`Story::call_async`] hands back a [`Pending`] handle, for async events only.
//!
//! `UnknownEvent` and `ModeMismatch` are the only failures returned outside
//! the delivery channel, and neither consumes a step.

use storyline_domain::{DeliveryMode, EventName, Outcome, StoryError, Value};

use crate::delivery::{Delivery, Pending};
use crate::diagnostics::truncate;
use crate::story::Story;

/// A resolved call: the event's mode and its outcome.
struct Resolution {
    mode: DeliveryMode,
    result: Result<Value, StoryError>,
}

impl Story {
    /// Resolves a call to `event` carrying `data`.
    ///
    /// Sync events come back as [`Delivery::Immediate`], async events as
    /// [`Delivery::Deferred`], for successes and failures alike.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::UnknownEvent` if the event was never registered.
    /// Every other failure is carried by the returned [`Delivery`].
    pub fn outcome_of(
        &self,
        event: impl Into<EventName>,
        data: Option<Value>,
    ) -> Result<Delivery, StoryError> {
        let Resolution { mode, result } = self.resolve(event.into(), data, None)?;
        Ok(Delivery::settle(mode, result))
    }

    /// Resolves a call to a sync event and returns its outcome directly.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::UnknownEvent` if the event was never registered,
    /// `StoryError::ModeMismatch` if it was registered as async, or the
    /// replayed failure.
    pub fn call(
        &self,
        event: impl Into<EventName>,
        data: Option<Value>,
    ) -> Result<Value, StoryError> {
        self.resolve(event.into(), data, Some(DeliveryMode::Sync))?.result
    }

    /// Resolves a call to an async event and wraps its outcome in a deferred handle.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::UnknownEvent` if the event was never registered and
    /// `StoryError::ModeMismatch` if it was registered as sync. Every other
    /// failure rejects the returned handle.
    pub fn call_async(
        &self,
        event: impl Into<EventName>,
        data: Option<Value>,
    ) -> Result<Pending, StoryError> {
        let resolution = self.resolve(event.into(), data, Some(DeliveryMode::Async))?;
        Ok(Pending::settled(resolution.result))
    }

    fn resolve(
        &self,
        event: EventName,
        data: Option<Value>,
        requested: Option<DeliveryMode>,
    ) -> Result<Resolution, StoryError> {
        let mode = self
            .registry
            .lookup(event.as_str())
            .map(|definition| definition.mode)
            .ok_or_else(|| StoryError::unknown_event(event.as_str()))?;

        if let Some(requested) = requested.filter(|requested| *requested != mode) {
            return Err(StoryError::mode_mismatch(event.as_str(), mode, requested));
        }

        let result = self.replay_step(&event, data.unwrap_or_default());
        Ok(Resolution { mode, result })
    }

    fn replay_step(&self, event: &EventName, actual: Value) -> Result<Value, StoryError> {
        let step = {
            let mut current = self.current();
            let steps = self.materialize(&mut current);
            let remaining = steps.len();
            steps.pop_front().map(|step| (step, remaining))
        };

        let Some((step, remaining)) = step else {
            return Err(self.mismatch(event, StoryError::story_exhausted(event.as_str())));
        };

        if step.event != *event {
            return Err(self.mismatch(
                event,
                StoryError::unexpected_event(step.event.as_str(), event.as_str(), remaining),
            ));
        }

        if !step.accepts(&actual) {
            let max = self.config.max_diagnostic_len;
            let expected = step.arg.as_ref().map_or_else(
                || "undefined".to_string(),
                Value::to_diagnostic_string,
            );
            return Err(self.mismatch(
                event,
                StoryError::argument_mismatch(
                    event.as_str(),
                    truncate(actual.to_diagnostic_string(), max),
                    truncate(expected, max),
                    remaining,
                ),
            ));
        }

        match step.outcome {
            Outcome::Succeed(result) => Ok(result),
            Outcome::Fail(failure) => Err(StoryError::Scripted(failure.normalize())),
        }
    }

    /// Reports a mismatch to the diagnostic sink, then hands it back for delivery.
    fn mismatch(&self, event: &EventName, error: StoryError) -> StoryError {
        if self.config.diagnostics {
            self.sink.report(event, &error);
        }
        error
    }
}
