//! Story scripting.
//!
//! A [`Story`] owns three things:
//!
//! - the [`EventRegistry`] it was created with,
//! - the master script of [`ExpectedStep`]s, appended by the builder methods
//!   and never touched by replay,
//! - the *current* story: a consumable copy of the script, created lazily on
//!   first use (and again after [`Story::reset`]) and drained by replay.
//!
//! Both queues sit behind mutexes so a story can be shared between tasks;
//! replay holds the current-story lock for the whole materialize-and-pop.
//!
//! # Usage
//!
//! ```rust
//! use storyline_engine::{EventRegistry, Matcher, Story, Value};
//!
//! # fn main() -> Result<(), storyline_engine::StoryError> {
//! let story = Story::new(
//!     EventRegistry::new()
//!         .event_matching("set", Matcher::structural())
//!         .event("gives"),
//! );
//!
//! story
//!     .expect_with("set", 3)?
//!     .ok(())
//!     .expect("gives")?
//!     .ok(5);
//!
//! story.call("set", Some(3.into()))?;
//! assert_eq!(story.call("gives", None)?, Value::from(5));
//! story.assert_story_done()?;
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storyline_domain::{EventName, Failure, Outcome, StoryError, Value};

use crate::config::StoryConfig;
use crate::diagnostics::{truncate, DiagnosticSink, TracingSink};
use crate::registry::EventRegistry;
use crate::step::{ExpectedStep, StepSummary};

/// Scriptable story engine backing a test double.
pub struct Story {
    pub(crate) registry: EventRegistry,
    script: Mutex<Vec<ExpectedStep>>,
    current: Mutex<Option<VecDeque<ExpectedStep>>>,
    pub(crate) config: StoryConfig,
    pub(crate) sink: Arc<dyn DiagnosticSink>,
}

impl Story {
    /// Create a story with the default configuration and tracing diagnostics.
    pub fn new(registry: EventRegistry) -> Self {
        Self::with_config(registry, StoryConfig::default())
    }

    /// Create a story configured from `.env` files and the process environment.
    ///
    /// See [`StoryConfig::from_env`].
    pub fn from_env(registry: EventRegistry) -> Self {
        Self::with_config(registry, StoryConfig::from_env())
    }

    pub fn with_config(registry: EventRegistry, config: StoryConfig) -> Self {
        Self {
            registry,
            script: Mutex::new(Vec::new()),
            current: Mutex::new(None),
            config,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Expects `event` next, with any (or no) argument.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::UnknownEvent` if the event was never registered.
    pub fn expect(&self, event: impl Into<EventName>) -> Result<StepHandle<'_>, StoryError> {
        let event = event.into();
        if self.registry.lookup(event.as_str()).is_none() {
            return Err(StoryError::unknown_event(event));
        }
        Ok(self.append(ExpectedStep::new(event)))
    }

    /// Expects `event` next, with an argument matching `arg`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The event was never registered (`UnknownEvent`)
    /// - The event was registered without a matcher (`ArgumentNotAllowed`)
    pub fn expect_with(
        &self,
        event: impl Into<EventName>,
        arg: impl Into<Value>,
    ) -> Result<StepHandle<'_>, StoryError> {
        let event = event.into();
        let definition = self
            .registry
            .lookup(event.as_str())
            .ok_or_else(|| StoryError::unknown_event(event.as_str()))?;
        let matcher = definition
            .matcher
            .clone()
            .ok_or_else(|| StoryError::argument_not_allowed(event.as_str()))?;
        Ok(self.append(ExpectedStep::with_arg(event, arg.into(), matcher)))
    }

    /// Sets a success outcome on the most recently expected step.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::EmptyStory` if no step was expected yet.
    pub fn ok(&self, result: impl Into<Value>) -> Result<&Self, StoryError> {
        self.set_last_outcome(Outcome::Succeed(result.into()))
    }

    /// Sets a failure outcome on the most recently expected step.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::EmptyStory` if no step was expected yet.
    pub fn fail(&self, error: impl Into<Failure>) -> Result<&Self, StoryError> {
        self.set_last_outcome(Outcome::Fail(error.into()))
    }

    /// Like [`Story::fail`], with the generic "unspecified error".
    pub fn fail_unspecified(&self) -> Result<&Self, StoryError> {
        self.set_last_outcome(Outcome::Fail(Failure::unspecified()))
    }

    fn append(&self, step: ExpectedStep) -> StepHandle<'_> {
        let mut script = lock(&self.script);
        script.push(step);
        StepHandle {
            story: self,
            index: script.len() - 1,
        }
    }

    fn set_last_outcome(&self, outcome: Outcome) -> Result<&Self, StoryError> {
        let mut script = lock(&self.script);
        let last = script.last_mut().ok_or(StoryError::EmptyStory)?;
        last.outcome = outcome;
        Ok(self)
    }

    fn set_outcome(&self, index: usize, outcome: Outcome) {
        if let Some(step) = lock(&self.script).get_mut(index) {
            step.outcome = outcome;
        }
    }

    // ========================================================================
    // Replay state
    // ========================================================================

    /// Forgets the current story so the next call replays the script from
    /// the start. The script itself is untouched.
    pub fn reset(&self) {
        *lock(&self.current) = None;
        tracing::debug!(steps = self.script_len(), "Story reset");
    }

    /// Checks that every step of the current story was consumed.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::StoryNotDone` with the serialized remaining steps.
    pub fn assert_story_done(&self) -> Result<(), StoryError> {
        let mut current = self.current();
        let remaining = self.materialize(&mut *current);
        if remaining.is_empty() {
            return Ok(());
        }
        let summaries: Vec<StepSummary<'_>> = remaining.iter().map(ExpectedStep::summary).collect();
        let steps = serde_json::to_string(&summaries).unwrap_or_else(|e| e.to_string());
        Err(StoryError::story_not_done(
            remaining.len(),
            truncate(steps, self.config.max_diagnostic_len),
        ))
    }

    /// Number of steps in the master script.
    pub fn script_len(&self) -> usize {
        lock(&self.script).len()
    }

    /// Number of steps left in the current story.
    pub fn remaining_steps(&self) -> usize {
        let mut current = self.current();
        self.materialize(&mut current).len()
    }

    pub fn is_done(&self) -> bool {
        self.remaining_steps() == 0
    }

    /// Serialized summaries of the steps left in the current story.
    pub fn pending_steps(&self) -> Vec<serde_json::Value> {
        let mut current = self.current();
        self.materialize(&mut current)
            .iter()
            .filter_map(|step| serde_json::to_value(step.summary()).ok())
            .collect()
    }

    pub(crate) fn current(&self) -> MutexGuard<'_, Option<VecDeque<ExpectedStep>>> {
        lock(&self.current)
    }

    /// Copies the script into the current story if there is none yet.
    pub(crate) fn materialize<'a>(
        &self,
        current: &'a mut Option<VecDeque<ExpectedStep>>,
    ) -> &'a mut VecDeque<ExpectedStep> {
        current.get_or_insert_with(|| {
            let steps: VecDeque<ExpectedStep> = lock(&self.script).iter().cloned().collect();
            tracing::debug!(steps = steps.len(), "Materialized current story");
            steps
        })
    }
}

impl std::fmt::Debug for Story {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Story")
            .field("registry", &self.registry)
            .field("script_len", &self.script_len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Handle to one freshly expected step.
///
/// `ok`/`fail` target exactly this step and hand back the story, so scripting
/// reads as one chain.
#[derive(Debug)]
pub struct StepHandle<'a> {
    story: &'a Story,
    index: usize,
}

impl<'a> StepHandle<'a> {
    /// Position of the step in the script.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Succeed with `result`.
    pub fn ok(self, result: impl Into<Value>) -> &'a Story {
        self.story.set_outcome(self.index, Outcome::Succeed(result.into()));
        self.story
    }

    /// Fail with `error` (normalized to an error object on delivery).
    pub fn fail(self, error: impl Into<Failure>) -> &'a Story {
        self.story.set_outcome(self.index, Outcome::Fail(error.into()));
        self.story
    }

    /// Fail with the generic "unspecified error".
    pub fn fail_unspecified(self) -> &'a Story {
        self.fail(Failure::unspecified())
    }

    /// Keep the default outcome (succeed with `Undefined`) and continue.
    pub fn done(self) -> &'a Story {
        self.story
    }
}

/// Locks a mutex, recovering the guard if a panicking holder poisoned it.
///
/// Neither queue is ever left half-updated while locked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
