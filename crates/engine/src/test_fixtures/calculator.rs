//! Calculator doubles.
//!
//! The collaborator being replaced has a fluent API: `set(n)` and `add(n)`
//! return the calculator, `gives()` returns the accumulated number. One
//! double answers synchronously, the other through deferred handles.

use crate::delivery::Pending;
use crate::double::StoryDouble;
use crate::matcher::Matcher;
use crate::registry::EventRegistry;
use crate::story::Story;
use storyline_domain::{StoryError, Value};

/// Synchronous calculator double.
#[derive(Debug)]
pub struct CalculatorDouble {
    story: Story,
}

impl CalculatorDouble {
    pub fn registry() -> EventRegistry {
        EventRegistry::new()
            .event_matching("set", Matcher::structural())
            .event_matching("add", Matcher::structural())
            .event("gives")
    }

    pub fn new() -> Self {
        Self::with_story(Story::new(Self::registry()))
    }

    pub fn with_story(story: Story) -> Self {
        Self { story }
    }

    pub fn set(&self, n: i64) -> Result<&Self, StoryError> {
        self.story.call("set", Some(n.into()))?;
        Ok(self)
    }

    pub fn add(&self, n: i64) -> Result<&Self, StoryError> {
        self.story.call("add", Some(n.into()))?;
        Ok(self)
    }

    pub fn gives(&self) -> Result<Value, StoryError> {
        self.story.call("gives", None)
    }
}

impl StoryDouble for CalculatorDouble {
    fn story(&self) -> &Story {
        &self.story
    }
}

/// Asynchronous calculator double: every operation answers with a
/// [`Pending`] handle.
#[derive(Debug)]
pub struct AsyncCalculatorDouble {
    story: Story,
}

impl AsyncCalculatorDouble {
    pub fn registry() -> EventRegistry {
        EventRegistry::new()
            .async_event_matching("set", Matcher::structural())
            .async_event_matching("add", Matcher::structural())
            .async_event("gives")
    }

    pub fn new() -> Self {
        Self::with_story(Story::new(Self::registry()))
    }

    pub fn with_story(story: Story) -> Self {
        Self { story }
    }

    pub fn set(&self, n: i64) -> Result<Pending, StoryError> {
        self.story.call_async("set", Some(n.into()))
    }

    pub fn add(&self, n: i64) -> Result<Pending, StoryError> {
        self.story.call_async("add", Some(n.into()))
    }

    pub fn gives(&self) -> Result<Pending, StoryError> {
        self.story.call_async("gives", None)
    }
}

impl StoryDouble for AsyncCalculatorDouble {
    fn story(&self) -> &Story {
        &self.story
    }
}

impl Default for CalculatorDouble {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for AsyncCalculatorDouble {
    fn default() -> Self {
        Self::new()
    }
}
