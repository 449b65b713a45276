//! Event registry: which events a double accepts and how it answers them.

use std::collections::HashMap;

use storyline_domain::{DeliveryMode, EventName};

use crate::matcher::Matcher;

/// Registration of a single event.
#[derive(Debug, Clone)]
pub struct EventDefinition {
    pub mode: DeliveryMode,
    /// `None` means the event takes no argument.
    pub matcher: Option<Matcher>,
}

/// Set of events a double may receive, keyed by name.
///
/// Built by value before the story is scripted:
///
/// ```rust
/// use storyline_engine::{EventRegistry, Matcher};
///
/// let registry = EventRegistry::new()
///     .event_matching("set", Matcher::structural())
///     .event("gives")
///     .async_event("fetch");
/// assert!(registry.lookup("gives").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    events: HashMap<EventName, EventDefinition>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a definition under `name`, replacing any earlier one.
    pub fn register(
        &mut self,
        name: impl Into<EventName>,
        mode: DeliveryMode,
        matcher: Option<Matcher>,
    ) -> &mut Self {
        self.events
            .insert(name.into(), EventDefinition { mode, matcher });
        self
    }

    /// Register a sync event that takes no argument.
    pub fn event(mut self, name: impl Into<EventName>) -> Self {
        self.register(name, DeliveryMode::Sync, None);
        self
    }

    /// Register a sync event whose argument is compared with `matcher`.
    pub fn event_matching(mut self, name: impl Into<EventName>, matcher: Matcher) -> Self {
        self.register(name, DeliveryMode::Sync, Some(matcher));
        self
    }

    /// Register an async event that takes no argument.
    pub fn async_event(mut self, name: impl Into<EventName>) -> Self {
        self.register(name, DeliveryMode::Async, None);
        self
    }

    /// Register an async event whose argument is compared with `matcher`.
    pub fn async_event_matching(mut self, name: impl Into<EventName>, matcher: Matcher) -> Self {
        self.register(name, DeliveryMode::Async, Some(matcher));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&EventDefinition> {
        self.events.get(name)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
