//! Event names and delivery modes

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of an interaction a double can receive (usually one per mocked method).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<EventName> for String {
    fn from(name: EventName) -> String {
        name.0
    }
}

/// How outcomes of an event are handed back to the caller.
///
/// Fixed when the event is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Success returns the value, failure returns the error, immediately.
    Sync,
    /// Every outcome is wrapped in an already-completed deferred handle.
    Async,
}

impl DeliveryMode {
    pub fn is_async(self) -> bool {
        matches!(self, Self::Async)
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync"),
            Self::Async => write!(f, "async"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn event_name_borrows_as_str() {
        let mut map = HashMap::new();
        map.insert(EventName::from("set"), 1);
        assert_eq!(map.get("set"), Some(&1));
    }

    #[test]
    fn delivery_mode_serializes_snake_case() {
        let json = serde_json::to_string(&DeliveryMode::Async).expect("serialize");
        assert_eq!(json, "\"async\"");
        assert!(DeliveryMode::Async.is_async());
        assert!(!DeliveryMode::Sync.is_async());
    }
}
