//! Expected story steps.

use serde::Serialize;
use storyline_domain::{EventName, Outcome, OutcomeSummary, Value};

use crate::matcher::Matcher;

/// One scripted entry of a story.
#[derive(Debug, Clone)]
pub struct ExpectedStep {
    pub event: EventName,
    /// The scripted argument; `None` when none was supplied (distinct from
    /// `Some(Value::Undefined)`).
    pub arg: Option<Value>,
    /// Present only when `arg` was supplied.
    matcher: Option<Matcher>,
    pub outcome: Outcome,
}

impl ExpectedStep {
    /// A step that accepts any argument.
    pub fn new(event: EventName) -> Self {
        Self {
            event,
            arg: None,
            matcher: None,
            outcome: Outcome::default(),
        }
    }

    /// A step whose argument must satisfy `matcher(arg, actual)`.
    pub fn with_arg(event: EventName, arg: Value, matcher: Matcher) -> Self {
        Self {
            event,
            arg: Some(arg),
            matcher: Some(matcher),
            outcome: Outcome::default(),
        }
    }

    /// Evaluates the step's effective matcher against the call's data.
    pub fn accepts(&self, actual: &Value) -> bool {
        match (&self.arg, &self.matcher) {
            (Some(expected), Some(matcher)) => matcher.matches(expected, actual),
            _ => true,
        }
    }

    pub fn summary(&self) -> StepSummary<'_> {
        StepSummary {
            event: self.event.as_str(),
            arg: self.arg.as_ref(),
            outcome: self.outcome.summary(),
        }
    }
}

/// Serializable view of a step, used when reporting unconsumed steps.
#[derive(Debug, Serialize)]
pub struct StepSummary<'a> {
    pub event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<&'a Value>,
    pub outcome: OutcomeSummary<'a>,
}
