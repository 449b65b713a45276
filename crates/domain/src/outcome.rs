//! Scripted step outcomes and failure normalization
//!
//! A step either succeeds with a [`Value`] or fails with a [`Failure`]. The
//! failure keeps whatever the test author scripted (a bare value or a real
//! error) and is only turned into an error object when it is delivered, via
//! [`Failure::normalize`].

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::value::Value;

/// Message used when a failure is scripted without an error.
pub const UNSPECIFIED_ERROR: &str = "unspecified error";

/// The scripted outcome of a story step.
#[derive(Debug, Clone)]
pub enum Outcome {
    Succeed(Value),
    Fail(Failure),
}

impl Default for Outcome {
    fn default() -> Self {
        Self::Succeed(Value::Undefined)
    }
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Serializable summary used when reporting unconsumed steps.
    pub fn summary(&self) -> OutcomeSummary<'_> {
        match self {
            Self::Succeed(result) => OutcomeSummary::Ok { result },
            Self::Fail(failure) => OutcomeSummary::Fail {
                error: failure.to_string(),
            },
        }
    }
}

/// Diagnostic view of an [`Outcome`].
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomeSummary<'a> {
    Ok { result: &'a Value },
    Fail { error: String },
}

/// A scripted failure, as supplied by the test author.
#[derive(Clone)]
pub enum Failure {
    /// Any non-error value; wrapped into a [`ScriptedError`] on delivery
    Value(Value),
    /// An existing error; passed through unchanged on delivery
    Error(Arc<dyn Error + Send + Sync>),
}

impl Failure {
    /// A failure without any scripted error.
    pub fn unspecified() -> Self {
        Self::Value(Value::Undefined)
    }

    /// Wrap an existing error.
    pub fn error(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Error(Arc::new(err))
    }

    /// Turns the scripted failure into the error that is delivered to callers.
    pub fn normalize(&self) -> ScriptedError {
        match self {
            Self::Error(err) => ScriptedError::Error(Arc::clone(err)),
            Self::Value(Value::Undefined) => ScriptedError::Wrapped {
                message: UNSPECIFIED_ERROR.to_string(),
                payload: Value::Undefined,
            },
            Self::Value(Value::Str(message)) => ScriptedError::Wrapped {
                message: message.clone(),
                payload: Value::Str(message.clone()),
            },
            Self::Value(other) => ScriptedError::Wrapped {
                message: other.to_diagnostic_string(),
                payload: other.clone(),
            },
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Error(err) => f.debug_tuple("Error").field(&err.to_string()).finish(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalize())
    }
}

impl From<Value> for Failure {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::Value(Value::from(message))
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::Value(Value::from(message))
    }
}

impl From<Arc<dyn Error + Send + Sync>> for Failure {
    fn from(err: Arc<dyn Error + Send + Sync>) -> Self {
        Self::Error(err)
    }
}

/// The error object delivered for a scripted failure.
#[derive(Debug, Clone, Error)]
pub enum ScriptedError {
    /// A scripted non-error value, carried as message and payload
    #[error("{message}")]
    Wrapped { message: String, payload: Value },
    /// A scripted error, forwarded as-is
    #[error(transparent)]
    Error(Arc<dyn Error + Send + Sync>),
}

impl ScriptedError {
    /// The scripted value, if the failure was not an error already.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Wrapped { payload, .. } => Some(payload),
            Self::Error(_) => None,
        }
    }

    /// The scripted error, if one was supplied.
    pub fn inner(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Error(err) => Some(&**err),
            Self::Wrapped { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn test_default_outcome_succeeds_with_undefined() {
        match Outcome::default() {
            Outcome::Succeed(value) => assert!(value.is_undefined()),
            Outcome::Fail(_) => panic!("Expected Succeed"),
        }
    }

    #[test]
    fn test_string_failure_becomes_message() {
        let err = Failure::from("oh no").normalize();
        assert_eq!(err.to_string(), "oh no");
        assert_eq!(err.payload(), Some(&Value::from("oh no")));
    }

    #[test]
    fn test_unspecified_failure_uses_default_message() {
        let err = Failure::unspecified().normalize();
        assert_eq!(err.to_string(), UNSPECIFIED_ERROR);
    }

    #[test]
    fn test_non_string_value_is_serialized() {
        let err = Failure::from(Value::list([1, 2])).normalize();
        assert_eq!(err.to_string(), "[1,2]");
        assert_eq!(err.payload(), Some(&Value::list([1, 2])));
    }

    #[test]
    fn test_error_passes_through() {
        let err = Failure::error(DiskError).normalize();
        assert_eq!(err.to_string(), "disk on fire");
        assert!(err.payload().is_none());
        let inner = err.inner().expect("inner error");
        assert!(inner.downcast_ref::<DiskError>().is_some());
    }

    #[test]
    fn test_outcome_summary_serializes() {
        let json = serde_json::to_string(&Outcome::Fail(Failure::from("bad")).summary())
            .expect("serialize");
        assert_eq!(json, r#"{"type":"fail","error":"bad"}"#);

        let json = serde_json::to_string(&Outcome::Succeed(Value::from(5)).summary())
            .expect("serialize");
        assert_eq!(json, r#"{"type":"ok","result":5}"#);
    }
}
