//! Argument matchers.

use std::fmt;
use std::sync::Arc;

use storyline_domain::{structural_eq, Value};

type MatchFn = dyn Fn(&Value, &Value) -> bool + Send + Sync;

/// Predicate comparing an expected argument against the actual one.
///
/// Called as `matcher(expected, actual)`.
#[derive(Clone)]
pub struct Matcher(Arc<MatchFn>);

impl Matcher {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// The default matcher: deep structural equality.
    pub fn structural() -> Self {
        Self::new(structural_eq)
    }

    pub fn matches(&self, expected: &Value, actual: &Value) -> bool {
        (self.0)(expected, actual)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matcher(..)")
    }
}
