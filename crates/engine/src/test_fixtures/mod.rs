//! Test fixtures: story-driven doubles and helpers for scenario tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::calculator::CalculatorDouble;
//!
//! #[test]
//! fn test_sum() {
//!     let calc = CalculatorDouble::new();
//!     calc.expect_with("set", 3).unwrap();
//!     calc.set(3).unwrap();
//! }
//! ```

pub mod calculator;

use std::sync::Arc;

use crate::diagnostics::MockDiagnosticSink;

/// A diagnostic sink that must never be called.
pub fn silent_sink() -> Arc<MockDiagnosticSink> {
    let mut sink = MockDiagnosticSink::new();
    sink.expect_report().times(0);
    Arc::new(sink)
}

/// A diagnostic sink that must be called exactly `times` times.
pub fn counting_sink(times: usize) -> Arc<MockDiagnosticSink> {
    let mut sink = MockDiagnosticSink::new();
    sink.expect_report().times(times).return_const(());
    Arc::new(sink)
}
