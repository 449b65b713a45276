//! Storyline Engine library.
//!
//! Scriptable test doubles: declare an ordered story of expected calls, each
//! with an optional expected argument and a scripted outcome, then let the
//! code under test drive the double and check the story was fully told.
//!
//! ## Structure
//!
//! - `registry` - Events a double accepts, their matchers and delivery modes
//! - `story` - Story scripting (builder, step handles, reset, completion)
//! - `replay` - Resolving intercepted calls against the current story
//! - `delivery` - Immediate and deferred outcome channels
//! - `diagnostics` - Side channel for replay mismatches
//! - `double` - Composition trait for hand-written doubles

pub mod config;
pub mod delivery;
pub mod diagnostics;
pub mod double;
pub mod matcher;
pub mod registry;
mod replay;
pub mod step;
pub mod story;

/// Test fixtures: story-driven doubles used by the scenario tests.
#[cfg(test)]
pub mod test_fixtures;

/// Scenario tests exercising full scripting and replay passes.
#[cfg(test)]
mod story_tests;

pub use config::StoryConfig;
pub use delivery::{Delivery, Pending};
pub use diagnostics::{DiagnosticSink, TracingSink, DIAGNOSTICS_TARGET};
#[cfg(any(test, feature = "testing"))]
pub use diagnostics::init_test_tracing;
pub use double::StoryDouble;
pub use matcher::Matcher;
pub use registry::{EventDefinition, EventRegistry};
pub use step::{ExpectedStep, StepSummary};
pub use story::{StepHandle, Story};

pub use storyline_domain::{
    structural_eq, DeliveryMode, EventName, Failure, Outcome, ScriptedError, StoryError, Value,
};
