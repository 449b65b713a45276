//! Storyline domain vocabulary.
//!
//! Pure types shared by every story double: dynamic [`Value`]s and their
//! structural equality, event names and delivery modes, scripted outcomes,
//! and the [`StoryError`] taxonomy. No I/O and no logging live here.

pub mod error;
pub mod event;
pub mod outcome;
pub mod value;

pub use error::StoryError;
pub use event::{DeliveryMode, EventName};
pub use outcome::{Failure, Outcome, OutcomeSummary, ScriptedError, UNSPECIFIED_ERROR};
pub use value::{structural_eq, Value};
