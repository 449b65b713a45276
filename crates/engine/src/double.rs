//! Composition seam for hand-written doubles.
//!
//! A double owns (or borrows) a [`Story`] and implements [`StoryDouble`];
//! the scripting and replay surface comes along as provided methods, so the
//! test can script the double itself:
//!
//! ```rust
//! use storyline_engine::{EventRegistry, Story, StoryDouble, StoryError, Value};
//!
//! struct Clock {
//!     story: Story,
//! }
//!
//! impl StoryDouble for Clock {
//!     fn story(&self) -> &Story {
//!         &self.story
//!     }
//! }
//!
//! impl Clock {
//!     fn now(&self) -> Result<i64, StoryError> {
//!         Ok(self.story.call("now", None)?.as_i64().unwrap_or_default())
//!     }
//! }
//!
//! # fn main() -> Result<(), StoryError> {
//! let clock = Clock { story: Story::new(EventRegistry::new().event("now")) };
//! clock.expect("now")?.ok(1_700_000_000_i64);
//! assert_eq!(clock.now()?, 1_700_000_000);
//! clock.assert_story_done()?;
//! # Ok(())
//! # }
//! ```

use storyline_domain::{EventName, Failure, StoryError, Value};

use crate::delivery::Delivery;
use crate::story::{StepHandle, Story};

/// A test double driven by a [`Story`].
pub trait StoryDouble {
    fn story(&self) -> &Story;

    fn expect(&self, event: impl Into<EventName>) -> Result<StepHandle<'_>, StoryError> {
        self.story().expect(event)
    }

    fn expect_with(
        &self,
        event: impl Into<EventName>,
        arg: impl Into<Value>,
    ) -> Result<StepHandle<'_>, StoryError> {
        self.story().expect_with(event, arg)
    }

    fn ok(&self, result: impl Into<Value>) -> Result<&Story, StoryError> {
        self.story().ok(result)
    }

    fn fail(&self, error: impl Into<Failure>) -> Result<&Story, StoryError> {
        self.story().fail(error)
    }

    fn fail_unspecified(&self) -> Result<&Story, StoryError> {
        self.story().fail_unspecified()
    }

    fn reset(&self) {
        self.story().reset()
    }

    fn assert_story_done(&self) -> Result<(), StoryError> {
        self.story().assert_story_done()
    }

    fn outcome_of(
        &self,
        event: impl Into<EventName>,
        data: Option<Value>,
    ) -> Result<Delivery, StoryError> {
        self.story().outcome_of(event, data)
    }
}

impl StoryDouble for Story {
    fn story(&self) -> &Story {
        self
    }
}
