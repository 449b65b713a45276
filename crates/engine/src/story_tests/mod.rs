//! Scenario tests: complete scripting and replay passes through doubles.

mod sync_story_tests;
