//! Sync replay scenarios.
//!
//! Tests cover:
//! - Scripted outcomes come back in order and the story completes
//! - Reset replays the same story from the start
//! - Scripted failures reach the caller unchanged and unlogged
//! - Structural argument matching on nested byte buffers
//! - Strict ordering with concurrent callers

use std::io;
use std::sync::Arc;

use crate::delivery::Delivery;
use crate::double::StoryDouble;
use crate::matcher::Matcher;
use crate::registry::EventRegistry;
use crate::story::Story;
use crate::test_fixtures::calculator::CalculatorDouble;
use crate::test_fixtures::silent_sink;
use storyline_domain::{Failure, StoryError, Value};

fn scripted_calculator() -> Result<CalculatorDouble, StoryError> {
    let calc = CalculatorDouble::with_story(
        Story::new(CalculatorDouble::registry()).with_sink(silent_sink()),
    );
    calc.expect_with("set", 3)?
        .done()
        .expect_with("add", 2)?
        .done()
        .expect("gives")?
        .ok(5);
    Ok(calc)
}

#[test]
fn test_calculator_story_replays_in_order() -> Result<(), StoryError> {
    let calc = scripted_calculator()?;

    let result = calc.set(3)?.add(2)?.gives()?;

    assert_eq!(result, Value::from(5));
    calc.assert_story_done()?;
    Ok(())
}

#[test]
fn test_outcome_of_delivers_immediately_for_sync_events() -> Result<(), StoryError> {
    let calc = scripted_calculator()?;

    let set = calc.outcome_of("set", Some(3.into()))?;
    assert!(matches!(set, Delivery::Immediate(Ok(Value::Undefined))));
    calc.outcome_of("add", Some(2.into()))?.into_result()?;
    let gives = calc.outcome_of("gives", None)?;
    assert!(!gives.is_deferred());
    assert_eq!(gives.into_result()?, Value::from(5));

    assert!(calc.story().is_done());
    Ok(())
}

#[test]
fn test_reset_replays_from_the_start() -> Result<(), StoryError> {
    let calc = scripted_calculator()?;

    for _ in 0..3 {
        assert_eq!(calc.set(3)?.add(2)?.gives()?, Value::from(5));
        calc.assert_story_done()?;
        calc.reset();
    }
    assert_eq!(calc.story().script_len(), 3);
    Ok(())
}

#[test]
fn test_reset_mid_story_restarts() -> Result<(), StoryError> {
    let calc = scripted_calculator()?;

    calc.set(3)?;
    assert_eq!(calc.story().remaining_steps(), 2);
    calc.reset();
    assert_eq!(calc.story().remaining_steps(), 3);
    assert_eq!(calc.set(3)?.add(2)?.gives()?, Value::from(5));
    Ok(())
}

#[test]
fn test_scripted_string_failure() -> Result<(), StoryError> {
    let story = Story::new(EventRegistry::new().event("a")).with_sink(silent_sink());
    story.expect("a")?.fail("oh no");

    let err = story.call("a", None).expect_err("scripted failure");
    assert_eq!(err.to_string(), "oh no");
    let scripted = err.as_scripted().expect("scripted");
    assert_eq!(scripted.payload(), Some(&Value::from("oh no")));
    story.assert_story_done()?;
    Ok(())
}

#[test]
fn test_scripted_error_passes_through() -> Result<(), StoryError> {
    let story = Story::new(EventRegistry::new().event("read")).with_sink(silent_sink());
    story
        .expect("read")?
        .fail(Failure::error(io::Error::new(io::ErrorKind::NotFound, "no such file")));

    let err = story.call("read", None).expect_err("scripted failure");
    assert_eq!(err.to_string(), "no such file");
    let inner = err
        .as_scripted()
        .and_then(|scripted| scripted.inner())
        .expect("inner error");
    let io_err = inner.downcast_ref::<io::Error>().expect("io error");
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    Ok(())
}

#[test]
fn test_unspecified_failure() -> Result<(), StoryError> {
    let story = Story::new(EventRegistry::new().event("a")).with_sink(silent_sink());
    story.expect("a")?.fail_unspecified();

    let err = story.call("a", None).expect_err("scripted failure");
    assert_eq!(err.to_string(), "unspecified error");
    Ok(())
}

#[test]
fn test_double_scripts_unspecified_failure_on_tail() -> Result<(), StoryError> {
    let calc = CalculatorDouble::with_story(
        Story::new(CalculatorDouble::registry()).with_sink(silent_sink()),
    );
    calc.expect("gives")?;
    calc.fail_unspecified()?;

    let err = calc.gives().expect_err("scripted failure");
    assert_eq!(err.to_string(), "unspecified error");
    Ok(())
}

#[test]
fn test_default_outcome_is_undefined() -> Result<(), StoryError> {
    let story = Story::new(EventRegistry::new().event("a"));
    story.expect("a")?;

    assert_eq!(story.call("a", None)?, Value::Undefined);
    Ok(())
}

#[test]
fn test_structural_matcher_on_nested_bytes() -> Result<(), StoryError> {
    let story = Story::new(EventRegistry::new().event_matching("write", Matcher::structural()))
        .with_sink(silent_sink());
    let nested = |word: &str| {
        Value::list([Value::from(12), Value::list([Value::from(34), Value::bytes(word)])])
    };
    story.expect_with("write", nested("wow"))?.ok(true);

    assert_eq!(story.call("write", Some(nested("wow")))?, Value::from(true));
    story.assert_story_done()?;
    Ok(())
}

#[test]
fn test_argument_is_optional_for_matching_events() -> Result<(), StoryError> {
    let calc = CalculatorDouble::with_story(
        Story::new(CalculatorDouble::registry()).with_sink(silent_sink()),
    );
    // No expected argument: any value is accepted
    calc.expect("set")?;

    calc.set(1234)?;
    calc.assert_story_done()?;
    Ok(())
}

#[test]
fn test_concurrent_callers_consume_steps_in_order() -> Result<(), StoryError> {
    const STEPS: i64 = 64;
    let story = Arc::new(Story::new(EventRegistry::new().event("tick")).with_sink(silent_sink()));
    for i in 0..STEPS {
        story.expect("tick")?.ok(i);
    }

    let mut results: Vec<i64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let story = Arc::clone(&story);
                scope.spawn(move || {
                    let mut seen = Vec::new();
                    for _ in 0..STEPS / 4 {
                        let value = story.call("tick", None).expect("tick");
                        seen.push(value.as_i64().expect("int"));
                    }
                    // Each caller observes its own results in story order
                    assert!(seen.windows(2).all(|w| w[0] < w[1]));
                    seen
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("join"))
            .collect()
    });

    results.sort_unstable();
    assert_eq!(results, (0..STEPS).collect::<Vec<_>>());
    story.assert_story_done()?;
    Ok(())
}

#[test]
fn test_instances_are_isolated() -> Result<(), StoryError> {
    let first = CalculatorDouble::new();
    let second = CalculatorDouble::new();
    first.expect("gives")?.ok(1);

    assert_eq!(second.story().script_len(), 0);
    second.assert_story_done()?;
    assert_eq!(first.gives()?, Value::from(1));
    Ok(())
}
