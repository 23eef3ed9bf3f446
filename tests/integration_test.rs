//! End-to-end scenarios across the containers, futures and durations.

use scalars::prelude::*;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// Literal scenarios
// =============================================================================

#[rstest]
fn test_sequence_of_three_successes() {
    let all = sequence_futures([successful_future(1), successful_future(2), successful_future(3)]);
    assert_eq!(all.value(), Optional::Some(Try::Success(vec![1, 2, 3])));
}

#[rstest]
fn test_sequence_with_a_failure_in_the_middle() {
    let all = sequence_futures([
        successful_future(1),
        failed_future(Exception::error("x")),
        successful_future(3),
    ]);
    assert_eq!(all.value(), Optional::Some(Try::Failure(Exception::error("x"))));
}

#[rstest]
fn test_reduce_of_nothing() {
    let reduced = reduce_futures_left(Vec::<Future<i32>>::new(), |a, b| a + b);
    assert_eq!(
        reduced.value(),
        Optional::Some(Try::Failure(Exception::no_such_element(
            "reduceLeft attempted on empty collection"
        )))
    );
}

#[rstest]
fn test_string_raise_is_wrapped() {
    let failed = Try::of(|| -> i32 { std::panic::panic_any("boom") }).failed().get();
    assert_eq!(failed.message(), "boom");
}

#[rstest]
fn test_option_from_nullable() {
    assert!(option::<i32>(None).is_empty());
    assert!(option(Some(0)).is_defined());
}

#[rstest]
fn test_duration_arithmetic() -> Result<(), Exception> {
    assert_eq!(minutes(59)?.plus(&minutes(1)?)?, hours(1)?);
    assert_eq!(hours(48)?.divided_by(2.0)?, days(1)?);
    assert_eq!(seconds(3)?.times(20.0)?, minutes(1)?);
    Ok(())
}

#[rstest]
fn test_fold_falls_back_to_failure_branch() {
    let folded = Try::Success(42).fold(
        |exception| format!("{}{}", exception.message(), exception.message().len()),
        |value| -> String { panic!("{}", value) },
    );
    assert_eq!(folded, "422");
}

// =============================================================================
// Cross-module flows
// =============================================================================

#[rstest]
fn test_success_failed_is_unsupported() {
    let failed = Try::Success(1).failed();
    let Try::Failure(Exception::UnsupportedOperation(message)) = failed else {
        panic!("expected an unsupported operation");
    };
    assert!(message.contains("Success.failed"));
}

#[rstest]
fn test_try_to_future_to_option_pipeline() {
    let parsed = Try::of(|| "12".parse::<i32>().unwrap_or_else(|_| panic!("not a number")));
    let doubled = future_from_try(parsed).map(|n| n * 2);
    let as_option = doubled.value().flat_map(|result| result.to_option());
    assert_eq!(as_option, Optional::Some(24));
}

#[rstest]
fn test_either_through_try_and_back() {
    let checked: Either<Exception, i32> = Try::of(|| 10 / 2).to_either();
    let halved = checked.map(|n| n / 2).filter_or_else(|n| *n > 0, || Exception::error("zero"));
    assert_eq!(halved, Either::Right(2));
    assert_eq!(halved.swap().to_option(), Optional::None);
}

#[rstest]
fn test_undef_or_helpers_round_out_plain_options() {
    let present = undef_or::map(Some(2), |n| n + 1);
    assert!(undef_or::defined(&present));
    assert_eq!(undef_or::fold(present, || 0, |n| n * 10), 30);
    assert_eq!(undef_or::filter_not(Some(4), |n| n % 2 == 0), None);
}

#[rstest]
fn test_future_unit_is_shared() {
    assert_eq!(future_unit(), future_unit());
    assert_eq!(future_unit().value(), Optional::Some(Try::Success(())));
}

#[rstest]
fn test_failed_promise_coerces_any_cause() {
    let promise = failed_promise::<u8, _>(String::from("refused"));
    assert!(promise.is_completed());
    assert_eq!(promise.future().value(), Optional::Some(Try::Failure(Exception::error("refused"))));
}

// =============================================================================
// Host bridge
// =============================================================================

#[tokio::test]
async fn test_host_future_adopted_and_chained() {
    let adopted = future_from_promise(async { Ok::<_, std::io::Error>(20) });
    let chained = adopted.flat_map(|n| successful_future(n + 1)).map(|n| n * 2);
    assert_eq!(chained.await, Ok(42));
}

#[tokio::test]
async fn test_rejected_host_error_keeps_its_text() {
    let adopted = future_from_promise(async {
        Err::<i32, Box<dyn std::error::Error + Send + Sync>>("socket closed".into())
    });
    assert_eq!(adopted.await, Err(Exception::error("socket closed")));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_driven_completion() -> Result<(), Exception> {
    let promise = new_promise();
    let completer = promise.clone();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let _timer = millis(250)?.from_now().then(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        completer.try_success("expired");
    });

    assert_eq!(promise.future().await, Ok("expired"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}
