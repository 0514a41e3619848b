#![cfg(feature = "function")]
//! Integration tests for once, negate, memoize and partial.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::rstest;
use underbar::Error;
use underbar::collection::{filter, try_each, try_reduce};
use underbar::function::{Argument, Callable, Function, __, memoize, memoize_with, negate, once, partial};
use underbar::value::{Value, json, truthy};

fn counted<F>(body: F) -> (Function, Arc<AtomicUsize>)
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let function = Function::new(move |arguments| {
        counter.fetch_add(1, Ordering::SeqCst);
        body(arguments)
    });
    (function, calls)
}

fn divide() -> Function {
    Function::new(|arguments| {
        let numerator = arguments.first().and_then(Value::as_f64).unwrap_or(f64::NAN);
        let denominator = arguments.get(1).and_then(Value::as_f64).unwrap_or(f64::NAN);
        json!(numerator / denominator)
    })
}

// =============================================================================
// Callable
// =============================================================================

#[rstest]
#[case(json!(null), "null")]
#[case(json!(1), "number")]
#[case(json!("f"), "string")]
#[case(json!([]), "array")]
#[case(json!({}), "object")]
fn uncallable_values_report_their_kind(#[case] value: Value, #[case] kind: &'static str) {
    let callable = Callable::from(value);
    assert_eq!(callable.call(&[]), Err(Error::InvalidCallable { found: kind }));
    assert!(callable.iteratee().is_err());
    assert!(callable.reducer().is_err());
}

#[rstest]
fn dynamic_iteratee_fails_before_visiting_anything() {
    let (function, calls) = counted(|_| Value::Null);
    let working = Callable::from(function);
    try_each(&json!([1, 2, 3]), working.iteratee().unwrap()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let broken = Callable::from(json!("not a function"));
    assert!(matches!(
        broken.iteratee(),
        Err(Error::InvalidCallable { found: "string" })
    ));
}

#[rstest]
fn dynamic_reducer_errors_stop_the_fold() {
    let failing = Callable::from(Function::fallible(|arguments| {
        if arguments[1] == json!(2) {
            Err(Error::invalid_callable(&arguments[1]))
        } else {
            Ok(arguments[1].clone())
        }
    }));
    let outcome = try_reduce(&json!([1, 2, 3]), failing.reducer().unwrap(), Some(json!(0)));
    assert_eq!(outcome, Err(Error::InvalidCallable { found: "number" }));
}

// =============================================================================
// once
// =============================================================================

#[rstest]
fn once_invokes_a_single_time() {
    let (function, calls) = counted(|arguments| arguments[0].clone());
    let initialize = once(function);
    assert_eq!(initialize.call(&[json!(1)]), Ok(json!(1)));
    assert_eq!(initialize.call(&[json!(2)]), Ok(json!(1)));
    assert_eq!(initialize.clone().call(&[json!(3)]), Ok(json!(1)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn once_is_shared_across_threads() {
    let (function, calls) = counted(|_| json!("ready"));
    let initialize = once(function);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let initialize = initialize.clone();
            std::thread::spawn(move || initialize.call(&[]))
        })
        .collect();
    for handle in handles {
        let outcome = handle.join().unwrap().unwrap();
        assert!(outcome == json!("ready") || outcome.is_null());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(initialize.call(&[]), Ok(json!("ready")));
}

// =============================================================================
// negate
// =============================================================================

#[rstest]
fn negate_composes_with_filter() {
    let is_odd = Function::new(|arguments| json!(arguments[0].as_i64().unwrap_or(0) % 2 != 0));
    let is_even = negate(is_odd);
    let evens = filter(&json!([1, 2, 3, 4]), |value, _, _| {
        is_even.call(&[value.clone()]).is_ok_and(|result| truthy(&result))
    });
    assert_eq!(evens, vec![json!(2), json!(4)]);
}

#[rstest]
fn negate_of_uncallable_fails_when_called() {
    let negated = negate(json!(true));
    assert_eq!(negated.call(&[]), Err(Error::InvalidCallable { found: "boolean" }));
}

// =============================================================================
// memoize
// =============================================================================

#[rstest]
fn memoize_computes_each_key_once() {
    let (function, calls) = counted(|arguments| {
        json!(arguments[0].as_u64().map_or(0, |number| (1..=number).product::<u64>()))
    });
    let factorial = memoize(function);
    assert_eq!(factorial.call(&[json!(5)]), Ok(json!(120)));
    assert_eq!(factorial.call(&[json!(5)]), Ok(json!(120)));
    assert_eq!(factorial.call(&[json!(3)]), Ok(json!(6)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(factorial.cache().len(), 2);
}

#[rstest]
fn memoize_keys_by_first_argument_only() {
    let (function, calls) = counted(|arguments| arguments[1].clone());
    let memoized = memoize(function);
    assert_eq!(memoized.call(&[json!("k"), json!(1)]), Ok(json!(1)));
    assert_eq!(memoized.call(&[json!("k"), json!(2)]), Ok(json!(1)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn memoize_number_and_string_share_a_key() {
    let (function, calls) = counted(|_| json!("computed"));
    let memoized = memoize(function);
    memoized.call(&[json!(1)]).unwrap();
    memoized.call(&[json!("1")]).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn memoize_with_custom_hasher() {
    let (function, calls) = counted(|arguments| json!(arguments.len()));
    let hasher = Function::new(|arguments| {
        json!(arguments.iter().map(ToString::to_string).collect::<Vec<_>>().join(","))
    });
    let memoized = memoize_with(function, hasher);
    memoized.call(&[json!(1), json!(2)]).unwrap();
    memoized.call(&[json!(1), json!(2)]).unwrap();
    memoized.call(&[json!(1), json!(3)]).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(memoized.cache().contains_key("1,2"));
}

#[rstest]
fn memoize_cache_is_inspectable_and_editable() {
    let memoized = memoize(Function::new(|_| json!("fresh")));
    memoized.cache().insert("seeded".to_owned(), json!("stale"));
    assert_eq!(memoized.call(&[json!("seeded")]), Ok(json!("stale")));
}

#[rstest]
fn memoize_of_uncallable_hasher_fails() {
    let memoized = memoize_with(Function::new(|_| Value::Null), json!(0));
    assert_eq!(
        memoized.call(&[json!(1)]),
        Err(Error::InvalidCallable { found: "number" })
    );
}

// =============================================================================
// partial
// =============================================================================

#[rstest]
fn partial_placeholder_takes_the_first_call_argument() {
    let half = underbar::partial!(divide(), __, 2);
    assert_eq!(half.call(&[json!(10)]), Ok(json!(5.0)));
}

#[rstest]
fn partial_binds_leading_arguments() {
    let ten_over = underbar::partial!(divide(), 10);
    assert_eq!(ten_over.call(&[json!(4)]), Ok(json!(2.5)));
}

#[rstest]
fn partial_function_form_matches_macro() {
    let half = partial(divide(), vec![Argument::from(__), Argument::from(json!(2))]);
    let macro_half = underbar::partial!(divide(), __, 2);
    assert_eq!(half.call(&[json!(9)]), macro_half.call(&[json!(9)]));
}

#[rstest]
fn partial_appends_surplus_arguments() {
    let collect = Function::new(|arguments| Value::Array(arguments.to_vec()));
    let bound = underbar::partial!(collect, "a", __);
    assert_eq!(
        bound.call(&[json!("b"), json!("c"), json!("d")]),
        Ok(json!(["a", "b", "c", "d"]))
    );
}

#[rstest]
fn partial_keeps_captured_context() {
    struct Greeter {
        greeting: String,
    }

    let greeter = Arc::new(Greeter {
        greeting: "hi".to_owned(),
    });
    let context = Arc::clone(&greeter);
    let greet = Function::new(move |arguments| {
        json!(format!("{} {}", context.greeting, arguments[0].as_str().unwrap_or_default()))
    });
    let greet_moe = underbar::partial!(greet, "moe");
    assert_eq!(greet_moe.call(&[]), Ok(json!("hi moe")));
    assert_eq!(greeter.greeting, "hi");
}
