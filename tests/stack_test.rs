use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use baton::{Error, Handler, Next, Options, Stack};

fn prepend_m1(input: String, next: Next<String, String>, options: &Options) -> Result<String, Error> {
    next.call(format!("m1 {input}"), options)
}

fn respond_m2(input: String, _next: Next<String, String>, _options: &Options) -> Result<String, Error> {
    Ok(format!("m2 {input}"))
}

fn counting(counter: Arc<AtomicUsize>) -> Handler<String, String> {
    Arc::new(move |input, next: Next<String, String>, options: &Options| {
        counter.fetch_add(1, Ordering::SeqCst);
        next.call(input, options)
    })
}

#[test]
fn empty_stack_holds_only_the_sentinel() {
    let unit: Stack<String, String> = Stack::new("unit-test", Vec::new());

    assert_eq!(unit.handlers().len(), 1);

    let err = unit.run("anything".into()).unwrap_err();
    assert_eq!(err.kind(), "middleware-returned-no-value");
    match err {
        Error::MiddlewareReturnedNoValue { middleware_name } => {
            assert_eq!(middleware_name, "unit-test");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn name_returns_the_construction_time_string() {
    let unit: Stack<String, String> = Stack::new("unit-test-stack", Vec::new());

    assert_eq!(unit.name(), "unit-test-stack");
}

#[test]
fn handlers_reports_the_supplied_sequence_plus_sentinel() {
    let m1: Handler<String, String> = Arc::new(prepend_m1);
    let m2: Handler<String, String> = Arc::new(respond_m2);

    let unit = Stack::new("unit-test", vec![m1.clone(), m2.clone()]);

    let fns = unit.handlers();
    assert_eq!(fns.len(), 3);
    assert!(Arc::ptr_eq(&fns[0], &m1));
    assert!(Arc::ptr_eq(&fns[1], &m2));
}

#[test]
fn run_executes_handlers_in_insertion_order() {
    let unit: Stack<String, String> = Stack::new(
        "unit-test",
        vec![Arc::new(prepend_m1), Arc::new(respond_m2)],
    );

    let actual = unit.run("test the run".into()).unwrap();
    assert_eq!(actual, "m2 m1 test the run");
}

#[test]
fn full_delegation_visits_every_handler_then_fails() {
    let counter = Arc::new(AtomicUsize::new(0));
    let unit = Stack::new(
        "unit-test",
        vec![
            counting(counter.clone()),
            counting(counter.clone()),
            counting(counter.clone()),
        ],
    );

    let err = unit.run("pass it on".into()).unwrap_err();

    // All three supplied handlers delegated; the fourth invocation was the
    // sentinel.
    assert_eq!(counter.load(Ordering::SeqCst), 3);
    assert!(matches!(err, Error::MiddlewareReturnedNoValue { .. }));
}

#[test]
fn concurrent_runs_each_own_their_cursor() {
    let unit: Stack<String, String> = Stack::new(
        "unit-test",
        vec![Arc::new(prepend_m1), Arc::new(respond_m2)],
    );

    std::thread::scope(|scope| {
        let first = scope.spawn(|| unit.run("first".into()));
        let second = scope.spawn(|| unit.run("second".into()));

        assert_eq!(first.join().unwrap().unwrap(), "m2 m1 first");
        assert_eq!(second.join().unwrap().unwrap(), "m2 m1 second");
    });
}

#[derive(Debug, thiserror::Error)]
#[error("downstream exploded")]
struct Downstream;

#[test]
fn handler_error_short_circuits_the_rest_of_the_stack() {
    let failing: Handler<String, String> =
        Arc::new(|_input, _next, options: &Options| Err((options.on_error)(Error::handler(Downstream))));

    let reached = Arc::new(AtomicBool::new(false));
    let tail = {
        let reached = reached.clone();
        let tail: Handler<String, String> = Arc::new(move |input, next: Next<String, String>, options: &Options| {
            reached.store(true, Ordering::SeqCst);
            next.call(input, options)
        });
        tail
    };

    let unit = Stack::new("unit-test", vec![failing, tail]);

    let err = unit.run("anything".into()).unwrap_err();
    assert_eq!(err.kind(), "handler-error");
    match err {
        Error::Handler(inner) => assert!(inner.downcast_ref::<Downstream>().is_some()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!reached.load(Ordering::SeqCst));
}

#[test]
fn run_with_applies_the_on_error_override() {
    let unit: Stack<String, String> = Stack::new("unit-test", Vec::new());

    let options = Options::new(Arc::new(|err| Error::handler(format!("wrapped: {err}"))));
    let err = unit.run_with("anything".into(), &options).unwrap_err();

    assert_eq!(err.kind(), "handler-error");
    assert_eq!(
        err.to_string(),
        "wrapped: middleware stack `unit-test` returned no value"
    );
}
