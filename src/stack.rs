//! Synchronous middleware stack.
//!
//! # The execution protocol
//!
//! A [`Stack`] holds handlers in insertion order. [`Stack::run`] hands the
//! input to handler 0 along with a [`Next`] continuation; from there every
//! handler makes exactly one of three moves:
//!
//! - **return a result** — `Ok(value)` ends the run successfully,
//! - **delegate** — `next.call(transformed, options)` hands a (possibly
//!   transformed) input to the following handler and propagates whatever it
//!   yields,
//! - **fail** — `Err(...)` ends the run; by convention the error is routed
//!   through `options.on_error` first.
//!
//! Construction appends one extra handler, the **termination sentinel**. If
//! every supplied handler delegates, control reaches the sentinel and the
//! run fails with [`Error::MiddlewareReturnedNoValue`] — falling off the end
//! of a stack is never silent.
//!
//! # Why `Next` is consumed by value
//!
//! The continuation owns the cursor for one delegation step and is moved
//! into [`Next::call`]. A handler therefore delegates at most once, and only
//! ever forward: skipping, re-entry, and double-delegation are unrepresentable
//! rather than merely discouraged.

use std::sync::Arc;

use tracing::error;

use crate::error::Error;
use crate::options::Options;

/// A synchronous handler.
///
/// Accepts the input, the continuation, and the run options. Plain `fn`
/// items with this shape coerce directly:
///
/// ```rust
/// use baton::{Error, Handler, Next, Options};
/// use std::sync::Arc;
///
/// fn greet(input: String, _next: Next<String, String>, _options: &Options) -> Result<String, Error> {
///     Ok(format!("hello {input}"))
/// }
///
/// let handler: Handler<String, String> = Arc::new(greet);
/// ```
pub type Handler<I, O> =
    Arc<dyn Fn(I, Next<I, O>, &Options) -> Result<O, Error> + Send + Sync>;

// ── Next ─────────────────────────────────────────────────────────────────────

/// The continuation handed to every handler.
///
/// Holds the position of the next handler to run. Calling [`Next::call`]
/// consumes the continuation, advances past that handler, and invokes it
/// with the same three-argument shape — so delegation composes all the way
/// down the stack.
pub struct Next<I, O> {
    fns: Arc<[Handler<I, O>]>,
    cursor: usize,
}

impl<I, O> Next<I, O> {
    fn new(fns: Arc<[Handler<I, O>]>) -> Self {
        Self { fns, cursor: 0 }
    }

    /// Delegates to the next handler in the stack and returns its result.
    pub fn call(mut self, input: I, options: &Options) -> Result<O, Error> {
        // In range by construction: the sentinel sits at the end and never
        // delegates, so the cursor cannot pass it.
        let handler = Arc::clone(&self.fns[self.cursor]);
        self.cursor += 1;
        handler(input, self, options)
    }
}

// ── Stack ────────────────────────────────────────────────────────────────────

/// An ordered, immutable-after-construction sequence of handlers plus a
/// diagnostic name.
///
/// Build one per logical pipeline, typically at startup, and reuse it across
/// runs. Each run owns its own cursor, so a `Stack` shared between threads
/// needs no locking.
pub struct Stack<I, O> {
    name: String,
    fns: Arc<[Handler<I, O>]>,
}

impl<I, O> Stack<I, O> {
    /// Builds a stack from `handlers`, executed in the order given.
    ///
    /// The termination sentinel is appended here, once; afterwards the
    /// handler list never changes. A stack built from zero handlers still
    /// holds the sentinel, so running it always fails rather than silently
    /// returning nothing.
    pub fn new(name: impl Into<String>, handlers: Vec<Handler<I, O>>) -> Self {
        let name = name.into();
        let mut fns = handlers;

        // Reaching the sentinel means every supplied handler delegated.
        let stack_name = name.clone();
        let sentinel: Handler<I, O> = Arc::new(move |_input, _next, options: &Options| {
            error!(middleware = %stack_name, "middleware returned no value");
            Err((options.on_error)(Error::MiddlewareReturnedNoValue {
                middleware_name: stack_name.clone(),
            }))
        });
        fns.push(sentinel);

        Self {
            name,
            fns: fns.into(),
        }
    }

    /// Executes the stack against `input` with the default error policy
    /// (failures re-raised as-is).
    pub fn run(&self, input: I) -> Result<O, Error> {
        self.run_with(input, &Options::default())
    }

    /// Executes the stack against `input`.
    ///
    /// Handlers run strictly in insertion order. The first one to return
    /// without delegating decides the outcome; if all of them delegate, the
    /// sentinel fails the run with [`Error::MiddlewareReturnedNoValue`].
    pub fn run_with(&self, input: I, options: &Options) -> Result<O, Error> {
        Next::new(Arc::clone(&self.fns)).call(input, options)
    }

    /// The diagnostic name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full handler sequence, including the termination sentinel.
    ///
    /// Exposed for introspection and testing — a stack built from N handlers
    /// reports N + 1 entries.
    pub fn handlers(&self) -> &[Handler<I, O>] {
        &self.fns
    }
}
