//! Asynchronous middleware stack.
//!
//! Structurally identical to the synchronous [`Stack`](crate::Stack) — same
//! construction contract, same sentinel, same cursor protocol — except that
//! every handler, the continuation, and `run` itself produce futures.
//! Suspension only ever
//! happens inside a handler (while it awaits its own asynchronous work); the
//! engine performs no I/O and adds no suspension points of its own.
//!
//! Handlers receive [`Options`] by value rather than by reference so the
//! futures they return are free-standing (`'static`) and can be driven by
//! any executor, moved across worker threads, or joined with other runs.
//! `Options` is an `Arc` around the error hook, so passing it on is one
//! reference-count bump.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::error;

use crate::error::Error;
use crate::options::Options;

/// A heap-allocated, type-erased future.
///
/// `Pin<Box<…>>` because the executor must poll the future in-place;
/// `Send + 'static` so runs compose into multi-threaded runtimes.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// An asynchronous handler.
///
/// The same three-argument shape as the synchronous [`Handler`], returning a
/// boxed future instead of a bare result. Plain `fn` items coerce directly:
///
/// ```rust
/// use baton::{AsyncHandler, AsyncNext, BoxFuture, Error, Options};
/// use std::sync::Arc;
///
/// fn greet(input: String, _next: AsyncNext<String, String>, _options: Options) -> BoxFuture<Result<String, Error>> {
///     Box::pin(async move { Ok(format!("hello {input}")) })
/// }
///
/// let handler: AsyncHandler<String, String> = Arc::new(greet);
/// ```
///
/// [`Handler`]: crate::Handler
pub type AsyncHandler<I, O> =
    Arc<dyn Fn(I, AsyncNext<I, O>, Options) -> BoxFuture<Result<O, Error>> + Send + Sync>;

// ── AsyncNext ────────────────────────────────────────────────────────────────

/// The continuation handed to every asynchronous handler.
///
/// Consumed by [`AsyncNext::call`], exactly like the synchronous
/// [`Next`](crate::Next): one delegation per handler, always forward.
pub struct AsyncNext<I, O> {
    fns: Arc<[AsyncHandler<I, O>]>,
    cursor: usize,
}

impl<I, O> AsyncNext<I, O> {
    fn new(fns: Arc<[AsyncHandler<I, O>]>) -> Self {
        Self { fns, cursor: 0 }
    }

    /// Delegates to the next handler in the stack.
    ///
    /// Returns that handler's future; awaiting it yields whatever the rest
    /// of the stack produces.
    pub fn call(mut self, input: I, options: Options) -> BoxFuture<Result<O, Error>> {
        // In range by construction: the sentinel sits at the end and never
        // delegates, so the cursor cannot pass it.
        let handler = Arc::clone(&self.fns[self.cursor]);
        self.cursor += 1;
        handler(input, self, options)
    }
}

// ── AsyncStack ───────────────────────────────────────────────────────────────

/// An ordered, immutable-after-construction sequence of asynchronous
/// handlers plus a diagnostic name.
///
/// Build one per logical pipeline and reuse it; concurrent runs each own
/// their cursor and never observe one another.
pub struct AsyncStack<I, O> {
    name: String,
    fns: Arc<[AsyncHandler<I, O>]>,
}

impl<I, O> AsyncStack<I, O> {
    /// Builds a stack from `handlers`, executed in the order given, with the
    /// termination sentinel appended.
    ///
    /// A stack built from zero handlers still holds the sentinel: running it
    /// always fails rather than silently resolving to nothing.
    pub fn new(name: impl Into<String>, handlers: Vec<AsyncHandler<I, O>>) -> Self
    where
        O: 'static,
    {
        let name = name.into();
        let mut fns = handlers;

        // Reaching the sentinel means every supplied handler delegated.
        let stack_name = name.clone();
        let sentinel: AsyncHandler<I, O> = Arc::new(move |_input, _next, options: Options| {
            error!(middleware = %stack_name, "middleware returned no value");
            let err = (options.on_error)(Error::MiddlewareReturnedNoValue {
                middleware_name: stack_name.clone(),
            });
            Box::pin(async move { Err(err) })
        });
        fns.push(sentinel);

        Self {
            name,
            fns: fns.into(),
        }
    }

    /// Executes the stack against `input` with the default error policy
    /// (failures re-raised as-is).
    pub async fn run(&self, input: I) -> Result<O, Error> {
        self.run_with(input, Options::default()).await
    }

    /// Executes the stack against `input`.
    ///
    /// Handlers run strictly in insertion order; any of them may suspend
    /// before deciding to return, delegate, or fail. If all of them
    /// delegate, the sentinel fails the run with
    /// [`Error::MiddlewareReturnedNoValue`].
    pub async fn run_with(&self, input: I, options: Options) -> Result<O, Error> {
        AsyncNext::new(Arc::clone(&self.fns)).call(input, options).await
    }

    /// The diagnostic name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full handler sequence, including the termination sentinel.
    ///
    /// Exposed for introspection and testing — a stack built from N handlers
    /// reports N + 1 entries.
    pub fn handlers(&self) -> &[AsyncHandler<I, O>] {
        &self.fns
    }
}
