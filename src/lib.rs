//! # baton
//!
//! A middleware stack for Rust pipelines: an ordered list of handlers, each
//! of which transforms the input and passes it on, returns a result, or
//! fails. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Your pipeline owns the semantics — what the input means, what the
//! handlers do, how errors are reported. baton owns exactly one thing: the
//! execution protocol. Handlers run strictly in the order you add them, each
//! one delegates explicitly through the [`Next`] continuation it is handed,
//! and a run that exhausts every handler does not trail off into nothing —
//! an implicitly appended **termination sentinel** fails it with
//! [`Error::MiddlewareReturnedNoValue`], carrying the stack's name so you
//! know which pipeline fell through.
//!
//! What baton intentionally ignores:
//!
//! - **Routing** — which stack runs for which request is your dispatcher's job
//! - **Retries / backoff** — wrap a handler if you want them
//! - **Error formatting** — failures flow through the [`OnError`] hook you
//!   supply; how they are rendered is up to you
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use baton::{Error, Next, Options, Stack};
//!
//! fn normalize(input: String, next: Next<String, String>, options: &Options) -> Result<String, Error> {
//!     next.call(input.trim().to_lowercase(), options)
//! }
//!
//! fn respond(input: String, _next: Next<String, String>, _options: &Options) -> Result<String, Error> {
//!     Ok(format!("handled: {input}"))
//! }
//!
//! let stack: Stack<String, String> = Stack::new(
//!     "request-pipeline",
//!     vec![Arc::new(normalize), Arc::new(respond)],
//! );
//!
//! assert_eq!(stack.run("  HELLO  ".into()).unwrap(), "handled: hello");
//! ```
//!
//! The asynchronous variant, [`AsyncStack`], has the identical shape — its
//! handlers return a [`BoxFuture`] and may suspend on their own asynchronous
//! work before deciding to return, delegate, or fail. `run` is awaitable and
//! composes into larger async pipelines.

mod async_stack;
mod error;
mod options;
mod stack;

pub use async_stack::{AsyncHandler, AsyncNext, AsyncStack, BoxFuture};
pub use error::Error;
pub use options::{OnError, Options};
pub use stack::{Handler, Next, Stack};
