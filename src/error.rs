//! Typed failure values.

use std::error::Error as StdError;

/// The error type returned by a stack run.
///
/// Exactly one kind originates inside the engine itself:
/// [`Error::MiddlewareReturnedNoValue`], raised by the termination sentinel
/// when every handler delegated and control fell off the end of the stack.
/// Anything else a run fails with is a handler's own error, carried opaquely
/// in [`Error::Handler`] — the engine never inspects it, never swallows it,
/// and never substitutes a fallback value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every handler called `next` and none produced a value.
    ///
    /// Carries the stack's name so the failing pipeline can be identified in
    /// logs and error reports.
    #[error("middleware stack `{middleware_name}` returned no value")]
    MiddlewareReturnedNoValue {
        /// Name of the stack that ran out of handlers.
        middleware_name: String,
    },

    /// A failure raised by a handler, passed through untouched.
    #[error(transparent)]
    Handler(#[from] Box<dyn StdError + Send + Sync + 'static>),
}

impl Error {
    /// Stable, machine-readable identifier for this error's kind.
    ///
    /// Useful where errors cross a reporting boundary that wants a
    /// discriminant rather than a `match`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MiddlewareReturnedNoValue { .. } => "middleware-returned-no-value",
            Self::Handler(_) => "handler-error",
        }
    }

    /// Wraps a handler's own failure for propagation through the stack.
    ///
    /// Accepts anything convertible into a boxed error, including plain
    /// strings:
    ///
    /// ```rust
    /// use baton::Error;
    ///
    /// let err = Error::handler("upstream unavailable");
    /// assert_eq!(err.kind(), "handler-error");
    /// ```
    pub fn handler(err: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self::Handler(err.into())
    }
}
