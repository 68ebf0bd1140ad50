//! Per-run configuration.
//!
//! There is deliberately no implicit default-parameter magic here: the
//! options value is built once per run and passed explicitly through every
//! handler invocation, so what a handler receives is always what the caller
//! (or [`Options::default`]) decided.

use std::sync::Arc;

use crate::error::Error;

/// The error hook.
///
/// Called with every failure the stack signals; whatever it returns is the
/// value actually raised to the caller. The default hook re-raises its
/// argument unchanged — override it to wrap, translate, or record failures
/// on their way out.
pub type OnError = Arc<dyn Fn(Error) -> Error + Send + Sync>;

/// Options recognised by the `run_with` methods on [`Stack`](crate::Stack)
/// and [`AsyncStack`](crate::AsyncStack).
#[derive(Clone)]
pub struct Options {
    /// Called whenever the stack must signal failure. Its return value is
    /// what the caller sees as `Err`.
    pub on_error: OnError,
}

impl Options {
    /// Options carrying a caller-supplied error hook.
    pub fn new(on_error: OnError) -> Self {
        Self { on_error }
    }
}

impl Default for Options {
    /// The "re-raise as-is" policy: failures propagate unchanged.
    fn default() -> Self {
        Self {
            on_error: Arc::new(|err| err),
        }
    }
}
