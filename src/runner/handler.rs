//! Handler callables and their results

use crate::runner::Invocation;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// What a handler asks the dispatcher to do after it returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did its work
    Handled,

    /// The command has nothing to do; print the usage of its CLI level
    ShowHelp,
}

/// Result returned by every handler
pub type HandlerResult = anyhow::Result<Outcome>;

type SyncFn = dyn Fn(Invocation) -> HandlerResult + Send + Sync;
type AsyncFn = dyn Fn(Invocation) -> BoxFuture<'static, HandlerResult> + Send + Sync;

/// A command's behavior
#[derive(Clone)]
pub enum Handler {
    Sync(Arc<SyncFn>),
    Async(Arc<AsyncFn>),
}

impl Handler {
    /// Wrap a synchronous closure
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Invocation) -> HandlerResult + Send + Sync + 'static,
    {
        Handler::Sync(Arc::new(f))
    }

    /// Wrap a closure returning a future; the dispatcher blocks on it
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Handler::Async(Arc::new(
            move |invocation| -> BoxFuture<'static, HandlerResult> { Box::pin(f(invocation)) },
        ))
    }

    /// Handler used when a CLI defines no root behavior
    pub fn show_help() -> Self {
        Handler::from_fn(|_| Ok(Outcome::ShowHelp))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Handler::Async(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Sync(_) => write!(f, "Handler::Sync"),
            Handler::Async(_) => write!(f, "Handler::Async"),
        }
    }
}
