//! Closure listeners registered with [`Publisher::on`](crate::Publisher::on).

use herald_core::{
    Args, BoxError, DispatchError, DynMessage, Event, IntoOutcome, Listener, StructuredListener,
};
use std::{any::type_name, fmt};

/// A closure receiving every event its registration lets through.
///
/// Symbolic events arrive as [`Event::Named`] with the broadcast's
/// arguments; structured events arrive as [`Event::Structured`] with empty
/// arguments.
pub struct BlockListener<F> {
    handler: F,
}

impl<F, R> BlockListener<F>
where
    F: Fn(Event<'_>, &Args) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    /// Wrap `handler`.
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F, R> Listener for BlockListener<F>
where
    F: Fn(Event<'_>, &Args) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn responds_to(&self, _method: &str) -> bool {
        true
    }

    fn call(&self, method: &str, args: &Args) -> Result<(), BoxError> {
        (self.handler)(Event::Named(method), args).into_outcome()
    }

    fn as_structured(&self) -> Option<&dyn StructuredListener> {
        Some(self as &dyn StructuredListener)
    }

    fn listener_name(&self) -> &str {
        "block"
    }
}

impl<F, R> StructuredListener for BlockListener<F>
where
    F: Fn(Event<'_>, &Args) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn trigger(&self, message: &dyn DynMessage) -> Result<(), DispatchError> {
        (self.handler)(Event::Structured(message), &Args::new())
            .into_outcome()
            .map_err(|source| DispatchError::Listener {
                listener: self.listener_name().to_string(),
                method: message.kind().name().to_string(),
                source,
            })
    }
}

impl<F> fmt::Debug for BlockListener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockListener")
            .field("handler", &type_name::<F>())
            .finish()
    }
}
