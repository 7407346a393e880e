//! Delivery backends for symbolic events.
//!
//! A registration resolves its delivery mode to a [`Broadcaster`] when it is
//! created. The broadcaster decides *how* the listener method is invoked:
//! inline ([`SyncBroadcaster`]), on an executor ([`AsyncBroadcaster`]), or
//! by any custom backend.

pub(crate) mod deferred;
pub(crate) mod sync;

pub use deferred::AsyncBroadcaster;
pub use sync::SyncBroadcaster;

use herald_core::{Args, BoxError, Kind, Listener};
use std::sync::Arc;

/// Invokes a listener method on behalf of a publisher.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot deliver events",
    label = "missing `Broadcaster` implementation",
    note = "Implement `broadcast(listener, publisher, method, args)`."
)]
pub trait Broadcaster: Send + Sync + 'static {
    /// Deliver `args` to `listener.method`.
    ///
    /// Errors returned here abort the broadcast that triggered the call.
    fn broadcast(
        &self,
        listener: Arc<dyn Listener>,
        publisher: &'static Kind,
        method: &str,
        args: Args,
    ) -> Result<(), BoxError>;
}

impl<B: Broadcaster + ?Sized> Broadcaster for Arc<B> {
    fn broadcast(
        &self,
        listener: Arc<dyn Listener>,
        publisher: &'static Kind,
        method: &str,
        args: Args,
    ) -> Result<(), BoxError> {
        (**self).broadcast(listener, publisher, method, args)
    }
}
