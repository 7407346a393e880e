use super::Broadcaster;
use herald_core::{Args, BoxError, Kind, Listener};
use std::sync::Arc;

/// Calls the listener inline and returns its result.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncBroadcaster;

impl Broadcaster for SyncBroadcaster {
    fn broadcast(
        &self,
        listener: Arc<dyn Listener>,
        _publisher: &'static Kind,
        method: &str,
        args: Args,
    ) -> Result<(), BoxError> {
        listener.call(method, &args)
    }
}
