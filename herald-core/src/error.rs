//! Error types for Herald.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HeraldError`] - Top-level error type for all Herald operations
//! - [`DispatchError`] - Errors raised while a broadcast is delivered
//! - [`SubscribeError`] - Errors raised when a registration is created
//! - [`FilterError`] - Errors building a filter

use thiserror::Error;

/// A boxed error type for errors raised by listener code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Herald operations.
#[derive(Error, Debug)]
pub enum HeraldError {
    /// An error occurred during broadcast.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// An error occurred while subscribing.
    #[error("subscribe error: {0}")]
    Subscribe(#[from] SubscribeError),

    /// A filter could not be built.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),
}

/// Errors that abort a broadcast.
///
/// Listeners notified before the failing registration are not rolled back.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A structured listener has no handler for the event's kind.
    #[error("Event {event} not handled in {listener}")]
    UnhandledEvent {
        /// Kind name of the event.
        event: String,
        /// Type name of the listener.
        listener: String,
    },

    /// The filter cannot be evaluated against this event variant.
    #[error("filter {filter} cannot match event {event}")]
    UnsupportedFilter {
        /// Description of the filter.
        filter: String,
        /// Name or kind of the event.
        event: String,
    },

    /// A synchronously delivered listener failed.
    #[error("listener {listener} failed in `{method}`")]
    Listener {
        /// Type name of the listener.
        listener: String,
        /// The method or handler that was called.
        method: String,
        /// The error returned by listener code.
        #[source]
        source: BoxError,
    },
}

/// Errors detected while building a registration.
#[derive(Error, Debug)]
pub enum SubscribeError {
    /// The filter can never match anything this listener accepts.
    #[error("filter {filter} is not supported for listener {listener}")]
    UnsupportedFilter {
        /// Description of the filter.
        filter: String,
        /// Type name of the listener.
        listener: String,
    },

    /// No broadcaster is registered under this name.
    #[error("no broadcaster registered as `{0}`")]
    UnknownBroadcaster(String),
}

/// Errors building a [`Filter`](crate::Filter).
#[derive(Error, Debug)]
pub enum FilterError {
    /// The regular expression did not compile.
    #[error("invalid event pattern: {0}")]
    Pattern(#[from] regex::Error),
}
