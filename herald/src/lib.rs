//! # herald - in-process publish/subscribe
//!
//! Publishers broadcast events; listeners register interest and receive
//! the events that match. An event is either *symbolic* (a name plus
//! [`Args`]) or *structured* (a typed [`Message`] value).
//!
//! ## Quick Start
//!
//! ```rust
//! use herald::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Message)]
//! #[herald(name = "Billing::InvoicePaid")]
//! struct InvoicePaid {
//!     amount: u64,
//! }
//!
//! #[derive(Default)]
//! struct Ledger {
//!     total: u64,
//! }
//!
//! impl EventHandlers for Ledger {
//!     fn declare(handlers: &mut HandlerTable<Self>) {
//!         handlers.on(|ledger: &mut Ledger, event: &InvoicePaid| {
//!             ledger.total += event.amount;
//!         });
//!     }
//! }
//!
//! let ledger = Arc::new(Subscriber::structured(Ledger::default()));
//! let publisher = Publisher::default();
//! publisher.subscribe(ledger.clone(), SubscribeOptions::new())?;
//! publisher.publish(&InvoicePaid { amount: 40 })?;
//!
//! assert_eq!(ledger.with(|ledger| ledger.total), 40);
//! # Ok::<(), herald::HeraldError>(())
//! ```
//!
//! ## Symbolic events
//!
//! ```rust
//! use herald::prelude::*;
//! use std::sync::Arc;
//!
//! let audit = Arc::new(Subscriber::new(Vec::<String>::new()).method(
//!     "on_order_placed",
//!     |log: &mut Vec<String>, args: &Args| {
//!         log.extend(args.kw_str("id").map(str::to_string));
//!     },
//! ));
//!
//! let publisher = Publisher::default();
//! publisher.subscribe(audit.clone(), SubscribeOptions::new().default_prefix())?;
//! publisher.broadcast("order-placed", &Args::new().kw("id", "A-17"))?;
//!
//! assert_eq!(*audit.lock(), vec!["A-17"]);
//! # Ok::<(), herald::HeraldError>(())
//! ```
//!
//! ## Features
//!
//! - `macros` (default): `#[derive(Message)]` and `#[derive(Typed)]`
//! - `tokio`: [`executor::TokioExecutor`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Kinds
    Ancestors,
    // Events
    Args,
    // Errors
    BoxError,
    DispatchError,
    DynMessage,
    Event,
    // Listeners
    EventHandlers,
    Filter,
    FilterError,
    HandlerTable,
    HeraldError,
    IntoOutcome,
    Kind,
    Listener,
    Message,
    StructuredListener,
    SubscribeError,
    Subscriber,
    Typed,
    clean_name,
    naming,
};

pub use herald_std::{
    ASYNC_BROADCASTER, BlockListener, Config, ConfigBuilder, DEFAULT_BROADCASTER, Delivery,
    Prefix, Publisher, Registration, SubscribeOptions,
};

/// Argument values.
pub use serde_json::Value;

/// Delivery backends.
pub mod broadcaster {
    pub use herald_std::broadcaster::{AsyncBroadcaster, Broadcaster, SyncBroadcaster};
}

/// Executors for asynchronous delivery.
pub mod executor {
    #[cfg(feature = "tokio")]
    pub use herald_std::executor::TokioExecutor;
    pub use herald_std::executor::{Executor, Job, PoolExecutor, ThreadExecutor};
}

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{Captured, EventRecorder, capture};
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Args,
        DispatchError,
        Event,
        EventHandlers,
        Filter,
        HandlerTable,
        HeraldError,
        Kind,
        Listener,
        Message,
        Publisher,
        SubscribeOptions,
        Subscriber,
        Typed,
    };
}

#[cfg(feature = "macros")]
pub use herald_macros::{Message, Typed};
