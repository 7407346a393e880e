//! # herald-std
//!
//! Publishers and delivery for the Herald dispatcher.
//!
//! This crate provides:
//! - **Publishing**: [`Publisher`], [`SubscribeOptions`], [`Registration`]
//! - **Delivery**: [`broadcaster::SyncBroadcaster`], [`broadcaster::AsyncBroadcaster`],
//!   custom [`broadcaster::Broadcaster`] backends
//! - **Executors**: [`executor::ThreadExecutor`], [`executor::PoolExecutor`],
//!   closures, and a Tokio executor behind the `tokio` feature
//! - **Configuration**: [`Config`] with named broadcasters
//! - **Testing**: [`testing::EventRecorder`] and [`testing::capture`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use herald_core;

// Modules
pub mod broadcaster;
pub mod executor;
pub mod testing;

mod block;
mod config;
mod options;
mod publisher;
mod registration;

pub use block::BlockListener;
pub use config::{ASYNC_BROADCASTER, Config, ConfigBuilder, DEFAULT_BROADCASTER};
pub use options::{Delivery, Prefix, SubscribeOptions};
pub use publisher::Publisher;
pub use registration::Registration;
