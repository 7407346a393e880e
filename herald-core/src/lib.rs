//! # herald-core
//!
//! Core traits for the Herald publish/subscribe dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! listener libraries that don't need the publisher implementation in
//! `herald-std`.
//!
//! # Two Event Variants
//!
//! Every broadcast carries an [`Event`], which is either:
//!
//! - **Named**: a symbolic event identified by a string. Its payload travels
//!   separately as [`Args`] and is delivered to a listener *method* chosen by
//!   name (optionally renamed or prefixed per registration).
//! - **Structured**: a [`Message`] value whose [`Kind`] drives routing. It is
//!   delivered through the [`StructuredListener`] contract to the handler
//!   named by [`naming::handler_name`].
//!
//! The variant is decided once and determines the whole dispatch path.
//!
//! # Matching
//!
//! [`Filter`] describes which events a registration accepts. Matching
//! branches on the event variant first; comparing a name filter with a
//! structured event (or a kind filter with a named event) is an error,
//! never a silent coercion.
//!
//! # Listeners
//!
//! - [`Listener`] - the capability every registration target has
//! - [`StructuredListener`] - the opt-in contract for structured events
//! - [`HandlerTable`] / [`EventHandlers`] - declarative handler registration
//! - [`Subscriber`] - listener state paired with its handler table
//!
//! # Error Types
//!
//! - [`HeraldError`] - Top-level error type
//! - [`DispatchError`] - Broadcast-time errors
//! - [`SubscribeError`] - Subscribe-time errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod args;
mod error;
mod event;
mod filter;
mod handlers;
mod kind;
mod listener;
mod message;
pub mod naming;
mod response;

// Re-exports
pub use args::Args;
pub use error::{BoxError, DispatchError, FilterError, HeraldError, SubscribeError};
pub use event::{Event, clean_name};
pub use filter::Filter;
pub use handlers::{EventHandlers, HandlerTable, Subscriber};
pub use kind::{Ancestors, Kind, Typed};
pub use listener::{Listener, StructuredListener};
pub use message::{DynMessage, Message};
pub use response::IntoOutcome;
