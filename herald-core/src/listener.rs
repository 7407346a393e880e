//! # Listener capabilities
//!
//! A listener is the target of a registration. Every listener can be asked
//! whether it responds to a method name and be called with a symbolic
//! event's arguments. Listeners that opt into structured events additionally
//! expose the [`StructuredListener`] contract through
//! [`Listener::as_structured`].
//!
//! Listeners are shared behind `Arc` between the publisher that holds the
//! registration and the code that created them, so all methods take `&self`;
//! implementations keep mutable state behind interior mutability
//! (see [`Subscriber`](crate::Subscriber)).

use crate::{
    args::Args,
    error::{BoxError, DispatchError},
    message::DynMessage,
};

/// A target for symbolic events.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener`",
    label = "missing `Listener` implementation",
    note = "Wrap your state in `Subscriber` or implement `responds_to` and `call`."
)]
pub trait Listener: Send + Sync + 'static {
    /// Whether this listener has a method called `method`.
    fn responds_to(&self, method: &str) -> bool;

    /// Invoke `method` with the symbolic event's arguments.
    fn call(&self, method: &str, args: &Args) -> Result<(), BoxError>;

    /// The structured-event contract, when this listener implements it.
    fn as_structured(&self) -> Option<&dyn StructuredListener> {
        None
    }

    /// Whether this listener participates in structured dispatch.
    fn is_structured_listener(&self) -> bool {
        self.as_structured().is_some()
    }

    /// Name used in diagnostics.
    fn listener_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// The contract for listeners that receive structured events.
///
/// `trigger` looks up the handler derived from the message kind (see
/// [`handler_name`](crate::naming::handler_name)) and fails with
/// [`DispatchError::UnhandledEvent`] when none exists.
pub trait StructuredListener: Send + Sync {
    /// Run the handler for `message`.
    fn trigger(&self, message: &dyn DynMessage) -> Result<(), DispatchError>;
}
