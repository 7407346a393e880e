//! Structured event types.

use crate::kind::{Kind, Typed};
use std::{any::Any, fmt::Debug};

/// A structured event: a typed value whose [`Kind`] drives routing.
///
/// Messages carry their payload as fields. They must be cloneable so
/// recorders and deferred deliveries can keep their own copy.
///
/// # Example
///
/// ```rust
/// use herald_core::{Kind, Message, Typed};
///
/// #[derive(Clone, Debug)]
/// struct OrderPlaced {
///     id: u64,
/// }
///
/// impl Typed for OrderPlaced {
///     const KIND: &'static Kind = &Kind::of::<Self>("Orders::OrderPlaced");
/// }
///
/// impl Message for OrderPlaced {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Typed + Clone + Debug + Send + Sync + 'static`",
    note = "Derive `Message` or implement `Typed` and `Message` by hand."
)]
pub trait Message: Typed + Any + Clone + Debug + Send + Sync {}

/// Object-safe view of a [`Message`].
pub trait DynMessage: Debug + Send + Sync + 'static {
    /// The runtime kind of this message.
    fn kind(&self) -> &'static Kind;

    /// Access the concrete value for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Clone into a new boxed message.
    fn clone_message(&self) -> Box<dyn DynMessage>;
}

impl<M: Message> DynMessage for M {
    fn kind(&self) -> &'static Kind {
        M::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_message(&self) -> Box<dyn DynMessage> {
        Box::new(self.clone())
    }
}

impl dyn DynMessage {
    /// Downcast to a concrete message type.
    pub fn downcast_ref<M: Message>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }

    /// Whether the concrete type is `M`.
    pub fn is<M: Message>(&self) -> bool {
        self.as_any().is::<M>()
    }
}

impl Clone for Box<dyn DynMessage> {
    fn clone(&self) -> Self {
        self.clone_message()
    }
}
