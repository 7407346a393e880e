//! The two event variants a publisher can broadcast.

use crate::message::{DynMessage, Message};
use std::fmt;

/// An event handed to `broadcast`.
///
/// The variant decides the whole dispatch path: named events are routed to
/// listener methods by name, structured events to handlers derived from the
/// message kind.
#[derive(Clone, Copy)]
pub enum Event<'a> {
    /// A symbolic event identified only by its name.
    Named(&'a str),
    /// A structured event whose kind drives routing.
    Structured(&'a dyn DynMessage),
}

impl<'a> Event<'a> {
    /// The event name for named events.
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Event::Named(name) => Some(name),
            Event::Structured(_) => None,
        }
    }

    /// The message for structured events.
    pub fn message(&self) -> Option<&'a dyn DynMessage> {
        match *self {
            Event::Named(_) => None,
            Event::Structured(message) => Some(message),
        }
    }

    /// Downcast a structured event to `M`.
    pub fn downcast_ref<M: Message>(&self) -> Option<&'a M> {
        self.message().and_then(|message| message.downcast_ref::<M>())
    }

    /// Whether this is a named event.
    pub fn is_named(&self) -> bool {
        matches!(self, Event::Named(_))
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Event::Structured(message) => f.debug_tuple("Structured").field(message).finish(),
        }
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Named(name) => f.write_str(name),
            Event::Structured(message) => f.write_str(message.kind().name()),
        }
    }
}

impl<'a> From<&'a str> for Event<'a> {
    fn from(name: &'a str) -> Self {
        Event::Named(name)
    }
}

impl<'a> From<&'a dyn DynMessage> for Event<'a> {
    fn from(message: &'a dyn DynMessage) -> Self {
        Event::Structured(message)
    }
}

impl<'a, M: Message> From<&'a M> for Event<'a> {
    fn from(message: &'a M) -> Self {
        Event::Structured(message)
    }
}

/// Normalize an event name before delivery: `-` becomes `_`.
///
/// Returns an owned copy so no listener can observe another's mutation.
pub fn clean_name(name: &str) -> String {
    name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Kind, Typed};

    #[derive(Clone, Debug)]
    struct Shipped;

    impl Typed for Shipped {
        const KIND: &'static Kind = &Kind::new("Orders::Shipped");
    }

    impl Message for Shipped {}

    #[test]
    fn test_variants_from_conversions() {
        let named: Event<'_> = "order_shipped".into();
        assert_eq!(named.name(), Some("order_shipped"));
        assert!(named.message().is_none());

        let msg = Shipped;
        let structured: Event<'_> = (&msg).into();
        assert!(!structured.is_named());
        assert!(structured.downcast_ref::<Shipped>().is_some());
        assert_eq!(structured.to_string(), "Orders::Shipped");
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("order-shipped"), "order_shipped");
        assert_eq!(clean_name("plain"), "plain");
    }
}
