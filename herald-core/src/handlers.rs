//! # Declarative handlers
//!
//! Listener types declare their handlers once, at construction time, into a
//! [`HandlerTable`]. Structured handlers are stored under the name derived
//! from the message kind, so `trigger` is a table lookup.
//!
//! ```rust
//! use herald_core::{EventHandlers, HandlerTable, Kind, Message, Subscriber, Typed};
//!
//! #[derive(Clone, Debug)]
//! struct InvoicePaid {
//!     amount: u64,
//! }
//!
//! impl Typed for InvoicePaid {
//!     const KIND: &'static Kind = &Kind::new("Billing::InvoicePaid");
//! }
//! impl Message for InvoicePaid {}
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
//! let ledger = Subscriber::structured(Ledger::default());
//! assert!(ledger.handles("on_billing_invoice_paid"));
//! ```

use crate::{
    args::Args,
    error::{BoxError, DispatchError},
    kind::Kind,
    listener::{Listener, StructuredListener},
    message::{DynMessage, Message},
    naming::handler_name,
    response::IntoOutcome,
};
use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
    thread::{self, ThreadId},
};

type EventFn<L> = Box<dyn Fn(&mut L, &dyn DynMessage) -> Result<(), BoxError> + Send + Sync>;
type MethodFn<L> = Box<dyn Fn(&mut L, &Args) -> Result<(), BoxError> + Send + Sync>;

/// A structured handler and the kind it was declared for. Handlers added
/// by name accept any kind deriving that name.
struct EventEntry<L> {
    kind: Option<&'static Kind>,
    handler: EventFn<L>,
}

/// Handlers declared by a listener type.
pub struct HandlerTable<L> {
    events: HashMap<String, Vec<EventEntry<L>>>,
    methods: HashMap<String, MethodFn<L>>,
}

impl<L: 'static> HandlerTable<L> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            events: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Declare the handler for messages of kind `M`.
    ///
    /// The handler is stored under the derived name for `M` and receives
    /// the listener's own state mutably. Distinct kinds deriving the same
    /// name keep separate handlers.
    pub fn on<M, F, R>(&mut self, handler: F) -> &mut Self
    where
        M: Message,
        F: Fn(&mut L, &M) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.insert(
            handler_name(M::KIND.name()),
            Some(M::KIND),
            Box::new(move |listener: &mut L, message: &dyn DynMessage| {
                match message.downcast_ref::<M>() {
                    Some(message) => handler(listener, message).into_outcome(),
                    None => Err(format!(
                        "handler for {} cannot accept {}",
                        M::KIND,
                        message.kind()
                    )
                    .into()),
                }
            }),
        );
        self
    }

    /// Declare a handler under an explicit name such as `on_order_placed`.
    pub fn on_name<F, R>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut L, &dyn DynMessage) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.insert(
            name.into(),
            None,
            Box::new(move |listener: &mut L, message: &dyn DynMessage| {
                handler(listener, message).into_outcome()
            }),
        );
        self
    }

    /// Declare a method for symbolic events.
    pub fn method<F, R>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut L, &Args) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.methods.insert(
            name.into(),
            Box::new(move |listener: &mut L, args: &Args| handler(listener, args).into_outcome()),
        );
        self
    }

    /// Whether a structured handler is stored under `name`.
    pub fn handles(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// Whether a symbolic-event method is stored under `name`.
    pub fn responds_to(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Number of declared handlers and methods.
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum::<usize>() + self.methods.len()
    }

    /// Whether nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.methods.is_empty()
    }

    fn insert(&mut self, name: String, kind: Option<&'static Kind>, handler: EventFn<L>) {
        let entries = self.events.entry(name).or_default();
        entries.retain(|entry| entry.kind != kind);
        entries.push(EventEntry { kind, handler });
    }

    /// The handler stored under `name` that accepts `kind`.
    fn event(&self, name: &str, kind: &Kind) -> Option<&EventFn<L>> {
        self.events
            .get(name)?
            .iter()
            .find(|entry| entry.kind.is_none_or(|declared| declared == kind))
            .map(|entry| &entry.handler)
    }

    fn method_fn(&self, name: &str) -> Option<&MethodFn<L>> {
        self.methods.get(name)
    }
}

impl<L: 'static> Default for HandlerTable<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> fmt::Debug for HandlerTable<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<_> = self.events.keys().collect();
        let mut methods: Vec<_> = self.methods.keys().collect();
        events.sort();
        methods.sort();
        f.debug_struct("HandlerTable")
            .field("events", &events)
            .field("methods", &methods)
            .finish()
    }
}

/// A listener type that declares structured handlers.
///
/// `declare` runs once per [`Subscriber::structured`] call, before the
/// subscriber can receive events.
pub trait EventHandlers: Sized + Send + 'static {
    /// Register this type's handlers.
    fn declare(handlers: &mut HandlerTable<Self>);
}

/// Listener state paired with its handler table.
///
/// The state sits behind a mutex so handlers get `&mut L` while the
/// subscriber itself is shared through `Arc`. A handler that broadcasts
/// back into the same subscriber on its own thread gets an error from the
/// nested delivery instead of a deadlock.
pub struct Subscriber<L> {
    state: Mutex<L>,
    table: HandlerTable<L>,
    structured: bool,
    running: Mutex<Option<ThreadId>>,
}

/// Clears [`Subscriber::running`] when a handler returns or unwinds.
struct Running<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for Running<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<L: Send + 'static> Subscriber<L> {
    /// A plain listener. It receives symbolic events through the methods
    /// added with [`Subscriber::method`] and ignores structured events.
    pub fn new(state: L) -> Self {
        Self {
            state: Mutex::new(state),
            table: HandlerTable::new(),
            structured: false,
            running: Mutex::new(None),
        }
    }

    /// A listener implementing the structured contract, with handlers taken
    /// from [`EventHandlers::declare`].
    pub fn structured(state: L) -> Self
    where
        L: EventHandlers,
    {
        let mut table = HandlerTable::new();
        L::declare(&mut table);
        Self {
            state: Mutex::new(state),
            table,
            structured: true,
            running: Mutex::new(None),
        }
    }

    /// Add a symbolic-event method.
    pub fn method<F, R>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut L, &Args) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.table.method(name, handler);
        self
    }

    /// Add a structured handler. This opts the subscriber into the
    /// structured contract.
    pub fn on<M, F, R>(mut self, handler: F) -> Self
    where
        M: Message,
        F: Fn(&mut L, &M) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.table.on(handler);
        self.structured = true;
        self
    }

    /// Whether a structured handler exists under `name`.
    pub fn handles(&self, name: &str) -> bool {
        self.table.handles(name)
    }

    /// Lock the listener state.
    pub fn lock(&self) -> MutexGuard<'_, L> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the listener state.
    pub fn with<T>(&self, f: impl FnOnce(&L) -> T) -> T {
        f(&self.lock())
    }

    /// Take the listener state back.
    pub fn into_inner(self) -> L {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `handler` against the locked state, refusing nested delivery
    /// from the thread already running a handler.
    fn run<T>(
        &self,
        handler: impl FnOnce(&mut L) -> Result<T, BoxError>,
    ) -> Result<T, BoxError> {
        let current = thread::current().id();
        if *self.running.lock().unwrap_or_else(PoisonError::into_inner) == Some(current) {
            return Err(format!("re-entrant delivery to {}", std::any::type_name::<L>()).into());
        }

        let mut state = self.lock();
        *self.running.lock().unwrap_or_else(PoisonError::into_inner) = Some(current);
        let _running = Running(&self.running);
        handler(&mut state)
    }
}

impl<L: Send + 'static> Listener for Subscriber<L> {
    fn responds_to(&self, method: &str) -> bool {
        self.table.responds_to(method)
    }

    fn call(&self, method: &str, args: &Args) -> Result<(), BoxError> {
        match self.table.method_fn(method) {
            Some(handler) => self.run(|state| handler(state, args)),
            None => Err(format!("{} does not respond to `{method}`", self.listener_name()).into()),
        }
    }

    fn as_structured(&self) -> Option<&dyn StructuredListener> {
        if self.structured {
            Some(self as &dyn StructuredListener)
        } else {
            None
        }
    }

    fn listener_name(&self) -> &str {
        std::any::type_name::<L>()
    }
}

impl<L: Send + 'static> StructuredListener for Subscriber<L> {
    fn trigger(&self, message: &dyn DynMessage) -> Result<(), DispatchError> {
        let name = handler_name(message.kind().name());
        let Some(handler) = self.table.event(&name, message.kind()) else {
            return Err(DispatchError::UnhandledEvent {
                event: message.kind().name().to_string(),
                listener: self.listener_name().to_string(),
            });
        };
        self.run(|state| handler(state, message)).map_err(|source| DispatchError::Listener {
            listener: self.listener_name().to_string(),
            method: name,
            source,
        })
    }
}

impl<L: fmt::Debug> fmt::Debug for Subscriber<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("state", &self.state)
            .field("table", &self.table)
            .field("structured", &self.structured)
            .finish()
    }
}
