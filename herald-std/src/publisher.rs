//! The broadcasting side.

use crate::{
    block::BlockListener,
    config::Config,
    options::SubscribeOptions,
    registration::Registration,
};
use herald_core::{
    Args, DispatchError, DynMessage, Event, Filter, IntoOutcome, Kind, Listener, Message,
    SubscribeError, Typed, clean_name,
};
use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

static DEFAULT_KIND: Kind = Kind::new("herald::Publisher");

/// Broadcasts events to its registrations, in subscription order.
///
/// The publisher's [`Kind`] is what registration scopes are checked
/// against. Registrations may be added or removed at any time, including
/// from inside a listener; a broadcast in progress keeps delivering to the
/// registrations it started with.
///
/// ```rust
/// use herald_std::{Publisher, SubscribeOptions};
/// use herald_core::{Args, Subscriber};
/// use std::sync::Arc;
///
/// let greeter = Arc::new(Subscriber::new(Vec::<String>::new()).method(
///     "greeted",
///     |names: &mut Vec<String>, args: &Args| {
///         names.extend(args.kw_str("name").map(str::to_string));
///     },
/// ));
///
/// let publisher = Publisher::default();
/// publisher.subscribe(greeter.clone(), SubscribeOptions::new())?;
/// publisher.broadcast("greeted", &Args::new().kw("name", "ada"))?;
///
/// assert_eq!(*greeter.lock(), vec!["ada"]);
/// # Ok::<(), herald_core::HeraldError>(())
/// ```
pub struct Publisher {
    kind: &'static Kind,
    config: Arc<Config>,
    registrations: RwLock<Vec<Arc<Registration>>>,
}

impl Publisher {
    /// A publisher of kind `kind` using the shared config.
    pub fn new(kind: &'static Kind) -> Self {
        Self {
            kind,
            config: Config::shared(),
            registrations: RwLock::new(Vec::new()),
        }
    }

    /// A publisher owned by type `T`.
    pub fn of<T: Typed>() -> Self {
        Self::new(T::KIND)
    }

    /// Resolve future registrations against `config`.
    pub fn with_config(mut self, config: Arc<Config>) -> Self {
        self.config = config;
        self
    }

    /// Register `listener`.
    ///
    /// Fails when the options cannot work for this listener, e.g. a kind
    /// filter on a listener without the structured contract, or a named
    /// broadcaster missing from the config.
    pub fn subscribe<L: Listener>(
        &self,
        listener: Arc<L>,
        options: SubscribeOptions,
    ) -> Result<&Self, SubscribeError> {
        self.subscribe_dyn(listener, options)
    }

    /// Register an already type-erased listener.
    pub fn subscribe_dyn(
        &self,
        listener: Arc<dyn Listener>,
        options: SubscribeOptions,
    ) -> Result<&Self, SubscribeError> {
        let registration = Registration::new(listener, options, &self.config)?;
        tracing::debug!(
            publisher = %self.kind,
            listener = registration.listener().listener_name(),
            filter = %registration.filter(),
            "subscribed"
        );
        self.write().push(Arc::new(registration));
        Ok(self)
    }

    /// Register a closure for events passing `filter`.
    ///
    /// The closure sees symbolic events with their arguments and structured
    /// events with empty arguments. Delivery is synchronous.
    pub fn on<F, R>(&self, filter: impl Into<Filter>, handler: F) -> &Self
    where
        F: Fn(Event<'_>, &Args) -> R + Send + Sync + 'static,
        R: IntoOutcome + 'static,
    {
        let listener: Arc<dyn Listener> = Arc::new(BlockListener::new(handler));
        // Block listeners accept every filter and sync delivery always
        // resolves, so this cannot fail.
        match Registration::new(listener, SubscribeOptions::new().on(filter), &self.config) {
            Ok(registration) => self.write().push(Arc::new(registration)),
            Err(error) => tracing::warn!(%error, "block registration rejected"),
        }
        self
    }

    /// Register a closure for structured events of exactly kind `M`.
    ///
    /// Subtypes of `M` are other Rust types and cannot be handed over as
    /// `&M`, so they are skipped. Use [`Publisher::on_kind`] to receive
    /// them as well.
    pub fn on_message<M, F, R>(&self, handler: F) -> &Self
    where
        M: Message,
        F: Fn(&M) -> R + Send + Sync + 'static,
        R: IntoOutcome + 'static,
    {
        self.on(M::KIND, move |event: Event<'_>, _: &Args| {
            match event.downcast_ref::<M>() {
                Some(message) => handler(message).into_outcome(),
                None => {
                    tracing::trace!(
                        kind = M::KIND.name(),
                        %event,
                        "subtype skipped by on_message"
                    );
                    Ok(())
                }
            }
        })
    }

    /// Register a closure for structured events of kind `M` and its
    /// subtypes, received type-erased.
    pub fn on_kind<M, R>(
        &self,
        handler: impl Fn(&dyn DynMessage) -> R + Send + Sync + 'static,
    ) -> &Self
    where
        M: Typed,
        R: IntoOutcome + 'static,
    {
        self.on(M::KIND, move |event: Event<'_>, _: &Args| match event {
            Event::Structured(message) => handler(message).into_outcome(),
            // Kind filters reject symbolic events before delivery.
            Event::Named(_) => Ok(()),
        })
    }

    /// Deliver `event` to every registration, in order.
    ///
    /// Stops at the first error. Registrations notified before it are not
    /// rolled back.
    pub fn broadcast<'e>(
        &self,
        event: impl Into<Event<'e>>,
        args: &Args,
    ) -> Result<&Self, DispatchError> {
        let event = event.into();
        let registrations = self.registrations();
        tracing::debug!(
            publisher = %self.kind,
            %event,
            registrations = registrations.len(),
            "broadcast"
        );

        for registration in &registrations {
            match event {
                Event::Named(name) => {
                    let name = clean_name(name);
                    registration.deliver(Event::Named(&name), self.kind, args)?;
                }
                Event::Structured(_) => registration.deliver(event, self.kind, args)?,
            }
        }
        Ok(self)
    }

    /// Broadcast a structured event with no extra arguments.
    pub fn publish<M: Message>(&self, message: &M) -> Result<&Self, DispatchError> {
        self.broadcast(message, &Args::new())
    }

    /// Remove every registration of `listener`. Returns whether any existed.
    pub fn unsubscribe<L: Listener + ?Sized>(&self, listener: &Arc<L>) -> bool {
        let target = Arc::as_ptr(listener).cast::<()>();
        let mut registrations = self.write();
        let before = registrations.len();
        registrations.retain(|registration| !registration.is_for(target));
        let removed = registrations.len() != before;
        if removed {
            tracing::debug!(
                publisher = %self.kind,
                listener = listener.listener_name(),
                "unsubscribed"
            );
        }
        removed
    }

    /// The registered listeners, in subscription order.
    pub fn listeners(&self) -> Vec<Arc<dyn Listener>> {
        self.read()
            .iter()
            .map(|registration| Arc::clone(registration.listener()))
            .collect()
    }

    /// A snapshot of the registrations, in subscription order.
    pub fn registrations(&self) -> Vec<Arc<Registration>> {
        self.read().clone()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// The publisher's kind.
    pub fn kind(&self) -> &'static Kind {
        self.kind
    }

    /// The config registrations are resolved against.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<Registration>>> {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<Registration>>> {
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new(&DEFAULT_KIND)
    }
}

impl fmt::Debug for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("kind", &self.kind)
            .field("registrations", &*self.read())
            .finish()
    }
}
