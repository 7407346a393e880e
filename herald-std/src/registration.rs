//! A listener bound to a publisher.

use crate::{
    broadcaster::{Broadcaster, SyncBroadcaster},
    config::{ASYNC_BROADCASTER, Config, DEFAULT_BROADCASTER},
    options::{Delivery, Prefix, SubscribeOptions},
};
use herald_core::{Args, DispatchError, Event, Filter, Kind, Listener, SubscribeError};
use std::{collections::HashSet, fmt, sync::Arc};

/// One listener's subscription: filter, method mapping, scope and the
/// broadcaster that delivers symbolic events.
///
/// Built by [`Publisher::subscribe`](crate::Publisher::subscribe), which
/// validates the options against the listener and resolves the
/// broadcaster once.
pub struct Registration {
    listener: Arc<dyn Listener>,
    filter: Filter,
    with: Option<String>,
    prefix: Option<Prefix>,
    scope: HashSet<String>,
    delivery: Delivery,
    broadcaster: Arc<dyn Broadcaster>,
}

impl Registration {
    /// Validate `options` for `listener` and resolve its broadcaster.
    pub fn new(
        listener: Arc<dyn Listener>,
        options: SubscribeOptions,
        config: &Config,
    ) -> Result<Self, SubscribeError> {
        if options.filter.is_kind_filter() && !listener.is_structured_listener() {
            return Err(SubscribeError::UnsupportedFilter {
                filter: options.filter.to_string(),
                listener: listener.listener_name().to_string(),
            });
        }

        let broadcaster: Arc<dyn Broadcaster> = match &options.delivery {
            Delivery::Sync => config
                .broadcaster(DEFAULT_BROADCASTER)
                .unwrap_or_else(|| Arc::new(SyncBroadcaster)),
            Delivery::Async => config
                .broadcaster(ASYNC_BROADCASTER)
                .ok_or_else(|| SubscribeError::UnknownBroadcaster(ASYNC_BROADCASTER.into()))?,
            Delivery::Custom(broadcaster) => Arc::clone(broadcaster),
            Delivery::Named(name) => config
                .broadcaster(name)
                .ok_or_else(|| SubscribeError::UnknownBroadcaster(name.clone()))?,
        };

        Ok(Self {
            listener,
            filter: options.filter,
            with: options.with,
            prefix: options.prefix,
            scope: options.scope,
            delivery: options.delivery,
            broadcaster,
        })
    }

    /// Deliver `event` from a publisher of kind `publisher`.
    ///
    /// Structured events go straight to the listener's `trigger`; listeners
    /// without the structured contract ignore them. Symbolic events are
    /// mapped to a method name and handed to the broadcaster when the
    /// publisher is in scope and the listener has that method.
    pub fn deliver(
        &self,
        event: Event<'_>,
        publisher: &'static Kind,
        args: &Args,
    ) -> Result<(), DispatchError> {
        if !self.filter.matches(event)? {
            tracing::trace!(%event, filter = %self.filter, "filter miss");
            return Ok(());
        }

        match event {
            Event::Structured(message) => match self.listener.as_structured() {
                Some(listener) => listener.trigger(message),
                None => {
                    tracing::trace!(
                        %event,
                        listener = self.listener.listener_name(),
                        "structured event ignored by plain listener"
                    );
                    Ok(())
                }
            },
            Event::Named(name) => {
                let method = self.method_for(name);
                if !self.publisher_in_scope(publisher) {
                    tracing::trace!(%publisher, %method, "publisher out of scope");
                    return Ok(());
                }
                if !self.listener.responds_to(&method) {
                    return Ok(());
                }
                self.broadcaster
                    .broadcast(Arc::clone(&self.listener), publisher, &method, args.clone())
                    .map_err(|source| DispatchError::Listener {
                        listener: self.listener.listener_name().to_string(),
                        method,
                        source,
                    })
            }
        }
    }

    /// The listener method a symbolic event named `event` maps to.
    ///
    /// `with` wins over the prefix; otherwise the prefix (if any) is
    /// prepended to the event name.
    pub fn method_for(&self, event: &str) -> String {
        match (&self.with, &self.prefix) {
            (Some(with), _) => with.clone(),
            (None, Some(prefix)) => format!("{}{event}", prefix.as_prefix()),
            (None, None) => event.to_string(),
        }
    }

    /// Whether a publisher of kind `publisher` may reach this listener.
    pub fn publisher_in_scope(&self, publisher: &Kind) -> bool {
        self.scope.is_empty()
            || publisher
                .ancestors()
                .any(|kind| self.scope.contains(kind.name()))
    }

    /// The registered listener.
    pub fn listener(&self) -> &Arc<dyn Listener> {
        &self.listener
    }

    /// The registration's filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// The delivery mode the registration was created with.
    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    pub(crate) fn is_for(&self, listener: *const ()) -> bool {
        Arc::as_ptr(&self.listener).cast::<()>() == listener
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scope: Vec<_> = self.scope.iter().collect();
        scope.sort();
        f.debug_struct("Registration")
            .field("listener", &self.listener.listener_name())
            .field("filter", &self.filter)
            .field("with", &self.with)
            .field("prefix", &self.prefix)
            .field("scope", &scope)
            .field("delivery", &self.delivery)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{EventHandlers, HandlerTable, Message, Subscriber, Typed};
    use std::sync::Mutex;

    static BASE: Kind = Kind::new("Checkout");
    static PUBLISHER: Kind = Kind::new("Checkout::Express").extends(&BASE);
    static OTHER: Kind = Kind::new("Refund");

    #[derive(Clone, Debug)]
    struct Placed;
    impl Typed for Placed {
        const KIND: &'static Kind = &Kind::new("Placed");
    }
    impl Message for Placed {}

    #[derive(Default)]
    struct Counter {
        placed: u32,
    }

    impl EventHandlers for Counter {
        fn declare(handlers: &mut HandlerTable<Self>) {
            handlers.on(|counter: &mut Counter, _event: &Placed| counter.placed += 1);
        }
    }

    fn calls() -> Arc<Subscriber<Vec<String>>> {
        Arc::new(
            Subscriber::new(Vec::new())
                .method("success", |seen: &mut Vec<String>, _: &Args| {
                    seen.push("success".into())
                })
                .method("renamed", |seen: &mut Vec<String>, _: &Args| {
                    seen.push("renamed".into())
                })
                .method("after_success", |seen: &mut Vec<String>, _: &Args| {
                    seen.push("after_success".into())
                }),
        )
    }

    fn register(listener: Arc<dyn Listener>, options: SubscribeOptions) -> Registration {
        Registration::new(listener, options, &Config::default()).unwrap()
    }

    #[test]
    fn test_method_mapping() {
        let listener = calls();
        let plain = register(listener.clone(), SubscribeOptions::new());
        let prefixed = register(listener.clone(), SubscribeOptions::new().default_prefix());
        let custom = register(listener.clone(), SubscribeOptions::new().prefix("after"));
        let renamed = register(
            listener,
            SubscribeOptions::new().with("renamed").prefix("after"),
        );

        assert_eq!(plain.method_for("success"), "success");
        assert_eq!(prefixed.method_for("success"), "on_success");
        assert_eq!(custom.method_for("success"), "after_success");
        assert_eq!(renamed.method_for("success"), "renamed");
    }

    #[test]
    fn test_with_delivers_to_renamed_method() {
        let listener = calls();
        let registration = register(listener.clone(), SubscribeOptions::new().with("renamed"));
        registration
            .deliver(Event::Named("success"), &PUBLISHER, &Args::new())
            .unwrap();
        assert_eq!(listener.with(|seen| seen.clone()), vec!["renamed"]);
    }

    #[test]
    fn test_scope_includes_subtypes() {
        let registration = register(calls(), SubscribeOptions::new().scope_kind(&BASE));
        assert!(registration.publisher_in_scope(&BASE));
        assert!(registration.publisher_in_scope(&PUBLISHER));
        assert!(!registration.publisher_in_scope(&OTHER));

        let open = register(calls(), SubscribeOptions::new());
        assert!(open.publisher_in_scope(&OTHER));
    }

    #[test]
    fn test_out_of_scope_publisher_is_skipped() {
        let listener = calls();
        let registration = register(listener.clone(), SubscribeOptions::new().scope_kind(&BASE));
        registration
            .deliver(Event::Named("success"), &OTHER, &Args::new())
            .unwrap();
        assert!(listener.with(|seen| seen.is_empty()));
    }

    #[test]
    fn test_missing_method_is_skipped() {
        let listener = calls();
        let registration = register(listener.clone(), SubscribeOptions::new());
        registration
            .deliver(Event::Named("failure"), &PUBLISHER, &Args::new())
            .unwrap();
        assert!(listener.with(|seen| seen.is_empty()));
    }

    #[test]
    fn test_structured_event_triggers_contract_listener() {
        let listener = Arc::new(Subscriber::structured(Counter::default()));
        let registration = register(listener.clone(), SubscribeOptions::new().on(Placed::KIND));
        registration
            .deliver(Event::Structured(&Placed), &PUBLISHER, &Args::new())
            .unwrap();
        assert_eq!(listener.with(|counter| counter.placed), 1);
    }

    #[test]
    fn test_structured_event_ignored_by_plain_listener() {
        let listener = calls();
        let registration = register(listener.clone(), SubscribeOptions::new());
        registration
            .deliver(Event::Structured(&Placed), &PUBLISHER, &Args::new())
            .unwrap();
        assert!(listener.with(|seen| seen.is_empty()));
    }

    #[test]
    fn test_kind_filter_requires_structured_listener() {
        let err = Registration::new(
            calls(),
            SubscribeOptions::new().on(Placed::KIND),
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SubscribeError::UnsupportedFilter { .. }));
    }

    #[test]
    fn test_unknown_named_broadcaster() {
        let err = Registration::new(
            calls(),
            SubscribeOptions::new().broadcaster_named("queue"),
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SubscribeError::UnknownBroadcaster(name) if name == "queue"));
    }

    #[test]
    fn test_name_filter_rejects_structured_event() {
        let registration = register(
            Arc::new(Subscriber::structured(Counter::default())),
            SubscribeOptions::new().on("success"),
        );
        let err = registration
            .deliver(Event::Structured(&Placed), &PUBLISHER, &Args::new())
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnsupportedFilter { .. }));
    }

    #[test]
    fn test_custom_broadcaster_receives_mapped_call() {
        struct Spy(Mutex<Vec<(String, String)>>);
        impl Broadcaster for Spy {
            fn broadcast(
                &self,
                _listener: Arc<dyn Listener>,
                publisher: &'static Kind,
                method: &str,
                _args: Args,
            ) -> Result<(), herald_core::BoxError> {
                self.0
                    .lock()
                    .unwrap()
                    .push((publisher.name().to_string(), method.to_string()));
                Ok(())
            }
        }

        let spy = Arc::new(Spy(Mutex::new(Vec::new())));
        let registration = register(
            calls(),
            SubscribeOptions::new()
                .default_prefix()
                .broadcaster(Arc::clone(&spy)),
        );
        registration
            .deliver(Event::Named("failure"), &PUBLISHER, &Args::new())
            .unwrap();
        // `on_failure` is not a method of the listener.
        assert!(spy.0.lock().unwrap().is_empty());

        let registration = register(
            calls(),
            SubscribeOptions::new()
                .prefix("after")
                .broadcaster(Arc::clone(&spy)),
        );
        registration
            .deliver(Event::Named("success"), &PUBLISHER, &Args::new())
            .unwrap();
        assert_eq!(
            *spy.0.lock().unwrap(),
            vec![("Checkout::Express".to_string(), "after_success".to_string())]
        );
    }
}
