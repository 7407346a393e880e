//! Per-registration options.
//!
//! [`SubscribeOptions`] is a plain builder; nothing is validated until the
//! options reach [`Publisher::subscribe`](crate::Publisher::subscribe).

use crate::broadcaster::Broadcaster;
use herald_core::{Filter, Kind, Typed};
use std::{collections::HashSet, fmt, sync::Arc};

/// Method-name prefix for symbolic events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    /// The conventional `on_` prefix.
    Default,
    /// `<prefix>_`.
    Custom(String),
}

impl Prefix {
    /// The text prepended to the event name.
    pub fn as_prefix(&self) -> String {
        match self {
            Prefix::Default => "on_".to_string(),
            Prefix::Custom(prefix) => format!("{prefix}_"),
        }
    }
}

impl From<&str> for Prefix {
    fn from(prefix: &str) -> Self {
        Prefix::Custom(prefix.to_string())
    }
}

impl From<String> for Prefix {
    fn from(prefix: String) -> Self {
        Prefix::Custom(prefix)
    }
}

/// How symbolic events reach the listener.
#[derive(Clone, Default)]
pub enum Delivery {
    /// Inline, through the config's `"default"` broadcaster.
    #[default]
    Sync,
    /// Through the config's `"async"` broadcaster.
    Async,
    /// Through this broadcaster.
    Custom(Arc<dyn Broadcaster>),
    /// Through the broadcaster registered in the config under this name.
    Named(String),
}

impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Sync => f.write_str("Sync"),
            Delivery::Async => f.write_str("Async"),
            Delivery::Custom(_) => f.write_str("Custom(..)"),
            Delivery::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Options for [`Publisher::subscribe`](crate::Publisher::subscribe).
///
/// ```rust
/// use herald_std::SubscribeOptions;
///
/// let options = SubscribeOptions::new()
///     .on(["order_placed", "order_cancelled"])
///     .prefix("audit")
///     .r#async();
/// assert!(options.filter().is_name_filter());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubscribeOptions {
    pub(crate) filter: Filter,
    pub(crate) with: Option<String>,
    pub(crate) prefix: Option<Prefix>,
    pub(crate) scope: HashSet<String>,
    pub(crate) delivery: Delivery,
}

impl SubscribeOptions {
    /// Accept every event, deliver inline, no renaming.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept events passing `filter`.
    pub fn on(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Deliver every symbolic event to the method `method`.
    pub fn with(mut self, method: impl Into<String>) -> Self {
        self.with = Some(method.into());
        self
    }

    /// Prefix method names with `<prefix>_`.
    pub fn prefix(mut self, prefix: impl Into<Prefix>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Prefix method names with `on_`.
    pub fn default_prefix(mut self) -> Self {
        self.prefix = Some(Prefix::Default);
        self
    }

    /// Only deliver events from publishers of kind `T` or its subtypes.
    ///
    /// May be called repeatedly to allow several publisher kinds.
    pub fn scope<T: Typed>(self) -> Self {
        self.scope_kind(T::KIND)
    }

    /// Like [`scope`](Self::scope), from a kind value.
    pub fn scope_kind(self, kind: &Kind) -> Self {
        self.scope_name(kind.name())
    }

    /// Like [`scope`](Self::scope), from a kind name.
    pub fn scope_name(mut self, name: impl Into<String>) -> Self {
        self.scope.insert(name.into());
        self
    }

    /// Deliver symbolic events through the `"async"` broadcaster.
    pub fn r#async(mut self) -> Self {
        self.delivery = Delivery::Async;
        self
    }

    /// Deliver symbolic events through `broadcaster`.
    pub fn broadcaster<B: Broadcaster>(mut self, broadcaster: B) -> Self {
        self.delivery = Delivery::Custom(Arc::new(broadcaster));
        self
    }

    /// Deliver symbolic events through the broadcaster configured as `name`.
    pub fn broadcaster_named(mut self, name: impl Into<String>) -> Self {
        self.delivery = Delivery::Named(name.into());
        self
    }

    /// Set the delivery mode directly.
    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    /// The configured filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// The configured delivery mode.
    pub fn delivery_mode(&self) -> &Delivery {
        &self.delivery
    }
}
