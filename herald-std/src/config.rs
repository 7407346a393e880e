//! Named broadcaster configuration.
//!
//! Registrations pick their delivery backend by name. A [`Config`] maps
//! names to broadcasters; every publisher resolves its registrations
//! against the config it was built with.

use crate::{
    broadcaster::{AsyncBroadcaster, Broadcaster, SyncBroadcaster},
    executor::{Executor, ThreadExecutor},
};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock},
};

/// Name of the inline broadcaster.
pub const DEFAULT_BROADCASTER: &str = "default";
/// Name of the executor-backed broadcaster used by `async` registrations.
pub const ASYNC_BROADCASTER: &str = "async";

static SHARED: LazyLock<Arc<Config>> = LazyLock::new(|| Arc::new(Config::default()));

/// Broadcasters available to registrations, by name.
#[derive(Clone)]
pub struct Config {
    broadcasters: HashMap<String, Arc<dyn Broadcaster>>,
}

impl Config {
    /// Start building a config from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// The process-wide default config.
    pub fn shared() -> Arc<Config> {
        Arc::clone(&SHARED)
    }

    /// Look up a broadcaster by name.
    pub fn broadcaster(&self, name: &str) -> Option<Arc<dyn Broadcaster>> {
        self.broadcasters.get(name).cloned()
    }

    /// Registered broadcaster names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.broadcasters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("broadcasters", &self.names())
            .finish()
    }
}

/// Builder for [`Config`].
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::builder()
///     .executor(PoolExecutor::new()?)
///     .broadcaster("audit", AuditBroadcaster::new())
///     .build();
/// ```
pub struct ConfigBuilder {
    executor: Arc<dyn Executor>,
    broadcasters: HashMap<String, Arc<dyn Broadcaster>>,
}

impl ConfigBuilder {
    /// Defaults: `"default"` is inline, `"async"` runs on [`ThreadExecutor`].
    pub fn new() -> Self {
        Self {
            executor: Arc::new(ThreadExecutor),
            broadcasters: HashMap::new(),
        }
    }

    /// Executor behind the `"async"` broadcaster.
    pub fn executor<E: Executor>(mut self, executor: E) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Register a broadcaster under `name`, replacing any previous one.
    pub fn broadcaster<B: Broadcaster>(mut self, name: impl Into<String>, broadcaster: B) -> Self {
        self.broadcasters.insert(name.into(), Arc::new(broadcaster));
        self
    }

    /// Finish the config.
    pub fn build(self) -> Config {
        let mut broadcasters = self.broadcasters;
        broadcasters
            .entry(DEFAULT_BROADCASTER.to_string())
            .or_insert_with(|| Arc::new(SyncBroadcaster) as Arc<dyn Broadcaster>);
        let executor = self.executor;
        broadcasters
            .entry(ASYNC_BROADCASTER.to_string())
            .or_insert_with(|| Arc::new(AsyncBroadcaster::shared(executor)) as Arc<dyn Broadcaster>);
        Config { broadcasters }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
