//! Payload carried alongside symbolic events.

use serde_json::{Map, Value};

/// Positional and keyword arguments passed with a symbolic event.
///
/// Structured events carry their own payload and ignore `Args`.
///
/// # Example
///
/// ```rust
/// use herald_core::Args;
///
/// let args = Args::new().arg(42).kw("message", "hello");
/// assert_eq!(args.get(0).and_then(|v| v.as_i64()), Some(42));
/// assert_eq!(args.kw_str("message"), Some("hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    keyword: Map<String, Value>,
}

impl Args {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument.
    pub fn kw(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(key.into(), value.into());
        self
    }

    /// Positional arguments in order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword arguments.
    pub fn keyword(&self) -> &Map<String, Value> {
        &self.keyword
    }

    /// Positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Keyword argument named `key`.
    pub fn kw_value(&self, key: &str) -> Option<&Value> {
        self.keyword.get(key)
    }

    /// Keyword argument named `key`, if it is a string.
    pub fn kw_str(&self, key: &str) -> Option<&str> {
        self.keyword.get(key).and_then(Value::as_str)
    }

    /// Whether there are no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

impl std::fmt::Display for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self.positional.iter().map(Value::to_string).collect();
        parts.extend(self.keyword.iter().map(|(k, v)| format!("{k}: {v}")));
        f.write_str(&parts.join(", "))
    }
}
