//! Event filters and the matching rules between filters and event variants.

use crate::{
    error::{DispatchError, FilterError},
    event::Event,
    kind::{Kind, Typed},
};
use regex::Regex;
use std::fmt;

/// Which events a registration accepts.
///
/// Exactly one representation is active. Matching dispatches on the event
/// variant first, then on the filter representation; type filters never
/// match named events and name filters never match structured events.
#[derive(Clone, Default)]
pub enum Filter {
    /// Accept every event.
    #[default]
    All,
    /// A single event name.
    Name(String),
    /// A set of event names.
    Names(Vec<String>),
    /// A regular expression over event names.
    Pattern(Regex),
    /// A single message kind, including its subtypes.
    Kind(&'static Kind),
    /// Any of several message kinds, including their subtypes.
    Kinds(Vec<&'static Kind>),
}

impl Filter {
    /// Filter on a single event name.
    pub fn name(name: impl Into<String>) -> Self {
        Filter::Name(name.into())
    }

    /// Filter on a set of event names.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Names(names.into_iter().map(Into::into).collect())
    }

    /// Filter on event names matching `pattern`.
    pub fn pattern(pattern: &str) -> Result<Self, FilterError> {
        Ok(Filter::Pattern(Regex::new(pattern)?))
    }

    /// Filter on messages of kind `M` or its subtypes.
    pub fn kind<M: Typed>() -> Self {
        Filter::Kind(M::KIND)
    }

    /// Filter on messages of any of the given kinds.
    pub fn kinds<I: IntoIterator<Item = &'static Kind>>(kinds: I) -> Self {
        Filter::Kinds(kinds.into_iter().collect())
    }

    /// Whether this filter is expressed in message kinds.
    pub fn is_kind_filter(&self) -> bool {
        matches!(self, Filter::Kind(_) | Filter::Kinds(_))
    }

    /// Whether this filter is expressed in event names.
    pub fn is_name_filter(&self) -> bool {
        matches!(self, Filter::Name(_) | Filter::Names(_) | Filter::Pattern(_))
    }

    /// Decide whether `event` passes this filter.
    ///
    /// Returns [`DispatchError::UnsupportedFilter`] when the filter and the
    /// event variant cannot be compared.
    pub fn matches(&self, event: Event<'_>) -> Result<bool, DispatchError> {
        match event {
            Event::Named(name) => match self {
                Filter::All => Ok(true),
                Filter::Name(expected) => Ok(expected == name),
                Filter::Names(names) => Ok(names.iter().any(|n| n == name)),
                Filter::Pattern(regex) => Ok(regex.is_match(name)),
                Filter::Kind(_) | Filter::Kinds(_) => Err(self.unsupported(event)),
            },
            Event::Structured(message) => match self {
                Filter::All => Ok(true),
                Filter::Kind(kind) => Ok(message.kind().is_a(kind)),
                Filter::Kinds(kinds) => Ok(kinds.iter().any(|kind| message.kind().is_a(kind))),
                Filter::Name(_) | Filter::Names(_) | Filter::Pattern(_) => {
                    Err(self.unsupported(event))
                }
            },
        }
    }

    fn unsupported(&self, event: Event<'_>) -> DispatchError {
        DispatchError::UnsupportedFilter {
            filter: self.to_string(),
            event: event.to_string(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("*"),
            Filter::Name(name) => write!(f, "{name:?}"),
            Filter::Names(names) => write!(f, "{names:?}"),
            Filter::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
            Filter::Kind(kind) => write!(f, "{kind}"),
            Filter::Kinds(kinds) => {
                let names: Vec<_> = kinds.iter().map(|kind| kind.name()).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filter({self})")
    }
}

impl From<&str> for Filter {
    fn from(name: &str) -> Self {
        Filter::Name(name.to_string())
    }
}

impl From<String> for Filter {
    fn from(name: String) -> Self {
        Filter::Name(name)
    }
}

impl From<&[&str]> for Filter {
    fn from(names: &[&str]) -> Self {
        Filter::names(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Filter {
    fn from(names: [&str; N]) -> Self {
        Filter::names(names)
    }
}

impl From<Regex> for Filter {
    fn from(regex: Regex) -> Self {
        Filter::Pattern(regex)
    }
}

impl From<&'static Kind> for Filter {
    fn from(kind: &'static Kind) -> Self {
        Filter::Kind(kind)
    }
}

impl<T: Into<Filter>> From<Option<T>> for Filter {
    fn from(filter: Option<T>) -> Self {
        filter.map_or(Filter::All, Into::into)
    }
}
