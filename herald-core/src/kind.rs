//! Runtime type identifiers.
//!
//! Routing by structured event type and scoping by publisher type both need
//! the notion of "this type, or one of its supertypes". Rust has no class
//! hierarchy, so every participating type carries a static [`Kind`]: its
//! identifier plus an optional parent kind.

use std::{any::TypeId, fmt};

/// A runtime type identifier with single-parent inheritance.
///
/// Kinds are built in `const` context. Two kinds are equal when their
/// names match, unless both were built with [`Kind::of`], in which case
/// the Rust types must match as well. Same-named types from different
/// modules therefore never alias.
///
/// # Example
///
/// ```rust
/// use herald_core::Kind;
///
/// const BASE: &Kind = &Kind::new("Orders::Event");
/// const PLACED: &Kind = &Kind::new("Orders::Placed").extends(BASE);
///
/// assert!(PLACED.is_a(BASE));
/// assert!(!BASE.is_a(PLACED));
/// ```
#[derive(Clone, Copy)]
pub struct Kind {
    name: &'static str,
    parent: Option<&'static Kind>,
    type_id: Option<fn() -> TypeId>,
}

impl Kind {
    /// Create a root kind with the given identifier.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            type_id: None,
        }
    }

    /// Create a root kind for the Rust type `T`.
    pub const fn of<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            type_id: Some(TypeId::of::<T>),
        }
    }

    /// Declare `parent` as the supertype of this kind.
    pub const fn extends(mut self, parent: &'static Kind) -> Self {
        self.parent = Some(parent);
        self
    }

    /// The type identifier, possibly namespaced with `::`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The direct supertype, if any.
    pub const fn parent(&self) -> Option<&'static Kind> {
        self.parent
    }

    /// Iterate over this kind followed by each of its supertypes.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Whether this kind is `other` or a subtype of it.
    pub fn is_a(&self, other: &Kind) -> bool {
        self.ancestors().any(|kind| kind == other)
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (self.type_id, other.type_id) {
            (Some(left), Some(right)) => left() == right(),
            _ => true,
        }
    }
}

impl Eq for Kind {}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Iterator returned by [`Kind::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a Kind>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Kind;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.map(|parent| parent as &Kind);
        Some(current)
    }
}

/// A type that carries a static [`Kind`].
///
/// Implemented by structured event types (through [`Message`]) and by the
/// types that own a publisher, so registrations can be scoped to them.
///
/// [`Message`]: crate::Message
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no runtime kind",
    label = "missing `Typed` implementation",
    note = "Derive `Typed` (or `Message`) or declare `const KIND: &'static Kind`."
)]
pub trait Typed {
    /// The static kind of this type.
    const KIND: &'static Kind;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &Kind = &Kind::new("Root");
    const MIDDLE: &Kind = &Kind::new("Middle").extends(ROOT);
    const LEAF: &Kind = &Kind::new("Deep::Leaf").extends(MIDDLE);
    const OTHER: &Kind = &Kind::new("Other");

    #[test]
    fn test_is_a_walks_the_parent_chain() {
        assert!(LEAF.is_a(LEAF));
        assert!(LEAF.is_a(MIDDLE));
        assert!(LEAF.is_a(ROOT));
        assert!(!ROOT.is_a(LEAF));
        assert!(!LEAF.is_a(OTHER));
    }

    #[test]
    fn test_ancestors_order() {
        let names: Vec<_> = LEAF.ancestors().map(Kind::name).collect();
        assert_eq!(names, vec!["Deep::Leaf", "Middle", "Root"]);
    }

    #[test]
    fn test_kinds_compare_by_name() {
        let copy = Kind::new("Root");
        assert_eq!(&copy, ROOT);
        assert_eq!(LEAF.to_string(), "Deep::Leaf");
    }

    struct First;
    struct Second;
    const FIRST: &Kind = &Kind::of::<First>("Created");
    const SECOND: &Kind = &Kind::of::<Second>("Created");

    #[test]
    fn test_typed_kinds_do_not_alias() {
        assert_ne!(FIRST, SECOND);
        assert!(!SECOND.is_a(FIRST));
        assert_eq!(FIRST, &Kind::of::<First>("Created"));
        assert_eq!(FIRST, &Kind::new("Created"));
    }
}
