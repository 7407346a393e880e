//! Handler naming convention for structured events.
//!
//! A structured event of kind `Billing::InvoicePaid` is handled by the
//! handler named `on_billing_invoice_paid`.

use regex::Regex;
use std::sync::LazyLock;

static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

/// Derive the canonical handler name for a type identifier.
///
/// Namespace separators become underscores, camel-case boundaries are split
/// with underscores, the result is lowercased and prefixed with `on_`.
///
/// ```rust
/// use herald_core::naming::handler_name;
///
/// assert_eq!(handler_name("SimpleEvent"), "on_simple_event");
/// assert_eq!(handler_name("Namespace::NestedEvent"), "on_namespace_nested_event");
/// assert_eq!(handler_name("HTTPRequestFailed"), "on_http_request_failed");
/// ```
pub fn handler_name(type_name: &str) -> String {
    let flat = type_name.replace("::", "_");
    let split = ACRONYM_BOUNDARY.replace_all(&flat, "${1}_${2}");
    let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");
    format!("on_{}", split.to_lowercase())
}
