//! Derive macros for Herald.
//!
//! - `#[derive(Message)]` implements `Typed` and `Message`
//! - `#[derive(Typed)]` implements `Typed` only, for publisher owner types
//!
//! Both accept `#[herald(name = "Orders::Placed", extends = BaseEvent)]`.
//! Without `name` the kind is named after the type.

use proc_macro::TokenStream;

mod message;

/// Derive macro for implementing the `Message` trait.
///
/// The type must also be `Clone + Debug + Send + Sync + 'static`.
#[proc_macro_derive(Message, attributes(herald))]
pub fn derive_message(input: TokenStream) -> TokenStream {
    message::derive_message_impl(input)
}

/// Derive macro for implementing the `Typed` trait.
#[proc_macro_derive(Typed, attributes(herald))]
pub fn derive_typed(input: TokenStream) -> TokenStream {
    message::derive_typed_impl(input)
}
