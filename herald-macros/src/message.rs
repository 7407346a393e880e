//! `#[derive(Message)]` and `#[derive(Typed)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    DeriveInput, Ident, LitStr, Path, Token,
    parse::{Parse, ParseStream},
    parse_macro_input, parse_quote,
};

/// Arguments of the `#[herald(...)]` attribute.
#[derive(Default)]
pub(crate) struct KindArgs {
    pub name: Option<LitStr>,
    pub extends: Option<Path>,
}

impl Parse for KindArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = KindArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => args.name = Some(input.parse()?),
                "extends" => args.extends = Some(input.parse()?),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

fn kind_args(input: &DeriveInput) -> syn::Result<KindArgs> {
    let mut merged = KindArgs::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("herald")) {
        let args: KindArgs = attr.parse_args()?;
        if args.name.is_some() {
            merged.name = args.name;
        }
        if args.extends.is_some() {
            merged.extends = args.extends;
        }
    }
    Ok(merged)
}

fn typed_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let args = kind_args(input)?;
    let ident = &input.ident;

    // Kinds of types without lifetimes also carry the `TypeId`, which
    // needs every type parameter to be `'static`.
    let identified = input.generics.lifetimes().next().is_none();
    let mut generics = input.generics.clone();
    if identified {
        let params: Vec<_> = generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect();
        let where_clause = generics.make_where_clause();
        for param in params {
            where_clause
                .predicates
                .push(parse_quote! { #param: 'static });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let name = args
        .name
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let root = if identified {
        quote! { ::herald::Kind::of::<Self>(#name) }
    } else {
        quote! { ::herald::Kind::new(#name) }
    };
    let parent = args.extends.map(|parent| {
        quote! { .extends(<#parent as ::herald::Typed>::KIND) }
    });

    Ok(quote! {
        impl #impl_generics ::herald::Typed for #ident #ty_generics #where_clause {
            const KIND: &'static ::herald::Kind = &#root #parent;
        }
    })
}

/// Implementation of `#[derive(Typed)]`.
pub fn derive_typed_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match typed_impl(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Implementation of `#[derive(Message)]`.
pub fn derive_message_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let typed = match typed_impl(&input) {
        Ok(typed) => typed,
        Err(error) => return error.to_compile_error().into(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #typed

        impl #impl_generics ::herald::Message for #ident #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}
