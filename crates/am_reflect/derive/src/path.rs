//! Paths of the items referenced by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `am_reflect` crate.
///
/// The lookup reads the caller's Cargo.toml, so it is resolved once per
/// macro invocation and passed around afterwards.
pub(crate) fn am_reflect() -> syn::Path {
    am_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("am_reflect"))
}

#[inline(always)]
pub(crate) fn type_path_(am_reflect_path: &syn::Path) -> TokenStream {
    quote! { #am_reflect_path::info::TypePath }
}

#[inline(always)]
pub(crate) fn resource_(am_reflect_path: &syn::Path) -> TokenStream {
    quote! { #am_reflect_path::Resource }
}

#[inline(always)]
pub(crate) fn resource_kind_(am_reflect_path: &syn::Path) -> TokenStream {
    quote! { #am_reflect_path::ResourceKind }
}
