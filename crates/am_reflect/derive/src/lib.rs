//! See following macros:
//!
//! - [`Resource`]
//! - [`TypePath`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static RESOURCE_ATTRIBUTE_NAME: &str = "resource";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Resource Derivation
///
/// `#[derive(Resource)]` implements `TypePath` and `Resource` for a struct
/// with named fields (or a unit struct). Every field is readable through
/// `Resource::field` and must itself implement `Resource`.
///
/// Tuple structs, enums and generic types are rejected.
///
/// ## Field attributes
///
/// ### Hidden fields
///
/// ```rust, ignore
/// #[derive(Resource)]
/// struct User {
///     name: String,
///     #[resource(skip)]
///     password: String,
/// }
/// ```
///
/// A skipped field is invisible to mappers and need not implement `Resource`.
///
/// ### Renamed fields
///
/// ```rust, ignore
/// #[derive(Resource)]
/// struct User {
///     #[resource(rename = "first_name")]
///     given_name: String,
/// }
/// ```
///
/// ### Associations
///
/// `association` declares that a field points to another resource type.
/// Relations declared without an explicit mapper use it to find
/// `<Ident>Mapper` next to the declaring mapper.
///
/// ```rust, ignore
/// #[derive(Resource)]
/// struct User {
///     // Inferred: `Option`, `Vec`, `Box`, `Rc` and `Arc` are peeled,
///     // the last path segment is kept. Here `Friend`.
///     #[resource(association)]
///     friend: Option<Friend>,
///
///     // Explicit.
///     #[resource(association = "Account")]
///     owner: Box<dyn Resource>,
/// }
/// ```
///
/// ## Type attributes
///
/// ### Custom type path
///
/// ```rust, ignore
/// #[derive(Resource)]
/// #[resource(type_path = "app::models::User")]
/// struct User { /* ... */ }
/// ```
///
/// By default the path is `module_path!()` followed by the type ident.
#[proc_macro_derive(Resource, attributes(resource))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    use crate::derive_data::ResourceStruct;

    let ast = parse_macro_input!(input as DeriveInput);

    let data = match ResourceStruct::from_ast(&ast) {
        Ok(data) => data,
        Err(err) => return err.into_compile_error().into(),
    };

    let type_path_impl = impls::impl_trait_type_path(data.meta());
    let resource_impl = impls::impl_trait_resource(&data);

    quote! {
        #type_path_impl
        #resource_impl
    }
    .into()
}

/// # Derive TypePath Trait
///
/// This macro only implements `TypePath`, which is all a mapper type needs.
///
/// ## Example
///
/// ```rust, ignore
/// // `<module_path>::UserMapper`
/// #[derive(TypePath)]
/// struct UserMapper;
///
/// // `api::v1::UserMapper`, wherever it is declared.
/// #[derive(TypePath)]
/// #[resource(type_path = "api::v1::UserMapper")]
/// struct UserMapper;
/// ```
#[proc_macro_derive(TypePath, attributes(resource))]
pub fn derive_type_path(input: TokenStream) -> TokenStream {
    use crate::derive_data::ResourceMeta;

    let ast = parse_macro_input!(input as DeriveInput);

    match ResourceMeta::from_ast(&ast) {
        Ok(meta) => impls::impl_trait_type_path(&meta).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
