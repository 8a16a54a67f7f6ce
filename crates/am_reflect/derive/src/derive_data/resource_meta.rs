use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident, LitStr};

use super::TypeAttributes;

/// How the `TypePath` strings of a type are produced.
enum TypePathParts {
    /// From `module_path!()` at the derive site.
    Derived,
    /// From `#[resource(type_path = "...")]`, split at the last `::`.
    Custom {
        path: LitStr,
        ident: String,
        module: Option<String>,
    },
}

/// What both derives need to know about a type.
pub(crate) struct ResourceMeta {
    ident: Ident,
    type_path: TypePathParts,
    am_reflect_path: syn::Path,
}

impl ResourceMeta {
    pub fn from_ast(ast: &DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "generic types are not supported",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
        let type_path = match attrs.type_path {
            None => TypePathParts::Derived,
            Some(path) => {
                let value = path.value();
                let (module, ident) = match value.rsplit_once("::") {
                    Some((module, ident)) => (Some(module.to_owned()), ident.to_owned()),
                    None => (None, value.clone()),
                };
                TypePathParts::Custom {
                    path,
                    ident,
                    module,
                }
            }
        };

        Ok(Self {
            ident: ast.ident.clone(),
            type_path,
            am_reflect_path: crate::path::am_reflect(),
        })
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    #[inline]
    pub fn am_reflect_path(&self) -> &syn::Path {
        &self.am_reflect_path
    }

    /// Expression of type `&'static str`.
    pub fn type_path_tokens(&self) -> TokenStream {
        match &self.type_path {
            TypePathParts::Derived => {
                let ident = &self.ident;
                quote! { ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)) }
            }
            TypePathParts::Custom { path, .. } => quote! { #path },
        }
    }

    /// Expression of type `&'static str`.
    pub fn type_ident_tokens(&self) -> TokenStream {
        match &self.type_path {
            TypePathParts::Derived => {
                let ident = &self.ident;
                quote! { ::core::stringify!(#ident) }
            }
            TypePathParts::Custom { ident, .. } => quote! { #ident },
        }
    }

    /// Expression of type `Option<&'static str>`.
    pub fn module_path_tokens(&self) -> TokenStream {
        match &self.type_path {
            TypePathParts::Derived => {
                quote! { ::core::option::Option::Some(::core::module_path!()) }
            }
            TypePathParts::Custom {
                module: Some(module),
                ..
            } => quote! { ::core::option::Option::Some(#module) },
            TypePathParts::Custom { module: None, .. } => quote! { ::core::option::Option::None },
        }
    }
}
