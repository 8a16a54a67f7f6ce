use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ResourceMeta;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(meta: &ResourceMeta) -> TokenStream {
    let trait_type_path_ = crate::path::type_path_(meta.am_reflect_path());

    let ident = meta.ident();
    let type_path = meta.type_path_tokens();
    let type_ident = meta.type_ident_tokens();
    let module_path = meta.module_path_tokens();

    quote! {
        impl #trait_type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
