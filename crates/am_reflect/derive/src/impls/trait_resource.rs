use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ResourceStruct;

/// Generate implementation codes for `Resource`
pub(crate) fn impl_trait_resource(data: &ResourceStruct) -> TokenStream {
    let meta = data.meta();
    let am_reflect_path = meta.am_reflect_path();
    let resource_ = crate::path::resource_(am_reflect_path);
    let resource_kind_ = crate::path::resource_kind_(am_reflect_path);
    let type_path_ = crate::path::type_path_(am_reflect_path);

    let ident = meta.ident();

    let field_arms = data.fields().iter().map(|field| {
        let name = &field.name;
        let member = &field.member;
        quote! {
            #name => ::core::option::Option::Some(&self.#member as &dyn #resource_),
        }
    });

    let field_names = data.fields().iter().map(|field| &field.name);

    let association_arms = data.fields().iter().filter_map(|field| {
        let name = &field.name;
        let target = field.association.as_ref()?;
        Some(quote! {
            #name => ::core::option::Option::Some(#target),
        })
    });

    quote! {
        impl #resource_ for #ident {
            #[inline]
            fn reflect_type_path(&self) -> &'static str {
                <Self as #type_path_>::type_path()
            }

            #[inline]
            fn reflect_type_ident(&self) -> &'static str {
                <Self as #type_path_>::type_ident()
            }

            #[inline]
            fn reflect_module_path(&self) -> ::core::option::Option<&'static str> {
                <Self as #type_path_>::module_path()
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_present(&self) -> ::core::option::Option<&dyn #resource_> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn kind(&self) -> #resource_kind_<'_> {
                #resource_kind_::Object
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn #resource_> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_names(&self) -> &'static [&'static str] {
                &[#(#field_names),*]
            }

            fn association(&self, name: &str) -> ::core::option::Option<&'static str> {
                match name {
                    #(#association_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
