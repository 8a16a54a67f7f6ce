//! `#[resource(...)]` attributes at type and field level.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Meta};

use crate::RESOURCE_ATTRIBUTE_NAME;

fn resource_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(RESOURCE_ATTRIBUTE_NAME))
}

fn ensure_list(attr: &Attribute) -> syn::Result<()> {
    match &attr.meta {
        Meta::List(_) => Ok(()),
        meta => Err(syn::Error::new(
            meta.span(),
            "expected `#[resource(...)]`",
        )),
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type level: `#[resource(type_path = "a::b::C")]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in resource_attrs(attrs) {
            ensure_list(attr)?;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    validate_type_path(&lit)?;
                    if this.type_path.replace(lit).is_some() {
                        return Err(meta.error("duplicate `type_path`"));
                    }
                    Ok(())
                } else {
                    Err(meta.error("unsupported type attribute, expected `type_path`"))
                }
            })?;
        }
        Ok(this)
    }
}

fn validate_type_path(lit: &LitStr) -> syn::Result<()> {
    let path = lit.value();
    let valid = !path.starts_with("::")
        && path
            .split("::")
            .all(|segment| syn::parse_str::<syn::Ident>(segment).is_ok());
    if valid {
        Ok(())
    } else {
        Err(syn::Error::new(
            lit.span(),
            "`type_path` must be a `::` separated list of identifiers, without leading `::`",
        ))
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

pub(crate) enum AssociationAttr {
    /// `#[resource(association)]`
    Inferred,
    /// `#[resource(association = "Ident")]`
    Explicit(LitStr),
}

/// Field level: `skip`, `rename = ".."`, `association [= ".."]`.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub rename: Option<LitStr>,
    pub association: Option<AssociationAttr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        let mut span = Span::call_site();
        for attr in resource_attrs(attrs) {
            ensure_list(attr)?;
            span = attr.span();
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                } else if meta.path.is_ident("rename") {
                    this.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("association") {
                    this.association = Some(if meta.input.peek(syn::Token![=]) {
                        let lit: LitStr = meta.value()?.parse()?;
                        syn::parse_str::<syn::Ident>(&lit.value()).map_err(|_| {
                            syn::Error::new(lit.span(), "expected a type identifier")
                        })?;
                        AssociationAttr::Explicit(lit)
                    } else {
                        AssociationAttr::Inferred
                    });
                } else {
                    return Err(meta.error(
                        "unsupported field attribute, expected `skip`, `rename` or `association`",
                    ));
                }
                Ok(())
            })?;
        }

        if this.skip && (this.rename.is_some() || this.association.is_some()) {
            return Err(syn::Error::new(
                span,
                "`skip` cannot be combined with other field attributes",
            ));
        }
        Ok(this)
    }
}
