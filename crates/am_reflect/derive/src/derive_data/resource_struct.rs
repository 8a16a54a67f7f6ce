use syn::{Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type};

use super::{AssociationAttr, FieldAttributes, ResourceMeta};

/// A readable field of a derived resource.
pub(crate) struct ResourceField {
    pub member: syn::Ident,
    /// The name exposed through `Resource::field`.
    pub name: LitStr,
    /// Simple type name of the associated resource, if declared.
    pub association: Option<LitStr>,
}

pub(crate) struct ResourceStruct {
    meta: ResourceMeta,
    fields: Vec<ResourceField>,
}

impl ResourceStruct {
    pub fn from_ast(ast: &DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => Some(named),
                Fields::Unit => None,
                Fields::Unnamed(unnamed) => {
                    return Err(syn::Error::new_spanned(
                        unnamed,
                        "tuple structs are not supported, use named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Resource` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Resource` cannot be derived for unions",
                ));
            }
        };

        let meta = ResourceMeta::from_ast(ast)?;

        let mut fields = Vec::new();
        for field in named.into_iter().flat_map(|named| &named.named) {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip {
                continue;
            }
            // Named fields always carry an ident.
            let Some(member) = field.ident.clone() else {
                continue;
            };
            let name = attrs
                .rename
                .unwrap_or_else(|| LitStr::new(&member.to_string(), member.span()));
            let association = match attrs.association {
                None => None,
                Some(AssociationAttr::Explicit(lit)) => Some(lit),
                Some(AssociationAttr::Inferred) => Some(infer_association(&field.ty)?),
            };
            fields.push(ResourceField {
                member,
                name,
                association,
            });
        }

        if let Some(dup) = first_duplicate(&fields) {
            return Err(syn::Error::new(
                dup.span(),
                format!("duplicate field name `{}`", dup.value()),
            ));
        }

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[ResourceField] {
        &self.fields
    }
}

fn first_duplicate(fields: &[ResourceField]) -> Option<&LitStr> {
    fields.iter().enumerate().find_map(|(i, field)| {
        let name = field.name.value();
        fields[..i]
            .iter()
            .any(|prev| prev.name.value() == name)
            .then_some(&field.name)
    })
}

const WRAPPERS: &[&str] = &["Option", "Vec", "Box", "Rc", "Arc"];

/// `Option<Vec<crate::models::Friend>>` -> `"Friend"`.
fn infer_association(ty: &Type) -> syn::Result<LitStr> {
    let mut ty = ty;
    loop {
        let Type::Path(type_path) = ty else {
            break;
        };
        let Some(last) = type_path.path.segments.last() else {
            break;
        };
        let ident = last.ident.to_string();
        if WRAPPERS.contains(&ident.as_str())
            && let PathArguments::AngleBracketed(args) = &last.arguments
            && let Some(GenericArgument::Type(inner)) = args.args.first()
        {
            ty = inner;
            continue;
        }
        if matches!(last.arguments, PathArguments::None) {
            return Ok(LitStr::new(&ident, last.ident.span()));
        }
        break;
    }
    Err(syn::Error::new_spanned(
        ty,
        "cannot infer the associated type, use `#[resource(association = \"Ident\")]`",
    ))
}
