//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod resource_meta;
mod resource_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{AssociationAttr, FieldAttributes, TypeAttributes};
pub(crate) use resource_meta::ResourceMeta;
pub(crate) use resource_struct::ResourceStruct;
