mod trait_resource;
mod trait_type_path;

pub(crate) use trait_resource::impl_trait_resource;
pub(crate) use trait_type_path::impl_trait_type_path;
