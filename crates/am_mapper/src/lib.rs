#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod error;
mod mapper;
mod options;
mod pipeline;
mod registry;
mod resolver;

pub mod key_transform;
pub mod renderer;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use builder::MapperBuilder;
pub use error::{DeclarationError, MapperError, ResolutionError};
pub use mapper::{Mapper, MapperDefinition, MapperId, MapperPath};
pub use options::{KeyCase, RenderOptions};
pub use registry::{MapperRegistry, MapperRegistryArc, Renderers};
pub use renderer::{Relation, RenderContext, Renderer};
pub use resolver::{ConventionResolver, MapperResolver};

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests;
