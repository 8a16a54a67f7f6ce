//! Renderers: functions from one resource to a partial output map.
//!
//! The builder creates them through `attributes`, `delegate`, `relation`,
//! `polymorphic`, `acts_as_polymorph`, `each` and `each_as`. Custom
//! renderers implement [`Renderer`] and are added with
//! [`MapperBuilder::renderer`](crate::MapperBuilder::renderer).

// -----------------------------------------------------------------------------
// Modules

mod attribute;
mod custom;
mod polymorphic;
mod relation;

// -----------------------------------------------------------------------------
// Exports

pub use custom::{FnRenderer, TypedRenderer};
pub use relation::Relation;

pub(crate) use attribute::{Attributes, Delegate};
pub(crate) use polymorphic::{ActsAsPolymorph, Polymorphic};

use alloc::string::{String, ToString};

use am_reflect::Resource;
use serde_json::{Map, Value};

use crate::error::{DeclarationError, MapperError};
use crate::mapper::{MapperDefinition, MapperId};
use crate::options::RenderOptions;
use crate::registry::MapperRegistry;

// -----------------------------------------------------------------------------
// Renderer

/// A function producing a partial output map from one resource.
///
/// Renderers never see nil resources. The outputs of all renderers of a
/// mapper are merged in registration order, later keys overriding earlier
/// ones.
pub trait Renderer: Send + Sync + 'static {
    fn render(
        &self,
        cx: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Map<String, Value>, MapperError>;
}

// -----------------------------------------------------------------------------
// RenderContext

/// What a renderer can reach while rendering.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    registry: &'a MapperRegistry,
    mapper: &'a MapperDefinition,
}

impl<'a> RenderContext<'a> {
    #[inline]
    pub(crate) fn new(registry: &'a MapperRegistry, mapper: &'a MapperDefinition) -> Self {
        Self { registry, mapper }
    }

    #[inline]
    pub fn registry(&self) -> &'a MapperRegistry {
        self.registry
    }

    /// The mapper whose renderers are running.
    #[inline]
    pub fn mapper(&self) -> &'a MapperDefinition {
        self.mapper
    }

    /// The module other mappers are resolved in.
    #[inline]
    pub fn namespace(&self) -> Option<&'a str> {
        self.mapper.path().module_path()
    }

    /// Renders `input` with another mapper.
    #[inline]
    pub fn render_with(
        &self,
        id: MapperId,
        input: &dyn Resource,
        options: &RenderOptions,
    ) -> Result<Value, MapperError> {
        self.registry.render_id(id, input, options)
    }

    /// Turns a rendered value into a partial map.
    ///
    /// `null` contributes nothing. Any other non-map value is an error.
    pub fn expect_map(&self, value: Value) -> Result<Map<String, Value>, MapperError> {
        match value {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(DeclarationError::InvalidOutput {
                mapper: self.mapper.path().to_string(),
                found: value_kind(&other),
            }
            .into()),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a map",
    }
}
