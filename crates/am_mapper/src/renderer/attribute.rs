use alloc::boxed::Box;
use alloc::string::String;

use am_reflect::Resource;
use am_reflect::access::PathAccessor;
use serde_json::{Map, Value};

use super::{RenderContext, Renderer};
use crate::error::MapperError;

#[inline]
fn read(owner: Option<&dyn Resource>, name: &str) -> Value {
    owner
        .and_then(|owner| owner.field(name))
        .map_or(Value::Null, |field| field.to_value())
}

// -----------------------------------------------------------------------------
// Attributes

/// Copies named fields. Unknown fields are `null`.
pub(crate) struct Attributes {
    names: Box<[String]>,
}

impl Attributes {
    pub fn new(names: Box<[String]>) -> Self {
        Self { names }
    }
}

impl Renderer for Attributes {
    fn render(
        &self,
        _: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Map<String, Value>, MapperError> {
        Ok(self
            .names
            .iter()
            .map(|name| (name.clone(), read(Some(resource), name)))
            .collect())
    }
}

// -----------------------------------------------------------------------------
// Delegate

/// Copies named fields of the resource found at `to`.
///
/// A broken link anywhere on the path makes every field `null`.
pub(crate) struct Delegate {
    names: Box<[String]>,
    to: PathAccessor,
}

impl Delegate {
    pub fn new(names: Box<[String]>, to: PathAccessor) -> Self {
        Self { names, to }
    }
}

impl Renderer for Delegate {
    fn render(
        &self,
        _: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Map<String, Value>, MapperError> {
        let owner = self.to.access(resource);
        Ok(self
            .names
            .iter()
            .map(|name| (name.clone(), read(owner, name)))
            .collect())
    }
}
