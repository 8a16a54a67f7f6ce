use alloc::format;
use alloc::string::{String, ToString};

use am_reflect::{Resource, ResourceKind};
use serde_json::{Map, Value};

use super::{RenderContext, Renderer};
use crate::error::{MapperError, ResolutionError};
use crate::options::RenderOptions;

// -----------------------------------------------------------------------------
// Polymorphic

/// Renders the field `key` with the mapper named by the `{key}_type` field.
pub(crate) struct Polymorphic {
    key: String,
    discriminator: String,
}

impl Polymorphic {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            discriminator: format!("{key}_type"),
        }
    }

    fn discriminator(
        &self,
        cx: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<String, ResolutionError> {
        let found = resource
            .field(&self.discriminator)
            .and_then(|field| match field.kind() {
                ResourceKind::Scalar(Value::String(name)) if !name.is_empty() => Some(name),
                _ => None,
            });
        found.ok_or_else(|| ResolutionError::MissingDiscriminator {
            mapper: cx.mapper().path().to_string(),
            field: self.discriminator.clone(),
        })
    }
}

impl Renderer for Polymorphic {
    fn render(
        &self,
        cx: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Map<String, Value>, MapperError> {
        let type_ident = self.discriminator(cx, resource)?;
        let id = cx
            .registry()
            .resolver()
            .resolve(cx.registry(), cx.namespace(), &type_ident)?;

        let value = match resource.field(&self.key) {
            Some(related) => cx.render_with(id, related, &RenderOptions::new().rootless())?,
            None => Value::Null,
        };

        let mut map = Map::new();
        map.insert(self.key.clone(), value);
        Ok(map)
    }
}

// -----------------------------------------------------------------------------
// ActsAsPolymorph

/// Renders the whole resource with the mapper of its own type.
pub(crate) struct ActsAsPolymorph;

impl Renderer for ActsAsPolymorph {
    fn render(
        &self,
        cx: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Map<String, Value>, MapperError> {
        let Some(present) = resource.as_present() else {
            return Ok(Map::new());
        };

        let id = cx
            .registry()
            .resolver()
            .resolve(cx.registry(), cx.namespace(), present.reflect_type_ident())
            .map_err(|_| ResolutionError::NoMapperForResource {
                type_path: present.reflect_type_path().to_string(),
            })?;

        let value = cx.render_with(id, present, &RenderOptions::new().rootless())?;
        cx.expect_map(value)
    }
}
