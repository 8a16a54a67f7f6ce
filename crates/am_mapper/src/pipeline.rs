use alloc::string::{String, ToString};
use alloc::vec::Vec;

use am_reflect::Resource;
use am_utils::text::{pluralize, singularize};
use serde_json::{Map, Value};

use crate::error::{DeclarationError, MapperError};
use crate::key_transform::apply_key_case;
use crate::mapper::{Mapper, MapperDefinition, MapperId};
use crate::options::RenderOptions;
use crate::registry::MapperRegistry;
use crate::renderer::RenderContext;

impl MapperRegistry {
    fn definition_of<M: Mapper>(&self) -> Result<&MapperDefinition, DeclarationError> {
        self.get_type::<M>()
            .ok_or_else(|| DeclarationError::Unregistered {
                mapper: M::type_path().to_string(),
            })
    }

    fn definition_by_id(&self, id: MapperId) -> Result<&MapperDefinition, DeclarationError> {
        self.get(id).ok_or_else(|| DeclarationError::Unregistered {
            mapper: id.to_string(),
        })
    }

    /// Renders a resource or a collection with the mapper `M`.
    ///
    /// - With a scope, the call is delegated to that scope.
    /// - Rootless, a collection renders to an array (nil elements dropped)
    ///   and anything else to a single map.
    /// - Otherwise the output is wrapped under the root: pluralized for a
    ///   collection, singularized for a single resource.
    ///
    /// A nil input renders to `null`, with or without root.
    ///
    /// Relations follow the resource graph: a cyclic graph recurses until the
    /// stack is exhausted.
    pub fn render<M: Mapper>(
        &self,
        input: &dyn Resource,
        options: &RenderOptions,
    ) -> Result<Value, MapperError> {
        let definition = self.definition_of::<M>()?;
        self.render_definition(definition, input, options)
    }

    /// [`render`](Self::render) with a mapper, or scope, known by id.
    pub fn render_id(
        &self,
        id: MapperId,
        input: &dyn Resource,
        options: &RenderOptions,
    ) -> Result<Value, MapperError> {
        let definition = self.definition_by_id(id)?;
        self.render_definition(definition, input, options)
    }

    /// Renders a single resource without root. Nil renders to `null`.
    pub fn render_one<M: Mapper>(&self, resource: &dyn Resource) -> Result<Value, MapperError> {
        let definition = self.definition_of::<M>()?;
        self.one(definition, resource)
    }

    /// Renders every element of a collection without root, dropping nils.
    ///
    /// A resource that is not a collection is rendered as a collection of one.
    pub fn render_many<M: Mapper>(
        &self,
        resources: &dyn Resource,
    ) -> Result<Value, MapperError> {
        let definition = self.definition_of::<M>()?;
        match resources.elements() {
            Some(items) => self.all(definition, &items),
            None => self.all(definition, &[resources]),
        }
    }

    fn render_definition(
        &self,
        definition: &MapperDefinition,
        input: &dyn Resource,
        options: &RenderOptions,
    ) -> Result<Value, MapperError> {
        if let Some(scope) = options.scope_name() {
            let Some(id) = definition.scope(scope) else {
                return Err(DeclarationError::UnknownScope {
                    mapper: definition.path().to_string(),
                    scope: scope.to_string(),
                }
                .into());
            };
            log::trace!("`{}` delegates to scope `{scope}`", definition.path());
            return self.render_id(id, input, &options.without_scope());
        }

        log::trace!("render `{}`", definition.path());

        let items = input.elements();
        if options.is_rootless() {
            return match items {
                Some(items) => self.all(definition, &items),
                None => self.one(definition, input),
            };
        }

        if input.is_nil() {
            return Ok(Value::Null);
        }

        let root = options.root_name().unwrap_or(definition.root());
        let (key, value) = match items {
            Some(items) => (pluralize(root), self.all(definition, &items)?),
            None => (singularize(root), self.one(definition, input)?),
        };

        let mut wrapped = Map::new();
        wrapped.insert(key, value);
        Ok(Value::Object(wrapped))
    }

    /// Renders one resource: merges the renderer outputs, later keys
    /// winning, then rewrites the keys.
    fn one(
        &self,
        definition: &MapperDefinition,
        resource: &dyn Resource,
    ) -> Result<Value, MapperError> {
        if resource.is_nil() {
            return Ok(Value::Null);
        }

        let renderers = definition.renderers();
        if renderers.is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        let cx = RenderContext::new(self, definition);
        let mut merged: Map<String, Value> = Map::new();
        for renderer in renderers {
            merged.extend(renderer.render(&cx, resource)?);
        }

        Ok(Value::Object(apply_key_case(merged, self.key_case())))
    }

    fn all(
        &self,
        definition: &MapperDefinition,
        items: &[&dyn Resource],
    ) -> Result<Value, MapperError> {
        let mut rendered = Vec::with_capacity(items.len());
        for &item in items {
            match self.one(definition, item)? {
                Value::Null => {}
                value => rendered.push(value),
            }
        }
        Ok(Value::Array(rendered))
    }
}
