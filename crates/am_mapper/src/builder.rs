use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;

use am_reflect::Resource;
use am_reflect::access::PathAccessor;
use am_utils::text::capitalize;
use serde_json::Value;

use crate::error::DeclarationError;
use crate::mapper::{Mapper, MapperDefinition, MapperId, MapperPath};
use crate::registry::MapperRegistry;
use crate::renderer::{ActsAsPolymorph, Attributes, Delegate, Polymorphic};
use crate::renderer::{FnRenderer, Relation, Renderer, TypedRenderer};

// -----------------------------------------------------------------------------
// MapperBuilder

/// Records the renderers of one mapper, see [`Mapper::declare`].
///
/// Every method appends one renderer, in call order. Declaration errors do
/// not panic: the first one is kept and returned by
/// [`MapperRegistry::register`], which then discards the mapper.
pub struct MapperBuilder<'r> {
    registry: &'r mut MapperRegistry,
    id: MapperId,
    error: Option<DeclarationError>,
}

impl<'r> MapperBuilder<'r> {
    pub(crate) fn new(registry: &'r mut MapperRegistry, id: MapperId) -> Self {
        Self {
            registry,
            id,
            error: None,
        }
    }

    pub(crate) fn finish(self) -> Result<(), DeclarationError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    #[inline]
    fn definition(&self) -> &MapperDefinition {
        &self.registry.definitions[self.id.index()]
    }

    #[inline]
    fn definition_mut(&mut self) -> &mut MapperDefinition {
        &mut self.registry.definitions[self.id.index()]
    }

    #[inline]
    fn mapper_name(&self) -> String {
        self.definition().path().to_string()
    }

    fn fail(&mut self, err: DeclarationError) {
        log::debug!("{err}");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn push(&mut self, renderer: Arc<dyn Renderer>) -> &mut Self {
        self.definition_mut().renderers.push(renderer);
        self
    }

    /// The id of the mapper being declared.
    #[inline]
    pub fn id(&self) -> MapperId {
        self.id
    }

    /// The path of the mapper being declared.
    #[inline]
    pub fn path(&self) -> &MapperPath {
        self.definition().path()
    }

    /// Read access to the registry, e.g. to inspect other mappers.
    #[inline]
    pub fn registry(&self) -> &MapperRegistry {
        self.registry
    }

    /// Copies the named fields of the resource. Unknown fields are `null`.
    pub fn attributes(&mut self, names: &[&str]) -> &mut Self {
        let names: Box<[String]> = names.iter().map(|name| name.to_string()).collect();
        self.push(Arc::new(Attributes::new(names)))
    }

    /// Copies the named fields of the resource found at the dotted path `to`.
    ///
    /// A broken link on the path gives `null` for every name. A malformed
    /// path is a [`DeclarationError::InvalidPath`].
    pub fn delegate(&mut self, names: &[&str], to: &str) -> &mut Self {
        let to = match PathAccessor::parse(to) {
            Ok(to) => to,
            Err(err) => {
                let err = DeclarationError::InvalidPath {
                    mapper: self.mapper_name(),
                    path: to.to_string(),
                    reason: err.to_string(),
                };
                self.fail(err);
                return self;
            }
        };
        let names: Box<[String]> = names.iter().map(|name| name.to_string()).collect();
        self.push(Arc::new(Delegate::new(names, to)))
    }

    /// Nests another mapper's rootless output under a key.
    ///
    /// Accepts a key (`"friend"`) or a [`Relation`]. Without an explicit
    /// mapper, the mapper is inferred from the resource's association
    /// reflection, and a field that is not an association fails the render
    /// with [`DeclarationError::UndefinedRelation`].
    pub fn relation(&mut self, relation: impl Into<Relation>) -> &mut Self {
        let mapper = self.mapper_name();
        match relation.into().build(self.registry, &mapper) {
            Ok(renderer) => self.push(Arc::new(renderer)),
            Err(err) => {
                self.fail(err);
                self
            }
        }
    }

    /// Renders the field `key` with the mapper named by the field
    /// `{key}_type`, looked up next to this mapper.
    pub fn polymorphic(&mut self, key: &str) -> &mut Self {
        self.push(Arc::new(Polymorphic::new(key)))
    }

    /// Renders the whole resource with the mapper of its own type, looked up
    /// next to this mapper.
    ///
    /// The mapper found must not be this one, or rendering never ends.
    pub fn acts_as_polymorph(&mut self) -> &mut Self {
        self.push(Arc::new(ActsAsPolymorph))
    }

    /// Adds a custom renderer. The closure returns a map, or `null` to
    /// contribute nothing.
    ///
    /// ```
    /// # use am_mapper::{Mapper, MapperBuilder};
    /// # use am_reflect::derive::TypePath;
    /// use serde_json::json;
    ///
    /// # #[derive(TypePath)]
    /// # struct UserMapper;
    /// impl Mapper for UserMapper {
    ///     fn declare(m: &mut MapperBuilder<'_>) {
    ///         m.attributes(&["id"])
    ///             .each(|_| json!({ "lol": "lol" }))
    ///             .each(|_| json!({ "lola": "lola" }));
    ///     }
    /// }
    /// ```
    pub fn each<F>(&mut self, func: F) -> &mut Self
    where
        F: Fn(&dyn Resource) -> Value + Send + Sync + 'static,
    {
        self.push(Arc::new(FnRenderer(func)))
    }

    /// Like [`each`](Self::each), for resources of type `T`. Other resources
    /// contribute nothing.
    pub fn each_as<T, F>(&mut self, func: F) -> &mut Self
    where
        T: Resource,
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.push(Arc::new(TypedRenderer::<T, F>::new(func)))
    }

    /// Adds a renderer.
    pub fn renderer(&mut self, renderer: impl Renderer) -> &mut Self {
        self.push(Arc::new(renderer))
    }

    /// Declares named variants of this mapper.
    ///
    /// Each scope starts as a copy of the renderers declared so far, then
    /// `declare` adds to it. Later renderers of this mapper do not reach the
    /// scope. The scope is registered as `{path}Scope{Name}` and selected with
    /// [`RenderOptions::scope`](crate::RenderOptions::scope).
    ///
    /// Declaring an existing scope again reopens it.
    pub fn scope<F>(&mut self, names: &[&str], declare: F) -> &mut Self
    where
        F: Fn(&mut MapperBuilder<'_>),
    {
        if names.is_empty() || names.iter().any(|name| name.trim().is_empty()) {
            let err = DeclarationError::EmptyScope {
                mapper: self.mapper_name(),
            };
            self.fail(err);
            return self;
        }

        for name in names {
            let key = capitalize(name);
            let existing = self.definition().scopes.get(key.as_str()).copied();
            let scope_id = match existing {
                Some(id) => id,
                None => {
                    let scoped = MapperDefinition::scope_of(self.definition(), name);
                    match self.registry.insert(scoped) {
                        Ok(id) => {
                            log::debug!("declare scope `{name}` of `{}` as {id}", self.path());
                            self.definition_mut().scopes.insert(key, id);
                            id
                        }
                        Err(err) => {
                            self.fail(err);
                            continue;
                        }
                    }
                }
            };

            let mut builder = MapperBuilder::new(&mut *self.registry, scope_id);
            declare(&mut builder);
            if let Err(err) = builder.finish() {
                self.fail(err);
            }
        }
        self
    }

    /// Appends a copy of `P`'s current renderers at this position.
    ///
    /// Renderers declared before the call run first, so the parent's win on
    /// a key both write. Call it first to let this mapper override the
    /// parent. `P` is registered first if needed. Renderers added to either
    /// mapper afterwards are not shared.
    pub fn inherit<P: Mapper>(&mut self) -> &mut Self {
        let parent = match self.registry.register::<P>() {
            Ok(parent) => parent,
            Err(err) => {
                self.fail(err);
                return self;
            }
        };

        if parent == self.id || self.registry.is_declaring(parent) {
            let err = DeclarationError::CyclicInheritance {
                mapper: self.mapper_name(),
            };
            self.fail(err);
            return self;
        }

        let inherited = self.registry.definitions[parent.index()].renderers.clone();
        log::debug!(
            "`{}` inherits {} renderers of `{}`",
            self.path(),
            inherited.len(),
            P::type_path(),
        );
        self.definition_mut().renderers.extend(inherited);
        self
    }
}
