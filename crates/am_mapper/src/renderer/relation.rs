use alloc::string::{String, ToString};

use am_reflect::Resource;
use am_reflect::access::PathAccessor;
use serde_json::{Map, Value};

use super::{RenderContext, Renderer};
use crate::error::{DeclarationError, MapperError};
use crate::mapper::{Mapper, MapperId};
use crate::options::RenderOptions;
use crate::registry::MapperRegistry;

type RegisterFn = fn(&mut MapperRegistry) -> Result<MapperId, DeclarationError>;

#[derive(Clone)]
enum Target {
    /// Asked to the resource's association reflection.
    Inferred,
    Typed(RegisterFn),
    /// Looked up by full path at render time.
    Named(String),
}

// -----------------------------------------------------------------------------
// Relation

/// Describes a relation: nests another mapper's rootless output under a key.
///
/// ```
/// use am_mapper::Relation;
/// # use am_mapper::{Mapper, MapperBuilder};
/// # use am_reflect::derive::TypePath;
/// # #[derive(TypePath)]
/// # struct FriendMapper;
/// # impl Mapper for FriendMapper {
/// #     fn declare(m: &mut MapperBuilder<'_>) { m.attributes(&["name"]); }
/// # }
///
/// // Mapper inferred from the `friend` association of the resource.
/// let inferred = Relation::new("friend");
///
/// // Explicit mapper, value read at `profile.best_friend`, scoped output.
/// let explicit = Relation::new("best_friend")
///     .mapper::<FriendMapper>()
///     .optional_path("profile.best_friend")
///     .scope("short");
/// # let _ = (inferred, explicit);
/// ```
#[derive(Clone)]
pub struct Relation {
    key: String,
    target: Target,
    optional_path: Option<String>,
    options: RenderOptions,
}

impl Relation {
    #[inline]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: Target::Inferred,
            optional_path: None,
            options: RenderOptions::new(),
        }
    }

    /// Renders with `M`, registering it if needed.
    #[inline]
    pub fn mapper<M: Mapper>(mut self) -> Self {
        self.target = Target::Typed(MapperRegistry::register::<M>);
        self
    }

    /// Renders with the mapper, or scope, registered under `path`.
    ///
    /// The path is checked when the relation first renders.
    #[inline]
    pub fn mapper_named(mut self, path: impl Into<String>) -> Self {
        self.target = Target::Named(path.into());
        self
    }

    /// Reads the related value at a dotted path instead of at `key`.
    #[inline]
    pub fn optional_path(mut self, path: impl Into<String>) -> Self {
        self.optional_path = Some(path.into());
        self
    }

    /// Forwards a scope to the nested render.
    #[inline]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.options = self.options.scope(scope);
        self
    }

    /// Forwards a root to the nested render. Since relations always render
    /// rootless, it only matters to custom renderers reading the options.
    #[inline]
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.options = self.options.root(root);
        self
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolves typed targets and parses the access path.
    pub(crate) fn build(
        self,
        registry: &mut MapperRegistry,
        mapper: &str,
    ) -> Result<RelationRenderer, DeclarationError> {
        let raw_path = self.optional_path.as_deref().unwrap_or(&self.key);
        let path = PathAccessor::parse(raw_path).map_err(|err| DeclarationError::InvalidPath {
            mapper: mapper.to_string(),
            path: raw_path.to_string(),
            reason: err.to_string(),
        })?;

        let target = match self.target {
            Target::Inferred => ResolvedTarget::Inferred,
            Target::Typed(register) => ResolvedTarget::Id(register(registry)?),
            Target::Named(path) => ResolvedTarget::Named(path),
        };

        Ok(RelationRenderer {
            key: self.key,
            path,
            target,
            options: self.options.rootless(),
        })
    }
}

impl From<&str> for Relation {
    #[inline]
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Relation {
    #[inline]
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

// -----------------------------------------------------------------------------
// RelationRenderer

enum ResolvedTarget {
    Inferred,
    Id(MapperId),
    Named(String),
}

pub(crate) struct RelationRenderer {
    key: String,
    path: PathAccessor,
    target: ResolvedTarget,
    options: RenderOptions,
}

impl RelationRenderer {
    /// `Ok(None)` when the owner of the related value is missing, so there is
    /// nothing to reflect on.
    fn resolve(
        &self,
        cx: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Option<MapperId>, MapperError> {
        match &self.target {
            ResolvedTarget::Id(id) => Ok(Some(*id)),
            ResolvedTarget::Named(path) => match cx.registry().get_by_path(path) {
                Some(definition) => Ok(Some(definition.id())),
                None => Err(DeclarationError::NotAMapper {
                    mapper: cx.mapper().path().to_string(),
                    target: path.clone(),
                }
                .into()),
            },
            ResolvedTarget::Inferred => {
                let Some(owner) = self.path.access_parent(resource) else {
                    return Ok(None);
                };
                if owner.is_nil() {
                    return Ok(None);
                }
                let association = self
                    .path
                    .last()
                    .and_then(|last| last.field_name())
                    .and_then(|field| owner.association(field));
                match association {
                    Some(type_ident) => {
                        let id = cx.registry().resolver().resolve(
                            cx.registry(),
                            cx.namespace(),
                            type_ident,
                        )?;
                        Ok(Some(id))
                    }
                    None => Err(DeclarationError::UndefinedRelation {
                        mapper: cx.mapper().path().to_string(),
                        key: self.key.clone(),
                    }
                    .into()),
                }
            }
        }
    }
}

impl Renderer for RelationRenderer {
    fn render(
        &self,
        cx: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Map<String, Value>, MapperError> {
        let value = match self.resolve(cx, resource)? {
            Some(id) => match self.path.access(resource) {
                Some(related) => cx.render_with(id, related, &self.options)?,
                None => Value::Null,
            },
            None => Value::Null,
        };

        let mut map = Map::new();
        map.insert(self.key.clone(), value);
        Ok(map)
    }
}
