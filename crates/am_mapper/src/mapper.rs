use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use am_reflect::Resource;
use am_reflect::info::TypePath;
use am_utils::hash::HashMap;
use am_utils::text::capitalize;
use serde_json::Value;

use crate::builder::MapperBuilder;
use crate::error::MapperError;
use crate::key_transform::root_name;
use crate::options::RenderOptions;
use crate::registry::MapperRegistry;
use crate::renderer::Renderer;

// -----------------------------------------------------------------------------
// Mapper

/// A declared transformation from one resource type to an output map.
///
/// A mapper is a marker type. [`declare`](Mapper::declare) runs once, when
/// the mapper is registered, and records renderers on the builder.
///
/// # Example
///
/// ```
/// use am_mapper::{Mapper, MapperBuilder, MapperRegistry, RenderOptions};
/// use am_reflect::derive::{Resource, TypePath};
/// use serde_json::json;
///
/// #[derive(Resource)]
/// struct User { id: u32, first_name: String }
///
/// #[derive(TypePath)]
/// #[resource(type_path = "app::UserMapper")]
/// struct UserMapper;
///
/// impl Mapper for UserMapper {
///     fn declare(m: &mut MapperBuilder<'_>) {
///         m.attributes(&["id", "first_name"]);
///     }
/// }
///
/// let mut registry = MapperRegistry::new();
/// registry.register::<UserMapper>().unwrap();
///
/// let user = User { id: 1, first_name: "Michael".into() };
/// let out = UserMapper::with(&registry, &user, &RenderOptions::new()).unwrap();
/// assert_eq!(out, json!({ "user": { "id": 1, "firstName": "Michael" } }));
/// ```
pub trait Mapper: TypePath + Sized {
    /// Records the renderers of this mapper.
    fn declare(m: &mut MapperBuilder<'_>);

    /// Renders a resource or a collection, see [`MapperRegistry::render`].
    #[inline]
    fn with(
        registry: &MapperRegistry,
        input: &dyn Resource,
        options: &RenderOptions,
    ) -> Result<Value, MapperError> {
        registry.render::<Self>(input, options)
    }

    /// Renders a single resource without root, see [`MapperRegistry::render_one`].
    #[inline]
    fn render_one(
        registry: &MapperRegistry,
        resource: &dyn Resource,
    ) -> Result<Value, MapperError> {
        registry.render_one::<Self>(resource)
    }

    /// Renders every element of a collection, see [`MapperRegistry::render_many`].
    #[inline]
    fn render_many(
        registry: &MapperRegistry,
        resources: &dyn Resource,
    ) -> Result<Value, MapperError> {
        registry.render_many::<Self>(resources)
    }
}

// -----------------------------------------------------------------------------
// MapperId

/// Index of a [`MapperDefinition`] inside its [`MapperRegistry`].
///
/// Only meaningful for the registry that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MapperId(u32);

impl MapperId {
    pub(crate) const PLACEHOLDER: Self = Self(u32::MAX);

    #[inline(always)]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Gets the index of the mapper.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for MapperId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapperId({})", self.0)
    }
}

impl fmt::Display for MapperId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// MapperPath

/// Owned qualified name of a mapper.
///
/// Typed mappers borrow theirs from [`TypePath`]; scopes are synthesized at
/// declaration time, so the path is owned.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MapperPath {
    path: String,
    ident: String,
    module_path: Option<String>,
}

impl MapperPath {
    /// The path of a typed mapper.
    pub fn of<M: TypePath + ?Sized>() -> Self {
        Self {
            path: M::type_path().to_owned(),
            ident: M::type_ident().to_owned(),
            module_path: M::module_path().map(ToOwned::to_owned),
        }
    }

    /// Parses `a::b::Ident`. A path without `::` has no module.
    pub fn parse(path: &str) -> Self {
        match path.rsplit_once("::") {
            Some((module, ident)) => Self {
                path: path.to_owned(),
                ident: ident.to_owned(),
                module_path: Some(module.to_owned()),
            },
            None => Self {
                path: path.to_owned(),
                ident: path.to_owned(),
                module_path: None,
            },
        }
    }

    /// `{path}Scope{Name}`, in the same module.
    pub fn scoped(&self, name: &str) -> Self {
        let suffix = format!("Scope{}", capitalize(name));
        Self {
            path: format!("{}{suffix}", self.path),
            ident: format!("{}{suffix}", self.ident),
            module_path: self.module_path.clone(),
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// The namespace other mappers are looked up in.
    #[inline]
    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref()
    }
}

impl fmt::Debug for MapperPath {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.path, f)
    }
}

impl fmt::Display for MapperPath {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

// -----------------------------------------------------------------------------
// MapperDefinition

/// The registered state of one mapper: its renderers and its scopes.
#[derive(Clone)]
pub struct MapperDefinition {
    pub(crate) id: MapperId,
    path: MapperPath,
    type_id: Option<TypeId>,
    root: String,
    pub(crate) renderers: Vec<Arc<dyn Renderer>>,
    pub(crate) scopes: HashMap<String, MapperId>,
}

impl MapperDefinition {
    /// Not yet registered: the id is assigned by the registry.
    pub(crate) fn new(path: MapperPath, type_id: Option<TypeId>) -> Self {
        let root = root_name(&path);
        Self {
            id: MapperId::PLACEHOLDER,
            path,
            type_id,
            root,
            renderers: Vec::new(),
            scopes: HashMap::default(),
        }
    }

    /// A scope of `base`: a copy of its current renderers under a new name.
    pub(crate) fn scope_of(base: &Self, name: &str) -> Self {
        Self {
            id: MapperId::PLACEHOLDER,
            path: base.path.scoped(name),
            type_id: None,
            root: base.root.clone(),
            renderers: base.renderers.clone(),
            scopes: HashMap::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> MapperId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &MapperPath {
        &self.path
    }

    /// `None` for scopes.
    #[inline]
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// The default root key, before pluralization.
    #[inline]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The renderers, in registration order.
    #[inline]
    pub fn renderers(&self) -> &[Arc<dyn Renderer>] {
        &self.renderers
    }

    /// Looks up a scope. `admin` and `Admin` name the same scope.
    pub fn scope(&self, name: &str) -> Option<MapperId> {
        self.scopes.get(capitalize(name).as_str()).copied()
    }

    /// Names of the declared scopes, capitalized.
    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }
}

impl fmt::Debug for MapperDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperDefinition")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("root", &self.root)
            .field("renderers", &self.renderers.len())
            .field("scopes", &self.scopes)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::MapperPath;

    #[test]
    fn scoped_paths() {
        let base = MapperPath::parse("app::UserMapper");
        let scoped = base.scoped("admin");
        assert_eq!(scoped.path(), "app::UserMapperScopeAdmin");
        assert_eq!(scoped.ident(), "UserMapperScopeAdmin");
        assert_eq!(scoped.module_path(), Some("app"));
    }

    #[test]
    fn parse_without_module() {
        let path = MapperPath::parse("UserMapper");
        assert_eq!(path.ident(), "UserMapper");
        assert_eq!(path.module_path(), None);
    }
}
