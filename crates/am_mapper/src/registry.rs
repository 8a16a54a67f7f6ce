use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use am_utils::TypeIdMap;
use am_utils::hash::{HashMap, HashSet};

use crate::builder::MapperBuilder;
use crate::error::DeclarationError;
use crate::mapper::{Mapper, MapperDefinition, MapperId, MapperPath};
use crate::options::KeyCase;
use crate::renderer::Renderer;
use crate::resolver::{ConventionResolver, MapperResolver};

// -----------------------------------------------------------------------------
// Renderers

/// The renderers of a known mapper.
///
/// A declared mapper with no renderers is [`Empty`](Renderers::Empty) and
/// renders every resource as `{}`; an unknown mapper has no `Renderers` at
/// all, see [`MapperRegistry::renderers_for`].
#[derive(Clone, Copy)]
pub enum Renderers<'a> {
    Empty,
    Declared(&'a [Arc<dyn Renderer>]),
}

impl<'a> Renderers<'a> {
    #[inline]
    pub fn as_slice(&self) -> &'a [Arc<dyn Renderer>] {
        match self {
            Self::Empty => &[],
            Self::Declared(list) => list,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Debug for Renderers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Declared(list) => f.debug_tuple("Declared").field(&list.len()).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// MapperRegistry

/// The store of every declared mapper.
///
/// Definitions are populated by [`register`](Self::register) and
/// [`extend`](Self::extend), then only read while rendering. Mappers are
/// found by type, by full path (`app::admin::UserMapper`) or by unambiguous
/// simple name (`UserMapper`).
///
/// # Example
///
/// ```
/// use am_mapper::{Mapper, MapperBuilder, MapperRegistry};
/// use am_reflect::derive::TypePath;
///
/// #[derive(TypePath)]
/// #[resource(type_path = "app::EmptyMapper")]
/// struct EmptyMapper;
///
/// impl Mapper for EmptyMapper {
///     fn declare(_: &mut MapperBuilder<'_>) {}
/// }
///
/// let mut registry = MapperRegistry::new();
/// let id = registry.register::<EmptyMapper>().unwrap();
///
/// assert_eq!(registry.register::<EmptyMapper>(), Ok(id));
/// assert_eq!(registry.get_by_path("app::EmptyMapper").map(|d| d.id()), Some(id));
/// assert!(registry.renderers_for(id).unwrap().is_empty());
/// ```
pub struct MapperRegistry {
    pub(crate) definitions: Vec<MapperDefinition>,
    type_index: TypeIdMap<MapperId>,
    path_index: HashMap<String, MapperId>,
    name_index: HashMap<String, MapperId>,
    ambiguous_names: HashSet<String>,
    pub(crate) declaring: HashSet<MapperId>,
    resolver: Box<dyn MapperResolver>,
    key_case: KeyCase,
    pub(crate) auto_registered: bool,
}

impl Default for MapperRegistry {
    /// See [`MapperRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MapperRegistry {
    /// Creates an empty registry with a [`ConventionResolver`] and
    /// [`KeyCase::LowerCamel`] output keys.
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            type_index: TypeIdMap::new(),
            path_index: HashMap::default(),
            name_index: HashMap::default(),
            ambiguous_names: HashSet::default(),
            declaring: HashSet::default(),
            resolver: Box::new(ConventionResolver::new()),
            key_case: KeyCase::LowerCamel,
            auto_registered: false,
        }
    }

    /// Replaces the resolver used by inferred relations and polymorphism.
    #[inline]
    pub fn with_resolver(mut self, resolver: impl MapperResolver) -> Self {
        self.set_resolver(resolver);
        self
    }

    #[inline]
    pub fn set_resolver(&mut self, resolver: impl MapperResolver) {
        self.resolver = Box::new(resolver);
    }

    #[inline]
    pub fn resolver(&self) -> &dyn MapperResolver {
        &*self.resolver
    }

    /// Sets how output keys are rewritten.
    #[inline]
    pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = key_case;
        self
    }

    #[inline]
    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }

    // # Validity
    // The path must **not** already exist.
    fn add_indices(
        definition: &MapperDefinition,
        type_index: &mut TypeIdMap<MapperId>,
        path_index: &mut HashMap<String, MapperId>,
        name_index: &mut HashMap<String, MapperId>,
        ambiguous_names: &mut HashSet<String>,
    ) {
        let id = definition.id();
        let path = definition.path();

        if let Some(type_id) = definition.type_id() {
            type_index.insert(type_id, id);
        }

        let name = path.ident();
        if !ambiguous_names.contains(name) {
            if name_index.remove(name).is_some() {
                log::warn!("mapper name `{name}` is ambiguous, use full paths");
                ambiguous_names.insert(name.to_string());
            } else {
                name_index.insert(name.to_string(), id);
            }
        }

        path_index.insert(path.path().to_string(), id);
    }

    /// Adds a definition under a fresh id.
    pub(crate) fn insert(
        &mut self,
        mut definition: MapperDefinition,
    ) -> Result<MapperId, DeclarationError> {
        let id = MapperId::new(self.definitions.len());
        definition.id = id;

        if self.path_index.contains_key(definition.path().path()) {
            return Err(DeclarationError::DuplicatePath {
                mapper: definition.path().to_string(),
            });
        }

        Self::add_indices(
            &definition,
            &mut self.type_index,
            &mut self.path_index,
            &mut self.name_index,
            &mut self.ambiguous_names,
        );
        self.definitions.push(definition);
        Ok(id)
    }

    /// Drops every definition added after `len` and rebuilds the indices.
    fn rollback(&mut self, len: usize) {
        self.definitions.truncate(len);
        self.declaring.retain(|id| id.index() < len);

        self.type_index = TypeIdMap::new();
        self.path_index.clear();
        self.name_index.clear();
        self.ambiguous_names.clear();
        for definition in &mut self.definitions {
            definition.scopes.retain(|_, id| id.index() < len);
        }
        for definition in &self.definitions {
            Self::add_indices(
                definition,
                &mut self.type_index,
                &mut self.path_index,
                &mut self.name_index,
                &mut self.ambiguous_names,
            );
        }
    }

    /// Registers the mapper `M` if it has not been registered already.
    ///
    /// [`Mapper::declare`] runs once. Mappers it refers to by type, through
    /// relations or [`inherit`](MapperBuilder::inherit), are registered along
    /// the way. A mapper may refer to itself.
    ///
    /// On error, everything registered by this call is removed again.
    pub fn register<M: Mapper>(&mut self) -> Result<MapperId, DeclarationError> {
        if let Some(&id) = self.type_index.get_type::<M>() {
            return Ok(id);
        }

        let len = self.definitions.len();
        let id = self.insert(MapperDefinition::new(
            MapperPath::of::<M>(),
            Some(TypeId::of::<M>()),
        ))?;
        log::debug!("register mapper `{}` as {id}", M::type_path());

        self.declaring.insert(id);
        let mut builder = MapperBuilder::new(self, id);
        M::declare(&mut builder);
        let result = builder.finish();
        self.declaring.remove(&id);

        match result {
            Ok(()) => Ok(id),
            Err(err) => {
                self.rollback(len);
                Err(err)
            }
        }
    }

    /// Reopens `M`, registering it first if needed, and records more
    /// renderers on it.
    ///
    /// Renderers appended here are not seen by scopes or children created
    /// before the call. On error every renderer the call appended is
    /// dropped again, including those added to reopened scopes.
    pub fn extend<M: Mapper>(
        &mut self,
        f: impl FnOnce(&mut MapperBuilder<'_>),
    ) -> Result<MapperId, DeclarationError> {
        let id = self.register::<M>()?;

        let len = self.definitions.len();
        let lengths: Vec<usize> = self.definitions.iter().map(|d| d.renderers.len()).collect();

        let mut builder = MapperBuilder::new(self, id);
        f(&mut builder);
        match builder.finish() {
            Ok(()) => Ok(id),
            Err(err) => {
                for (definition, &n) in self.definitions.iter_mut().zip(&lengths) {
                    definition.renderers.truncate(n);
                }
                self.rollback(len);
                Err(err)
            }
        }
    }

    /// Appends one renderer to a registered mapper.
    pub fn add_renderer(
        &mut self,
        id: MapperId,
        renderer: impl Renderer,
    ) -> Result<(), DeclarationError> {
        match self.definitions.get_mut(id.index()) {
            Some(definition) => {
                definition.renderers.push(Arc::new(renderer));
                Ok(())
            }
            None => {
                log::warn!("renderer added to unknown mapper {id}");
                Err(DeclarationError::Unregistered {
                    mapper: id.to_string(),
                })
            }
        }
    }

    /// Registers every mapper listed in [`auto_register!`](crate::auto_register).
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// `Ok(true)` if automatic registration is supported on the current
    /// platform. Without the `auto_register` feature this always returns
    /// `Ok(false)`.
    pub fn auto_register(&mut self) -> Result<bool, DeclarationError> {
        #[cfg(feature = "auto_register")]
        {
            if self.auto_registered {
                return Ok(true);
            }
            crate::__macro_exports::auto_register::register_all(self)?;
            Ok(self.auto_registered)
        }
        #[cfg(not(feature = "auto_register"))]
        {
            Ok(false)
        }
    }

    /// Returns the renderers of a mapper, or `None` if `id` is unknown.
    pub fn renderers_for(&self, id: MapperId) -> Option<Renderers<'_>> {
        let definition = self.get(id)?;
        Some(match definition.renderers() {
            [] => Renderers::Empty,
            list => Renderers::Declared(list),
        })
    }

    #[inline]
    pub fn get(&self, id: MapperId) -> Option<&MapperDefinition> {
        self.definitions.get(id.index())
    }

    #[inline]
    pub fn id_of<M: Mapper>(&self) -> Option<MapperId> {
        self.type_index.get_type::<M>().copied()
    }

    #[inline]
    pub fn get_type<M: Mapper>(&self) -> Option<&MapperDefinition> {
        self.get(self.id_of::<M>()?)
    }

    #[inline]
    pub fn contains<M: Mapper>(&self) -> bool {
        self.type_index.contains_type::<M>()
    }

    /// Looks up a mapper, or a scope, by its full path.
    pub fn get_by_path(&self, path: &str) -> Option<&MapperDefinition> {
        match self.path_index.get(path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Looks up a mapper by its simple name.
    ///
    /// Returns `None` if the name is ambiguous.
    pub fn get_by_name(&self, name: &str) -> Option<&MapperDefinition> {
        match self.name_index.get(name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if several registered mappers share the simple name.
    #[inline]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous_names.contains(name)
    }

    /// Returns `true` while the mapper's `declare` is running.
    #[inline]
    pub fn is_declaring(&self, id: MapperId) -> bool {
        self.declaring.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates the definitions in registration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MapperDefinition> {
        self.definitions.iter()
    }
}

impl fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.definitions.iter().map(MapperDefinition::path))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MapperRegistryArc

/// A shareable [`MapperRegistry`] for declaring and rendering across threads.
#[derive(Clone, Default)]
pub struct MapperRegistryArc {
    /// The wrapped [`MapperRegistry`].
    pub internal: Arc<RwLock<MapperRegistry>>,
}

impl MapperRegistryArc {
    #[inline]
    pub fn new(registry: MapperRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`MapperRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, MapperRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`MapperRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, MapperRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for MapperRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}
