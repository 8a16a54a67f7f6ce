use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;

use crate::error::ResolutionError;
use crate::mapper::MapperId;
use crate::registry::MapperRegistry;

// -----------------------------------------------------------------------------
// MapperResolver

/// Finds the mapper of a resource type at render time.
///
/// Used by relations declared without an explicit mapper, by
/// `polymorphic` and by `acts_as_polymorph`. `namespace` is the module path
/// of the declaring mapper; `type_ident` is a simple type name such as
/// `Friend`.
pub trait MapperResolver: Send + Sync + 'static {
    fn resolve(
        &self,
        registry: &MapperRegistry,
        namespace: Option<&str>,
        type_ident: &str,
    ) -> Result<MapperId, ResolutionError>;
}

// -----------------------------------------------------------------------------
// ConventionResolver

/// Resolves `Friend` to `{namespace}::FriendMapper`.
///
/// A miss is [`ResolutionError::MapperNotFound`] with the namespaced path.
/// With [`with_name_fallback`](Self::with_name_fallback), a unique mapper
/// named `FriendMapper` in any module is accepted instead.
///
/// ```
/// use am_mapper::ConventionResolver;
///
/// let resolver = ConventionResolver::new();
/// assert_eq!(resolver.mapper_path(Some("app::admin"), "Cat"), "app::admin::CatMapper");
///
/// let resolver = ConventionResolver::with_suffix("Serializer");
/// assert_eq!(resolver.mapper_path(None, "Cat"), "CatSerializer");
/// ```
#[derive(Debug, Clone)]
pub struct ConventionResolver {
    suffix: Cow<'static, str>,
    name_fallback: bool,
}

impl Default for ConventionResolver {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ConventionResolver {
    /// A resolver appending `Mapper`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            suffix: Cow::Borrowed("Mapper"),
            name_fallback: false,
        }
    }

    #[inline]
    pub fn with_suffix(suffix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            suffix: suffix.into(),
            name_fallback: false,
        }
    }

    /// Also accepts a mapper with the expected simple name in any module,
    /// as long as only one is registered.
    #[inline]
    pub fn with_name_fallback(mut self) -> Self {
        self.name_fallback = true;
        self
    }

    #[inline]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The full path a type resolves to.
    pub fn mapper_path(&self, namespace: Option<&str>, type_ident: &str) -> String {
        match namespace {
            Some(namespace) => format!("{namespace}::{type_ident}{}", self.suffix),
            None => format!("{type_ident}{}", self.suffix),
        }
    }
}

impl MapperResolver for ConventionResolver {
    fn resolve(
        &self,
        registry: &MapperRegistry,
        namespace: Option<&str>,
        type_ident: &str,
    ) -> Result<MapperId, ResolutionError> {
        let path = self.mapper_path(namespace, type_ident);
        if let Some(definition) = registry.get_by_path(&path) {
            return Ok(definition.id());
        }
        if !self.name_fallback {
            return Err(ResolutionError::MapperNotFound { path });
        }

        let name = format!("{type_ident}{}", self.suffix);
        match registry.get_by_name(&name) {
            Some(definition) => {
                log::trace!("`{path}` not found, resolved to `{}`", definition.path());
                Ok(definition.id())
            }
            None => Err(ResolutionError::MapperNotFound { path }),
        }
    }
}
