use alloc::string::String;

// -----------------------------------------------------------------------------
// RenderOptions

/// Options of a render call.
///
/// ```
/// use am_mapper::RenderOptions;
///
/// let options = RenderOptions::new().root("member").scope("admin");
/// assert_eq!(options.root_name(), Some("member"));
/// assert!(!options.is_rootless());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    root: Option<String>,
    rootless: bool,
    scope: Option<String>,
}

impl RenderOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            root: None,
            rootless: false,
            scope: None,
        }
    }

    /// Wraps the output under `root` instead of the mapper's default root.
    ///
    /// The key is pluralized for collections and singularized otherwise.
    #[inline]
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Suppresses root wrapping.
    #[inline]
    pub fn rootless(mut self) -> Self {
        self.rootless = true;
        self
    }

    /// Delegates the whole call to the named scope.
    #[inline]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[inline]
    pub fn root_name(&self) -> Option<&str> {
        self.root.as_deref()
    }

    #[inline]
    pub fn is_rootless(&self) -> bool {
        self.rootless
    }

    #[inline]
    pub fn scope_name(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// The same options, minus the scope.
    pub(crate) fn without_scope(&self) -> Self {
        Self {
            root: self.root.clone(),
            rootless: self.rootless,
            scope: None,
        }
    }
}

// -----------------------------------------------------------------------------
// KeyCase

/// How output keys are rewritten after merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyCase {
    /// `first_name` becomes `firstName`, recursively.
    #[default]
    LowerCamel,
    /// Keys are emitted as declared.
    Preserve,
}
