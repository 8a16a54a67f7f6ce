// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// Mapper names, default root keys and namespace-relative lookups are all
/// derived from these strings, so they should be stable across compiler
/// versions. The derive macros build them from `module_path!()` rather
/// than [`core::any::type_name`].
///
/// These names never start with `::`. Manual implementations must keep it
/// that way.
///
/// # Implementation
///
/// ```
/// use am_reflect::derive::TypePath;
///
/// // `my_crate::...::UserMapper`, following the module it is declared in.
/// #[derive(TypePath)]
/// struct UserMapper;
///
/// // Pinned, independent of where the type is declared.
/// #[derive(TypePath)]
/// #[resource(type_path = "api::v1::UserMapper")]
/// struct PinnedUserMapper;
/// ```
///
/// Or by hand:
///
/// ```
/// use am_reflect::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_ident() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
/// ```
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type.
    fn type_path() -> &'static str;

    /// Returns the short name of the type, without module path.
    fn type_ident() -> &'static str;

    /// Optional module path where the type is defined.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Namespace

/// Returns the last segment of a module path with at least two segments.
///
/// A type declared at the crate root has no namespace.
///
/// ```
/// use am_reflect::info::namespace;
///
/// assert_eq!(namespace("app"), None);
/// assert_eq!(namespace("app::api::v1"), Some("v1"));
/// ```
pub fn namespace(module_path: &str) -> Option<&str> {
    match module_path.rsplit_once("::") {
        Some((_, last)) if !last.is_empty() => Some(last),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::namespace;

    #[test]
    fn namespace_is_innermost_module() {
        assert_eq!(namespace("app"), None);
        assert_eq!(namespace("app::admin"), Some("admin"));
        assert_eq!(namespace("app::admin::v1"), Some("v1"));
        assert_eq!(namespace("你好::世界"), Some("世界"));
        assert_eq!(namespace("app::"), None);
    }
}
