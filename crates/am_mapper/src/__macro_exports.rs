//! Items used by [`auto_register!`](crate::auto_register).

#[cfg(feature = "auto_register")]
pub use inventory;

#[cfg(feature = "auto_register")]
pub use auto_register::*;

#[cfg(feature = "auto_register")]
pub(crate) mod auto_register {
    use crate::error::DeclarationError;
    use crate::mapper::Mapper;
    use crate::registry::MapperRegistry;

    /// A registration function submitted by `auto_register!`.
    pub struct AutoRegisterFunc(pub fn(&mut MapperRegistry) -> Result<(), DeclarationError>);

    inventory::collect!(AutoRegisterFunc);

    pub fn register_mapper<M: Mapper>(
        registry: &mut MapperRegistry,
    ) -> Result<(), DeclarationError> {
        registry.register::<M>().map(|_| ())
    }

    // Only runs where `inventory` works on this platform.
    fn mark_available(registry: &mut MapperRegistry) -> Result<(), DeclarationError> {
        registry.auto_registered = true;
        Ok(())
    }

    inventory::submit! { AutoRegisterFunc(mark_available) }

    pub(crate) fn register_all(registry: &mut MapperRegistry) -> Result<(), DeclarationError> {
        for func in inventory::iter::<AutoRegisterFunc> {
            (func.0)(registry)?;
        }
        Ok(())
    }
}

/// Submits mappers for [`MapperRegistry::auto_register`](crate::MapperRegistry::auto_register).
///
/// Generic mappers cannot be listed. Without the `auto_register` feature the
/// macro expands to nothing.
///
/// ```
/// use am_mapper::{Mapper, MapperBuilder, MapperRegistry, auto_register};
/// use am_reflect::derive::TypePath;
///
/// #[derive(TypePath)]
/// #[resource(type_path = "app::FriendMapper")]
/// struct FriendMapper;
///
/// impl Mapper for FriendMapper {
///     fn declare(m: &mut MapperBuilder<'_>) {
///         m.attributes(&["name"]);
///     }
/// }
///
/// auto_register!(FriendMapper);
///
/// let mut registry = MapperRegistry::new();
/// if registry.auto_register().unwrap() {
///     assert!(registry.contains::<FriendMapper>());
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register {
    ($($mapper:ty),+ $(,)?) => {
        $(
            $crate::__macro_exports::inventory::submit! {
                $crate::__macro_exports::AutoRegisterFunc(
                    $crate::__macro_exports::register_mapper::<$mapper>
                )
            }
        )+
    };
}

/// Submits mappers for [`MapperRegistry::auto_register`](crate::MapperRegistry::auto_register).
///
/// The `auto_register` feature is disabled, so this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($($mapper:ty),+ $(,)?) => {};
}
