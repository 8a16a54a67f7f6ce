use core::any::Any;

use crate::{Resource, ResourceKind};

// -----------------------------------------------------------------------------
// Option

impl<T: Resource> Resource for Option<T> {
    fn reflect_type_path(&self) -> &'static str {
        match self {
            Some(inner) => inner.reflect_type_path(),
            None => "core::option::Option",
        }
    }

    fn reflect_type_ident(&self) -> &'static str {
        match self {
            Some(inner) => inner.reflect_type_ident(),
            None => "Option",
        }
    }

    fn reflect_module_path(&self) -> Option<&'static str> {
        match self {
            Some(inner) => inner.reflect_module_path(),
            None => Some("core::option"),
        }
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Resource> {
        self.as_ref()?.as_present()
    }

    fn kind(&self) -> ResourceKind<'_> {
        match self {
            Some(inner) => inner.kind(),
            None => ResourceKind::Nil,
        }
    }

    fn field(&self, name: &str) -> Option<&dyn Resource> {
        self.as_ref()?.field(name)
    }

    fn field_names(&self) -> &'static [&'static str] {
        match self {
            Some(inner) => inner.field_names(),
            None => &[],
        }
    }

    fn association(&self, name: &str) -> Option<&'static str> {
        self.as_ref()?.association(name)
    }
}

// -----------------------------------------------------------------------------
// Box

impl<T: Resource + ?Sized> Resource for Box<T> {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        (**self).reflect_type_path()
    }

    #[inline]
    fn reflect_type_ident(&self) -> &'static str {
        (**self).reflect_type_ident()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        (**self).reflect_module_path()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Resource> {
        (**self).as_present()
    }

    #[inline]
    fn kind(&self) -> ResourceKind<'_> {
        (**self).kind()
    }

    #[inline]
    fn field(&self, name: &str) -> Option<&dyn Resource> {
        (**self).field(name)
    }

    #[inline]
    fn field_names(&self) -> &'static [&'static str] {
        (**self).field_names()
    }

    #[inline]
    fn association(&self, name: &str) -> Option<&'static str> {
        (**self).association(name)
    }

    #[inline]
    fn to_value(&self) -> serde_json::Value {
        (**self).to_value()
    }
}

// -----------------------------------------------------------------------------
// Vec

impl<T: Resource> Resource for Vec<T> {
    fn reflect_type_path(&self) -> &'static str {
        "alloc::vec::Vec"
    }

    fn reflect_type_ident(&self) -> &'static str {
        "Vec"
    }

    fn reflect_module_path(&self) -> Option<&'static str> {
        Some("alloc::vec")
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_present(&self) -> Option<&dyn Resource> {
        Some(self)
    }

    fn kind(&self) -> ResourceKind<'_> {
        ResourceKind::List(self.iter().map(|item| item as &dyn Resource).collect())
    }
}

// -----------------------------------------------------------------------------
// Tests
