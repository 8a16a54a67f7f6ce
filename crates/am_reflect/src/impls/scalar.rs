use core::any::Any;

use serde_json::Value;

use crate::{Resource, ResourceKind};

macro_rules! impl_scalar_resource {
    ($($ty:ty => ($path:literal, $ident:literal, $module:expr), |$v:ident| $conv:expr;)*) => {$(
        impl Resource for $ty {
            #[inline]
            fn reflect_type_path(&self) -> &'static str {
                $path
            }

            #[inline]
            fn reflect_type_ident(&self) -> &'static str {
                $ident
            }

            #[inline]
            fn reflect_module_path(&self) -> Option<&'static str> {
                $module
            }

            #[inline]
            fn as_any(&self) -> &dyn Any {
                self
            }

            #[inline]
            fn as_present(&self) -> Option<&dyn Resource> {
                Some(self)
            }

            #[inline]
            fn kind(&self) -> ResourceKind<'_> {
                let $v = self;
                ResourceKind::Scalar(Value::from($conv))
            }
        }
    )*};
}

impl_scalar_resource! {
    bool => ("bool", "bool", None), |v| *v;
    i8 => ("i8", "i8", None), |v| *v;
    i16 => ("i16", "i16", None), |v| *v;
    i32 => ("i32", "i32", None), |v| *v;
    i64 => ("i64", "i64", None), |v| *v;
    isize => ("isize", "isize", None), |v| *v;
    u8 => ("u8", "u8", None), |v| *v;
    u16 => ("u16", "u16", None), |v| *v;
    u32 => ("u32", "u32", None), |v| *v;
    u64 => ("u64", "u64", None), |v| *v;
    usize => ("usize", "usize", None), |v| *v;
    f32 => ("f32", "f32", None), |v| *v;
    f64 => ("f64", "f64", None), |v| *v;
    char => ("char", "char", None), |v| v.to_string();
    String => ("alloc::string::String", "String", Some("alloc::string")), |v| v.as_str();
    &'static str => ("&str", "str", None), |v| *v;
}

// -----------------------------------------------------------------------------
// Tests
