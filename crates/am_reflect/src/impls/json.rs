use core::any::Any;

use serde_json::Value;

use crate::{Resource, ResourceKind};

/// Lets untyped documents flow through mappers like any derived resource.
///
/// `null` is nil, arrays are lists and objects expose their keys as fields.
impl Resource for Value {
    fn reflect_type_path(&self) -> &'static str {
        "serde_json::Value"
    }

    fn reflect_type_ident(&self) -> &'static str {
        "Value"
    }

    fn reflect_module_path(&self) -> Option<&'static str> {
        Some("serde_json")
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_present(&self) -> Option<&dyn Resource> {
        match self {
            Value::Null => None,
            _ => Some(self),
        }
    }

    fn kind(&self) -> ResourceKind<'_> {
        match self {
            Value::Null => ResourceKind::Nil,
            Value::Array(items) => {
                ResourceKind::List(items.iter().map(|item| item as &dyn Resource).collect())
            }
            Value::Object(_) => ResourceKind::Object,
            scalar => ResourceKind::Scalar(scalar.clone()),
        }
    }

    fn field(&self, name: &str) -> Option<&dyn Resource> {
        match self {
            Value::Object(map) => map.get(name).map(|v| v as &dyn Resource),
            _ => None,
        }
    }

    // Keys are dynamic, so `field_names` stays empty.

    fn to_value(&self) -> Value {
        self.clone()
    }
}

// -----------------------------------------------------------------------------
// Tests
