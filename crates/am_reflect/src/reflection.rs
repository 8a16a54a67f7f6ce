use core::any::Any;
use core::fmt;

use serde_json::{Map, Value};

use crate::access::{ParseError, PathAccessor};

// -----------------------------------------------------------------------------
// ResourceKind

/// The shape of a [`Resource`] as seen by the engine.
///
/// Wrappers such as `Option<T>` and `Box<T>` report the kind of what they
/// hold, so `None` is [`Nil`](ResourceKind::Nil) and `Some(vec![..])` is a
/// [`List`](ResourceKind::List).
pub enum ResourceKind<'a> {
    /// An absent value.
    Nil,
    /// A leaf value: boolean, number or string.
    Scalar(Value),
    /// A value with named fields, see [`Resource::field`].
    Object,
    /// An ordered, finite collection of resources.
    List(Vec<&'a dyn Resource>),
}

impl ResourceKind<'_> {
    /// Returns a static name of the kind, useful for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Scalar(_) => "scalar",
            Self::Object => "object",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Debug for ResourceKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Self::List(items) => f.debug_tuple("List").field(&items.len()).finish(),
            _ => f.write_str(self.name()),
        }
    }
}

// -----------------------------------------------------------------------------
// Resource

/// A domain object (or collection of them) that mappers can read.
///
/// Reads through this trait never fail: an unknown field is `None`, a missing
/// value is [`ResourceKind::Nil`]. That is what lets attribute extraction and
/// delegation degrade to `null` instead of erroring.
///
/// Usually implemented with [`#[derive(Resource)]`](crate::derive::Resource).
/// Implementations exist for primitives, `String`, `Option<T>`, `Box<T>`,
/// `Vec<T>` and [`serde_json::Value`].
///
/// # Manual implementation
///
/// ```
/// use core::any::Any;
/// use am_reflect::{Resource, ResourceKind, Value};
///
/// struct Celsius(f64);
///
/// impl Resource for Celsius {
///     fn reflect_type_path(&self) -> &'static str { "weather::Celsius" }
///     fn reflect_type_ident(&self) -> &'static str { "Celsius" }
///     fn reflect_module_path(&self) -> Option<&'static str> { Some("weather") }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_present(&self) -> Option<&dyn Resource> { Some(self) }
///     fn kind(&self) -> ResourceKind<'_> { ResourceKind::Scalar(Value::from(self.0)) }
/// }
///
/// let t: &dyn Resource = &Celsius(21.5);
/// assert_eq!(t.to_value(), Value::from(21.5));
/// ```
pub trait Resource: Any + 'static {
    /// The fully qualified path of the underlying type.
    fn reflect_type_path(&self) -> &'static str;

    /// The short name of the underlying type, without module path and generics.
    fn reflect_type_ident(&self) -> &'static str;

    /// The module the underlying type is declared in.
    fn reflect_module_path(&self) -> Option<&'static str>;

    /// Casts to [`Any`] for downcasting, see `<dyn Resource>::downcast_ref`.
    fn as_any(&self) -> &dyn Any;

    /// Strips wrapper layers.
    ///
    /// Returns `None` for nil values, otherwise the innermost resource.
    fn as_present(&self) -> Option<&dyn Resource>;

    /// Returns the shape of this resource.
    fn kind(&self) -> ResourceKind<'_>;

    /// Reads a named field. Unknown names return `None`.
    fn field(&self, name: &str) -> Option<&dyn Resource> {
        let _ = name;
        None
    }

    /// Names of the fields exposed by [`field`](Resource::field), in
    /// declaration order.
    fn field_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Reflection on associations.
    ///
    /// Returns the simple type name of the resource that field `name` points
    /// to, or `None` when the field is not a declared association.
    fn association(&self, name: &str) -> Option<&'static str> {
        let _ = name;
        None
    }

    /// Converts the resource into a plain value.
    ///
    /// Objects become maps of their [`field_names`](Resource::field_names).
    fn to_value(&self) -> Value {
        match self.kind() {
            ResourceKind::Nil => Value::Null,
            ResourceKind::Scalar(value) => value,
            ResourceKind::List(items) => {
                Value::Array(items.into_iter().map(|item| item.to_value()).collect())
            }
            ResourceKind::Object => {
                let mut map = Map::new();
                for &name in self.field_names() {
                    if let Some(field) = self.field(name) {
                        map.insert(name.to_owned(), field.to_value());
                    }
                }
                Value::Object(map)
            }
        }
    }
}

impl dyn Resource {
    /// Downcasts to a concrete resource type.
    ///
    /// Wrappers are stripped first, so a `&dyn Resource` built from
    /// `Some(user)` downcasts to `User`.
    #[inline]
    pub fn downcast_ref<T: Resource>(&self) -> Option<&T> {
        self.as_present()?.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the underlying concrete type is `T`.
    #[inline]
    pub fn is<T: Resource>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Returns `true` for nil values.
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.as_present().is_none()
    }

    /// Returns `true` if the resource is a collection.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self.kind(), ResourceKind::List(_))
    }

    /// Returns the elements of a collection, or `None` for any other kind.
    pub fn elements(&self) -> Option<Vec<&dyn Resource>> {
        match self.kind() {
            ResourceKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// Parses `path` and walks it with safe reads.
    ///
    /// `Ok(None)` means a link of the chain was missing or nil.
    /// For repeated lookups, parse once with [`PathAccessor`] instead.
    pub fn access<'a, 'p>(
        &'a self,
        path: &'p str,
    ) -> Result<Option<&'a dyn Resource>, ParseError<'p>> {
        Ok(PathAccessor::parse(path)?.access(self))
    }
}

impl fmt::Debug for dyn Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.reflect_type_path(), self.kind())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::Resource;
    use crate::derive::Resource;

    #[derive(Resource)]
    struct Friend {
        name: String,
    }

    #[derive(Resource)]
    struct User {
        id: u32,
        name: String,
        #[resource(association)]
        friend: Option<Friend>,
        #[resource(skip)]
        #[allow(dead_code)]
        password: String,
    }

    fn michael(friend: Option<Friend>) -> User {
        User {
            id: 123,
            name: "Michael".into(),
            friend,
            password: "azerty".into(),
        }
    }

    #[test]
    fn object_to_value_skips_hidden_fields() {
        let user = michael(Some(Friend { name: "Nicolas".into() }));
        let user: &dyn Resource = &user;
        assert_eq!(
            user.to_value(),
            json!({ "id": 123, "name": "Michael", "friend": { "name": "Nicolas" } })
        );
        assert!(user.field("password").is_none());
    }

    #[test]
    fn downcast_through_option() {
        let user = Some(michael(None));
        let user: &dyn Resource = &user;
        assert_eq!(user.downcast_ref::<User>().map(|u| u.id), Some(123));
        assert!(!user.is::<Friend>());

        let nobody: Option<User> = None;
        let nobody: &dyn Resource = &nobody;
        assert!(nobody.is_nil());
        assert!(nobody.downcast_ref::<User>().is_none());
    }

    #[test]
    fn type_path_of_derived_resource() {
        let user = michael(None);
        let user: &dyn Resource = &user;
        assert_eq!(user.reflect_type_ident(), "User");
        assert_eq!(user.reflect_module_path(), Some(module_path!()));
        assert!(user.reflect_type_path().ends_with("::User"));
        assert_eq!(user.association("friend"), Some("Friend"));
        assert_eq!(user.association("name"), None);
    }

    #[test]
    fn lists_expose_elements() {
        let users = vec![michael(None), michael(None)];
        let users: &dyn Resource = &users;
        assert!(users.is_list());
        assert_eq!(users.elements().map(|e| e.len()), Some(2));
    }
}
