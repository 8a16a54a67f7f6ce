use core::any::TypeId;
use core::fmt::Debug;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// `TypeId` already carries a well distributed `u64`, so the map hashes it
/// with [`NoOpHashState`] instead of running a real hasher.
///
/// # Examples
///
/// ```
/// use am_utils::TypeIdMap;
///
/// struct UserMapper;
///
/// let mut map = TypeIdMap::new();
/// map.insert_type::<UserMapper>(7_u32);
///
/// assert_eq!(map.get_type::<UserMapper>(), Some(&7));
/// assert!(!map.contains_type::<String>());
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Returns a reference to the value stored for `T`.
    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.0.get(&TypeId::of::<T>())
    }

    /// Inserts a value, returning the previous one for the same key.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, v: V) -> Option<V> {
        self.0.insert(type_id, v)
    }

    /// Inserts a value for `T`, returning the previous one.
    #[inline(always)]
    pub fn insert_type<T: ?Sized + 'static>(&mut self, v: V) -> Option<V> {
        self.insert(TypeId::of::<T>(), v)
    }

    /// Returns `true` if a value is stored for `T`.
    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.0.contains_key(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T> Default for TypeIdMap<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for TypeIdMap<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Debug> Debug for TypeIdMap<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    struct A;
    struct B;

    #[test]
    fn insert_replaces_previous_value() {
        let mut map = TypeIdMap::new();
        assert_eq!(map.insert_type::<A>(1), None);
        assert_eq!(map.insert(TypeId::of::<A>(), 2), Some(1));
        assert_eq!(map.get_type::<A>(), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn lookups_are_per_type() {
        let mut map = TypeIdMap::new();
        map.insert_type::<A>("a");
        assert!(map.contains_type::<A>());
        assert!(!map.contains_type::<B>());
        assert!(map.get_type::<B>().is_none());
    }
}
