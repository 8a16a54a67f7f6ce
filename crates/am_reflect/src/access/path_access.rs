//! Provide multi-layer path accessing support

use core::fmt;

use crate::Resource;
use crate::access::path::parse;
use crate::access::{Accessor, ParseError};

// -----------------------------------------------------------------------------
// PathAccessor

/// Reusable path accessor, a thin wrapper over `Box<[Accessor]>`.
///
/// The path is parsed once, typically when a renderer is declared, and
/// walked on every render.
///
/// # Examples
///
/// ```
/// use am_reflect::access::PathAccessor;
/// use serde_json::json;
///
/// let doc = json!({ "friend": { "name": "Nicolas", "tags": ["a", "b"] } });
///
/// let name = PathAccessor::parse_static("friend.name").unwrap();
/// assert_eq!(name.access(&doc).map(|r| r.to_value()), Some(json!("Nicolas")));
///
/// let tag = PathAccessor::parse_static("friend.tags[1]").unwrap();
/// assert_eq!(tag.access(&doc).map(|r| r.to_value()), Some(json!("b")));
///
/// let missing = PathAccessor::parse_static("friend.age").unwrap();
/// assert!(missing.access(&doc).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathAccessor(Box<[Accessor<'static>]>);

impl PathAccessor {
    /// Parses the path, copying each field name.
    pub fn parse(path: &str) -> Result<Self, ParseError<'_>> {
        let accessors = parse(path)?;
        Ok(Self(accessors.into_iter().map(Accessor::into_owned).collect()))
    }

    /// Parses a static path, borrowing field names from it.
    pub fn parse_static(path: &'static str) -> Result<Self, ParseError<'static>> {
        Ok(Self(parse(path)?.into_boxed_slice()))
    }

    /// Returns the parsed accessors.
    #[inline]
    pub fn accessors(&self) -> &[Accessor<'static>] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the last accessor of the path.
    #[inline]
    pub fn last(&self) -> Option<&Accessor<'static>> {
        self.0.last()
    }

    /// Walks the whole path from `root`.
    pub fn access<'r>(&self, root: &'r dyn Resource) -> Option<&'r dyn Resource> {
        walk(root, &self.0)
    }

    /// Walks every accessor but the last one, returning the owner of the
    /// last step.
    pub fn access_parent<'r>(&self, root: &'r dyn Resource) -> Option<&'r dyn Resource> {
        match self.0.split_last() {
            Some((_, init)) => walk(root, init),
            None => Some(root),
        }
    }
}

fn walk<'r>(root: &'r dyn Resource, accessors: &[Accessor<'_>]) -> Option<&'r dyn Resource> {
    accessors
        .iter()
        .try_fold(root, |current, accessor| accessor.access(current))
}

impl fmt::Display for PathAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, accessor) in self.0.iter().enumerate() {
            if i > 0 && matches!(accessor, Accessor::Field(_)) {
                f.write_str(".")?;
            }
            fmt::Display::fmt(accessor, f)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
