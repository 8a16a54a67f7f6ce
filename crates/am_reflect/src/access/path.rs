//! Single-layer accessors and path parsing.

use alloc::borrow::Cow;
use core::fmt;

use crate::{Resource, ResourceKind};

// -----------------------------------------------------------------------------
// ParseError

/// Error information for a malformed access path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Position in `path`.
    pub offset: usize,
    /// The path that the error occurred in.
    pub path: &'a str,
    /// The underlying error.
    pub error: Cow<'static, str>,
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Encountered an error at offset {} while parsing `{}`: {}",
            self.offset, self.path, self.error,
        )
    }
}

impl core::error::Error for ParseError<'_> {}

// -----------------------------------------------------------------------------
// Accessor

/// One step of an access path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessor<'a> {
    /// A named field, see [`Resource::field`].
    Field(Cow<'a, str>),
    /// An element of a list.
    Index(usize),
}

impl Accessor<'_> {
    /// Converts into an accessor that owns its field name.
    pub fn into_owned(self) -> Accessor<'static> {
        match self {
            Self::Field(name) => Accessor::Field(Cow::Owned(name.into_owned())),
            Self::Index(index) => Accessor::Index(index),
        }
    }

    /// Returns the field name, if this is a field accessor.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    /// Performs the step with a safe read.
    pub fn access<'r>(&self, resource: &'r dyn Resource) -> Option<&'r dyn Resource> {
        let resource = resource.as_present()?;
        match self {
            Self::Field(name) => resource.field(name),
            Self::Index(index) => match resource.kind() {
                ResourceKind::List(items) => items.get(*index).copied(),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

// -----------------------------------------------------------------------------
// Parsing

fn error<'a>(offset: usize, path: &'a str, error: &'static str) -> ParseError<'a> {
    ParseError {
        offset,
        path,
        error: Cow::Borrowed(error),
    }
}

/// Parses `path` into its accessors, borrowing field names from it.
pub(crate) fn parse(path: &str) -> Result<Vec<Accessor<'_>>, ParseError<'_>> {
    let bytes = path.as_bytes();
    let len = bytes.len();
    if len == 0 {
        return Err(error(0, path, "empty path"));
    }

    let mut accessors = Vec::new();
    let mut i = 0;
    loop {
        if bytes[i] == b'[' {
            let start = i + 1;
            let mut end = start;
            while end < len && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end == start {
                return Err(error(start, path, "expected a list index"));
            }
            if end >= len || bytes[end] != b']' {
                return Err(error(end, path, "missing `]`"));
            }
            let index = path[start..end]
                .parse::<usize>()
                .map_err(|_| error(start, path, "list index overflows `usize`"))?;
            accessors.push(Accessor::Index(index));
            i = end + 1;
            if i < len && bytes[i] != b'.' && bytes[i] != b'[' {
                return Err(error(i, path, "expected `.` or `[` after a list index"));
            }
        } else {
            let start = i;
            while i < len && bytes[i] != b'.' && bytes[i] != b'[' {
                i += 1;
            }
            if i == start {
                return Err(error(start, path, "empty field name"));
            }
            accessors.push(Accessor::Field(Cow::Borrowed(&path[start..i])));
        }

        if i >= len {
            break;
        }
        if bytes[i] == b'.' {
            i += 1;
            if i >= len {
                return Err(error(i, path, "path ends with `.`"));
            }
            if bytes[i] == b'[' {
                return Err(error(i, path, "empty field name"));
            }
        }
    }
    Ok(accessors)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Accessor, parse};

    fn field(name: &str) -> Accessor<'_> {
        Accessor::Field(name.into())
    }

    #[test]
    fn parses_dotted_and_indexed_paths() {
        assert_eq!(parse("friend").unwrap(), vec![field("friend")]);
        assert_eq!(
            parse("friend.address.city").unwrap(),
            vec![field("friend"), field("address"), field("city")]
        );
        assert_eq!(
            parse("friends[2].name").unwrap(),
            vec![field("friends"), Accessor::Index(2), field("name")]
        );
        assert_eq!(
            parse("[0][1]").unwrap(),
            vec![Accessor::Index(0), Accessor::Index(1)]
        );
    }

    #[test]
    fn rejects_malformed_paths() {
        for (path, offset) in [
            ("", 0),
            (".friend", 0),
            ("friend.", 7),
            ("friend..name", 7),
            ("friends[", 8),
            ("friends[x]", 8),
            ("friends[1", 9),
            ("friends[1]name", 10),
            ("friend.[0]", 7),
        ] {
            let err = parse(path).unwrap_err();
            assert_eq!(err.offset, offset, "{path}: {err}");
            assert_eq!(err.path, path);
        }
    }

    #[test]
    fn display_round_trips_segments() {
        let rendered: Vec<_> = parse("a[3].b")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["a", "[3]", "b"]);
    }
}
