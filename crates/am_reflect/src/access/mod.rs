//! Safe path-based reads through nested resources.
//!
//! A path is a chain of single-layer accessors:
//!
//! - Field name: `friend`, separated by `.`: `friend.address.city`
//! - List index: `[Number]`, e.g. `friends[0].name`
//!
//! Every step is a safe read. A missing field, a nil link or an index out of
//! bounds ends the walk with `None`; only a malformed path is an error.
//!
//! ```
//! use am_reflect::{Resource, access::PathAccessor, derive::Resource};
//!
//! #[derive(Resource)]
//! struct Address { city: String }
//!
//! #[derive(Resource)]
//! struct Friend { address: Option<Address> }
//!
//! #[derive(Resource)]
//! struct User { friends: Vec<Friend> }
//!
//! let user = User {
//!     friends: vec![
//!         Friend { address: Some(Address { city: "Lyon".into() }) },
//!         Friend { address: None },
//!     ],
//! };
//!
//! let city = PathAccessor::parse_static("friends[0].address.city").unwrap();
//! let city = city.access(&user).map(|r| r.to_value());
//! assert_eq!(city, Some(serde_json::json!("Lyon")));
//!
//! let broken = PathAccessor::parse_static("friends[1].address.city").unwrap();
//! assert!(broken.access(&user).is_none());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod path;
mod path_access;

// -----------------------------------------------------------------------------
// Exports

pub use path::{Accessor, ParseError};
pub use path_access::PathAccessor;
