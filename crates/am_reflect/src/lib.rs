#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Extern Self

// The derive macros emit `::am_reflect::...` paths, which must also resolve
// inside this crate's own tests and doc tests.
extern crate self as am_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod impls;
pub mod info;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use am_reflect_derive as derive;
pub use reflection::{Resource, ResourceKind};

/// Re-exported so that derived code and downstream crates agree on the
/// value type produced by [`Resource::to_value`].
pub use serde_json::{Map, Value};
