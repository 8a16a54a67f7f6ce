//! Static type names.
//!
//! - [`TypePath`]: static accessors to a type's path, name and module.
//! - [`namespace`]: the innermost module a type lives in.

mod type_path;

pub use type_path::{TypePath, namespace};
