//! String helpers for key casing and English inflection.
//!
//! - [`lower_camel`]: `first_name` to `firstName`.
//! - [`capitalize`], [`lower_first`].
//! - [`pluralize`], [`singularize`]: suffix-rule inflection of the last word.

// -----------------------------------------------------------------------------
// Modules

mod casing;
mod inflect;

// -----------------------------------------------------------------------------
// Exports

pub use casing::{capitalize, lower_camel, lower_first};
pub use inflect::{pluralize, singularize};
