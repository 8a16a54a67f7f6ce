//! [`Resource`](crate::Resource) implementations for foreign types.
//!
//! - Scalars: `bool`, `char`, integers, floats, `String`, `&'static str`.
//! - Wrappers: `Option<T>`, `Box<T>` (including `Box<dyn Resource>`).
//! - Collections: `Vec<T>`.
//! - [`serde_json::Value`]: objects expose their keys as fields.

mod json;
mod scalar;
mod wrapper;
