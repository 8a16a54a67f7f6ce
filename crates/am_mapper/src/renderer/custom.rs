use alloc::string::String;
use core::marker::PhantomData;

use am_reflect::Resource;
use serde_json::{Map, Value};

use super::{RenderContext, Renderer};
use crate::error::MapperError;

// -----------------------------------------------------------------------------
// FnRenderer

/// A closure renderer, see [`MapperBuilder::each`](crate::MapperBuilder::each).
///
/// The closure returns a map (or `null` to contribute nothing).
pub struct FnRenderer<F>(pub F);

impl<F> Renderer for FnRenderer<F>
where
    F: Fn(&dyn Resource) -> Value + Send + Sync + 'static,
{
    fn render(
        &self,
        cx: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Map<String, Value>, MapperError> {
        cx.expect_map((self.0)(resource))
    }
}

// -----------------------------------------------------------------------------
// TypedRenderer

/// A closure renderer over a concrete resource type, see
/// [`MapperBuilder::each_as`](crate::MapperBuilder::each_as).
///
/// Resources of any other type contribute nothing.
pub struct TypedRenderer<T, F> {
    func: F,
    marker: PhantomData<fn(&T)>,
}

impl<T, F> TypedRenderer<T, F> {
    #[inline]
    pub fn new(func: F) -> Self {
        Self {
            func,
            marker: PhantomData,
        }
    }
}

impl<T, F> Renderer for TypedRenderer<T, F>
where
    T: Resource,
    F: Fn(&T) -> Value + Send + Sync + 'static,
{
    fn render(
        &self,
        cx: &RenderContext<'_>,
        resource: &dyn Resource,
    ) -> Result<Map<String, Value>, MapperError> {
        match resource.downcast_ref::<T>() {
            Some(resource) => cx.expect_map((self.func)(resource)),
            None => Ok(Map::new()),
        }
    }
}
