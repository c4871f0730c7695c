use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::{TypeInfo, Typed};

/// Wraps a value of the inner type into the wrapper type.
///
/// On a type mismatch the value is handed back.
pub type WrapFn = fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

/// Collects items of the item type into the sequence type.
pub type CollectFn = fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// SequenceInfo

/// Descriptor of a sequence: its item type and how to collect items.
#[derive(Debug)]
pub struct SequenceInfo {
    item: fn() -> &'static TypeInfo,
    collect: CollectFn,
}

impl SequenceInfo {
    #[inline]
    pub fn new<Item: Typed>(collect: CollectFn) -> Self {
        Self {
            item: Item::type_info,
            collect,
        }
    }

    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    /// Builds the sequence from items of the item type.
    #[inline]
    pub fn collect(
        &self,
        items: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.collect)(items)
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// Descriptor of the nullable wrapper.
#[derive(Debug)]
pub struct OptionalInfo {
    inner: fn() -> &'static TypeInfo,
    wrap: WrapFn,
}

impl OptionalInfo {
    #[inline]
    pub fn new<T: Typed>(wrap: WrapFn) -> Self {
        Self {
            inner: T::type_info,
            wrap,
        }
    }

    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// `value` -> `Some(value)`
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }
}

// -----------------------------------------------------------------------------
// LazyInfo

/// Descriptor of the deferred wrapper.
#[derive(Debug)]
pub struct LazyInfo {
    inner: fn() -> &'static TypeInfo,
    wrap: WrapFn,
}

impl LazyInfo {
    #[inline]
    pub fn new<T: Typed>(wrap: WrapFn) -> Self {
        Self {
            inner: T::type_info,
            wrap,
        }
    }

    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Wraps an already resolved inner value.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }
}
