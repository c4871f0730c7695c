//! Kind-specific views of reflected values.
//!
//! ## Menu
//!
//! - [`ReflectRef`] / [`ReflectMut`]: what [`Reflect::reflect_ref`] and
//!   [`Reflect::reflect_mut`] return.
//! - [`Struct`]: slot access by index.
//! - [`DynamicStruct`]: a property bag walked like a struct.
//! - [`Enum`]: the active variant.
//! - [`Sequence`]: item access.
//! - [`Optional`]: the nullable wrapper.
//! - [`LazyValue`]: the deferred wrapper.
//!
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut

// -----------------------------------------------------------------------------
// Modules

mod enum_ops;
mod sequence_ops;
mod struct_ops;
mod wrapper_ops;

// -----------------------------------------------------------------------------
// Exports

pub use enum_ops::Enum;
pub use sequence_ops::{Sequence, SequenceIter};
pub use struct_ops::{DynamicStruct, Struct};
pub use wrapper_ops::{LazyValue, Optional};

use crate::Reflect;

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable kind-specific view of a value.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Enum(&'a dyn Enum),
    Sequence(&'a dyn Sequence),
    Optional(&'a dyn Optional),
    Lazy(&'a dyn LazyValue),
    /// Primitives and opaque values.
    Value(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    #[inline]
    pub fn as_struct(self) -> Option<&'a dyn Struct> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_enum(self) -> Option<&'a dyn Enum> {
        match self {
            Self::Enum(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(self) -> Option<&'a dyn Sequence> {
        match self {
            Self::Sequence(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_lazy(self) -> Option<&'a dyn LazyValue> {
        match self {
            Self::Lazy(value) => Some(value),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable kind-specific view of a value.
///
/// Only the kinds whose parts are written in place have their own variant.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Optional(&'a mut dyn Optional),
    Value(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    #[inline]
    pub fn as_struct(self) -> Option<&'a mut dyn Struct> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }
}
