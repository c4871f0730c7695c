use alloc::boxed::Box;
use core::any::Any;

use crate::Reflect;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeInfo`].
///
/// Implemented by [`#[derive(Queryable)]`](crate::derive::Queryable) and for
/// the supported std types.
///
/// # Examples
///
/// ```
/// use vc_qs::info::Typed;
///
/// let info = <Vec<u32> as Typed>::type_info();
/// assert!(info.is_sequence());
/// assert_eq!(info.type_ident(), "Vec");
/// ```
///
/// # Manually Impl
///
/// Store the info in a [`NonGenericTypeInfoCell`] (or a
/// [`GenericTypeInfoCell`] for generic types) so it is built once.
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: Any {
    /// Returns the descriptor of `Self`.
    fn type_info() -> &'static TypeInfo;

    /// Unboxes a value produced for this type's descriptor.
    ///
    /// Types sharing the descriptor of another type (e.g. `Box<T>`)
    /// override this to rebuild themselves from that type.
    #[inline]
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>>
    where
        Self: Sized,
    {
        value.take::<Self>()
    }
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Provide dynamic dispatch for types that implement [`Typed`].
///
/// Auto impl for all types that implemented [`Typed`].
pub trait DynamicTyped {
    /// Returns the descriptor of the underlying value's type.
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
