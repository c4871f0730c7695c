use alloc::boxed::Box;
use core::any::Any;

use crate::info::DynamicTyped;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// A value whose slots and textual form can be reached at runtime.
///
/// Implemented by [`#[derive(Queryable)]`](crate::derive::Queryable) and for
/// the supported std types. The descriptor of the value is reached through
/// [`DynamicTyped::reflect_type_info`].
///
/// # Examples
///
/// ```
/// use vc_qs::{Reflect, ops::ReflectRef};
///
/// let value: &dyn Reflect = &Some(3_u8);
/// assert!(matches!(value.reflect_ref(), ReflectRef::Optional(_)));
/// assert_eq!(value.non_null().unwrap().downcast_ref::<u8>(), Some(&3));
/// ```
pub trait Reflect: DynamicTyped + Any + Send + Sync {
    /// Returns the value that carries the data.
    ///
    /// This is `self` for everything except transparent wrappers like
    /// `Box<T>`, which return the wrapped value.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Mutable form of [`Reflect::as_reflect`].
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Replaces `self` with `value`.
    ///
    /// Returns `value` back if it is of another type.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns a kind-specific view of `self`.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable kind-specific view of `self`.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Boxes `self` as a trait object.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        <dyn Any>::is::<T>(self.as_reflect())
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_qs::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(10_i32);
    /// assert_eq!(x.downcast_ref::<i32>(), Some(&10));
    /// assert!(x.downcast_ref::<u32>().is_none());
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self.as_reflect())
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self.as_reflect_mut())
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// Unlike the borrowing casts this does not look through `Box<T>`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !<dyn Any>::is::<T>(&*self) {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_qs::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(String::from("a"));
    /// assert_eq!(x.take::<String>().unwrap(), "a");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// Returns `true` for an empty nullable wrapper.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.non_null().is_none()
    }

    /// Looks through one level of nullable wrapper.
    ///
    /// `None` for an empty wrapper, the wrapped value for a full one and
    /// `self` for everything else.
    pub fn non_null(&self) -> Option<&dyn Reflect> {
        match self.reflect_ref() {
            ReflectRef::Optional(optional) => optional.value(),
            _ => Some(self),
        }
    }

    /// Mutable form of [`non_null`](Self::non_null).
    pub fn non_null_mut(&mut self) -> Option<&mut dyn Reflect> {
        if matches!(self.reflect_ref(), ReflectRef::Optional(_)) {
            match self.reflect_mut() {
                ReflectMut::Optional(optional) => optional.value_mut(),
                _ => None,
            }
        } else {
            Some(self)
        }
    }
}

impl core::fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_info().type_path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the casting methods of [`Reflect`] for a type whose
/// `reflect_ref` / `reflect_mut` views are `$ref_kind` / `$mut_kind`.
macro_rules! impl_reflect_cast_fn {
    ($ref_kind:ident, $mut_kind:ident) => {
        #[inline]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        #[inline]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }

        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = <Self as $crate::info::Typed>::from_boxed(value)?;
            Ok(())
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$ref_kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$mut_kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
