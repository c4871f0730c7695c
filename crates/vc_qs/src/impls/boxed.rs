//! `Box<T>` is transparent: it shares the descriptor of `T` and every
//! view forwards to the boxed value. This is what allows recursive types
//! such as `struct Node { next: Option<Box<Node>> }`.

use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef};

impl<T: Typed + Reflect> Typed for Box<T> {
    #[inline]
    fn type_info() -> &'static TypeInfo {
        T::type_info()
    }

    #[inline]
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        T::from_boxed(value).map(Box::new)
    }
}

impl<T: Typed + Reflect> Reflect for Box<T> {
    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        (**self).as_reflect()
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        (**self).as_reflect_mut()
    }

    #[inline]
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        (**self).set(value)
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        (**self).reflect_ref()
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        (**self).reflect_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use alloc::boxed::Box;

    #[test]
    fn box_shares_the_inner_descriptor() {
        assert!(core::ptr::eq(<Box<u8>>::type_info(), u8::type_info()));

        let boxed: Box<u8> = Box::new(4);
        let value: &dyn Reflect = &boxed;
        assert_eq!(value.downcast_ref::<u8>(), Some(&4));
    }

    #[test]
    fn option_of_box_wraps_inner_values() {
        let info = <Option<Box<u8>>>::type_info();
        let value = info.coerce(Box::new(9_u8)).unwrap();
        assert_eq!(value.downcast_ref::<Option<Box<u8>>>(), Some(&Some(Box::new(9))));
    }
}
