use alloc::boxed::Box;
use core::fmt::{self, Debug};
use core::ops::Deref;
use std::sync::LazyLock;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{GenericDefinition, Generics, LazyInfo, TypeInfo, TypeKind, Typed};
use crate::ops::{LazyValue, ReflectMut, ReflectRef};

type Init<T> = Box<dyn FnOnce() -> T + Send>;

// -----------------------------------------------------------------------------
// Lazy

/// A value computed on first access.
///
/// Building forces the value, parsing produces an already resolved one.
///
/// # Examples
///
/// ```
/// use vc_qs::impls::Lazy;
///
/// let page = Lazy::new(|| 2 + 3);
/// assert_eq!(*page.get(), 5);
/// assert_eq!(*Lazy::resolved(7), 7);
/// ```
pub struct Lazy<T> {
    cell: LazyLock<T, Init<T>>,
}

impl<T: Send + Sync + 'static> Lazy<T> {
    /// Defers `init` until the first access.
    #[inline]
    pub fn new(init: impl FnOnce() -> T + Send + 'static) -> Self {
        Self {
            cell: LazyLock::new(Box::new(init)),
        }
    }

    /// Wraps a value that is already known.
    #[inline]
    pub fn resolved(value: T) -> Self {
        Self::new(move || value)
    }

    /// Forces the value and returns it.
    #[inline]
    pub fn get(&self) -> &T {
        LazyLock::force(&self.cell)
    }
}

impl<T: Send + Sync + 'static> Deref for Lazy<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: Default + Send + Sync + 'static> Default for Lazy<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: Send + Sync + 'static> From<T> for Lazy<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::resolved(value)
    }
}

impl<T: PartialEq + Send + Sync + 'static> PartialEq for Lazy<T> {
    /// Forces both sides.
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Debug> Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lazy").field(&self.cell).finish()
    }
}

// -----------------------------------------------------------------------------
// Reflection

fn wrap_resolved<T: Typed + Reflect>(
    value: Box<dyn Reflect>,
) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    T::from_boxed(value).map(|value| Box::new(Lazy::resolved(value)) as Box<dyn Reflect>)
}

impl<T: Typed + Reflect> Typed for Lazy<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::Lazy(LazyInfo::new::<T>(wrap_resolved::<T>)))
                .with_generics(Generics::new(GenericDefinition::LAZY, &[T::type_info]))
        })
    }
}

impl<T: Typed + Reflect> Reflect for Lazy<T> {
    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }

    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = Self::from_boxed(value)?;
        Ok(())
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Lazy(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Value(self)
    }
}

impl<T: Typed + Reflect> LazyValue for Lazy<T> {
    #[inline]
    fn force(&self) -> &dyn Reflect {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::Lazy;
    use crate::info::Typed;
    use alloc::boxed::Box;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn init_runs_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let lazy = Lazy::new(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            10_u32
        });
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
        assert_eq!(*lazy.get() + *lazy.get(), 20);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn descriptor_wraps_resolved_values() {
        let info = <Lazy<u8>>::type_info();
        assert!(info.is_lazy());
        let lazy = info.as_lazy().unwrap();
        assert!(lazy.inner().is::<u8>());

        let value = lazy.wrap(Box::new(3_u8)).unwrap();
        assert_eq!(**value.downcast_ref::<Lazy<u8>>().unwrap(), 3);
    }
}
