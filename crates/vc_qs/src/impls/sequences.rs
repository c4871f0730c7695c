use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{GenericDefinition, Generics, SequenceInfo, TypeInfo, TypeKind, Typed};
use crate::ops::Sequence;
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_sequence {
    ($ty:ident, $definition:ident) => {
        impl<T: Typed + Reflect> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                fn collect<T: Typed + Reflect>(
                    items: Vec<Box<dyn Reflect>>,
                ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
                    let mut out = $ty::with_capacity(items.len());
                    for item in items {
                        out.extend(Some(T::from_boxed(item)?));
                    }
                    Ok(Box::new(out))
                }

                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let generics = Generics::new(GenericDefinition::$definition, &[T::type_info]);
                    TypeInfo::new::<Self>(TypeKind::Sequence(SequenceInfo::new::<T>(collect::<T>)))
                        .with_generics(generics)
                        .with_default::<Self>()
                })
            }
        }

        impl<T: Typed + Reflect> Reflect for $ty<T> {
            impl_reflect_cast_fn!(Sequence, Value);
        }

        impl<T: Typed + Reflect> Sequence for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                self.iter().nth(index).map(|item| item as &dyn Reflect)
            }
        }
    };
}

impl_sequence!(Vec, VEC);
impl_sequence!(VecDeque, VEC_DEQUE);

#[cfg(test)]
mod tests {
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn collect_builds_the_sequence() {
        let info = <VecDeque<u8>>::type_info().as_sequence().unwrap();
        assert!(info.item().is::<u8>());

        let items = vec![Box::new(1_u8) as _, Box::new(2_u8) as _];
        let value = info.collect(items).unwrap();
        let deque = value.downcast_ref::<VecDeque<u8>>().unwrap();
        assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn collect_rejects_foreign_items() {
        let info = <Vec<u8>>::type_info().as_sequence().unwrap();
        let items = vec![Box::new(1_i64) as _];
        assert!(info.collect(items).is_err());
    }
}
