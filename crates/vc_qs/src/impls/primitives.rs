use alloc::string::String;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeInfo, TypeKind, Typed};
use crate::reflection::impl_reflect_cast_fn;

/// Leaf values that are `Default + Display + FromStr`.
macro_rules! impl_primitive {
    ($($ty:ty),+ $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::new::<Self>(TypeKind::Primitive)
                        .with_default::<Self>()
                        .with_display::<Self>()
                        .with_from_str::<Self>()
                })
            }
        }

        impl Reflect for $ty {
            impl_reflect_cast_fn!(Value, Value);
        }
    )+};
}

impl_primitive!(
    bool, char, String, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn set_checks_type() {
        let mut value = 1_u32;
        assert!(value.set(Box::new(5_u32)).is_ok());
        assert_eq!(value, 5);

        let rejected = value.set(Box::new(String::from("5"))).unwrap_err();
        assert!(rejected.is::<String>());
        assert_eq!(value, 5);
    }

    #[test]
    fn strings_are_primitive_not_sequences() {
        let info = String::type_info();
        assert!(info.is_primitive());
        assert!(!info.is_sequence());
        assert_eq!(info.type_ident(), "String");
    }
}
