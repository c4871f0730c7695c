use alloc::boxed::Box;
use std::time::SystemTime;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeInfo, TypeKind, Typed};
use crate::reflection::impl_reflect_cast_fn;

fn unix_epoch() -> Box<dyn Reflect> {
    Box::new(SystemTime::UNIX_EPOCH)
}

impl Typed for SystemTime {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            // `SystemTime` has no `Default`, the epoch stands in for it.
            TypeInfo::new::<Self>(TypeKind::Opaque).with_default_fn(unix_epoch)
        })
    }
}

impl Reflect for SystemTime {
    impl_reflect_cast_fn!(Value, Value);
}

#[cfg(test)]
mod tests {
    use crate::info::Typed;
    use std::time::SystemTime;

    #[test]
    fn epoch_is_the_default() {
        let info = SystemTime::type_info();
        assert!(info.is_opaque());
        let value = info.create_default().unwrap();
        assert_eq!(value.downcast_ref::<SystemTime>(), Some(&SystemTime::UNIX_EPOCH));
        // no textual form of its own
        assert!(info.parse_text("0").is_none());
    }
}
