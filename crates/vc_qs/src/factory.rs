//! Creation of instances that parsing needs but the object graph lacks.

use alloc::boxed::Box;

use log::debug;

use crate::Reflect;
use crate::error::QueryError;
use crate::info::TypeInfo;

/// Creates instances of a type on demand.
///
/// Used for null group slots flagged to be instantiated, null intermediates
/// of a slot path, and fresh roots of [`QueryMapper::parse`].
///
/// [`QueryMapper::parse`]: crate::QueryMapper::parse
pub trait InstanceFactory: Send + Sync {
    /// Returns a new instance of `info`, or `None` if none can be made.
    fn create(&self, info: &'static TypeInfo) -> Option<Box<dyn Reflect>>;
}

/// Creates instances through the default constructor a type exposes.
///
/// # Examples
///
/// ```
/// use vc_qs::factory::{DefaultFactory, InstanceFactory};
/// use vc_qs::info::Typed;
/// use std::time::SystemTime;
///
/// let value = DefaultFactory.create(u8::type_info()).unwrap();
/// assert_eq!(value.downcast_ref::<u8>(), Some(&0));
///
/// // `SystemTime` starts at the epoch
/// assert!(DefaultFactory.create(SystemTime::type_info()).is_some());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFactory;

impl InstanceFactory for DefaultFactory {
    #[inline]
    fn create(&self, info: &'static TypeInfo) -> Option<Box<dyn Reflect>> {
        info.create_default()
    }
}

impl<F> InstanceFactory for F
where
    F: Fn(&'static TypeInfo) -> Option<Box<dyn Reflect>> + Send + Sync,
{
    #[inline]
    fn create(&self, info: &'static TypeInfo) -> Option<Box<dyn Reflect>> {
        self(info)
    }
}

/// Creates a value for a slot declared as `declared`.
///
/// For a nullable `declared` an instance of the wrapped type is created and
/// wrapped, so the result is never null.
pub fn instantiate(
    factory: &dyn InstanceFactory,
    declared: &'static TypeInfo,
) -> Result<Box<dyn Reflect>, QueryError> {
    let target = declared.unwrap_optional();
    let failed = || QueryError::Instantiation {
        type_path: target.type_path(),
    };
    let value = factory.create(target).ok_or_else(failed)?;
    let value = declared.coerce(value).map_err(|_| failed())?;
    debug!("instantiated `{}`", target.type_path());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{DefaultFactory, InstanceFactory, instantiate};
    use crate::Reflect;
    use crate::error::QueryError;
    use crate::info::{TypeInfo, Typed};
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn nullable_slots_get_a_wrapped_instance() {
        let value = instantiate(&DefaultFactory, <Option<String>>::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<Option<String>>(), Some(&Some(String::new())));
    }

    #[test]
    fn closures_are_factories() {
        let seven = |info: &'static TypeInfo| -> Option<Box<dyn Reflect>> {
            info.is::<u8>().then(|| Box::new(7_u8) as Box<dyn Reflect>)
        };
        assert!(seven.create(u16::type_info()).is_none());
        let value = instantiate(&seven, <Option<u8>>::type_info()).unwrap();
        assert_eq!(value.downcast_ref::<Option<u8>>(), Some(&Some(7)));

        let err = instantiate(&seven, String::type_info()).unwrap_err();
        assert_eq!(
            err,
            QueryError::Instantiation {
                type_path: String::type_info().type_path()
            }
        );
    }
}
