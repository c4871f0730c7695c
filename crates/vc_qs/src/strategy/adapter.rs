use alloc::boxed::Box;
use alloc::string::String;
use core::marker::PhantomData;

use crate::Reflect;
use crate::error::QueryError;
use crate::info::{TypeInfo, Typed};
use crate::query::QuerySyntax;

// -----------------------------------------------------------------------------
// ValueAdapter

/// A user conversion, plugged in through [`Strategy::Custom`](super::Strategy::Custom).
///
/// Values reach the adapter with nullable wrappers looked through, and
/// `target` is the wrapped type.
pub trait ValueAdapter: Send + Sync + 'static {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    fn can_handle(&self, info: &'static TypeInfo) -> bool;

    /// Renders `value`, `None` standing for null.
    fn build(
        &self,
        value: &dyn Reflect,
        syntax: &QuerySyntax,
    ) -> Result<Option<String>, QueryError>;

    /// Converts `raw` into a value of `target`.
    fn parse(
        &self,
        raw: &str,
        target: &'static TypeInfo,
        syntax: &QuerySyntax,
    ) -> Result<Box<dyn Reflect>, QueryError>;
}

// -----------------------------------------------------------------------------
// FnAdapter

/// Adapts a pair of plain conversion functions of `T`.
///
/// # Examples
///
/// ```
/// use vc_qs::info::Typed;
/// use vc_qs::query::QuerySyntax;
/// use vc_qs::strategy::{FnAdapter, Strategy};
///
/// let upper = Strategy::custom(FnAdapter::<String>::new(
///     |s| s.to_uppercase(),
///     |raw| Ok(raw.to_lowercase()),
/// ));
///
/// let syntax = QuerySyntax::default();
/// let text = upper.build(Some(&String::from("abc")), &syntax).unwrap();
/// assert_eq!(text.as_deref(), Some("ABC"));
///
/// let value = upper.parse("XY", String::type_info(), &syntax).unwrap();
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "xy");
/// assert!(!upper.can_handle(u8::type_info()));
/// ```
pub struct FnAdapter<T> {
    to_text: fn(&T) -> String,
    from_text: fn(&str) -> Result<T, String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FnAdapter<T> {
    #[inline]
    pub const fn new(to_text: fn(&T) -> String, from_text: fn(&str) -> Result<T, String>) -> Self {
        Self {
            to_text,
            from_text,
            _marker: PhantomData,
        }
    }
}

impl<T: Typed + Reflect> ValueAdapter for FnAdapter<T> {
    fn name(&self) -> &str {
        T::type_info().type_ident()
    }

    #[inline]
    fn can_handle(&self, info: &'static TypeInfo) -> bool {
        info.is::<T>()
    }

    fn build(&self, value: &dyn Reflect, _: &QuerySyntax) -> Result<Option<String>, QueryError> {
        match value.downcast_ref::<T>() {
            Some(value) => Ok(Some((self.to_text)(value))),
            None => Err(QueryError::CapabilityMismatch {
                strategy: self.name().into(),
                type_path: value.reflect_type_info().type_path(),
            }),
        }
    }

    fn parse(
        &self,
        raw: &str,
        target: &'static TypeInfo,
        _: &QuerySyntax,
    ) -> Result<Box<dyn Reflect>, QueryError> {
        match (self.from_text)(raw) {
            Ok(value) => Ok(Box::new(value)),
            Err(message) => Err(QueryError::conversion(target.type_path(), message)),
        }
    }
}
