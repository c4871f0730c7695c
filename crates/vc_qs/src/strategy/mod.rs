//! Conversion strategies between typed values and their textual form.
//!
//! [`Strategy`] is a closed set of variants. Wrapper variants compose an
//! inner strategy, user conversions plug in through [`ValueAdapter`].

// -----------------------------------------------------------------------------
// Modules

mod adapter;
mod enums;
mod leaf;
mod wrappers;

// -----------------------------------------------------------------------------
// Exports

pub use adapter::{FnAdapter, ValueAdapter};

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;

use crate::Reflect;
use crate::error::QueryError;
use crate::impls::Language;
use crate::info::TypeInfo;
use crate::query::QuerySyntax;

// -----------------------------------------------------------------------------
// Strategy

/// A policy converting values of a class of types to and from text.
///
/// # Examples
///
/// ```
/// use vc_qs::info::Typed;
/// use vc_qs::query::QuerySyntax;
/// use vc_qs::strategy::Strategy;
///
/// let syntax = QuerySyntax::default();
/// let tags = vec![String::from("a"), String::from("b")];
///
/// let strategy = Strategy::Sequence(Box::new(Strategy::Default));
/// assert!(strategy.can_handle(<Vec<String>>::type_info()));
/// assert_eq!(strategy.build(Some(&tags), &syntax).unwrap().as_deref(), Some("a+b"));
///
/// let value = strategy.parse("a+b", <Vec<String>>::type_info(), &syntax).unwrap();
/// assert_eq!(value.downcast_ref::<Vec<String>>(), Some(&tags));
/// ```
#[derive(Clone)]
pub enum Strategy {
    /// `Display` and `FromStr` of the type.
    Default,
    /// `true` as `1`, anything else as `0`.
    BooleanAsBit,
    /// Enum variants by their declared value name.
    EnumAsName,
    /// Enum variants by their integral discriminant.
    EnumAsUnderlying,
    /// Items converted by the inner strategy and joined.
    Sequence(Box<Strategy>),
    /// The value of a [`Lazy`](crate::impls::Lazy) converted by the inner strategy.
    Lazy(Box<Strategy>),
    /// A [`Language`] as its ISO 639-1 code.
    IsoLanguage,
    /// A `SystemTime` as whole seconds since the Unix epoch.
    UnixTimestamp,
    /// Always renders as present but valueless.
    NullMarker,
    Custom(Arc<dyn ValueAdapter>),
}

impl Strategy {
    /// Wraps a user adapter.
    #[inline]
    pub fn custom(adapter: impl ValueAdapter) -> Self {
        Self::Custom(Arc::new(adapter))
    }

    #[inline]
    pub const fn is_null_marker(&self) -> bool {
        matches!(self, Self::NullMarker)
    }

    /// Reports whether values of `info` can be converted.
    ///
    /// A nullable wrapper is looked through.
    pub fn can_handle(&self, info: &'static TypeInfo) -> bool {
        let info = info.unwrap_optional();
        match self {
            Self::Default | Self::NullMarker => true,
            Self::BooleanAsBit => info.is::<bool>(),
            Self::EnumAsName | Self::EnumAsUnderlying => info.as_enum().is_some(),
            Self::Sequence(_) => info.is_sequence(),
            Self::Lazy(_) => info.is_lazy(),
            Self::IsoLanguage => info.is::<Language>(),
            Self::UnixTimestamp => info.is::<std::time::SystemTime>(),
            Self::Custom(adapter) => adapter.can_handle(info),
        }
    }

    /// Renders `value`, `None` standing for null.
    ///
    /// A nullable wrapper is looked through, a null value renders as null.
    pub fn build(
        &self,
        value: Option<&dyn Reflect>,
        syntax: &QuerySyntax,
    ) -> Result<Option<String>, QueryError> {
        let Some(value) = value.and_then(<dyn Reflect>::non_null) else {
            return Ok(None);
        };
        match self {
            Self::NullMarker => Ok(None),
            Self::Default => leaf::build_display(value).map(Some),
            Self::BooleanAsBit => leaf::build_bit(value, self).map(Some),
            Self::EnumAsName => enums::build_name(value, self).map(Some),
            Self::EnumAsUnderlying => enums::build_underlying(value, self).map(Some),
            Self::Sequence(inner) => wrappers::build_sequence(value, inner, self, syntax),
            Self::Lazy(inner) => wrappers::build_lazy(value, inner, self, syntax),
            Self::IsoLanguage => leaf::build_language(value, self).map(Some),
            Self::UnixTimestamp => leaf::build_timestamp(value, self).map(Some),
            Self::Custom(adapter) => adapter.build(value, syntax),
        }
    }

    /// Converts `raw` into a value of `declared`.
    ///
    /// For a nullable `declared` the value is of the wrapped type, see
    /// [`TypeInfo::coerce`].
    pub fn parse(
        &self,
        raw: &str,
        declared: &'static TypeInfo,
        syntax: &QuerySyntax,
    ) -> Result<Box<dyn Reflect>, QueryError> {
        if !self.can_handle(declared) {
            return Err(self.mismatch(declared));
        }
        let target = declared.unwrap_optional();
        match self {
            Self::NullMarker => declared.create_default().ok_or(QueryError::Instantiation {
                type_path: declared.type_path(),
            }),
            Self::Default => leaf::parse_from_str(raw, target),
            Self::BooleanAsBit => Ok(Box::new(raw == "1")),
            Self::EnumAsName => enums::parse_name(raw, target),
            Self::EnumAsUnderlying => enums::parse_underlying(raw, target),
            Self::Sequence(inner) => wrappers::parse_sequence(raw, target, inner, syntax),
            Self::Lazy(inner) => wrappers::parse_lazy(raw, target, inner, syntax),
            Self::IsoLanguage => leaf::parse_language(raw, target),
            Self::UnixTimestamp => leaf::parse_timestamp(raw, target),
            Self::Custom(adapter) => adapter.parse(raw, target, syntax),
        }
    }

    pub(crate) fn mismatch(&self, info: &TypeInfo) -> QueryError {
        QueryError::CapabilityMismatch {
            strategy: self.to_string(),
            type_path: info.type_path(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::BooleanAsBit => f.write_str("BooleanAsBit"),
            Self::EnumAsName => f.write_str("EnumAsName"),
            Self::EnumAsUnderlying => f.write_str("EnumAsUnderlying"),
            Self::Sequence(inner) => write!(f, "Sequence({inner})"),
            Self::Lazy(inner) => write!(f, "Lazy({inner})"),
            Self::IsoLanguage => f.write_str("IsoLanguage"),
            Self::UnixTimestamp => f.write_str("UnixTimestamp"),
            Self::NullMarker => f.write_str("NullMarker"),
            Self::Custom(adapter) => write!(f, "Custom({})", adapter.name()),
        }
    }
}

impl fmt::Debug for Strategy {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PartialEq for Strategy {
    /// Custom strategies are equal when they share the adapter.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Sequence(a), Self::Sequence(b)) | (Self::Lazy(a), Self::Lazy(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Eq for Strategy {}

#[cfg(test)]
mod tests;
