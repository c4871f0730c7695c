use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};

use crate::Reflect;
use crate::error::QueryError;
use crate::info::{EnumInfo, TypeInfo, VariantInfo};
use crate::ops::ReflectRef;
use crate::strategy::Strategy;

fn active_variant(
    value: &dyn Reflect,
    strategy: &Strategy,
) -> Result<&'static VariantInfo, QueryError> {
    match value.reflect_ref() {
        ReflectRef::Enum(value) => value.variant_info().ok_or_else(|| {
            QueryError::conversion(value.reflect_type_info().type_path(), "unknown active variant")
        }),
        _ => Err(strategy.mismatch(value.reflect_type_info())),
    }
}

fn variant_at(
    info: &EnumInfo,
    target: &'static TypeInfo,
    index: usize,
) -> Result<Box<dyn Reflect>, QueryError> {
    info.instantiate(index).ok_or(QueryError::Instantiation {
        type_path: target.type_path(),
    })
}

// -----------------------------------------------------------------------------
// EnumAsName

pub(super) fn build_name(value: &dyn Reflect, strategy: &Strategy) -> Result<String, QueryError> {
    let variant = active_variant(value, strategy)?;
    match variant.value_name() {
        Some(name) => Ok(name.into()),
        None => Err(QueryError::EnumNaming {
            enum_path: value.reflect_type_info().type_path(),
            variant: variant.name(),
        }),
    }
}

pub(super) fn parse_name(
    raw: &str,
    target: &'static TypeInfo,
) -> Result<Box<dyn Reflect>, QueryError> {
    let Some(info) = target.as_enum() else {
        return Err(Strategy::EnumAsName.mismatch(target));
    };
    match info.position_by_value_name(raw) {
        Some(index) => variant_at(info, target, index),
        None => Err(QueryError::conversion(
            target.type_path(),
            format!("no variant is named `{raw}`"),
        )),
    }
}

// -----------------------------------------------------------------------------
// EnumAsUnderlying

pub(super) fn build_underlying(
    value: &dyn Reflect,
    strategy: &Strategy,
) -> Result<String, QueryError> {
    active_variant(value, strategy).map(|variant| variant.discriminant().to_string())
}

/// Accepts the discriminant or the variant name.
pub(super) fn parse_underlying(
    raw: &str,
    target: &'static TypeInfo,
) -> Result<Box<dyn Reflect>, QueryError> {
    let Some(info) = target.as_enum() else {
        return Err(Strategy::EnumAsUnderlying.mismatch(target));
    };
    let position = match raw.parse::<i64>() {
        Ok(discriminant) => info.position_by_discriminant(discriminant),
        Err(_) => info.position(raw),
    };
    match position {
        Some(index) => variant_at(info, target, index),
        None => Err(QueryError::conversion(
            target.type_path(),
            format!("`{raw}` is not a variant"),
        )),
    }
}
