use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::time::Duration;
use std::time::SystemTime;

use crate::Reflect;
use crate::error::QueryError;
use crate::impls::Language;
use crate::info::TypeInfo;
use crate::strategy::Strategy;

// -----------------------------------------------------------------------------
// Default

pub(super) fn build_display(value: &dyn Reflect) -> Result<String, QueryError> {
    let info = value.reflect_type_info();
    info.display(value)
        .ok_or_else(|| QueryError::conversion(info.type_path(), "type has no textual form"))
}

pub(super) fn parse_from_str(
    raw: &str,
    target: &'static TypeInfo,
) -> Result<Box<dyn Reflect>, QueryError> {
    match target.parse_text(raw) {
        Some(Ok(value)) => Ok(value),
        Some(Err(message)) => Err(QueryError::conversion(target.type_path(), message)),
        None => Err(QueryError::conversion(
            target.type_path(),
            "type cannot be parsed from text",
        )),
    }
}

// -----------------------------------------------------------------------------
// BooleanAsBit

pub(super) fn build_bit(value: &dyn Reflect, strategy: &Strategy) -> Result<String, QueryError> {
    match value.downcast_ref::<bool>() {
        Some(true) => Ok("1".into()),
        Some(false) => Ok("0".into()),
        None => Err(strategy.mismatch(value.reflect_type_info())),
    }
}

// -----------------------------------------------------------------------------
// IsoLanguage

pub(super) fn build_language(
    value: &dyn Reflect,
    strategy: &Strategy,
) -> Result<String, QueryError> {
    value
        .downcast_ref::<Language>()
        .map(|language| language.code().into())
        .ok_or_else(|| strategy.mismatch(value.reflect_type_info()))
}

pub(super) fn parse_language(
    raw: &str,
    target: &'static TypeInfo,
) -> Result<Box<dyn Reflect>, QueryError> {
    raw.parse::<Language>()
        .map(|language| Box::new(language) as Box<dyn Reflect>)
        .map_err(|err| QueryError::conversion(target.type_path(), err.to_string()))
}

// -----------------------------------------------------------------------------
// UnixTimestamp

pub(super) fn build_timestamp(
    value: &dyn Reflect,
    strategy: &Strategy,
) -> Result<String, QueryError> {
    let Some(time) = value.downcast_ref::<SystemTime>() else {
        return Err(strategy.mismatch(value.reflect_type_info()));
    };
    let seconds = match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i128,
        Err(before) => -(before.duration().as_secs() as i128),
    };
    Ok(seconds.to_string())
}

pub(super) fn parse_timestamp(
    raw: &str,
    target: &'static TypeInfo,
) -> Result<Box<dyn Reflect>, QueryError> {
    let seconds: i64 = raw
        .parse()
        .map_err(|_| QueryError::conversion(target.type_path(), "not a whole number of seconds"))?;
    let offset = Duration::from_secs(seconds.unsigned_abs());
    let time = if seconds >= 0 {
        SystemTime::UNIX_EPOCH.checked_add(offset)
    } else {
        SystemTime::UNIX_EPOCH.checked_sub(offset)
    };
    time.map(|time| Box::new(time) as Box<dyn Reflect>)
        .ok_or_else(|| QueryError::conversion(target.type_path(), "timestamp out of range"))
}
