use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::error::QueryError;
use crate::info::TypeInfo;
use crate::ops::ReflectRef;
use crate::query::QuerySyntax;
use crate::strategy::Strategy;

fn rejected(target: &TypeInfo, value: &dyn Reflect) -> QueryError {
    QueryError::conversion(
        target.type_path(),
        alloc::format!("unexpected value of `{}`", value.reflect_type_info().type_path()),
    )
}

// -----------------------------------------------------------------------------
// Sequence

/// Null items are left out.
pub(super) fn build_sequence(
    value: &dyn Reflect,
    inner: &Strategy,
    strategy: &Strategy,
    syntax: &QuerySyntax,
) -> Result<Option<String>, QueryError> {
    let ReflectRef::Sequence(sequence) = value.reflect_ref() else {
        return Err(strategy.mismatch(value.reflect_type_info()));
    };
    let mut joined = String::new();
    let mut first = true;
    for item in sequence.iter() {
        let Some(text) = inner.build(Some(item), syntax)? else {
            continue;
        };
        if !first {
            joined.push(syntax.value_separator());
        }
        joined.push_str(&text);
        first = false;
    }
    Ok(Some(joined))
}

pub(super) fn parse_sequence(
    raw: &str,
    target: &'static TypeInfo,
    inner: &Strategy,
    syntax: &QuerySyntax,
) -> Result<Box<dyn Reflect>, QueryError> {
    let Some(info) = target.as_sequence() else {
        return Err(Strategy::Sequence(Box::new(inner.clone())).mismatch(target));
    };
    let item = info.item();
    if !inner.can_handle(item) {
        return Err(inner.mismatch(item));
    }

    let mut items = Vec::new();
    for piece in syntax.split(raw) {
        let value = inner.parse(piece, item, syntax)?;
        let value = item.coerce(value).map_err(|value| rejected(item, &*value))?;
        items.push(value);
    }
    info.collect(items).map_err(|value| rejected(target, &*value))
}

// -----------------------------------------------------------------------------
// Lazy

/// Renders the forced value.
pub(super) fn build_lazy(
    value: &dyn Reflect,
    inner: &Strategy,
    strategy: &Strategy,
    syntax: &QuerySyntax,
) -> Result<Option<String>, QueryError> {
    match value.reflect_ref() {
        ReflectRef::Lazy(lazy) => inner.build(Some(lazy.force()), syntax),
        _ => Err(strategy.mismatch(value.reflect_type_info())),
    }
}

/// Parses eagerly and wraps the result as already resolved.
pub(super) fn parse_lazy(
    raw: &str,
    target: &'static TypeInfo,
    inner: &Strategy,
    syntax: &QuerySyntax,
) -> Result<Box<dyn Reflect>, QueryError> {
    let Some(info) = target.as_lazy() else {
        return Err(Strategy::Lazy(Box::new(inner.clone())).mismatch(target));
    };
    let value_type = info.inner();
    let value = inner.parse(raw, value_type, syntax)?;
    let value = value_type
        .coerce(value)
        .map_err(|value| rejected(value_type, &*value))?;
    info.wrap(value).map_err(|value| rejected(target, &*value))
}
