//! Dotted slot paths, e.g. `paging.page`.
//!
//! Slots are addressed by their indices from a root instance, each step
//! looking through a nullable wrapper.

use alloc::vec::Vec;

use crate::Reflect;
use crate::error::QueryError;
use crate::factory::{InstanceFactory, instantiate};
use crate::info::{FieldInfo, TypeInfo};

/// A slot reached from a root instance.
#[derive(Clone, Debug)]
pub struct SlotPath {
    indices: Vec<usize>,
    owner: &'static TypeInfo,
    field: &'static FieldInfo,
}

impl SlotPath {
    /// Slot indices from the root, the last one is the slot itself.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The type declaring the slot.
    #[inline]
    pub const fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    #[inline]
    pub const fn field(&self) -> &'static FieldInfo {
        self.field
    }
}

/// Follows the dotted `path` from `root`, materializing null intermediates.
///
/// Returns the final owner and slot. The final slot itself is left as is.
///
/// # Errors
///
/// - [`QueryError::NotFound`] if a segment names no slot of its owner.
/// - [`QueryError::NotWritable`] if a null intermediate cannot be written.
/// - [`QueryError::Instantiation`] if `factory` cannot create an intermediate.
///
/// # Examples
///
/// ```
/// use vc_qs::access::resolve_and_materialize_path;
/// use vc_qs::derive::Queryable;
/// use vc_qs::factory::DefaultFactory;
///
/// #[derive(Queryable, Default)]
/// #[query(default)]
/// struct Paging {
///     page: u32,
/// }
///
/// #[derive(Queryable, Default)]
/// struct Search {
///     term: String,
///     paging: Option<Paging>,
/// }
///
/// let mut search = Search::default();
/// let slot = resolve_and_materialize_path(&mut search, "paging.page", &DefaultFactory).unwrap();
///
/// assert!(search.paging.is_some());
/// assert_eq!(slot.indices(), [1, 0]);
/// assert_eq!(slot.field().name(), "page");
/// ```
pub fn resolve_and_materialize_path(
    root: &mut dyn Reflect,
    path: &str,
    factory: &dyn InstanceFactory,
) -> Result<SlotPath, QueryError> {
    let mut indices = Vec::new();
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let owner = current.reflect_type_info();
        let field = owner
            .as_struct()
            .and_then(|info| info.field(segment))
            .ok_or_else(|| QueryError::NotFound {
                owner: owner.type_path(),
                slot: segment.into(),
            })?;
        indices.push(field.index());

        if segments.peek().is_none() {
            return Ok(SlotPath {
                indices,
                owner,
                field,
            });
        }

        let slot = slot_mut(current, field)?;
        if slot.is_null() {
            if !field.is_writable() {
                return Err(QueryError::NotWritable {
                    owner: field.owner_path(),
                    slot: field.name(),
                });
            }
            let value = instantiate(factory, field.type_info())?;
            slot.set(value).map_err(|_| QueryError::Instantiation {
                type_path: field.type_path(),
            })?;
        }
        current = slot.non_null_mut().ok_or(QueryError::Instantiation {
            type_path: field.type_path(),
        })?;
    }

    // `split` yields at least one segment
    Err(QueryError::NotFound {
        owner: current.reflect_type_info().type_path(),
        slot: path.into(),
    })
}

/// The value of `field` on `owner`.
pub(crate) fn slot_mut<'r>(
    owner: &'r mut dyn Reflect,
    field: &FieldInfo,
) -> Result<&'r mut dyn Reflect, QueryError> {
    let owner_path = owner.reflect_type_info().type_path();
    owner
        .reflect_mut()
        .as_struct()
        .and_then(|object| object.field_at_mut(field.index()))
        .ok_or_else(|| QueryError::NotFound {
            owner: owner_path,
            slot: field.name().into(),
        })
}

/// Follows slot `indices` from `root`, looking through nullable wrappers.
pub(crate) fn navigate_mut<'r>(
    mut current: &'r mut dyn Reflect,
    indices: &[usize],
) -> Option<&'r mut dyn Reflect> {
    for &index in indices {
        current = current
            .reflect_mut()
            .as_struct()?
            .field_at_mut(index)?
            .non_null_mut()?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::{navigate_mut, resolve_and_materialize_path};
    use crate::derive::Queryable;
    use crate::error::QueryError;
    use crate::factory::DefaultFactory;
    use crate::info::TypeInfo;
    use crate::Reflect;
    use alloc::boxed::Box;

    #[derive(Queryable, Default, Debug, PartialEq)]
    #[query(default)]
    struct Leaf {
        value: u8,
    }

    #[derive(Queryable, Default)]
    struct Middle {
        leaf: Option<Box<Leaf>>,
        #[query(read_only)]
        locked: Option<Leaf>,
    }

    #[derive(Queryable, Default)]
    struct Root {
        middle: Middle,
    }

    #[test]
    fn materializes_every_intermediate() {
        let mut root = Root::default();
        let slot = resolve_and_materialize_path(&mut root, "middle.leaf.value", &DefaultFactory)
            .unwrap();
        assert_eq!(slot.indices(), [0, 0, 0]);
        assert_eq!(root.middle.leaf.as_deref(), Some(&Leaf::default()));

        let owner = navigate_mut(&mut root, &slot.indices()[..2]).unwrap();
        assert!(owner.is::<Leaf>());
    }

    #[test]
    fn unknown_segment() {
        let mut root = Root::default();
        let err = resolve_and_materialize_path(&mut root, "middle.nope", &DefaultFactory)
            .unwrap_err();
        assert!(matches!(err, QueryError::NotFound { ref slot, .. } if slot == "nope"));
    }

    #[test]
    fn read_only_intermediate() {
        let mut root = Root::default();
        let err = resolve_and_materialize_path(&mut root, "middle.locked.value", &DefaultFactory)
            .unwrap_err();
        assert!(matches!(err, QueryError::NotWritable { slot: "locked", .. }));
    }

    #[test]
    fn failing_factory() {
        let never = |_: &'static TypeInfo| -> Option<Box<dyn Reflect>> { None };
        let mut root = Root::default();
        let err = resolve_and_materialize_path(&mut root, "middle.leaf.value", &never).unwrap_err();
        assert!(matches!(err, QueryError::Instantiation { .. }));
    }
}
