//! Per-slot policy derived from a slot's declaration.

use crate::error::QueryError;
use crate::info::{FieldInfo, SlotAttributes, SlotFlags, StructInfo, TypeInfo};
use crate::resolver::StrategyResolver;
use crate::strategy::Strategy;

/// The effective policy of one property slot.
///
/// # Examples
///
/// ```
/// use vc_qs::derive::Queryable;
/// use vc_qs::info::Typed;
/// use vc_qs::metadata::SlotMetadata;
///
/// #[derive(Queryable, Default)]
/// struct Paging {
///     #[query(rename = "p")]
///     page: u32,
/// }
///
/// #[derive(Queryable, Default)]
/// struct Search {
///     #[query(skip_parse)]
///     term: String,
///     paging: Paging,
/// }
///
/// let info = Search::type_info().as_struct().unwrap();
/// let term = SlotMetadata::resolve(info, &info.fields()[0]).unwrap();
/// assert!(!term.is_grouped() && term.skip_parse() && !term.skip_build());
///
/// let paging = SlotMetadata::resolve(info, &info.fields()[1]).unwrap();
/// assert!(paging.is_grouped());
///
/// let page = Paging::type_info().as_struct().unwrap();
/// assert_eq!(SlotMetadata::resolve(page, &page.fields()[0]).unwrap().name(), "p");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SlotMetadata<'a> {
    field: &'a FieldInfo,
    attrs: SlotAttributes,
}

impl<'a> SlotMetadata<'a> {
    /// Derives the policy of `field`, a slot of `owner`.
    ///
    /// # Errors
    ///
    /// [`QueryError::MissingMember`] if `owner` redirects its metadata to a
    /// companion type lacking a slot of the same name and type.
    pub fn resolve(owner: &StructInfo, field: &'a FieldInfo) -> Result<Self, QueryError> {
        let attrs = match owner.companion() {
            None => *field.attributes(),
            Some(companion) => {
                let twin = companion_slot(companion, field)?;
                field.attributes().merge(*twin.attributes())
            }
        };
        Ok(Self { field, attrs })
    }

    #[inline]
    pub const fn field(&self) -> &'a FieldInfo {
        self.field
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.field.type_info()
    }

    /// The parameter name: the rename, else the slot name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self.attrs.rename() {
            Some(name) => name,
            None => self.field.name(),
        }
    }

    /// The slot is declared on itself or on the companion.
    ///
    /// The "explicitly declared only" filter of [`StructInfo::slots`] reads
    /// the slot's own declaration only, a companion declaration does not
    /// make a slot take part.
    ///
    /// [`StructInfo::slots`]: crate::info::StructInfo::slots
    #[inline]
    pub fn is_declared(&self) -> bool {
        self.attrs.flags().contains(SlotFlags::DECLARED)
    }

    /// The value is walked rather than converted.
    ///
    /// True for struct and property bag types, nullable or not, without a
    /// strategy override.
    pub fn is_grouped(&self) -> bool {
        !self.attrs.has_strategy() && self.type_info().unwrap_optional().is_walkable()
    }

    #[inline]
    pub fn skip_build(&self) -> bool {
        self.attrs.flags().contains(SlotFlags::SKIP_BUILD) || !self.field.is_readable()
    }

    #[inline]
    pub fn skip_parse(&self) -> bool {
        self.attrs.flags().contains(SlotFlags::SKIP_PARSE) || !self.field.is_writable()
    }

    /// Create an instance when the slot is null and must be walked.
    #[inline]
    pub fn instantiate_on_null(&self) -> bool {
        self.attrs.flags().contains(SlotFlags::INSTANTIATE)
    }

    #[inline]
    pub fn explicit_strategy(&self) -> Option<Strategy> {
        self.attrs.strategy()
    }

    /// The explicit strategy, else the one `resolver` picks for the slot type.
    pub fn strategy(&self, resolver: &StrategyResolver) -> Result<Strategy, QueryError> {
        match self.explicit_strategy() {
            Some(strategy) => Ok(strategy),
            None => resolver.resolve(self.type_info()),
        }
    }
}

fn companion_slot(
    companion: &'static TypeInfo,
    field: &FieldInfo,
) -> Result<&'static FieldInfo, QueryError> {
    companion
        .as_struct()
        .and_then(|info| info.field(field.name()))
        .filter(|twin| twin.ty_id() == field.ty_id())
        .ok_or(QueryError::MissingMember {
            owner: field.owner_path(),
            companion: companion.type_path(),
            slot: field.name(),
        })
}

#[cfg(test)]
mod tests {
    use super::SlotMetadata;
    use crate::derive::Queryable;
    use crate::error::QueryError;
    use crate::impls::Lazy;
    use crate::info::{StructInfo, Typed};
    use crate::registry::SharedRegistry;
    use crate::resolver::StrategyResolver;
    use crate::strategy::Strategy;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[derive(Queryable, Default)]
    struct Inner {
        value: u8,
    }

    #[derive(Queryable, Default)]
    struct Shapes {
        text: String,
        list: Vec<Inner>,
        lazy: Lazy<u8>,
        group: Inner,
        maybe_group: Option<Inner>,
        #[query(strategy = Strategy::NullMarker)]
        overridden: Inner,
        #[query(read_only)]
        fixed: u8,
        #[query(write_only)]
        secret: u8,
    }

    #[derive(Queryable, Default)]
    struct ShapesMeta {
        #[query(rename = "t", skip_build)]
        text: String,
    }

    #[derive(Queryable, Default)]
    #[query(metadata = ShapesMeta)]
    struct Redirected {
        #[query(rename = "own")]
        text: String,
    }

    #[derive(Queryable, Default)]
    #[query(metadata = ShapesMeta)]
    struct Mismatched {
        text: u8,
    }

    #[derive(Queryable, Default)]
    #[query(explicit_only, metadata = ShapesMeta)]
    struct DeclaredElsewhere {
        text: String,
    }

    fn info<T: Typed>() -> &'static StructInfo {
        T::type_info().as_struct().unwrap()
    }

    fn slot(owner: &'static StructInfo, name: &str) -> SlotMetadata<'static> {
        SlotMetadata::resolve(owner, owner.field(name).unwrap()).unwrap()
    }

    #[test]
    fn grouping_follows_the_slot_type() {
        let owner = info::<Shapes>();
        let grouped = |name| slot(owner, name).is_grouped();
        assert!(!grouped("text"));
        assert!(!grouped("list"));
        assert!(!grouped("lazy"));
        assert!(grouped("group"));
        assert!(grouped("maybe_group"));
        assert!(!grouped("overridden"));
    }

    #[test]
    fn capabilities_imply_skipping() {
        let owner = info::<Shapes>();
        assert!(slot(owner, "fixed").skip_parse());
        assert!(!slot(owner, "fixed").skip_build());
        assert!(slot(owner, "secret").skip_build());
        assert!(!slot(owner, "secret").skip_parse());
    }

    #[test]
    fn explicit_strategy_wins() {
        let resolver = StrategyResolver::new(SharedRegistry::default());
        let owner = info::<Shapes>();
        assert_eq!(slot(owner, "overridden").strategy(&resolver).unwrap(), Strategy::NullMarker);
        assert_eq!(slot(owner, "text").strategy(&resolver).unwrap(), Strategy::Default);
    }

    #[test]
    fn companion_fills_in_missing_declarations() {
        let text = slot(info::<Redirected>(), "text");
        // own declaration first
        assert_eq!(text.name(), "own");
        assert!(text.skip_build());
    }

    #[test]
    fn companion_must_mirror_the_slot() {
        let owner = info::<Mismatched>();
        let err = SlotMetadata::resolve(owner, &owner.fields()[0]).unwrap_err();
        assert!(matches!(err, QueryError::MissingMember { slot: "text", .. }));
    }

    #[test]
    fn explicit_only_ignores_companion_declarations() {
        let owner = info::<DeclaredElsewhere>();
        assert_eq!(owner.slots().count(), 0);
        // the merged view still reports the companion's declaration
        assert!(slot(owner, "text").is_declared());
    }
}
