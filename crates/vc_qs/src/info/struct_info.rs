use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::Reflect;
use crate::error::QueryError;
use crate::info::{FieldInfo, TypeInfo, Typed};
use crate::walker::{BuildContext, ExtendedBuild, ExtendedParse, ParseContext};

/// Type-erased [`ExtendedBuild`] call.
pub type BuildHookFn =
    for<'a> fn(&'a dyn Reflect, &mut BuildContext<'a>) -> Result<(), QueryError>;

/// Type-erased [`ExtendedParse`] call.
pub type ParseHookFn =
    for<'a> fn(&mut dyn Reflect, &mut ParseContext<'a>) -> Result<(), QueryError>;

fn build_hook<'a, T: ExtendedBuild>(
    value: &'a dyn Reflect,
    ctx: &mut BuildContext<'a>,
) -> Result<(), QueryError> {
    match value.downcast_ref::<T>() {
        Some(value) => value.extend_build(ctx),
        None => Ok(()),
    }
}

fn parse_hook<T: ExtendedParse>(
    value: &mut dyn Reflect,
    ctx: &mut ParseContext<'_>,
) -> Result<(), QueryError> {
    match value.downcast_mut::<T>() {
        Some(value) => value.extend_parse(ctx),
        None => Ok(()),
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Descriptor of a struct: its ordered slots plus the type level policies.
///
/// # Examples
///
/// ```
/// use vc_qs::info::{FieldInfo, SlotFlags, StructInfo};
///
/// struct Person;
///
/// let info = StructInfo::new::<Person>(&[
///     FieldInfo::new::<String>("name").with_flags(SlotFlags::DECLARED),
///     FieldInfo::new::<u8>("age"),
/// ])
/// .with_explicit_only(true);
///
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.field("age").unwrap().index(), 1);
/// // only declared slots take part
/// assert_eq!(info.slots().count(), 1);
/// ```
#[derive(Debug)]
pub struct StructInfo {
    fields: Box<[FieldInfo]>,
    explicit_only: bool,
    companion: Option<fn() -> &'static TypeInfo>,
    build_hook: Option<BuildHookFn>,
    parse_hook: Option<ParseHookFn>,
}

impl StructInfo {
    /// Creates the descriptor of `T`, assigning owner and index to every slot.
    pub fn new<T: Any>(fields: &[FieldInfo]) -> Self {
        let owner = TypeId::of::<T>();
        let owner_path = core::any::type_name::<T>();
        Self {
            fields: fields
                .iter()
                .enumerate()
                .map(|(index, field)| field.clone().bind_owner(index, owner, owner_path))
                .collect(),
            explicit_only: false,
            companion: None,
            build_hook: None,
            parse_hook: None,
        }
    }

    /// Restricts the walk to slots with an explicit declaration.
    #[inline]
    pub fn with_explicit_only(mut self, explicit_only: bool) -> Self {
        self.explicit_only = explicit_only;
        self
    }

    /// Redirects slot metadata lookup to `C`.
    #[inline]
    pub fn with_companion<C: Typed>(mut self) -> Self {
        self.companion = Some(C::type_info);
        self
    }

    #[inline]
    pub fn with_extended_build<T: ExtendedBuild>(mut self) -> Self {
        self.build_hook = Some(build_hook::<T>);
        self
    }

    #[inline]
    pub fn with_extended_parse<T: ExtendedParse>(mut self) -> Self {
        self.parse_hook = Some(parse_hook::<T>);
        self
    }

    /// All slots in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub const fn explicit_only(&self) -> bool {
        self.explicit_only
    }

    /// The slots taking part in build and parse.
    ///
    /// Under `explicit_only` these are the slots declared on this type,
    /// companion declarations are not consulted.
    pub fn slots(&self) -> impl Iterator<Item = &FieldInfo> {
        let explicit_only = self.explicit_only;
        self.fields
            .iter()
            .filter(move |field| !explicit_only || field.is_declared())
    }

    #[inline]
    pub fn companion(&self) -> Option<&'static TypeInfo> {
        self.companion.map(|f| f())
    }

    #[inline]
    pub const fn build_hook(&self) -> Option<BuildHookFn> {
        self.build_hook
    }

    #[inline]
    pub const fn parse_hook(&self) -> Option<ParseHookFn> {
        self.parse_hook
    }
}
