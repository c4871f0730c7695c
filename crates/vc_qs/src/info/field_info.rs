use core::any::TypeId;

use bitflags::bitflags;

use crate::info::{TypeInfo, Typed};
use crate::strategy::Strategy;

// -----------------------------------------------------------------------------
// SlotFlags

bitflags! {
    /// Declarative switches of a property slot.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SlotFlags: u16 {
        /// The slot carries an explicit query declaration.
        const DECLARED = 1;
        /// Never emitted when building.
        const SKIP_BUILD = 1 << 1;
        /// Never bound when parsing.
        const SKIP_PARSE = 1 << 2;
        /// Create an instance when the slot is null and must be walked.
        const INSTANTIATE = 1 << 3;
        /// The slot cannot be read.
        const WRITE_ONLY = 1 << 4;
        /// The slot cannot be written.
        const READ_ONLY = 1 << 5;

        const SKIP = Self::SKIP_BUILD.bits() | Self::SKIP_PARSE.bits();
    }
}

// -----------------------------------------------------------------------------
// SlotAttributes

/// Declarative overrides of a property slot.
///
/// # Examples
///
/// ```
/// use vc_qs::info::{SlotAttributes, SlotFlags};
/// use vc_qs::strategy::Strategy;
///
/// let attrs = SlotAttributes::new()
///     .with_rename("q")
///     .with_flags(SlotFlags::SKIP_BUILD)
///     .with_strategy(|| Strategy::BooleanAsBit);
///
/// assert_eq!(attrs.rename(), Some("q"));
/// assert!(attrs.flags().contains(SlotFlags::SKIP_BUILD));
/// assert!(matches!(attrs.strategy(), Some(Strategy::BooleanAsBit)));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SlotAttributes {
    flags: SlotFlags,
    rename: Option<&'static str>,
    strategy: Option<fn() -> Strategy>,
}

impl SlotAttributes {
    #[inline]
    pub const fn new() -> Self {
        Self {
            flags: SlotFlags::empty(),
            rename: None,
            strategy: None,
        }
    }

    /// Adds `flags` to the current ones.
    #[inline]
    pub const fn with_flags(mut self, flags: SlotFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    #[inline]
    pub const fn with_rename(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    /// Sets the explicit strategy, given as its constructor.
    #[inline]
    pub const fn with_strategy(mut self, strategy: fn() -> Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    #[inline]
    pub const fn flags(&self) -> SlotFlags {
        self.flags
    }

    #[inline]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    #[inline]
    pub const fn has_strategy(&self) -> bool {
        self.strategy.is_some()
    }

    /// Constructs the explicit strategy, if any.
    #[inline]
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy.map(|f| f())
    }

    /// Combines two declarations, `self` wins where both declare something.
    pub const fn merge(self, fallback: Self) -> Self {
        Self {
            flags: self.flags.union(fallback.flags),
            rename: match self.rename {
                Some(name) => Some(name),
                None => fallback.rename,
            },
            strategy: match self.strategy {
                Some(strategy) => Some(strategy),
                None => fallback.strategy,
            },
        }
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A property slot of a struct.
///
/// The owner and index are assigned by [`StructInfo::new`](crate::info::StructInfo::new).
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    index: usize,
    owner: TypeId,
    owner_path: &'static str,
    ty_id: TypeId,
    type_path: &'static str,
    type_info: fn() -> &'static TypeInfo,
    attrs: SlotAttributes,
}

impl FieldInfo {
    /// Creates a readable and writable slot of type `T`.
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            index: 0,
            owner: TypeId::of::<()>(),
            owner_path: "",
            ty_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            type_info: T::type_info,
            attrs: SlotAttributes::new(),
        }
    }

    #[inline]
    pub fn with_attributes(mut self, attrs: SlotAttributes) -> Self {
        self.attrs = attrs;
        self
    }

    #[inline]
    pub fn with_flags(mut self, flags: SlotFlags) -> Self {
        self.attrs = self.attrs.with_flags(flags);
        self
    }

    #[inline]
    pub(crate) fn bind_owner(
        mut self,
        index: usize,
        owner: TypeId,
        owner_path: &'static str,
    ) -> Self {
        self.index = index;
        self.owner = owner;
        self.owner_path = owner_path;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The type declaring this slot.
    #[inline]
    pub const fn owner(&self) -> TypeId {
        self.owner
    }

    #[inline]
    pub const fn owner_path(&self) -> &'static str {
        self.owner_path
    }

    /// [`TypeId`] of the declared type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Descriptor of the declared type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn attributes(&self) -> &SlotAttributes {
        &self.attrs
    }

    #[inline]
    pub const fn is_readable(&self) -> bool {
        !self.attrs.flags().contains(SlotFlags::WRITE_ONLY)
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        !self.attrs.flags().contains(SlotFlags::READ_ONLY)
    }

    #[inline]
    pub const fn is_declared(&self) -> bool {
        self.attrs.flags().contains(SlotFlags::DECLARED)
    }
}
