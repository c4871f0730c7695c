//! Once-built descriptors of the types taking part in query mapping.
//!
//! ## Menu
//!
//! - [`TypeInfo`]: identity, [`TypeKind`], optional [`Generics`] and the
//!   textual capabilities (default, `Display`, `FromStr`) of one type.
//!
//! - [`TypeKind`]: one of
//!     - `Primitive`: `bool`, integers, floats, `char`, `String`.
//!     - `Opaque`: leaf values without slots, e.g. `SystemTime`.
//!     - `Struct`: see [`StructInfo`].
//!     - `Dynamic`: a property bag, see [`DynamicStruct`](crate::ops::DynamicStruct).
//!     - `Enum`: see [`EnumInfo`].
//!     - `Sequence`: see [`SequenceInfo`].
//!     - `Optional`: the nullable wrapper, see [`OptionalInfo`].
//!     - `Lazy`: the deferred wrapper, see [`LazyInfo`].
//!
//! - [`FieldInfo`]: a property slot and its declarative overrides ([`SlotAttributes`]).
//!
//! - [`GenericDefinition`]: identity of a generic type regardless of its arguments.
//!
//! - [`Typed`]: static access to a type's [`TypeInfo`],
//!   [`DynamicTyped`] provides it through dynamic dispatch.
//!
//! Descriptors are usually generated by [`#[derive(Queryable)]`](crate::derive::Queryable),
//! but every builder is public so they can be written by hand.

// -----------------------------------------------------------------------------
// Modules

mod enum_info;
mod field_info;
mod generics;
mod struct_info;
mod type_info;
mod typed;
mod wrapper_info;

// -----------------------------------------------------------------------------
// Exports

pub use enum_info::{EnumInfo, VariantInfo};
pub use field_info::{FieldInfo, SlotAttributes, SlotFlags};
pub use generics::{GenericDefinition, Generics};
pub use struct_info::{BuildHookFn, ParseHookFn, StructInfo};
pub use type_info::{TypeInfo, TypeKind};
pub use typed::{DynamicTyped, Typed};
pub use wrapper_info::{CollectFn, LazyInfo, OptionalInfo, SequenceInfo, WrapFn};
