//! Parsed form of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod query_derive;
mod query_enum;
mod query_meta;
mod query_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes, VariantAttributes};

pub(crate) use query_derive::QueryDerive;
pub(crate) use query_enum::{EnumVariant, QueryEnum};
pub(crate) use query_meta::QueryMeta;
pub(crate) use query_struct::{QueryStruct, StructField};
