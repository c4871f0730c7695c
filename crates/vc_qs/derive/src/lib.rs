//! See [`Queryable`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static QUERY_ATTRIBUTE_NAME: &str = "query";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod manifest;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Query Mapping Derivation
///
/// `#[derive(Queryable)]` implements `Typed`, `Reflect` and, depending on
/// the item, `Struct` (structs with named fields) or `Enum` (fieldless
/// enums).
///
/// Every named field becomes a slot. A field whose type is a struct is a
/// group: its slots are walked instead of the field being converted.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Queryable, Default)]
/// #[query(default, explicit_only, metadata = SearchMeta, extend_build)]
/// struct Search { /* ... */ }
/// ```
///
/// - `default`: expose `Default` to instance factories. Required for groups
///   created during a parse and for roots created by `from_query`.
/// - `display` / `from_str`: expose `Display` / `FromStr`, so the default
///   strategy can convert the type as a leaf.
/// - `explicit_only`: only fields carrying a `#[query]` attribute take part.
/// - `metadata = Type`: take slot declarations from a companion type with
///   fields of the same names and types. Declarations on the type itself win.
/// - `extend_build` / `extend_parse`: call the `ExtendedBuild` /
///   `ExtendedParse` impl of the type after its slots are walked.
/// - `value_names` (enums): variants are written by the names given with
///   `#[query(name = "...")]`, every variant needs one.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[query(rename = "q")]
/// term: String,
/// #[query(strategy = Strategy::BooleanAsBit)]
/// strict: bool,
/// #[query(skip_build, instantiate)]
/// cursor: Option<Cursor>,
/// ```
///
/// - `rename = "..."`: the parameter name, the field name otherwise.
/// - `strategy = expr`: the conversion strategy, evaluated on each use.
///   A field with a strategy is never a group.
/// - `skip`, `skip_build`, `skip_parse`: leave the slot out of both, of
///   building or of parsing.
/// - `instantiate`: create an instance when the slot is null and must be
///   walked.
/// - `read_only` / `write_only`: the slot is never written / read.
///
/// Any `#[query]` attribute, even an empty one, marks the field as
/// declared for `explicit_only`.
///
/// ## Variant Attributes
///
/// - `name = "..."`: the value name used by the named enum strategy.
///
/// Discriminants are stored as `i64`. A discriminant outside its range,
/// possible with `#[repr(u64)]` or wider, fails to compile.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Queryable, Default)]
/// #[query(default)]
/// struct Filter {
///     #[query(rename = "Name")]
///     name: String,
///     #[query(rename = "Tags")]
///     tags: Vec<String>,
/// }
/// ```
#[proc_macro_derive(Queryable, attributes(query))]
pub fn derive_queryable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_query_impls(ast)
}
