//! Depth-first traversal of object graphs.
//!
//! Building walks the slots of an instance and collects one flat set of
//! [`Parameter`]s, descending into grouped slots. Parsing walks the same
//! slots, records a [`PropertyBinding`] for every slot whose name is in the
//! query text, then converts and writes all bound values in a separate pass.
//!
//! Parameter names share one namespace across the whole graph.
//!
//! A [`DynamicStruct`](crate::ops::DynamicStruct) is walked through its
//! entries, each one an undecorated slot.

// -----------------------------------------------------------------------------
// Modules

mod build;
mod parameter;
mod parse;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use build::BuildContext;
pub use parameter::{BoundSlot, Parameter, PropertyBinding};
pub use parse::ParseContext;

pub(crate) use build::{build_value, materialize};
pub(crate) use parse::{parse_value, resolve_bindings};

use core::any::Any;

use crate::error::QueryError;

// -----------------------------------------------------------------------------
// Hooks

/// Adjusts the parameters of a build after the slots of `self` are walked.
///
/// Enabled with `#[query(extend_build)]`.
///
/// # Examples
///
/// ```
/// use vc_qs::prelude::*;
///
/// #[derive(Queryable)]
/// #[query(extend_build)]
/// struct Search {
///     term: String,
///     #[query(skip)]
///     debug: bool,
/// }
///
/// impl ExtendedBuild for Search {
///     fn extend_build<'a>(&'a self, ctx: &mut BuildContext<'a>) -> Result<(), QueryError> {
///         if self.debug {
///             ctx.add_value("trace", 1_u8)?;
///         }
///         Ok(())
///     }
/// }
///
/// let search = Search { term: "rust".into(), debug: true };
/// assert_eq!(to_query(&search).unwrap().query_string(), "term=rust&trace=1");
/// ```
pub trait ExtendedBuild: Any {
    fn extend_build<'a>(&'a self, ctx: &mut BuildContext<'a>) -> Result<(), QueryError>;
}

/// Adjusts the bindings of a parse after the slots of `self` are walked.
///
/// Enabled with `#[query(extend_parse)]`. Values are written after every
/// hook ran, so `self` still holds its previous values here.
///
/// # Examples
///
/// ```
/// use vc_qs::prelude::*;
///
/// #[derive(Queryable, Default)]
/// #[query(default, extend_parse)]
/// struct Search {
///     #[query(skip)]
///     term: String,
/// }
///
/// impl ExtendedParse for Search {
///     fn extend_parse(&mut self, ctx: &mut ParseContext<'_>) -> Result<(), QueryError> {
///         // accept the short form as well
///         if !ctx.exists("term") {
///             ctx.bind("term", "q")?;
///         }
///         Ok(())
///     }
/// }
///
/// let search: Search = from_query("q=rust").unwrap();
/// assert_eq!(search.term, "rust");
/// ```
pub trait ExtendedParse: Any {
    fn extend_parse(&mut self, ctx: &mut ParseContext<'_>) -> Result<(), QueryError>;
}
