//! Query text: configuration, tokenizing and assembling.
//!
//! ## Menu
//!
//! - [`QueryConfig`]: separators, patterns and limits as plain data.
//! - [`QuerySyntax`]: the compiled form of a [`QueryConfig`].
//! - [`QueryDictionary`]: raw text split into one entry per distinct name.
//! - [`QueryResult`]: processed pairs joined into raw and encoded text.

// -----------------------------------------------------------------------------
// Modules

mod config;
mod dictionary;
mod result;

// -----------------------------------------------------------------------------
// Exports

pub use config::{QueryConfig, QuerySyntax};
pub use dictionary::QueryDictionary;
pub use result::QueryResult;
