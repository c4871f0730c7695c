//! Descriptors for std types plus the wrapper and leaf types the
//! conversion strategies understand.
//!
//! ## Menu
//!
//! - [`NonGenericTypeInfoCell`] / [`GenericTypeInfoCell`]: static storage
//!   used to implement [`Typed`](crate::info::Typed).
//! - Primitives: `bool`, integers, floats, `char`, `String`.
//! - `Option<T>`, `Box<T>`, `Vec<T>`, `VecDeque<T>`, `SystemTime`.
//! - [`Lazy<T>`]: a value computed on first access.
//! - [`Language`]: an ISO 639-1 language.

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod cell;
mod language;
mod lazy;
mod option;
mod primitives;
mod sequences;
mod time;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use language::{Language, UnknownLanguage};
pub use lazy::Lazy;
