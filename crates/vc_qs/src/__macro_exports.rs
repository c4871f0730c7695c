//! Items named by the code `#[derive(Queryable)]` generates.
//!
//! Not part of the public API.
#![doc(hidden)]

pub mod macro_utils {
    pub use alloc::boxed::Box;
}
