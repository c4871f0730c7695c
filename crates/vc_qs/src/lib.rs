#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Logging switches used for compilation control.
pub(crate) mod cfg {
    /// Expands the tokens only when slot tracing is enabled.
    macro_rules! trace_slots {
        ($($tt:tt)*) => {
            #[cfg(all(debug_assertions, feature = "debug"))]
            { $($tt)* }
        };
    }

    pub(crate) use trace_slots;
}

// -----------------------------------------------------------------------------
// Extern Self

// Generated code always names `::vc_qs`, so the crate needs to be reachable
// under that name from its own unit tests and doc tests.
extern crate self as vc_qs;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod error;
pub mod factory;
pub mod impls;
pub mod info;
pub mod mapper;
pub mod metadata;
pub mod ops;
pub mod query;
pub mod registry;
pub mod resolver;
pub mod strategy;
pub mod utils;
pub mod walker;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use error::QueryError;
pub use mapper::{QueryMapper, from_query, to_query};
pub use reflection::Reflect;
pub use vc_qs_derive as derive;

/// The most used items, for glob import.
pub mod prelude {
    pub use crate::derive::Queryable;
    pub use crate::error::QueryError;
    pub use crate::impls::{Language, Lazy};
    pub use crate::info::{TypeInfo, Typed};
    pub use crate::mapper::{QueryMapper, from_query, to_query};
    pub use crate::ops::DynamicStruct;
    pub use crate::query::{QueryConfig, QueryResult};
    pub use crate::registry::{SharedRegistry, StrategyRegistry};
    pub use crate::strategy::Strategy;
    pub use crate::walker::{BuildContext, ExtendedBuild, ExtendedParse, ParseContext};
    pub use crate::Reflect;
}
