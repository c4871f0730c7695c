#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_qs as qs;

pub use vc_qs::derive::Queryable;
pub use vc_qs::{QueryError, QueryMapper, Reflect, from_query, to_query};

pub use vc_qs::prelude;
