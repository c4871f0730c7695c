//! The error type shared by every build and parse operation.
//!
//! Any error aborts the whole operation. Writes that already happened on
//! nested instances are not rolled back.

use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// QueryError

/// Failure of a build, parse, resolution or registration step.
///
/// Every variant carries the type, slot, strategy or parameter name that
/// caused it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryError {
    /// A generic type does not have exactly one type argument.
    #[error("`{type_path}` has {arity} generic arguments, exactly one is supported")]
    Shape {
        type_path: &'static str,
        arity: usize,
    },

    /// A strategy was bound to a type it cannot convert.
    #[error("strategy `{strategy}` cannot handle `{type_path}`")]
    CapabilityMismatch {
        strategy: String,
        type_path: &'static str,
    },

    /// A parameter or binding lacks a required part.
    #[error("parameter `{name}` has no {missing}")]
    MissingDeclaration {
        name: String,
        missing: &'static str,
    },

    /// The instance factory could not produce a required instance.
    #[error("cannot create an instance of `{type_path}`")]
    Instantiation { type_path: &'static str },

    /// A slot was about to be written but does not accept writes.
    #[error("slot `{owner}::{slot}` is not writable")]
    NotWritable {
        owner: &'static str,
        slot: &'static str,
    },

    /// A slot is not declared on the type it was looked up on.
    #[error("slot `{slot}` is not declared on `{owner}`")]
    NotFound { owner: &'static str, slot: String },

    /// An enum that opts into value names has a variant without one.
    #[error("variant `{variant}` of `{enum_path}` has no value name")]
    EnumNaming {
        enum_path: &'static str,
        variant: &'static str,
    },

    /// A companion metadata type lacks a slot of the same name and type.
    #[error("companion `{companion}` has no slot `{slot}` matching `{owner}`")]
    MissingMember {
        owner: &'static str,
        companion: &'static str,
        slot: &'static str,
    },

    /// A value could not be converted to or from its textual form.
    #[error("cannot convert `{type_path}`: {message}")]
    Conversion {
        type_path: &'static str,
        message: String,
    },

    /// The object graph is nested deeper than the configured limit.
    #[error("object graph exceeds the depth limit of {limit} at `{type_path}`")]
    DepthExceeded {
        limit: usize,
        type_path: &'static str,
    },

    /// A configured regular expression does not compile.
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// An extended build or parse hook failed.
    #[error("hook of `{type_path}` failed: {message}")]
    Hook {
        type_path: &'static str,
        message: String,
    },
}

impl QueryError {
    /// Shorthand for a [`QueryError::Conversion`].
    #[inline]
    pub fn conversion(type_path: &'static str, message: impl Into<String>) -> Self {
        Self::Conversion {
            type_path,
            message: message.into(),
        }
    }

    /// Shorthand for a [`QueryError::Hook`], for use in extension hooks.
    #[inline]
    pub fn hook(type_path: &'static str, message: impl Into<String>) -> Self {
        Self::Hook {
            type_path,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueryError;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_offender() {
        let err = QueryError::NotWritable {
            owner: "Person",
            slot: "age",
        };
        assert_eq!(err.to_string(), "slot `Person::age` is not writable");

        let err = QueryError::Shape {
            type_path: "HashMap<u8, u8>",
            arity: 2,
        };
        assert!(err.to_string().contains("2 generic arguments"));
    }
}
