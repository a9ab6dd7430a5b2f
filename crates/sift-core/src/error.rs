
use crate::{query::Operator, value::ValueKind};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Compile-time failures. Every variant is raised before any data-source
/// call, so a failing query never executes partially.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("unsupported projection shape: {reason}")]
    UnsupportedShape { reason: String },

    #[error("unknown key '{key}'")]
    UnknownKey { key: String },

    #[error("no operator handler accepts {operator} with a {value_kind} value on '{key}'")]
    NoHandler {
        key: String,
        operator: Operator,
        value_kind: ValueKind,
    },

    #[error("order step requested but the query has no order")]
    MissingOrder,

    #[error("'{group}' filter group has no children")]
    EmptyGroup { group: GroupKind },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl QueryError {
    pub(crate) fn unsupported_shape(reason: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnsupportedShape { .. } | Self::NoHandler { .. } => ErrorClass::Unsupported,
            Self::UnknownKey { .. } => ErrorClass::NotFound,
            Self::EmptyGroup { .. } | Self::Decode(_) => ErrorClass::Invalid,
            Self::MissingOrder => ErrorClass::Misuse,
        }
    }
}

///
/// GroupKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum GroupKind {
    #[display("and")]
    And,
    #[display("or")]
    Or,
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    /// The request names something the compiler cannot express.
    Unsupported,

    /// A referenced field does not exist.
    NotFound,

    /// The request is malformed.
    Invalid,

    /// The API was driven in an order it does not allow.
    Misuse,
}

///
/// DecodeError
///
/// The wire document violates the discriminator, enum, or page contract.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}
