use derive_more::Display;
use serde::{Deserialize, Serialize};
use sift_core::{
    config::ConfigError,
    error::{DecodeError, QueryError},
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::UnsupportedShape { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::Unsupported),
                ErrorOrigin::Projection,
                err.to_string(),
            ),

            QueryError::UnknownKey { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::UnknownKey),
                ErrorOrigin::Compile,
                err.to_string(),
            ),

            QueryError::NoHandler { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::NoHandler),
                ErrorOrigin::Compile,
                err.to_string(),
            ),

            QueryError::MissingOrder => Self::new(
                ErrorKind::Query(QueryErrorKind::MissingOrder),
                ErrorOrigin::Compile,
                err.to_string(),
            ),

            QueryError::EmptyGroup { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::Invalid),
                ErrorOrigin::Compile,
                err.to_string(),
            ),

            QueryError::Decode(err) => err.into(),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::new(ErrorKind::Decode, ErrorOrigin::Wire, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Query(QueryErrorKind),

    /// The wire document could not be decoded.
    Decode,

    /// Settings are malformed.
    Config,
}

///
/// QueryErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// Query shape is invalid (empty groups).
    Invalid,

    /// The projection or operator combination cannot be expressed.
    Unsupported,

    /// A filter or order key names no projected field.
    UnknownKey,

    /// No operator handler accepted an operator and value pairing.
    NoHandler,

    /// A strict order step ran without an order.
    MissingOrder,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Compile,
    Config,
    Projection,
    Wire,
}
