//! Core compiler for Sift: the value model, the wire query description,
//! projections and member tables, the operator handler pipeline, and the
//! compiled query that drives a data source.

// public exports are one module level down
pub mod compile;
pub mod compiled;
pub mod config;
pub mod error;
pub mod expr;
pub mod handler;
pub mod member;
pub mod projection;
pub mod query;
pub mod source;
pub mod value;

mod macros;

#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Page size used when a decoded page omits `size`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Synthetic member name bound to the current element inside quantifier bodies.
pub const ELEMENT_KEY: &str = "value";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, sources, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        query::{Direction, FilterNode, Operation, Operator, OrderSpec, PageSpec, SearchQuery},
        value::{FieldKind, FieldType, Value},
    };
}
