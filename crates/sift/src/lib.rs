//! ## Crate layout
//! - `core`: value model, wire query types, projections, handler pipeline,
//!   read plans and compiled queries.
//! - `error`: the public error type.
//!
//! A [`Sift`] context is built once per input/output shape pair and compiles
//! any number of wire queries into reusable [`CompiledQuery`] values.
//!
//! [`CompiledQuery`]: sift_core::compiled::CompiledQuery

pub use sift_core as core;

mod context;
pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// re-exports
pub use context::Sift;
pub use error::Error;
pub use sift_core::projection;

///
/// Prelude
/// Everything needed to declare a projection, compile a query and run it.
///

pub mod prelude {
    pub use crate::{Error, Sift, projection};
    pub use sift_core::{
        compiled::{CompiledQuery, ResultEnvelope},
        config::QueryConfig,
        handler::{HandlerContext, HandlerPipeline, OperatorHandler},
        member::KeyComparer,
        projection::{MappingProvider, Projection},
        query::{Direction, FilterNode, Operation, Operator, OrderSpec, PageSpec, SearchQuery},
        source::{DataSource, MemorySource, ReadPlan},
        value::{FieldKind, FieldType, Value},
    };
}
