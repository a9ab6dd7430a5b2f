//! Module: source
//! Responsibility: composable, lazily evaluated read plans and the data-source contract that
//! executes them.
//! Does not own: compilation; plans carry already-compiled IR.
//! Boundary: `fetch` and `count` are the only two store calls a search issues.

mod memory;
mod plan;


use std::future::Future;

pub use memory::MemorySource;
pub use plan::{OrderedPlan, QueryOp, ReadPlan, RowFilter, RowOrder};

///
/// DataSource
///
/// Queryable collaborator. Both operations are independent reads over the
/// same plan shape and may run concurrently; the source owns whatever
/// consistency discipline it needs. Errors are returned to the caller
/// unchanged.
///

pub trait DataSource<R>: Send + Sync {
    type Error: Send;

    /// Execute `plan` and project every resulting record.
    fn fetch<O, P>(
        &self,
        plan: &ReadPlan<R>,
        project: P,
    ) -> impl Future<Output = Result<Vec<O>, Self::Error>> + Send
    where
        O: Send,
        P: Fn(&R) -> O + Send + Sync;

    /// Count the records `plan` yields.
    fn count(&self, plan: &ReadPlan<R>) -> impl Future<Output = Result<u64, Self::Error>> + Send;
}
