//! Module: handler
//! Responsibility: ordered chain of operator handlers turning (operator, field, value) into
//! comparison leaves.
//! Does not own: boolean structure of the filter or key resolution.
//! Boundary: first handler returning a comparison wins; exhaustion is `NoHandler`.

mod list;
mod scalar;
mod string;


use crate::{
    compile::compile_filter,
    error::QueryError,
    expr::{Comparison, Expr, Predicate},
    member::MemberTable,
    query::{FilterNode, Operator},
    value::{FieldType, Value},
};
use std::{fmt, sync::Arc};
use tracing::trace;

pub use list::ListHandler;
pub use scalar::DefaultHandler;
pub use string::StringHandler;

///
/// OperatorHandler
///
/// One pluggable unit of operator interpretation. Returning `Ok(None)`
/// defers to the next handler; errors come from nested compilation only.
///

pub trait OperatorHandler: Send + Sync + fmt::Debug {
    /// Label used in trace output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn try_handle(
        &self,
        cx: &HandlerContext<'_>,
        operator: Operator,
        field: &Expr,
        value: &Value,
    ) -> Result<Option<Comparison>, QueryError>;
}

///
/// HandlerContext
///
/// What a handler may see while compiling one leaf: the member table the
/// leaf was resolved against and the pipeline that dispatched it.
///

pub struct HandlerContext<'a> {
    table: &'a MemberTable,
    pipeline: &'a HandlerPipeline,
}

impl<'a> HandlerContext<'a> {
    #[must_use]
    pub const fn new(table: &'a MemberTable, pipeline: &'a HandlerPipeline) -> Self {
        Self { table, pipeline }
    }

    #[must_use]
    pub const fn table(&self) -> &MemberTable {
        self.table
    }

    #[must_use]
    pub const fn pipeline(&self) -> &HandlerPipeline {
        self.pipeline
    }

    /// Compile a nested filter element-wise: against a fresh sub-context
    /// whose only key is the element parameter, with the same pipeline.
    pub fn compile_element(
        &self,
        element: &FieldType,
        node: &FilterNode,
    ) -> Result<Predicate, QueryError> {
        let table = MemberTable::subcontext(element.clone(), self.table.comparer());

        compile_filter(node, &table, self.pipeline)
    }
}

///
/// HandlerPipeline
///
/// Ordered, read-only handler list shared by every compilation.
///

#[derive(Clone, Debug)]
pub struct HandlerPipeline {
    handlers: Arc<[Arc<dyn OperatorHandler>]>,
}

impl HandlerPipeline {
    #[must_use]
    pub fn from_handlers(handlers: Vec<Arc<dyn OperatorHandler>>) -> Self {
        Self {
            handlers: handlers.into(),
        }
    }

    /// Built-in handlers in registration order: list, string, scalar.
    #[must_use]
    pub fn builtin() -> Vec<Arc<dyn OperatorHandler>> {
        vec![
            Arc::new(ListHandler),
            Arc::new(StringHandler),
            Arc::new(DefaultHandler),
        ]
    }

    /// Copy of this pipeline with `handler` consulted before all others.
    #[must_use]
    pub fn with_front(&self, handler: impl OperatorHandler + 'static) -> Self {
        let mut handlers: Vec<Arc<dyn OperatorHandler>> = vec![Arc::new(handler)];
        handlers.extend(self.handlers.iter().cloned());

        Self::from_handlers(handlers)
    }

    /// Copy of this pipeline with `handler` consulted after all others.
    #[must_use]
    pub fn with_back(&self, handler: impl OperatorHandler + 'static) -> Self {
        let mut handlers: Vec<Arc<dyn OperatorHandler>> = self.handlers.to_vec();
        handlers.push(Arc::new(handler));

        Self::from_handlers(handlers)
    }

    #[must_use]
    pub fn handlers(&self) -> &[Arc<dyn OperatorHandler>] {
        &self.handlers
    }

    /// Try each handler in order and return the first comparison.
    pub fn dispatch(
        &self,
        cx: &HandlerContext<'_>,
        key: &str,
        operator: Operator,
        field: &Expr,
        value: &Value,
    ) -> Result<Comparison, QueryError> {
        for handler in self.handlers.iter() {
            if let Some(comparison) = handler.try_handle(cx, operator, field, value)? {
                trace!(
                    handler = handler.name(),
                    %key,
                    %operator,
                    %comparison,
                    "operator handled"
                );

                return Ok(comparison);
            }
        }

        Err(QueryError::NoHandler {
            key: key.to_string(),
            operator,
            value_kind: value.kind(),
        })
    }
}

impl Default for HandlerPipeline {
    fn default() -> Self {
        Self::from_handlers(Self::builtin())
    }
}
