use crate::{
    error::{GroupKind, QueryError},
    expr::Predicate,
    handler::{HandlerContext, HandlerPipeline},
    member::MemberTable,
    query::FilterNode,
};

/// Compile a filter tree into a predicate.
///
/// `And`/`Or` groups must have at least one child (`EmptyGroup`); every
/// `Where` key must resolve in `table` (`UnknownKey`) and be accepted by
/// some handler (`NoHandler`).
pub fn compile_filter(
    node: &FilterNode,
    table: &MemberTable,
    pipeline: &HandlerPipeline,
) -> Result<Predicate, QueryError> {
    match node {
        FilterNode::And(children) => {
            compile_group(GroupKind::And, children, table, pipeline).map(Predicate::And)
        }
        FilterNode::Or(children) => {
            compile_group(GroupKind::Or, children, table, pipeline).map(Predicate::Or)
        }
        FilterNode::Not(child) => {
            let child = compile_filter(child, table, pipeline)?;

            Ok(Predicate::Not(Box::new(child)))
        }
        FilterNode::Where(operation) => {
            let field = table.resolve(&operation.key)?;
            let cx = HandlerContext::new(table, pipeline);

            pipeline
                .dispatch(
                    &cx,
                    &operation.key,
                    operation.operator,
                    field,
                    &operation.value,
                )
                .map(Predicate::Compare)
        }
    }
}

fn compile_group(
    group: GroupKind,
    children: &[FilterNode],
    table: &MemberTable,
    pipeline: &HandlerPipeline,
) -> Result<Vec<Predicate>, QueryError> {
    if children.is_empty() {
        return Err(QueryError::EmptyGroup { group });
    }

    children
        .iter()
        .map(|child| compile_filter(child, table, pipeline))
        .collect()
}
