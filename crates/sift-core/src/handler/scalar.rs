use crate::{
    error::QueryError,
    expr::{CompareOp, Comparison, Expr},
    handler::{HandlerContext, OperatorHandler},
    query::Operator,
    value::Value,
};

///
/// DefaultHandler
///
/// Direct comparisons for numeric, boolean and temporal scalars. Only
/// well-typed pairs are accepted; `Null` is accepted for `EQ`/`NE` only.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHandler;

impl OperatorHandler for DefaultHandler {
    fn name(&self) -> &'static str {
        "default"
    }

    fn try_handle(
        &self,
        _cx: &HandlerContext<'_>,
        operator: Operator,
        field: &Expr,
        value: &Value,
    ) -> Result<Option<Comparison>, QueryError> {
        let op = match operator {
            Operator::Eq => CompareOp::Eq,
            Operator::Ne => CompareOp::Ne,
            Operator::Gt => CompareOp::Gt,
            Operator::Gte => CompareOp::Gte,
            Operator::Lt => CompareOp::Lt,
            Operator::Lte => CompareOp::Lte,
            Operator::Like | Operator::Contains | Operator::All | Operator::Any => return Ok(None),
        };

        if value.is_null() {
            if !matches!(op, CompareOp::Eq | CompareOp::Ne) {
                return Ok(None);
            }
        } else if field.element_type().is_some() || !field.ty().accepts(value) {
            return Ok(None);
        }

        Ok(Some(Comparison::Binary {
            op,
            field: field.clone(),
            value: value.clone(),
        }))
    }
}
