use crate::{
    error::QueryError,
    expr::{CompareOp, Comparison, Expr},
    handler::{HandlerContext, OperatorHandler},
    query::Operator,
    value::Value,
};

///
/// StringHandler
///
/// Text operands: pattern match for `LI`, direct equality, and ordinal
/// compare-against-zero for ordering operators.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct StringHandler;

impl OperatorHandler for StringHandler {
    fn name(&self) -> &'static str {
        "string"
    }

    fn try_handle(
        &self,
        _cx: &HandlerContext<'_>,
        operator: Operator,
        field: &Expr,
        value: &Value,
    ) -> Result<Option<Comparison>, QueryError> {
        let comparison = match operator {
            Operator::Like => match value {
                Value::Text(pattern) => Some(Comparison::Like {
                    field: field.clone(),
                    pattern: pattern.clone(),
                }),
                _ => None,
            },
            Operator::Eq
            | Operator::Ne
            | Operator::Gt
            | Operator::Gte
            | Operator::Lt
            | Operator::Lte => text_comparison(operator, field, value),
            Operator::Contains | Operator::All | Operator::Any => None,
        };

        Ok(comparison)
    }
}

fn text_comparison(operator: Operator, field: &Expr, value: &Value) -> Option<Comparison> {
    if !field.ty().is_text() || !matches!(value, Value::Text(_) | Value::Null) {
        return None;
    }

    let op = operator.compare_op()?;
    let field = field.clone();
    let value = value.clone();

    Some(match op {
        CompareOp::Eq | CompareOp::Ne => Comparison::Binary { op, field, value },
        CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte => {
            Comparison::Ordinal { op, field, value }
        }
    })
}
