use crate::{
    error::QueryError,
    expr::{Comparison, Expr, Quantifier},
    handler::{HandlerContext, OperatorHandler},
    query::Operator,
    value::Value,
};

///
/// ListHandler
///
/// Owns membership and quantifiers on sequence-valued fields. Both compose
/// against the dehydrated (still lazy) sequence.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ListHandler;

impl OperatorHandler for ListHandler {
    fn name(&self) -> &'static str {
        "list"
    }

    fn try_handle(
        &self,
        cx: &HandlerContext<'_>,
        operator: Operator,
        field: &Expr,
        value: &Value,
    ) -> Result<Option<Comparison>, QueryError> {
        let Some(element) = field.element_type() else {
            return Ok(None);
        };

        let quantifier = match operator {
            Operator::Contains => {
                return Ok(value.cast_to(element).map(|item| Comparison::Contains {
                    field: field.dehydrate().clone(),
                    item,
                }));
            }
            Operator::All => Quantifier::All,
            Operator::Any => Quantifier::Any,
            Operator::Eq
            | Operator::Ne
            | Operator::Gt
            | Operator::Gte
            | Operator::Lt
            | Operator::Lte
            | Operator::Like => return Ok(None),
        };

        // scalar operands are not quantifier bodies
        let Some(node) = value.as_filter() else {
            return Ok(None);
        };
        let body = cx.compile_element(element, node)?;

        Ok(Some(Comparison::Quantified {
            quantifier,
            field: field.dehydrate().clone(),
            body: Box::new(body),
        }))
    }
}
