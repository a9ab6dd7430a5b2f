use crate::{
    error::QueryError,
    expr::{Expr, FieldReader},
    member::MemberTable,
    query::{Direction, OrderSpec},
    value::SortKey,
};
use std::{cmp::Ordering, fmt};

///
/// OrderKey
///
/// One resolved order link: the field it reads and its direction.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderKey {
    name: String,
    field: Expr,
    direction: Direction,
}

impl OrderKey {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn field(&self) -> &Expr {
        &self.field
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Extract the uniform comparable key for one record.
    #[must_use]
    pub fn sort_key(&self, reader: &dyn FieldReader) -> SortKey {
        SortKey(self.field.read(reader))
    }

    /// Compare two extracted keys under this link's direction.
    #[must_use]
    pub fn compare(&self, left: &SortKey, right: &SortKey) -> Ordering {
        self.direction.apply(left.cmp(right))
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.direction)
    }
}

///
/// OrderPlan
///
/// Primary key plus then-by links, in declared order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderPlan {
    primary: OrderKey,
    then: Vec<OrderKey>,
}

impl OrderPlan {
    #[must_use]
    pub const fn primary(&self) -> &OrderKey {
        &self.primary
    }

    #[must_use]
    pub fn then_keys(&self) -> &[OrderKey] {
        &self.then
    }

    /// All links, primary first.
    pub fn keys(&self) -> impl Iterator<Item = &OrderKey> {
        std::iter::once(&self.primary).chain(self.then.iter())
    }

    #[must_use]
    pub fn link_count(&self) -> usize {
        1 + self.then.len()
    }
}

impl fmt::Display for OrderPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, key) in self.keys().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}")?;
        }

        Ok(())
    }
}

/// Resolve every link of an order chain against `table`.
pub fn compile_order(spec: &OrderSpec, table: &MemberTable) -> Result<OrderPlan, QueryError> {
    let resolve = |link: &OrderSpec| -> Result<OrderKey, QueryError> {
        Ok(OrderKey {
            name: link.key.clone(),
            field: table.resolve(&link.key)?.clone(),
            direction: link.direction,
        })
    };

    let primary = resolve(spec)?;
    let then = spec
        .links()
        .skip(1)
        .map(resolve)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrderPlan { primary, then })
}
