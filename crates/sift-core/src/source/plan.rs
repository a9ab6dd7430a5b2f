use crate::{
    compile::OrderKey,
    expr::Predicate,
    projection::Bindings,
    value::SortKey,
};
use std::{fmt, sync::Arc};

///
/// RowFilter
///
/// Compiled predicate bound to the accessors of one record type.
///

pub struct RowFilter<R> {
    predicate: Arc<Predicate>,
    bindings: Bindings<R>,
}

impl<R> RowFilter<R> {
    #[must_use]
    pub const fn new(predicate: Arc<Predicate>, bindings: Bindings<R>) -> Self {
        Self {
            predicate,
            bindings,
        }
    }

    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    #[must_use]
    pub fn matches(&self, row: &R) -> bool {
        self.predicate.evaluate(&self.bindings.reader(row))
    }
}

impl<R> Clone for RowFilter<R> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            bindings: self.bindings.clone(),
        }
    }
}

///
/// RowOrder
///
/// One order link bound to the accessors of one record type.
///

pub struct RowOrder<R> {
    key: OrderKey,
    bindings: Bindings<R>,
}

impl<R> RowOrder<R> {
    #[must_use]
    pub const fn new(key: OrderKey, bindings: Bindings<R>) -> Self {
        Self { key, bindings }
    }

    #[must_use]
    pub const fn key(&self) -> &OrderKey {
        &self.key
    }

    #[must_use]
    pub fn sort_key(&self, row: &R) -> SortKey {
        self.key.sort_key(&self.bindings.reader(row))
    }
}

impl<R> Clone for RowOrder<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            bindings: self.bindings.clone(),
        }
    }
}

///
/// QueryOp
///
/// One lazily applied step. `ThenBy` refines the ordering started by the
/// nearest preceding `OrderBy` and never disturbs its ties' relative order.
///

pub enum QueryOp<R> {
    Filter(RowFilter<R>),
    OrderBy(RowOrder<R>),
    ThenBy(RowOrder<R>),
    Skip(u64),
    Take(u64),
}

impl<R> Clone for QueryOp<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Filter(filter) => Self::Filter(filter.clone()),
            Self::OrderBy(order) => Self::OrderBy(order.clone()),
            Self::ThenBy(order) => Self::ThenBy(order.clone()),
            Self::Skip(count) => Self::Skip(*count),
            Self::Take(count) => Self::Take(*count),
        }
    }
}

impl<R> fmt::Display for QueryOp<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(filter) => write!(f, "filter {}", filter.predicate()),
            Self::OrderBy(order) => write!(f, "order_by {}", order.key()),
            Self::ThenBy(order) => write!(f, "then_by {}", order.key()),
            Self::Skip(count) => write!(f, "skip {count}"),
            Self::Take(count) => write!(f, "take {count}"),
        }
    }
}

///
/// ReadPlan
///
/// Ordered list of lazy steps over one record type. Building a plan never
/// reads data.
///

pub struct ReadPlan<R> {
    ops: Vec<QueryOp<R>>,
}

impl<R> ReadPlan<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    #[must_use]
    pub fn ops(&self) -> &[QueryOp<R>] {
        &self.ops
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub fn filter(mut self, filter: RowFilter<R>) -> Self {
        self.ops.push(QueryOp::Filter(filter));
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: RowOrder<R>) -> OrderedPlan<R> {
        self.ops.push(QueryOp::OrderBy(order));
        OrderedPlan { plan: self }
    }

    #[must_use]
    pub fn skip(mut self, count: u64) -> Self {
        self.ops.push(QueryOp::Skip(count));
        self
    }

    #[must_use]
    pub fn take(mut self, count: u64) -> Self {
        self.ops.push(QueryOp::Take(count));
        self
    }
}

impl<R> Default for ReadPlan<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for ReadPlan<R> {
    fn clone(&self) -> Self {
        Self {
            ops: self.ops.clone(),
        }
    }
}

impl<R> fmt::Display for ReadPlan<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str("scan");
        }

        for (index, op) in self.ops.iter().enumerate() {
            if index > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{op}")?;
        }

        Ok(())
    }
}

impl<R> fmt::Debug for ReadPlan<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadPlan").field(&self.to_string()).finish()
    }
}

///
/// OrderedPlan
///
/// A plan statically known to end in an ordering, the only shape that
/// accepts `then_by`.
///

pub struct OrderedPlan<R> {
    plan: ReadPlan<R>,
}

impl<R> OrderedPlan<R> {
    #[must_use]
    pub fn then_by(mut self, order: RowOrder<R>) -> Self {
        self.plan.ops.push(QueryOp::ThenBy(order));
        self
    }

    #[must_use]
    pub const fn as_plan(&self) -> &ReadPlan<R> {
        &self.plan
    }

    #[must_use]
    pub fn into_plan(self) -> ReadPlan<R> {
        self.plan
    }
}

impl<R> Clone for OrderedPlan<R> {
    fn clone(&self) -> Self {
        Self {
            plan: self.plan.clone(),
        }
    }
}

impl<R> From<OrderedPlan<R>> for ReadPlan<R> {
    fn from(plan: OrderedPlan<R>) -> Self {
        plan.plan
    }
}

impl<R> fmt::Debug for OrderedPlan<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OrderedPlan").field(&self.plan.to_string()).finish()
    }
}
