use crate::value::Value;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Total canonical comparator used by ordering surfaces.
///
/// Ordering rules:
/// 1. Canonical kind rank (`Null` sorts first)
/// 2. Kind-specific comparison for same-ranked values
///
/// Mixed-kind comparisons are rank-only and must remain deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.kind().rank().cmp(&right.kind().rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Strict comparator for orderable scalars of compatible kinds.
///
/// `Int` and `Decimal` widen to `Decimal`. Text compares ordinally (byte
/// order). Returns `None` for mismatched or non-orderable kinds.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
        (Value::Decimal(a), Value::Int(b)) => Some(a.cmp(&Decimal::from(*b))),
        (Value::Text(a), Value::Text(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
        (Value::Instant(a), Value::Instant(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Equality as observed by filter comparisons.
///
/// `Null` equals only `Null`; numeric kinds widen; lists compare element-wise.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (Value::Raw(a), Value::Raw(b)) => a == b,
        (Value::FilterRef(a), Value::FilterRef(b)) => a == b,
        _ => strict_order_cmp(left, right) == Some(Ordering::Equal),
    }
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::List(a), Value::List(b)) => canonical_cmp_list(a, b),
        (Value::Raw(a), Value::Raw(b)) => a.to_string().cmp(&b.to_string()),
        _ => strict_order_cmp(left, right).unwrap_or(Ordering::Equal),
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

///
/// SortKey
///
/// Uniform comparable wrapper produced by every order key, so that chain
/// links extracting different field types compare without unification.
///

#[derive(Clone, Debug)]
pub struct SortKey(pub Value);

impl SortKey {
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.0
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(&self.0, &other.0)
    }
}
