use crate::{
    expr::{ElementReader, Expr, FieldReader, like_matches},
    value::{Value, strict_order_cmp, values_equal},
};
use std::{cmp::Ordering, fmt, sync::Arc};

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Whether `ordering` (left compared to right) satisfies this operator.
    #[must_use]
    pub const fn test(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Gt => ordering.is_gt(),
            Self::Gte => ordering.is_ge(),
            Self::Lt => ordering.is_lt(),
            Self::Lte => ordering.is_le(),
        }
    }
}

///
/// Quantifier
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Quantifier {
    All,
    Any,
}

/// Caller-supplied test used by custom handlers.
pub type CustomTest = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

///
/// Comparison
///
/// One leaf of a compiled predicate, produced by an operator handler.
///

#[derive(Clone)]
pub enum Comparison {
    /// Direct scalar comparison; numeric kinds widen.
    Binary {
        op: CompareOp,
        field: Expr,
        value: Value,
    },

    /// Two-argument ordinal text compare tested against zero.
    /// `Null` orders before any text.
    Ordinal {
        op: CompareOp,
        field: Expr,
        value: Value,
    },

    Like {
        field: Expr,
        pattern: String,
    },

    Contains {
        field: Expr,
        item: Value,
    },

    Quantified {
        quantifier: Quantifier,
        field: Expr,
        body: Box<Predicate>,
    },

    Custom {
        label: String,
        field: Expr,
        test: CustomTest,
    },
}

impl Comparison {
    /// Field expression this comparison reads.
    #[must_use]
    pub const fn field(&self) -> &Expr {
        match self {
            Self::Binary { field, .. }
            | Self::Ordinal { field, .. }
            | Self::Like { field, .. }
            | Self::Contains { field, .. }
            | Self::Quantified { field, .. }
            | Self::Custom { field, .. } => field,
        }
    }

    #[must_use]
    pub fn evaluate(&self, reader: &dyn FieldReader) -> bool {
        match self {
            Self::Binary { op, field, value } => {
                let left = field.read(reader);
                match op {
                    CompareOp::Eq => values_equal(&left, value),
                    CompareOp::Ne => !values_equal(&left, value),
                    _ => strict_order_cmp(&left, value).is_some_and(|ordering| op.test(ordering)),
                }
            }
            Self::Ordinal { op, field, value } => {
                ordinal_cmp(&field.read(reader), value).is_some_and(|ordering| op.test(ordering))
            }
            Self::Like { field, pattern } => field
                .read(reader)
                .render_text()
                .is_some_and(|text| like_matches(pattern, &text)),
            Self::Contains { field, item } => field
                .elements(reader)
                .any(|element| values_equal(&element, item)),
            Self::Quantified {
                quantifier,
                field,
                body,
            } => {
                let mut elements = field.elements(reader);
                let holds = |element: Value| body.evaluate(&ElementReader::new(&element));

                match quantifier {
                    Quantifier::All => elements.all(holds),
                    Quantifier::Any => elements.any(holds),
                }
            }
            Self::Custom { field, test, .. } => test(&field.read(reader)),
        }
    }
}

// string.Compare-style ordering: null sorts before every text value.
fn ordinal_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, Value::Text(_)) => Some(Ordering::Less),
        (Value::Text(_), Value::Null) => Some(Ordering::Greater),
        (Value::Text(left), Value::Text(right)) => Some(left.as_bytes().cmp(right.as_bytes())),
        _ => None,
    }
}

impl fmt::Debug for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { op, field, value } => f
                .debug_struct("Binary")
                .field("op", op)
                .field("field", field)
                .field("value", value)
                .finish(),
            Self::Ordinal { op, field, value } => f
                .debug_struct("Ordinal")
                .field("op", op)
                .field("field", field)
                .field("value", value)
                .finish(),
            Self::Like { field, pattern } => f
                .debug_struct("Like")
                .field("field", field)
                .field("pattern", pattern)
                .finish(),
            Self::Contains { field, item } => f
                .debug_struct("Contains")
                .field("field", field)
                .field("item", item)
                .finish(),
            Self::Quantified {
                quantifier,
                field,
                body,
            } => f
                .debug_struct("Quantified")
                .field("quantifier", quantifier)
                .field("field", field)
                .field("body", body)
                .finish(),
            Self::Custom { label, field, .. } => f
                .debug_struct("Custom")
                .field("label", label)
                .field("field", field)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { op, field, value } => write!(f, "{field} {} {value}", op.symbol()),
            Self::Ordinal { op, field, value } => {
                write!(f, "compare({field}, {value}) {} 0", op.symbol())
            }
            Self::Like { field, pattern } => write!(f, "{field} like '{pattern}'"),
            Self::Contains { field, item } => write!(f, "{field}.contains({item})"),
            Self::Quantified {
                quantifier,
                field,
                body,
            } => {
                let name = match quantifier {
                    Quantifier::All => "all",
                    Quantifier::Any => "any",
                };
                write!(f, "{field}.{name}({} => {body})", crate::ELEMENT_KEY)
            }
            Self::Custom { label, field, .. } => write!(f, "{label}({field})"),
        }
    }
}

///
/// Predicate
///
/// Compiled boolean tree. Built once per compiled query and shared by every
/// execution.
///

#[derive(Clone, Debug)]
pub enum Predicate {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(Comparison),
}

impl Predicate {
    #[must_use]
    pub fn evaluate(&self, reader: &dyn FieldReader) -> bool {
        match self {
            Self::And(children) => children.iter().all(|child| child.evaluate(reader)),
            Self::Or(children) => children.iter().any(|child| child.evaluate(reader)),
            Self::Not(child) => !child.evaluate(reader),
            Self::Compare(comparison) => comparison.evaluate(reader),
        }
    }

    /// Number of comparison leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::And(children) | Self::Or(children) => children.iter().map(Self::leaf_count).sum(),
            Self::Not(child) => child.leaf_count(),
            Self::Compare(_) => 1,
        }
    }
}

impl From<Comparison> for Predicate {
    fn from(comparison: Comparison) -> Self {
        Self::Compare(comparison)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(children) => write_joined(f, " and ", children),
            Self::Or(children) => write_joined(f, " or ", children),
            Self::Not(child) => write!(f, "not {child}"),
            Self::Compare(comparison) => write!(f, "{comparison}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, separator: &str, children: &[Predicate]) -> fmt::Result {
    f.write_str("(")?;
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}
