//! Module: expr
//! Responsibility: storage-independent IR produced by compilation.
//! Does not own: name resolution or handler policy.
//! Boundary: evaluated against any `FieldReader`; never touches a data source.

mod eval;
mod like;
mod predicate;


use crate::value::{FieldType, Value};
use std::{fmt, iter};

pub use eval::{ElementReader, FieldReader, ValueIter};
pub use like::like_matches;
pub use predicate::{CompareOp, Comparison, CustomTest, Predicate, Quantifier};

///
/// MaterializeKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MaterializeKind {
    List,
    Array,
}

///
/// Expr
///
/// How to read one field from one record.
///
/// `Sequence` is a lazily pulled sequence; `Materialize` snapshots its source
/// into a realized copy before anything reads it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expr {
    Member {
        name: String,
        slot: usize,
        ty: FieldType,
    },
    Sequence {
        name: String,
        slot: usize,
        ty: FieldType,
    },
    Param {
        ty: FieldType,
    },
    Materialize {
        kind: MaterializeKind,
        source: Box<Self>,
    },
}

impl Expr {
    #[must_use]
    pub fn member(name: impl Into<String>, slot: usize, ty: FieldType) -> Self {
        Self::Member {
            name: name.into(),
            slot,
            ty,
        }
    }

    /// Lazy sequence of `element` values.
    #[must_use]
    pub fn sequence(name: impl Into<String>, slot: usize, element: FieldType) -> Self {
        Self::Sequence {
            name: name.into(),
            slot,
            ty: FieldType::list_of(element),
        }
    }

    #[must_use]
    pub const fn param(ty: FieldType) -> Self {
        Self::Param { ty }
    }

    #[must_use]
    pub fn materialize(self, kind: MaterializeKind) -> Self {
        Self::Materialize {
            kind,
            source: Box::new(self),
        }
    }

    /// Static type of the value this expression reads.
    #[must_use]
    pub fn ty(&self) -> &FieldType {
        match self {
            Self::Member { ty, .. } | Self::Sequence { ty, .. } | Self::Param { ty } => ty,
            Self::Materialize { source, .. } => source.ty(),
        }
    }

    /// Element type when the expression reads a sequence.
    #[must_use]
    pub fn element_type(&self) -> Option<&FieldType> {
        self.ty().element()
    }

    /// Strip one trailing materialization so element-wise tests compose
    /// against the still-lazy source.
    #[must_use]
    pub fn dehydrate(&self) -> &Self {
        match self {
            Self::Materialize { source, .. } => source,
            other => other,
        }
    }

    /// Read the whole value. Sequences are realized into `Value::List`.
    #[must_use]
    pub fn read(&self, reader: &dyn FieldReader) -> Value {
        match self {
            Self::Member { slot, .. } => reader.scalar(*slot),
            Self::Sequence { slot, .. } => Value::List(reader.sequence(*slot).collect()),
            Self::Param { .. } => reader.param().cloned().unwrap_or(Value::Null),
            Self::Materialize { source, .. } => source.read(reader),
        }
    }

    /// Pull the elements of a sequence-valued expression.
    ///
    /// Lazy sequences are pulled on demand; a materialization realizes its
    /// source fully first. Scalars yield themselves, `Null` yields nothing.
    pub fn elements<'r>(&self, reader: &'r dyn FieldReader) -> ValueIter<'r> {
        match self {
            Self::Sequence { slot, .. } => reader.sequence(*slot),
            Self::Materialize { source, .. } => {
                let realized: Vec<Value> = source.elements(reader).collect();
                Box::new(realized.into_iter())
            }
            Self::Param { .. } => match reader.param() {
                Some(Value::List(items)) => Box::new(items.iter().cloned()),
                Some(Value::Null) | None => Box::new(iter::empty()),
                Some(other) => Box::new(iter::once(other.clone())),
            },
            Self::Member { .. } => match self.read(reader) {
                Value::List(items) => Box::new(items.into_iter()),
                Value::Null => Box::new(iter::empty()),
                other => Box::new(iter::once(other)),
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member { name, .. } | Self::Sequence { name, .. } => f.write_str(name),
            Self::Param { .. } => f.write_str(crate::ELEMENT_KEY),
            Self::Materialize { kind, source } => match kind {
                MaterializeKind::List => write!(f, "{source}.to_list()"),
                MaterializeKind::Array => write!(f, "{source}.to_array()"),
            },
        }
    }
}
