//! Module: projection
//! Responsibility: explicit, declaratively built field mapping from one input record type to
//! one output record type.
//! Does not own: name folding or filter compilation.
//! Boundary: the only place caller closures enter the compiler.

mod bindings;

#[cfg(test)]
mod tests;

use crate::{
    error::QueryError,
    expr::{Expr, MaterializeKind},
    value::FieldKind,
};
use std::{collections::BTreeSet, fmt, sync::Arc};

pub use bindings::{Accessor, Bindings, RowReader, ScalarFn, SequenceRead};
use bindings::MappedSequence;

/// Output record constructor.
pub type Construct<In, Out> = Arc<dyn Fn(&In) -> Out + Send + Sync>;

///
/// ProjectedField
///
/// One declared output field and the IR that reads it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectedField {
    pub name: String,
    pub expr: Expr,
}

///
/// Projection
///
/// Pure rule computing an output record from one input record, plus the
/// per-field accessors the compiler inspects. Validated once, at build time.
///

pub struct Projection<In, Out> {
    construct: Construct<In, Out>,
    fields: Vec<ProjectedField>,
    bindings: Bindings<In>,
}

impl<In: 'static, Out: 'static> Projection<In, Out> {
    /// Start a projection from its output constructor.
    #[must_use]
    pub fn builder<C>(construct: C) -> ProjectionBuilder<In, Out>
    where
        C: Fn(&In) -> Out + Send + Sync + 'static,
    {
        ProjectionBuilder {
            construct: Arc::new(construct),
            fields: Vec::new(),
            accessors: Vec::new(),
        }
    }
}

impl<In, Out> Projection<In, Out> {
    /// Build one output record.
    #[must_use]
    pub fn construct(&self, row: &In) -> Out {
        (self.construct)(row)
    }

    #[must_use]
    pub fn fields(&self) -> &[ProjectedField] {
        &self.fields
    }

    #[must_use]
    pub const fn bindings(&self) -> &Bindings<In> {
        &self.bindings
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

impl<In, Out> Clone for Projection<In, Out> {
    fn clone(&self) -> Self {
        Self {
            construct: Arc::clone(&self.construct),
            fields: self.fields.clone(),
            bindings: self.bindings.clone(),
        }
    }
}

impl<In, Out> fmt::Debug for Projection<In, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

///
/// ProjectionBuilder
///

pub struct ProjectionBuilder<In, Out> {
    construct: Construct<In, Out>,
    fields: Vec<ProjectedField>,
    accessors: Vec<Accessor<In>>,
}

impl<In: 'static, Out: 'static> ProjectionBuilder<In, Out> {
    /// Scalar field computed directly from the record.
    #[must_use]
    pub fn field<T, F>(mut self, name: &str, accessor: F) -> Self
    where
        T: FieldKind,
        F: Fn(&In) -> T + Send + Sync + 'static,
    {
        let slot = self.accessors.len();
        let read: ScalarFn<In> = Arc::new(move |row: &In| accessor(row).into_value());

        self.accessors.push(Accessor::Scalar(read));
        self.fields.push(ProjectedField {
            name: name.to_string(),
            expr: Expr::member(name, slot, T::field_type()),
        });

        self
    }

    /// Lazily pulled sequence field.
    #[must_use]
    pub fn sequence<T, F>(mut self, name: &str, accessor: F) -> Self
    where
        T: FieldKind + 'static,
        F: for<'a> Fn(&'a In) -> Box<dyn Iterator<Item = T> + 'a> + Send + Sync + 'static,
    {
        let slot = self.accessors.len();

        self.accessors
            .push(Accessor::Sequence(Arc::new(MappedSequence::new(accessor))));
        self.fields.push(ProjectedField {
            name: name.to_string(),
            expr: Expr::sequence(name, slot, T::field_type()),
        });

        self
    }

    /// Sequence field snapshotted into a list before it is read.
    #[must_use]
    pub fn list<T, F>(self, name: &str, accessor: F) -> Self
    where
        T: FieldKind + 'static,
        F: for<'a> Fn(&'a In) -> Box<dyn Iterator<Item = T> + 'a> + Send + Sync + 'static,
    {
        self.sequence(name, accessor)
            .materialize_last(MaterializeKind::List)
    }

    /// Sequence field snapshotted into an array before it is read.
    #[must_use]
    pub fn array<T, F>(self, name: &str, accessor: F) -> Self
    where
        T: FieldKind + 'static,
        F: for<'a> Fn(&'a In) -> Box<dyn Iterator<Item = T> + 'a> + Send + Sync + 'static,
    {
        self.sequence(name, accessor)
            .materialize_last(MaterializeKind::Array)
    }

    fn materialize_last(mut self, kind: MaterializeKind) -> Self {
        if let Some(field) = self.fields.pop() {
            self.fields.push(ProjectedField {
                name: field.name,
                expr: field.expr.materialize(kind),
            });
        }

        self
    }

    /// Validate the declared shape.
    ///
    /// Rejects an empty mapping, computed (non-identifier) member names and
    /// duplicate names.
    pub fn build(self) -> Result<Projection<In, Out>, QueryError> {
        if self.fields.is_empty() {
            return Err(QueryError::unsupported_shape(
                "projection declares no field assignments",
            ));
        }

        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !is_plain_identifier(&field.name) {
                return Err(QueryError::unsupported_shape(format!(
                    "member name '{}' is not a plain field identifier",
                    field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(QueryError::unsupported_shape(format!(
                    "member '{}' is assigned more than once",
                    field.name
                )));
            }
        }

        Ok(Projection {
            construct: self.construct,
            fields: self.fields,
            bindings: Bindings::new(self.accessors),
        })
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_ascii_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

///
/// MappingProvider
///
/// Supplies the projection for one input/output shape pair. Called on each
/// context construction; results are not cached here.
///

pub trait MappingProvider<In, Out>: Send + Sync {
    fn projection(&self) -> Result<Projection<In, Out>, QueryError>;
}

impl<In, Out, F> MappingProvider<In, Out> for F
where
    F: Fn() -> Result<Projection<In, Out>, QueryError> + Send + Sync,
{
    fn projection(&self) -> Result<Projection<In, Out>, QueryError> {
        self()
    }
}
