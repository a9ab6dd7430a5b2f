//! Module: member
//! Responsibility: case-folded name -> IR lookup built once per projection.
//! Does not own: projection validation beyond name collisions.
//! Boundary: read-only after construction and shared across compilations.


use crate::{
    ELEMENT_KEY,
    error::QueryError,
    expr::Expr,
    projection::Projection,
    value::{FieldKind, FieldType},
};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::BTreeMap};

///
/// KeyComparer
///
/// How filter/order keys are matched against member names.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyComparer {
    /// Unicode lower-case folding on both sides.
    #[default]
    IgnoreCase,

    /// Exact, byte-wise match.
    Ordinal,
}

impl KeyComparer {
    #[must_use]
    pub fn fold<'a>(self, key: &'a str) -> Cow<'a, str> {
        match self {
            Self::IgnoreCase => Cow::Owned(key.to_lowercase()),
            Self::Ordinal => Cow::Borrowed(key),
        }
    }
}

///
/// MemberTable
///
/// Mapping of folded field name to the IR that reads that field from one
/// source record. Immutable after construction.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberTable {
    comparer: KeyComparer,
    entries: BTreeMap<String, Expr>,
    names: Vec<String>,
}

impl MemberTable {
    /// Decompose a projection into its member table.
    ///
    /// Fails with `UnsupportedShape` when two declared names collide under
    /// the comparer.
    pub fn from_projection<In, Out>(
        projection: &Projection<In, Out>,
        comparer: KeyComparer,
    ) -> Result<Self, QueryError> {
        let mut table = Self::empty(comparer);

        for field in projection.fields() {
            table.insert(&field.name, field.expr.clone())?;
        }

        Ok(table)
    }

    /// Isolated sub-context for quantifier bodies: one synthetic key bound
    /// to the current element.
    #[must_use]
    pub fn subcontext(element: FieldType, comparer: KeyComparer) -> Self {
        let mut table = Self::empty(comparer);
        table
            .entries
            .insert(comparer.fold(ELEMENT_KEY).into_owned(), Expr::param(element));
        table.names.push(ELEMENT_KEY.to_string());

        table
    }

    /// Typed form of [`Self::subcontext`] for a statically known element type.
    #[must_use]
    pub fn subcontext_for<E: FieldKind>(comparer: KeyComparer) -> Self {
        Self::subcontext(E::field_type(), comparer)
    }

    const fn empty(comparer: KeyComparer) -> Self {
        Self {
            comparer,
            entries: BTreeMap::new(),
            names: Vec::new(),
        }
    }

    fn insert(&mut self, name: &str, expr: Expr) -> Result<(), QueryError> {
        let folded = self.comparer.fold(name).into_owned();
        if self.entries.contains_key(&folded) {
            return Err(QueryError::unsupported_shape(format!(
                "member '{name}' collides with another member under {:?} key matching",
                self.comparer
            )));
        }

        self.entries.insert(folded, expr);
        self.names.push(name.to_string());

        Ok(())
    }

    #[must_use]
    pub const fn comparer(&self) -> KeyComparer {
        self.comparer
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Expr> {
        self.entries.get(self.comparer.fold(key).as_ref())
    }

    /// Resolve a filter/order key, failing with `UnknownKey`.
    pub fn resolve(&self, key: &str) -> Result<&Expr, QueryError> {
        self.get(key).ok_or_else(|| QueryError::unknown_key(key))
    }

    /// Declared field names, in declaration order. This is the whole surface
    /// schema generators consume.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
