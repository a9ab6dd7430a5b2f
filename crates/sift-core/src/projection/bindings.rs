use crate::{
    expr::{FieldReader, ValueIter},
    value::{FieldKind, Value},
};
use std::{iter, marker::PhantomData, sync::Arc};

/// Scalar field accessor.
pub type ScalarFn<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

///
/// SequenceRead
///
/// Lazily pulls one sequence-valued field out of a record.
///

pub trait SequenceRead<R>: Send + Sync {
    fn pull<'a>(&self, row: &'a R) -> ValueIter<'a>;
}

///
/// MappedSequence
///
/// Adapts a typed element iterator into a `Value` stream.
///

pub(crate) struct MappedSequence<F, T> {
    accessor: F,
    marker: PhantomData<fn() -> T>,
}

impl<F, T> MappedSequence<F, T> {
    pub(crate) const fn new(accessor: F) -> Self {
        Self {
            accessor,
            marker: PhantomData,
        }
    }
}

impl<R, F, T> SequenceRead<R> for MappedSequence<F, T>
where
    T: FieldKind + 'static,
    F: for<'a> Fn(&'a R) -> Box<dyn Iterator<Item = T> + 'a> + Send + Sync,
{
    fn pull<'a>(&self, row: &'a R) -> ValueIter<'a> {
        Box::new((self.accessor)(row).map(T::into_value))
    }
}

///
/// Accessor
///

pub enum Accessor<R> {
    Scalar(ScalarFn<R>),
    Sequence(Arc<dyn SequenceRead<R>>),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Scalar(read) => Self::Scalar(Arc::clone(read)),
            Self::Sequence(read) => Self::Sequence(Arc::clone(read)),
        }
    }
}

///
/// Bindings
///
/// Slot-indexed accessors for one record type. Slots match the member
/// table built from the same projection.
///

pub struct Bindings<R> {
    accessors: Arc<[Accessor<R>]>,
}

impl<R> Bindings<R> {
    pub(crate) fn new(accessors: Vec<Accessor<R>>) -> Self {
        Self {
            accessors: accessors.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// Bind these accessors to one record.
    #[must_use]
    pub const fn reader<'a>(&'a self, row: &'a R) -> RowReader<'a, R> {
        RowReader {
            bindings: self,
            row,
        }
    }
}

impl<R> Clone for Bindings<R> {
    fn clone(&self) -> Self {
        Self {
            accessors: Arc::clone(&self.accessors),
        }
    }
}

///
/// RowReader
///

pub struct RowReader<'a, R> {
    bindings: &'a Bindings<R>,
    row: &'a R,
}

impl<R> FieldReader for RowReader<'_, R> {
    fn scalar(&self, slot: usize) -> Value {
        match self.bindings.accessors.get(slot) {
            Some(Accessor::Scalar(read)) => read(self.row),
            Some(Accessor::Sequence(read)) => Value::List(read.pull(self.row).collect()),
            None => Value::Null,
        }
    }

    fn sequence(&self, slot: usize) -> ValueIter<'_> {
        match self.bindings.accessors.get(slot) {
            Some(Accessor::Sequence(read)) => read.pull(self.row),
            Some(Accessor::Scalar(read)) => match read(self.row) {
                Value::List(items) => Box::new(items.into_iter()),
                Value::Null => Box::new(iter::empty()),
                other => Box::new(iter::once(other)),
            },
            None => Box::new(iter::empty()),
        }
    }
}
