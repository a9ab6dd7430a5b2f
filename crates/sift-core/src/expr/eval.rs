use crate::value::Value;
use std::iter;

/// Boxed lazy element stream borrowed from one record.
pub type ValueIter<'a> = Box<dyn Iterator<Item = Value> + 'a>;

///
/// FieldReader
///
/// Minimal read contract required by IR evaluation. Slots come from the
/// member table; the parameter is the current element inside a quantifier.
///

pub trait FieldReader {
    fn scalar(&self, slot: usize) -> Value;

    fn sequence(&self, slot: usize) -> ValueIter<'_>;

    fn param(&self) -> Option<&Value> {
        None
    }
}

///
/// ElementReader
///
/// Reader for quantifier bodies: only the element parameter is bound.
///

pub struct ElementReader<'a> {
    element: &'a Value,
}

impl<'a> ElementReader<'a> {
    #[must_use]
    pub const fn new(element: &'a Value) -> Self {
        Self { element }
    }
}

impl FieldReader for ElementReader<'_> {
    fn scalar(&self, _slot: usize) -> Value {
        Value::Null
    }

    fn sequence(&self, _slot: usize) -> ValueIter<'_> {
        Box::new(iter::empty())
    }

    fn param(&self) -> Option<&Value> {
        Some(self.element)
    }
}
