use serde::Serialize;

///
/// ResultEnvelope
///
/// Returned items plus their one-based inclusive range within the filtered
/// set and the filtered total. An empty page has `to == from - 1`.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResultEnvelope<T> {
    pub items: Vec<T>,
    pub from: u64,
    pub to: u64,
    pub total: u64,
}

impl<T> ResultEnvelope<T> {
    #[must_use]
    pub fn new(items: Vec<T>, skip: u64, total: u64) -> Self {
        let from = skip + 1;
        let to = from + items.len() as u64 - 1;

        Self {
            items,
            from,
            to,
            total,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert every item, keeping the range and total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultEnvelope<U> {
        ResultEnvelope {
            items: self.items.into_iter().map(f).collect(),
            from: self.from,
            to: self.to,
            total: self.total,
        }
    }
}
