use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Apply this direction to an ascending comparison.
    #[must_use]
    pub const fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

///
/// OrderSpec
///
/// Singly linked ordering chain, primary key first.
/// Wire form: `{ "by": key, "dir": "Asc"|"Desc", "then": <OrderSpec|null> }`,
/// where `dir` defaults to `Asc`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    #[serde(rename = "by")]
    pub key: String,

    #[serde(rename = "dir", default)]
    pub direction: Direction,

    #[serde(rename = "then", default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<Self>>,
}

impl OrderSpec {
    #[must_use]
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: key.into(),
            direction,
            next: None,
        }
    }

    #[must_use]
    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Asc)
    }

    #[must_use]
    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Desc)
    }

    /// Append `next` at the tail of this chain.
    #[must_use]
    pub fn then(mut self, next: Self) -> Self {
        let tail = match self.next.take() {
            Some(link) => (*link).then(next),
            None => next,
        };
        self.next = Some(Box::new(tail));

        self
    }

    /// Chain links in order, primary first.
    pub fn links(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |link| link.next.as_deref())
    }
}
