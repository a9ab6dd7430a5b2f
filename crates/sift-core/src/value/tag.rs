use derive_more::Display;

///
/// ValueKind
///
/// Runtime variant label for a `Value`.
///
/// Rank order is part of deterministic ordering behavior: every sort key
/// is compared by rank first, so mixed-kind columns stay totally ordered.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Decimal,
    Text,
    Instant,
    List,
    Raw,
    Filter,
}

impl ValueKind {
    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Decimal => "Decimal",
            Self::Text => "Text",
            Self::Instant => "Instant",
            Self::List => "List",
            Self::Raw => "Raw",
            Self::Filter => "Filter",
        }
    }

    /// Canonical cross-kind rank. `Int` and `Decimal` share a rank so that
    /// numeric columns order by magnitude.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool => 1,
            Self::Int | Self::Decimal => 2,
            Self::Text => 3,
            Self::Instant => 4,
            Self::List => 5,
            Self::Raw => 6,
            Self::Filter => 7,
        }
    }
}
