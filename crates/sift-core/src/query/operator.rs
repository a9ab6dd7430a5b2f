use crate::expr::CompareOp;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Operator
///
/// Closed set of wire operators. Handlers match on it exhaustively; new
/// behavior is added by registering handlers, not by adding variants.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Operator {
    #[serde(rename = "EQ")]
    Eq,
    #[serde(rename = "NE")]
    Ne,
    #[serde(rename = "GT")]
    Gt,
    #[serde(rename = "GTE")]
    Gte,
    #[serde(rename = "LT")]
    Lt,
    #[serde(rename = "LTE")]
    Lte,
    #[serde(rename = "LI")]
    Like,
    #[serde(rename = "CO")]
    Contains,
    All,
    Any,
}

impl Operator {
    pub const ALL: [Self; 10] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Like,
        Self::Contains,
        Self::All,
        Self::Any,
    ];

    /// Stable wire name.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Gt => "GT",
            Self::Gte => "GTE",
            Self::Lt => "LT",
            Self::Lte => "LTE",
            Self::Like => "LI",
            Self::Contains => "CO",
            Self::All => "All",
            Self::Any => "Any",
        }
    }

    /// Scalar comparison operator, when this is one of `Eq..Lte`.
    #[must_use]
    pub const fn compare_op(self) -> Option<CompareOp> {
        match self {
            Self::Eq => Some(CompareOp::Eq),
            Self::Ne => Some(CompareOp::Ne),
            Self::Gt => Some(CompareOp::Gt),
            Self::Gte => Some(CompareOp::Gte),
            Self::Lt => Some(CompareOp::Lt),
            Self::Lte => Some(CompareOp::Lte),
            Self::Like | Self::Contains | Self::All | Self::Any => None,
        }
    }

    #[must_use]
    pub const fn is_quantifier(self) -> bool {
        matches!(self, Self::All | Self::Any)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
