mod compare;
mod kind;
mod tag;
mod wire;


use crate::query::FilterNode;
use rust_decimal::Decimal;
use std::fmt;
use time::OffsetDateTime;

// re-exports
pub use compare::{SortKey, canonical_cmp, strict_order_cmp, values_equal};
pub use kind::{FieldKind, FieldType};
pub use tag::ValueKind;
pub use wire::parse_instant;

///
/// Value
///
/// Closed comparison value decoded once from the wire format, or read from a
/// record through a projection accessor.
///
/// `List` only appears on the read side (sequence-valued fields); wire
/// inference never produces it. `FilterRef` only appears as the operand of
/// the `All`/`Any` quantifiers.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Instant(OffsetDateTime),
    List(Vec<Self>),
    Raw(serde_json::Value),
    FilterRef(Box<FilterNode>),
}

impl Value {
    /// Runtime kind label, used in diagnostics and handler dispatch.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Text(_) => ValueKind::Text,
            Self::Instant(_) => ValueKind::Instant,
            Self::List(_) => ValueKind::List,
            Self::Raw(_) => ValueKind::Raw,
            Self::FilterRef(_) => ValueKind::Filter,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Decimal(_))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_filter(&self) -> Option<&FilterNode> {
        match self {
            Self::FilterRef(node) => Some(node),
            _ => None,
        }
    }

    /// Cast a scalar to the given static type.
    ///
    /// Supports identity, `Int -> Decimal`, integral `Decimal -> Int`, any
    /// value into `Raw`, and element-wise list casts. `Null` casts to every
    /// type. Returns `None` when no lossless conversion exists.
    #[must_use]
    pub fn cast_to(&self, ty: &FieldType) -> Option<Self> {
        match (self, ty) {
            (Self::Null, _) => Some(Self::Null),
            (Self::Bool(_), FieldType::Bool)
            | (Self::Int(_), FieldType::Int)
            | (Self::Decimal(_), FieldType::Decimal)
            | (Self::Text(_), FieldType::Text)
            | (Self::Instant(_), FieldType::Instant)
            | (Self::Raw(_), FieldType::Raw) => Some(self.clone()),
            (Self::Int(value), FieldType::Decimal) => Some(Self::Decimal(Decimal::from(*value))),
            (Self::Decimal(value), FieldType::Int) if value.fract().is_zero() => {
                i64::try_from(*value).ok().map(Self::Int)
            }
            (Self::List(items), FieldType::List(element)) => items
                .iter()
                .map(|item| item.cast_to(element))
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            (Self::FilterRef(_), _) => None,
            (_, FieldType::Raw) => Some(Self::Raw(self.to_json())),
            _ => None,
        }
    }

    /// Plain textual rendering used by pattern matching on non-text fields.
    ///
    /// `Null` and nested filters have no textual form.
    #[must_use]
    pub fn render_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::FilterRef(_) => None,
            Self::Bool(value) => Some(value.to_string()),
            Self::Int(value) => Some(value.to_string()),
            Self::Decimal(value) => Some(value.to_string()),
            Self::Text(value) => Some(value.clone()),
            Self::Instant(_) | Self::List(_) | Self::Raw(_) => match self.to_json() {
                serde_json::Value::String(text) => Some(text),
                other => Some(other.to_string()),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Text(text) => write!(f, "'{text}'"),
            Self::Instant(_) => match self.to_json() {
                serde_json::Value::String(text) => write!(f, "@{text}"),
                other => write!(f, "@{other}"),
            },
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::FilterRef(node) => write!(f, "{{{node}}}"),
            Self::Bool(_) | Self::Int(_) | Self::Decimal(_) | Self::Raw(_) => {
                let text = self.render_text().unwrap_or_default();
                f.write_str(&text)
            }
        }
    }
}

///
/// From
///

impl From<FilterNode> for Value {
    fn from(node: FilterNode) -> Self {
        Self::FilterRef(Box::new(node))
    }
}

impl<T: FieldKind> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.into_value()
    }
}

macro_rules! impl_value_from {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(value: $type) -> Self {
                    FieldKind::into_value(value)
                }
            }
        )*
    };
}

impl_value_from!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f64,
    Decimal,
    String,
    &str,
    OffsetDateTime,
    serde_json::Value,
);
