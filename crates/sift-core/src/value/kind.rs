use crate::value::Value;
use rust_decimal::Decimal;
use std::fmt;
use time::OffsetDateTime;

///
/// FieldType
///
/// Static type of one projected field, known when the projection is built.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FieldType {
    Bool,
    Int,
    Decimal,
    Text,
    Instant,
    Raw,
    List(Box<Self>),
}

impl FieldType {
    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Element type when this is a sequence type.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::List(element) => Some(element),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Decimal)
    }

    /// Whether a scalar comparison between a field of this type and `value`
    /// is well typed. Numeric kinds widen into each other.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (Self::Bool, Value::Bool(_))
            | (Self::Int | Self::Decimal, Value::Int(_) | Value::Decimal(_))
            | (Self::Text, Value::Text(_))
            | (Self::Instant, Value::Instant(_))
            | (Self::Raw, Value::Raw(_)) => true,
            (Self::List(element), Value::List(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            _ => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("Bool"),
            Self::Int => f.write_str("Int"),
            Self::Decimal => f.write_str("Decimal"),
            Self::Text => f.write_str("Text"),
            Self::Instant => f.write_str("Instant"),
            Self::Raw => f.write_str("Raw"),
            Self::List(element) => write!(f, "List<{element}>"),
        }
    }
}

///
/// FieldKind
///
/// Maps a Rust field type onto its static `FieldType` and runtime `Value`.
/// Projection accessors return any `FieldKind`.
///

pub trait FieldKind {
    fn field_type() -> FieldType;

    fn into_value(self) -> Value;
}

macro_rules! impl_field_kind_int {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl FieldKind for $type {
                fn field_type() -> FieldType {
                    FieldType::Int
                }

                fn into_value(self) -> Value {
                    Value::Int(i64::from(self))
                }
            }
        )*
    };
}

impl_field_kind_int!(i8, i16, i32, i64, u8, u16, u32);

impl FieldKind for u64 {
    fn field_type() -> FieldType {
        FieldType::Int
    }

    // values past i64::MAX widen to Decimal, which still compares numerically
    fn into_value(self) -> Value {
        i64::try_from(self).map_or_else(|_| Value::Decimal(Decimal::from(self)), Value::Int)
    }
}

impl FieldKind for usize {
    fn field_type() -> FieldType {
        FieldType::Int
    }

    fn into_value(self) -> Value {
        i64::try_from(self).map_or_else(|_| Value::Decimal(Decimal::from(self)), Value::Int)
    }
}

impl FieldKind for f64 {
    fn field_type() -> FieldType {
        FieldType::Decimal
    }

    fn into_value(self) -> Value {
        Decimal::try_from(self).map_or(Value::Null, Value::Decimal)
    }
}

impl FieldKind for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FieldKind for Decimal {
    fn field_type() -> FieldType {
        FieldType::Decimal
    }

    fn into_value(self) -> Value {
        Value::Decimal(self)
    }
}

impl FieldKind for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl FieldKind for &str {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl FieldKind for OffsetDateTime {
    fn field_type() -> FieldType {
        FieldType::Instant
    }

    fn into_value(self) -> Value {
        Value::Instant(self)
    }
}

impl FieldKind for serde_json::Value {
    fn field_type() -> FieldType {
        FieldType::Raw
    }

    fn into_value(self) -> Value {
        Value::Raw(self)
    }
}

impl<T: FieldKind> FieldKind for Option<T> {
    fn field_type() -> FieldType {
        T::field_type()
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, T::into_value)
    }
}

impl<T: FieldKind> FieldKind for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::list_of(T::field_type())
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(T::into_value).collect())
    }
}
