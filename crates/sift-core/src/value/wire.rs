use crate::value::Value;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};
use std::str::FromStr;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
};

/// Parse an ISO-8601 instant.
///
/// Accepts RFC 3339, ISO-8601 date-times with an offset, date-times without
/// an offset (taken as UTC), and plain dates (midnight UTC).
#[must_use]
pub fn parse_instant(text: &str) -> Option<OffsetDateTime> {
    if let Ok(instant) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(instant);
    }
    if let Ok(instant) = OffsetDateTime::parse(text, &Iso8601::DEFAULT) {
        return Some(instant);
    }
    if let Ok(local) = PrimitiveDateTime::parse(text, &Iso8601::DEFAULT) {
        return Some(local.assume_utc());
    }

    Date::parse(text, &Iso8601::DEFAULT)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

impl Value {
    /// Decode one wire value by inference.
    ///
    /// Booleans become `Bool`, integral numbers `Int`, other numbers
    /// `Decimal`, ISO-8601 strings `Instant`, other strings `Text`, `null`
    /// becomes `Null`, and anything else is kept opaque as `Raw`.
    #[must_use]
    pub fn from_json(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(value) => Self::Bool(value),
            JsonValue::Number(number) => infer_number(number),
            JsonValue::String(text) => match parse_instant(&text) {
                Some(instant) => Self::Instant(instant),
                None => Self::Text(text),
            },
            other @ (JsonValue::Array(_) | JsonValue::Object(_)) => Self::Raw(other),
        }
    }

    /// Encode back to the wire shape.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(value) => JsonValue::Bool(*value),
            Self::Int(value) => JsonValue::from(*value),
            Self::Decimal(value) => Number::from_str(&value.to_string())
                .map_or_else(|_| JsonValue::String(value.to_string()), JsonValue::Number),
            Self::Text(value) => JsonValue::String(value.clone()),
            Self::Instant(value) => value
                .format(&Rfc3339)
                .or_else(|_| value.format(&Iso8601::DEFAULT))
                .map_or(JsonValue::Null, JsonValue::String),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Raw(value) => value.clone(),
            Self::FilterRef(node) => node.to_json(),
        }
    }
}

// Integral literals that do not fit i64 fall back to Decimal; literals that
// fit neither stay opaque.
fn infer_number(number: Number) -> Value {
    if let Some(value) = number.as_i64() {
        return Value::Int(value);
    }
    if let Some(value) = number.as_u64() {
        return Value::Decimal(Decimal::from(value));
    }

    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_or(Value::Raw(JsonValue::Number(number)), Value::Decimal)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::from_json)
    }
}
