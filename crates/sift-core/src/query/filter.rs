use crate::{error::DecodeError, query::Operator, value::Value};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

///
/// FilterNode
///
/// Recursive boolean filter description, decoded from the wire format and
/// compiled exactly once per compiled query.
///
/// Wire form is an object carrying exactly one of the keys `and`, `or`,
/// `not`, or `where`.
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "WireFilter")]
pub enum FilterNode {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Where(Operation),
}

impl FilterNode {
    #[must_use]
    pub const fn and(children: Vec<Self>) -> Self {
        Self::And(children)
    }

    #[must_use]
    pub const fn or(children: Vec<Self>) -> Self {
        Self::Or(children)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(child: Self) -> Self {
        Self::Not(Box::new(child))
    }

    /// Leaf comparison `key operator value`.
    #[must_use]
    pub fn compare(key: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self::Where(Operation::new(key, operator, value))
    }

    #[must_use]
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, Operator::Eq, value)
    }

    /// Quantifier leaf over a sequence field, with `body` evaluated per element.
    #[must_use]
    pub fn all(key: impl Into<String>, body: Self) -> Self {
        Self::compare(key, Operator::All, Value::from(body))
    }

    #[must_use]
    pub fn any(key: impl Into<String>, body: Self) -> Self {
        Self::compare(key, Operator::Any, Value::from(body))
    }

    /// Encode back to the wire shape.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let (key, body) = match self {
            Self::And(children) => ("and", children_json(children)),
            Self::Or(children) => ("or", children_json(children)),
            Self::Not(child) => ("not", child.to_json()),
            Self::Where(operation) => ("where", operation.to_json()),
        };

        let mut object = Map::new();
        object.insert(key.to_string(), body);

        JsonValue::Object(object)
    }
}

fn children_json(children: &[FilterNode]) -> JsonValue {
    JsonValue::Array(children.iter().map(FilterNode::to_json).collect())
}

impl Serialize for FilterNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(children) => write_group(f, "and", children),
            Self::Or(children) => write_group(f, "or", children),
            Self::Not(child) => write!(f, "not {child}"),
            Self::Where(operation) => write!(f, "{operation}"),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, label: &str, children: &[FilterNode]) -> fmt::Result {
    write!(f, "{label}(")?;
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}

///
/// Operation
///
/// Leaf comparison `{ key, operator, value }`.
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "WireOperation")]
pub struct Operation {
    pub key: String,
    pub operator: Operator,
    pub value: Value,
}

impl Operation {
    #[must_use]
    pub fn new(key: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            operator,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut object = Map::new();
        object.insert("key".to_string(), JsonValue::String(self.key.clone()));
        object.insert(
            "operator".to_string(),
            JsonValue::String(self.operator.wire_name().to_string()),
        );
        object.insert("value".to_string(), self.value.to_json());

        JsonValue::Object(object)
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.operator, self.value)
    }
}

///
/// WireFilter
///

#[derive(Deserialize)]
struct WireFilter {
    and: Option<Vec<FilterNode>>,
    or: Option<Vec<FilterNode>>,
    not: Option<Box<FilterNode>>,
    #[serde(rename = "where")]
    where_: Option<Operation>,
}

impl TryFrom<WireFilter> for FilterNode {
    type Error = DecodeError;

    fn try_from(wire: WireFilter) -> Result<Self, Self::Error> {
        match (wire.and, wire.or, wire.not, wire.where_) {
            (Some(children), None, None, None) => Ok(Self::And(children)),
            (None, Some(children), None, None) => Ok(Self::Or(children)),
            (None, None, Some(child), None) => Ok(Self::Not(child)),
            (None, None, None, Some(operation)) => Ok(Self::Where(operation)),
            (None, None, None, None) => Err(DecodeError::new(
                "filter has none of the keys `and`, `or`, `not`, `where`",
            )),
            _ => Err(DecodeError::new(
                "filter must carry exactly one of the keys `and`, `or`, `not`, `where`",
            )),
        }
    }
}

///
/// WireOperation
///

#[derive(Deserialize)]
struct WireOperation {
    key: String,
    operator: Operator,
    #[serde(default)]
    value: JsonValue,
}

impl TryFrom<WireOperation> for Operation {
    type Error = DecodeError;

    fn try_from(wire: WireOperation) -> Result<Self, Self::Error> {
        // quantifier operands are nested filters; any other shape stays a
        // scalar and is rejected later by handler dispatch
        let value = if wire.operator.is_quantifier() && wire.value.is_object() {
            let node = FilterNode::deserialize(wire.value).map_err(DecodeError::from)?;
            Value::from(node)
        } else {
            Value::from_json(wire.value)
        };

        Ok(Self {
            key: wire.key,
            operator: wire.operator,
            value,
        })
    }
}
