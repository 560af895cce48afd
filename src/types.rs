use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

// ─── CanonicalNode ──────────────────────────────────────────────────────────

/// Canonical tree built from a well-formed document.
///
/// Objects keep document order. A name that occurs more than once inside one
/// element is folded into a single [`CanonicalNode::Array`] entry, so the
/// names of an object are unique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanonicalNode {
    Scalar(String),
    Object(Vec<(String, CanonicalNode)>),
    Array(Vec<CanonicalNode>),
}

impl CanonicalNode {
    /// Looks up a named entry of an object node.
    pub fn get(&self, name: &str) -> Option<&CanonicalNode> {
        match self {
            CanonicalNode::Object(entries) => {
                entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            CanonicalNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CanonicalNode]> {
        match self {
            CanonicalNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Converts the tree into a JSON value for path queries.
    pub fn to_value(&self) -> Value {
        match self {
            CanonicalNode::Scalar(s) => Value::String(s.clone()),
            CanonicalNode::Array(items) => {
                Value::Array(items.iter().map(CanonicalNode::to_value).collect())
            }
            CanonicalNode::Object(entries) => {
                let mut map = serde_json::Map::with_capacity(entries.len());
                for (name, node) in entries {
                    map.insert(name.clone(), node.to_value());
                }
                Value::Object(map)
            }
        }
    }
}

impl Serialize for CanonicalNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};
        match self {
            CanonicalNode::Scalar(s) => serializer.serialize_str(s),
            CanonicalNode::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            CanonicalNode::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (name, node) in entries {
                    map.serialize_entry(name, node)?;
                }
                map.end()
            }
        }
    }
}

// ─── ExtractedValue ─────────────────────────────────────────────────────────

/// Result of applying a path expression to a canonical tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ExtractedValue {
    /// A definite expression matched nothing.
    Absent,
    /// A definite expression matched one node.
    Single(Value),
    /// An indefinite expression; matches in document order, possibly none.
    Many(Vec<Value>),
}

impl ExtractedValue {
    /// The matched values a per-element comparison iterates over.
    pub fn candidates(&self) -> &[Value] {
        match self {
            ExtractedValue::Absent => &[],
            ExtractedValue::Single(v) => std::slice::from_ref(v),
            ExtractedValue::Many(values) => values,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ExtractedValue::Absent)
    }
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractedValue::Absent => f.write_str("<absent>"),
            ExtractedValue::Single(v) => f.write_str(&render_value(v)),
            ExtractedValue::Many(values) => {
                let array = Value::Array(values.clone());
                f.write_str(&serde_json::to_string(&array).unwrap_or_default())
            }
        }
    }
}

/// String rendering of a matched value: strings as-is, everything else as
/// compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

// ─── AssertionOutcome ───────────────────────────────────────────────────────

/// Message reported when the response body is blank.
pub const NULL_RESULT_MESSAGE: &str = "null result";

/// Verdict for one evaluation of an assertion against one response.
///
/// `is_error` implies `is_failure`, and a failure always carries a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionOutcome {
    pub is_error: bool,
    pub is_failure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AssertionOutcome {
    /// The response satisfied the condition.
    pub fn passed() -> Self {
        AssertionOutcome {
            is_error: false,
            is_failure: false,
            message: None,
        }
    }

    /// The response body was blank; nothing to evaluate.
    pub fn null_result() -> Self {
        AssertionOutcome {
            is_error: false,
            is_failure: false,
            message: Some(NULL_RESULT_MESSAGE.to_string()),
        }
    }

    /// The assertion was evaluated and did not hold.
    pub fn failed(message: impl Into<String>) -> Self {
        AssertionOutcome {
            is_error: false,
            is_failure: true,
            message: Some(message.into()),
        }
    }

    /// The assertion could not be evaluated.
    pub fn errored(message: impl Into<String>) -> Self {
        AssertionOutcome {
            is_error: true,
            is_failure: true,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.is_error && !self.is_failure
    }
}
