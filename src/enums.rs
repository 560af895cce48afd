//! Closed enumerations used by assertion definitions.
//!
//! Only the defined variants are valid. Names are matched case-insensitively
//! so that harness-style upper-case names (`EQUALS`, `NOT_EMPTY`) load as well.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Comparison applied between the extracted value and the expected string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionOperator {
    Uncheck,
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Regex,
    NotRegex,
    Gt,
    Gte,
    Lt,
    Lte,
    Empty,
    NotEmpty,
    SizeEquals,
    SizeNotEquals,
    SizeGt,
    SizeLt,
}

impl ConditionOperator {
    /// Every operator, in dispatch-table order.
    pub const ALL: [ConditionOperator; 19] = [
        ConditionOperator::Uncheck,
        ConditionOperator::Equals,
        ConditionOperator::NotEquals,
        ConditionOperator::Contains,
        ConditionOperator::NotContains,
        ConditionOperator::StartsWith,
        ConditionOperator::EndsWith,
        ConditionOperator::Regex,
        ConditionOperator::NotRegex,
        ConditionOperator::Gt,
        ConditionOperator::Gte,
        ConditionOperator::Lt,
        ConditionOperator::Lte,
        ConditionOperator::Empty,
        ConditionOperator::NotEmpty,
        ConditionOperator::SizeEquals,
        ConditionOperator::SizeNotEquals,
        ConditionOperator::SizeGt,
        ConditionOperator::SizeLt,
    ];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        crate::condition::operator_spec(self).name
    }

    /// Number of operands the operator consumes.
    pub fn arity(self) -> Arity {
        crate::condition::operator_spec(self).arity
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConditionOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConditionOperator::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| format!("unknown condition: '{}'", s))
    }
}

impl Serialize for ConditionOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ConditionOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Operand arity of a condition operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// Only the extracted value is consulted.
    Unary,
    /// The extracted value is compared against the expected string.
    Binary,
}
