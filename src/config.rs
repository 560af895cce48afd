//! Assertion definitions and their YAML loading.

use crate::enums::ConditionOperator;
use crate::error::{ConfigError, ConfigErrorKind};
use serde::{Deserialize, Serialize};

/// One XML assertion as configured in a test plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssertionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path_expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
    pub condition: ConditionOperator,
    /// Reject path expressions that could match more than one node.
    #[serde(default)]
    pub definite_required: bool,
}

impl AssertionConfig {
    pub fn new(path_expression: impl Into<String>, condition: ConditionOperator) -> Self {
        AssertionConfig {
            name: None,
            path_expression: path_expression.into(),
            expected_value: None,
            condition,
            definite_required: false,
        }
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected_value = Some(expected.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn definite(mut self, required: bool) -> Self {
        self.definite_required = required;
        self
    }
}

/// Settings for the per-worker structural validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorSettings {
    /// Upper bound on the nodes built for one document.
    #[serde(default = "default_nodes_limit")]
    pub nodes_limit: u32,
}

fn default_nodes_limit() -> u32 {
    u32::MAX
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        ValidatorSettings {
            nodes_limit: default_nodes_limit(),
        }
    }
}

/// A set of assertions sharing validator settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssertionSuite {
    #[serde(default)]
    pub validator: ValidatorSettings,
    #[serde(default)]
    pub assertions: Vec<AssertionConfig>,
}

/// Parses a YAML assertion suite.
pub fn parse_suite(input: &str) -> Result<AssertionSuite, ConfigError> {
    from_yaml(input)
}

/// Parses a single YAML assertion definition.
pub fn parse_assertion(input: &str) -> Result<AssertionConfig, ConfigError> {
    from_yaml(input)
}

fn from_yaml<T: serde::de::DeserializeOwned>(input: &str) -> Result<T, ConfigError> {
    if input.trim().is_empty() {
        return Err(ConfigError {
            kind: ConfigErrorKind::Syntax,
            message: "empty input".to_string(),
        });
    }

    serde_saphyr::from_str(input).map_err(|e| {
        let message = e.to_string();
        ConfigError {
            kind: classify_error(&message),
            message,
        }
    })
}

fn classify_error(msg: &str) -> ConfigErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown condition")
        || lower.contains("unknown field")
        || lower.contains("unknown variant")
    {
        ConfigErrorKind::UnknownVariant
    } else if lower.contains("missing field")
        || lower.contains("invalid type")
        || lower.contains("expected")
    {
        ConfigErrorKind::TypeMismatch
    } else {
        ConfigErrorKind::Syntax
    }
}
