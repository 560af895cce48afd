use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A structured diagnostic collected while validating a response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} (line {}): {}", self.code, line, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Error kind for structural parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// The markup is not well-formed.
    Syntax,
    /// The document carries a document-type declaration.
    DoctypeForbidden,
    /// The document exceeds the configured node budget.
    NodesLimit,
}

/// Produced by the structure validator when a response body is rejected.
///
/// `message` is the parser's own diagnostic and is reported verbatim to the
/// harness user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Produced when a path expression cannot be compiled or applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathError {
    /// The expression itself is malformed.
    InvalidSyntax { expression: String, message: String },
    /// Definite-only semantics were requested for an indefinite expression.
    IndefiniteExpression { expression: String },
    /// A definite expression matched nothing.
    NoMatch { expression: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidSyntax {
                expression,
                message,
            } => write!(f, "invalid path expression '{}': {}", expression, message),
            PathError::IndefiniteExpression { expression } => {
                write!(f, "path expression is not definite: '{}'", expression)
            }
            PathError::NoMatch { expression } => {
                write!(f, "no results for path: '{}'", expression)
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Produced by the condition evaluator when a comparison cannot be carried out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompareError {
    /// An operand of a numeric operator is not a decimal number.
    NotNumeric { operand: String },
    /// The expected value of a regex operator does not compile.
    InvalidPattern { pattern: String, message: String },
    /// A binary operator was given no expected value.
    MissingExpected { operator: String },
    /// The expected value has the wrong shape for the operator.
    InvalidExpected {
        operator: String,
        expected: String,
        message: String,
    },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::NotNumeric { operand } => {
                write!(f, "value '{}' is not a number", operand)
            }
            CompareError::InvalidPattern { pattern, message } => {
                write!(f, "invalid regular expression '{}': {}", pattern, message)
            }
            CompareError::MissingExpected { operator } => {
                write!(f, "condition '{}' requires an expected value", operator)
            }
            CompareError::InvalidExpected {
                operator,
                expected,
                message,
            } => write!(
                f,
                "invalid expected value '{}' for condition '{}': {}",
                expected, operator, message
            ),
        }
    }
}

impl std::error::Error for CompareError {}

/// Error kind for configuration loading failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigErrorKind {
    Syntax,
    TypeMismatch,
    UnknownVariant,
}

/// Produced when an assertion definition cannot be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigError {}
