//! Assertion coordination: runs one response body through validation,
//! transcoding, extraction and comparison, and maps every stage failure to a
//! terminal [`AssertionOutcome`].
//!
//! ```text
//! Start → TextChecked → StructureChecked → Transcoded → Extracted → Evaluated → Done
//! ```
//!
//! Severity policy:
//! - blank body: not a failure (`null result`);
//! - malformed or disallowed markup, bad path, indefinite path when a
//!   definite one is required, comparison errors: `is_error` and `is_failure`;
//! - condition evaluated and not satisfied: `is_failure` only.

use crate::condition;
use crate::config::{AssertionConfig, ValidatorSettings};
use crate::enums::Arity;
use crate::error::PathError;
use crate::path::{PathExpression, extract};
use crate::transcode::transcode;
use crate::types::{AssertionOutcome, ExtractedValue};
use crate::validate::XmlValidator;
use crate::worker::{ValidatorTable, WorkerId, with_thread_validator};
use std::fmt;
use tracing::{debug, error, info, warn};

/// Pipeline stage reached by an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Start,
    TextChecked,
    StructureChecked,
    Transcoded,
    Extracted,
    Evaluated,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::TextChecked => "text_checked",
            Stage::StructureChecked => "structure_checked",
            Stage::Transcoded => "transcoded",
            Stage::Extracted => "extracted",
            Stage::Evaluated => "evaluated",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// A configured XML assertion, reusable across many responses.
#[derive(Clone, Debug)]
pub struct XmlAssertion {
    config: AssertionConfig,
    settings: ValidatorSettings,
    path: Result<PathExpression, PathError>,
}

impl XmlAssertion {
    /// Builds an assertion. A malformed path expression is kept and reported
    /// as an error outcome on every evaluation.
    pub fn new(config: AssertionConfig) -> Self {
        XmlAssertion::with_settings(config, ValidatorSettings::default())
    }

    pub fn with_settings(config: AssertionConfig, settings: ValidatorSettings) -> Self {
        let path = PathExpression::parse(&config.path_expression);
        XmlAssertion {
            config,
            settings,
            path,
        }
    }

    pub fn config(&self) -> &AssertionConfig {
        &self.config
    }

    pub fn settings(&self) -> &ValidatorSettings {
        &self.settings
    }

    fn label(&self) -> &str {
        self.config.name.as_deref().unwrap_or("xml assertion")
    }

    /// Evaluates `body` using the given validator handle.
    pub fn evaluate(&self, body: &str, validator: &mut XmlValidator) -> AssertionOutcome {
        let outcome = self.run(body, validator);
        debug!(
            assertion = self.label(),
            stage = %Stage::Done,
            is_error = outcome.is_error,
            is_failure = outcome.is_failure,
            "assertion finished"
        );
        outcome
    }

    /// Evaluates `body` with the handle `table` holds for `worker`.
    pub fn evaluate_for(
        &self,
        worker: WorkerId,
        table: &mut ValidatorTable,
        body: &str,
    ) -> AssertionOutcome {
        let validator = table.acquire(worker, &self.settings);
        self.evaluate(body, validator)
    }

    /// Evaluates `body` with the calling thread's handle.
    ///
    /// Pair with [`crate::worker::thread_finished`] when the thread is done.
    pub fn evaluate_on_current_thread(&self, body: &str) -> AssertionOutcome {
        with_thread_validator(&self.settings, |validator| self.evaluate(body, validator))
    }

    fn run(&self, body: &str, validator: &mut XmlValidator) -> AssertionOutcome {
        if body.trim().is_empty() {
            info!(assertion = self.label(), "response body is blank");
            return AssertionOutcome::null_result();
        }
        debug!(stage = %Stage::TextChecked);

        let document = match validator.validate(body) {
            Ok(document) => document,
            Err(e) => {
                debug!(kind = ?e.kind, line = ?e.line, column = ?e.column, "response body rejected");
                return AssertionOutcome::errored(e.message);
            }
        };
        for warning in &document.warnings {
            warn!(assertion = self.label(), code = %warning.code, "{}", warning.message);
        }
        debug!(stage = %Stage::StructureChecked);

        let tree = transcode(&document);
        debug!(stage = %Stage::Transcoded);

        let path = match &self.path {
            Ok(path) => path,
            Err(e) => return AssertionOutcome::errored(e.to_string()),
        };
        if self.config.definite_required && !path.is_definite() {
            let e = PathError::IndefiniteExpression {
                expression: path.as_str().to_string(),
            };
            error!(assertion = self.label(), "{}", e);
            return AssertionOutcome::errored(e.to_string());
        }

        let actual = match extract(&tree, path) {
            Ok(value) => value,
            Err(PathError::NoMatch { .. }) => ExtractedValue::Absent,
            Err(e) => return AssertionOutcome::errored(e.to_string()),
        };
        debug!(stage = %Stage::Extracted, actual = %actual);

        let expected = self.config.expected_value.as_deref();
        let satisfied = match condition::evaluate(&actual, self.config.condition, expected) {
            Ok(satisfied) => satisfied,
            Err(e) => return AssertionOutcome::errored(e.to_string()),
        };
        debug!(stage = %Stage::Evaluated, satisfied);

        if satisfied {
            AssertionOutcome::passed()
        } else {
            AssertionOutcome::failed(self.describe_mismatch(&actual))
        }
    }

    fn describe_mismatch(&self, actual: &ExtractedValue) -> String {
        let condition = self.config.condition;
        match condition.arity() {
            Arity::Unary => format!(
                "{}: expected value to be {}, but found '{}'",
                self.config.path_expression, condition, actual
            ),
            Arity::Binary => format!(
                "{}: expected value {} '{}', but found '{}'",
                self.config.path_expression,
                condition,
                self.config.expected_value.as_deref().unwrap_or_default(),
                actual
            ),
        }
    }
}
