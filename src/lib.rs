//! Assertions over XML response bodies.
//!
//! A response body is checked in four stages, each of which can end the
//! evaluation on its own:
//!
//! ```text
//! body → validate (well-formed, no DTD) → transcode (canonical tree)
//!      → extract (path expression) → condition (operator vs expected)
//!      → AssertionOutcome { is_error, is_failure, message }
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use xmlassert::{AssertionConfig, ConditionOperator};
//!
//! let config = AssertionConfig::new("r.code", ConditionOperator::Equals).with_expected("200");
//! let outcome = xmlassert::assert_xml("<r><code>200</code></r>", &config);
//! assert!(outcome.is_success());
//! ```
//!
//! Harnesses that evaluate many responses per worker keep an
//! [`XmlAssertion`] and one [`validate::XmlValidator`] per worker, either
//! through [`worker::ValidatorTable`] or the thread-bound helpers in
//! [`worker`].

pub mod condition;
pub mod config;
pub mod enums;
pub mod error;
pub mod evaluate;
pub mod mock;
pub mod path;
pub mod transcode;
pub mod types;
pub mod validate;
pub mod worker;

pub use config::{AssertionConfig, AssertionSuite, ValidatorSettings};
pub use enums::*;
pub use error::*;
pub use evaluate::XmlAssertion;
pub use types::*;

/// Evaluates one body against one assertion with a fresh validator.
///
/// # Example
///
/// ```rust
/// use xmlassert::{AssertionConfig, ConditionOperator};
///
/// let config = AssertionConfig::new("r.code", ConditionOperator::Equals).with_expected("201");
/// let outcome = xmlassert::assert_xml("<r><code>200</code></r>", &config);
/// assert!(outcome.is_failure && !outcome.is_error);
/// ```
pub fn assert_xml(body: &str, config: &AssertionConfig) -> AssertionOutcome {
    let assertion = XmlAssertion::new(config.clone());
    let mut validator = validate::XmlValidator::new(assertion.settings());
    assertion.evaluate(body, &mut validator)
}
