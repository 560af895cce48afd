//! Mock-value function boundary.
//!
//! A test step may ask the harness for a generated value (a fake name, a
//! random number) and publish it under a variable for later steps. Value
//! generation belongs to the host; this module only fixes the contract and
//! the publish-then-return behaviour.

use std::collections::HashMap;

/// Extension point for generating a value from a free-text specification.
pub trait MockSynthesizer {
    fn synthesize(&self, spec: &str) -> String;
}

/// Harness-owned variable namespace shared by later steps.
pub trait VariableStore {
    fn put_variable(&mut self, name: &str, value: &str);
}

impl VariableStore for HashMap<String, String> {
    fn put_variable(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

impl<F: Fn(&str) -> String> MockSynthesizer for F {
    fn synthesize(&self, spec: &str) -> String {
        self(spec)
    }
}

/// Generates a value for `spec` and publishes it under the trimmed spec.
///
/// Returns an empty string without generating anything when the spec is blank
/// or no variable store is available (for instance while a plan is loaded).
pub fn mock_value(
    spec: &str,
    synthesizer: &dyn MockSynthesizer,
    variables: Option<&mut dyn VariableStore>,
) -> String {
    let name = spec.trim();
    match variables {
        Some(vars) if !name.is_empty() => {
            let value = synthesizer.synthesize(name);
            vars.put_variable(name, &value);
            value
        }
        _ => String::new(),
    }
}
