//! Path expressions over the canonical tree.
//!
//! Expressions use the dotted dialect common in HTTP test tooling: the `$`
//! root is optional (`r.code` means `$.r.code`) and dot-separated names may
//! contain any character other than `.` and `[`, so XML names such as
//! `status-code` or `soap:Body` need no quoting. Whitespace around a dotted
//! name is ignored. Each expression is rewritten
//! to RFC 9535 bracket notation and compiled with `serde_json_path`.
//!
//! Definiteness is read off the syntax alone: a deep scan (`..`), wildcard
//! (`*`), filter (`?`), slice (`:`) or union (`,`) makes an expression
//! indefinite.

use crate::error::PathError;
use crate::types::{CanonicalNode, ExtractedValue};
use serde_json_path::JsonPath;

/// A compiled path expression.
#[derive(Clone, Debug)]
pub struct PathExpression {
    source: String,
    normalized: String,
    definite: bool,
    compiled: JsonPath,
}

impl PathExpression {
    /// Compiles `expression`, deriving its definiteness.
    pub fn parse(expression: &str) -> Result<PathExpression, PathError> {
        let scanned = scan(expression)?;
        let compiled = JsonPath::parse(&scanned.normalized).map_err(|e| PathError::InvalidSyntax {
            expression: expression.to_string(),
            message: e.to_string(),
        })?;
        Ok(PathExpression {
            source: expression.to_string(),
            normalized: scanned.normalized,
            definite: scanned.definite,
            compiled,
        })
    }

    /// The expression as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The RFC 9535 form actually evaluated.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True iff the expression can match at most one node.
    pub fn is_definite(&self) -> bool {
        self.definite
    }
}

/// Evaluates `path` against `tree`.
///
/// A definite expression yields [`ExtractedValue::Single`] or
/// [`PathError::NoMatch`]; an indefinite one always yields
/// [`ExtractedValue::Many`] in document order.
pub fn extract(tree: &CanonicalNode, path: &PathExpression) -> Result<ExtractedValue, PathError> {
    let root = tree.to_value();
    let nodes = path.compiled.query(&root);

    if path.definite {
        match nodes.first() {
            Some(value) => Ok(ExtractedValue::Single(value.clone())),
            None => Err(PathError::NoMatch {
                expression: path.source.clone(),
            }),
        }
    } else {
        Ok(ExtractedValue::Many(nodes.iter().map(|v| (*v).clone()).collect()))
    }
}

// ─── Dialect scanner ────────────────────────────────────────────────────────

struct Scanned {
    normalized: String,
    definite: bool,
}

fn scan(expression: &str) -> Result<Scanned, PathError> {
    let invalid = |message: &str| PathError::InvalidSyntax {
        expression: expression.to_string(),
        message: message.to_string(),
    };

    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty path expression"));
    }

    // Bare names start with an implicit child step.
    let body: String = if let Some(rest) = trimmed.strip_prefix('$') {
        rest.to_string()
    } else if trimmed.starts_with('[') || trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    };

    let chars: Vec<char> = body.chars().collect();
    let mut out = String::from("$");
    let mut definite = true;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '.' => {
                let descendant = chars.get(i + 1) == Some(&'.');
                if descendant {
                    definite = false;
                    out.push_str("..");
                    i += 2;
                } else {
                    i += 1;
                }

                match chars.get(i) {
                    Some('*') => {
                        definite = false;
                        out.push_str(if descendant { "*" } else { ".*" });
                        i += 1;
                    }
                    // `..[` continues with a bracket selector.
                    Some('[') if descendant => {}
                    _ => {
                        let start = i;
                        while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                            i += 1;
                        }
                        let name: String = chars[start..i].iter().collect();
                        let name = name.trim();
                        if name.is_empty() {
                            return Err(invalid("empty name after '.'"));
                        }
                        out.push_str("['");
                        out.push_str(&escape_name(name));
                        out.push_str("']");
                    }
                }
            }
            '[' => {
                let end = matching_bracket(&chars, i).ok_or_else(|| invalid("unclosed '['"))?;
                let inner: String = chars[i + 1..end].iter().collect();
                if !selector_is_definite(&inner) {
                    definite = false;
                }
                out.push('[');
                out.push_str(&inner);
                out.push(']');
                i = end + 1;
            }
            c => {
                return Err(invalid(&format!("unexpected character '{}'", c)));
            }
        }
    }

    Ok(Scanned {
        normalized: out,
        definite,
    })
}

/// Index of the `]` closing the `[` at `open`, honouring quotes and nesting.
fn matching_bracket(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut i = open;
    while i < chars.len() {
        let c = chars[i];
        match quote {
            Some(q) => {
                if c == '\\' {
                    i += 1;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// A bracket selector is definite when it is one name or one index.
fn selector_is_definite(inner: &str) -> bool {
    let trimmed = inner.trim();
    if trimmed.starts_with('?') || trimmed == "*" {
        return false;
    }

    let mut quote: Option<char> = None;
    let mut chars = trimmed.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                ',' | ':' => return false,
                _ => {}
            },
        }
    }
    true
}

fn escape_name(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\'', "\\'")
}
