//! Condition evaluation: one comparison function per operator.
//!
//! Operators are dispatched through a static table indexed by the
//! [`ConditionOperator`] variant. Adding an operator means adding a variant
//! and its table entry.
//!
//! String operators render each matched value (strings as-is, other values as
//! compact JSON) and succeed when any matched value satisfies them. Negated
//! operators are the complement of their positive form over the whole
//! extracted value, so `not_contains` holds only when no match contains the
//! expected text.

use crate::enums::Arity::{Binary, Unary};
use crate::enums::ConditionOperator as Op;
use crate::enums::{Arity, ConditionOperator};
use crate::error::CompareError;
use crate::types::{ExtractedValue, render_value};
use bigdecimal::BigDecimal;
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;

/// Comparison between an extracted value and the expected operand.
///
/// Unary operators receive an empty expected string and ignore it.
pub type CompareFn = fn(&ExtractedValue, &str) -> Result<bool, CompareError>;

/// Dispatch-table entry for one operator.
pub struct OperatorSpec {
    pub operator: ConditionOperator,
    pub name: &'static str,
    pub arity: Arity,
    pub compare: CompareFn,
}

const fn entry(
    operator: ConditionOperator,
    name: &'static str,
    arity: Arity,
    compare: CompareFn,
) -> OperatorSpec {
    OperatorSpec {
        operator,
        name,
        arity,
        compare,
    }
}

/// Entries are in declaration order of [`ConditionOperator`].
static OPERATORS: [OperatorSpec; 19] = [
    entry(Op::Uncheck, "uncheck", Unary, uncheck),
    entry(Op::Equals, "equals", Binary, equals),
    entry(Op::NotEquals, "not_equals", Binary, not_equals),
    entry(Op::Contains, "contains", Binary, contains),
    entry(Op::NotContains, "not_contains", Binary, not_contains),
    entry(Op::StartsWith, "starts_with", Binary, starts_with),
    entry(Op::EndsWith, "ends_with", Binary, ends_with),
    entry(Op::Regex, "regex", Binary, regex_matches),
    entry(Op::NotRegex, "not_regex", Binary, not_regex_matches),
    entry(Op::Gt, "gt", Binary, gt),
    entry(Op::Gte, "gte", Binary, gte),
    entry(Op::Lt, "lt", Binary, lt),
    entry(Op::Lte, "lte", Binary, lte),
    entry(Op::Empty, "empty", Unary, empty),
    entry(Op::NotEmpty, "not_empty", Unary, not_empty),
    entry(Op::SizeEquals, "size_equals", Binary, size_equals),
    entry(Op::SizeNotEquals, "size_not_equals", Binary, size_not_equals),
    entry(Op::SizeGt, "size_gt", Binary, size_gt),
    entry(Op::SizeLt, "size_lt", Binary, size_lt),
];

/// Looks up the dispatch-table entry for `operator`.
pub fn operator_spec(operator: ConditionOperator) -> &'static OperatorSpec {
    &OPERATORS[operator as usize]
}

/// Applies `operator` to `value` and `expected`.
///
/// Binary operators fail with [`CompareError::MissingExpected`] when
/// `expected` is `None`; unary operators never look at it.
pub fn evaluate(
    value: &ExtractedValue,
    operator: ConditionOperator,
    expected: Option<&str>,
) -> Result<bool, CompareError> {
    let spec = operator_spec(operator);
    let expected = match (spec.arity, expected) {
        (Arity::Unary, _) => "",
        (Arity::Binary, Some(e)) => e,
        (Arity::Binary, None) => {
            return Err(CompareError::MissingExpected {
                operator: spec.name.to_string(),
            });
        }
    };
    (spec.compare)(value, expected)
}

// ─── String operators ───────────────────────────────────────────────────────

fn any_rendered(value: &ExtractedValue, mut pred: impl FnMut(&str) -> bool) -> bool {
    value.candidates().iter().any(|v| pred(&render_value(v)))
}

fn uncheck(_: &ExtractedValue, _: &str) -> Result<bool, CompareError> {
    Ok(true)
}

fn equals(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    Ok(any_rendered(value, |s| s == expected))
}

fn not_equals(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    equals(value, expected).map(|b| !b)
}

fn contains(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    Ok(any_rendered(value, |s| s.contains(expected)))
}

fn not_contains(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    contains(value, expected).map(|b| !b)
}

fn starts_with(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    Ok(any_rendered(value, |s| s.starts_with(expected)))
}

fn ends_with(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    Ok(any_rendered(value, |s| s.ends_with(expected)))
}

/// Compiles `pattern` for whole-value matching.
fn compile_pattern(pattern: &str) -> Result<Regex, CompareError> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| CompareError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn regex_matches(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    let re = compile_pattern(expected)?;
    Ok(any_rendered(value, |s| re.is_match(s)))
}

fn not_regex_matches(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    regex_matches(value, expected).map(|b| !b)
}

// ─── Numeric operators ──────────────────────────────────────────────────────

/// Parses a decimal operand with arbitrary precision; scientific notation is
/// accepted. Digits are never rounded away.
pub fn parse_decimal(operand: &str) -> Result<BigDecimal, CompareError> {
    operand
        .trim()
        .parse::<BigDecimal>()
        .map_err(|_| CompareError::NotNumeric {
            operand: operand.to_string(),
        })
}

fn compare_numeric(
    value: &ExtractedValue,
    expected: &str,
    accept: fn(Ordering) -> bool,
) -> Result<bool, CompareError> {
    let threshold = parse_decimal(expected)?;
    let candidates = value.candidates();
    if candidates.is_empty() {
        return Err(CompareError::NotNumeric {
            operand: value.to_string(),
        });
    }

    let mut satisfied = false;
    for candidate in candidates {
        let actual = parse_decimal(&render_value(candidate))?;
        satisfied |= accept(actual.cmp(&threshold));
    }
    Ok(satisfied)
}

fn gt(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    compare_numeric(value, expected, Ordering::is_gt)
}

fn gte(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    compare_numeric(value, expected, Ordering::is_ge)
}

fn lt(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    compare_numeric(value, expected, Ordering::is_lt)
}

fn lte(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    compare_numeric(value, expected, Ordering::is_le)
}

// ─── Presence and size ──────────────────────────────────────────────────────

fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn empty(value: &ExtractedValue, _: &str) -> Result<bool, CompareError> {
    Ok(match value {
        ExtractedValue::Absent => true,
        ExtractedValue::Single(v) => value_is_empty(v),
        ExtractedValue::Many(values) => values.is_empty(),
    })
}

fn not_empty(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    empty(value, expected).map(|b| !b)
}

/// Length used by the size operators.
pub fn size_of(value: &ExtractedValue) -> usize {
    match value {
        ExtractedValue::Absent => 0,
        ExtractedValue::Many(values) => values.len(),
        ExtractedValue::Single(v) => match v {
            Value::Array(a) => a.len(),
            Value::Object(o) => o.len(),
            Value::String(s) => s.chars().count(),
            other => render_value(other).chars().count(),
        },
    }
}

fn compare_size(
    value: &ExtractedValue,
    expected: &str,
    operator: ConditionOperator,
    accept: fn(Ordering) -> bool,
) -> Result<bool, CompareError> {
    let wanted: usize = expected
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| CompareError::InvalidExpected {
            operator: operator.name().to_string(),
            expected: expected.to_string(),
            message: e.to_string(),
        })?;
    Ok(accept(size_of(value).cmp(&wanted)))
}

fn size_equals(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    compare_size(value, expected, Op::SizeEquals, Ordering::is_eq)
}

fn size_not_equals(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    compare_size(value, expected, Op::SizeNotEquals, Ordering::is_ne)
}

fn size_gt(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    compare_size(value, expected, Op::SizeGt, Ordering::is_gt)
}

fn size_lt(value: &ExtractedValue, expected: &str) -> Result<bool, CompareError> {
    compare_size(value, expected, Op::SizeLt, Ordering::is_lt)
}
