use super::common::{assert_well_formed_outcome, run};
use xmlassert::validate::XmlValidator;
use xmlassert::{AssertionConfig, AssertionOutcome, ConditionOperator as Op, XmlAssertion};

const XXE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE foo [ <!ENTITY xxe SYSTEM "file:///etc/passwd"> ]>
<r><code>&xxe;</code></r>"#;

// ─── blank bodies ───────────────────────────────────────────────────────────

#[test]
fn blank_body_is_vacuous_pass() {
    for body in ["", " ", "\n\t  \r\n"] {
        let outcome = run(body, "r.code", Op::Equals, "200");
        assert_eq!(outcome, AssertionOutcome::null_result());
        assert!(!outcome.is_error && !outcome.is_failure);
        assert_eq!(outcome.message.as_deref(), Some("null result"));
    }
}

#[test]
fn blank_body_skips_path_checks() {
    let config = AssertionConfig::new("$..code", Op::Equals)
        .with_expected("200")
        .definite(true);
    let outcome = xmlassert::assert_xml("   ", &config);
    assert!(outcome.is_success());
}

// ─── structural failures ────────────────────────────────────────────────────

#[test]
fn doctype_is_error_for_every_operator() {
    for op in Op::ALL {
        let outcome = run(XXE, "r.code", op, "root");
        assert!(outcome.is_error, "{:?} accepted a DTD", op);
        assert!(outcome.is_failure);
        assert_well_formed_outcome(&outcome);
    }
}

#[test]
fn doctype_is_error_even_with_bad_path() {
    let outcome = run(XXE, "a[", Op::Equals, "x");
    assert!(outcome.is_error && outcome.is_failure);
}

#[test]
fn malformed_body_reports_parser_diagnostic() {
    let body = "<r><code>200</r>";
    let outcome = run(body, "r.code", Op::Equals, "200");
    assert!(outcome.is_error && outcome.is_failure);

    let mut validator = XmlValidator::default();
    let diagnostic = validator.validate(body).err().unwrap().message;
    assert_eq!(outcome.message.as_deref(), Some(diagnostic.as_str()));
}

#[test]
fn json_body_is_rejected() {
    let outcome = run(r#"{"code": 200}"#, "code", Op::Equals, "200");
    assert!(outcome.is_error);
}

// ─── end-to-end ─────────────────────────────────────────────────────────────

#[test]
fn matching_value_passes() {
    let outcome = run("<r><code>200</code></r>", "r.code", Op::Equals, "200");
    assert_eq!(outcome, AssertionOutcome::passed());
}

#[test]
fn mismatching_value_fails_with_actual_and_expected() {
    let outcome = run("<r><code>200</code></r>", "r.code", Op::Equals, "201");
    assert!(!outcome.is_error);
    assert!(outcome.is_failure);
    let message = outcome.message.unwrap();
    assert!(message.contains("200"), "{}", message);
    assert!(message.contains("201"), "{}", message);
}

#[test]
fn folded_array_index_round_trip() {
    let outcome = run("<a><b>1</b><b>2</b></a>", "a.b[0]", Op::Equals, "1");
    assert!(outcome.is_success());
    let outcome = run("<a><b>1</b><b>2</b></a>", "$.a.b[1]", Op::Equals, "2");
    assert!(outcome.is_success());
}

#[test]
fn attribute_values_are_addressable() {
    let body = r#"<resp status="ok"><items count="2"><item>a</item><item>b</item></items></resp>"#;
    assert!(run(body, "resp.status", Op::Equals, "ok").is_success());
    assert!(run(body, "resp.items.count", Op::Gte, "2").is_success());
    assert!(run(body, "resp.items.item", Op::SizeEquals, "2").is_success());
    assert!(run(body, "resp.items.item[*]", Op::Contains, "b").is_success());
}

#[test]
fn missing_node_is_failure_not_error() {
    let outcome = run("<r><code>200</code></r>", "r.status", Op::Equals, "200");
    assert!(!outcome.is_error);
    assert!(outcome.is_failure);
    assert!(outcome.message.unwrap().contains("<absent>"));
}

#[test]
fn missing_node_satisfies_empty() {
    let config = AssertionConfig::new("r.status", Op::Empty);
    assert!(xmlassert::assert_xml("<r><code>200</code></r>", &config).is_success());

    let config = AssertionConfig::new("r.status", Op::NotEmpty);
    let outcome = xmlassert::assert_xml("<r><code>200</code></r>", &config);
    assert!(outcome.is_failure && !outcome.is_error);
    assert!(outcome.message.unwrap().contains("not_empty"));
}

#[test]
fn non_numeric_comparison_is_error() {
    let outcome = run("<r><v>abc</v></r>", "r.v", Op::Gt, "5");
    assert!(outcome.is_error && outcome.is_failure);
    assert!(outcome.message.unwrap().contains("abc"));
}

#[test]
fn invalid_regex_is_error() {
    let outcome = run("<r><v>abc</v></r>", "r.v", Op::Regex, "[a-");
    assert!(outcome.is_error && outcome.is_failure);
}

#[test]
fn missing_expected_value_is_error() {
    let config = AssertionConfig::new("r.v", Op::Equals);
    let outcome = xmlassert::assert_xml("<r><v>abc</v></r>", &config);
    assert!(outcome.is_error);
}

#[test]
fn invalid_path_is_error() {
    let outcome = run("<r><v>abc</v></r>", "r.v[", Op::Equals, "abc");
    assert!(outcome.is_error && outcome.is_failure);
    assert!(outcome.message.unwrap().contains("r.v["));
}

// ─── definiteness gate ──────────────────────────────────────────────────────

#[test]
fn indefinite_path_rejected_when_definite_required() {
    let bodies = [
        "<r><code>200</code></r>",
        "<r><other/></r>",
        "<r><code>1</code><code>2</code></r>",
    ];
    for body in bodies {
        for path in ["$..code", "r.code[*]", "r.*", "r.code[0,1]"] {
            let config = AssertionConfig::new(path, Op::Uncheck).definite(true);
            let outcome = xmlassert::assert_xml(body, &config);
            assert!(outcome.is_error && outcome.is_failure, "{} on {}", path, body);
            assert!(outcome.message.unwrap().contains("not definite"));
        }
    }
}

#[test]
fn indefinite_path_allowed_by_default() {
    let config = AssertionConfig::new("$..code", Op::Equals).with_expected("200");
    assert!(xmlassert::assert_xml("<r><code>200</code></r>", &config).is_success());
}

#[test]
fn definite_path_passes_gate() {
    let config = AssertionConfig::new("r.code", Op::Equals)
        .with_expected("200")
        .definite(true);
    assert!(xmlassert::assert_xml("<r><code>200</code></r>", &config).is_success());
}

// ─── reuse ──────────────────────────────────────────────────────────────────

#[test]
fn repeated_evaluation_is_idempotent() {
    let assertion = XmlAssertion::new(
        AssertionConfig::new("r.code", Op::Equals).with_expected("201"),
    );
    let mut validator = XmlValidator::default();
    for body in ["<r><code>200</code></r>", "<r><code>201</code></r>", "<r>", "", XXE] {
        let first = assertion.evaluate(body, &mut validator);
        let second = assertion.evaluate(body, &mut validator);
        assert_eq!(first, second, "outcomes differ for {:?}", body);
        assert_well_formed_outcome(&first);
    }
}

#[test]
fn parse_error_does_not_leak_into_next_evaluation() {
    let assertion = XmlAssertion::new(
        AssertionConfig::new("r.code", Op::Equals).with_expected("200"),
    );
    let mut validator = XmlValidator::default();
    assert!(assertion.evaluate("<r><code>", &mut validator).is_error);
    assert!(assertion.evaluate("<r><code>200</code></r>", &mut validator).is_success());
}

#[test]
fn outcome_serializes_without_empty_message() {
    let json = serde_json::to_value(AssertionOutcome::passed()).unwrap();
    assert_eq!(json, serde_json::json!({"is_error": false, "is_failure": false}));
}
