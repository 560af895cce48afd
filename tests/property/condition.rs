use proptest::prelude::*;
use serde_json::Value;
use xmlassert::condition::evaluate;
use xmlassert::{ConditionOperator, ExtractedValue};

fn single(s: &str) -> ExtractedValue {
    ExtractedValue::Single(Value::String(s.to_string()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // gt/lt agree with integer comparison.
    #[test]
    fn numeric_ops_match_i64(a in -100_000i64..100_000, b in -100_000i64..100_000) {
        let actual = single(&a.to_string());
        let expected = b.to_string();
        let check = |op| evaluate(&actual, op, Some(&expected)).unwrap();
        prop_assert_eq!(check(ConditionOperator::Gt), a > b);
        prop_assert_eq!(check(ConditionOperator::Gte), a >= b);
        prop_assert_eq!(check(ConditionOperator::Lt), a < b);
        prop_assert_eq!(check(ConditionOperator::Lte), a <= b);
    }

    // Decimal text compares exactly, without float rounding.
    #[test]
    fn decimal_equality_is_exact(whole in 0u32..1_000_000, frac in 0u32..1000) {
        let text = format!("{whole}.{frac:03}");
        let actual = single(&text);
        prop_assert!(evaluate(&actual, ConditionOperator::Gte, Some(&text)).unwrap());
        prop_assert!(evaluate(&actual, ConditionOperator::Lte, Some(&text)).unwrap());
        prop_assert!(!evaluate(&actual, ConditionOperator::Gt, Some(&text)).unwrap());
    }

    // Long digit strings keep every digit: appending a non-zero trailing
    // digit always makes the value strictly larger.
    #[test]
    fn long_decimals_are_not_rounded(
        whole in "[1-9][0-9]{0,40}",
        frac in "[0-9]{25,45}",
        last in 1u8..10,
    ) {
        let base = format!("{whole}.{frac}");
        let longer = format!("{base}{last}");
        let actual = single(&longer);
        prop_assert!(evaluate(&actual, ConditionOperator::Gt, Some(&base)).unwrap());
        prop_assert!(!evaluate(&actual, ConditionOperator::Lte, Some(&base)).unwrap());
        let scientific = format!("{whole}{frac}{last}e-{}", frac.len() + 1);
        prop_assert!(evaluate(&single(&scientific), ConditionOperator::Gte, Some(&longer)).unwrap());
        prop_assert!(evaluate(&single(&scientific), ConditionOperator::Lte, Some(&longer)).unwrap());
    }

    #[test]
    fn contains_matches_std(value in "[a-zA-Z0-9 ]{0,40}", needle in "[a-zA-Z0-9]{0,6}") {
        let actual = single(&value);
        let contains = evaluate(&actual, ConditionOperator::Contains, Some(&needle)).unwrap();
        let not_contains = evaluate(&actual, ConditionOperator::NotContains, Some(&needle)).unwrap();
        prop_assert_eq!(contains, value.contains(&needle));
        prop_assert_eq!(not_contains, !contains);
    }

    #[test]
    fn affix_ops_match_std(value in "[a-z]{0,20}", affix in "[a-z]{0,4}") {
        let actual = single(&value);
        prop_assert_eq!(
            evaluate(&actual, ConditionOperator::StartsWith, Some(&affix)).unwrap(),
            value.starts_with(&affix)
        );
        prop_assert_eq!(
            evaluate(&actual, ConditionOperator::EndsWith, Some(&affix)).unwrap(),
            value.ends_with(&affix)
        );
    }

    // Literal patterns only match the whole value.
    #[test]
    fn regex_is_full_match(value in "[a-z]{1,12}", prefix in "[a-z]{1,4}") {
        let actual = single(&value);
        prop_assert!(evaluate(&actual, ConditionOperator::Regex, Some(&value)).unwrap());
        let longer = format!("{prefix}{value}");
        let actual = single(&longer);
        prop_assert!(!evaluate(&actual, ConditionOperator::Regex, Some(&value)).unwrap());
        prop_assert!(evaluate(&actual, ConditionOperator::NotRegex, Some(&value)).unwrap());
    }

    #[test]
    fn size_counts_matches(items in prop::collection::vec("[a-z]{1,4}", 0..8)) {
        let actual = ExtractedValue::Many(items.iter().cloned().map(Value::String).collect());
        let n = items.len().to_string();
        prop_assert!(evaluate(&actual, ConditionOperator::SizeEquals, Some(&n)).unwrap());
        prop_assert!(!evaluate(&actual, ConditionOperator::SizeNotEquals, Some(&n)).unwrap());
        prop_assert_eq!(
            evaluate(&actual, ConditionOperator::Empty, None).unwrap(),
            items.is_empty()
        );
    }

    // Absent never satisfies a positive string operator.
    #[test]
    fn absent_fails_positive_string_ops(expected in "[a-z]{0,6}") {
        let actual = ExtractedValue::Absent;
        for op in [
            ConditionOperator::Equals,
            ConditionOperator::Contains,
            ConditionOperator::StartsWith,
            ConditionOperator::EndsWith,
        ] {
            prop_assert!(!evaluate(&actual, op, Some(&expected)).unwrap());
        }
        prop_assert!(evaluate(&actual, ConditionOperator::NotEquals, Some(&expected)).unwrap());
    }
}
