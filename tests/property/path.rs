use proptest::prelude::*;
use serde_json::Value;
use xmlassert::path::{PathExpression, extract};
use xmlassert::transcode::transcode;
use xmlassert::types::ExtractedValue;
use xmlassert::validate::XmlValidator;

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Dotted names and non-negative indices never make a path indefinite.
    #[test]
    fn dotted_paths_are_definite(
        names in prop::collection::vec(name(), 1..5),
        index in prop::option::of(0usize..10),
    ) {
        let mut path = names.join(".");
        if let Some(i) = index {
            path.push_str(&format!("[{i}]"));
        }
        let expr = PathExpression::parse(&path).unwrap();
        prop_assert!(expr.is_definite(), "{} should be definite", path);
        prop_assert!(expr.normalized().starts_with("$['"));
    }

    #[test]
    fn descendant_step_is_indefinite(names in prop::collection::vec(name(), 2..4)) {
        let path = names.join("..");
        let expr = PathExpression::parse(&path).unwrap();
        prop_assert!(!expr.is_definite());
    }

    // `a.b[i]` picks the i-th of the folded siblings.
    #[test]
    fn index_selects_folded_sibling(
        items in prop::collection::vec("[a-z0-9]{1,6}", 2..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let body = format!(
            "<a>{}</a>",
            items.iter().map(|i| format!("<b>{i}</b>")).collect::<String>()
        );
        let i = pick.index(items.len());
        let mut validator = XmlValidator::default();
        let tree = transcode(&validator.validate(&body).unwrap());

        let expr = PathExpression::parse(&format!("a.b[{i}]")).unwrap();
        prop_assert_eq!(
            extract(&tree, &expr).unwrap(),
            ExtractedValue::Single(Value::String(items[i].clone()))
        );

        let all = PathExpression::parse("a.b[*]").unwrap();
        let expected: Vec<Value> = items.iter().cloned().map(Value::String).collect();
        prop_assert_eq!(extract(&tree, &all).unwrap(), ExtractedValue::Many(expected));
    }
}
