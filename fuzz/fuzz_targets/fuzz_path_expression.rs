#![no_main]

use libfuzzer_sys::fuzz_target;
use xmlassert::path::{PathExpression, extract};
use xmlassert::transcode::transcode;
use xmlassert::types::ExtractedValue;
use xmlassert::validate::XmlValidator;

const BODY: &str = "<r a=\"1\"><x>1</x><x>2</x><y><z>t</z></y>text</r>";

fuzz_target!(|data: &[u8]| {
    let path = String::from_utf8_lossy(data);
    let Ok(expr) = PathExpression::parse(&path) else {
        return;
    };

    let mut validator = XmlValidator::default();
    let Ok(doc) = validator.validate(BODY) else {
        return;
    };
    let tree = transcode(&doc);

    match extract(&tree, &expr) {
        Ok(ExtractedValue::Single(_)) => assert!(expr.is_definite()),
        Ok(ExtractedValue::Many(_)) => assert!(!expr.is_definite()),
        Ok(ExtractedValue::Absent) => unreachable!("extract never yields Absent"),
        Err(_) => assert!(expr.is_definite()),
    }
});
