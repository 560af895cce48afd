#![no_main]

use libfuzzer_sys::fuzz_target;
use xmlassert::transcode::transcode;
use xmlassert::validate::XmlValidator;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut validator = XmlValidator::default();
    if let Ok(doc) = validator.validate(text) {
        // Transcoding is total over accepted documents.
        let tree = transcode(&doc);
        let _ = serde_json::to_string(&tree.to_value());
    }
});
