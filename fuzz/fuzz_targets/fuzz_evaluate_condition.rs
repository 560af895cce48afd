#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use xmlassert::ConditionOperator;
use xmlassert::condition::evaluate;
use xmlassert::types::ExtractedValue;

/// Generate an extracted value shaped like transcoder output.
fn arbitrary_extracted(u: &mut Unstructured<'_>) -> arbitrary::Result<ExtractedValue> {
    match u.int_in_range(0..=2)? {
        0 => Ok(ExtractedValue::Absent),
        1 => Ok(ExtractedValue::Single(arbitrary_value(u)?)),
        _ => {
            let len = u.int_in_range(0..=5)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(arbitrary_value(u)?);
            }
            Ok(ExtractedValue::Many(v))
        }
    }
}

fn arbitrary_value(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    if bool::arbitrary(u)? {
        Ok(Value::String(String::arbitrary(u)?))
    } else {
        let len = u.int_in_range(0..=3)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(Value::String(String::arbitrary(u)?));
        }
        Ok(Value::Array(items))
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let Ok(op) = u.choose(&ConditionOperator::ALL) else {
        return;
    };
    let Ok(value) = arbitrary_extracted(&mut u) else {
        return;
    };
    let Ok(expected) = Option::<String>::arbitrary(&mut u) else {
        return;
    };

    let _ = evaluate(&value, *op, expected.as_deref());
});
