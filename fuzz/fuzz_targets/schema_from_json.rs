#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice(data) {
        if let Ok(schema) = jddf::Schema::from_json(&value) {
            let _ = schema.verify();
        }
    }
});
