#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|schema_and_instance: (&[u8], &[u8])| {
    let (schema_data, instance_data) = schema_and_instance;

    let schema_value = match serde_json::from_slice(schema_data) {
        Ok(value) => value,
        Err(_) => return,
    };

    let schema = match jddf::Schema::from_json(&schema_value) {
        Ok(schema) => schema,
        Err(_) => return,
    };

    // We're only interested in fuzzing against valid schemas.
    if schema.verify().is_err() {
        return;
    }

    if let Ok(instance) = serde_json::from_slice(instance_data) {
        let _ = jddf::validate(
            &schema,
            &instance,
            jddf::ValidateOptions::new().with_max_depth(32),
        );
    }
});
