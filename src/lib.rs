//! An implementation of [JSON Data Definition
//! Format](https://github.com/jddf/jddf), a schema language for JSON.
//!
//! `jddf` lets you parse and ensure the validity of JDDF schemas, and then
//! validate JSON data against those schemas.
//!
//! # Quick start
//!
//! Here's how you can parse a JDDF schema and then use it to validate data
//! against that schema.
//!
//! ```
//! use jddf::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::from_json(&json!({
//!     "properties": {
//!         "foo": { "type": "string" },
//!         "bar": { "type": "boolean" }
//!     }
//! }))
//! .expect("Parse schema");
//!
//! schema.verify().expect("Invalid schema");
//!
//! // This input is ok, so validate comes back empty.
//! let input_ok = json!({ "foo": "xxx", "bar": true });
//! assert!(jddf::validate(&schema, &input_ok, Default::default()).unwrap().is_empty());
//!
//! // This input is bad (bar has type string, not boolean), so validate does
//! // not come back empty.
//! let input_bad = json!({ "foo": "xxx", "bar": "false" });
//! assert!(!jddf::validate(&schema, &input_bad, Default::default()).unwrap().is_empty());
//! ```
//!
//! Or, at a high level:
//!
//! 1. Parse JSON data into a [`serde_json::Value`].
//! 2. Convert that into a [`Schema`] using [`Schema::from_json`].
//! 3. Ensure that schema is sensible using [`Schema::verify`].
//! 4. Verify data against that schema using [`validate()`].
//!
//! # Common usage
//!
//! The example above shows you how you can quickly use JDDF to check whether
//! data is valid. But in the real world, you usually want to know what the
//! validation errors were, rather than just flatly rejecting input as
//! "invalid" without any further details.
//!
//! One benefit of JDDF is that the exact data inside the validation errors is
//! part of the specification; that means validation errors are portable.
//! Here's an example of what those validation errors look like, and how you
//! can access them with this crate.
//!
//! ```
//! use jddf::{Schema, ValidationErrorIndicator};
//! use serde_json::json;
//!
//! let schema = Schema::from_json(&json!({
//!     "properties": {
//!         "name": { "type": "string" },
//!         "age": { "type": "uint32" },
//!         "phones": {
//!             "elements": {
//!                 "type": "string"
//!             }
//!         }
//!     }
//! }))
//! .expect("Parse schema");
//!
//! schema.verify().expect("Invalid schema");
//!
//! // Since this first example is valid, we'll get back an empty list of
//! // validation errors.
//! let input_ok = json!({
//!     "name": "John Doe",
//!     "age": 43,
//!     "phones": ["+44 1234567", "+44 2345678"]
//! });
//!
//! assert_eq!(
//!     Vec::<ValidationErrorIndicator>::new(),
//!     jddf::validate(&schema, &input_ok, Default::default()).unwrap(),
//! );
//!
//! // This example is invalid, so we'll get back three validation errors:
//! //
//! // 1. "name" is required but not present,
//! // 2. "age" has the wrong type
//! // 3. "phones[1]" has the wrong type
//! let input_bad = json!({
//!     "age": "43",
//!     "phones": ["+44 1234567", 442345678]
//! });
//!
//! // Each error indicator has two pieces of information: the path to the part
//! // of the input that was rejected (the "instance path"), and the part of
//! // the schema that rejected it (the "schema path").
//! //
//! // The exact values of the instance path and schema path is specified in
//! // the JDDF spec.
//! assert_eq!(
//!     vec![
//!         // "age" has the wrong type (required by "/properties/age/type")
//!         ValidationErrorIndicator {
//!             instance_path: vec!["age".into()],
//!             schema_path: vec!["properties".into(), "age".into(), "type".into()],
//!         },
//!
//!         // "name" is missing (required by "/properties/name")
//!         ValidationErrorIndicator {
//!             instance_path: vec![],
//!             schema_path: vec!["properties".into(), "name".into()],
//!         },
//!
//!         // "phones/1" has the wrong type (required by "/properties/phones/elements/type")
//!         ValidationErrorIndicator {
//!             instance_path: vec!["phones".into(), "1".into()],
//!             schema_path: vec![
//!                 "properties".into(),
//!                 "phones".into(),
//!                 "elements".into(),
//!                 "type".into()
//!             ],
//!         },
//!     ],
//!     jddf::validate(&schema, &input_bad, Default::default()).unwrap(),
//! );
//! ```
//!
//! # Security considerations
//!
//! If you're running [`validate()`] with untrusted schemas (untrusted inputs
//! is fine), then be aware that a schema whose `ref`s form a cycle can send a
//! naive evaluator into an infinite loop, leaving you vulnerable to
//! denial-of-service attacks.
//!
//! This crate supports detecting and aborting such cycles via
//! [`ValidateOptions::with_max_depth`]. Please see that documentation if
//! you're validating data against untrusted schemas.

mod schema;
mod validate;

pub use schema::*;
pub use validate::*;
