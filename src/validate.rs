use crate::{Form, Schema, Type};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Configuration for [`validate`].
///
/// The default configuration disables both limits.
#[derive(Default)]
pub struct ValidateOptions {
    max_depth: usize,
    max_errors: usize,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of `ref`s to follow at once before aborting
    /// validation with [`ValidateError::MaxDepthExceeded`].
    ///
    /// A value of 0, the default, disables the limit. Set a limit if you
    /// validate against schemas whose `ref`s may form a cycle; without one, a
    /// cyclic schema can recurse until the stack is exhausted.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the number of errors at which validation returns early.
    ///
    /// A value of 0, the default, disables the limit and all errors are
    /// returned. With a limit of N, the returned list holds at most N errors,
    /// and validation stops the moment the Nth error is found. If you only
    /// care whether data is valid at all, a limit of 1 is the cheapest
    /// option.
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Errors that may arise from [`validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidateError {
    #[error("max depth exceeded")]
    MaxDepthExceeded,
}

/// A single validation problem, as a pair of paths.
///
/// `instance_path` locates the part of the instance that was rejected;
/// `schema_path` locates the schema keyword that rejected it. Both are
/// sequences of tokens ordered root to leaf; array indices appear as decimal
/// strings. The exact paths for every kind of problem are prescribed by the
/// JDDF spec, so indicators are portable across implementations.
///
/// Despite its name, this is not a Rust error type. It is ordinary data
/// returned from [`validate`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorIndicator {
    pub instance_path: Vec<String>,
    pub schema_path: Vec<String>,
}

/// Validates an instance against a schema, returning the full set of
/// validation problems found.
///
/// The schema must have passed [`Schema::verify`]; validating against an
/// unverified schema may panic. Validation itself never fails on account of
/// the instance: an instance the schema rejects produces indicators, not an
/// `Err`. The only error case is [`ValidateError::MaxDepthExceeded`], and it
/// can arise only when [`ValidateOptions::with_max_depth`] is set.
pub fn validate(
    schema: &Schema,
    instance: &Value,
    options: ValidateOptions,
) -> Result<Vec<ValidationErrorIndicator>, ValidateError> {
    let mut vm = Vm {
        max_depth: options.max_depth,
        max_errors: options.max_errors,
        instance_tokens: vec![],
        schema_tokens: vec![vec![]],
        errors: vec![],
    };

    match vm.validate(schema, schema, None, instance) {
        Ok(()) | Err(VmValidateError::MaxErrorsReached) => Ok(vm.errors),
        Err(VmValidateError::MaxDepthExceeded) => Err(ValidateError::MaxDepthExceeded),
    }
}

struct Vm {
    pub max_depth: usize,
    pub max_errors: usize,
    pub instance_tokens: Vec<String>,
    pub schema_tokens: Vec<Vec<String>>,
    pub errors: Vec<ValidationErrorIndicator>,
}

enum VmValidateError {
    MaxErrorsReached,
    MaxDepthExceeded,
}

impl Vm {
    pub fn validate(
        &mut self,
        root: &Schema,
        schema: &Schema,
        parent_tag: Option<&str>,
        instance: &Value,
    ) -> Result<(), VmValidateError> {
        match &schema.form {
            Form::Empty => {}
            Form::Ref(definition) => {
                if self.schema_tokens.len() == self.max_depth {
                    return Err(VmValidateError::MaxDepthExceeded);
                }

                self.schema_tokens
                    .push(vec!["definitions".to_owned(), definition.clone()]);

                // A verified root schema always carries the referenced
                // definition.
                let sub_schema = &root.definitions.as_ref().unwrap()[definition];
                self.validate(root, sub_schema, None, instance)?;
                self.schema_tokens.pop();
            }
            Form::Type(type_) => {
                self.push_schema_token("type");

                match type_ {
                    Type::Boolean => {
                        if !instance.is_boolean() {
                            self.push_error()?;
                        }
                    }
                    Type::Float32 | Type::Float64 => {
                        if !instance.is_number() {
                            self.push_error()?;
                        }
                    }
                    Type::Int8 => self.validate_int(instance, -128.0, 127.0)?,
                    Type::Uint8 => self.validate_int(instance, 0.0, 255.0)?,
                    Type::Int16 => self.validate_int(instance, -32768.0, 32767.0)?,
                    Type::Uint16 => self.validate_int(instance, 0.0, 65535.0)?,
                    Type::Int32 => self.validate_int(instance, -2147483648.0, 2147483647.0)?,
                    Type::Uint32 => self.validate_int(instance, 0.0, 4294967295.0)?,
                    Type::String => {
                        if !instance.is_string() {
                            self.push_error()?;
                        }
                    }
                    Type::Timestamp => {
                        if let Some(s) = instance.as_str() {
                            if DateTime::parse_from_rfc3339(s).is_err() {
                                self.push_error()?;
                            }
                        } else {
                            self.push_error()?;
                        }
                    }
                };

                self.pop_schema_token();
            }
            Form::Enum(values) => {
                self.push_schema_token("enum");
                if let Some(s) = instance.as_str() {
                    if !values.contains(s) {
                        self.push_error()?;
                    }
                } else {
                    self.push_error()?;
                }
                self.pop_schema_token();
            }
            Form::Elements(elements) => {
                self.push_schema_token("elements");

                if let Some(arr) = instance.as_array() {
                    for (i, sub_instance) in arr.iter().enumerate() {
                        self.push_instance_token(&i.to_string());
                        self.validate(root, elements, None, sub_instance)?;
                        self.pop_instance_token();
                    }
                } else {
                    self.push_error()?;
                }

                self.pop_schema_token();
            }
            Form::Properties(properties) => {
                if let Some(obj) = instance.as_object() {
                    if let Some(required) = &properties.required {
                        self.push_schema_token("properties");
                        for (name, sub_schema) in required {
                            self.push_schema_token(name);
                            if let Some(sub_instance) = obj.get(name) {
                                self.push_instance_token(name);
                                self.validate(root, sub_schema, None, sub_instance)?;
                                self.pop_instance_token();
                            } else {
                                self.push_error()?;
                            }
                            self.pop_schema_token();
                        }
                        self.pop_schema_token();
                    }

                    if let Some(optional) = &properties.optional {
                        self.push_schema_token("optionalProperties");
                        for (name, sub_schema) in optional {
                            self.push_schema_token(name);
                            if let Some(sub_instance) = obj.get(name) {
                                self.push_instance_token(name);
                                self.validate(root, sub_schema, None, sub_instance)?;
                                self.pop_instance_token();
                            }
                            self.pop_schema_token();
                        }
                        self.pop_schema_token();
                    }

                    if !properties.additional {
                        for name in obj.keys() {
                            let in_required = properties
                                .required
                                .as_ref()
                                .map_or(false, |map| map.contains_key(name));

                            let in_optional = properties
                                .optional
                                .as_ref()
                                .map_or(false, |map| map.contains_key(name));

                            if parent_tag != Some(name.as_str()) && !in_required && !in_optional {
                                self.push_instance_token(name);
                                self.push_error()?;
                                self.pop_instance_token();
                            }
                        }
                    }
                } else {
                    self.push_schema_token(if properties.required.is_some() {
                        "properties"
                    } else {
                        "optionalProperties"
                    });
                    self.push_error()?;
                    self.pop_schema_token();
                }
            }
            Form::Values(values) => {
                self.push_schema_token("values");

                if let Some(obj) = instance.as_object() {
                    for (name, sub_instance) in obj {
                        self.push_instance_token(name);
                        self.validate(root, values, None, sub_instance)?;
                        self.pop_instance_token();
                    }
                } else {
                    self.push_error()?;
                }

                self.pop_schema_token();
            }
            Form::Discriminator(discriminator) => {
                self.push_schema_token("discriminator");

                if let Some(obj) = instance.as_object() {
                    if let Some(tag) = obj.get(&discriminator.tag) {
                        if let Some(tag) = tag.as_str() {
                            if let Some(sub_schema) = discriminator.mapping.get(tag) {
                                self.push_schema_token("mapping");
                                self.push_schema_token(tag);
                                self.validate(
                                    root,
                                    sub_schema,
                                    Some(&discriminator.tag),
                                    instance,
                                )?;
                                self.pop_schema_token();
                                self.pop_schema_token();
                            } else {
                                self.push_schema_token("mapping");
                                self.push_instance_token(&discriminator.tag);
                                self.push_error()?;
                                self.pop_instance_token();
                                self.pop_schema_token();
                            }
                        } else {
                            self.push_schema_token("tag");
                            self.push_instance_token(&discriminator.tag);
                            self.push_error()?;
                            self.pop_instance_token();
                            self.pop_schema_token();
                        }
                    } else {
                        self.push_schema_token("tag");
                        self.push_error()?;
                        self.pop_schema_token();
                    }
                } else {
                    self.push_error()?;
                }

                self.pop_schema_token();
            }
        };

        Ok(())
    }

    fn validate_int(
        &mut self,
        instance: &Value,
        min: f64,
        max: f64,
    ) -> Result<(), VmValidateError> {
        if let Some(val) = instance.as_f64() {
            if val.fract() != 0.0 || val < min || val > max {
                self.push_error()
            } else {
                Ok(())
            }
        } else {
            self.push_error()
        }
    }

    fn push_error(&mut self) -> Result<(), VmValidateError> {
        self.errors.push(ValidationErrorIndicator {
            instance_path: self.instance_tokens.clone(),
            schema_path: self.schema_tokens.last().unwrap().clone(),
        });

        if self.max_errors == self.errors.len() {
            Err(VmValidateError::MaxErrorsReached)
        } else {
            Ok(())
        }
    }

    fn push_schema_token(&mut self, token: &str) {
        self.schema_tokens
            .last_mut()
            .unwrap()
            .push(token.to_owned());
    }

    fn pop_schema_token(&mut self) {
        self.schema_tokens.last_mut().unwrap().pop().unwrap();
    }

    fn push_instance_token(&mut self, token: &str) {
        self.instance_tokens.push(token.to_owned());
    }

    fn pop_instance_token(&mut self) {
        self.instance_tokens.pop().unwrap();
    }
}
