use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use thiserror::Error;

/// A parsed JDDF schema.
///
/// A schema is a pair of an optional set of definitions and a form. Only a
/// root schema may carry definitions; [`Schema::verify`] enforces that, along
/// with the other rules that cut across sub-schemas.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub definitions: Option<BTreeMap<String, Schema>>,
    pub form: Form,
}

/// The various forms which a schema may take on, and their respective data.
#[derive(Clone, Debug, PartialEq)]
pub enum Form {
    /// The empty form.
    ///
    /// This schema accepts all data.
    Empty,

    /// The ref form.
    ///
    /// This schema refers to another schema, and does whatever that other
    /// schema does. The contained string is an index into the `definitions`
    /// of the root schema.
    Ref(String),

    /// The type form.
    ///
    /// This schema asserts that the data is one of the primitive types.
    Type(Type),

    /// The enum form.
    ///
    /// This schema asserts that the data is a string, and that it is one of a
    /// set of values.
    Enum(BTreeSet<String>),

    /// The elements form.
    ///
    /// This schema asserts that the instance is an array, and that every
    /// element of the array matches a given schema.
    Elements(Box<Schema>),

    /// The properties form.
    ///
    /// This schema asserts that the instance is an object, and that the
    /// properties all satisfy their respective schemas.
    Properties(Properties),

    /// The values form.
    ///
    /// This schema asserts that the instance is an object, and that all the
    /// values in the object satisfy the same schema.
    Values(Box<Schema>),

    /// The discriminator form.
    ///
    /// This schema asserts that the instance is an object carrying a "tag"
    /// property, and dispatches to one of a set of schemas based on the value
    /// of that tag.
    Discriminator(Discriminator),
}

impl Default for Form {
    fn default() -> Self {
        Form::Empty
    }
}

/// Data associated with the properties form.
///
/// `required` and `optional` are `None` when the corresponding keyword
/// (`properties` / `optionalProperties`) was omitted from the schema, which
/// is distinct from the keyword being present but empty. At least one of the
/// two is always present.
#[derive(Clone, Debug, PartialEq)]
pub struct Properties {
    pub required: Option<BTreeMap<String, Schema>>,
    pub optional: Option<BTreeMap<String, Schema>>,
    pub additional: bool,
}

/// Data associated with the discriminator form.
#[derive(Clone, Debug, PartialEq)]
pub struct Discriminator {
    pub tag: String,
    pub mapping: BTreeMap<String, Schema>,
}

/// The values that the "type" keyword may check for.
///
/// In a certain sense, you can consider these types to be JSON's "primitive"
/// types, with the remaining two types, arrays and objects, being the
/// "complex" types covered by other forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Boolean,
    Float32,
    Float64,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    String,
    Timestamp,
}

impl FromStr for Type {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(Self::Boolean),
            "float32" => Ok(Self::Float32),
            "float64" => Ok(Self::Float64),
            "int8" => Ok(Self::Int8),
            "uint8" => Ok(Self::Uint8),
            "int16" => Ok(Self::Int16),
            "uint16" => Ok(Self::Uint16),
            "int32" => Ok(Self::Int32),
            "uint32" => Ok(Self::Uint32),
            "string" => Ok(Self::String),
            "timestamp" => Ok(Self::Timestamp),
            _ => Err(()),
        }
    }
}

impl Type {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::String => "string",
            Self::Timestamp => "timestamp",
        }
    }
}

/// Errors that may arise from [`Schema::from_json`] or [`Schema::verify`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidSchemaError {
    #[error("schema must be an object")]
    SchemaNotObject,

    #[error("definitions must be an object")]
    DefinitionsNotObject,

    #[error("definitions may only appear on a root schema")]
    NonRootDefinitions,

    #[error("ref must be a string")]
    RefNotString,

    #[error("no definition named {0:?}")]
    NoSuchDefinition(String),

    #[error("type must be a string")]
    TypeNotString,

    #[error("invalid type: {0:?}")]
    InvalidType(String),

    #[error("enum must be an array")]
    EnumNotArray,

    #[error("enum must not be empty")]
    EmptyEnum,

    #[error("enum values must be strings")]
    EnumValueNotString,

    #[error("enum values must not be repeated: {0:?}")]
    RepeatedEnumValue(String),

    #[error("properties must be an object")]
    PropertiesNotObject,

    #[error("optionalProperties must be an object")]
    OptionalPropertiesNotObject,

    #[error("additionalProperties must be a boolean")]
    AdditionalPropertiesNotBoolean,

    #[error("property repeated between properties and optionalProperties: {0:?}")]
    AmbiguousProperty(String),

    #[error("discriminator must be an object")]
    DiscriminatorNotObject,

    #[error("discriminator tag must be a string")]
    DiscriminatorTagNotString,

    #[error("discriminator mapping must be an object")]
    DiscriminatorMappingNotObject,

    #[error("discriminator mapping values must be of properties form")]
    NonPropertiesMapping,

    #[error("discriminator tag repeated in mapping property: {0:?}")]
    RepeatedTagInProperties(String),

    #[error("invalid form")]
    InvalidForm,
}

impl Schema {
    /// Construct a schema from a JSON value.
    ///
    /// The input must be a JSON object using at most the JDDF keywords
    /// (`definitions`, `ref`, `type`, `enum`, `elements`, `properties`,
    /// `optionalProperties`, `additionalProperties`, `values`,
    /// `discriminator`); keys outside that set are ignored. At most one form's
    /// keywords may appear, and absence of all of them produces the empty
    /// form.
    ///
    /// This function checks each keyword in isolation. Rules that relate
    /// sub-schemas to one another, such as whether a `ref` resolves, are the
    /// domain of [`Schema::verify`].
    ///
    /// ```
    /// use jddf::{Form, Schema, Type};
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_json(&json!({ "type": "uint32" })).unwrap();
    /// assert_eq!(Form::Type(Type::Uint32), schema.form);
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, InvalidSchemaError> {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return Err(InvalidSchemaError::SchemaNotObject),
        };

        let definitions = match obj.get("definitions") {
            None => None,
            Some(Value::Object(definitions)) => Some(schema_map_from_json(definitions)?),
            Some(_) => return Err(InvalidSchemaError::DefinitionsNotObject),
        };

        let mut form = Form::Empty;

        if let Some(ref_) = obj.get("ref") {
            match ref_.as_str() {
                Some(definition) => form = Form::Ref(definition.to_owned()),
                None => return Err(InvalidSchemaError::RefNotString),
            }
        }

        if let Some(type_) = obj.get("type") {
            if form != Form::Empty {
                return Err(InvalidSchemaError::InvalidForm);
            }

            let type_ = match type_.as_str() {
                Some(type_) => type_,
                None => return Err(InvalidSchemaError::TypeNotString),
            };

            form = Form::Type(
                type_
                    .parse()
                    .map_err(|_| InvalidSchemaError::InvalidType(type_.to_owned()))?,
            );
        }

        if let Some(enum_) = obj.get("enum") {
            if form != Form::Empty {
                return Err(InvalidSchemaError::InvalidForm);
            }

            let enum_ = match enum_.as_array() {
                Some(enum_) => enum_,
                None => return Err(InvalidSchemaError::EnumNotArray),
            };

            if enum_.is_empty() {
                return Err(InvalidSchemaError::EmptyEnum);
            }

            let mut values = BTreeSet::new();
            for value in enum_ {
                let value = match value.as_str() {
                    Some(value) => value,
                    None => return Err(InvalidSchemaError::EnumValueNotString),
                };

                if !values.insert(value.to_owned()) {
                    return Err(InvalidSchemaError::RepeatedEnumValue(value.to_owned()));
                }
            }

            form = Form::Enum(values);
        }

        if let Some(elements) = obj.get("elements") {
            if form != Form::Empty {
                return Err(InvalidSchemaError::InvalidForm);
            }

            form = Form::Elements(Box::new(Self::from_json(elements)?));
        }

        if obj.contains_key("properties")
            || obj.contains_key("optionalProperties")
            || obj.contains_key("additionalProperties")
        {
            if form != Form::Empty {
                return Err(InvalidSchemaError::InvalidForm);
            }

            let required = match obj.get("properties") {
                None => None,
                Some(Value::Object(properties)) => Some(schema_map_from_json(properties)?),
                Some(_) => return Err(InvalidSchemaError::PropertiesNotObject),
            };

            let optional = match obj.get("optionalProperties") {
                None => None,
                Some(Value::Object(properties)) => Some(schema_map_from_json(properties)?),
                Some(_) => return Err(InvalidSchemaError::OptionalPropertiesNotObject),
            };

            let additional = match obj.get("additionalProperties") {
                None => false,
                Some(Value::Bool(additional)) => *additional,
                Some(_) => return Err(InvalidSchemaError::AdditionalPropertiesNotBoolean),
            };

            // additionalProperties alone does not make a properties form.
            if required.is_none() && optional.is_none() {
                return Err(InvalidSchemaError::InvalidForm);
            }

            form = Form::Properties(Properties {
                required,
                optional,
                additional,
            });
        }

        if let Some(values) = obj.get("values") {
            if form != Form::Empty {
                return Err(InvalidSchemaError::InvalidForm);
            }

            form = Form::Values(Box::new(Self::from_json(values)?));
        }

        if let Some(discriminator) = obj.get("discriminator") {
            if form != Form::Empty {
                return Err(InvalidSchemaError::InvalidForm);
            }

            let discriminator = match discriminator.as_object() {
                Some(discriminator) => discriminator,
                None => return Err(InvalidSchemaError::DiscriminatorNotObject),
            };

            let tag = match discriminator.get("tag").and_then(Value::as_str) {
                Some(tag) => tag,
                None => return Err(InvalidSchemaError::DiscriminatorTagNotString),
            };

            let mapping = match discriminator.get("mapping") {
                Some(Value::Object(mapping)) => schema_map_from_json(mapping)?,
                _ => return Err(InvalidSchemaError::DiscriminatorMappingNotObject),
            };

            form = Form::Discriminator(Discriminator {
                tag: tag.to_owned(),
                mapping,
            });
        }

        Ok(Schema { definitions, form })
    }

    /// Check the rules that relate sub-schemas to one another.
    ///
    /// These are the constraints [`Schema::from_json`] cannot see on its own:
    /// definitions may only appear on the root schema, every `ref` must
    /// resolve against the root's definitions, `properties` and
    /// `optionalProperties` may not share keys, and discriminator mappings
    /// must be of the properties form and must not re-check the tag.
    ///
    /// Callers must run this before trusting a schema; loading alone is not
    /// enough.
    pub fn verify(&self) -> Result<(), InvalidSchemaError> {
        self.verify_with_root(self)
    }

    fn verify_with_root(&self, root: &Schema) -> Result<(), InvalidSchemaError> {
        if let Some(definitions) = &self.definitions {
            if !std::ptr::eq(self, root) {
                return Err(InvalidSchemaError::NonRootDefinitions);
            }

            for sub_schema in definitions.values() {
                sub_schema.verify_with_root(root)?;
            }
        }

        match &self.form {
            Form::Empty | Form::Type(_) | Form::Enum(_) => {}
            Form::Ref(definition) => {
                let resolves = root
                    .definitions
                    .as_ref()
                    .map_or(false, |definitions| definitions.contains_key(definition));

                if !resolves {
                    return Err(InvalidSchemaError::NoSuchDefinition(definition.clone()));
                }
            }
            Form::Elements(sub_schema) => sub_schema.verify_with_root(root)?,
            Form::Properties(properties) => {
                if let (Some(required), Some(optional)) =
                    (&properties.required, &properties.optional)
                {
                    for name in required.keys() {
                        if optional.contains_key(name) {
                            return Err(InvalidSchemaError::AmbiguousProperty(name.clone()));
                        }
                    }
                }

                for sub_schema in properties.required.iter().flat_map(BTreeMap::values) {
                    sub_schema.verify_with_root(root)?;
                }

                for sub_schema in properties.optional.iter().flat_map(BTreeMap::values) {
                    sub_schema.verify_with_root(root)?;
                }
            }
            Form::Values(sub_schema) => sub_schema.verify_with_root(root)?,
            Form::Discriminator(discriminator) => {
                for sub_schema in discriminator.mapping.values() {
                    match &sub_schema.form {
                        Form::Properties(properties) => {
                            let tag_in_required = properties
                                .required
                                .as_ref()
                                .map_or(false, |map| map.contains_key(&discriminator.tag));

                            let tag_in_optional = properties
                                .optional
                                .as_ref()
                                .map_or(false, |map| map.contains_key(&discriminator.tag));

                            if tag_in_required || tag_in_optional {
                                return Err(InvalidSchemaError::RepeatedTagInProperties(
                                    discriminator.tag.clone(),
                                ));
                            }
                        }
                        _ => return Err(InvalidSchemaError::NonPropertiesMapping),
                    }

                    sub_schema.verify_with_root(root)?;
                }
            }
        }

        Ok(())
    }

    /// Re-project a schema onto its JSON surface.
    ///
    /// Loading the result with [`Schema::from_json`] produces a schema equal
    /// to `self`. An `additionalProperties` of `false` is omitted, since that
    /// is the default.
    pub fn to_json(&self) -> Value {
        let mut out = serde_json::Map::new();

        if let Some(definitions) = &self.definitions {
            out.insert("definitions".to_owned(), schema_map_to_json(definitions));
        }

        match &self.form {
            Form::Empty => {}
            Form::Ref(definition) => {
                out.insert("ref".to_owned(), definition.clone().into());
            }
            Form::Type(type_) => {
                out.insert("type".to_owned(), type_.as_str().into());
            }
            Form::Enum(values) => {
                out.insert(
                    "enum".to_owned(),
                    values.iter().cloned().collect::<Vec<_>>().into(),
                );
            }
            Form::Elements(sub_schema) => {
                out.insert("elements".to_owned(), sub_schema.to_json());
            }
            Form::Properties(properties) => {
                if let Some(required) = &properties.required {
                    out.insert("properties".to_owned(), schema_map_to_json(required));
                }

                if let Some(optional) = &properties.optional {
                    out.insert("optionalProperties".to_owned(), schema_map_to_json(optional));
                }

                if properties.additional {
                    out.insert("additionalProperties".to_owned(), true.into());
                }
            }
            Form::Values(sub_schema) => {
                out.insert("values".to_owned(), sub_schema.to_json());
            }
            Form::Discriminator(discriminator) => {
                let mut disc = serde_json::Map::new();
                disc.insert("tag".to_owned(), discriminator.tag.clone().into());
                disc.insert(
                    "mapping".to_owned(),
                    schema_map_to_json(&discriminator.mapping),
                );

                out.insert("discriminator".to_owned(), Value::Object(disc));
            }
        }

        Value::Object(out)
    }
}

fn schema_map_from_json(
    obj: &serde_json::Map<String, Value>,
) -> Result<BTreeMap<String, Schema>, InvalidSchemaError> {
    obj.iter()
        .map(|(name, sub_schema)| Ok((name.clone(), Schema::from_json(sub_schema)?)))
        .collect()
}

fn schema_map_to_json(map: &BTreeMap<String, Schema>) -> Value {
    Value::Object(
        map.iter()
            .map(|(name, sub_schema)| (name.clone(), sub_schema.to_json()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_from_str() {
        assert_eq!(Err(()), "Boolean".parse::<Type>());
        assert_eq!(Ok(Type::Boolean), "boolean".parse());
        assert_eq!(Ok(Type::Float32), "float32".parse());
        assert_eq!(Ok(Type::Float64), "float64".parse());
        assert_eq!(Ok(Type::Int8), "int8".parse());
        assert_eq!(Ok(Type::Uint8), "uint8".parse());
        assert_eq!(Ok(Type::Int16), "int16".parse());
        assert_eq!(Ok(Type::Uint16), "uint16".parse());
        assert_eq!(Ok(Type::Int32), "int32".parse());
        assert_eq!(Ok(Type::Uint32), "uint32".parse());
        assert_eq!(Ok(Type::String), "string".parse());
        assert_eq!(Ok(Type::Timestamp), "timestamp".parse());
    }

    #[test]
    fn from_json_not_object() {
        for value in [json!(null), json!(true), json!(3), json!("{}"), json!([])].iter() {
            assert_eq!(
                Err(InvalidSchemaError::SchemaNotObject),
                Schema::from_json(value)
            );
        }
    }

    #[test]
    fn from_json_empty() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Empty,
            }),
            Schema::from_json(&json!({}))
        );
    }

    #[test]
    fn from_json_ignores_unknown_keys() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Type(Type::String),
            }),
            Schema::from_json(&json!({
                "type": "string",
                "title": "a name",
                "description": "some documentation",
            }))
        );
    }

    #[test]
    fn from_json_definitions() {
        assert_eq!(
            Ok(Schema {
                definitions: Some(
                    vec![(
                        "a".to_owned(),
                        Schema {
                            definitions: None,
                            form: Form::Type(Type::Boolean),
                        }
                    )]
                    .into_iter()
                    .collect()
                ),
                form: Form::Empty,
            }),
            Schema::from_json(&json!({
                "definitions": {
                    "a": { "type": "boolean" },
                },
            }))
        );

        assert_eq!(
            Err(InvalidSchemaError::DefinitionsNotObject),
            Schema::from_json(&json!({ "definitions": true }))
        );
    }

    #[test]
    fn from_json_ref() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Ref("a".to_owned()),
            }),
            Schema::from_json(&json!({ "ref": "a" }))
        );

        assert_eq!(
            Err(InvalidSchemaError::RefNotString),
            Schema::from_json(&json!({ "ref": 3 }))
        );
    }

    #[test]
    fn from_json_type() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Type(Type::Timestamp),
            }),
            Schema::from_json(&json!({ "type": "timestamp" }))
        );

        assert_eq!(
            Err(InvalidSchemaError::TypeNotString),
            Schema::from_json(&json!({ "type": 3 }))
        );

        assert_eq!(
            Err(InvalidSchemaError::InvalidType("uint64".to_owned())),
            Schema::from_json(&json!({ "type": "uint64" }))
        );
    }

    #[test]
    fn from_json_enum() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Enum(
                    vec!["bar".to_owned(), "foo".to_owned()]
                        .into_iter()
                        .collect()
                ),
            }),
            Schema::from_json(&json!({ "enum": ["foo", "bar"] }))
        );

        assert_eq!(
            Err(InvalidSchemaError::EnumNotArray),
            Schema::from_json(&json!({ "enum": "foo" }))
        );

        assert_eq!(
            Err(InvalidSchemaError::EmptyEnum),
            Schema::from_json(&json!({ "enum": [] }))
        );

        assert_eq!(
            Err(InvalidSchemaError::EnumValueNotString),
            Schema::from_json(&json!({ "enum": ["foo", 3] }))
        );

        assert_eq!(
            Err(InvalidSchemaError::RepeatedEnumValue("foo".to_owned())),
            Schema::from_json(&json!({ "enum": ["foo", "bar", "foo"] }))
        );
    }

    #[test]
    fn from_json_elements() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Elements(Box::new(Schema {
                    definitions: None,
                    form: Form::Type(Type::String),
                })),
            }),
            Schema::from_json(&json!({ "elements": { "type": "string" } }))
        );

        assert_eq!(
            Err(InvalidSchemaError::SchemaNotObject),
            Schema::from_json(&json!({ "elements": 3 }))
        );
    }

    #[test]
    fn from_json_properties() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Properties(Properties {
                    required: Some(
                        vec![(
                            "a".to_owned(),
                            Schema {
                                definitions: None,
                                form: Form::Type(Type::Boolean),
                            }
                        )]
                        .into_iter()
                        .collect()
                    ),
                    optional: Some(
                        vec![(
                            "b".to_owned(),
                            Schema {
                                definitions: None,
                                form: Form::Type(Type::Boolean),
                            }
                        )]
                        .into_iter()
                        .collect()
                    ),
                    additional: true,
                }),
            }),
            Schema::from_json(&json!({
                "properties": {
                    "a": { "type": "boolean" },
                },
                "optionalProperties": {
                    "b": { "type": "boolean" },
                },
                "additionalProperties": true,
            }))
        );

        // additionalProperties defaults to false, and presence of the
        // properties / optionalProperties keywords is preserved.
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Properties(Properties {
                    required: None,
                    optional: Some(BTreeMap::new()),
                    additional: false,
                }),
            }),
            Schema::from_json(&json!({ "optionalProperties": {} }))
        );

        assert_eq!(
            Err(InvalidSchemaError::PropertiesNotObject),
            Schema::from_json(&json!({ "properties": 3 }))
        );

        assert_eq!(
            Err(InvalidSchemaError::OptionalPropertiesNotObject),
            Schema::from_json(&json!({ "optionalProperties": 3 }))
        );

        assert_eq!(
            Err(InvalidSchemaError::AdditionalPropertiesNotBoolean),
            Schema::from_json(&json!({
                "properties": {},
                "additionalProperties": "false",
            }))
        );

        assert_eq!(
            Err(InvalidSchemaError::InvalidForm),
            Schema::from_json(&json!({ "additionalProperties": true }))
        );
    }

    #[test]
    fn from_json_values() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Values(Box::new(Schema {
                    definitions: None,
                    form: Form::Type(Type::String),
                })),
            }),
            Schema::from_json(&json!({ "values": { "type": "string" } }))
        );

        assert_eq!(
            Err(InvalidSchemaError::SchemaNotObject),
            Schema::from_json(&json!({ "values": "string" }))
        );
    }

    #[test]
    fn from_json_discriminator() {
        assert_eq!(
            Ok(Schema {
                definitions: None,
                form: Form::Discriminator(Discriminator {
                    tag: "version".to_owned(),
                    mapping: vec![(
                        "v1".to_owned(),
                        Schema {
                            definitions: None,
                            form: Form::Properties(Properties {
                                required: Some(BTreeMap::new()),
                                optional: None,
                                additional: false,
                            }),
                        }
                    )]
                    .into_iter()
                    .collect(),
                }),
            }),
            Schema::from_json(&json!({
                "discriminator": {
                    "tag": "version",
                    "mapping": {
                        "v1": { "properties": {} },
                    },
                },
            }))
        );

        assert_eq!(
            Err(InvalidSchemaError::DiscriminatorNotObject),
            Schema::from_json(&json!({ "discriminator": "version" }))
        );

        assert_eq!(
            Err(InvalidSchemaError::DiscriminatorTagNotString),
            Schema::from_json(&json!({ "discriminator": { "mapping": {} } }))
        );

        assert_eq!(
            Err(InvalidSchemaError::DiscriminatorTagNotString),
            Schema::from_json(&json!({ "discriminator": { "tag": 3, "mapping": {} } }))
        );

        assert_eq!(
            Err(InvalidSchemaError::DiscriminatorMappingNotObject),
            Schema::from_json(&json!({ "discriminator": { "tag": "version" } }))
        );
    }

    #[test]
    fn from_json_ambiguous_form() {
        assert_eq!(
            Err(InvalidSchemaError::InvalidForm),
            Schema::from_json(&json!({ "ref": "a", "type": "boolean" }))
        );

        assert_eq!(
            Err(InvalidSchemaError::InvalidForm),
            Schema::from_json(&json!({ "elements": {}, "values": {} }))
        );

        assert_eq!(
            Err(InvalidSchemaError::InvalidForm),
            Schema::from_json(&json!({ "ref": "a", "additionalProperties": true }))
        );
    }

    #[test]
    fn verify_ok() {
        let schema = Schema::from_json(&json!({
            "definitions": {
                "a": { "type": "boolean" },
                "b": { "elements": { "ref": "a" } },
            },
            "discriminator": {
                "tag": "t",
                "mapping": {
                    "x": {
                        "properties": { "p": { "ref": "b" } },
                        "optionalProperties": { "q": {} },
                    },
                },
            },
        }))
        .unwrap();

        assert_eq!(Ok(()), schema.verify());
    }

    #[test]
    fn verify_non_root_definitions() {
        let schema = Schema::from_json(&json!({
            "elements": {
                "definitions": {},
            },
        }))
        .unwrap();

        assert_eq!(Err(InvalidSchemaError::NonRootDefinitions), schema.verify());
    }

    #[test]
    fn verify_no_such_definition() {
        let schema = Schema::from_json(&json!({ "ref": "a" })).unwrap();
        assert_eq!(
            Err(InvalidSchemaError::NoSuchDefinition("a".to_owned())),
            schema.verify()
        );

        let schema = Schema::from_json(&json!({
            "definitions": {
                "b": {},
            },
            "ref": "a",
        }))
        .unwrap();

        assert_eq!(
            Err(InvalidSchemaError::NoSuchDefinition("a".to_owned())),
            schema.verify()
        );

        // refs are checked within definitions too
        let schema = Schema::from_json(&json!({
            "definitions": {
                "b": { "ref": "a" },
            },
        }))
        .unwrap();

        assert_eq!(
            Err(InvalidSchemaError::NoSuchDefinition("a".to_owned())),
            schema.verify()
        );
    }

    #[test]
    fn verify_ambiguous_property() {
        let schema = Schema::from_json(&json!({
            "properties": {
                "a": {},
            },
            "optionalProperties": {
                "a": {},
            },
        }))
        .unwrap();

        assert_eq!(
            Err(InvalidSchemaError::AmbiguousProperty("a".to_owned())),
            schema.verify()
        );
    }

    #[test]
    fn verify_non_properties_mapping() {
        let schema = Schema::from_json(&json!({
            "discriminator": {
                "tag": "t",
                "mapping": {
                    "x": { "type": "boolean" },
                },
            },
        }))
        .unwrap();

        assert_eq!(Err(InvalidSchemaError::NonPropertiesMapping), schema.verify());

        let schema = Schema::from_json(&json!({
            "discriminator": {
                "tag": "t",
                "mapping": {
                    "x": {},
                },
            },
        }))
        .unwrap();

        assert_eq!(Err(InvalidSchemaError::NonPropertiesMapping), schema.verify());
    }

    #[test]
    fn verify_repeated_tag_in_properties() {
        let schema = Schema::from_json(&json!({
            "discriminator": {
                "tag": "t",
                "mapping": {
                    "x": { "properties": { "t": {} } },
                },
            },
        }))
        .unwrap();

        assert_eq!(
            Err(InvalidSchemaError::RepeatedTagInProperties("t".to_owned())),
            schema.verify()
        );

        let schema = Schema::from_json(&json!({
            "discriminator": {
                "tag": "t",
                "mapping": {
                    "x": { "optionalProperties": { "t": {} } },
                },
            },
        }))
        .unwrap();

        assert_eq!(
            Err(InvalidSchemaError::RepeatedTagInProperties("t".to_owned())),
            schema.verify()
        );
    }

    #[test]
    fn to_json_round_trip() {
        let input = json!({
            "definitions": {
                "a": { "type": "boolean" },
                "b": { "enum": ["bar", "foo"] },
            },
            "discriminator": {
                "tag": "t",
                "mapping": {
                    "x": {
                        "properties": { "p": { "ref": "a" } },
                        "optionalProperties": { "q": { "elements": { "ref": "b" } } },
                        "additionalProperties": true,
                    },
                    "y": {
                        "optionalProperties": { "v": { "values": {} } },
                    },
                },
            },
        });

        let schema = Schema::from_json(&input).unwrap();
        assert_eq!(input, schema.to_json());
        assert_eq!(Ok(schema.clone()), Schema::from_json(&schema.to_json()));
    }

    #[test]
    fn invalid_schemas_spec() {
        let test_cases: BTreeMap<String, Value> =
            serde_json::from_str(include_str!("../spec/tests/invalid-schemas.json"))
                .expect("parse invalid-schemas.json");

        for (name, value) in test_cases {
            let result = Schema::from_json(&value).and_then(|schema| schema.verify());
            assert!(result.is_err(), "schema not rejected: {}", name);
        }
    }
}
