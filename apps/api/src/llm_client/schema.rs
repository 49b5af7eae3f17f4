//! Response schemas for schema-constrained generation.
//!
//! A `Schema` is sent verbatim as Gemini's `responseSchema` and is reused to
//! check the returned JSON before it is deserialized into a typed record.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// Subset of the OpenAPI schema object accepted by `generationConfig.responseSchema`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_properties"
    )]
    pub properties: Vec<(&'static str, Schema)>,
    /// Keeps the model's field order aligned with declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("required field `{0}` is blank")]
    BlankField(String),

    #[error("field `{path}` should be {expected:?}, got {found}")]
    WrongType {
        path: String,
        expected: SchemaType,
        found: &'static str,
    },
}

fn serialize_properties<S: Serializer>(
    properties: &[(&'static str, Schema)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(properties.len()))?;
    for (name, schema) in properties {
        map.serialize_entry(name, schema)?;
    }
    map.end()
}

impl Schema {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: Vec::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    pub fn string_array() -> Self {
        Self::array(Self::string())
    }

    pub fn object(properties: Vec<(&'static str, Schema)>) -> Self {
        Self {
            property_ordering: properties.iter().map(|(name, _)| *name).collect(),
            properties,
            ..Self::of(SchemaType::Object)
        }
    }

    pub fn required(mut self, fields: &[&'static str]) -> Self {
        self.required = fields.to_vec();
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Normalizes `value` against this schema and returns it.
    ///
    /// Null object members are dropped so that optional fields fall back to
    /// their serde defaults. Required members must be present, and every
    /// declared member that is present must have the declared type. Members
    /// the schema does not declare are left alone.
    pub fn conform(&self, mut value: Value) -> Result<Value, SchemaViolation> {
        strip_nulls(&mut value);
        self.check(&value, "$")?;
        Ok(value)
    }

    fn check(&self, value: &Value, path: &str) -> Result<(), SchemaViolation> {
        let type_ok = match self.kind {
            SchemaType::String => value.is_string(),
            SchemaType::Number => value.is_number(),
            SchemaType::Integer => value.is_i64() || value.is_u64(),
            SchemaType::Boolean => value.is_boolean(),
            SchemaType::Array => value.is_array(),
            SchemaType::Object => value.is_object(),
        };
        if !type_ok {
            return Err(SchemaViolation::WrongType {
                path: path.to_string(),
                expected: self.kind,
                found: json_kind(value),
            });
        }

        match value {
            Value::Object(map) => {
                for field in &self.required {
                    if !map.contains_key(*field) {
                        return Err(SchemaViolation::MissingField(format!("{path}.{field}")));
                    }
                }
                for (name, schema) in &self.properties {
                    if let Some(member) = map.get(*name) {
                        schema.check(member, &format!("{path}.{name}"))?;
                    }
                }
            }
            Value::Array(elements) => {
                if let Some(items) = &self.items {
                    for (i, element) in elements.iter().enumerate() {
                        items.check(element, &format!("{path}[{i}]"))?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(elements) => elements.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
