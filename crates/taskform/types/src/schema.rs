//! Form schemas and live form values
//!
//! A [`FormSchema`] is the declarative side of a form: field types,
//! constraints, and which fields are required. Properties are kept in a
//! `BTreeMap` so derived (filtered) schemas compare deeply equal regardless
//! of construction order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ── Field Schema ─────────────────────────────────────────────────────

/// The value type of a form field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Integer,
    Boolean,
    /// A single choice from `options`
    Select,
    Date,
}

/// One field's declarative description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Display label
    pub title: String,
    /// Value type
    pub field_type: FieldType,
    /// Allowed values for `Select` fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Default value applied when the form opens with no stored value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Help text shown under the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSchema {
    pub fn new(title: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            title: title.into(),
            field_type,
            options: Vec::new(),
            default: None,
            description: None,
        }
    }

    pub fn text(title: impl Into<String>) -> Self {
        Self::new(title, FieldType::Text)
    }

    pub fn boolean(title: impl Into<String>) -> Self {
        Self::new(title, FieldType::Boolean)
    }

    pub fn select(
        title: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut schema = Self::new(title, FieldType::Select);
        schema.options = options.into_iter().map(Into::into).collect();
        schema
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// ── Form Schema ──────────────────────────────────────────────────────

/// The declarative object tree describing a form's fields
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Form title
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Field name → field description, in stable order
    pub properties: BTreeMap<String, FieldSchema>,
    /// Names of fields that must be filled before submit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl FormSchema {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        self.properties.insert(name.into(), field);
        self
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.properties.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Remove a field, cascading to the `required` list
    pub fn remove_field(&mut self, name: &str) -> Option<FieldSchema> {
        self.required.retain(|r| r != name);
        self.properties.remove(name)
    }
}

// ── Form Values ──────────────────────────────────────────────────────

/// Live form values, keyed by field name
///
/// Values persist across visibility changes: hiding a field does not erase
/// what the user typed into it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(pub BTreeMap<String, Value>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact_schema() -> FormSchema {
        FormSchema::new("Contact details")
            .with_field(
                "contact_method",
                FieldSchema::select("Contact method", ["email", "phone", "mail"]),
            )
            .with_field("email", FieldSchema::text("Email address"))
            .with_required("contact_method")
            .with_required("email")
    }

    #[test]
    fn test_remove_field_cascades_required() {
        let mut schema = contact_schema();
        assert!(schema.has_field("email"));
        assert_eq!(schema.required, vec!["contact_method", "email"]);

        schema.remove_field("email");
        assert!(!schema.has_field("email"));
        assert_eq!(schema.required, vec!["contact_method"]);
    }

    #[test]
    fn test_field_builders() {
        let field = FieldSchema::select("Choice", ["a", "b"])
            .with_default(json!("a"))
            .with_description("Pick one");
        assert_eq!(field.field_type, FieldType::Select);
        assert_eq!(field.options, vec!["a", "b"]);
        assert_eq!(field.default, Some(json!("a")));
    }

    #[test]
    fn test_form_values_accessors() {
        let mut values = FormValues::new().with("email", json!("kai@example.com"));
        assert!(values.contains("email"));
        assert_eq!(values.get("email"), Some(&json!("kai@example.com")));

        values.set("email", json!("ren@example.com"));
        assert_eq!(values.get("email"), Some(&json!("ren@example.com")));

        values.remove("email");
        assert!(values.is_empty());
    }

    #[test]
    fn test_schema_serde_roundtrip() {
        let schema = contact_schema();
        let json = serde_json::to_string(&schema).unwrap();
        let back: FormSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);
    }
}
