//! UI hints and display-if predicates
//!
//! Hints are the presentational side of the schema/hints pair: widget
//! choices, placeholders, and the per-field [`DisplayIf`] predicate that
//! gates runtime visibility.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ── Display-If ───────────────────────────────────────────────────────

/// One field-equals-value condition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// The field whose current value is examined
    pub field: String,
    /// The value it must equal
    pub value: Value,
}

impl FieldMatch {
    pub fn new(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

/// A declarative visibility predicate attached to a form field
///
/// The single-condition shape serializes as `{"field": ..., "value": ...}`;
/// the multi-condition shape as `{"all": [...]}` and requires every named
/// field to match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayIf {
    /// Visible when one field equals one value
    Equals(FieldMatch),
    /// Visible when every listed condition matches
    AllOf {
        all: Vec<FieldMatch>,
    },
}

impl DisplayIf {
    pub fn equals(field: impl Into<String>, value: Value) -> Self {
        DisplayIf::Equals(FieldMatch::new(field, value))
    }

    pub fn all(conditions: impl IntoIterator<Item = FieldMatch>) -> Self {
        DisplayIf::AllOf {
            all: conditions.into_iter().collect(),
        }
    }

    /// The conditions this predicate is made of
    pub fn conditions(&self) -> &[FieldMatch] {
        match self {
            DisplayIf::Equals(one) => std::slice::from_ref(one),
            DisplayIf::AllOf { all } => all,
        }
    }

    /// Every field name this predicate references
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.conditions().iter().map(|c| c.field.as_str())
    }
}

// ── Field Hint ───────────────────────────────────────────────────────

/// Presentational hints for one field
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldHint {
    /// Widget override (e.g. "radio", "textarea")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Placeholder text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Inline help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Visibility predicate; absent means always visible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_if: Option<DisplayIf>,
}

impl FieldHint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_widget(mut self, widget: impl Into<String>) -> Self {
        self.widget = Some(widget.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_display_if(mut self, display_if: DisplayIf) -> Self {
        self.display_if = Some(display_if);
        self
    }
}

// ── UI Hints ─────────────────────────────────────────────────────────

/// The per-field hint tree parallel to a [`FormSchema`](crate::FormSchema)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiHints(pub BTreeMap<String, FieldHint>);

impl UiHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hint(mut self, field: impl Into<String>, hint: FieldHint) -> Self {
        self.0.insert(field.into(), hint);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldHint> {
        self.0.get(field)
    }

    pub fn display_if(&self, field: &str) -> Option<&DisplayIf> {
        self.get(field).and_then(|h| h.display_if.as_ref())
    }

    pub fn remove_field(&mut self, field: &str) -> Option<FieldHint> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_condition_serde_shape() {
        let predicate = DisplayIf::equals("contact_method", json!("email"));
        let value = serde_json::to_value(&predicate).unwrap();
        assert_eq!(value, json!({"field": "contact_method", "value": "email"}));

        let back: DisplayIf = serde_json::from_value(value).unwrap();
        assert_eq!(back, predicate);
    }

    #[test]
    fn test_multi_condition_serde_shape() {
        let predicate = DisplayIf::all([
            FieldMatch::new("contact_method", json!("phone")),
            FieldMatch::new("urgent", json!(true)),
        ]);
        let value = serde_json::to_value(&predicate).unwrap();
        assert_eq!(
            value,
            json!({"all": [
                {"field": "contact_method", "value": "phone"},
                {"field": "urgent", "value": true}
            ]})
        );

        let back: DisplayIf = serde_json::from_value(value).unwrap();
        assert_eq!(back, predicate);
    }

    #[test]
    fn test_referenced_fields() {
        let predicate = DisplayIf::all([
            FieldMatch::new("a", json!(1)),
            FieldMatch::new("b", json!(2)),
        ]);
        let fields: Vec<&str> = predicate.referenced_fields().collect();
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn test_hint_builders() {
        let hints = UiHints::new().with_hint(
            "email",
            FieldHint::new()
                .with_widget("email")
                .with_placeholder("you@example.com")
                .with_display_if(DisplayIf::equals("contact_method", json!("email"))),
        );
        assert!(hints.display_if("email").is_some());
        assert!(hints.display_if("phone").is_none());
        assert_eq!(hints.len(), 1);
    }
}
