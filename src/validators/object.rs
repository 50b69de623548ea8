//! Object schemas
//!
//! An object node maps member names to child nodes; `*` matches any member
//! not declared explicitly. Individual members can be handed to a custom
//! validator instead of their declared node (functions use this for
//! `stops`, layers for `filter`, `layout` and `paint`).

use serde_json::Value;
use std::sync::Arc;

use super::kind_mismatch;
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::{TypeValidator, WILDCARD};
use crate::spec::SpecNode;

#[derive(Clone, Default)]
pub struct ObjectValidator {
    element_validators: Vec<(String, Arc<dyn TypeValidator>)>,
}

impl ObjectValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate member `key` (or every undeclared member, for `*`) with `validator`
    pub fn with_element(mut self, key: impl Into<String>, validator: Arc<dyn TypeValidator>) -> Self {
        self.element_validators.push((key.into(), validator));
        self
    }

    fn element(&self, key: &str) -> Option<&dyn TypeValidator> {
        self.element_validators
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl TypeValidator for ObjectValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Value::Object(object) = value else {
            return vec![kind_mismatch(path, value, "object")];
        };

        let mut diagnostics = Vec::new();
        for (key, member) in object {
            let member_path = path.key(key.as_str());
            let declared = node.field(key);
            let member_node = declared
                .or_else(|| node.field(WILDCARD))
                .unwrap_or_else(SpecNode::empty);

            if let Some(validator) = self.element(key) {
                diagnostics.extend(validator.validate(cx, member, member_node, &member_path));
            } else if let Some(declared) = declared {
                diagnostics.extend(cx.validate(member, declared, &member_path));
            } else if let Some(validator) = self.element(WILDCARD) {
                diagnostics.extend(validator.validate(cx, member, member_node, &member_path));
            } else if let Some(wildcard) = node.field(WILDCARD) {
                diagnostics.extend(cx.validate(member, wildcard, &member_path));
            } else {
                diagnostics.push(Diagnostic::format(
                    &member_path,
                    Some(member),
                    "unknown property \"%s\"",
                    &[key],
                ));
            }
        }

        for (key, field) in node.fields() {
            if key != WILDCARD && field.is_required() && !object.contains_key(key) {
                diagnostics.push(Diagnostic::format(
                    path,
                    Some(value),
                    "missing required property \"%s\"",
                    &[&key],
                ));
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{check, messages, spec};
    use crate::document::Document;
    use serde_json::json;

    #[test]
    fn test_unknown_and_missing_properties() {
        let spec = spec(8);
        let doc = Document::new(json!({}));
        let node = json!({
            "name": {"type": "string"},
            "version": {"type": "number", "required": true},
            "center": {"type": "array", "value": "number", "required": true, "default": [0, 0]}
        });

        let diags = check(&spec, &doc, &json!({"name": 1, "extra": true}), &node);
        assert_eq!(
            messages(&diags),
            vec![
                "x.name: string expected, number found",
                "x.extra: unknown property \"extra\"",
                "x: missing required property \"version\"",
            ]
        );
    }

    #[test]
    fn test_wildcard_field_covers_undeclared_members() {
        let spec = spec(8);
        let doc = Document::new(json!({}));
        let node = json!({"*": {"type": "number"}});

        let diags = check(&spec, &doc, &json!({"a": 1, "b": "2"}), &node);
        assert_eq!(messages(&diags), vec!["x.b: number expected, string found"]);
    }

    #[test]
    fn test_non_object_value() {
        let spec = spec(8);
        let doc = Document::new(json!({}));
        let diags = check(&spec, &doc, &json!([1]), &json!({"a": {"type": "string"}}));
        assert_eq!(messages(&diags), vec!["x: object expected, array found"]);
    }

    #[test]
    fn test_named_node_resolution() {
        let spec = crate::spec::StyleSpec::from_value(json!({
            "$version": 8,
            "light": {"anchor": {"type": "enum", "values": ["map", "viewport"]}}
        }))
        .unwrap();
        let doc = Document::new(json!({}));

        let diags = check(&spec, &doc, &json!({"anchor": "sky"}), &json!({"type": "light"}));
        assert_eq!(
            messages(&diags),
            vec!["x.anchor: expected one of [\"map\", \"viewport\"], \"sky\" found"]
        );
    }
}
