//! Enumerations
//!
//! `values` lists the allowed values, either as an array or as an object
//! whose keys are the allowed strings.

use serde_json::Value;

use super::{render, same_value};
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::TypeValidator;
use crate::spec::SpecNode;

pub struct EnumValidator;

impl EnumValidator {
    fn allows(values: &Value, value: &Value) -> bool {
        match values {
            Value::Array(allowed) => allowed.iter().any(|v| same_value(v, value)),
            Value::Object(allowed) => value.as_str().is_some_and(|s| allowed.contains_key(s)),
            _ => true,
        }
    }

    fn listing(values: &Value) -> String {
        let rendered: Vec<String> = match values {
            Value::Array(allowed) => allowed.iter().map(render).collect(),
            Value::Object(allowed) => allowed
                .keys()
                .map(|k| render(&Value::String(k.clone())))
                .collect(),
            _ => Vec::new(),
        };
        rendered.join(", ")
    }
}

impl TypeValidator for EnumValidator {
    fn validate(&self, _cx: &ValidationContext<'_>, value: &Value, node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Some(values) = node.get("values") else {
            return Vec::new();
        };
        if Self::allows(values, value) {
            return Vec::new();
        }
        vec![Diagnostic::format(
            path,
            Some(value),
            "expected one of [%s], %s found",
            &[&Self::listing(values), &render(value)],
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{check, messages, spec};
    use crate::document::Document;
    use serde_json::json;

    #[test]
    fn test_array_values() {
        let spec = spec(8);
        let doc = Document::new(json!({}));
        let node = json!({"type": "enum", "values": ["butt", "round", "square"]});

        assert!(check(&spec, &doc, &json!("round"), &node).is_empty());
        assert_eq!(
            messages(&check(&spec, &doc, &json!("flat"), &node)),
            vec!["x: expected one of [\"butt\", \"round\", \"square\"], \"flat\" found"]
        );
    }

    #[test]
    fn test_object_values_only_match_strings() {
        let spec = spec(8);
        let doc = Document::new(json!({}));
        let node = json!({"type": "enum", "values": {"visible": {}, "none": {}}});

        assert!(check(&spec, &doc, &json!("none"), &node).is_empty());
        assert_eq!(
            messages(&check(&spec, &doc, &json!(1), &node)),
            vec!["x: expected one of [\"visible\", \"none\"], 1 found"]
        );
    }

    #[test]
    fn test_numbers_match_regardless_of_representation() {
        let spec = spec(8);
        let doc = Document::new(json!({}));
        let node = json!({"type": "enum", "values": [7, 8]});
        let float: serde_json::Value = serde_json::from_str("8.0").unwrap();

        assert!(check(&spec, &doc, &float, &node).is_empty());
        assert_eq!(
            messages(&check(&spec, &doc, &json!(8.5), &node)),
            vec!["x: expected one of [7, 8], 8.5 found"]
        );
    }
}
