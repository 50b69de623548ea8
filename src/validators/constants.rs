//! The document-level `constants` table

use serde_json::Value;

use super::kind_mismatch;
use crate::constants::{CONSTANTS_MAX_VERSION, CONSTANT_PREFIX, DEPRECATED_MESSAGE};
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::TypeValidator;
use crate::spec::SpecNode;

pub struct ConstantsValidator;

impl TypeValidator for ConstantsValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, _node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        if cx.version() > CONSTANTS_MAX_VERSION {
            return vec![Diagnostic::new(path, Some(value), DEPRECATED_MESSAGE)];
        }

        let Value::Object(constants) = value else {
            return vec![kind_mismatch(path, value, "object")];
        };

        constants
            .iter()
            .filter(|(name, _)| !name.starts_with(CONSTANT_PREFIX))
            .map(|(name, constant)| {
                Diagnostic::new(
                    &path.key(name.as_str()),
                    Some(constant),
                    "constants must start with \"@\"",
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{check, messages, spec};
    use crate::document::Document;
    use serde_json::json;

    #[test]
    fn test_names_need_prefix() {
        let doc = Document::new(json!({}));
        let diags = check(&spec(7), &doc, &json!({"@ok": 1, "bad": 2}), &json!({"type": "constants"}));
        assert_eq!(messages(&diags), vec!["x.bad: constants must start with \"@\""]);
    }

    #[test]
    fn test_deprecated_in_v8() {
        let doc = Document::new(json!({}));
        let diags = check(&spec(8), &doc, &json!({"@ok": 1}), &json!({"type": "constants"}));
        assert_eq!(messages(&diags), vec!["x: constants have been deprecated as of v8"]);
    }

    #[test]
    fn test_table_must_be_object() {
        let doc = Document::new(json!({}));
        let diags = check(&spec(7), &doc, &json!([]), &json!({"type": "constants"}));
        assert_eq!(messages(&diags), vec!["x: object expected, array found"]);
    }
}
