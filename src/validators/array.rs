//! Arrays
//!
//! `length` fixes the element count, `minimum-length` bounds it from
//! below, and `value` describes the elements: either a type name or an
//! inline node. Any other `value` (such as a list of type names for
//! heterogeneous tuples like function stops) leaves elements unchecked;
//! the owning validator checks those.

use serde_json::{Map, Value};

use super::kind_mismatch;
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::TypeValidator;
use crate::spec::SpecNode;

/// Members copied from the array node onto a synthesized element node
const INHERITED: [&str; 3] = ["values", "minimum", "maximum"];

/// Format versions before this one let array elements be functions
const ELEMENT_FUNCTIONS_BEFORE: u64 = 7;

pub struct ArrayValidator;

impl ArrayValidator {
    fn element_node(cx: &ValidationContext<'_>, node: SpecNode<'_>, type_name: &str) -> Map<String, Value> {
        let mut element = Map::new();
        element.insert("type".to_string(), Value::String(type_name.to_string()));
        for key in INHERITED {
            if let Some(v) = node.get(key) {
                element.insert(key.to_string(), v.clone());
            }
        }
        if cx.version() < ELEMENT_FUNCTIONS_BEFORE && node.is_function() {
            element.insert("function".to_string(), Value::Bool(true));
        }
        element
    }
}

impl TypeValidator for ArrayValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Value::Array(elements) = value else {
            return vec![kind_mismatch(path, value, "array")];
        };

        if let Some(length) = node.u64("length") {
            if elements.len() as u64 != length {
                return vec![Diagnostic::format(
                    path,
                    Some(value),
                    "array length %s expected, length %s found",
                    &[&length, &elements.len()],
                )];
            }
        }

        if let Some(minimum) = node.u64("minimum-length") {
            if (elements.len() as u64) < minimum {
                return vec![Diagnostic::format(
                    path,
                    Some(value),
                    "array length at least %s expected, length %s found",
                    &[&minimum, &elements.len()],
                )];
            }
        }

        let synthesized;
        let element_node = match node.get("value") {
            Some(Value::String(type_name)) => {
                synthesized = Self::element_node(cx, node, type_name);
                SpecNode::new(&synthesized)
            }
            Some(Value::Object(inline)) => SpecNode::new(inline),
            _ => return Vec::new(),
        };

        elements
            .iter()
            .enumerate()
            .flat_map(|(i, element)| cx.validate(element, element_node, &path.index(i)))
            .collect()
    }
}
