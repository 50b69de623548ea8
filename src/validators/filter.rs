//! Filter expressions
//!
//! A filter is an array whose first element is an operator:
//!
//! ```text
//! ["==", key, value]          comparisons take exactly three elements
//! ["in", key, v1, v2, ...]    membership takes any number of values
//! ["all", f1, f2, ...]        combinators take nested filters
//! ["has", key]                existence takes exactly two elements
//! ```
//!
//! The special key `$type` compares against geometry types.

use serde_json::Value;

use super::{kind_mismatch, EnumValidator};
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::{BuiltinType, TypeValidator};
use crate::spec::SpecNode;
use crate::value_kind::{value_kind, ValueKind};

const OPERATOR_NODE: &str = "filter_operator";
const GEOMETRY_TYPE_NODE: &str = "geometry_type";
const GEOMETRY_TYPE_KEY: &str = "$type";

pub struct FilterValidator;

impl FilterValidator {
    fn check_enum(cx: &ValidationContext<'_>, node_name: &str, value: &Value, path: &KeyPath) -> Vec<Diagnostic> {
        match cx.spec.node(node_name) {
            Some(node) => EnumValidator.validate(cx, value, node, path),
            None => Vec::new(),
        }
    }

    fn check_key(key: &Value, path: &KeyPath) -> Option<Diagnostic> {
        match value_kind(key) {
            ValueKind::String => None,
            _ => Some(kind_mismatch(path, key, "string")),
        }
    }
}

impl TypeValidator for FilterValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, _node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Value::Array(filter) = value else {
            return vec![kind_mismatch(path, value, "array")];
        };
        let Some(operator) = filter.first() else {
            return vec![Diagnostic::new(path, Some(value), "filter array must have at least 1 element")];
        };

        let mut diagnostics = Self::check_enum(cx, OPERATOR_NODE, operator, &path.index(0));
        let op = operator.as_str().unwrap_or_default();
        let is_type_key = filter.get(1).and_then(Value::as_str) == Some(GEOMETRY_TYPE_KEY);

        match op {
            "<" | "<=" | ">" | ">=" | "==" | "!=" | "in" | "!in" => {
                if matches!(op, "<" | "<=" | ">" | ">=") && is_type_key {
                    diagnostics.push(Diagnostic::format(
                        path,
                        Some(value),
                        "\"$type\" cannot be use with operator \"%s\"",
                        &[&op],
                    ));
                }
                if !matches!(op, "in" | "!in") && filter.len() != 3 {
                    diagnostics.push(Diagnostic::format(
                        path,
                        Some(value),
                        "filter array for operator \"%s\" must have 3 elements",
                        &[&op],
                    ));
                }
                if let Some(key) = filter.get(1) {
                    diagnostics.extend(Self::check_key(key, &path.index(1)));
                }
                for (i, operand) in filter.iter().enumerate().skip(2) {
                    let operand_path = path.index(i);
                    if is_type_key {
                        diagnostics.extend(Self::check_enum(cx, GEOMETRY_TYPE_NODE, operand, &operand_path));
                    } else if !matches!(
                        value_kind(operand),
                        ValueKind::String | ValueKind::Number | ValueKind::Boolean
                    ) {
                        diagnostics.push(Diagnostic::format(
                            &operand_path,
                            Some(operand),
                            "string, number, or boolean expected, %s found",
                            &[&value_kind(operand)],
                        ));
                    }
                }
            }
            "any" | "all" | "none" => {
                let nested_validator = cx
                    .registry
                    .get(BuiltinType::Filter.name())
                    .unwrap_or(self as &dyn TypeValidator);
                for (i, nested) in filter.iter().enumerate().skip(1) {
                    diagnostics.extend(nested_validator.validate(cx, nested, SpecNode::empty(), &path.index(i)));
                }
            }
            "has" | "!has" => {
                if filter.len() != 2 {
                    diagnostics.push(Diagnostic::format(
                        path,
                        Some(value),
                        "filter array for \"%s\" operator must have 2 elements",
                        &[&op],
                    ));
                } else {
                    diagnostics.extend(Self::check_key(&filter[1], &path.index(1)));
                }
            }
            _ => {}
        }

        diagnostics
    }
}
