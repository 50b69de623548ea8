//! Scalar validators: `string`, `boolean`, `number` and the `*` wildcard

use serde_json::Value;

use super::kind_mismatch;
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::TypeValidator;
use crate::spec::SpecNode;

pub struct StringValidator;

impl TypeValidator for StringValidator {
    fn validate(&self, _cx: &ValidationContext<'_>, value: &Value, _node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        match value {
            Value::String(_) => Vec::new(),
            _ => vec![kind_mismatch(path, value, "string")],
        }
    }
}

pub struct BooleanValidator;

impl TypeValidator for BooleanValidator {
    fn validate(&self, _cx: &ValidationContext<'_>, value: &Value, _node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        match value {
            Value::Bool(_) => Vec::new(),
            _ => vec![kind_mismatch(path, value, "boolean")],
        }
    }
}

/// Numbers, bounded by the node's optional `minimum` / `maximum`
pub struct NumberValidator;

impl TypeValidator for NumberValidator {
    fn validate(&self, _cx: &ValidationContext<'_>, value: &Value, node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Value::Number(number) = value else {
            return vec![kind_mismatch(path, value, "number")];
        };
        let Some(n) = number.as_f64() else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        if let Some(minimum) = node.get("minimum").filter(|m| m.is_number()) {
            if minimum.as_f64().is_some_and(|min| n < min) {
                diagnostics.push(Diagnostic::format(
                    path,
                    Some(value),
                    "%s is less than the minimum value %s",
                    &[number, minimum],
                ));
            }
        }
        if let Some(maximum) = node.get("maximum").filter(|m| m.is_number()) {
            if maximum.as_f64().is_some_and(|max| n > max) {
                diagnostics.push(Diagnostic::format(
                    path,
                    Some(value),
                    "%s is greater than the maximum value %s",
                    &[number, maximum],
                ));
            }
        }
        diagnostics
    }
}

/// Accepts anything
pub struct WildcardValidator;

impl TypeValidator for WildcardValidator {
    fn validate(&self, _cx: &ValidationContext<'_>, _value: &Value, _node: SpecNode<'_>, _path: &KeyPath) -> Vec<Diagnostic> {
        Vec::new()
    }
}
