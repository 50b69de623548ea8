//! Dynamic values ("functions")
//!
//! Where a node is marked `function`, an object may stand in for a literal:
//!
//! ```text
//! {"stops": [[0, 1], [10, 4]], "base": 1.5}                  zoom function
//! {"property": "height", "stops": [[0, 1], [100, 4]]}        property function
//! {"property": "h", "stops": [[{"zoom": 1, "value": 0}, 1]]} zoom-and-property
//! {"property": "color", "type": "identity"}                  identity
//! ```
//!
//! The object itself is checked against the spec's `function` node; stop
//! outputs are checked against the node that allowed the function.

use serde_json::{Map, Value};
use std::sync::Arc;

use super::{kind_mismatch, same_value, ObjectValidator};
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::TypeValidator;
use crate::spec::SpecNode;
use crate::value_kind::{value_kind, ValueKind};

const FUNCTION_NODE: &str = "function";

/// Output types that can be interpolated between stops
const INTERPOLATED: [&str; 3] = ["number", "color", "array"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    Identity,
    Exponential,
    Interval,
    Categorical,
}

impl FunctionType {
    fn of(function: &Map<String, Value>, output: SpecNode<'_>) -> Self {
        match function.get("type").and_then(Value::as_str) {
            Some("identity") => Self::Identity,
            Some("exponential") => Self::Exponential,
            Some("interval") => Self::Interval,
            Some("categorical") => Self::Categorical,
            _ if output.type_name().is_some_and(|t| INTERPOLATED.contains(&t)) => Self::Exponential,
            _ => Self::Interval,
        }
    }
}

pub struct FunctionValidator;

impl TypeValidator for FunctionValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Value::Object(function) = value else {
            return vec![kind_mismatch(path, value, "object")];
        };

        // stop outputs are literals of the node's own type
        let mut output = node.raw().clone();
        output.remove("function");

        let function_type = FunctionType::of(function, SpecNode::new(&output));
        let is_property = function.contains_key("property");

        let stops = StopsValidator {
            output,
            function_type,
            is_property,
            is_zoom_and_property: is_property && first_domain_is_object(function),
        };
        let object = ObjectValidator::new().with_element("stops", Arc::new(stops));
        let function_node = cx.spec.node(FUNCTION_NODE).unwrap_or_else(SpecNode::empty);

        let mut diagnostics = object.validate(cx, value, function_node, path);

        if function_type == FunctionType::Identity && !is_property {
            diagnostics.push(Diagnostic::new(path, Some(value), "missing required property \"property\""));
        }
        if function_type != FunctionType::Identity && !function.contains_key("stops") {
            diagnostics.push(Diagnostic::new(path, Some(value), "missing required property \"stops\""));
        }
        diagnostics
    }
}

fn first_domain_is_object(function: &Map<String, Value>) -> bool {
    function
        .get("stops")
        .and_then(|stops| stops.get(0))
        .and_then(|stop| stop.get(0))
        .is_some_and(Value::is_object)
}

struct StopsValidator {
    output: Map<String, Value>,
    function_type: FunctionType,
    is_property: bool,
    is_zoom_and_property: bool,
}

impl StopsValidator {
    /// Check one stop's domain; returns the number used for ordering
    fn check_domain(&self, domain: &Value, path: &KeyPath, diagnostics: &mut Vec<Diagnostic>) -> Option<f64> {
        if self.is_zoom_and_property {
            let Value::Object(pair) = domain else {
                diagnostics.push(kind_mismatch(path, domain, "object"));
                return None;
            };
            match pair.get("zoom") {
                None => diagnostics.push(Diagnostic::new(path, Some(domain), "object stop key must have zoom")),
                Some(zoom) if !zoom.is_number() => diagnostics.push(kind_mismatch(&path.key("zoom"), zoom, "number")),
                Some(_) => {}
            }
            match pair.get("value") {
                None => diagnostics.push(Diagnostic::new(path, Some(domain), "object stop key must have value")),
                Some(v) => {
                    self.check_property_domain(v, &path.key("value"), diagnostics);
                }
            }
            return pair.get("zoom").and_then(Value::as_f64);
        }

        if self.is_property {
            return self.check_property_domain(domain, path, diagnostics);
        }

        match domain.as_f64() {
            Some(zoom) => Some(zoom),
            None => {
                diagnostics.push(kind_mismatch(path, domain, "number"));
                None
            }
        }
    }

    fn check_property_domain(&self, domain: &Value, path: &KeyPath, diagnostics: &mut Vec<Diagnostic>) -> Option<f64> {
        if self.function_type == FunctionType::Categorical {
            if !matches!(value_kind(domain), ValueKind::String | ValueKind::Number | ValueKind::Boolean) {
                diagnostics.push(Diagnostic::format(
                    path,
                    Some(domain),
                    "stop domain value must be a string, number, or boolean, %s found",
                    &[&value_kind(domain)],
                ));
            }
            return None;
        }
        match domain.as_f64() {
            Some(n) => Some(n),
            None => {
                diagnostics.push(kind_mismatch(path, domain, "number"));
                None
            }
        }
    }
}

impl TypeValidator for StopsValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, _node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Value::Array(stops) = value else {
            return vec![kind_mismatch(path, value, "array")];
        };
        if stops.is_empty() {
            return vec![Diagnostic::new(path, Some(value), "array must have at least one stop")];
        }

        let output = SpecNode::new(&self.output);
        let mut diagnostics = Vec::new();
        let mut previous: Option<f64> = None;
        let mut seen: Vec<&Value> = Vec::new();

        for (i, stop) in stops.iter().enumerate() {
            let stop_path = path.index(i);
            let Value::Array(pair) = stop else {
                diagnostics.push(kind_mismatch(&stop_path, stop, "array"));
                continue;
            };
            if pair.len() != 2 {
                diagnostics.push(Diagnostic::format(
                    &stop_path,
                    Some(stop),
                    "array length %s expected, length %s found",
                    &[&2, &pair.len()],
                ));
                continue;
            }

            let domain_path = stop_path.index(0);
            if let Some(current) = self.check_domain(&pair[0], &domain_path, &mut diagnostics) {
                if previous.is_some_and(|p| current < p) {
                    diagnostics.push(Diagnostic::new(
                        &domain_path,
                        Some(&pair[0]),
                        "stop domain values must appear in ascending order",
                    ));
                }
                previous = Some(current);
            }

            if self.function_type == FunctionType::Categorical {
                if seen.iter().any(|earlier| same_value(earlier, &pair[0])) {
                    diagnostics.push(Diagnostic::new(
                        &domain_path,
                        Some(&pair[0]),
                        "stop domain values must be unique",
                    ));
                }
                seen.push(&pair[0]);
            }

            diagnostics.extend(cx.validate(&pair[1], output, &stop_path.index(1)));
        }
        diagnostics
    }
}
