//! Recursive dispatch
//!
//! Given a value, the spec node describing it and its path, decide which
//! validator applies and hand over. Composite validators call back in
//! through [`ValidationContext::validate`], so the whole document is walked
//! by mutual recursion between this module and the validators.

use serde_json::Value;

use crate::constants::{resolve_constant, Resolution};
use crate::diagnostic::Diagnostic;
use crate::document::Document;
use crate::path::KeyPath;
use crate::registry::{BuiltinType, Registry, TypeValidator, WILDCARD};
use crate::spec::{SpecNode, StyleSpec};
use crate::validators::{FunctionValidator, ObjectValidator};
use crate::value_kind::{value_kind, ValueKind};

/// Read-only inputs shared by every step of one validation run
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub document: &'a Document,
    pub spec: &'a StyleSpec,
    pub registry: &'a Registry,
}

impl<'a> ValidationContext<'a> {
    pub fn new(document: &'a Document, spec: &'a StyleSpec, registry: &'a Registry) -> Self {
        Self {
            document,
            spec,
            registry,
        }
    }

    /// Validate `value` against `node`; see [`dispatch`]
    pub fn validate(&self, value: &Value, node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        dispatch(self, value, node, path)
    }

    /// The spec's `$version`
    pub fn version(&self) -> u64 {
        self.spec.version()
    }
}

/// Validate one value against one spec node.
///
/// 1. `@name` constant references are resolved first. A reference that
///    cannot be used yields a single diagnostic and nothing else.
/// 2. A `function` node given an object goes to the function validator.
/// 3. A registered `type` goes to its validator; `*` accepts anything.
/// 4. Anything else is an object schema: either the named node its `type`
///    refers to, or the node itself.
pub fn dispatch(
    cx: &ValidationContext<'_>,
    value: &Value,
    node: SpecNode<'_>,
    path: &KeyPath,
) -> Vec<Diagnostic> {
    let value = match resolve_constant(value, path, cx.document, cx.version()) {
        Resolution::Unchanged => value,
        Resolution::Resolved(resolved) => resolved,
        Resolution::Rejected(diagnostic) => return vec![diagnostic],
    };

    if node.is_function() && value_kind(value) == ValueKind::Object {
        tracing::trace!(path = %path, "dispatch: function");
        return match cx.registry.get(BuiltinType::Function.name()) {
            Some(validator) => validator.validate(cx, value, node, path),
            None => FunctionValidator.validate(cx, value, node, path),
        };
    }

    let type_name = node.type_name();
    if type_name == Some(WILDCARD) {
        return Vec::new();
    }
    if let Some(validator) = type_name.and_then(|name| cx.registry.get(name)) {
        tracing::trace!(path = %path, ?type_name, "dispatch: registered type");
        return validator.validate(cx, value, node, path);
    }

    let object_node = type_name
        .and_then(|name| cx.spec.node(name))
        .unwrap_or(node);
    tracing::trace!(path = %path, ?type_name, "dispatch: object");
    match cx.registry.get(BuiltinType::Object.name()) {
        Some(validator) => validator.validate(cx, value, object_node, path),
        None => ObjectValidator::new().validate(cx, value, object_node, path),
    }
}
