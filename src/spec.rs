//! Style spec types
//!
//! A [`StyleSpec`] is the versioned tree of named nodes that documents are
//! validated against. It is loaded once and only read afterwards.
//! [`SpecNode`] is a borrowed view of one node inside it.

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{Result, SpecError};
use crate::registry::{Registry, WILDCARD};
use crate::value_kind::value_kind;

/// Member names with meaning for the dispatcher itself
const TYPE_KEY: &str = "type";
const FUNCTION_KEY: &str = "function";
const VERSION_KEY: &str = "$version";

/// Node every style document is validated against
pub const ROOT_NODE: &str = "$root";

static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();

/// A borrowed view of one style spec node
#[derive(Debug, Clone, Copy)]
pub struct SpecNode<'s> {
    raw: &'s Map<String, Value>,
}

impl<'s> SpecNode<'s> {
    pub fn new(raw: &'s Map<String, Value>) -> Self {
        Self { raw }
    }

    /// View any JSON value as a node. Non-objects become the empty node.
    pub fn from_value(value: &'s Value) -> Self {
        match value {
            Value::Object(raw) => Self { raw },
            _ => Self::empty(),
        }
    }

    /// A node without any members
    pub fn empty() -> Self {
        Self {
            raw: EMPTY.get_or_init(Map::new),
        }
    }

    /// The declared type name.
    ///
    /// `None` when `type` is absent or is not a string: object schemas may
    /// declare a field that happens to be called `type`.
    pub fn type_name(&self) -> Option<&'s str> {
        self.raw.get(TYPE_KEY).and_then(Value::as_str)
    }

    /// Whether a dynamic expression may stand in for a literal here
    pub fn is_function(&self) -> bool {
        self.raw
            .get(FUNCTION_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Raw member lookup
    pub fn get(&self, key: &str) -> Option<&'s Value> {
        self.raw.get(key)
    }

    /// Child node for a field of an object schema
    pub fn field(&self, key: &str) -> Option<SpecNode<'s>> {
        match self.raw.get(key) {
            Some(Value::Object(raw)) => Some(SpecNode { raw }),
            _ => None,
        }
    }

    /// All object-shaped members, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&'s str, SpecNode<'s>)> {
        self.raw.iter().filter_map(|(key, value)| match value {
            Value::Object(raw) => Some((key.as_str(), SpecNode { raw })),
            _ => None,
        })
    }

    pub fn u64(&self, key: &str) -> Option<u64> {
        self.raw.get(key).and_then(Value::as_u64)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.raw.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Whether a document must provide this field
    pub fn is_required(&self) -> bool {
        self.flag("required") && !self.raw.contains_key("default")
    }

    pub fn raw(&self) -> &'s Map<String, Value> {
        self.raw
    }
}

/// A versioned style spec
#[derive(Debug, Clone)]
pub struct StyleSpec {
    version: u64,
    nodes: Map<String, Value>,
}

impl StyleSpec {
    /// Build from a parsed spec document
    pub fn from_value(value: Value) -> Result<Self> {
        let nodes = match value {
            Value::Object(nodes) => nodes,
            other => {
                return Err(SpecError::NotAnObject {
                    found: value_kind(&other).to_string(),
                })
            }
        };
        let version = nodes
            .get(VERSION_KEY)
            .and_then(Value::as_u64)
            .ok_or(SpecError::MissingVersion)?;

        tracing::debug!(version, nodes = nodes.len(), "loaded style spec");
        Ok(Self { version, nodes })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// The `$version` format number
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Look up a named node
    pub fn node(&self, name: &str) -> Option<SpecNode<'_>> {
        match self.nodes.get(name) {
            Some(Value::Object(raw)) => Some(SpecNode::new(raw)),
            _ => None,
        }
    }

    /// The node for whole documents
    pub fn root(&self) -> Result<SpecNode<'_>> {
        self.node(ROOT_NODE)
            .ok_or_else(|| SpecError::MissingNode(ROOT_NODE.to_string()))
    }

    /// Whether the spec has a top-level entry of any shape under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Assert that every type name resolves.
    ///
    /// A node whose `type` is neither registered nor the name of another
    /// spec entry would silently be validated as an object schema of itself.
    /// Checks named nodes and their direct fields.
    pub fn check_types(&self, registry: &Registry) -> Result<()> {
        for (name, value) in &self.nodes {
            let Value::Object(raw) = value else { continue };
            let node = SpecNode::new(raw);

            self.check_type(name, node, registry)?;
            if node.type_name().is_none() {
                for (field, child) in node.fields() {
                    self.check_type(&format!("{}.{}", name, field), child, registry)?;
                }
            }
        }
        Ok(())
    }

    fn check_type(&self, name: &str, node: SpecNode<'_>, registry: &Registry) -> Result<()> {
        match node.type_name() {
            Some(ty) if ty != WILDCARD && !registry.contains(ty) && !self.contains(ty) => {
                Err(SpecError::UnresolvedType {
                    node: name.to_string(),
                    type_name: ty.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_name_ignores_field_named_type() {
        let raw = json!({"type": {"type": "enum", "values": ["fill"]}, "id": {"type": "string"}});
        let node = SpecNode::from_value(&raw);
        assert_eq!(node.type_name(), None);
        assert_eq!(node.field("type").and_then(|n| n.type_name()), Some("enum"));
        assert_eq!(node.fields().count(), 2);
    }

    #[test]
    fn test_required_with_default_is_not_required() {
        let raw = json!({"type": "number", "required": true, "default": 1});
        assert!(!SpecNode::from_value(&raw).is_required());
    }

    #[test]
    fn test_missing_version_is_rejected() {
        let err = StyleSpec::from_value(json!({"$root": {}})).unwrap_err();
        assert!(matches!(err, SpecError::MissingVersion));

        let err = StyleSpec::from_value(json!([])).unwrap_err();
        assert!(matches!(err, SpecError::NotAnObject { .. }));
    }

    #[test]
    fn test_check_types_flags_unresolved_names() {
        let registry = Registry::builtin();
        let good = StyleSpec::from_value(json!({
            "$version": 8,
            "$root": {"sources": {"type": "sources"}, "name": {"type": "string"}},
            "sources": {"*": {"type": "source"}}
        }))
        .unwrap();
        assert!(good.check_types(&registry).is_ok());

        let bad = StyleSpec::from_value(json!({
            "$version": 8,
            "$root": {"light": {"type": "light"}}
        }))
        .unwrap();
        match bad.check_types(&registry) {
            Err(SpecError::UnresolvedType { node, type_name }) => {
                assert_eq!(node, "$root.light");
                assert_eq!(type_name, "light");
            }
            other => panic!("Expected UnresolvedType, got {:?}", other),
        }
    }
}
