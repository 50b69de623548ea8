//! Style layers
//!
//! Besides the members declared by the spec's `layer` node, a layer has
//! rules that span the whole document: ids are unique, `ref` points at
//! another layer, and `source` names an entry of `sources` whose type fits
//! the layer type.

use serde_json::{Map, Value};
use std::sync::Arc;

use super::{FilterValidator, ObjectValidator};
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::TypeValidator;
use crate::spec::SpecNode;

const LAYER_NODE: &str = "layer";

/// Members a ref layer inherits and may not set itself
const REF_PROHIBITED: [&str; 5] = ["type", "source", "source-layer", "filter", "layout"];

fn str_member<'v>(object: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
    object.get(key).and_then(Value::as_str)
}

pub struct LayerValidator;

impl LayerValidator {
    fn layers<'d>(cx: &ValidationContext<'d>) -> &'d [Value] {
        match cx.document.get("layers") {
            Some(Value::Array(layers)) => layers,
            _ => &[],
        }
    }

    fn check_ref<'d>(
        cx: &ValidationContext<'d>,
        layer: &Map<String, Value>,
        reference: &Value,
        value: &Value,
        path: &KeyPath,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<&'d str> {
        for key in REF_PROHIBITED {
            if layer.contains_key(key) {
                diagnostics.push(Diagnostic::format(
                    path,
                    Some(value),
                    "\"%s\" is prohibited for ref layers",
                    &[&key],
                ));
            }
        }

        let name = reference.as_str()?;
        let parent = Self::layers(cx)
            .iter()
            .filter_map(Value::as_object)
            .find(|l| str_member(l, "id") == Some(name));

        match parent {
            None => {
                diagnostics.push(Diagnostic::format(
                    &path.key("ref"),
                    Some(reference),
                    "ref layer \"%s\" not found",
                    &[&name],
                ));
                None
            }
            Some(parent) if parent.contains_key("ref") => {
                diagnostics.push(Diagnostic::new(
                    &path.key("ref"),
                    Some(reference),
                    "ref cannot reference another ref layer",
                ));
                None
            }
            Some(parent) => str_member(parent, "type"),
        }
    }

    fn check_source(
        cx: &ValidationContext<'_>,
        layer: &Map<String, Value>,
        layer_type: Option<&str>,
        value: &Value,
        path: &KeyPath,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(source) = layer.get("source") else {
            diagnostics.push(Diagnostic::new(path, Some(value), "missing required property \"source\""));
            return;
        };
        let Some(name) = source.as_str() else {
            // kind errors come from the `source` member's own node
            return;
        };

        let Some(definition) = cx.document.get("sources").and_then(|s| s.get(name)) else {
            diagnostics.push(Diagnostic::format(
                &path.key("source"),
                Some(source),
                "source \"%s\" not found",
                &[&name],
            ));
            return;
        };

        let id = str_member(layer, "id").unwrap_or_default();
        let source_type = definition.get("type").and_then(Value::as_str);
        let message = match (source_type, layer_type) {
            (Some("vector"), Some("raster")) => Some("layer \"%s\" requires a raster source"),
            (Some("raster"), Some(t)) if t != "raster" => Some("layer \"%s\" requires a vector source"),
            (Some("vector"), _) if !layer.contains_key("source-layer") => {
                Some("layer \"%s\" must specify a \"source-layer\"")
            }
            _ => None,
        };
        if let Some(template) = message {
            diagnostics.push(Diagnostic::format(path, Some(value), template, &[&id]));
        }
    }
}

impl TypeValidator for LayerValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let layer_node = cx.spec.node(LAYER_NODE).unwrap_or(node);
        let Value::Object(layer) = value else {
            return ObjectValidator::new().validate(cx, value, layer_node, path);
        };

        let mut diagnostics = Vec::new();
        let mut layer_type = str_member(layer, "type").map(str::to_string);

        // only layers of the document's own `layers` array can clash
        let layers = Self::layers(cx);
        let index = layers.iter().position(|l| std::ptr::eq(l, value));
        if let (Some(id), Some(index)) = (str_member(layer, "id"), index) {
            if layers[..index]
                .iter()
                .filter_map(|l| l.get("id").and_then(Value::as_str))
                .any(|other| other == id)
            {
                diagnostics.push(Diagnostic::format(
                    &path.key("id"),
                    layer.get("id"),
                    "duplicate layer id \"%s\"",
                    &[&id],
                ));
            }
        }

        match layer.get("ref") {
            Some(reference) => {
                if let Some(parent_type) = Self::check_ref(cx, layer, reference, value, path, &mut diagnostics) {
                    layer_type = Some(parent_type.to_string());
                }
            }
            None => {
                if layer_type.is_none() {
                    diagnostics.push(Diagnostic::new(path, Some(value), "either \"type\" or \"ref\" is required"));
                }
                if layer_type.as_deref() != Some("background") {
                    Self::check_source(cx, layer, layer_type.as_deref(), value, path, &mut diagnostics);
                }
            }
        }

        let object = ObjectValidator::new()
            .with_element("filter", Arc::new(FilterValidator))
            .with_element("layout", Arc::new(PropertiesValidator::new("layout", layer_type.clone())))
            .with_element("paint", Arc::new(PropertiesValidator::new("paint", layer_type)));
        diagnostics.extend(object.validate(cx, value, layer_node, path));
        diagnostics
    }
}

/// `layout` / `paint` objects, checked against `<group>_<layer type>`
struct PropertiesValidator {
    node_name: Option<String>,
}

impl PropertiesValidator {
    fn new(group: &str, layer_type: Option<String>) -> Self {
        Self {
            node_name: layer_type.map(|t| format!("{}_{}", group, t)),
        }
    }
}

impl TypeValidator for PropertiesValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, _node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        match self.node_name.as_deref().and_then(|name| cx.spec.node(name)) {
            Some(node) => cx.validate(value, node, path),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostic::Diagnostic;
    use crate::dispatch::ValidationContext;
    use crate::document::Document;
    use crate::path::KeyPath;
    use crate::registry::Registry;
    use crate::spec::{SpecNode, StyleSpec};
    use serde_json::{json, Value};

    fn layer_spec() -> StyleSpec {
        StyleSpec::from_value(json!({
            "$version": 8,
            "layer": {
                "id": {"type": "string", "required": true},
                "type": {"type": "enum", "values": {"fill": {}, "line": {}, "raster": {}, "background": {}}},
                "ref": {"type": "string"},
                "source": {"type": "string"},
                "source-layer": {"type": "string"},
                "filter": {"type": "filter"},
                "layout": {"type": "layout"},
                "paint": {"type": "paint"}
            },
            "layout_fill": {"visibility": {"type": "enum", "values": {"visible": {}, "none": {}}}},
            "paint_fill": {"fill-color": {"type": "color", "function": true}, "fill-opacity": {"type": "number", "minimum": 0, "maximum": 1}},
            "paint_line": {"line-width": {"type": "number", "minimum": 0}}
        }))
        .unwrap()
    }

    fn run(style: Value) -> Vec<String> {
        let spec = layer_spec();
        let registry = Registry::builtin();
        let doc = Document::new(style);
        let cx = ValidationContext::new(&doc, &spec, &registry);
        let node = json!({"type": "layer"});

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        if let Some(Value::Array(layers)) = doc.get("layers") {
            for (i, layer) in layers.iter().enumerate() {
                diagnostics.extend(cx.validate(layer, SpecNode::from_value(&node), &KeyPath::root().key("layers").index(i)));
            }
        }
        diagnostics.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_valid_layers() {
        let style = json!({
            "sources": {"v": {"type": "vector"}},
            "layers": [
                {"id": "bg", "type": "background"},
                {"id": "water", "type": "fill", "source": "v", "source-layer": "water",
                 "filter": ["==", "class", "lake"], "paint": {"fill-color": "#00f", "fill-opacity": 0.5}},
                {"id": "water-copy", "ref": "water", "paint": {"fill-opacity": 1}}
            ]
        });
        assert!(run(style).is_empty());
    }

    #[test]
    fn test_duplicate_ids_and_missing_type() {
        let style = json!({
            "layers": [
                {"id": "a", "type": "background"},
                {"id": "a"}
            ]
        });
        assert_eq!(
            run(style),
            vec![
                "layers[1].id: duplicate layer id \"a\"",
                "layers[1]: either \"type\" or \"ref\" is required",
                "layers[1]: missing required property \"source\"",
            ]
        );
    }

    #[test]
    fn test_duplicate_ids_only_checked_within_layers() {
        let spec = layer_spec();
        let registry = Registry::builtin();
        let doc = Document::new(json!({
            "layers": [{"id": "a", "type": "background"}],
            "extra": [{"id": "z", "type": "background"}, {"id": "a", "type": "background"}]
        }));
        let cx = ValidationContext::new(&doc, &spec, &registry);
        let node = json!({"type": "layer"});

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        if let Some(Value::Array(extra)) = doc.get("extra") {
            for (i, layer) in extra.iter().enumerate() {
                diagnostics.extend(cx.validate(layer, SpecNode::from_value(&node), &KeyPath::root().key("extra").index(i)));
            }
        }
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_source_rules() {
        let style = json!({
            "sources": {"v": {"type": "vector"}, "r": {"type": "raster"}},
            "layers": [
                {"id": "a", "type": "fill", "source": "missing"},
                {"id": "b", "type": "raster", "source": "v", "source-layer": "x"},
                {"id": "c", "type": "line", "source": "r"},
                {"id": "d", "type": "line", "source": "v"}
            ]
        });
        assert_eq!(
            run(style),
            vec![
                "layers[0].source: source \"missing\" not found",
                "layers[1]: layer \"b\" requires a raster source",
                "layers[2]: layer \"c\" requires a vector source",
                "layers[3]: layer \"d\" must specify a \"source-layer\"",
            ]
        );
    }

    #[test]
    fn test_ref_rules() {
        let style = json!({
            "layers": [
                {"id": "a", "type": "background"},
                {"id": "b", "ref": "a", "type": "fill"},
                {"id": "c", "ref": "b"},
                {"id": "d", "ref": "nope"}
            ]
        });
        assert_eq!(
            run(style),
            vec![
                "layers[1]: \"type\" is prohibited for ref layers",
                "layers[2].ref: ref cannot reference another ref layer",
                "layers[3].ref: ref layer \"nope\" not found",
            ]
        );
    }

    #[test]
    fn test_paint_and_layout_use_layer_type() {
        let style = json!({
            "layers": [
                {"id": "bg", "type": "fill", "source": "s", "source-layer": "x",
                 "layout": {"visibility": "hidden"},
                 "paint": {"fill-opacity": 2, "line-width": 1}}
            ],
            "sources": {"s": {"type": "vector"}}
        });
        assert_eq!(
            run(style),
            vec![
                "layers[0].layout.visibility: expected one of [\"visible\", \"none\"], \"hidden\" found",
                "layers[0].paint.fill-opacity: 2 is greater than the maximum value 1",
                "layers[0].paint.line-width: unknown property \"line-width\"",
            ]
        );
    }
}
