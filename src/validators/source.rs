//! Data sources
//!
//! A source's `type` picks the node its remaining members are checked
//! against: `source_<type>`, with tiled sources falling back to the shared
//! `source_tile` node.

use serde_json::{json, Value};

use super::{kind_mismatch, EnumValidator};
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::TypeValidator;
use crate::spec::SpecNode;

const TILED: [&str; 3] = ["vector", "raster", "raster-dem"];
const UNTILED: [&str; 4] = ["geojson", "video", "image", "canvas"];
const TILE_FALLBACK_NODE: &str = "source_tile";

pub struct SourceValidator;

impl TypeValidator for SourceValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, _node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Value::Object(source) = value else {
            return vec![kind_mismatch(path, value, "object")];
        };
        let Some(source_type) = source.get("type") else {
            return vec![Diagnostic::new(path, Some(value), "\"type\" is required")];
        };

        let name = source_type.as_str().unwrap_or_default();
        let node_name = format!("source_{}", name);
        let node = if TILED.contains(&name) {
            cx.spec.node(&node_name).or_else(|| cx.spec.node(TILE_FALLBACK_NODE))
        } else if UNTILED.contains(&name) {
            cx.spec.node(&node_name)
        } else {
            let known: Vec<&str> = TILED.iter().chain(UNTILED.iter()).copied().collect();
            let values = json!({ "values": known });
            return EnumValidator.validate(cx, source_type, SpecNode::from_value(&values), &path.key("type"));
        };

        match node {
            Some(node) => cx.validate(value, node, path),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{check, messages};
    use crate::document::Document;
    use crate::spec::StyleSpec;
    use serde_json::json;

    fn source_spec() -> StyleSpec {
        StyleSpec::from_value(json!({
            "$version": 8,
            "source_tile": {
                "type": {"required": true, "type": "enum", "values": {"vector": {}, "raster": {}, "raster-dem": {}}},
                "url": {"type": "string"},
                "tiles": {"type": "array", "value": "string"},
                "tileSize": {"type": "number"}
            },
            "source_geojson": {
                "type": {"required": true, "type": "enum", "values": {"geojson": {}}},
                "data": {"type": "*"},
                "maxzoom": {"type": "number", "maximum": 24}
            }
        }))
        .unwrap()
    }

    fn run(value: serde_json::Value) -> Vec<String> {
        let doc = Document::new(json!({}));
        messages(&check(&source_spec(), &doc, &value, &json!({"type": "source"})))
    }

    #[test]
    fn test_valid_sources() {
        assert!(run(json!({"type": "vector", "url": "mapbox://streets"})).is_empty());
        assert!(run(json!({"type": "geojson", "data": {"type": "FeatureCollection", "features": []}})).is_empty());
    }

    #[test]
    fn test_type_rules() {
        assert_eq!(run(json!([])), vec!["x: object expected, array found"]);
        assert_eq!(run(json!({"url": "a"})), vec!["x: \"type\" is required"]);
        assert_eq!(
            run(json!({"type": "pmtiles"})),
            vec!["x.type: expected one of [\"vector\", \"raster\", \"raster-dem\", \"geojson\", \"video\", \"image\", \"canvas\"], \"pmtiles\" found"]
        );
    }

    #[test]
    fn test_members_checked_against_typed_node() {
        assert_eq!(
            run(json!({"type": "raster", "tiles": ["a", 2], "tileSize": "256"})),
            vec![
                "x.tiles[1]: string expected, number found",
                "x.tileSize: number expected, string found",
            ]
        );
        assert_eq!(
            run(json!({"type": "geojson", "data": "x.json", "maxzoom": 30, "cluster": true})),
            vec![
                "x.maxzoom: 30 is greater than the maximum value 24",
                "x.cluster: unknown property \"cluster\"",
            ]
        );
    }
}
