//! Legacy `@name` constant references
//!
//! Styles up to format version 7 may write `"@name"` anywhere a value is
//! expected and define `name` in a document-level constants table.
//! Version 8 removed the feature.

use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::document::Document;
use crate::path::KeyPath;

/// Marker that starts a constant reference
pub const CONSTANT_PREFIX: char = '@';

/// Last format version that allows constants
pub const CONSTANTS_MAX_VERSION: u64 = 7;

pub const DEPRECATED_MESSAGE: &str = "constants have been deprecated as of v8";

/// Outcome of looking at a value for a constant reference
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'d> {
    /// Not a reference
    Unchanged,
    /// The referenced value
    Resolved(&'d Value),
    /// The reference cannot be used; no further checks apply to this value
    Rejected(Diagnostic),
}

/// Resolve a constant reference against the document's table.
///
/// Tables may spell names with or without the leading `@`; the bare name
/// is tried first.
pub fn resolve_constant<'d>(
    value: &Value,
    path: &KeyPath,
    document: &'d Document,
    version: u64,
) -> Resolution<'d> {
    let Some(reference) = value.as_str() else {
        return Resolution::Unchanged;
    };
    let Some(name) = reference.strip_prefix(CONSTANT_PREFIX) else {
        return Resolution::Unchanged;
    };

    if version > CONSTANTS_MAX_VERSION {
        return Resolution::Rejected(Diagnostic::new(path, Some(value), DEPRECATED_MESSAGE));
    }

    let constants = document.constants();
    match constants.get(name).or_else(|| constants.get(reference)) {
        Some(resolved) => Resolution::Resolved(resolved),
        None => Resolution::Rejected(Diagnostic::format(
            path,
            Some(value),
            "constant \"%s\" not found",
            &[&reference],
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        Document::new(json!({"constants": {"water": "#00f", "@land": "#eee"}}))
    }

    #[test]
    fn test_plain_values_are_unchanged() {
        let path = KeyPath::root();
        assert_eq!(resolve_constant(&json!("water"), &path, &doc(), 7), Resolution::Unchanged);
        assert_eq!(resolve_constant(&json!(3), &path, &doc(), 7), Resolution::Unchanged);
    }

    #[test]
    fn test_resolves_bare_and_prefixed_names() {
        let doc = doc();
        let path = KeyPath::root();
        assert_eq!(resolve_constant(&json!("@water"), &path, &doc, 7), Resolution::Resolved(&json!("#00f")));
        assert_eq!(resolve_constant(&json!("@land"), &path, &doc, 6), Resolution::Resolved(&json!("#eee")));
    }

    #[test]
    fn test_missing_constant_is_rejected() {
        let path = KeyPath::root().key("paint").key("fill-color");
        match resolve_constant(&json!("@missing"), &path, &doc(), 7) {
            Resolution::Rejected(d) => {
                assert_eq!(d.path, path);
                assert_eq!(d.message, "constant \"@missing\" not found");
                assert_eq!(d.value, Some(json!("@missing")));
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_constants_deprecated_after_v7() {
        match resolve_constant(&json!("@water"), &KeyPath::root(), &doc(), 8) {
            Resolution::Rejected(d) => assert_eq!(d.message, DEPRECATED_MESSAGE),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }
}
