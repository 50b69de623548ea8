//! Whole-document validation
//!
//! Entry point for validating a complete style against a spec's `$root`
//! node, plus the root-level rules that no spec node expresses.

use serde_json::Value;
use std::sync::Arc;

use crate::constants::{resolve_constant, Resolution};
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::dispatch::ValidationContext;
use crate::document::Document;
use crate::error::Result;
use crate::path::KeyPath;
use crate::registry::{Registry, TypeValidator};
use crate::spec::{SpecNode, StyleSpec};
use crate::validators::{kind_mismatch, ConstantsValidator, ObjectValidator};

const GLYPH_TOKENS: [&str; 2] = ["{fontstack}", "{range}"];

/// Validate a whole style.
///
/// The document root is checked against `$root`. Where `$root` declares
/// `glyphs` it must be a URL template, and a `constants` member is checked
/// even when `$root` no longer declares it.
pub fn validate_style(document: &Document, spec: &StyleSpec, registry: &Registry) -> Result<Diagnostics> {
    let root = spec.root()?;
    let cx = ValidationContext::new(document, spec, registry);

    let mut object = ObjectValidator::new();
    if root.field("glyphs").is_some() {
        object = object.with_element("glyphs", Arc::new(GlyphsValidator));
    }
    if root.field("constants").is_none() {
        object = object.with_element("constants", Arc::new(ConstantsValidator));
    }

    let diagnostics = Diagnostics::from(object.validate(&cx, document.root(), root, &KeyPath::root()));
    tracing::debug!(
        version = spec.version(),
        diagnostics = diagnostics.len(),
        "validated style"
    );
    Ok(diagnostics)
}

/// Glyph URL templates
struct GlyphsValidator;

impl TypeValidator for GlyphsValidator {
    fn validate(&self, cx: &ValidationContext<'_>, value: &Value, node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let value = match resolve_constant(value, path, cx.document, cx.version()) {
            Resolution::Unchanged => value,
            Resolution::Resolved(resolved) => resolved,
            Resolution::Rejected(diagnostic) => return vec![diagnostic],
        };
        let Value::String(url) = value else {
            return vec![kind_mismatch(path, value, "string")];
        };

        let mut diagnostics = cx.validate(value, node, path);
        for token in GLYPH_TOKENS {
            if !url.contains(token) {
                diagnostics.push(Diagnostic::format(
                    path,
                    Some(value),
                    "\"glyphs\" url must include a \"%s\" token",
                    &[&token],
                ));
            }
        }
        diagnostics
    }
}
