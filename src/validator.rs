//! Spec + registry bundle
//!
//! [`Validator`] owns a style spec and a registry, checks once that the
//! spec's type names resolve, and then validates any number of documents.
//! It holds no mutable state and can be shared between threads.

use serde_json::Value;

use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::dispatch::ValidationContext;
use crate::document::Document;
use crate::error::Result;
use crate::path::KeyPath;
use crate::registry::Registry;
use crate::spec::{SpecNode, StyleSpec};
use crate::style::validate_style;

#[derive(Debug, Clone)]
pub struct Validator {
    spec: StyleSpec,
    registry: Registry,
}

impl Validator {
    /// Bundle a spec with a registry, rejecting unresolvable type names
    pub fn new(spec: StyleSpec, registry: Registry) -> Result<Self> {
        spec.check_types(&registry)?;
        Ok(Self { spec, registry })
    }

    /// Bundle a spec with the built-in validators
    pub fn with_builtins(spec: StyleSpec) -> Result<Self> {
        Self::new(spec, Registry::builtin())
    }

    pub fn spec(&self) -> &StyleSpec {
        &self.spec
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate a whole document against `$root`
    pub fn validate_style(&self, document: &Document) -> Result<Diagnostics> {
        validate_style(document, &self.spec, &self.registry)
    }

    /// Validate one value of `document` against one node
    pub fn validate(
        &self,
        document: &Document,
        value: &Value,
        node: SpecNode<'_>,
        path: &KeyPath,
    ) -> Vec<Diagnostic> {
        ValidationContext::new(document, &self.spec, &self.registry).validate(value, node, path)
    }
}
