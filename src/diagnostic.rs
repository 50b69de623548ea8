//! Diagnostics
//!
//! The single output unit of validation. Every violation found anywhere in
//! a document becomes one [`Diagnostic`]; a valid subtree produces none.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::path::KeyPath;

// =============================================================================
// Message Formatting
// =============================================================================

/// Fill a printf-style template.
///
/// `%s`, `%d` and `%j` consume the next argument, `%%` is a literal percent
/// sign. A placeholder with no argument left is kept verbatim, and surplus
/// arguments are appended separated by spaces.
pub fn format_message(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(spec @ ('s' | 'd' | 'j')) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    for arg in args {
        out.push(' ');
        out.push_str(&arg.to_string());
    }
    out
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single validation violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Where in the document the violation was found
    pub path: KeyPath,
    /// The offending value, when one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: &KeyPath, value: Option<&Value>, message: impl Into<String>) -> Self {
        Self {
            path: path.clone(),
            value: value.cloned(),
            message: message.into(),
        }
    }

    /// Build a diagnostic from a printf-style template
    pub fn format(
        path: &KeyPath,
        value: Option<&Value>,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> Self {
        Self::new(path, value, format_message(template, args))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

// =============================================================================
// Diagnostics Collection
// =============================================================================

/// Ordered collection of diagnostics from one validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Diagnostic) {
        self.items.push(item);
    }

    /// Append diagnostics in order
    pub fn extend(&mut self, items: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(items);
    }

    /// Merge another collection, keeping its order after ours
    pub fn merge(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keep at most `limit` diagnostics
    pub fn truncate(&mut self, limit: usize) {
        self.items.truncate(limit);
    }

    /// Format all diagnostics for display
    pub fn format_all(&self) -> String {
        let mut output = String::new();

        for item in &self.items {
            output.push_str(&format!("{}\n", item));
        }

        if !self.is_empty() {
            output.push_str(&format!("\n{} error(s)\n", self.len()));
        }

        output
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(items: Vec<Diagnostic>) -> Self {
        Self { items }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_all())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
