//! Built-in type validators
//!
//! One validator per spec type name. Scalar validators only look at the
//! value; composite ones (`array`, `object`, `function`, `layer`, `source`,
//! `filter`) recurse through the dispatcher.

pub mod array;
pub mod color;
pub mod constants;
pub mod enumeration;
pub mod filter;
pub mod function;
pub mod layer;
pub mod object;
pub mod scalar;
pub mod source;

pub use array::ArrayValidator;
pub use color::{is_css_color, ColorValidator};
pub use constants::ConstantsValidator;
pub use enumeration::EnumValidator;
pub use filter::FilterValidator;
pub use function::FunctionValidator;
pub use layer::LayerValidator;
pub use object::ObjectValidator;
pub use scalar::{BooleanValidator, NumberValidator, StringValidator, WildcardValidator};
pub use source::SourceValidator;

use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::path::KeyPath;
use crate::value_kind::value_kind;

/// `"<expected> expected, <kind> found"`
pub(crate) fn kind_mismatch(path: &KeyPath, value: &Value, expected: &str) -> Diagnostic {
    Diagnostic::format(
        path,
        Some(value),
        "%s expected, %s found",
        &[&expected, &value_kind(value)],
    )
}

/// Value equality where `8` and `8.0` are the same number
pub(crate) fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// JSON rendering used when a message quotes a value
pub(crate) fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Value;

    use crate::diagnostic::Diagnostic;
    use crate::dispatch::ValidationContext;
    use crate::document::Document;
    use crate::path::KeyPath;
    use crate::registry::Registry;
    use crate::spec::{SpecNode, StyleSpec};

    /// Run the dispatcher on `value` against an inline node
    pub fn check(spec: &StyleSpec, document: &Document, value: &Value, node: &Value) -> Vec<Diagnostic> {
        let registry = Registry::builtin();
        let cx = ValidationContext::new(document, spec, &registry);
        cx.validate(value, SpecNode::from_value(node), &KeyPath::root().key("x"))
    }

    pub fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
        diagnostics.iter().map(|d| d.to_string()).collect()
    }

    pub fn spec(version: u64) -> StyleSpec {
        StyleSpec::from_value(serde_json::json!({ "$version": version })).unwrap()
    }
}
