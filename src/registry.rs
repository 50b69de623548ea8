//! Type-validator registry
//!
//! Maps spec type names to the validators that own their semantics. The
//! registry is an ordinary immutable map built before validation starts;
//! callers may replace or extend entries, e.g. to stub a validator in a test.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::spec::SpecNode;
use crate::validators::{
    ArrayValidator, BooleanValidator, ColorValidator, ConstantsValidator, EnumValidator,
    FilterValidator, FunctionValidator, LayerValidator, NumberValidator, ObjectValidator,
    SourceValidator, StringValidator, WildcardValidator,
};

/// Type name that accepts any value
pub const WILDCARD: &str = "*";

/// Validation contract shared by every type.
///
/// Composite validators recurse by calling [`ValidationContext::validate`]
/// for each child with an extended path.
pub trait TypeValidator: Send + Sync {
    fn validate(
        &self,
        cx: &ValidationContext<'_>,
        value: &Value,
        node: SpecNode<'_>,
        path: &KeyPath,
    ) -> Vec<Diagnostic>;
}

/// The validators shipped with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Array,
    Boolean,
    Number,
    Color,
    Constants,
    Enum,
    Filter,
    Function,
    Layer,
    Object,
    Source,
    String,
    Wildcard,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 13] = [
        Self::Array,
        Self::Boolean,
        Self::Number,
        Self::Color,
        Self::Constants,
        Self::Enum,
        Self::Filter,
        Self::Function,
        Self::Layer,
        Self::Object,
        Self::Source,
        Self::String,
        Self::Wildcard,
    ];

    /// Name used for this type in spec nodes
    pub fn name(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Color => "color",
            Self::Constants => "constants",
            Self::Enum => "enum",
            Self::Filter => "filter",
            Self::Function => "function",
            Self::Layer => "layer",
            Self::Object => "object",
            Self::Source => "source",
            Self::String => "string",
            Self::Wildcard => WILDCARD,
        }
    }

    pub fn validator(&self) -> Arc<dyn TypeValidator> {
        match self {
            Self::Array => Arc::new(ArrayValidator),
            Self::Boolean => Arc::new(BooleanValidator),
            Self::Number => Arc::new(NumberValidator),
            Self::Color => Arc::new(ColorValidator),
            Self::Constants => Arc::new(ConstantsValidator),
            Self::Enum => Arc::new(EnumValidator),
            Self::Filter => Arc::new(FilterValidator),
            Self::Function => Arc::new(FunctionValidator),
            Self::Layer => Arc::new(LayerValidator),
            Self::Object => Arc::new(ObjectValidator::new()),
            Self::Source => Arc::new(SourceValidator),
            Self::String => Arc::new(StringValidator),
            Self::Wildcard => Arc::new(WildcardValidator),
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type name to validator map
#[derive(Clone, Default)]
pub struct Registry {
    validators: HashMap<String, Arc<dyn TypeValidator>>,
}

impl Registry {
    /// A registry with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with every built-in validator
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for ty in BuiltinType::ALL {
            registry.insert(ty.name(), ty.validator());
        }
        registry
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, validator: Arc<dyn TypeValidator>) {
        self.validators.insert(name.into(), validator);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, validator: impl TypeValidator + 'static) -> Self {
        self.insert(name, Arc::new(validator));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn TypeValidator> {
        self.validators.get(name).map(|v| v.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("types", &self.names()).finish()
    }
}
