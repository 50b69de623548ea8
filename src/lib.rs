//! Style Spec Validator
//!
//! Validates a document (typically a map style) against a versioned,
//! declarative style spec and reports every violation as a structured
//! [`Diagnostic`].
//!
//! ## Features
//!
//! - **Non-fail-fast**: one violation never hides another; diagnostics are
//!   returned in document traversal order
//! - **Pluggable types**: every spec type name maps to a [`TypeValidator`]
//!   in a caller-supplied [`Registry`]
//! - **Legacy constants**: `@name` references resolve against the
//!   document's constants table for format versions up to 7
//!
//! ## Architecture
//!
//! ```text
//! validate_style ──► ObjectValidator($root)
//!                         │
//!                         ▼
//!        ┌──────────► dispatch(value, node, path)
//!        │               ├─ @constant      → resolve_constant
//!        │               ├─ function node  → FunctionValidator
//!        │               ├─ registered type→ Registry[type]
//!        │               └─ otherwise      → ObjectValidator(named node)
//!        │                        │
//!        └──── child values ◄─────┘
//! ```

pub mod config;
pub mod constants;
pub mod diagnostic;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod path;
pub mod registry;
pub mod spec;
pub mod style;
pub mod validator;
pub mod validators;
pub mod value_kind;

pub use config::ValidatorConfig;
pub use constants::{resolve_constant, Resolution, CONSTANTS_MAX_VERSION};
pub use diagnostic::{format_message, Diagnostic, Diagnostics};
pub use dispatch::{dispatch, ValidationContext};
pub use document::Document;
pub use error::{Result, SpecError};
pub use path::{KeyPath, Segment};
pub use registry::{BuiltinType, Registry, TypeValidator, WILDCARD};
pub use spec::{SpecNode, StyleSpec};
pub use style::validate_style;
pub use validator::Validator;
pub use value_kind::{value_kind, ValueKind};
