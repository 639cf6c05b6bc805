//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// WSDL parsing error.
    #[error("WSDL parse error: {0}")]
    Parse(#[from] wsdlgen_schema::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Type declarations that depend on each other in a cycle.
    #[error("circular type dependency between: {}", members.join(", "))]
    CircularDependency {
        /// Raw names of the types left unordered.
        members: Vec<String>,
    },

    /// Wrapped response element carrying more than one field.
    #[error(
        "ambiguous response shape for operation '{operation}': wrapper '{wrapper}' has fields {}",
        fields.join(", ")
    )]
    AmbiguousResponse {
        /// Operation name.
        operation: String,
        /// Output wrapper type name.
        wrapper: String,
        /// Field names of the wrapper.
        fields: Vec<String>,
    },

    /// Two schema types with the same local name in different namespaces.
    #[error("duplicate type '{name}' declared in '{first}' and '{second}'")]
    DuplicateType {
        /// Local type name.
        name: String,
        /// Namespace of the first declaration.
        first: String,
        /// Namespace of the second declaration.
        second: String,
    },
}
