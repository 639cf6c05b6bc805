//! Generator configuration.

use std::collections::BTreeSet;
use wsdlgen_schema::{SOAP_ENCODING_NAMESPACE, WSDL_NAMESPACE, XSD_NAMESPACE};

/// Namespaces whose types already exist in the target environment.
pub const STANDARD_TYPE_NAMESPACES: [&str; 3] =
    [SOAP_ENCODING_NAMESPACE, WSDL_NAMESPACE, XSD_NAMESPACE];

/// Options recognized by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Namespaces excluded from type extraction.
    pub standard_type_namespaces: BTreeSet<String>,
    /// Omit wrapper types of document/literal wrapped operations.
    pub remove_input_output_messages: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            standard_type_namespaces: STANDARD_TYPE_NAMESPACES
                .iter()
                .map(|ns| (*ns).to_string())
                .collect(),
            remove_input_output_messages: true,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace to the standard set.
    #[must_use]
    pub fn with_standard_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.standard_type_namespaces.insert(namespace.into());
        self
    }

    /// Enables or disables wrapper pruning.
    #[must_use]
    pub fn with_remove_input_output_messages(mut self, remove: bool) -> Self {
        self.remove_input_output_messages = remove;
        self
    }

    /// Returns true if the namespace is a standard namespace.
    #[must_use]
    pub fn is_standard(&self, namespace: &str) -> bool {
        self.standard_type_namespaces.contains(namespace)
    }
}
