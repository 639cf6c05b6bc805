//! Resolved schema graph.
//!
//! The graph is the read-only input of code generation: every service
//! definition together with the type nodes and operations visible to it.

use crate::service::ServiceDefinition;

/// Resolved description of one or more services.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    /// Service definitions in document order.
    pub services: Vec<ServiceDefinition>,
}

impl SchemaGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a service definition.
    #[must_use]
    pub fn with_service(mut self, service: ServiceDefinition) -> Self {
        self.services.push(service);
        self
    }

    /// Looks up a service definition by name.
    #[must_use]
    pub fn get_service(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Returns true if the graph has no service definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_lookup() {
        let graph = SchemaGraph::new()
            .with_service(ServiceDefinition::new("A", "urn:a"))
            .with_service(ServiceDefinition::new("B", "urn:b"));

        assert!(!graph.is_empty());
        assert_eq!(graph.get_service("B").map(|s| s.target_namespace.as_str()), Some("urn:b"));
        assert!(graph.get_service("C").is_none());
    }
}
