//! Service, port and operation definitions.

use crate::types::{Attribute, QName, TypeNode};

/// Operation argument descriptor.
pub type Argument = Attribute;

/// Single part of a WSDL message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePart {
    /// Part name.
    pub name: String,
    /// Element the part refers to (document style).
    pub element: Option<QName>,
    /// Type the part refers to (rpc style).
    pub type_ref: Option<QName>,
}

impl MessagePart {
    /// Creates a part referring to an element.
    #[must_use]
    pub fn element(name: impl Into<String>, element: QName) -> Self {
        Self {
            name: name.into(),
            element: Some(element),
            type_ref: None,
        }
    }

    /// Creates a part referring to a type.
    #[must_use]
    pub fn typed(name: impl Into<String>, type_ref: QName) -> Self {
        Self {
            name: name.into(),
            element: None,
            type_ref: Some(type_ref),
        }
    }

    /// Returns the referenced element, or the type for type-based parts.
    #[must_use]
    pub fn reference(&self) -> Option<&QName> {
        self.element.as_ref().or(self.type_ref.as_ref())
    }

    /// Returns the local name of the referenced element, or of the type for
    /// type-based parts.
    #[must_use]
    pub fn element_name(&self) -> Option<&str> {
        self.element
            .as_ref()
            .or(self.type_ref.as_ref())
            .map(|q| q.name.as_str())
    }
}

/// SOAP binding details of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationBinding {
    /// Whether request/response bodies use the document/literal wrapped
    /// convention.
    pub output_wrapped: bool,
    /// First part of the input message.
    pub input_part: Option<MessagePart>,
    /// First part of the output message.
    pub output_part: Option<MessagePart>,
}

impl OperationBinding {
    /// Creates a wrapped binding between two wrapper elements.
    #[must_use]
    pub fn wrapped(input: QName, output: QName) -> Self {
        Self {
            output_wrapped: true,
            input_part: Some(MessagePart::element("parameters", input)),
            output_part: Some(MessagePart::element("parameters", output)),
        }
    }

    /// Creates an unwrapped binding returning the given element.
    #[must_use]
    pub fn bare(output: Option<QName>) -> Self {
        Self {
            output_wrapped: false,
            input_part: None,
            output_part: output.map(|q| MessagePart::element("return", q)),
        }
    }

    /// Returns the input wrapper element name.
    #[must_use]
    pub fn input_element(&self) -> Option<&str> {
        self.input_part.as_ref().and_then(MessagePart::element_name)
    }

    /// Returns the output wrapper (or response) element name.
    #[must_use]
    pub fn output_element(&self) -> Option<&str> {
        self.output_part.as_ref().and_then(MessagePart::element_name)
    }
}

/// Service operation.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    /// Operation name as declared in the port type.
    pub name: String,
    /// Ordered argument descriptors.
    pub arguments: Vec<Argument>,
    /// Binding details.
    pub binding: OperationBinding,
}

impl Operation {
    /// Creates a new operation without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, binding: OperationBinding) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            binding,
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// Service port.
#[derive(Debug, Clone, Default)]
pub struct Port {
    /// Port name.
    pub name: String,
    /// Endpoint address, if declared.
    pub location: Option<String>,
    /// Operations reachable through the port.
    pub operations: Vec<Operation>,
}

impl Port {
    /// Creates a new empty port.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            operations: Vec::new(),
        }
    }

    /// Appends an operation.
    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }
}

/// One service definition with the types visible to it.
#[derive(Debug, Clone, Default)]
pub struct ServiceDefinition {
    /// Service name.
    pub name: String,
    /// Target namespace of the defining document.
    pub target_namespace: String,
    /// Top-level type nodes.
    pub types: Vec<TypeNode>,
    /// Ports of the service.
    pub ports: Vec<Port>,
}

impl ServiceDefinition {
    /// Creates a new empty service definition.
    #[must_use]
    pub fn new(name: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_namespace: target_namespace.into(),
            types: Vec::new(),
            ports: Vec::new(),
        }
    }

    /// Appends a type, assigning the next ordinal.
    #[must_use]
    pub fn with_type(mut self, node: TypeNode) -> Self {
        let ordinal = self.types.len();
        self.types.push(node.with_ordinal(ordinal));
        self
    }

    /// Appends a port.
    #[must_use]
    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    /// Looks up a type by qualified name.
    #[must_use]
    pub fn find_type(&self, name: &QName) -> Option<&TypeNode> {
        self.types
            .iter()
            .find(|t| t.name.as_deref() == Some(name.name.as_str()) && t.namespace == name.namespace)
    }

    /// Returns the number of distinct operation names across all ports.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        self.ports
            .iter()
            .flat_map(|p| &p.operations)
            .filter(|op| seen.insert(op.name.as_str()))
            .count()
    }
}
