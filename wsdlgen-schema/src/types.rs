//! Schema type definitions.
//!
//! This module contains the resolved type graph nodes: qualified names,
//! type nodes (enumerations, complex and simple types) and their attributes.

/// XML Schema namespace.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
/// SOAP 1.1 encoding namespace.
pub const SOAP_ENCODING_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/encoding/";
/// WSDL 1.1 namespace.
pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";
/// WSDL 1.1 SOAP binding namespace.
pub const SOAP_BINDING_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
/// WSDL 1.1 SOAP 1.2 binding namespace.
pub const SOAP12_BINDING_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";

/// Namespace-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct QName {
    /// Namespace URI (empty when unqualified).
    pub namespace: String,
    /// Local part.
    pub name: String,
}

impl QName {
    /// Creates a new qualified name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Creates a name in the XML Schema namespace.
    #[must_use]
    pub fn xsd(name: impl Into<String>) -> Self {
        Self::new(XSD_NAMESPACE, name)
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.name)
    }
}

/// Kind of a resolved type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    /// Complex type with child elements/attributes.
    #[default]
    Complex,
    /// Simple type restricted to an enumeration of values.
    Enum,
    /// Simple type without enumeration facets.
    Simple,
}

/// Resolved type node of the schema graph.
#[derive(Debug, Clone, Default)]
pub struct TypeNode {
    /// Canonical local name (absent for malformed nodes).
    pub name: Option<String>,
    /// Target namespace the type was declared in.
    pub namespace: String,
    /// Node kind.
    pub kind: TypeKind,
    /// Child attribute nodes (own declarations only, not inherited ones).
    pub children: Vec<Attribute>,
    /// Base type this type extends.
    pub extension: Option<QName>,
    /// Stable enumeration key assigned during resolution.
    pub ordinal: usize,
}

impl TypeNode {
    /// Creates a new complex type node.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Returns the canonical name, or an empty string for unnamed nodes.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Returns the declaring namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the qualified name of the node.
    #[must_use]
    pub fn qname(&self) -> QName {
        QName::new(self.namespace.clone(), self.name())
    }

    /// Returns true if this is an enumeration.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum)
    }

    /// Returns the child attribute nodes.
    #[must_use]
    pub fn children(&self) -> &[Attribute] {
        &self.children
    }

    /// Returns the base type reference, if this type is an extension.
    #[must_use]
    pub fn extension(&self) -> Option<&QName> {
        self.extension.as_ref()
    }

    /// Returns the stable ordering key.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Sets the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the base type.
    #[must_use]
    pub fn extending(mut self, base: QName) -> Self {
        self.extension = Some(base);
        self
    }

    /// Sets the ordinal.
    #[must_use]
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Appends a child attribute.
    #[must_use]
    pub fn with_child(mut self, child: Attribute) -> Self {
        self.children.push(child);
        self
    }

    /// Appends an enumeration member.
    #[must_use]
    pub fn with_member(mut self, value: impl Into<String>) -> Self {
        self.kind = TypeKind::Enum;
        self.children.push(Attribute::new(value, None));
        self
    }
}

/// Attribute (child element or XML attribute) of a type, or an operation
/// argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as declared in the schema.
    pub name: String,
    /// Referenced type; `None` when the reference could not be resolved.
    pub type_ref: Option<QName>,
    /// Whether the attribute must be present.
    pub required: bool,
    /// Whether the attribute may carry `xsi:nil`.
    pub nillable: bool,
}

impl Attribute {
    /// Creates a required, non-nillable attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: Option<QName>) -> Self {
        Self {
            name: name.into(),
            type_ref,
            required: true,
            nillable: false,
        }
    }

    /// Creates an attribute typed with an XML Schema builtin.
    #[must_use]
    pub fn xsd(name: impl Into<String>, type_name: &str) -> Self {
        Self::new(name, Some(QName::xsd(type_name)))
    }

    /// Returns the local name of the referenced type (empty if unresolved).
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.type_ref.as_ref().map_or("", |q| q.name.as_str())
    }

    /// Returns the namespace of the referenced type (empty if unresolved).
    #[must_use]
    pub fn type_namespace(&self) -> &str {
        self.type_ref.as_ref().map_or("", |q| q.namespace.as_str())
    }

    /// Returns true if the attribute must be present.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Returns true if the attribute may be nil.
    #[must_use]
    pub const fn nillable(&self) -> bool {
        self.nillable
    }

    /// Marks the attribute as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Marks the attribute as nillable.
    #[must_use]
    pub fn nillable_value(mut self) -> Self {
        self.nillable = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_display() {
        let name = QName::new("urn:shop", "Address");
        assert_eq!(name.to_string(), "{urn:shop}Address");
        assert_eq!(QName::xsd("string").namespace, XSD_NAMESPACE);
    }

    #[test]
    fn test_type_node_unnamed() {
        let node = TypeNode::default();
        assert_eq!(node.name(), "");
        assert!(!node.is_enum());
        assert!(node.extension().is_none());
    }

    #[test]
    fn test_type_node_members() {
        let node = TypeNode::new("Color", "urn:shop")
            .with_member("Red")
            .with_member("Dark Blue");

        assert!(node.is_enum());
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[1].name, "Dark Blue");
    }

    #[test]
    fn test_type_node_extension() {
        let node = TypeNode::new("Employee", "urn:hr").extending(QName::new("urn:hr", "Person"));
        assert_eq!(node.extension().map(|q| q.name.as_str()), Some("Person"));
        assert_eq!(node.qname(), QName::new("urn:hr", "Employee"));
    }

    #[test]
    fn test_attribute_flags() {
        let attr = Attribute::xsd("zip", "string").optional().nillable_value();
        assert_eq!(attr.type_name(), "string");
        assert_eq!(attr.type_namespace(), XSD_NAMESPACE);
        assert!(!attr.required());
        assert!(attr.nillable());

        let unresolved = Attribute::new("x", None);
        assert_eq!(unresolved.type_name(), "");
    }
}
