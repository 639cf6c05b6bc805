//! WSDL 1.1 document parser.
//!
//! This module turns a single self-contained WSDL document (with inline
//! `xsd:schema` blocks) into the resolved [`SchemaGraph`] consumed by code
//! generation.

use crate::error::ParseError;
use crate::graph::SchemaGraph;
use crate::service::{Argument, MessagePart, Operation, OperationBinding, Port, ServiceDefinition};
use crate::types::{
    Attribute, QName, SOAP_BINDING_NAMESPACE, SOAP12_BINDING_NAMESPACE, TypeKind, TypeNode,
    WSDL_NAMESPACE, XSD_NAMESPACE,
};
use crate::xml::{Element, parse_document};
use std::collections::{HashMap, HashSet};

/// Upper bound on alias chains followed while resolving type references.
const MAX_ALIAS_DEPTH: usize = 32;

/// Parses a WSDL document from a string.
///
/// # Arguments
/// * `xml` - WSDL document content
///
/// # Returns
/// Resolved schema graph with one service definition per `wsdl:service`.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or references undeclared
/// messages, port types or bindings.
pub fn parse_wsdl(xml: &str) -> Result<SchemaGraph, ParseError> {
    let root = parse_document(xml)?;
    if !root.is(WSDL_NAMESPACE, "definitions") {
        return Err(ParseError::invalid("No wsdl:definitions element found"));
    }
    let tns = root.attr("targetNamespace").unwrap_or_default().to_string();

    let schemas: Vec<&Element> = root
        .children_named(WSDL_NAMESPACE, "types")
        .flat_map(|types| types.children_named(XSD_NAMESPACE, "schema"))
        .collect();

    let mut collector = TypeCollector::default();
    for schema in &schemas {
        collector.declare_types(schema);
    }
    for schema in &schemas {
        collector.declare_elements(schema)?;
    }
    for schema in &schemas {
        collector.collect_schema(schema)?;
    }
    let types = collector.finish();

    let messages = parse_messages(&root, &tns)?;
    let port_types = parse_port_types(&root, &tns)?;
    let bindings = parse_bindings(&root, &tns)?;
    let resolver = Resolver {
        types: &types.nodes,
        aliases: &types.aliases,
        elements: &types.elements,
    };

    let mut graph = SchemaGraph::new();
    for service in root.children_named(WSDL_NAMESPACE, "service") {
        let mut definition = ServiceDefinition::new(service.required_attr("name")?, tns.clone());
        definition.types = types.nodes.clone();

        for port in service.children_named(WSDL_NAMESPACE, "port") {
            let binding_name = port.resolve_qname(port.required_attr("binding")?)?;
            let binding = bindings
                .get(&binding_name)
                .ok_or_else(|| ParseError::unknown("binding", binding_name.to_string()))?;
            // Ports without a SOAP binding (HTTP GET/POST) are not SOAP services.
            let Some(default_style) = binding.style else {
                tracing::debug!(
                    "Skipping port '{}': binding '{}' is not a SOAP binding",
                    port.attr("name").unwrap_or_default(),
                    binding_name
                );
                continue;
            };
            let operations = port_types
                .get(&binding.port_type)
                .ok_or_else(|| ParseError::unknown("portType", binding.port_type.to_string()))?;

            let mut result = Port::new(port.required_attr("name")?);
            result.location = port
                .child(SOAP_BINDING_NAMESPACE, "address")
                .or_else(|| port.child(SOAP12_BINDING_NAMESPACE, "address"))
                .and_then(|a| a.attr("location"))
                .map(str::to_string);

            for op in operations {
                let style = binding
                    .operation_styles
                    .get(&op.name)
                    .copied()
                    .unwrap_or(default_style);
                let input = lookup_message(&messages, op.input.as_ref())?;
                let output = lookup_message(&messages, op.output.as_ref())?;
                result
                    .operations
                    .push(resolver.operation(&op.name, style, input, output));
            }
            definition.ports.push(result);
        }
        tracing::debug!(
            "Parsed service '{}': {} types, {} ports",
            definition.name,
            definition.types.len(),
            definition.ports.len()
        );
        graph.services.push(definition);
    }

    Ok(graph)
}

/// Binding style of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Document,
    Rpc,
}

impl Style {
    fn parse(value: Option<&str>) -> Option<Self> {
        match value {
            Some("rpc") => Some(Self::Rpc),
            Some("document") => Some(Self::Document),
            _ => None,
        }
    }
}

/// Operation as declared in a port type.
#[derive(Debug, Clone)]
struct PortTypeOperation {
    name: String,
    input: Option<QName>,
    output: Option<QName>,
}

/// Binding between a port type and the SOAP protocol.
#[derive(Debug, Clone)]
struct Binding {
    port_type: QName,
    /// `None` when the binding is not a SOAP binding.
    style: Option<Style>,
    operation_styles: HashMap<String, Style>,
}

/// Collected schema types before references are resolved.
#[derive(Debug, Default)]
struct TypeCollector {
    nodes: Vec<TypeNode>,
    /// Plain simple types mapped to their base type.
    aliases: HashMap<QName, QName>,
    /// Top-level elements mapped to their type.
    elements: HashMap<QName, QName>,
    /// Type names in use, declared or lifted.
    taken: HashSet<QName>,
}

/// Type nodes with every reference resolved through the alias table.
struct CollectedTypes {
    nodes: Vec<TypeNode>,
    aliases: HashMap<QName, QName>,
    elements: HashMap<QName, QName>,
}

impl TypeCollector {
    /// Registers the named top-level types of one `xsd:schema` block.
    fn declare_types(&mut self, schema: &Element) {
        let tns = schema.attr("targetNamespace").unwrap_or_default();
        for child in &schema.children {
            if child.namespace != XSD_NAMESPACE
                || !matches!(child.local_name.as_str(), "complexType" | "simpleType")
            {
                continue;
            }
            if let Some(name) = child.attr("name") {
                self.taken.insert(QName::new(tns, name));
            }
        }
    }

    /// Maps the top-level elements of one `xsd:schema` block to their types.
    /// Anonymous element types are named after the element unless a type
    /// already uses that name.
    fn declare_elements(&mut self, schema: &Element) -> Result<(), ParseError> {
        let tns = schema.attr("targetNamespace").unwrap_or_default();
        for child in schema.children_named(XSD_NAMESPACE, "element") {
            let name = child.required_attr("name")?;
            let target = if let Some(type_ref) = child.attr("type") {
                child.resolve_qname(type_ref)?
            } else if child.child(XSD_NAMESPACE, "complexType").is_some()
                || child.child(XSD_NAMESPACE, "simpleType").is_some()
            {
                self.claim(tns, &[name.to_string()])
            } else {
                QName::xsd("anyType")
            };
            self.elements.insert(QName::new(tns, name), target);
        }
        Ok(())
    }

    /// Reserves the first free type name among `candidates`, then numbered
    /// variants of the last candidate.
    fn claim(&mut self, tns: &str, candidates: &[String]) -> QName {
        let last = candidates.last().map_or("", String::as_str);
        let numbered = (2..).map(|n| format!("{last}_{n}"));
        let name = candidates
            .iter()
            .cloned()
            .chain(numbered)
            .find(|name| !self.taken.contains(&QName::new(tns, name.as_str())))
            .unwrap_or_default();
        let qname = QName::new(tns, name);
        self.taken.insert(qname.clone());
        qname
    }

    /// Collects the top-level components of one `xsd:schema` block.
    fn collect_schema(&mut self, schema: &Element) -> Result<(), ParseError> {
        let tns = schema.attr("targetNamespace").unwrap_or_default();

        for child in &schema.children {
            if child.namespace != XSD_NAMESPACE {
                continue;
            }
            match child.local_name.as_str() {
                "complexType" => {
                    let name = child.required_attr("name")?;
                    let node = self.complex_type(child, name, tns)?;
                    self.nodes.push(node);
                }
                "simpleType" => {
                    let name = child.required_attr("name")?;
                    self.simple_type(child, QName::new(tns, name))?;
                }
                "element" => {
                    if child.attr("type").is_some() {
                        continue;
                    }
                    let qname = QName::new(tns, child.required_attr("name")?);
                    let Some(target) = self.elements.get(&qname).cloned() else {
                        continue;
                    };
                    if let Some(inline) = child.child(XSD_NAMESPACE, "complexType") {
                        let node = self.complex_type(inline, &target.name, tns)?;
                        self.nodes.push(node);
                    } else if let Some(inline) = child.child(XSD_NAMESPACE, "simpleType") {
                        self.simple_type(inline, target)?;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Builds a complex type node named `name`.
    fn complex_type(
        &mut self,
        element: &Element,
        name: &str,
        tns: &str,
    ) -> Result<TypeNode, ParseError> {
        let mut node = TypeNode::new(name, tns);
        self.content(element, &mut node, tns)?;
        Ok(node)
    }

    /// Walks the content model of a complex type.
    fn content(
        &mut self,
        element: &Element,
        node: &mut TypeNode,
        tns: &str,
    ) -> Result<(), ParseError> {
        for child in &element.children {
            if child.namespace != XSD_NAMESPACE {
                continue;
            }
            match child.local_name.as_str() {
                "sequence" | "all" | "choice" => self.content(child, node, tns)?,
                "element" => {
                    let attribute = self.local_element(child, node.name(), tns)?;
                    node.children.push(attribute);
                }
                "attribute" => {
                    let name = child
                        .attr("name")
                        .or_else(|| child.attr("ref"))
                        .ok_or_else(|| ParseError::missing_attr("attribute", "name"))?;
                    let type_ref = match child.attr("type") {
                        Some(t) => child.resolve_qname(t)?,
                        None => QName::xsd("string"),
                    };
                    let mut attribute = Attribute::new(local_part(name), Some(type_ref));
                    attribute.required = child.attr("use") == Some("required");
                    node.children.push(attribute);
                }
                "complexContent" => {
                    if let Some(extension) = child.child(XSD_NAMESPACE, "extension") {
                        let base = extension.resolve_qname(extension.required_attr("base")?)?;
                        node.extension = Some(base);
                        self.content(extension, node, tns)?;
                    }
                }
                "simpleContent" => {
                    if let Some(extension) = child.child(XSD_NAMESPACE, "extension") {
                        let base = extension.resolve_qname(extension.required_attr("base")?)?;
                        node.children.push(Attribute::new("value", Some(base)));
                        self.content(extension, node, tns)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Converts a local element declaration into an attribute, lifting
    /// anonymous inline types to top-level nodes.
    fn local_element(
        &mut self,
        element: &Element,
        parent: &str,
        tns: &str,
    ) -> Result<Attribute, ParseError> {
        let (name, type_ref) = if let Some(reference) = element.attr("ref") {
            let target = element.resolve_qname(reference)?;
            let type_ref = self.elements.get(&target).cloned().unwrap_or_else(|| target.clone());
            (target.name, type_ref)
        } else {
            let name = element.required_attr("name")?.to_string();
            let type_ref = if let Some(t) = element.attr("type") {
                element.resolve_qname(t)?
            } else if let Some(inline) = element.child(XSD_NAMESPACE, "complexType") {
                let lifted = self.claim(tns, &[name.clone(), format!("{parent}_{name}")]);
                let node = self.complex_type(inline, &lifted.name, tns)?;
                self.nodes.push(node);
                lifted
            } else if let Some(inline) = element.child(XSD_NAMESPACE, "simpleType") {
                let lifted = self.claim(tns, &[name.clone(), format!("{parent}_{name}")]);
                self.simple_type(inline, lifted.clone())?;
                lifted
            } else {
                QName::xsd("anyType")
            };
            (name, type_ref)
        };

        let mut attribute = Attribute::new(name, Some(type_ref));
        attribute.required = element.attr("minOccurs") != Some("0");
        attribute.nillable = element.attr("nillable") == Some("true");
        Ok(attribute)
    }

    /// Registers a simple type: enumerations become nodes, everything else
    /// is an alias of its base type.
    fn simple_type(&mut self, element: &Element, name: QName) -> Result<(), ParseError> {
        let Some(restriction) = element.child(XSD_NAMESPACE, "restriction") else {
            // Lists and unions travel as text.
            self.aliases.insert(name, QName::xsd("string"));
            return Ok(());
        };

        let members: Vec<&str> = restriction
            .children_named(XSD_NAMESPACE, "enumeration")
            .filter_map(|e| e.attr("value"))
            .collect();

        if members.is_empty() {
            let base = match restriction.attr("base") {
                Some(base) => restriction.resolve_qname(base)?,
                None => QName::xsd("string"),
            };
            self.aliases.insert(name, base);
        } else {
            let mut node = TypeNode::new(name.name, name.namespace).with_kind(TypeKind::Enum);
            for member in members {
                node = node.with_member(member);
            }
            self.nodes.push(node);
        }
        Ok(())
    }

    /// Resolves every attribute reference through the alias table and
    /// assigns ordinals in document order.
    fn finish(self) -> CollectedTypes {
        let TypeCollector {
            mut nodes,
            aliases,
            elements,
            ..
        } = self;
        for (ordinal, node) in nodes.iter_mut().enumerate() {
            node.ordinal = ordinal;
            if node.kind == TypeKind::Enum {
                continue;
            }
            for child in &mut node.children {
                if let Some(type_ref) = child.type_ref.take() {
                    child.type_ref = Some(resolve_alias(&aliases, type_ref));
                }
            }
            if let Some(base) = node.extension.take() {
                node.extension = Some(resolve_alias(&aliases, base));
            }
        }
        CollectedTypes {
            nodes,
            aliases,
            elements,
        }
    }
}

/// Follows alias links until a non-alias name is reached.
fn resolve_alias(aliases: &HashMap<QName, QName>, mut name: QName) -> QName {
    for _ in 0..MAX_ALIAS_DEPTH {
        match aliases.get(&name) {
            Some(target) if *target != name => name = target.clone(),
            _ => break,
        }
    }
    name
}

/// Strips a namespace prefix from a raw attribute value.
fn local_part(value: &str) -> &str {
    value.rsplit_once(':').map_or(value, |(_, local)| local)
}

/// Resolves message parts and arguments against collected types.
struct Resolver<'a> {
    types: &'a [TypeNode],
    aliases: &'a HashMap<QName, QName>,
    elements: &'a HashMap<QName, QName>,
}

impl Resolver<'_> {
    /// Element parts point at the element's type so wrapper lookups see type
    /// names.
    fn resolve_part(&self, part: &MessagePart) -> MessagePart {
        MessagePart {
            name: part.name.clone(),
            element: part.element.clone().map(|e| {
                let target = self.elements.get(&e).cloned().unwrap_or(e);
                resolve_alias(self.aliases, target)
            }),
            type_ref: part
                .type_ref
                .clone()
                .map(|t| resolve_alias(self.aliases, t)),
        }
    }

    /// Finds the complex node a single-element message wraps.
    fn wrapper_node(&self, parts: &[MessagePart]) -> Option<&TypeNode> {
        match parts {
            [part] => {
                let element = part.element.as_ref()?;
                self.types.iter().find(|n| {
                    n.kind == TypeKind::Complex
                        && n.name() == element.name
                        && n.namespace == element.namespace
                })
            }
            _ => None,
        }
    }

    fn operation(
        &self,
        name: &str,
        style: Style,
        input: &[MessagePart],
        output: &[MessagePart],
    ) -> Operation {
        let input: Vec<MessagePart> = input.iter().map(|p| self.resolve_part(p)).collect();
        let output: Vec<MessagePart> = output.iter().map(|p| self.resolve_part(p)).collect();

        let wrapped = style == Style::Document && self.wrapper_node(&output).is_some();
        let arguments: Vec<Argument> = match (style, self.wrapper_node(&input)) {
            (Style::Document, Some(wrapper)) => wrapper.children.clone(),
            _ => input
                .iter()
                .map(|p| Attribute::new(p.name.clone(), p.element.clone().or(p.type_ref.clone())))
                .collect(),
        };

        Operation {
            name: name.to_string(),
            arguments,
            binding: OperationBinding {
                output_wrapped: wrapped,
                input_part: input.into_iter().next(),
                output_part: output.into_iter().next(),
            },
        }
    }
}

fn lookup_message<'a>(
    messages: &'a HashMap<QName, Vec<MessagePart>>,
    name: Option<&QName>,
) -> Result<&'a [MessagePart], ParseError> {
    match name {
        Some(name) => messages
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ParseError::unknown("message", name.to_string())),
        None => Ok(&[]),
    }
}

/// Parses the `wsdl:message` declarations.
fn parse_messages(
    root: &Element,
    tns: &str,
) -> Result<HashMap<QName, Vec<MessagePart>>, ParseError> {
    let mut messages = HashMap::new();
    for message in root.children_named(WSDL_NAMESPACE, "message") {
        let mut parts = Vec::new();
        for part in message.children_named(WSDL_NAMESPACE, "part") {
            let name = part.required_attr("name")?;
            let part = match (part.attr("element"), part.attr("type")) {
                (Some(element), _) => MessagePart::element(name, part.resolve_qname(element)?),
                (None, Some(type_ref)) => MessagePart::typed(name, part.resolve_qname(type_ref)?),
                (None, None) => return Err(ParseError::missing_attr("part", "element")),
            };
            parts.push(part);
        }
        messages.insert(QName::new(tns, message.required_attr("name")?), parts);
    }
    Ok(messages)
}

/// Parses the `wsdl:portType` declarations.
fn parse_port_types(
    root: &Element,
    tns: &str,
) -> Result<HashMap<QName, Vec<PortTypeOperation>>, ParseError> {
    let mut port_types = HashMap::new();
    for port_type in root.children_named(WSDL_NAMESPACE, "portType") {
        let mut operations = Vec::new();
        for op in port_type.children_named(WSDL_NAMESPACE, "operation") {
            let message = |direction: &str| -> Result<Option<QName>, ParseError> {
                match op.child(WSDL_NAMESPACE, direction) {
                    Some(el) => Ok(Some(el.resolve_qname(el.required_attr("message")?)?)),
                    None => Ok(None),
                }
            };
            operations.push(PortTypeOperation {
                name: op.required_attr("name")?.to_string(),
                input: message("input")?,
                output: message("output")?,
            });
        }
        port_types.insert(QName::new(tns, port_type.required_attr("name")?), operations);
    }
    Ok(port_types)
}

/// Parses the `wsdl:binding` declarations.
fn parse_bindings(root: &Element, tns: &str) -> Result<HashMap<QName, Binding>, ParseError> {
    let soap_child = |el: &Element, local: &str| -> Option<Element> {
        el.child(SOAP_BINDING_NAMESPACE, local)
            .or_else(|| el.child(SOAP12_BINDING_NAMESPACE, local))
            .cloned()
    };

    let mut bindings = HashMap::new();
    for binding in root.children_named(WSDL_NAMESPACE, "binding") {
        let port_type = binding.resolve_qname(binding.required_attr("type")?)?;
        let style = soap_child(binding, "binding")
            .map(|b| Style::parse(b.attr("style")).unwrap_or(Style::Document));

        let mut operation_styles = HashMap::new();
        for op in binding.children_named(WSDL_NAMESPACE, "operation") {
            let op_style = soap_child(op, "operation").and_then(|o| Style::parse(o.attr("style")));
            if let Some(op_style) = op_style {
                operation_styles.insert(op.required_attr("name")?.to_string(), op_style);
            }
        }

        bindings.insert(
            QName::new(tns, binding.required_attr("name")?),
            Binding {
                port_type,
                style,
                operation_styles,
            },
        );
    }
    Ok(bindings)
}
