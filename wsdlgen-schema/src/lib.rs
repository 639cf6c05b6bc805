//! # wsdlgen Schema
//!
//! Resolved WSDL/XML-schema object model and WSDL document loader.
//!
//! This crate provides:
//! - The read-only schema graph consumed by code generation
//! - Service, port and operation descriptors
//! - A namespace-aware WSDL 1.1 parser with inline XML schemas

pub mod error;
pub mod graph;
pub mod parser;
pub mod service;
pub mod types;
pub mod xml;

pub use error::ParseError;
pub use graph::SchemaGraph;
pub use parser::parse_wsdl;
pub use service::{Argument, MessagePart, Operation, OperationBinding, Port, ServiceDefinition};
pub use types::{
    Attribute, QName, SOAP_BINDING_NAMESPACE, SOAP_ENCODING_NAMESPACE, TypeKind, TypeNode,
    WSDL_NAMESPACE, XSD_NAMESPACE,
};
