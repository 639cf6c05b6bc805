//! Prelude module for convenient imports.
//!
//! ```ignore
//! use wsdlgen::prelude::*;
//! ```

// Pipeline
pub use crate::error::{Error, SourceError};
pub use crate::generate;
pub use crate::source::{Credentials, fetch, locate};

// Schema model
pub use wsdlgen_schema::{
    Attribute, Operation, OperationBinding, ParseError, Port, QName, SchemaGraph,
    ServiceDefinition, TypeNode, parse_wsdl,
};

// Code generation
pub use wsdlgen_codegen::{CodegenError, Generator, GeneratorConfig};
