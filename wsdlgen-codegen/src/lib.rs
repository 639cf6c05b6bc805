//! # wsdlgen Codegen
//!
//! Rust service-interface generation from resolved WSDL schema graphs.
//!
//! This crate provides:
//! - Identifier normalization and snake-casing
//! - XML Schema to Rust type mapping
//! - Record and enumeration generation in dependency order
//! - Client and service trait generation from operations

pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod ident;
pub mod mapper;
pub mod methods;
pub mod order;
pub mod rust;

pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::Generator;
pub use ident::{normalize, to_snake_case};

/// Generates Rust code from a WSDL document string.
///
/// # Arguments
/// * `xml` - WSDL document content
/// * `location` - Source location named in the output header
/// * `config` - Generator options
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(
    xml: &str,
    location: &str,
    config: GeneratorConfig,
) -> Result<String, CodegenError> {
    let graph = wsdlgen_schema::parse_wsdl(xml)?;
    Generator::new(config).generate(&graph, location)
}

/// Generates Rust code from a WSDL file.
///
/// # Arguments
/// * `path` - Path to the WSDL file
/// * `config` - Generator options
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: GeneratorConfig,
) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, &path.display().to_string(), config)
}
