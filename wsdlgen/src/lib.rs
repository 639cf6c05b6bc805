//! # wsdlgen
//!
//! Generates Rust service interfaces from SOAP/WSDL descriptions.
//!
//! A WSDL document is parsed into a resolved schema graph, and each service
//! definition becomes a module holding its records, enumerations, a
//! transport trait, a service trait with delegating methods and a lookup
//! table of schema type names.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wsdlgen::prelude::*;
//!
//! let url = locate("weather.wsdl")?;
//! let code = generate(&url, None, GeneratorConfig::default())?;
//! println!("{code}");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Resolved schema model and WSDL parser
//! - [`codegen`] - Rust code generation from schema graphs
//! - [`source`] - Locating and fetching documents

pub mod error;
pub mod prelude;
pub mod source;

/// Resolved schema model and WSDL parser.
pub mod schema {
    pub use wsdlgen_schema::*;
}

/// Rust code generation from schema graphs.
pub mod codegen {
    pub use wsdlgen_codegen::*;
}

pub use error::{Error, SourceError};
pub use source::{Credentials, fetch, locate};
pub use wsdlgen_codegen::{CodegenError, Generator, GeneratorConfig};

use url::Url;

/// Fetches the document at `url` and generates code for all of its
/// services.
///
/// # Arguments
/// * `url` - Document location, as returned by [`locate`]
/// * `credentials` - HTTP basic-auth credentials for remote documents
/// * `config` - Generator options
///
/// # Errors
/// Returns `Error` if the document cannot be loaded, parsed or generated.
pub fn generate(
    url: &Url,
    credentials: Option<&Credentials>,
    config: GeneratorConfig,
) -> Result<String, Error> {
    let xml = fetch(url, credentials)?;
    let code = wsdlgen_codegen::generate_from_xml(&xml, url.as_str(), config)?;
    Ok(code)
}
