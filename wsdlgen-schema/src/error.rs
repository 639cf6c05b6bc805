//! Error types for WSDL loading.

use thiserror::Error;

/// Error type for WSDL parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute in the XML input.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Reference to an undeclared WSDL component.
    #[error("unknown {kind} '{name}' referenced")]
    UnknownReference {
        /// Kind of component (message, binding, portType, ...).
        kind: String,
        /// Referenced name.
        name: String,
    },

    /// Namespace prefix without a declaration in scope.
    #[error("undeclared namespace prefix '{prefix}'")]
    UnknownPrefix {
        /// The prefix.
        prefix: String,
    },

    /// Invalid document structure.
    #[error("invalid document structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an unknown reference error.
    pub fn unknown(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownReference {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}
