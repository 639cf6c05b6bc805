//! Method synthesis from service operations.

use crate::error::CodegenError;
use crate::extract::{ExtractedTypes, SELF_REFERENCE_TYPE};
use crate::ident::{IdentifierAllocator, normalize, to_snake_case};
use crate::mapper::TypeMapper;
use std::collections::{BTreeMap, BTreeSet};
use wsdlgen_schema::{Argument, MessagePart, Operation, QName, ServiceDefinition};

/// Name of the accessor every service trait declares.
pub const CLIENT_ACCESSOR: &str = "client";

/// Response shape of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The operation returns nothing.
    Nothing,
    /// The operation returns a single value.
    Named {
        /// Raw schema type name.
        schema_type: String,
        /// Mapped Rust type.
        rust_type: String,
    },
}

impl Response {
    /// Returns the Rust return type, `()` for [`Response::Nothing`].
    #[must_use]
    pub fn rust_type(&self) -> &str {
        match self {
            Self::Nothing => "()",
            Self::Named { rust_type, .. } => rust_type,
        }
    }
}

/// Argument of a synthesized method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    /// Original argument name.
    pub name: String,
    /// Parameter identifier.
    pub identifier: String,
    /// Raw schema type name.
    pub schema_type: String,
    /// Mapped Rust type.
    pub rust_type: String,
    /// Whether the argument must be present.
    pub required: bool,
    /// Whether the argument may be nil.
    pub nillable: bool,
}

impl ArgumentDescriptor {
    /// Returns the doc annotation for the presence flags.
    #[must_use]
    pub const fn annotation(&self) -> &'static str {
        match (self.required, self.nillable) {
            (true, false) => "",
            (false, false) => " (optional)",
            (true, true) => " (may be absent)",
            (false, true) => " (optional, may be absent)",
        }
    }
}

/// Synthesized method for one distinct operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Original operation name.
    pub name: String,
    /// Method name on the service trait.
    pub method_name: String,
    /// Method name on the client trait.
    pub transport_name: String,
    /// Response shape.
    pub response: Response,
    /// Arguments in declaration order.
    pub arguments: Vec<ArgumentDescriptor>,
}

/// Methods of one service and the wrapper types they absorbed.
#[derive(Debug, Clone, Default)]
pub struct MethodPlan {
    /// Operation name to method, name-sorted.
    pub methods: BTreeMap<String, OperationDescriptor>,
    /// Raw type names of wrapper types to omit.
    pub pruned: BTreeSet<String>,
}

/// Builds method descriptors from the operations of a service.
pub struct MethodSynthesizer<'a> {
    mapper: &'a TypeMapper<'a>,
    extracted: &'a ExtractedTypes,
}

impl<'a> MethodSynthesizer<'a> {
    /// Creates a new synthesizer.
    #[must_use]
    pub fn new(mapper: &'a TypeMapper<'a>, extracted: &'a ExtractedTypes) -> Self {
        Self { mapper, extracted }
    }

    /// Synthesizes one method per distinct operation name; the first
    /// occurrence across ports wins.
    ///
    /// # Errors
    /// Returns `CodegenError::AmbiguousResponse` for a wrapped response that
    /// carries more than one field.
    pub fn synthesize(
        &self,
        service: &ServiceDefinition,
        remove_wrappers: bool,
    ) -> Result<MethodPlan, CodegenError> {
        let mut plan = MethodPlan::default();
        let mut discovered: Vec<(&Operation, Response)> = Vec::new();
        let mut seen = BTreeSet::new();

        for port in &service.ports {
            for operation in &port.operations {
                if !seen.insert(operation.name.as_str()) {
                    tracing::debug!(
                        "Skipping operation '{}' on port '{}': already defined",
                        operation.name,
                        port.name
                    );
                    continue;
                }

                let response = if operation.binding.output_wrapped {
                    let (response, keep_output) = self.peel(operation)?;
                    if remove_wrappers {
                        if let Some(input) = operation.binding.input_element() {
                            plan.pruned.insert(input.to_string());
                        }
                        if let (Some(output), true) =
                            (operation.binding.output_element(), keep_output)
                        {
                            plan.pruned.insert(output.to_string());
                        }
                    }
                    response
                } else {
                    self.bare_response(operation.binding.output_part.as_ref())
                };
                discovered.push((operation, response));
            }
        }

        discovered.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));
        let mut method_names = IdentifierAllocator::new();
        method_names.reserve(CLIENT_ACCESSOR);
        let mut transport_names = IdentifierAllocator::new();

        for (operation, response) in discovered {
            let descriptor = OperationDescriptor {
                name: operation.name.clone(),
                method_name: method_names.unique(&to_snake_case(&operation.name)),
                transport_name: transport_names.allocate(&operation.name),
                response,
                arguments: self.arguments(&operation.arguments),
            };
            tracing::debug!(
                "Synthesized method '{}' -> {}",
                descriptor.method_name,
                descriptor.response.rust_type()
            );
            plan.methods.insert(operation.name.clone(), descriptor);
        }

        Ok(plan)
    }

    /// Resolves the response of a wrapped operation. The flag is false when
    /// the output wrapper must stay declared.
    fn peel(&self, operation: &Operation) -> Result<(Response, bool), CodegenError> {
        let Some(part) = operation.binding.output_part.as_ref() else {
            return Ok((Response::Nothing, true));
        };
        let Some(wrapper) = part.reference() else {
            return Ok((Response::Nothing, true));
        };

        let Some(fields) = self.extracted.record_fields(&wrapper.name) else {
            return Ok((self.named(wrapper), true));
        };

        match fields {
            [] => Ok((Response::Nothing, true)),
            [field] if field.rust_type == SELF_REFERENCE_TYPE => {
                let identifier = self
                    .extracted
                    .aliases
                    .get(&wrapper.name)
                    .cloned()
                    .unwrap_or_else(|| normalize(&wrapper.name));
                Ok((
                    Response::Named {
                        schema_type: field.schema_type.clone(),
                        rust_type: format!("Option<Box<{identifier}>>"),
                    },
                    false,
                ))
            }
            [field] => Ok((
                Response::Named {
                    schema_type: field.schema_type.clone(),
                    rust_type: field.rust_type.clone(),
                },
                true,
            )),
            _ => Err(CodegenError::AmbiguousResponse {
                operation: operation.name.clone(),
                wrapper: wrapper.name.clone(),
                fields: fields.iter().map(|f| f.name.clone()).collect(),
            }),
        }
    }

    fn bare_response(&self, part: Option<&MessagePart>) -> Response {
        part.and_then(MessagePart::reference)
            .map_or(Response::Nothing, |qname| self.named(qname))
    }

    fn named(&self, qname: &QName) -> Response {
        let mut deps = BTreeSet::new();
        Response::Named {
            schema_type: qname.name.clone(),
            rust_type: self.mapper.map_reference(
                &qname.name,
                &qname.namespace,
                true,
                &self.extracted.aliases,
                &mut deps,
            ),
        }
    }

    fn arguments(&self, arguments: &[Argument]) -> Vec<ArgumentDescriptor> {
        let mut allocator = IdentifierAllocator::new();
        let mut deps = BTreeSet::new();
        arguments
            .iter()
            .map(|argument| ArgumentDescriptor {
                name: argument.name.clone(),
                identifier: allocator.unique(&to_snake_case(&argument.name)),
                schema_type: argument.type_name().to_string(),
                rust_type: self
                    .mapper
                    .map_attribute(argument, &self.extracted.aliases, &mut deps),
                required: argument.required(),
                nillable: argument.nillable(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::extract::TypeExtractor;
    use wsdlgen_schema::{Attribute, OperationBinding, Port, TypeNode};

    const NS: &str = "urn:test";

    fn q(name: &str) -> QName {
        QName::new(NS, name)
    }

    fn plan(service: &ServiceDefinition, remove: bool) -> Result<MethodPlan, CodegenError> {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::standard(&config);
        let extracted = TypeExtractor::new(service, &config, &mapper)
            .extract(&[])
            .expect("extract");
        MethodSynthesizer::new(&mapper, &extracted).synthesize(service, remove)
    }

    fn wrapped_service(response_fields: &[(&str, &str)]) -> ServiceDefinition {
        let mut response = TypeNode::new("GetQuoteResponse", NS);
        for (name, ty) in response_fields {
            response = response.with_child(Attribute::xsd(*name, ty));
        }
        ServiceDefinition::new("Quotes", NS)
            .with_type(TypeNode::new("GetQuote", NS).with_child(Attribute::xsd("symbol", "string")))
            .with_type(response)
            .with_port(
                Port::new("QuotesPort").with_operation(
                    Operation::new(
                        "GetQuote",
                        OperationBinding::wrapped(q("GetQuote"), q("GetQuoteResponse")),
                    )
                    .with_argument(Attribute::xsd("symbol", "string")),
                ),
            )
    }

    #[test]
    fn test_wrapper_peeling_and_pruning() {
        let service = wrapped_service(&[("price", "double")]);
        let plan = plan(&service, true).expect("plan");

        let method = &plan.methods["GetQuote"];
        assert_eq!(method.method_name, "get_quote");
        assert_eq!(method.transport_name, "GetQuote");
        assert_eq!(
            method.response,
            Response::Named {
                schema_type: "double".to_string(),
                rust_type: "f64".to_string()
            }
        );
        assert!(plan.pruned.contains("GetQuote"));
        assert!(plan.pruned.contains("GetQuoteResponse"));
    }

    #[test]
    fn test_wrappers_kept_without_pruning() {
        let service = wrapped_service(&[("price", "double")]);
        let plan = plan(&service, false).expect("plan");
        assert!(plan.pruned.is_empty());
        assert_eq!(plan.methods["GetQuote"].response.rust_type(), "f64");
    }

    #[test]
    fn test_empty_wrapper_returns_nothing() {
        let service = wrapped_service(&[]);
        let plan = plan(&service, true).expect("plan");
        assert_eq!(plan.methods["GetQuote"].response, Response::Nothing);
        assert_eq!(plan.methods["GetQuote"].response.rust_type(), "()");
    }

    #[test]
    fn test_multi_field_wrapper_is_ambiguous() {
        let service = wrapped_service(&[("bid", "double"), ("ask", "double")]);
        let err = plan(&service, true).unwrap_err();
        match err {
            CodegenError::AmbiguousResponse {
                operation,
                wrapper,
                fields,
            } => {
                assert_eq!(operation, "GetQuote");
                assert_eq!(wrapper, "GetQuoteResponse");
                assert_eq!(fields, vec!["bid".to_string(), "ask".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unextracted_wrapper_is_response() {
        let service = ServiceDefinition::new("S", NS).with_port(Port::new("P").with_operation(
            Operation::new("Fetch", OperationBinding::wrapped(q("FetchIn"), q("FetchOut"))),
        ));
        let plan = plan(&service, true).expect("plan");
        assert_eq!(plan.methods["Fetch"].response.rust_type(), "FetchOut");
    }

    #[test]
    fn test_bare_operation_response() {
        let service = ServiceDefinition::new("S", NS)
            .with_type(TypeNode::new("Report", NS))
            .with_port(
                Port::new("P")
                    .with_operation(Operation::new("GetReport", OperationBinding::bare(Some(q("Report")))))
                    .with_operation(Operation::new("Ping", OperationBinding::bare(None))),
            );
        let plan = plan(&service, true).expect("plan");

        assert_eq!(plan.methods["GetReport"].response.rust_type(), "Report");
        assert_eq!(plan.methods["Ping"].response, Response::Nothing);
        assert!(plan.pruned.is_empty());
    }

    #[test]
    fn test_deduplicates_across_ports() {
        let first = Operation::new("Echo", OperationBinding::bare(None))
            .with_argument(Attribute::xsd("message", "string"));
        let second = Operation::new("Echo", OperationBinding::bare(None))
            .with_argument(Attribute::xsd("text", "string"))
            .with_argument(Attribute::xsd("count", "int"));
        let service = ServiceDefinition::new("S", NS)
            .with_port(Port::new("A").with_operation(first))
            .with_port(Port::new("B").with_operation(second));

        let plan = plan(&service, true).expect("plan");
        assert_eq!(plan.methods.len(), 1);
        let args = &plan.methods["Echo"].arguments;
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "message");
    }

    #[test]
    fn test_argument_identifiers_and_annotations() {
        let op = Operation::new("Search", OperationBinding::bare(None))
            .with_argument(Attribute::xsd("queryText", "string"))
            .with_argument(Attribute::xsd("type", "int").optional())
            .with_argument(Attribute::xsd("Limit", "int").nillable_value())
            .with_argument(Attribute::xsd("offset", "int").optional().nillable_value());
        let service = ServiceDefinition::new("S", NS).with_port(Port::new("P").with_operation(op));

        let plan = plan(&service, true).expect("plan");
        let args = &plan.methods["Search"].arguments;
        let ids: Vec<&str> = args.iter().map(|a| a.identifier.as_str()).collect();
        assert_eq!(ids, vec!["query_text", "type_", "limit", "offset"]);
        assert_eq!(args[0].annotation(), "");
        assert_eq!(args[1].annotation(), " (optional)");
        assert_eq!(args[2].annotation(), " (may be absent)");
        assert_eq!(args[3].annotation(), " (optional, may be absent)");
    }

    #[test]
    fn test_argument_identifiers_are_disambiguated() {
        let op = Operation::new("Lookup", OperationBinding::bare(None))
            .with_argument(Attribute::xsd("userId", "int"))
            .with_argument(Attribute::xsd("UserId", "int"));
        let service = ServiceDefinition::new("S", NS).with_port(Port::new("P").with_operation(op));

        let plan = plan(&service, true).expect("plan");
        let ids: Vec<&str> = plan.methods["Lookup"]
            .arguments
            .iter()
            .map(|a| a.identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["user_id", "user_id_2"]);
    }

    #[test]
    fn test_method_names_are_disambiguated() {
        let service = ServiceDefinition::new("S", NS).with_port(
            Port::new("P")
                .with_operation(Operation::new("Client", OperationBinding::bare(None)))
                .with_operation(Operation::new("getItem", OperationBinding::bare(None)))
                .with_operation(Operation::new("GetItem", OperationBinding::bare(None))),
        );
        let plan = plan(&service, true).expect("plan");

        assert_eq!(plan.methods["Client"].method_name, "client_2");
        assert_eq!(plan.methods["GetItem"].method_name, "get_item");
        assert_eq!(plan.methods["getItem"].method_name, "get_item_2");
        assert_eq!(plan.methods["getItem"].transport_name, "getItem");
    }
}
