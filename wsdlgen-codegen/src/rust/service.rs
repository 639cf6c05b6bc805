//! Service trait and type table generation.

use crate::methods::{CLIENT_ACCESSOR, MethodPlan, OperationDescriptor};
use crate::rust::{INDENT, push_doc, push_doc_break, string_literal};

/// Name of the generated type table constant.
pub const TYPE_TABLE: &str = "WSDL_TYPES";

/// Renderer for the client trait, the service trait and the type table.
pub struct ServiceRenderer<'a> {
    service_name: &'a str,
    target_namespace: &'a str,
    trait_name: &'a str,
    client_name: &'a str,
    plan: &'a MethodPlan,
}

impl<'a> ServiceRenderer<'a> {
    /// Creates a new service renderer.
    #[must_use]
    pub fn new(
        service_name: &'a str,
        target_namespace: &'a str,
        trait_name: &'a str,
        client_name: &'a str,
        plan: &'a MethodPlan,
    ) -> Self {
        Self {
            service_name,
            target_namespace,
            trait_name,
            client_name,
            plan,
        }
    }

    /// Renders the transport trait with one required method per operation.
    #[must_use]
    pub fn render_client(&self) -> String {
        let mut output = String::new();

        push_doc(
            &mut output,
            "",
            &format!("Transport for the `{}` service.", self.service_name),
        );
        output.push_str(&format!("pub trait {} {{\n", self.client_name));
        for method in self.plan.methods.values() {
            output.push_str(&format!(
                "{INDENT}fn {}(&self{}){};\n",
                method.transport_name,
                Self::parameters(method),
                Self::return_clause(method)
            ));
        }
        output.push_str("}\n");

        output
    }

    /// Renders the service trait with delegating default methods.
    #[must_use]
    pub fn render_service(&self) -> String {
        let mut output = String::new();

        push_doc(
            &mut output,
            "",
            &format!(
                "SOAP service `{}` with target namespace {}.",
                self.service_name, self.target_namespace
            ),
        );
        output.push_str(&format!("pub trait {} {{\n", self.trait_name));
        output.push_str(&format!("{INDENT}/// Transport used by the default methods.\n"));
        output.push_str(&format!("{INDENT}type Client: {};\n\n", self.client_name));
        output.push_str(&format!("{INDENT}/// Returns the transport.\n"));
        output.push_str(&format!(
            "{INDENT}fn {CLIENT_ACCESSOR}(&self) -> &Self::Client;\n"
        ));

        for method in self.plan.methods.values() {
            output.push('\n');
            self.render_method(&mut output, method);
        }
        output.push_str("}\n");

        output
    }

    fn render_method(&self, output: &mut String, method: &OperationDescriptor) {
        push_doc(
            output,
            INDENT,
            &format!("Calls the `{}` operation.", method.name),
        );
        push_doc_break(output, INDENT);
        for argument in &method.arguments {
            push_doc(
                output,
                INDENT,
                &format!(
                    "`{}` -- {}{}",
                    argument.name,
                    argument.schema_type,
                    argument.annotation()
                ),
            );
        }
        if !method.arguments.is_empty() {
            push_doc_break(output, INDENT);
        }
        push_doc(
            output,
            INDENT,
            &format!("Returns: `{}`", method.response.rust_type()),
        );

        output.push_str(&format!(
            "{INDENT}fn {}(&self{}){} {{\n",
            method.method_name,
            Self::parameters(method),
            Self::return_clause(method)
        ));
        let forwarded: Vec<&str> = method
            .arguments
            .iter()
            .map(|a| a.identifier.as_str())
            .collect();
        output.push_str(&format!(
            "{INDENT}{INDENT}self.{CLIENT_ACCESSOR}().{}({})\n",
            method.transport_name,
            forwarded.join(", ")
        ));
        output.push_str(&format!("{INDENT}}}\n"));
    }

    /// Renders the raw name to identifier lookup table.
    #[must_use]
    pub fn render_table(entries: &[(&str, &str)]) -> String {
        let mut output = String::new();

        output.push_str("/// Schema type names and their generated identifiers.\n");
        if entries.is_empty() {
            output.push_str(&format!("pub const {TYPE_TABLE}: &[(&str, &str)] = &[];\n"));
            return output;
        }
        output.push_str(&format!("pub const {TYPE_TABLE}: &[(&str, &str)] = &[\n"));
        for (raw, identifier) in entries {
            output.push_str(&format!(
                "{INDENT}({}, {}),\n",
                string_literal(raw),
                string_literal(identifier)
            ));
        }
        output.push_str("];\n");

        output
    }

    fn parameters(method: &OperationDescriptor) -> String {
        method
            .arguments
            .iter()
            .map(|a| format!(", {}: {}", a.identifier, a.rust_type))
            .collect()
    }

    fn return_clause(method: &OperationDescriptor) -> String {
        match method.response.rust_type() {
            "()" => String::new(),
            ty => format!(" -> {ty}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::{ArgumentDescriptor, Response};
    use pretty_assertions::assert_eq;

    fn plan() -> MethodPlan {
        let mut plan = MethodPlan::default();
        plan.methods.insert(
            "GetForecast".to_string(),
            OperationDescriptor {
                name: "GetForecast".to_string(),
                method_name: "get_forecast".to_string(),
                transport_name: "GetForecast".to_string(),
                response: Response::Named {
                    schema_type: "Forecast".to_string(),
                    rust_type: "Forecast".to_string(),
                },
                arguments: vec![
                    ArgumentDescriptor {
                        name: "City".to_string(),
                        identifier: "city".to_string(),
                        schema_type: "string".to_string(),
                        rust_type: "String".to_string(),
                        required: true,
                        nillable: false,
                    },
                    ArgumentDescriptor {
                        name: "days".to_string(),
                        identifier: "days".to_string(),
                        schema_type: "int".to_string(),
                        rust_type: "i32".to_string(),
                        required: false,
                        nillable: false,
                    },
                ],
            },
        );
        plan.methods.insert(
            "Ping".to_string(),
            OperationDescriptor {
                name: "Ping".to_string(),
                method_name: "ping".to_string(),
                transport_name: "Ping".to_string(),
                response: Response::Nothing,
                arguments: Vec::new(),
            },
        );
        plan
    }

    #[test]
    fn test_render_client() {
        let plan = plan();
        let renderer =
            ServiceRenderer::new("Weather", "urn:weather", "Weather", "WeatherClient", &plan);

        let expected = "/// Transport for the `Weather` service.
pub trait WeatherClient {
    fn GetForecast(&self, city: String, days: i32) -> Forecast;
    fn Ping(&self);
}
";
        assert_eq!(renderer.render_client(), expected);
    }

    #[test]
    fn test_render_service() {
        let plan = plan();
        let renderer =
            ServiceRenderer::new("Weather", "urn:weather", "Weather", "WeatherClient", &plan);

        let expected = "/// SOAP service `Weather` with target namespace urn:weather.
pub trait Weather {
    /// Transport used by the default methods.
    type Client: WeatherClient;

    /// Returns the transport.
    fn client(&self) -> &Self::Client;

    /// Calls the `GetForecast` operation.
    ///
    /// `City` -- string
    /// `days` -- int (optional)
    ///
    /// Returns: `Forecast`
    fn get_forecast(&self, city: String, days: i32) -> Forecast {
        self.client().GetForecast(city, days)
    }

    /// Calls the `Ping` operation.
    ///
    /// Returns: `()`
    fn ping(&self) {
        self.client().Ping()
    }
}
";
        assert_eq!(renderer.render_service(), expected);
    }

    #[test]
    fn test_render_table() {
        let output = ServiceRenderer::render_table(&[("Address", "Address"), ("my-type", "my_type")]);
        assert_eq!(
            output,
            "/// Schema type names and their generated identifiers.
pub const WSDL_TYPES: &[(&str, &str)] = &[
    (\"Address\", \"Address\"),
    (\"my-type\", \"my_type\"),
];
"
        );
    }

    #[test]
    fn test_render_empty_table() {
        let output = ServiceRenderer::render_table(&[]);
        assert!(output.ends_with("pub const WSDL_TYPES: &[(&str, &str)] = &[];\n"));
    }
}
