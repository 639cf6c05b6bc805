//! Main code generator.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::extract::{ExtractedTypes, TypeExtractor};
use crate::ident::{IdentifierAllocator, normalize, to_snake_case};
use crate::mapper::TypeMapper;
use crate::methods::{MethodPlan, MethodSynthesizer, Response};
use crate::order::order;
use crate::rust::{
    INDENT, RESERVED_TYPE_NAMES, ServiceRenderer, indent_block, service::TYPE_TABLE,
};
use std::collections::BTreeSet;
use wsdlgen_schema::{SchemaGraph, ServiceDefinition};

/// Main code generator for WSDL service definitions.
pub struct Generator {
    config: GeneratorConfig,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator {
    /// Creates a new generator.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the code for every service definition of the graph.
    ///
    /// # Arguments
    /// * `graph` - Resolved schema graph
    /// * `location` - Source location named in each header
    ///
    /// # Errors
    /// Returns `CodegenError` on duplicate types, circular dependencies or
    /// ambiguous wrapped responses.
    pub fn generate(&self, graph: &SchemaGraph, location: &str) -> Result<String, CodegenError> {
        let mut modules = IdentifierAllocator::new();
        let mut units = Vec::with_capacity(graph.services.len());

        for service in &graph.services {
            let module = modules.unique(&to_snake_case(&service.name));
            units.push(self.generate_service(service, &module, location)?);
        }

        Ok(units.join("\n"))
    }

    /// Generates the unit of one service definition.
    fn generate_service(
        &self,
        service: &ServiceDefinition,
        module: &str,
        location: &str,
    ) -> Result<String, CodegenError> {
        tracing::info!(
            "Generating service '{}' ({} types, {} operations)",
            service.name,
            service.types.len(),
            service.operation_count()
        );

        let trait_name = normalize(&service.name);
        let client_name = normalize(&format!("{}Client", service.name));
        let mapper = TypeMapper::standard(&self.config);

        let mut reserved = vec![trait_name.as_str(), client_name.as_str(), TYPE_TABLE];
        reserved.extend_from_slice(RESERVED_TYPE_NAMES);
        let extracted = TypeExtractor::new(service, &self.config, &mapper).extract(&reserved)?;
        let declarations = order(extracted.fragments.clone(), &extracted.dependencies)?;
        let plan = MethodSynthesizer::new(&mapper, &extracted)
            .synthesize(service, self.config.remove_input_output_messages)?;
        let pruned = Self::effective_pruning(&extracted, &plan);

        let mut body = String::new();
        body.push_str("#![allow(non_snake_case, non_camel_case_types, dead_code)]\n");
        for (raw, text) in &declarations {
            if pruned.contains(raw) {
                continue;
            }
            body.push('\n');
            body.push_str(text);
        }

        let renderer = ServiceRenderer::new(
            &service.name,
            &service.target_namespace,
            &trait_name,
            &client_name,
            &plan,
        );
        body.push('\n');
        body.push_str(&renderer.render_client());
        body.push('\n');
        body.push_str(&renderer.render_service());

        let entries: Vec<(&str, &str)> = extracted
            .sequence
            .iter()
            .filter(|(raw, _)| !pruned.contains(raw))
            .map(|(raw, identifier)| (raw.as_str(), identifier.as_str()))
            .collect();
        body.push('\n');
        body.push_str(&ServiceRenderer::render_table(&entries));

        let mut output = String::new();
        output.push_str(&format!("// Generated by wsdlgen from {location}\n"));
        output.push_str(&format!("// Service: {}\n\n", service.name));
        output.push_str(&format!("pub mod {module} {{\n"));
        output.push_str(&indent_block(&body, INDENT));
        output.push_str("}\n");

        Ok(output)
    }

    /// Returns the wrapper names to omit. A wrapper stays when a retained
    /// declaration or a method signature refers to it, directly or through
    /// another wrapper that stays.
    fn effective_pruning(extracted: &ExtractedTypes, plan: &MethodPlan) -> BTreeSet<String> {
        let mut pruned = plan.pruned.clone();

        let mut pending: Vec<(String, String)> = Vec::new();
        for (raw, deps) in &extracted.dependencies {
            if !plan.pruned.contains(raw) {
                pending.extend(deps.iter().map(|dep| (dep.clone(), format!("type '{raw}'"))));
            }
        }
        for method in plan.methods.values() {
            let user = format!("operation '{}'", method.name);
            pending.extend(
                method
                    .arguments
                    .iter()
                    .map(|argument| (argument.schema_type.clone(), user.clone())),
            );
            if let Response::Named { schema_type, .. } = &method.response {
                pending.push((schema_type.clone(), user));
            }
        }

        while let Some((name, user)) = pending.pop() {
            if !pruned.remove(&name) {
                continue;
            }
            tracing::warn!("Keeping wrapper type '{}': referenced by {}", name, user);
            if let Some(deps) = extracted.dependencies.get(&name) {
                pending.extend(deps.iter().map(|dep| (dep.clone(), format!("type '{name}'"))));
            }
        }

        for raw in &pruned {
            if extracted.aliases.contains_key(raw) {
                tracing::debug!("Pruning wrapper type '{}'", raw);
            }
        }
        pruned
    }
}
