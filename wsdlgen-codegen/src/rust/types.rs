//! Record code generation.

use crate::extract::{DescriptorKind, FieldDescriptor, TypeDescriptor};
use crate::rust::{INDENT, push_doc, push_doc_break};

/// Renderer for structured record declarations.
pub struct RecordRenderer<'a> {
    descriptor: &'a TypeDescriptor,
}

impl<'a> RecordRenderer<'a> {
    /// Creates a new record renderer.
    #[must_use]
    pub fn new(descriptor: &'a TypeDescriptor) -> Self {
        Self { descriptor }
    }

    /// Renders the struct and its `Default` impl.
    #[must_use]
    pub fn render(&self) -> String {
        let (base, fields, bases) = match &self.descriptor.kind {
            DescriptorKind::Record {
                base,
                fields,
                bases,
            } => (base.as_ref(), fields.as_slice(), bases.as_slice()),
            DescriptorKind::Enum { .. } => (None, &[][..], &[][..]),
        };
        let all_fields: Vec<&FieldDescriptor> = base.into_iter().chain(fields).collect();
        let name = &self.descriptor.identifier;
        let mut output = String::new();

        push_doc(
            &mut output,
            "",
            &format!("SOAP complex type `{}`.", self.descriptor.qualified_name()),
        );
        if !bases.is_empty() {
            let chain: Vec<String> = bases.iter().map(|b| format!("`{b}`")).collect();
            push_doc_break(&mut output, "");
            push_doc(&mut output, "", &format!("Extends {}.", chain.join(", ")));
        }
        output.push_str("#[derive(Debug, Clone, PartialEq)]\n");

        if all_fields.is_empty() {
            output.push_str(&format!("pub struct {name} {{}}\n\n"));
            output.push_str(&format!("impl Default for {name} {{\n"));
            output.push_str(&format!("{INDENT}fn default() -> Self {{\n"));
            output.push_str(&format!("{INDENT}{INDENT}Self {{}}\n"));
            output.push_str(&format!("{INDENT}}}\n"));
            output.push_str("}\n");
            return output;
        }

        output.push_str(&format!("pub struct {name} {{\n"));
        for field in &all_fields {
            output.push_str(&format!(
                "{INDENT}pub {}: {},\n",
                field.identifier, field.rust_type
            ));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl Default for {name} {{\n"));
        output.push_str(&format!("{INDENT}fn default() -> Self {{\n"));
        output.push_str(&format!("{INDENT}{INDENT}Self {{\n"));
        for field in &all_fields {
            output.push_str(&format!(
                "{INDENT}{INDENT}{INDENT}{}: {},\n",
                field.identifier, field.default_value
            ));
        }
        output.push_str(&format!("{INDENT}{INDENT}}}\n"));
        output.push_str(&format!("{INDENT}}}\n"));
        output.push_str("}\n");

        output
    }
}
