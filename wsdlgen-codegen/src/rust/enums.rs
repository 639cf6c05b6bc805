//! Enumeration code generation.

use crate::extract::{DescriptorKind, TypeDescriptor};
use crate::rust::{INDENT, push_doc, string_literal};

/// Renderer for enumeration declarations.
pub struct EnumRenderer<'a> {
    descriptor: &'a TypeDescriptor,
}

impl<'a> EnumRenderer<'a> {
    /// Creates a new enum renderer.
    #[must_use]
    pub fn new(descriptor: &'a TypeDescriptor) -> Self {
        Self { descriptor }
    }

    /// Renders the enum and its `as_str` accessor.
    #[must_use]
    pub fn render(&self) -> String {
        let members = match &self.descriptor.kind {
            DescriptorKind::Enum { members } => members.as_slice(),
            DescriptorKind::Record { .. } => &[],
        };
        let name = &self.descriptor.identifier;
        let mut output = String::new();

        push_doc(
            &mut output,
            "",
            &format!("SOAP enumeration `{}`.", self.descriptor.qualified_name()),
        );
        if members.is_empty() {
            output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        } else {
            output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]\n");
        }
        output.push_str(&format!("pub enum {name} {{\n"));
        for (index, member) in members.iter().enumerate() {
            if index == 0 {
                output.push_str(&format!("{INDENT}#[default]\n"));
            }
            output.push_str(&format!("{INDENT}{} = {},\n", member.identifier, index + 1));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl {name} {{\n"));
        output.push_str(&format!("{INDENT}/// Returns the schema value.\n"));
        output.push_str(&format!("{INDENT}#[must_use]\n"));
        output.push_str(&format!(
            "{INDENT}pub const fn as_str(&self) -> &'static str {{\n"
        ));
        output.push_str(&format!("{INDENT}{INDENT}match *self {{\n"));
        for member in members {
            output.push_str(&format!(
                "{INDENT}{INDENT}{INDENT}Self::{} => {},\n",
                member.identifier,
                string_literal(&member.value)
            ));
        }
        output.push_str(&format!("{INDENT}{INDENT}}}\n"));
        output.push_str(&format!("{INDENT}}}\n"));
        output.push_str("}\n");

        output
    }
}
