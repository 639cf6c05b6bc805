//! Type descriptor extraction.
//!
//! Walks the top-level type nodes of one service definition and produces
//! descriptors, rendered declaration fragments and the dependency graph the
//! ordering pass consumes.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::ident::{IdentifierAllocator, normalize, to_snake_case};
use crate::mapper::{Aliases, TypeMapper};
use crate::rust::{EnumRenderer, RecordRenderer};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use wsdlgen_schema::{QName, ServiceDefinition, TypeNode};

/// Raw type name to the raw names it depends on.
pub type DependencyGraph = BTreeMap<String, BTreeSet<String>>;

/// Rust type used for a field that refers to its own record.
pub const SELF_REFERENCE_TYPE: &str = "Option<Box<Self>>";

/// Member of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Schema value.
    pub value: String,
    /// Variant identifier.
    pub identifier: String,
}

/// Field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Schema attribute name.
    pub name: String,
    /// Field identifier.
    pub identifier: String,
    /// Raw schema type name.
    pub schema_type: String,
    /// Mapped Rust type.
    pub rust_type: String,
    /// Default value expression.
    pub default_value: String,
}

/// Kind-specific part of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorKind {
    /// Enumeration with its members in source order.
    Enum {
        /// Members.
        members: Vec<EnumMember>,
    },
    /// Structured record.
    Record {
        /// Embedded direct base, if any.
        base: Option<FieldDescriptor>,
        /// Own fields in source order.
        fields: Vec<FieldDescriptor>,
        /// Identifiers of every base along the extension chain.
        bases: Vec<String>,
    },
}

/// Derived description of one retained schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Raw schema name.
    pub raw_name: String,
    /// Allocated identifier.
    pub identifier: String,
    /// Declaring namespace.
    pub namespace: String,
    /// Enumeration or record data.
    pub kind: DescriptorKind,
    /// Raw names of user types this type refers to.
    pub dependencies: BTreeSet<String>,
}

impl TypeDescriptor {
    /// Returns true for enumerations.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, DescriptorKind::Enum { .. })
    }

    /// Returns the record fields, empty for enumerations.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        match &self.kind {
            DescriptorKind::Record { fields, .. } => fields,
            DescriptorKind::Enum { .. } => &[],
        }
    }

    /// Returns the schema-qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{{{}}}{}", self.namespace, self.raw_name)
    }
}

/// Result of extracting the types of one service definition.
#[derive(Debug, Clone, Default)]
pub struct ExtractedTypes {
    /// Raw name to identifier.
    pub aliases: Aliases,
    /// `(raw, identifier)` in extraction order.
    pub sequence: Vec<(String, String)>,
    /// Descriptors keyed by raw name.
    pub descriptors: BTreeMap<String, TypeDescriptor>,
    /// `(raw, text)` declaration fragments in extraction order.
    pub fragments: Vec<(String, String)>,
    /// Dependency edges between retained types.
    pub dependencies: DependencyGraph,
}

impl ExtractedTypes {
    /// Returns the fields of an extracted record, or `None` if `raw` is not
    /// an extracted record.
    #[must_use]
    pub fn record_fields(&self, raw: &str) -> Option<&[FieldDescriptor]> {
        self.descriptors
            .get(raw)
            .filter(|descriptor| !descriptor.is_enum())
            .map(TypeDescriptor::fields)
    }

    /// Returns the number of extracted types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if no type was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Extracts type descriptors from a service definition.
pub struct TypeExtractor<'a> {
    service: &'a ServiceDefinition,
    config: &'a GeneratorConfig,
    mapper: &'a TypeMapper<'a>,
}

impl<'a> TypeExtractor<'a> {
    /// Creates a new extractor.
    #[must_use]
    pub fn new(
        service: &'a ServiceDefinition,
        config: &'a GeneratorConfig,
        mapper: &'a TypeMapper<'a>,
    ) -> Self {
        Self {
            service,
            config,
            mapper,
        }
    }

    /// Extracts every retained type.
    ///
    /// `reserved` identifiers are never handed to types.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateType` if two retained types share a
    /// raw name.
    pub fn extract(&self, reserved: &[&str]) -> Result<ExtractedTypes, CodegenError> {
        let nodes = self.retained_nodes();

        let mut allocator = IdentifierAllocator::new();
        for identifier in reserved {
            allocator.reserve(*identifier);
        }

        let mut extracted = ExtractedTypes::default();
        let mut declared: BTreeMap<&str, &str> = BTreeMap::new();
        for node in &nodes {
            if let Some(first) = declared.insert(node.name(), node.namespace()) {
                return Err(CodegenError::DuplicateType {
                    name: node.name().to_string(),
                    first: first.to_string(),
                    second: node.namespace().to_string(),
                });
            }
            let identifier = allocator.allocate(node.name());
            extracted
                .aliases
                .insert(node.name().to_string(), identifier.clone());
            extracted
                .sequence
                .push((node.name().to_string(), identifier));
        }

        for node in nodes {
            let descriptor = self.describe(node, &extracted.aliases);
            tracing::debug!(
                "Extracted {} '{}' as {} ({} dependencies)",
                if descriptor.is_enum() { "enumeration" } else { "record" },
                descriptor.raw_name,
                descriptor.identifier,
                descriptor.dependencies.len()
            );

            let text = if descriptor.is_enum() {
                EnumRenderer::new(&descriptor).render()
            } else {
                RecordRenderer::new(&descriptor).render()
            };
            extracted
                .dependencies
                .insert(descriptor.raw_name.clone(), descriptor.dependencies.clone());
            extracted
                .fragments
                .push((descriptor.raw_name.clone(), text));
            extracted
                .descriptors
                .insert(descriptor.raw_name.clone(), descriptor);
        }

        Ok(extracted)
    }

    /// Returns the non-standard nodes sorted by ordinal.
    fn retained_nodes(&self) -> Vec<&'a TypeNode> {
        let mut nodes: Vec<&TypeNode> = self
            .service
            .types
            .iter()
            .filter(|node| !self.config.is_standard(node.namespace()))
            .collect();
        nodes.sort_by_key(|node| node.ordinal());
        nodes
    }

    /// Builds the descriptor of one node.
    fn describe(&self, node: &TypeNode, aliases: &Aliases) -> TypeDescriptor {
        let identifier = aliases
            .get(node.name())
            .cloned()
            .unwrap_or_else(|| normalize(node.name()));
        if !node.is_enum() {
            return self.describe_record(node, identifier, aliases);
        }

        TypeDescriptor {
            raw_name: node.name().to_string(),
            identifier,
            namespace: node.namespace().to_string(),
            kind: DescriptorKind::Enum {
                members: Self::members(node),
            },
            dependencies: BTreeSet::new(),
        }
    }

    fn members(node: &TypeNode) -> Vec<EnumMember> {
        let mut allocator = IdentifierAllocator::new();
        node.children()
            .iter()
            .map(|child| EnumMember {
                value: child.name.clone(),
                identifier: allocator.unique(&child.name.replace(' ', "_")),
            })
            .collect()
    }

    fn describe_record(
        &self,
        node: &TypeNode,
        identifier: String,
        aliases: &Aliases,
    ) -> TypeDescriptor {
        let mut dependencies = BTreeSet::new();
        let mut fields_alloc = IdentifierAllocator::new();

        let chain = self.base_chain(node);
        let mut bases = Vec::with_capacity(chain.len());
        for base in &chain {
            bases.push(self.mapper.map_reference(
                &base.name,
                &base.namespace,
                true,
                aliases,
                &mut dependencies,
            ));
        }

        let base = chain.first().zip(bases.first()).map(|(qname, ty)| {
            let raw = to_snake_case(&qname.name);
            FieldDescriptor {
                name: qname.name.clone(),
                identifier: fields_alloc.unique(&raw),
                schema_type: qname.name.clone(),
                rust_type: ty.clone(),
                default_value: self.mapper.default_value(ty),
            }
        });

        let fields = node
            .children()
            .iter()
            .map(|child| {
                let is_self = child.type_name() == node.name()
                    && child.type_namespace() == node.namespace();
                let (rust_type, default_value) = if is_self {
                    (SELF_REFERENCE_TYPE.to_string(), "None".to_string())
                } else {
                    let ty = self.mapper.map_attribute(child, aliases, &mut dependencies);
                    let default_value = self.mapper.default_value(&ty);
                    (ty, default_value)
                };
                FieldDescriptor {
                    name: child.name.clone(),
                    identifier: fields_alloc.unique(&child.name.replace(' ', "_")),
                    schema_type: child.type_name().to_string(),
                    rust_type,
                    default_value,
                }
            })
            .collect();

        dependencies.remove(node.name());

        TypeDescriptor {
            raw_name: node.name().to_string(),
            identifier,
            namespace: node.namespace().to_string(),
            kind: DescriptorKind::Record {
                base,
                fields,
                bases,
            },
            dependencies,
        }
    }

    /// Walks the extension chain, nearest base first. Standard-namespace
    /// bases end the walk.
    fn base_chain(&self, node: &TypeNode) -> Vec<QName> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(node.qname());

        let mut current = node.extension().cloned();
        while let Some(base) = current {
            if self.config.is_standard(&base.namespace) || !visited.insert(base.clone()) {
                break;
            }
            current = self
                .service
                .find_type(&base)
                .and_then(|found| found.extension().cloned());
            chain.push(base);
        }
        chain
    }
}
