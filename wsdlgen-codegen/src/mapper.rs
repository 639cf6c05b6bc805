//! Schema type mapping.
//!
//! Maps XML Schema builtin types to Rust types and default values. The
//! tables are constant data; a [`TypeMapper`] is built from them and passed
//! to the components that need it.

use crate::config::GeneratorConfig;
use crate::ident::normalize;
use std::collections::{BTreeMap, BTreeSet};
use wsdlgen_schema::Attribute;

/// Placeholder rendered for names without a primitive mapping.
pub const FALLBACK_TEMPLATE: &str = "{type_name}";

/// XML Schema builtin name to Rust type.
pub const PRIMITIVE_TYPES: &[(&str, &str)] = &[
    ("boolean", "bool"),
    ("string", "String"),
    ("normalizedString", "String"),
    ("token", "String"),
    ("language", "String"),
    ("Name", "String"),
    ("NCName", "String"),
    ("NMTOKEN", "String"),
    ("ID", "String"),
    ("IDREF", "String"),
    ("QName", "String"),
    ("anyURI", "String"),
    ("anyType", "String"),
    ("anySimpleType", "String"),
    ("duration", "String"),
    ("gYear", "String"),
    ("gYearMonth", "String"),
    ("gMonth", "String"),
    ("gMonthDay", "String"),
    ("gDay", "String"),
    ("base64Binary", "String"),
    ("hexBinary", "String"),
    ("integer", "i64"),
    ("long", "i64"),
    ("int", "i32"),
    ("short", "i16"),
    ("byte", "i8"),
    ("nonPositiveInteger", "i64"),
    ("negativeInteger", "i64"),
    ("unsignedLong", "u64"),
    ("unsignedInt", "u32"),
    ("unsignedShort", "u16"),
    ("unsignedByte", "u8"),
    ("positiveInteger", "u64"),
    ("nonNegativeInteger", "u64"),
    ("float", "f32"),
    ("double", "f64"),
    ("decimal", "rust_decimal::Decimal"),
    ("dateTime", "chrono::DateTime<chrono::Utc>"),
    ("date", "chrono::NaiveDate"),
    ("time", "chrono::NaiveTime"),
];

/// Rust type to default value literal.
pub const DEFAULT_VALUES: &[(&str, &str)] = &[
    ("bool", "false"),
    ("String", "String::new()"),
    ("i8", "0"),
    ("i16", "0"),
    ("i32", "0"),
    ("i64", "0"),
    ("u8", "0"),
    ("u16", "0"),
    ("u32", "0"),
    ("u64", "0"),
    ("f32", "0.0"),
    ("f64", "0.0"),
];

/// Raw schema type name to generated identifier.
pub type Aliases = BTreeMap<String, String>;

/// Lookup tables used by the mapper.
#[derive(Debug, Clone, Copy)]
pub struct TypeTables {
    /// Builtin name to Rust type.
    pub primitives: &'static [(&'static str, &'static str)],
    /// Rust type to default literal.
    pub defaults: &'static [(&'static str, &'static str)],
    /// Template for everything else.
    pub fallback: &'static str,
}

impl Default for TypeTables {
    fn default() -> Self {
        Self {
            primitives: PRIMITIVE_TYPES,
            defaults: DEFAULT_VALUES,
            fallback: FALLBACK_TEMPLATE,
        }
    }
}

/// Maps schema type references to Rust types.
#[derive(Debug, Clone)]
pub struct TypeMapper<'a> {
    tables: TypeTables,
    config: &'a GeneratorConfig,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper over the given tables.
    #[must_use]
    pub fn new(tables: TypeTables, config: &'a GeneratorConfig) -> Self {
        Self { tables, config }
    }

    /// Creates a mapper over the builtin tables.
    #[must_use]
    pub fn standard(config: &'a GeneratorConfig) -> Self {
        Self::new(TypeTables::default(), config)
    }

    /// Returns the template for a canonical name: the Rust primitive, or the
    /// fallback for unknown and absent names.
    #[must_use]
    pub fn template(&self, canonical_name: Option<&str>) -> &'static str {
        canonical_name
            .and_then(|name| self.primitive(name))
            .unwrap_or(self.tables.fallback)
    }

    /// Looks up the Rust primitive for a builtin name.
    #[must_use]
    pub fn primitive(&self, name: &str) -> Option<&'static str> {
        self.tables
            .primitives
            .iter()
            .find(|(schema, _)| *schema == name)
            .map(|(_, rust)| *rust)
    }

    /// Fills a template. `required` is accepted for optional-wrapping and
    /// does not change the output.
    #[must_use]
    pub fn render(template: &str, type_name: &str, _required: bool) -> String {
        template.replace("{type_name}", type_name)
    }

    /// Returns the default value expression for a mapped Rust type.
    #[must_use]
    pub fn default_value(&self, rust_type: &str) -> String {
        self.tables
            .defaults
            .iter()
            .find(|(ty, _)| *ty == rust_type)
            .map_or_else(|| format!("<{rust_type}>::default()"), |(_, v)| (*v).to_string())
    }

    /// Returns true if a reference with this name and namespace is a builtin.
    #[must_use]
    pub fn is_primitive(&self, name: &str, namespace: &str) -> bool {
        (namespace.is_empty() || self.config.is_standard(namespace)) && self.primitive(name).is_some()
    }

    /// Maps a type reference to a Rust type.
    ///
    /// User types resolve to their allocated identifier; their raw names are
    /// recorded in `deps`.
    pub fn map_reference(
        &self,
        name: &str,
        namespace: &str,
        required: bool,
        aliases: &Aliases,
        deps: &mut BTreeSet<String>,
    ) -> String {
        if self.is_primitive(name, namespace) {
            return Self::render(self.template(Some(name)), name, required);
        }

        let identifier = match aliases.get(name) {
            Some(identifier) => identifier.clone(),
            None => {
                tracing::warn!(
                    "Unresolved type '{}' in namespace '{}', using fallback",
                    name,
                    namespace
                );
                normalize(name)
            }
        };
        if !self.config.is_standard(namespace) {
            deps.insert(name.to_string());
        }
        Self::render(self.tables.fallback, &identifier, required)
    }

    /// Maps an attribute's type to a Rust type.
    pub fn map_attribute(
        &self,
        attribute: &Attribute,
        aliases: &Aliases,
        deps: &mut BTreeSet<String>,
    ) -> String {
        self.map_reference(
            attribute.type_name(),
            attribute.type_namespace(),
            attribute.required(),
            aliases,
            deps,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsdlgen_schema::QName;

    fn aliases() -> Aliases {
        let mut aliases = Aliases::new();
        aliases.insert("Address".to_string(), "Address".to_string());
        aliases.insert("order-line".to_string(), "order_line".to_string());
        aliases
    }

    #[test]
    fn test_template_lookup() {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::standard(&config);

        assert_eq!(mapper.template(Some("boolean")), "bool");
        assert_eq!(mapper.template(Some("string")), "String");
        assert_eq!(mapper.template(Some("unsignedShort")), "u16");
        assert_eq!(mapper.template(Some("decimal")), "rust_decimal::Decimal");
        assert_eq!(mapper.template(Some("Address")), FALLBACK_TEMPLATE);
        assert_eq!(mapper.template(None), FALLBACK_TEMPLATE);
    }

    #[test]
    fn test_render_ignores_required() {
        assert_eq!(TypeMapper::render("{type_name}", "Foo", true), "Foo");
        assert_eq!(TypeMapper::render("{type_name}", "Foo", false), "Foo");
    }

    #[test]
    fn test_default_values() {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::standard(&config);

        assert_eq!(mapper.default_value("i32"), "0");
        assert_eq!(mapper.default_value("f64"), "0.0");
        assert_eq!(mapper.default_value("bool"), "false");
        assert_eq!(mapper.default_value("String"), "String::new()");
        assert_eq!(mapper.default_value("Address"), "<Address>::default()");
        assert_eq!(
            mapper.default_value("chrono::NaiveDate"),
            "<chrono::NaiveDate>::default()"
        );
    }

    #[test]
    fn test_map_primitive_records_no_dependency() {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::standard(&config);
        let mut deps = BTreeSet::new();

        let attr = Attribute::xsd("count", "int");
        assert_eq!(mapper.map_attribute(&attr, &aliases(), &mut deps), "i32");
        assert!(deps.is_empty());
    }

    #[test]
    fn test_map_user_type_records_dependency() {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::standard(&config);
        let mut deps = BTreeSet::new();

        let attr = Attribute::new("line", Some(QName::new("urn:shop", "order-line")));
        assert_eq!(mapper.map_attribute(&attr, &aliases(), &mut deps), "order_line");
        assert!(deps.contains("order-line"));
    }

    #[test]
    fn test_map_user_type_named_like_primitive() {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::standard(&config);
        let mut deps = BTreeSet::new();

        let attr = Attribute::new("d", Some(QName::new("urn:shop", "date")));
        assert_eq!(mapper.map_attribute(&attr, &aliases(), &mut deps), "date");
        assert!(deps.contains("date"));
    }

    #[test]
    fn test_map_unknown_standard_type_falls_back() {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::standard(&config);
        let mut deps = BTreeSet::new();

        let attr = Attribute::new(
            "items",
            Some(QName::new("http://schemas.xmlsoap.org/soap/encoding/", "Array")),
        );
        assert_eq!(mapper.map_attribute(&attr, &aliases(), &mut deps), "Array");
        assert!(deps.is_empty());
    }

    #[test]
    fn test_map_unresolved_reference() {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::standard(&config);
        let mut deps = BTreeSet::new();

        let attr = Attribute::new("x", None);
        assert_eq!(mapper.map_attribute(&attr, &aliases(), &mut deps), "__");
    }
}
