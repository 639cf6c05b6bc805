//! Identifier normalization.
//!
//! Schema names are arbitrary namespace-qualified strings; generated code
//! needs Rust identifiers. Everything here is pure and deterministic.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Words that cannot be used as plain identifiers in generated code.
pub const RESERVED_WORDS: &[&str] = &[
    "_", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("static regex"));
static DOUBLE_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Z])").expect("static regex"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));

/// Returns true if `c` may start an identifier.
#[inline]
fn is_first_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Returns true if `c` may continue an identifier. `0` is not in the class.
#[inline]
fn is_subsequent_char(c: char) -> bool {
    is_first_char(c) || ('1'..='9').contains(&c)
}

/// Returns true if the whole string matches `[_A-Za-z][_A-Za-z1-9]*`.
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => is_first_char(first) && chars.all(is_subsequent_char),
        None => false,
    }
}

/// Returns true if `s` is a reserved word.
#[must_use]
pub fn is_reserved(s: &str) -> bool {
    RESERVED_WORDS.contains(&s)
}

/// Normalizes an arbitrary name into a valid identifier.
///
/// Invalid characters are replaced with `_` position by position, and a
/// trailing `_` is appended to reserved words. The empty string becomes `__`.
#[must_use]
pub fn normalize(identifier: &str) -> String {
    let mut result = if is_valid_identifier(identifier) {
        identifier.to_string()
    } else {
        let mut out = String::with_capacity(identifier.len().max(1));
        for (i, c) in identifier.chars().enumerate() {
            let keep = if i == 0 {
                is_first_char(c)
            } else {
                is_subsequent_char(c)
            };
            out.push(if keep { c } else { '_' });
        }
        if out.is_empty() {
            out.push('_');
        }
        out
    };

    if is_reserved(&result) {
        result.push('_');
    }
    result
}

/// Converts a camel-case or Pascal-case name to snake case.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let name = CAPITALIZED_WORD.replace_all(name, "${1}_${2}");
    let name = DOUBLE_UNDERSCORE.replace_all(&name, "_${1}");
    let name = LOWER_UPPER.replace_all(&name, "${1}_${2}");
    name.to_lowercase()
}

/// Hands out unique identifiers for raw schema names.
///
/// A raw name always gets the same identifier. A second raw name that
/// normalizes to an identifier already in use gets a numbered suffix.
#[derive(Debug, Default, Clone)]
pub struct IdentifierAllocator {
    taken: HashSet<String>,
    assigned: HashMap<String, String>,
}

impl IdentifierAllocator {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an identifier as unavailable.
    pub fn reserve(&mut self, identifier: impl Into<String>) {
        self.taken.insert(identifier.into());
    }

    /// Returns the identifier for `raw`, allocating one on first use.
    pub fn allocate(&mut self, raw: &str) -> String {
        if let Some(existing) = self.assigned.get(raw) {
            return existing.clone();
        }

        let identifier = self.unique(raw);
        self.assigned.insert(raw.to_string(), identifier.clone());
        identifier
    }

    /// Returns a fresh identifier for `candidate` without remembering the
    /// name it came from. Repeated candidates get numbered suffixes.
    pub fn unique(&mut self, candidate: &str) -> String {
        let base = normalize(candidate);
        let mut identifier = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&identifier) {
            identifier = normalize(&format!("{base}_{suffix}"));
            suffix += 1;
        }

        self.taken.insert(identifier.clone());
        identifier
    }

    /// Returns the identifier previously allocated for `raw`.
    #[must_use]
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.assigned.get(raw).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_valid_unchanged() {
        assert_eq!(normalize("Address"), "Address");
        assert_eq!(normalize("_private"), "_private");
        assert_eq!(normalize("item12"), "item12");
    }

    #[test]
    fn test_normalize_replaces_invalid() {
        assert_eq!(normalize("my-type"), "my_type");
        assert_eq!(normalize("1st"), "_st");
        assert_eq!(normalize("a.b c"), "a_b_c");
        assert_eq!(normalize("Straße"), "Stra_e");
    }

    #[test]
    fn test_normalize_zero_is_replaced() {
        assert_eq!(normalize("item10"), "item1_");
        assert_eq!(normalize("v2.0"), "v2__");
    }

    #[test]
    fn test_normalize_reserved_words() {
        assert_eq!(normalize("type"), "type_");
        assert_eq!(normalize("Self"), "Self_");
        assert_eq!(normalize("match"), "match_");
        assert_eq!(normalize("Type"), "Type");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "__");
        assert_eq!(normalize("_"), "__");
        assert_eq!(normalize("-"), "__");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("GetWeather"), "get_weather");
        assert_eq!(to_snake_case("zipCode"), "zip_code");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("getHTTPResponseCode"), "get_http_response_code");
        assert_eq!(to_snake_case("Get_Weather"), "get_weather");
        assert_eq!(to_snake_case("ID"), "id");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_allocator_stable_per_raw_name() {
        let mut alloc = IdentifierAllocator::new();
        assert_eq!(alloc.allocate("Address"), "Address");
        assert_eq!(alloc.allocate("Address"), "Address");
        assert_eq!(alloc.get("Address"), Some("Address"));
        assert_eq!(alloc.get("Missing"), None);
    }

    #[test]
    fn test_allocator_disambiguates_collisions() {
        let mut alloc = IdentifierAllocator::new();
        assert_eq!(alloc.allocate("my_type"), "my_type");
        assert_eq!(alloc.allocate("my-type"), "my_type_2");
        assert_eq!(alloc.allocate("my.type"), "my_type_3");
    }

    #[test]
    fn test_unique_suffixes_repeated_candidates() {
        let mut alloc = IdentifierAllocator::new();
        assert_eq!(alloc.unique(&to_snake_case("GetItem")), "get_item");
        assert_eq!(alloc.unique(&to_snake_case("getItem")), "get_item_2");
        assert_eq!(alloc.unique("get_item"), "get_item_3");
        assert_eq!(alloc.get("get_item"), None);
    }

    #[test]
    fn test_allocate_after_unique_avoids_taken() {
        let mut alloc = IdentifierAllocator::new();
        assert_eq!(alloc.unique("first_name"), "first_name");
        assert_eq!(alloc.allocate("first name"), "first_name_2");
        assert_eq!(alloc.allocate("first name"), "first_name_2");
    }

    #[test]
    fn test_allocator_respects_reserved() {
        let mut alloc = IdentifierAllocator::new();
        alloc.reserve("WSDL_TYPES");
        assert_eq!(alloc.allocate("WSDL_TYPES"), "WSDL_TYPES_2");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in any::<String>()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_yields_valid_identifier(s in any::<String>()) {
            let ident = normalize(&s);
            prop_assert!(is_valid_identifier(&ident));
            prop_assert!(!is_reserved(&ident));
        }

        #[test]
        fn normalize_keeps_char_count(s in "[ -~]{1,40}") {
            prop_assert!(normalize(&s).chars().count() >= s.chars().count());
        }
    }
}
