use crate::errors::{TemplateError, TemplateResult};
use regex::Regex;
use std::collections::BTreeMap;

/// Type used for parameters that carry no type annotation.
pub const DEFAULT_TYPE: &str = "chunk";

const DEFAULT_ENTRIES: [(&str, &str); 7] = [
    ("word", r"\w+"),
    ("alpha", r"[a-zA-Z]+"),
    ("digits", r"\d+"),
    ("number", r"\d*\.?\d+"),
    ("chunk", r"[^/.]+"),
    ("segment", r"[^/]+"),
    ("any", r".+"),
];

/// **TYPE CATALOG**
///
/// **PURPOSE**: Maps parameter type names to regex pattern fragments.
/// **GUARANTEE**: Every fragment compiled as a standalone regex when it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCatalog {
    entries: BTreeMap<String, String>,
}

impl TypeCatalog {
    /// **CONSTRUCTOR** - Catalog holding the built-in types
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(name, fragment)| (name.to_string(), fragment.to_string()))
                .collect(),
        }
    }

    /// **EMPTY CONSTRUCTOR** - Catalog without built-in types
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// **EXTENSION**
    ///
    /// Adds `name`, replacing an existing entry of the same name.
    ///
    /// **RETURNS**: `Err(TemplateError::InvalidTypePattern)` if `fragment` does not compile
    pub fn with_type(
        mut self,
        name: impl Into<String>,
        fragment: impl Into<String>,
    ) -> TemplateResult<Self> {
        let name = name.into();
        let fragment = fragment.into();
        if let Err(source) = Regex::new(&fragment) {
            return Err(TemplateError::InvalidTypePattern { name, source });
        }
        self.entries.insert(name, fragment);
        Ok(self)
    }

    pub fn lookup(&self, name: &str) -> TemplateResult<&str> {
        self.entries
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| TemplateError::UnknownType {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
