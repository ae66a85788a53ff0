//! # SYNTAX CONFIGURATION
//!
//! **PURPOSE**: Declarative description of a template grammar, its default
//! parameter type and extra catalog types, decodable from JSON.
//!
//! ```rust
//! use rsroute::config::SyntaxConfig;
//!
//! let config = SyntaxConfig::from_json(r#"{"option_bounds": ["<", ">"]}"#).unwrap();
//! let compiler = config.compiler().unwrap();
//! assert_eq!(compiler.compile("/a</{b}>").unwrap().as_str(), "/a(?:/(?P<b>[^/.]+))?");
//! ```

use crate::errors::TemplateResult;
use crate::grammar::{GrammarConfig, TypeCatalog, DEFAULT_TYPE};
use crate::routing::{PatternCompiler, TemplateReverser};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// **SYNTAX CONFIGURATION CONTAINER**
///
/// Every field is optional in a document; omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntaxConfig {
    /// **OPTIONAL SEGMENT BOUNDS** - default `["[", "]"]`
    pub option_bounds: (char, char),

    /// **PARAMETER BOUNDS** - default `["{", "}"]`
    pub param_bounds: (char, char),

    /// **TYPE SEPARATOR** - default `":"`
    pub param_separator: char,

    /// **DEFAULT PARAMETER TYPE** - compiler only, default `"chunk"`
    pub default_type: String,

    /// **EXTRA TYPES** - added to (or overriding) the built-in catalog
    pub types: BTreeMap<String, String>,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        let grammar = GrammarConfig::default();
        Self {
            option_bounds: grammar.option_bounds(),
            param_bounds: grammar.param_bounds(),
            param_separator: grammar.separator(),
            default_type: DEFAULT_TYPE.to_string(),
            types: BTreeMap::new(),
        }
    }
}

impl SyntaxConfig {
    /// **JSON DECODER** - No validation beyond the document shape
    pub fn from_json(document: &str) -> TemplateResult<Self> {
        Ok(serde_json::from_str(document)?)
    }

    pub fn grammar(&self) -> TemplateResult<GrammarConfig> {
        GrammarConfig::new(self.option_bounds, self.param_bounds, self.param_separator)
    }

    pub fn catalog(&self) -> TemplateResult<TypeCatalog> {
        self.types
            .iter()
            .try_fold(TypeCatalog::new(), |catalog, (name, fragment)| {
                catalog.with_type(name.as_str(), fragment.as_str())
            })
    }

    /// **COMPILER FACTORY** - Validates grammar, catalog and default type
    pub fn compiler(&self) -> TemplateResult<PatternCompiler> {
        PatternCompiler::new(self.grammar()?, self.catalog()?)
            .with_default_type(self.default_type.as_str())
    }

    /// **REVERSER FACTORY** - Only the grammar is relevant to reversal
    pub fn reverser(&self) -> TemplateResult<TemplateReverser> {
        Ok(TemplateReverser::new(self.grammar()?))
    }
}
