use crate::errors::{TemplateError, TemplateResult};
use crate::grammar::GrammarConfig;
use std::collections::HashMap;
use std::fmt;

/// A `{name}` or `{name:type}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterToken {
    pub name: String,
    pub type_name: Option<String>,
    raw: String,
}

impl ParameterToken {
    /// Builds a token from its full text `raw` and the text between its bounds.
    ///
    /// An empty type (`{name:}`) is treated as no type.
    pub fn from_content(raw: &str, content: &str, separator: char) -> TemplateResult<Self> {
        let mut parts = content.split(separator);
        let name = parts.next().unwrap_or_default();
        let type_name = parts.next();
        if parts.next().is_some() {
            return Err(TemplateError::InvalidParameter {
                token: raw.to_string(),
                reason: "separator appears more than once",
            });
        }
        if name.is_empty() {
            return Err(TemplateError::InvalidParameter {
                token: raw.to_string(),
                reason: "parameter name is empty",
            });
        }

        Ok(Self {
            name: name.to_string(),
            type_name: type_name.filter(|t| !t.is_empty()).map(str::to_string),
            raw: raw.to_string(),
        })
    }

    /// The token exactly as written in the template.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when the name matches `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn is_identifier(&self) -> bool {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }
}

/// Index of a node inside a [`RouteTemplate`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Literal(String),
    Parameter(ParameterToken),
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A template parsed once into literal, parameter and optional nodes.
///
/// Compilation and reversal are read-only traversals of this tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    pub(crate) source: String,
    pub(crate) grammar: GrammarConfig,
    pub(crate) nodes: Vec<TemplateNode>,
}

impl RouteTemplate {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn grammar(&self) -> &GrammarConfig {
        &self.grammar
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The node behind `id`, or `None` when `id` belongs to another template.
    pub fn node(&self, id: NodeId) -> Option<&TemplateNode> {
        self.nodes.get(id.0)
    }

    /// Direct children of `id` in document order; empty for a foreign `id`.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TemplateNode)> {
        self.nodes
            .get(id.0)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(move |&child| Some((child, self.nodes.get(child.0)?)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Parameter names in document order, without duplicates.
    pub fn param_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for token in self.tokens() {
            if !names.contains(&token.name.as_str()) {
                names.push(&token.name);
            }
        }
        names
    }

    /// Parameters that sit outside every optional segment.
    pub fn required_params(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (_, node) in self.children(self.root()) {
            if let NodeKind::Parameter(token) = &node.kind {
                if !names.contains(&token.name.as_str()) {
                    names.push(&token.name);
                }
            }
        }
        names
    }

    /// Deepest nesting of optional segments.
    pub fn depth(&self) -> usize {
        // Parents are always pushed before their children.
        let mut levels = vec![0usize; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            let inherited = node.parent.map_or(0, |parent| levels[parent.0]);
            levels[index] = inherited + usize::from(node.kind == NodeKind::Optional);
        }
        levels.into_iter().max().unwrap_or(0)
    }

    fn tokens(&self) -> impl Iterator<Item = &ParameterToken> {
        // Nodes are pushed in document order by the parser.
        self.nodes.iter().filter_map(|node| match &node.kind {
            NodeKind::Parameter(token) => Some(token),
            _ => None,
        })
    }
}

/// Matching pattern produced by the compiler, unanchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    pub(crate) pattern: String,
    pub(crate) param_names: Vec<String>,
}

impl CompiledPattern {
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Capture group names in the order they appear in the pattern.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn anchored(&self) -> String {
        format!("^{}$", self.pattern)
    }

    pub fn to_regex(&self) -> TemplateResult<regex::Regex> {
        Ok(regex::Regex::new(&self.anchored())?)
    }

    pub fn into_string(self) -> String {
        self.pattern
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl AsRef<str> for CompiledPattern {
    fn as_ref(&self) -> &str {
        &self.pattern
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub path_params: HashMap<String, String>,
}

impl RouteMatch {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }
}
