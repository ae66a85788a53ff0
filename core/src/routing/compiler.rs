use crate::errors::TemplateResult;
use crate::grammar::{GrammarConfig, TypeCatalog, DEFAULT_TYPE};
use crate::routing::parser::parse_route_template;
use crate::routing::types::{CompiledPattern, NodeKind, ParameterToken, RouteTemplate};
use log::debug;

/// Turns route templates into regex matching patterns.
///
/// Each identifier-named parameter becomes one named capture bound to its
/// type fragment, each optional segment a non-capturing `(?:...)?` group.
/// Literal text is escaped.
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    grammar: GrammarConfig,
    catalog: TypeCatalog,
    default_type: String,
}

impl PatternCompiler {
    pub fn new(grammar: GrammarConfig, catalog: TypeCatalog) -> Self {
        Self {
            grammar,
            catalog,
            default_type: DEFAULT_TYPE.to_string(),
        }
    }

    /// Replaces the type used for parameters written without one.
    pub fn with_default_type(mut self, name: impl Into<String>) -> TemplateResult<Self> {
        let name = name.into();
        self.catalog.lookup(&name)?;
        self.default_type = name;
        Ok(self)
    }

    pub fn grammar(&self) -> &GrammarConfig {
        &self.grammar
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    pub fn compile(&self, template: &str) -> TemplateResult<CompiledPattern> {
        let tree = parse_route_template(template, &self.grammar)?;
        self.compile_tree(&tree)
    }

    pub fn compile_tree(&self, template: &RouteTemplate) -> TemplateResult<CompiledPattern> {
        let mut compiled = CompiledPattern {
            pattern: String::with_capacity(template.source().len() * 2),
            param_names: Vec::new(),
        };
        self.emit(template, &mut compiled)?;
        debug!(
            "compiled route '{}' into '{}'",
            template.source(),
            compiled.pattern
        );
        Ok(compiled)
    }

    fn emit(&self, template: &RouteTemplate, compiled: &mut CompiledPattern) -> TemplateResult<()> {
        // (node, index of its next child) for every open sequence.
        let mut stack = vec![(template.root(), 0usize)];
        while let Some((id, next_child)) = stack.pop() {
            let Some(&child) = template
                .node(id)
                .and_then(|node| node.children.get(next_child))
            else {
                if id != template.root() {
                    compiled.pattern.push_str(")?");
                }
                continue;
            };
            stack.push((id, next_child + 1));

            let Some(node) = template.node(child) else {
                continue;
            };
            match &node.kind {
                NodeKind::Literal(text) => compiled.pattern.push_str(&regex::escape(text)),
                NodeKind::Parameter(token) if token.is_identifier() => {
                    let fragment = self.type_pattern(token)?;
                    compiled.pattern.push_str("(?P<");
                    compiled.pattern.push_str(&token.name);
                    compiled.pattern.push('>');
                    compiled.pattern.push_str(fragment);
                    compiled.pattern.push(')');
                    compiled.param_names.push(token.name.clone());
                }
                // Names that cannot label a capture group match themselves.
                NodeKind::Parameter(token) => {
                    compiled.pattern.push_str(&regex::escape(token.raw()))
                }
                NodeKind::Optional => {
                    compiled.pattern.push_str("(?:");
                    stack.push((child, 0));
                }
                NodeKind::Root => {}
            }
        }
        Ok(())
    }

    fn type_pattern(&self, token: &ParameterToken) -> TemplateResult<&str> {
        let type_name = token.type_name.as_deref().unwrap_or(&self.default_type);
        self.catalog.lookup(type_name)
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new(GrammarConfig::default(), TypeCatalog::default())
    }
}
