pub use crate::config::SyntaxConfig;
pub use crate::errors::{TemplateError, TemplateResult};
pub use crate::grammar::{BracketScanner, GrammarConfig, TypeCatalog};
pub use crate::routing::{
    parse_route_template, CompiledPattern, ParameterToken, PatternCompiler, PatternMatcher,
    RouteMatch, RouteTemplate, TemplateReverser,
};
pub use crate::values::ParamLookup;

/// Compiles `template` with the default grammar and type catalog.
pub fn compile(template: &str) -> TemplateResult<CompiledPattern> {
    PatternCompiler::default().compile(template)
}

/// Reverses `template` with the default grammar.
pub fn reverse<V>(template: &str, values: &V) -> TemplateResult<String>
where
    V: ParamLookup + ?Sized,
{
    TemplateReverser::default().reverse(template, values)
}
