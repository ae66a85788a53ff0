pub mod compiler;
pub mod matcher;
pub mod parser;
pub mod reverser;
pub mod types;

pub use compiler::PatternCompiler;
pub use matcher::PatternMatcher;
pub use parser::parse_route_template;
pub use reverser::TemplateReverser;
pub use types::{
    CompiledPattern, NodeId, NodeKind, ParameterToken, RouteMatch, RouteTemplate, TemplateNode,
};
