use thiserror::Error;

/// Stable machine-readable codes reported by [`TemplateError::code`].
pub mod error_codes {
    pub const INVALID_PARAMETER: &str = "RSROUTE_INVALID_PARAMETER";
    pub const UNKNOWN_TYPE: &str = "RSROUTE_UNKNOWN_TYPE";
    pub const IRREVERSIBLE: &str = "RSROUTE_IRREVERSIBLE";
    pub const INVALID_GRAMMAR: &str = "RSROUTE_INVALID_GRAMMAR";
    pub const INVALID_TYPE_PATTERN: &str = "RSROUTE_INVALID_TYPE_PATTERN";
    pub const INVALID_PATTERN: &str = "RSROUTE_INVALID_PATTERN";
    pub const INVALID_CONFIG: &str = "RSROUTE_INVALID_CONFIG";
}

/// Failure raised while configuring, compiling or reversing a route template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A parameter token repeats the separator or has an empty name.
    #[error("invalid parameter {token}: {reason}")]
    InvalidParameter { token: String, reason: &'static str },

    /// A parameter references a type missing from the type catalog.
    #[error("unknown parameter type '{name}'")]
    UnknownType { name: String },

    /// Reversal left bound characters behind, so a required parameter was not supplied.
    #[error("route '{template}' is irreversible (unresolved parameters: {unresolved:?})")]
    Irreversible {
        template: String,
        unresolved: Vec<String>,
    },

    /// The bound characters of a grammar are not pairwise distinct.
    #[error("invalid grammar: {message}")]
    InvalidGrammar { message: String },

    /// A type catalog entry is not a valid pattern fragment.
    #[error("invalid pattern for type '{name}': {source}")]
    InvalidTypePattern { name: String, source: regex::Error },

    /// The regex engine rejected a compiled pattern.
    #[error("invalid compiled pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A configuration document could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl TemplateError {
    pub fn code(&self) -> &'static str {
        match self {
            TemplateError::InvalidParameter { .. } => error_codes::INVALID_PARAMETER,
            TemplateError::UnknownType { .. } => error_codes::UNKNOWN_TYPE,
            TemplateError::Irreversible { .. } => error_codes::IRREVERSIBLE,
            TemplateError::InvalidGrammar { .. } => error_codes::INVALID_GRAMMAR,
            TemplateError::InvalidTypePattern { .. } => error_codes::INVALID_TYPE_PATTERN,
            TemplateError::InvalidPattern(_) => error_codes::INVALID_PATTERN,
            TemplateError::Config(_) => error_codes::INVALID_CONFIG,
        }
    }
}

pub type TemplateResult<T> = Result<T, TemplateError>;
