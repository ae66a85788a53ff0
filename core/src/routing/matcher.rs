use crate::errors::TemplateResult;
use crate::routing::types::{CompiledPattern, RouteMatch};
use regex::Regex;
use std::collections::HashMap;

/// Anchored regex built once from a [`CompiledPattern`] and used to pull
/// parameter values out of concrete paths.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    path_regex: Regex,
    param_names: Vec<String>,
}

impl PatternMatcher {
    pub fn new(pattern: &CompiledPattern) -> TemplateResult<Self> {
        Ok(Self {
            path_regex: pattern.to_regex()?,
            param_names: pattern.param_names().to_vec(),
        })
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.path_regex.is_match(path)
    }

    /// Parameters inside optional groups that did not participate are absent.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        let captures = self.path_regex.captures(path)?;
        let mut path_params = HashMap::new();
        for param_name in &self.param_names {
            if let Some(value) = captures.name(param_name) {
                path_params.insert(param_name.clone(), value.as_str().to_string());
            }
        }
        Some(RouteMatch { path_params })
    }
}
