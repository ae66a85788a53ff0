use crate::errors::{TemplateError, TemplateResult};
use crate::grammar::scanner::BracketScanner;

/// **GRAMMAR CONFIGURATION**
///
/// **PURPOSE**: The four bound characters and the parameter type separator.
/// **GUARANTEE**: All five characters are pairwise distinct. Instances are
/// `Copy` and never change after construction, so one value can back any
/// number of concurrent compile and reverse calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarConfig {
    option_open: char,
    option_close: char,
    param_open: char,
    param_close: char,
    separator: char,
}

impl GrammarConfig {
    /// **CONSTRUCTOR**
    ///
    /// **PARAMETERS**:
    /// - `option_bounds` - open/close characters of an optional segment
    /// - `param_bounds` - open/close characters of a parameter token
    /// - `separator` - character between a parameter name and its type
    ///
    /// **RETURNS**: `Err(TemplateError::InvalidGrammar)` when two characters coincide
    pub fn new(
        option_bounds: (char, char),
        param_bounds: (char, char),
        separator: char,
    ) -> TemplateResult<Self> {
        let chars = [
            ("option open", option_bounds.0),
            ("option close", option_bounds.1),
            ("parameter open", param_bounds.0),
            ("parameter close", param_bounds.1),
            ("separator", separator),
        ];
        for (i, (left_role, left)) in chars.iter().enumerate() {
            for (right_role, right) in &chars[i + 1..] {
                if left == right {
                    return Err(TemplateError::InvalidGrammar {
                        message: format!("{left_role} and {right_role} are both '{left}'"),
                    });
                }
            }
        }

        Ok(Self {
            option_open: option_bounds.0,
            option_close: option_bounds.1,
            param_open: param_bounds.0,
            param_close: param_bounds.1,
            separator,
        })
    }

    pub fn option_bounds(&self) -> (char, char) {
        (self.option_open, self.option_close)
    }

    pub fn param_bounds(&self) -> (char, char) {
        (self.param_open, self.param_close)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn option_scanner(&self) -> BracketScanner {
        BracketScanner::new(self.option_open, self.option_close)
    }

    pub fn is_option_bound(&self, c: char) -> bool {
        c == self.option_open || c == self.option_close
    }

    pub fn is_param_bound(&self, c: char) -> bool {
        c == self.param_open || c == self.param_close
    }

    pub fn is_bound(&self, c: char) -> bool {
        self.is_option_bound(c) || self.is_param_bound(c)
    }

    /// True when `text` still holds any of the four bound characters.
    pub fn contains_bound(&self, text: &str) -> bool {
        text.chars().any(|c| self.is_bound(c))
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            option_open: '[',
            option_close: ']',
            param_open: '{',
            param_close: '}',
            separator: ':',
        }
    }
}
