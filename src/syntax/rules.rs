//! Pattern rules for the classifier pass
//!
//! A rule is a regex plus the token kind assigned to every match.
//! Rules are applied in declaration order; a later rule restyles
//! whatever an earlier one already colored.

use regex::Regex;
use tracing::warn;

use super::tokens::TokenType;

/// A single-line pattern rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token kind to assign to matches
    pub token_type: TokenType,
}

impl PatternRule {
    /// Create a new pattern rule; `name` only labels the log line
    /// when the pattern does not compile
    pub fn new(name: &str, pattern: &str, token_type: TokenType) -> Option<Self> {
        match Regex::new(pattern) {
            Ok(regex) => Some(Self {
                pattern: regex,
                token_type,
            }),
            Err(e) => {
                warn!(rule = name, error = %e, "skipping rule with invalid pattern");
                None
            }
        }
    }

    /// All non-overlapping matches of this rule, left to right
    pub fn find_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Match> + 'a {
        self.pattern.find_iter(text).map(move |m| Match {
            start: m.start(),
            end: m.end(),
            token_type: self.token_type,
        })
    }
}

/// A classified stretch of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    pub token_type: TokenType,
}
