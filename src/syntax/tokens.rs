//! Token kinds for syntax highlighting
//!
//! This module defines the categories the classifier assigns to
//! spans of a line and their default visual styles.

use super::style::{Color, Style};

/// Keyword blue
pub const KEYWORD_COLOR: Color = Color::rgb(0x56, 0x9c, 0xd6);
/// String orange
pub const STRING_COLOR: Color = Color::rgb(0xce, 0x91, 0x78);
/// Comment green
pub const COMMENT_COLOR: Color = Color::rgb(0x6a, 0x99, 0x55);
/// Number pale green
pub const NUMBER_COLOR: Color = Color::rgb(0xb5, 0xce, 0xa8);

/// Semantic token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Language keywords (def, return, True, ...)
    Keyword,
    /// String literals ("..." or '...')
    String,
    /// Comments (# to end of line)
    Comment,
    /// Numeric literals (integers, decimals)
    Number,
    /// Brackets, colored by nesting depth
    Bracket,
}

impl TokenType {
    /// Get the default style for this token kind
    ///
    /// Brackets only carry the weight here; their color comes
    /// from the bracket palette.
    pub fn default_style(&self) -> Style {
        match self {
            TokenType::Keyword => Style::fg(KEYWORD_COLOR).with_bold(),
            TokenType::String => Style::fg(STRING_COLOR),
            TokenType::Comment => Style::fg(COMMENT_COLOR),
            TokenType::Number => Style::fg(NUMBER_COLOR),
            TokenType::Bracket => Style::default().with_bold(),
        }
    }

    /// Get a human-readable name for this token kind
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Keyword => "Keyword",
            TokenType::String => "String",
            TokenType::Comment => "Comment",
            TokenType::Number => "Number",
            TokenType::Bracket => "Bracket",
        }
    }
}
