//! Syntax highlighting module
//!
//! Python highlighting in two passes per line:
//! - a classifier that styles keywords, strings, comments and numbers
//! - a bracket colorer that cycles a palette by nesting depth

mod style;
mod tokens;
mod rules;
mod brackets;
mod python;
mod highlighter;
mod cache;

pub use style::{Color, Style, StyledLine};
pub use brackets::BracketPalette;
pub use python::HighlightConfig;
pub use highlighter::Highlighter;
pub use cache::HighlightCache;
