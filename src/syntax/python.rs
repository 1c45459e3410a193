//! Python highlighting table
//!
//! Keywords, literal delimiters and the comment marker the classifier
//! is built from.

use super::brackets::BracketPalette;

/// Keywords highlighted as whole words, case-sensitive
pub const KEYWORDS: [&str; 25] = [
    "class", "def", "if", "else", "elif", "for", "while", "try", "except", "finally", "with",
    "import", "from", "as", "return", "True", "False", "None", "and", "or", "not", "in", "is",
    "lambda", "yield",
];

/// Static description of what the highlighter recognises
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    pub keywords: Vec<&'static str>,
    pub string_delimiters: Vec<char>,
    pub comment_marker: char,
    pub bracket_palette: BracketPalette,
}

impl HighlightConfig {
    /// Replace the bracket palette
    pub fn with_palette(mut self, palette: BracketPalette) -> Self {
        self.bracket_palette = palette;
        self
    }

    /// `\bkw\b`
    pub(super) fn keyword_pattern(keyword: &str) -> String {
        format!(r"\b{}\b", regex::escape(keyword))
    }

    /// A quoted literal in which `\<any>` never ends the literal
    pub(super) fn string_pattern(quote: char) -> String {
        let q = regex::escape(&quote.to_string());
        format!(r"{q}[^{q}\\]*(?:\\.[^{q}\\]*)*{q}")
    }

    /// From the marker to the end of the line
    pub(super) fn comment_pattern(marker: char) -> String {
        format!(r"{}[^\n]*", regex::escape(&marker.to_string()))
    }

    pub(super) fn number_pattern() -> &'static str {
        r"\b\d+\.?\d*\b"
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            keywords: KEYWORDS.to_vec(),
            string_delimiters: vec!['"', '\''],
            comment_marker: '#',
            bracket_palette: BracketPalette::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_string_pattern_respects_escapes() {
        let re = Regex::new(&HighlightConfig::string_pattern('"')).unwrap();
        let m = re.find(r#"x = "a\"b" + 1"#).unwrap();
        assert_eq!(m.as_str(), r#""a\"b""#);

        let re = Regex::new(&HighlightConfig::string_pattern('\'')).unwrap();
        assert_eq!(re.find(r"'it\'s'").unwrap().as_str(), r"'it\'s'");
        assert!(re.find("'unterminated").is_none());
    }

    #[test]
    fn test_keyword_pattern_whole_word() {
        let re = Regex::new(&HighlightConfig::keyword_pattern("in")).unwrap();
        assert!(re.is_match("x in y"));
        assert!(!re.is_match("import inner"));
    }

    #[test]
    fn test_number_pattern() {
        let re = Regex::new(HighlightConfig::number_pattern()).unwrap();
        assert_eq!(re.find("x = 3.14").unwrap().as_str(), "3.14");
        assert_eq!(re.find("x = 42;").unwrap().as_str(), "42");
        assert!(re.find("var1").is_none());
    }

    #[test]
    fn test_default_table() {
        let config = HighlightConfig::default();
        assert_eq!(config.keywords.len(), 25);
        assert_eq!(config.comment_marker, '#');
        assert_eq!(config.bracket_palette, BracketPalette::default());
    }
}
