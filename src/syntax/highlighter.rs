//! Line highlighter
//!
//! Combines the classifier rules and the bracket colorer. Each line
//! is highlighted on its own: the classifier pass runs first, then the
//! bracket pass layers its styles on top.

use super::brackets::{bracket_depths, BracketPalette};
use super::python::HighlightConfig;
use super::rules::{Match, PatternRule};
use super::style::{Span, Style, StyledLine};
use super::tokens::TokenType;

/// A classified bracket ready to be layered over the rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketSpan {
    pub pos: usize,
    pub depth: usize,
    pub style: Style,
}

/// Highlighter built from a fixed rule table
#[derive(Debug, Clone)]
pub struct Highlighter {
    /// Rules in application order
    rules: Vec<PatternRule>,
    palette: BracketPalette,
}

impl Highlighter {
    /// Build the rule table from a configuration
    pub fn new(config: &HighlightConfig) -> Self {
        let mut rules = Vec::new();

        // Keywords, one rule each
        for keyword in &config.keywords {
            if let Some(rule) = PatternRule::new(
                keyword,
                &HighlightConfig::keyword_pattern(keyword),
                TokenType::Keyword,
            ) {
                rules.push(rule);
            }
        }

        // Strings
        for &quote in &config.string_delimiters {
            if let Some(rule) = PatternRule::new(
                &format!("string{}", quote),
                &HighlightConfig::string_pattern(quote),
                TokenType::String,
            ) {
                rules.push(rule);
            }
        }

        // Comments
        if let Some(rule) = PatternRule::new(
            "comment",
            &HighlightConfig::comment_pattern(config.comment_marker),
            TokenType::Comment,
        ) {
            rules.push(rule);
        }

        // Numbers
        if let Some(rule) =
            PatternRule::new("number", HighlightConfig::number_pattern(), TokenType::Number)
        {
            rules.push(rule);
        }

        Self {
            rules,
            palette: config.bracket_palette.clone(),
        }
    }

    /// Highlighter for the built-in Python table with a custom palette
    pub fn with_palette(palette: BracketPalette) -> Self {
        Self::new(&HighlightConfig::default().with_palette(palette))
    }

    /// Classifier pass: every rule match in application order
    pub fn classify(&self, text: &str) -> Vec<Match> {
        self.rules.iter().flat_map(|rule| rule.find_all(text)).collect()
    }

    /// Bracket pass: style for every bracket on the line
    pub fn color_brackets(&self, text: &str) -> Vec<BracketSpan> {
        let weight = TokenType::Bracket.default_style();
        bracket_depths(text)
            .into_iter()
            .map(|b| BracketSpan {
                pos: b.pos,
                depth: b.depth,
                style: Style {
                    fg: Some(self.palette.color_for(b.depth)),
                    ..weight
                },
            })
            .collect()
    }

    /// Highlight a single line
    pub fn highlight_line(&self, text: &str) -> StyledLine {
        let mut line = StyledLine::new(text.len());

        for m in self.classify(text) {
            line.push(Span::new(m.start, m.end, m.token_type.default_style()));
        }

        // Brackets are single ASCII bytes
        for bracket in self.color_brackets(text) {
            line.push(Span::new(bracket.pos, bracket.pos + 1, bracket.style));
        }

        line
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::with_palette(BracketPalette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::brackets::DEFAULT_BRACKET_COLORS;
    use crate::syntax::tokens::{COMMENT_COLOR, KEYWORD_COLOR, NUMBER_COLOR, STRING_COLOR};

    fn bracket_color(line: &StyledLine, pos: usize) -> Option<crate::syntax::Color> {
        line.style_at(pos).fg
    }

    #[test]
    fn test_rule_table_order() {
        let hl = Highlighter::default();
        let kinds: Vec<_> = hl.rules.iter().map(|r| r.token_type).collect();
        assert_eq!(kinds.len(), 25 + 2 + 1 + 1);
        assert!(kinds[..25].iter().all(|&k| k == TokenType::Keyword));
        assert_eq!(
            &kinds[25..],
            &[
                TokenType::String,
                TokenType::String,
                TokenType::Comment,
                TokenType::Number
            ]
        );
        assert_eq!(hl.rules[0].pattern.as_str(), r"\bclass\b");
        assert_eq!(hl.rules[28].pattern.as_str(), r"\b\d+\.?\d*\b");
    }

    #[test]
    fn test_whitespace_only_lines_have_no_spans() {
        let hl = Highlighter::default();
        for text in ["", " ", "\t\t", "    \t  "] {
            assert!(hl.highlight_line(text).is_empty(), "{:?}", text);
        }
    }

    #[test]
    fn test_flat_pairs_use_first_color() {
        let hl = Highlighter::default();
        let line = hl.highlight_line("(a)(b)");
        for pos in [0, 2, 3, 5] {
            assert_eq!(bracket_color(&line, pos), Some(DEFAULT_BRACKET_COLORS[0]));
            assert!(line.style_at(pos).bold);
        }
    }

    #[test]
    fn test_nested_brackets_cycle_palette() {
        let hl = Highlighter::default();
        let text = "(a[b{c}d]e)";
        let line = hl.highlight_line(text);
        // Closers are colored after popping their opener
        let expected = [(0, 0), (2, 1), (4, 2), (6, 2), (8, 1), (10, 0)];
        for (pos, index) in expected {
            assert_eq!(
                bracket_color(&line, pos),
                Some(DEFAULT_BRACKET_COLORS[index % 4]),
                "bracket at {}",
                pos
            );
        }
    }

    #[test]
    fn test_depth_wraps_modulo_palette() {
        let hl = Highlighter::default();
        let line = hl.highlight_line("(((((x)))))");
        assert_eq!(bracket_color(&line, 4), Some(DEFAULT_BRACKET_COLORS[0]));
        assert_eq!(bracket_color(&line, 3), Some(DEFAULT_BRACKET_COLORS[3]));
    }

    #[test]
    fn test_def_return_comment_number() {
        let hl = Highlighter::default();
        let text = "def f(): return 1  # comment";
        let line = hl.highlight_line(text);

        let keyword = TokenType::Keyword.default_style();
        assert_eq!(line.style_at(0), keyword);
        assert_eq!(line.style_at(2), keyword);
        let ret = text.find("return").unwrap();
        assert_eq!(line.style_at(ret), keyword);
        assert_eq!(line.style_at(ret + 5), keyword);

        let one = text.find('1').unwrap();
        assert_eq!(line.style_at(one).fg, Some(NUMBER_COLOR));

        let hash = text.find('#').unwrap();
        let comment = line
            .spans()
            .iter()
            .find(|s| s.style.fg == Some(COMMENT_COLOR))
            .unwrap();
        assert_eq!(comment.start, hash);
        assert_eq!(comment.end, text.len());

        // 'f' is plain
        assert!(line.style_at(4).is_default());
    }

    #[test]
    fn test_unmatched_closer_gets_first_color() {
        let hl = Highlighter::default();
        let line = hl.highlight_line(")abc");
        assert_eq!(bracket_color(&line, 0), Some(DEFAULT_BRACKET_COLORS[0]));
    }

    #[test]
    fn test_escaped_quote_is_one_string() {
        let hl = Highlighter::default();
        let text = r#""a\"b""#;
        let strings: Vec<_> = hl
            .classify(text)
            .into_iter()
            .filter(|m| m.token_type == TokenType::String)
            .collect();
        assert_eq!(strings.len(), 1);
        assert_eq!((strings[0].start, strings[0].end), (0, text.len()));
    }

    #[test]
    fn test_depth_is_line_local() {
        let hl = Highlighter::default();
        // The first line leaves two brackets open
        let first = hl.highlight_line("foo([");
        assert_eq!(bracket_color(&first, 4), Some(DEFAULT_BRACKET_COLORS[1]));

        // The continuation starts again at depth 0
        let second = hl.highlight_line("(x)])");
        for pos in 0..5 {
            if pos != 1 {
                assert_eq!(bracket_color(&second, pos), Some(DEFAULT_BRACKET_COLORS[0]));
            }
        }
    }

    #[test]
    fn test_hash_inside_string_starts_comment() {
        let hl = Highlighter::default();
        let text = r#"s = "a#b""#;
        let line = hl.highlight_line(text);
        let hash = text.find('#').unwrap();
        // The comment rule runs after the string rule and wins
        assert_eq!(line.style_at(hash).fg, Some(COMMENT_COLOR));
        assert_eq!(line.style_at(hash - 1).fg, Some(STRING_COLOR));
        assert_eq!(line.style_at(text.len() - 1).fg, Some(COMMENT_COLOR));
    }

    #[test]
    fn test_brackets_override_strings() {
        let hl = Highlighter::default();
        let line = hl.highlight_line(r#"print("(x)")"#);
        // '(' inside the string sits at depth 1
        assert_eq!(bracket_color(&line, 7), Some(DEFAULT_BRACKET_COLORS[1]));
        assert_eq!(bracket_color(&line, 8), Some(STRING_COLOR));
    }

    #[test]
    fn test_unterminated_string_is_unstyled() {
        let hl = Highlighter::default();
        let line = hl.highlight_line("x = 'abc");
        assert!(line.spans().iter().all(|s| s.style.fg != Some(STRING_COLOR)));
    }

    #[test]
    fn test_keywords_case_sensitive_whole_word() {
        let hl = Highlighter::default();
        let text = "If iffy if";
        let line = hl.highlight_line(text);
        assert!(line.style_at(0).is_default());
        assert!(line.style_at(3).is_default());
        assert_eq!(line.style_at(8).fg, Some(KEYWORD_COLOR));
    }

    #[test]
    fn test_custom_palette() {
        let red = crate::syntax::Color::rgb(255, 0, 0);
        let blue = crate::syntax::Color::rgb(0, 0, 255);
        let hl = Highlighter::with_palette(BracketPalette::new(vec![red, blue]).unwrap());
        let line = hl.highlight_line("((()))");
        assert_eq!(bracket_color(&line, 0), Some(red));
        assert_eq!(bracket_color(&line, 1), Some(blue));
        assert_eq!(bracket_color(&line, 2), Some(red));
    }
}
