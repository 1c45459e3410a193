//! Terminal rendering of highlighted lines

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, Style, StyledLine};

/// Rendering options
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Emit color and weight escapes
    pub color: bool,
    /// Prefix each line with its number
    pub show_line_numbers: bool,
    /// Truncate lines to this many columns (gutter included)
    pub max_width: Option<usize>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            color: true,
            show_line_numbers: false,
            max_width: None,
        }
    }
}

impl Renderer {
    /// Calculate width needed for line numbers (including separator)
    pub fn line_number_width(&self, line_count: usize) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let digits = line_count.max(1).to_string().len();
        digits.max(3) + 1 // minimum 3 digits + space
    }

    /// Render a whole document
    pub fn render_document<W: Write>(
        &self,
        out: &mut W,
        lines: &[(&str, &StyledLine)],
    ) -> Result<()> {
        let gutter = self.line_number_width(lines.len());
        for (idx, (text, styled)) in lines.iter().enumerate() {
            if gutter > 0 {
                self.render_gutter(out, idx + 1, gutter)?;
            }
            let max_cols = self.max_width.map(|w| w.saturating_sub(gutter));
            self.render_line(out, text, styled, max_cols)?;
            queue!(out, Print('\n'))?;
        }
        out.flush()?;
        Ok(())
    }

    fn render_gutter<W: Write>(&self, out: &mut W, number: usize, width: usize) -> Result<()> {
        let label = format!("{:>w$} ", number, w = width - 1);
        if self.color {
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(label),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(label))?;
        }
        Ok(())
    }

    /// Render one line, run by run
    pub fn render_line<W: Write>(
        &self,
        out: &mut W,
        text: &str,
        styled: &StyledLine,
        max_cols: Option<usize>,
    ) -> Result<()> {
        let mut remaining = max_cols.unwrap_or(usize::MAX);

        for run in styled.runs() {
            if remaining == 0 {
                break;
            }
            let piece = safe_slice(text, run.start, run.end);
            let (piece, width) = truncate_to_width(piece, remaining);
            remaining -= width;
            if piece.is_empty() {
                continue;
            }

            if self.color && !run.style.is_default() {
                apply_style(out, &run.style)?;
                queue!(out, Print(piece), ResetColor, SetAttribute(Attribute::Reset))?;
            } else {
                queue!(out, Print(piece))?;
            }
        }

        Ok(())
    }
}

fn apply_style<W: Write>(out: &mut W, style: &Style) -> Result<()> {
    if let Some(Color { r, g, b }) = style.fg {
        queue!(out, SetForegroundColor(TermColor::Rgb { r, g, b }))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

/// Longest prefix that fits within a display width, and its width
fn truncate_to_width(s: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;

    for (pos, ch) in s.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            return (&s[..pos], width);
        }
        width += ch_width;
    }

    (s, width)
}

/// UTF-8 safe slice from start to end byte offset
///
/// Runs are byte based, so a run edge may fall inside a character;
/// such a character belongs to the run where it starts.
fn safe_slice(s: &str, start: usize, end: usize) -> &str {
    let start = find_safe_boundary(s, start);
    let end = find_safe_boundary(s, end);
    &s[start..end.max(start)]
}

/// Next UTF-8 boundary at or after the given byte offset
fn find_safe_boundary(s: &str, offset: usize) -> usize {
    if offset >= s.len() {
        return s.len();
    }
    (offset..=s.len())
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Highlighter;

    fn render(renderer: Renderer, lines: &[&str]) -> String {
        let hl = Highlighter::default();
        let styled: Vec<StyledLine> = lines.iter().map(|l| hl.highlight_line(l)).collect();
        let pairs: Vec<(&str, &StyledLine)> =
            lines.iter().copied().zip(styled.iter()).collect();
        let mut out = Vec::new();
        renderer.render_document(&mut out, &pairs).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output_is_text() {
        let renderer = Renderer {
            color: false,
            ..Default::default()
        };
        let out = render(renderer, &["def f(x):", "    return (x)"]);
        assert_eq!(out, "def f(x):\n    return (x)\n");
    }

    #[test]
    fn test_colored_output_has_rgb_escapes() {
        let out = render(Renderer::default(), &["(1)"]);
        // Gold bracket, pale green number
        assert!(out.contains("\x1b[38;2;255;215;0m"));
        assert!(out.contains("\x1b[38;2;181;206;168m"));
        assert!(out.contains("\x1b[1m"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_line_numbers() {
        let renderer = Renderer {
            color: false,
            show_line_numbers: true,
            ..Default::default()
        };
        assert_eq!(renderer.line_number_width(7), 4);
        assert_eq!(renderer.line_number_width(12345), 6);
        let out = render(renderer, &["a", "b"]);
        assert_eq!(out, "  1 a\n  2 b\n");
    }

    #[test]
    fn test_truncation() {
        let renderer = Renderer {
            color: false,
            max_width: Some(5),
            ..Default::default()
        };
        let out = render(renderer, &["print(1234567)", "中文字符"]);
        assert_eq!(out, "print\n中文\n");
    }

    #[test]
    fn test_safe_slice_multibyte() {
        let s = "aé(";
        assert_eq!(safe_slice(s, 0, 2), "aé");
        assert_eq!(safe_slice(s, 2, 4), "(");
        assert_eq!(find_safe_boundary(s, 2), 3);
    }
}
