//! Style types for highlighted text
//!
//! Colors are plain RGB triples; the renderer maps them onto
//! terminal escape sequences.

/// An RGB foreground color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let component = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(component(0)?, component(2)?, component(4)?))
    }

    /// Format as `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color (None = terminal default)
    pub fg: Option<Color>,
    /// Bold text
    pub bold: bool,
}

impl Style {
    /// Create a style with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The highlighting result for one line
///
/// Spans are kept in the order they were applied. Where spans
/// overlap, the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    len: usize,
    spans: Vec<Span>,
}

impl StyledLine {
    /// Create an unstyled line of `len` bytes
    pub fn new(len: usize) -> Self {
        Self {
            len,
            spans: Vec::new(),
        }
    }

    /// Layer a span on top of the existing ones
    pub fn push(&mut self, span: Span) {
        if !span.is_empty() && span.end <= self.len {
            self.spans.push(span);
        }
    }

    /// Spans in application order
    #[cfg(test)]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// True when nothing on the line is styled
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The winning style at a byte offset
    pub fn style_at(&self, pos: usize) -> Style {
        self.spans
            .iter()
            .rev()
            .find(|s| s.contains(pos))
            .map(|s| s.style)
            .unwrap_or_default()
    }

    /// Flatten the layered spans into non-overlapping runs
    ///
    /// Runs cover the whole line; unstyled stretches carry the
    /// default style. Adjacent bytes with equal styles are merged.
    pub fn runs(&self) -> Vec<Span> {
        let mut runs: Vec<Span> = Vec::new();
        for pos in 0..self.len {
            let style = self.style_at(pos);
            match runs.last_mut() {
                Some(run) if run.style == style => run.end = pos + 1,
                _ => runs.push(Span::new(pos, pos + 1, style)),
            }
        }
        runs
    }
}
