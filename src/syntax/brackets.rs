//! Bracket depth coloring
//!
//! Every bracket on a line is colored by its nesting depth modulo
//! the palette size. The stack lives only for one line: depth starts
//! at 0 on every line, whatever the previous line left open.

use super::style::Color;

/// Default bracket colors: gold, orchid, sky blue, pale green
pub const DEFAULT_BRACKET_COLORS: [Color; 4] = [
    Color::rgb(0xff, 0xd7, 0x00),
    Color::rgb(0xda, 0x70, 0xd6),
    Color::rgb(0x87, 0xce, 0xeb),
    Color::rgb(0x98, 0xfb, 0x98),
];

/// Ordered bracket colors, indexed by `depth mod len`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketPalette {
    colors: Vec<Color>,
}

impl BracketPalette {
    /// Create a palette; `None` if `colors` is empty
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    /// Color for a nesting depth
    pub fn color_for(&self, depth: usize) -> Color {
        self.colors[depth % self.colors.len()]
    }
}

impl Default for BracketPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_BRACKET_COLORS.to_vec(),
        }
    }
}

/// A bracket found on a line and its depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketDepth {
    /// Byte offset of the bracket
    pub pos: usize,
    pub depth: usize,
}

fn is_open(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{')
}

fn is_close(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}')
}

/// Walk one line and assign a depth to every bracket
///
/// Openers take the stack size before the push. Closers pop whatever
/// is on top (no type check) and take the size after the pop. A
/// closer on an empty stack gets depth 0.
pub fn bracket_depths(text: &str) -> Vec<BracketDepth> {
    let mut stack: Vec<char> = Vec::new();
    let mut depths = Vec::new();

    for (pos, ch) in text.char_indices() {
        if is_open(ch) {
            depths.push(BracketDepth {
                pos,
                depth: stack.len(),
            });
            stack.push(ch);
        } else if is_close(ch) {
            stack.pop();
            depths.push(BracketDepth {
                pos,
                depth: stack.len(),
            });
        }
    }

    depths
}
