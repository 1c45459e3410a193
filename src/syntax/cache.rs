//! Per-document highlight cache
//!
//! Highlighting carries no state from one line to the next, so an
//! edit only ever invalidates the lines it touched.

use super::highlighter::Highlighter;
use super::style::StyledLine;

/// Cached styled lines for one document
#[derive(Debug, Default)]
pub struct HighlightCache {
    /// Cached result per line (None = not computed)
    line_spans: Vec<Option<StyledLine>>,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure cache vector is large enough
    pub fn ensure_size(&mut self, line_count: usize) {
        if self.line_spans.len() < line_count {
            self.line_spans.resize(line_count, None);
        }
    }

    /// Drop lines past the end of the document
    pub fn truncate(&mut self, line_count: usize) {
        self.line_spans.truncate(line_count);
    }

    /// Forget the cached result of one line
    pub fn invalidate_line(&mut self, line: usize) {
        if let Some(slot) = self.line_spans.get_mut(line) {
            *slot = None;
        }
    }

    /// Make room for `count` new lines at `at`
    pub fn insert_lines(&mut self, at: usize, count: usize) {
        let at = at.min(self.line_spans.len());
        for _ in 0..count {
            self.line_spans.insert(at, None);
        }
    }

    /// Remove `count` lines starting at `at`
    pub fn remove_lines(&mut self, at: usize, count: usize) {
        let start = at.min(self.line_spans.len());
        let end = (at + count).min(self.line_spans.len());
        self.line_spans.drain(start..end);
    }

    /// Whether a line currently has a cached result
    #[cfg(test)]
    pub fn is_cached(&self, line: usize) -> bool {
        matches!(self.line_spans.get(line), Some(Some(_)))
    }

    /// Number of lines with a cached result
    #[cfg(test)]
    pub fn cached_count(&self) -> usize {
        self.line_spans.iter().filter(|s| s.is_some()).count()
    }

    /// Highlight a single line, using the cache if available
    pub fn highlight_line(
        &mut self,
        highlighter: &Highlighter,
        line_idx: usize,
        text: &str,
    ) -> &StyledLine {
        self.ensure_size(line_idx + 1);
        self.line_spans[line_idx].get_or_insert_with(|| highlighter.highlight_line(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_caches_result() {
        let hl = Highlighter::default();
        let mut cache = HighlightCache::new();

        let spans = cache.highlight_line(&hl, 0, "x = 1").clone();
        assert!(!spans.is_empty());
        assert!(cache.is_cached(0));

        // A cached line is returned as-is, even for different text
        let again = cache.highlight_line(&hl, 0, "something else").clone();
        assert_eq!(spans, again);
    }

    #[test]
    fn test_invalidate_single_line() {
        let hl = Highlighter::default();
        let mut cache = HighlightCache::new();
        cache.highlight_line(&hl, 0, "a = (1)");
        cache.highlight_line(&hl, 1, "b = [2]");
        cache.highlight_line(&hl, 2, "c = {3}");
        assert_eq!(cache.cached_count(), 3);

        cache.invalidate_line(1);
        assert!(cache.is_cached(0));
        assert!(!cache.is_cached(1));
        assert!(cache.is_cached(2));

        // Out of range is a no-op
        cache.invalidate_line(42);
        assert_eq!(cache.cached_count(), 2);
    }

    #[test]
    fn test_insert_and_remove_shift_lines() {
        let hl = Highlighter::default();
        let mut cache = HighlightCache::new();
        cache.highlight_line(&hl, 0, "first");
        cache.highlight_line(&hl, 1, "def second(): pass");

        cache.insert_lines(1, 2);
        assert!(cache.is_cached(0));
        assert!(!cache.is_cached(1));
        assert!(!cache.is_cached(2));
        assert!(cache.is_cached(3));

        cache.remove_lines(0, 2);
        assert!(!cache.is_cached(0));
        assert!(cache.is_cached(1));
        assert_eq!(cache.cached_count(), 1);

        // Removing past the end is clamped
        cache.remove_lines(1, 10);
        assert_eq!(cache.cached_count(), 0);
    }
}
