// ABOUTME: Cache of computed line visuals keyed by line span
// ABOUTME: Entries remember the text they were computed from so reformatted lines are reclassified

use smallbraces_types::{LineCategory, LineSpan, VerticalScale};
use std::collections::HashMap;

/// Limit cache size to prevent unbounded growth on long documents
const MAX_ENTRIES: usize = 1000;

/// Computed visual state of one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineVisual {
    pub category: LineCategory,
    pub scale: VerticalScale,
    pub focused: bool,
}

#[derive(Debug, Clone)]
struct CachedLine {
    text: String,
    visual: LineVisual,
}

#[derive(Debug, Clone, Default)]
pub struct VisualCache {
    lines: HashMap<LineSpan, CachedLine>,
}

impl VisualCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, span: LineSpan) -> Option<LineVisual> {
        self.lines.get(&span).map(|cached| cached.visual)
    }

    /// Cached visual for `span`, only if it was computed from the same text
    pub fn lookup(&self, span: LineSpan, text: &str) -> Option<LineVisual> {
        self.lines
            .get(&span)
            .filter(|cached| cached.text == text)
            .map(|cached| cached.visual)
    }

    pub fn store(&mut self, span: LineSpan, text: &str, visual: LineVisual) {
        if self.lines.len() >= MAX_ENTRIES && !self.lines.contains_key(&span) {
            self.lines.clear();
        }
        self.lines.insert(
            span,
            CachedLine {
                text: text.to_string(),
                visual,
            },
        );
    }

    pub fn invalidate(&mut self, span: LineSpan) -> Option<LineVisual> {
        self.lines.remove(&span).map(|cached| cached.visual)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Spans of every cached line rendered as focused
    pub fn focused_spans(&self) -> impl Iterator<Item = LineSpan> + '_ {
        self.lines
            .iter()
            .filter(|(_, cached)| cached.visual.focused)
            .map(|(span, _)| *span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visual(category: LineCategory, scale: f64) -> LineVisual {
        LineVisual {
            category,
            scale: VerticalScale::new(scale).unwrap(),
            focused: false,
        }
    }

    #[test]
    fn test_lookup_requires_matching_text() {
        let mut cache = VisualCache::new();
        let span = LineSpan::new(0, 1);
        cache.store(span, "{", visual(LineCategory::PunctuationOnly, 0.1));

        assert!(cache.lookup(span, "{").is_some());
        assert!(cache.lookup(span, "x").is_none());
        assert!(cache.get(span).is_some());
    }

    #[test]
    fn test_invalidate() {
        let mut cache = VisualCache::new();
        let span = LineSpan::new(4, 7);
        cache.store(span, "   ", visual(LineCategory::Whitespace, 0.5));

        assert_eq!(
            cache.invalidate(span).map(|v| v.category),
            Some(LineCategory::Whitespace)
        );
        assert!(cache.is_empty());
        assert!(cache.invalidate(span).is_none());
    }

    #[test]
    fn test_size_limit() {
        let mut cache = VisualCache::new();
        for i in 0..MAX_ENTRIES {
            cache.store(LineSpan::new(i * 2, i * 2 + 1), "x", visual(LineCategory::Default, 1.0));
        }
        assert_eq!(cache.len(), MAX_ENTRIES);

        // Overwriting an existing entry keeps the cache
        cache.store(LineSpan::new(0, 1), "y", visual(LineCategory::Default, 1.0));
        assert_eq!(cache.len(), MAX_ENTRIES);

        cache.store(LineSpan::new(5000, 5001), "z", visual(LineCategory::Default, 1.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_focused_spans() {
        let mut cache = VisualCache::new();
        let focused = LineSpan::new(10, 12);
        cache.store(LineSpan::new(0, 1), "{", visual(LineCategory::PunctuationOnly, 0.1));
        cache.store(
            focused,
            "};",
            LineVisual {
                focused: true,
                ..visual(LineCategory::PunctuationOnly, 1.0)
            },
        );

        assert_eq!(cache.focused_spans().collect::<Vec<_>>(), vec![focused]);
    }
}
