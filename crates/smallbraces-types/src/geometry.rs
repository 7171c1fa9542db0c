// ABOUTME: Buffer offsets, line spans, view identity and screen rectangles
// ABOUTME: Plain value types shared by the host capability traits and the view sync

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one open document view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Character offset into the host's text snapshot
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BufferPosition(pub usize);

impl BufferPosition {
    pub fn new(offset: usize) -> Self {
        Self(offset)
    }

    pub fn offset(self) -> usize {
        self.0
    }
}

impl From<usize> for BufferPosition {
    fn from(offset: usize) -> Self {
        Self(offset)
    }
}

impl fmt::Display for BufferPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open range of buffer offsets `[start, end)`.
///
/// A laid-out line is identified by its span within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    /// Create a span, swapping the bounds if they arrive reversed
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// One-character span starting at `position`
    pub fn at(position: BufferPosition) -> Self {
        Self::new(position.0, position.0 + 1)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `position` falls inside this line.
    ///
    /// The end offset counts as inside so that a caret parked after the last
    /// character still belongs to the line.
    pub fn contains(&self, position: BufferPosition) -> bool {
        position.0 >= self.start && position.0 <= self.end
    }

    /// Span with its start moved forward by `skip` characters, clamped to the end
    pub fn skip_leading(&self, skip: usize) -> Self {
        Self {
            start: (self.start + skip).min(self.end),
            end: self.end,
        }
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Screen rectangle in host view coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Same rectangle moved vertically by `dy`
    pub fn offset_y(&self, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            ..*self
        }
    }
}
