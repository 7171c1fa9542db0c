// ABOUTME: Tracks the single line of a view that currently holds the caret
// ABOUTME: At most one span is focused; none until the first caret event or selection seed

use smallbraces_types::LineSpan;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    focused: Option<LineSpan>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<LineSpan> {
        self.focused
    }

    pub fn is_focused(&self, span: LineSpan) -> bool {
        self.focused == Some(span)
    }

    /// Move focus to `span`, returning the previously focused line
    pub fn focus(&mut self, span: LineSpan) -> Option<LineSpan> {
        self.focused.replace(span).filter(|previous| *previous != span)
    }

    pub fn clear(&mut self) -> Option<LineSpan> {
        self.focused.take()
    }
}
