// ABOUTME: Rope-backed in-memory host view with fixed-width glyph geometry
// ABOUTME: Records overlays, caret indicator and re-layout requests instead of drawing them

use ropey::Rope;
use smallbraces_core::{
    AdornmentLayer, HostError, MarkerGeometry, SelectionProvider, TextPropertiesProvider,
    TextViewLines, ViewLine,
};
use smallbraces_types::{
    BufferPosition, CaretIndicator, LineSpan, Overlay, Rect, TextProperties,
};
use std::borrow::Cow;

/// One line of a [`MemoryView`], detached from the rope
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryLine {
    pub index: usize,
    pub span: LineSpan,
    pub text: String,
}

impl ViewLine for MemoryLine {
    fn span(&self) -> LineSpan {
        self.span
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryView {
    content: Rope,
    char_width: f64,
    line_height: f64,
    text_properties: TextProperties,
    active_point: BufferPosition,
    overlays: Vec<(LineSpan, Overlay)>,
    caret: Option<(LineSpan, CaretIndicator)>,
    invalidated: Vec<LineSpan>,
}

impl MemoryView {
    pub fn from_text(text: &str) -> Self {
        let text_properties = TextProperties::default();
        Self {
            content: Rope::from_str(text),
            char_width: text_properties.size * 0.6,
            line_height: text_properties.size,
            text_properties,
            active_point: BufferPosition::default(),
            overlays: Vec::new(),
            caret: None,
            invalidated: Vec::new(),
        }
    }

    pub fn with_text_properties(mut self, text_properties: TextProperties) -> Self {
        self.char_width = text_properties.size * 0.6;
        self.line_height = text_properties.size;
        self.text_properties = text_properties;
        self
    }

    pub fn len_chars(&self) -> usize {
        self.content.len_chars()
    }

    /// Number of lines holding content; a trailing newline does not start a new line
    pub fn len_lines(&self) -> usize {
        let n = self.content.len_lines();
        if n > 1
            && self.content.len_chars() > 0
            && self.content.char(self.content.len_chars() - 1) == '\n'
        {
            n - 1
        } else {
            n
        }
    }

    pub fn line(&self, index: usize) -> Option<MemoryLine> {
        if index >= self.len_lines() {
            return None;
        }

        let start = self.content.line_to_char(index);
        let text = self
            .content
            .line(index)
            .to_string()
            .trim_end_matches(['\n', '\r'])
            .to_string();
        let end = start + text.chars().count();

        Some(MemoryLine {
            index,
            span: LineSpan::new(start, end),
            text,
        })
    }

    pub fn lines(&self) -> Vec<MemoryLine> {
        (0..self.len_lines())
            .filter_map(|index| self.line(index))
            .collect()
    }

    /// Offset of the first character of a line
    pub fn line_start(&self, index: usize) -> Option<BufferPosition> {
        self.line(index).map(|line| BufferPosition(line.span.start))
    }

    pub fn set_active_point(&mut self, position: BufferPosition) {
        self.active_point = position;
    }

    pub fn overlays(&self) -> &[(LineSpan, Overlay)] {
        &self.overlays
    }

    /// Overlay anchored to exactly `span`, if any
    pub fn overlay_for(&self, span: LineSpan) -> Option<&Overlay> {
        self.overlays
            .iter()
            .find(|(anchor, _)| *anchor == span)
            .map(|(_, overlay)| overlay)
    }

    pub fn caret_indicator(&self) -> Option<&(LineSpan, CaretIndicator)> {
        self.caret.as_ref()
    }

    /// Re-layout requests received since the last call
    pub fn take_invalidated(&mut self) -> Vec<LineSpan> {
        std::mem::take(&mut self.invalidated)
    }

    fn check_span(&self, span: LineSpan) -> Result<(), HostError> {
        if span.end > self.len_chars() {
            Err(HostError::SpanOutOfRange { span })
        } else {
            Ok(())
        }
    }
}

impl TextViewLines for MemoryView {
    type Line = MemoryLine;

    fn line_containing(&self, position: BufferPosition) -> Option<MemoryLine> {
        if position.0 > self.len_chars() {
            return None;
        }
        self.line(self.content.char_to_line(position.0))
    }
}

impl MarkerGeometry for MemoryView {
    fn marker_bounds(&self, span: LineSpan) -> Option<Rect> {
        self.check_span(span).ok()?;
        let line = self.content.char_to_line(span.start);
        if line >= self.len_lines() {
            return None;
        }
        let column = span.start - self.content.line_to_char(line);

        Some(Rect::new(
            column as f64 * self.char_width,
            line as f64 * self.line_height,
            span.len() as f64 * self.char_width,
            self.line_height,
        ))
    }
}

impl AdornmentLayer for MemoryView {
    fn add_overlay(&mut self, span: LineSpan, overlay: Overlay) -> Result<(), HostError> {
        self.check_span(span)?;
        self.overlays.push((span, overlay));
        Ok(())
    }

    fn remove_overlays_in(&mut self, span: LineSpan) {
        self.overlays
            .retain(|(anchor, _)| anchor.end < span.start || anchor.start > span.end);
    }

    fn add_caret(&mut self, span: LineSpan, caret: CaretIndicator) -> Result<(), HostError> {
        self.check_span(span)?;
        self.caret = Some((span, caret));
        Ok(())
    }

    fn remove_caret(&mut self) {
        self.caret = None;
    }

    fn invalidate_line(&mut self, span: LineSpan) -> Result<(), HostError> {
        self.check_span(span)?;
        self.invalidated.push(span);
        Ok(())
    }
}

impl TextPropertiesProvider for MemoryView {
    fn text_properties(&self) -> TextProperties {
        self.text_properties.clone()
    }
}

impl SelectionProvider for MemoryView {
    fn active_point(&self) -> BufferPosition {
        self.active_point
    }
}
