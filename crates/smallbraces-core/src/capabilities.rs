// ABOUTME: Capability traits that define the abstract host interface
// ABOUTME: A host editor implements these to plug the fisheye view sync into its layout pipeline

use crate::error::HostError;
use smallbraces_types::{BufferPosition, CaretIndicator, LineSpan, Overlay, Rect, TextProperties};
use std::borrow::Cow;

/// Read-only view of one laid-out line, owned by the host's snapshot
pub trait ViewLine {
    /// Buffer offsets covered by the line, end exclusive
    fn span(&self) -> LineSpan;

    /// Raw text of the line without its line break
    fn text(&self) -> Cow<'_, str>;

    /// Length of the line in characters
    fn len(&self) -> usize {
        self.span().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the line contains the buffer position
    fn contains(&self, position: BufferPosition) -> bool {
        self.span().contains(position)
    }
}

/// Access to the currently formatted lines of a view
pub trait TextViewLines {
    type Line: ViewLine;

    /// Line containing the position, or None when the position cannot be resolved
    fn line_containing(&self, position: BufferPosition) -> Option<Self::Line>;
}

/// Screen geometry of text in the view
pub trait MarkerGeometry {
    /// Bounding rectangle of the text covered by `span`, None if it is not laid out
    fn marker_bounds(&self, span: LineSpan) -> Option<Rect>;
}

/// Adornment layer the overlay renderer draws on, plus re-layout requests
pub trait AdornmentLayer {
    /// Add an overlay anchored to `span`
    fn add_overlay(&mut self, span: LineSpan, overlay: Overlay) -> Result<(), HostError>;

    /// Remove every overlay whose anchor intersects `span`
    fn remove_overlays_in(&mut self, span: LineSpan);

    /// Place the caret indicator anchored to `span`
    fn add_caret(&mut self, span: LineSpan, caret: CaretIndicator) -> Result<(), HostError>;

    /// Remove the caret indicator if present
    fn remove_caret(&mut self);

    /// Ask the host to lay out the line again so it re-queries its transform
    fn invalidate_line(&mut self, span: LineSpan) -> Result<(), HostError>;
}

/// Text-rendering properties of the view
pub trait TextPropertiesProvider {
    fn text_properties(&self) -> TextProperties;
}

/// Selection state of the view
pub trait SelectionProvider {
    /// Active end of the primary selection (the caret)
    fn active_point(&self) -> BufferPosition;
}

/// Combined host capabilities required by the view sync
pub trait HostView:
    TextViewLines + MarkerGeometry + AdornmentLayer + TextPropertiesProvider + SelectionProvider
{
}

impl<T> HostView for T where
    T: TextViewLines + MarkerGeometry + AdornmentLayer + TextPropertiesProvider + SelectionProvider
{
}
