// ABOUTME: View domain events for layout passes, caret movement and view teardown
// ABOUTME: Immutable facts about what the host has just done to one view

use smallbraces_types::{BufferPosition, ViewId};

/// View domain events, generic over the host's line handle type
#[derive(Debug, Clone)]
pub enum Event<L> {
    /// Lines became newly visible or were reformatted
    LayoutChanged { view_id: ViewId, lines: Vec<L> },

    /// Caret position changed
    CaretMoved {
        view_id: ViewId,
        old: BufferPosition,
        new: BufferPosition,
    },

    /// View closed; all state for it must be dropped
    Closed { view_id: ViewId },
}

impl<L> Event<L> {
    pub fn layout_changed(view_id: ViewId, lines: Vec<L>) -> Self {
        Event::LayoutChanged { view_id, lines }
    }

    pub fn caret_moved(
        view_id: ViewId,
        old: impl Into<BufferPosition>,
        new: impl Into<BufferPosition>,
    ) -> Self {
        Event::CaretMoved {
            view_id,
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn closed(view_id: ViewId) -> Self {
        Event::Closed { view_id }
    }

    /// View this event belongs to
    pub fn view_id(&self) -> ViewId {
        match self {
            Event::LayoutChanged { view_id, .. }
            | Event::CaretMoved { view_id, .. }
            | Event::Closed { view_id } => *view_id,
        }
    }

    /// Short name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Event::LayoutChanged { .. } => "layout_changed",
            Event::CaretMoved { .. } => "caret_moved",
            Event::Closed { .. } => "closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_id_accessor() {
        let view_id = ViewId(7);
        let events: Vec<Event<()>> = vec![
            Event::layout_changed(view_id, vec![(), ()]),
            Event::caret_moved(view_id, 3usize, 12usize),
            Event::closed(view_id),
        ];

        for event in &events {
            assert_eq!(event.view_id(), view_id);
        }
    }

    #[test]
    fn test_caret_moved_positions() {
        let event: Event<()> = Event::caret_moved(ViewId(1), 4usize, 9usize);
        match event {
            Event::CaretMoved { old, new, .. } => {
                assert_eq!(old, BufferPosition(4));
                assert_eq!(new, BufferPosition(9));
            }
            _ => panic!("Expected CaretMoved event"),
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Event::<()>::closed(ViewId(0)).kind(), "closed");
        assert_eq!(
            Event::<()>::layout_changed(ViewId(0), Vec::new()).kind(),
            "layout_changed"
        );
    }
}
