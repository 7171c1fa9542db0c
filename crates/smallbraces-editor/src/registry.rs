// ABOUTME: Registry mapping view identity to its view sync instance
// ABOUTME: Creates instances lazily, tears them down on close and routes host events

use crate::render::LineRenderer;
use crate::view_sync::ViewSync;
use smallbraces_core::{HostView, SyncError};
use smallbraces_events::{Event, EventHandler, HandlerError};
use smallbraces_logging::{debug, info};
use smallbraces_types::ViewId;
use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

pub type SharedViewSync<H, R> = Rc<RefCell<ViewSync<H, R>>>;

type ViewFactory<H, R> = Box<dyn FnMut(ViewId) -> Option<ViewSync<H, R>>>;

/// Borrow a view sync for one entry point.
///
/// A nested call into a view that is already being serviced finds it
/// borrowed and is short-circuited with [`SyncError::Reentrant`].
pub fn enter<'a, H, R>(
    view: &'a SharedViewSync<H, R>,
    entry_point: &'static str,
) -> Result<RefMut<'a, ViewSync<H, R>>, SyncError> {
    view.try_borrow_mut()
        .map_err(|_| SyncError::Reentrant { entry_point })
}

pub struct ViewRegistry<H, R> {
    views: HashMap<ViewId, SharedViewSync<H, R>>,
    factory: Option<ViewFactory<H, R>>,
}

impl<H, R> Default for ViewRegistry<H, R> {
    fn default() -> Self {
        Self {
            views: HashMap::new(),
            factory: None,
        }
    }
}

impl<H, R> ViewRegistry<H, R>
where
    H: HostView,
    R: LineRenderer<H>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a factory used to attach views that first appear through an event
    pub fn with_factory(
        mut self,
        factory: impl FnMut(ViewId) -> Option<ViewSync<H, R>> + 'static,
    ) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn get(&self, view_id: ViewId) -> Option<SharedViewSync<H, R>> {
        self.views.get(&view_id).cloned()
    }

    /// Instance for `view_id`, created with `make` on first lookup
    pub fn get_or_create(
        &mut self,
        view_id: ViewId,
        make: impl FnOnce() -> ViewSync<H, R>,
    ) -> SharedViewSync<H, R> {
        self.views
            .entry(view_id)
            .or_insert_with(|| {
                info!(%view_id, "Registering view");
                Rc::new(RefCell::new(make()))
            })
            .clone()
    }

    /// Drop the instance for a closed view, returning whether one existed
    pub fn close(&mut self, view_id: ViewId) -> bool {
        match self.views.remove(&view_id) {
            Some(view) => {
                // A caller still holding a borrow keeps the instance alive
                if let Ok(mut sync) = view.try_borrow_mut() {
                    sync.reset();
                }
                info!(%view_id, "Closed view");
                true
            }
            None => {
                debug!(%view_id, "Close for unknown view ignored");
                false
            }
        }
    }

    pub fn contains(&self, view_id: ViewId) -> bool {
        self.views.contains_key(&view_id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn view_ids(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.keys().copied()
    }

    fn lookup_or_attach(&mut self, view_id: ViewId) -> Option<SharedViewSync<H, R>> {
        if let Some(view) = self.views.get(&view_id) {
            return Some(view.clone());
        }

        let factory = self.factory.as_mut()?;
        let sync = factory(view_id)?;
        Some(self.get_or_create(view_id, || sync))
    }
}

impl<H, R> EventHandler<Event<H::Line>> for ViewRegistry<H, R>
where
    H: HostView,
    H::Line: Debug,
    R: LineRenderer<H>,
{
    type Error = HandlerError;

    fn handle(&mut self, event: Event<H::Line>) -> Result<(), Self::Error> {
        let view_id = event.view_id();
        debug!(%view_id, kind = event.kind(), "Handling view event");

        if let Event::Closed { view_id } = event {
            self.close(view_id);
            return Ok(());
        }

        let view = self
            .lookup_or_attach(view_id)
            .ok_or(HandlerError::UnknownView { view_id })?;

        let result = match event {
            Event::LayoutChanged { lines, .. } => {
                enter(&view, "on_layout_changed").and_then(|mut sync| sync.on_layout_changed(&lines))
            }
            Event::CaretMoved { old, new, .. } => {
                enter(&view, "on_caret_moved").and_then(|mut sync| sync.on_caret_moved(old, new))
            }
            Event::Closed { .. } => Ok(()),
        };

        result.map_err(|err| HandlerError::Internal {
            source: Box::new(err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NativeRenderer;
    use crate::test_utils::test_support::FakeHost;
    use smallbraces_core::{HeightPolicy, LineClassifier};
    use smallbraces_types::{BufferPosition, ClassifierConfig};
    use std::cell::Cell;

    type Registry = ViewRegistry<FakeHost, NativeRenderer>;

    fn make_sync(view_id: ViewId) -> ViewSync<FakeHost, NativeRenderer> {
        ViewSync::new(
            view_id,
            FakeHost::new(&["{", "x", "}"]),
            Rc::new(LineClassifier::new(&ClassifierConfig::default()).unwrap()),
            HeightPolicy::default(),
            NativeRenderer,
        )
    }

    #[test]
    fn test_get_or_create_creates_once() {
        let mut registry = Registry::new();
        let created = Cell::new(0);

        for _ in 0..3 {
            registry.get_or_create(ViewId(1), || {
                created.set(created.get() + 1);
                make_sync(ViewId(1))
            });
        }

        assert_eq!(created.get(), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ViewId(1)));
    }

    #[test]
    fn test_close_drops_instance() {
        let mut registry = Registry::new();
        registry.get_or_create(ViewId(1), || make_sync(ViewId(1)));
        registry.get_or_create(ViewId(2), || make_sync(ViewId(2)));

        assert!(registry.close(ViewId(1)));
        assert!(!registry.close(ViewId(1)));
        assert!(registry.get(ViewId(1)).is_none());
        assert_eq!(registry.view_ids().collect::<Vec<_>>(), vec![ViewId(2)]);
    }

    #[test]
    fn test_closed_event_removes_view() {
        let mut registry = Registry::new();
        registry.get_or_create(ViewId(4), || make_sync(ViewId(4)));

        registry.handle(Event::closed(ViewId(4))).unwrap();

        assert!(registry.is_empty());
        // Closing again is harmless
        registry.handle(Event::closed(ViewId(4))).unwrap();
    }

    #[test]
    fn test_events_for_unknown_view_without_factory() {
        let mut registry = Registry::new();
        let result = registry.handle(Event::caret_moved(ViewId(9), 0usize, 2usize));

        assert!(matches!(
            result,
            Err(HandlerError::UnknownView { view_id: ViewId(9) })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_factory_attaches_on_first_event() {
        let mut registry = Registry::new().with_factory(|view_id| Some(make_sync(view_id)));

        registry
            .handle(Event::caret_moved(ViewId(3), 0usize, 4usize))
            .unwrap();

        let view = registry.get(ViewId(3)).unwrap();
        let sync = view.borrow();
        assert_eq!(sync.focused_line(), Some(sync.host().span(2)));
    }

    #[test]
    fn test_factory_may_decline() {
        let mut registry = Registry::new().with_factory(|_| None);
        let lines = FakeHost::new(&["{"]).lines;

        let result = registry.handle(Event::layout_changed(ViewId(5), lines));

        assert!(matches!(result, Err(HandlerError::UnknownView { .. })));
        assert!(!registry.contains(ViewId(5)));
    }

    #[test]
    fn test_layout_event_routes_to_view() {
        let mut registry = Registry::new();
        let view = registry.get_or_create(ViewId(1), || make_sync(ViewId(1)));
        let lines = view.borrow().host().lines.clone();

        registry
            .handle(Event::layout_changed(ViewId(1), lines))
            .unwrap();

        let sync = view.borrow();
        let visual = sync.visual_for(sync.host().span(0)).unwrap();
        assert!(visual.category.is_compressed());
    }

    #[test]
    fn test_reentrant_event_is_short_circuited() {
        let mut registry = Registry::new();
        let view = registry.get_or_create(ViewId(1), || make_sync(ViewId(1)));

        let held = view.borrow_mut();
        let result = registry.handle(Event::caret_moved(ViewId(1), 0usize, 2usize));
        drop(held);

        match result {
            Err(HandlerError::Internal { source }) => {
                assert!(source.to_string().contains("re-entrant"));
            }
            other => panic!("Expected re-entrancy failure, got {other:?}"),
        }
        assert_eq!(view.borrow().focused_line(), None);
    }

    #[test]
    fn test_enter_reports_entry_point() {
        let view = Rc::new(RefCell::new(make_sync(ViewId(1))));
        let _held = view.borrow();

        match enter(&view, "line_transform") {
            Err(SyncError::Reentrant { entry_point }) => assert_eq!(entry_point, "line_transform"),
            _ => panic!("Expected re-entrancy error"),
        }
    }

    #[test]
    fn test_unresolvable_caret_surfaces_as_internal_error() {
        let mut registry = Registry::new();
        registry.get_or_create(ViewId(1), || make_sync(ViewId(1)));

        let result = registry.handle(Event::caret_moved(ViewId(1), 0usize, BufferPosition(99)));
        assert!(matches!(result, Err(HandlerError::Internal { .. })));
    }
}
