// ABOUTME: Per-view state machine reacting to layout passes and caret movement
// ABOUTME: Keeps the fisheye boost on exactly the line holding the caret

use crate::focus_state::FocusState;
use crate::render::LineRenderer;
use crate::visual_cache::{LineVisual, VisualCache};
use smallbraces_core::{HeightPolicy, HostView, LineClassifier, SyncError, ViewLine};
use smallbraces_logging::{debug, trace, warn};
use smallbraces_types::{
    BufferPosition, LineCategory, LineSpan, LineTransform, RenderMode, ViewId,
    ViewRelativePosition,
};
use std::rc::Rc;

/// Fisheye synchronization for one open view
pub struct ViewSync<H, R> {
    view_id: ViewId,
    host: H,
    classifier: Rc<LineClassifier>,
    policy: HeightPolicy,
    renderer: R,
    focus: FocusState,
    cache: VisualCache,
}

impl<H, R> ViewSync<H, R>
where
    H: HostView,
    R: LineRenderer<H>,
{
    pub fn new(
        view_id: ViewId,
        host: H,
        classifier: Rc<LineClassifier>,
        policy: HeightPolicy,
        renderer: R,
    ) -> Self {
        debug!(%view_id, mode = ?renderer.mode(), "Attaching view sync");
        Self {
            view_id,
            host,
            classifier,
            policy,
            renderer,
            focus: FocusState::new(),
            cache: VisualCache::new(),
        }
    }

    pub fn view_id(&self) -> ViewId {
        self.view_id
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn render_mode(&self) -> RenderMode {
        self.renderer.mode()
    }

    pub fn focused_line(&self) -> Option<LineSpan> {
        self.focus.focused()
    }

    /// Last visual computed for the line at `span`
    pub fn visual_for(&self, span: LineSpan) -> Option<LineVisual> {
        self.cache.get(span)
    }

    /// Native transform for one line, using the current focus
    pub fn line_transform(
        &mut self,
        line: &H::Line,
        y_position: f64,
        placement: ViewRelativePosition,
    ) -> Result<LineTransform, SyncError> {
        let span = line.span();
        let visual = self.refresh_visual(span, &line.text());

        trace!(
            view_id = %self.view_id,
            %span,
            y_position,
            ?placement,
            category = %visual.category,
            scale = %visual.scale,
            "Line transform"
        );

        Ok(LineTransform::scaled(visual.scale))
    }

    /// Classify and render every newly laid-out line.
    ///
    /// A line that fails to render is logged and skipped; the rest of the
    /// batch is still processed.
    pub fn on_layout_changed(&mut self, lines: &[H::Line]) -> Result<(), SyncError> {
        let mut failed = 0usize;

        for line in lines {
            let span = line.span();
            let text = line.text();
            let visual = self.refresh_visual(span, &text);

            if let Err(err) = self
                .renderer
                .render_line(&mut self.host, span, &text, &visual)
            {
                failed += 1;
                warn!(view_id = %self.view_id, %span, error = %err, "Failed to render line");
            }
        }

        debug!(
            view_id = %self.view_id,
            lines = lines.len(),
            failed,
            "Layout pass handled"
        );
        Ok(())
    }

    /// Move the fisheye boost from the line at `old` to the line at `new`.
    ///
    /// Both positions are resolved before any state changes, so an
    /// unresolvable position leaves the view exactly as it was.
    pub fn on_caret_moved(
        &mut self,
        old: BufferPosition,
        new: BufferPosition,
    ) -> Result<(), SyncError> {
        let new_line = self.resolve(new)?;
        let old_line = self.resolve(old)?;
        let new_span = new_line.span();

        let (category, failure) =
            if new_span == old_line.span() && self.focus.is_focused(new_span) {
                trace!(view_id = %self.view_id, %old, %new, "Caret moved within focused line");
                (self.category_of(new_span, &new_line.text()), None)
            } else {
                debug!(
                    view_id = %self.view_id,
                    from = %old_line.span(),
                    to = %new_span,
                    "Moving focus"
                );
                let (visual, failure) = self.move_focus(&new_line, Some(&old_line));
                (visual.category, failure)
            };

        self.renderer.update_caret(&mut self.host, new, category)?;
        failure.map_or(Ok(()), Err)
    }

    /// Focus the line under the host's current selection.
    ///
    /// Used when attaching to a view whose caret is already placed; until
    /// this or a caret event runs, no line is focused.
    pub fn adopt_selection_focus(&mut self) -> Result<(), SyncError> {
        let caret = self.host.active_point();
        let line = self.resolve(caret)?;
        let span = line.span();

        let (category, failure) = if self.focus.is_focused(span) {
            (self.category_of(span, &line.text()), None)
        } else {
            debug!(view_id = %self.view_id, %caret, line = %span, "Adopting selection focus");
            let (visual, failure) = self.move_focus(&line, None);
            (visual.category, failure)
        };

        self.renderer.update_caret(&mut self.host, caret, category)?;
        failure.map_or(Ok(()), Err)
    }

    /// Forget focus and every cached visual
    pub fn reset(&mut self) {
        debug!(view_id = %self.view_id, cached = self.cache.len(), "Resetting view sync");
        self.focus.clear();
        self.cache.clear();
    }

    fn resolve(&self, position: BufferPosition) -> Result<H::Line, SyncError> {
        self.host
            .line_containing(position)
            .ok_or(SyncError::LineNotFound { position })
    }

    fn category_of(&self, span: LineSpan, text: &str) -> LineCategory {
        self.cache
            .lookup(span, text)
            .map(|visual| visual.category)
            .unwrap_or_else(|| self.classifier.classify(text))
    }

    fn compute_visual(&mut self, span: LineSpan, text: &str, focused: bool) -> LineVisual {
        let category = self.category_of(span, text);
        let visual = LineVisual {
            category,
            scale: self.policy.transform_for(category, focused),
            focused,
        };
        self.cache.store(span, text, visual);
        visual
    }

    fn refresh_visual(&mut self, span: LineSpan, text: &str) -> LineVisual {
        self.follow_reformatted_focus(span);
        let focused = self.focus.is_focused(span);
        self.compute_visual(span, text, focused)
    }

    /// Carry focus over to `span` when the focused line was reformatted.
    ///
    /// Edits change the span of the caret's line without a caret event. The
    /// focused span is stale once the host no longer lays out a line with
    /// exactly that span; the line holding the active point then takes over.
    fn follow_reformatted_focus(&mut self, span: LineSpan) {
        let Some(focused) = self.focus.focused() else {
            return;
        };
        if focused == span || !span.contains(self.host.active_point()) {
            return;
        }

        let still_laid_out = self
            .host
            .line_containing(BufferPosition(focused.start))
            .is_some_and(|line| line.span() == focused);
        if still_laid_out {
            return;
        }

        debug!(view_id = %self.view_id, from = %focused, to = %span, "Focused line reformatted");
        self.cache.invalidate(focused);
        self.focus.focus(span);
    }

    fn clear_line(&mut self, span: LineSpan) -> Result<(), SyncError> {
        self.cache.invalidate(span);
        self.renderer.clear_line(&mut self.host, span)
    }

    /// Record a failure that abandons one line but not the rest of the update
    fn note_failure(
        &self,
        span: LineSpan,
        result: Result<(), SyncError>,
        failure: &mut Option<SyncError>,
    ) {
        if let Err(err) = result {
            warn!(view_id = %self.view_id, %span, error = %err, "Line update failed");
            failure.get_or_insert(err);
        }
    }

    /// Promote `new_line` and demote `old_line`.
    ///
    /// Every line is handled independently: a line that fails to clear or
    /// render is logged and skipped, and the first failure is returned
    /// alongside the promoted visual once all lines have been processed.
    fn move_focus(
        &mut self,
        new_line: &H::Line,
        old_line: Option<&H::Line>,
    ) -> (LineVisual, Option<SyncError>) {
        let new_span = new_line.span();
        let new_text = new_line.text();
        let old = old_line
            .map(|line| (line.span(), line.text()))
            .filter(|(span, _)| *span != new_span);
        let old_span = old.as_ref().map(|(span, _)| *span);
        let mut failure = None;

        // Lines still shown as focused that this move does not re-render
        let mut stale: Vec<LineSpan> = self.cache.focused_spans().collect();
        stale.extend(self.focus.focused());
        stale.retain(|span| *span != new_span && Some(*span) != old_span);
        stale.sort();
        stale.dedup();

        for span in std::iter::once(new_span).chain(old_span) {
            let result = self.clear_line(span);
            self.note_failure(span, result, &mut failure);
        }

        let promoted = self.compute_visual(new_span, &new_text, true);
        let demoted = old
            .as_ref()
            .map(|(span, text)| (*span, self.compute_visual(*span, text, false)));

        self.focus.focus(new_span);
        for span in stale {
            let result = self.clear_line(span);
            self.note_failure(span, result, &mut failure);
        }

        // Demoted line first, independent of whether the promotion renders
        if let (Some((span, text)), Some((_, visual))) = (&old, &demoted) {
            let result = self
                .renderer
                .render_line(&mut self.host, *span, text, visual);
            self.note_failure(*span, result, &mut failure);
        }
        let result = self
            .renderer
            .render_line(&mut self.host, new_span, &new_text, &promoted);
        self.note_failure(new_span, result, &mut failure);

        (promoted, failure)
    }
}
