// ABOUTME: Native render strategy where the host applies each line's vertical scale itself
// ABOUTME: Clearing a line asks the host to lay it out again so it re-queries the transform

use super::LineRenderer;
use crate::visual_cache::LineVisual;
use smallbraces_core::{HostView, SyncError};
use smallbraces_logging::trace;
use smallbraces_types::{BufferPosition, LineCategory, LineSpan, RenderMode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeRenderer;

impl<H: HostView> LineRenderer<H> for NativeRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Native
    }

    fn render_line(
        &mut self,
        _host: &mut H,
        span: LineSpan,
        _text: &str,
        visual: &LineVisual,
    ) -> Result<(), SyncError> {
        // Nothing to draw: the host pulls the transform during layout
        trace!(%span, scale = %visual.scale, "Native line ready");
        Ok(())
    }

    fn clear_line(&mut self, host: &mut H, span: LineSpan) -> Result<(), SyncError> {
        host.invalidate_line(span)?;
        Ok(())
    }

    fn update_caret(
        &mut self,
        _host: &mut H,
        _caret: BufferPosition,
        _category: LineCategory,
    ) -> Result<(), SyncError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_support::FakeHost;
    use smallbraces_types::VerticalScale;

    #[test]
    fn test_clear_invalidates_line() {
        let mut host = FakeHost::new(&["{", "x"]);
        let mut renderer = NativeRenderer;

        renderer.clear_line(&mut host, LineSpan::new(0, 1)).unwrap();
        assert_eq!(host.invalidated, vec![LineSpan::new(0, 1)]);
    }

    #[test]
    fn test_render_draws_nothing() {
        let mut host = FakeHost::new(&["{"]);
        let mut renderer = NativeRenderer;
        let visual = LineVisual {
            category: LineCategory::PunctuationOnly,
            scale: VerticalScale::COLLAPSED,
            focused: false,
        };

        renderer
            .render_line(&mut host, LineSpan::new(0, 1), "{", &visual)
            .unwrap();
        renderer
            .update_caret(&mut host, BufferPosition(0), LineCategory::PunctuationOnly)
            .unwrap();

        assert!(host.overlays.is_empty());
        assert!(host.caret.is_none());
        assert!(host.invalidated.is_empty());
    }
}
