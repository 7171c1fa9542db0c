// ABOUTME: Overlay render strategy drawing compressed lines as small text on the adornment layer
// ABOUTME: Also owns the caret indicator shown while the caret rests on a compressed line

use super::LineRenderer;
use crate::visual_cache::LineVisual;
use smallbraces_core::{HostError, HostView, SyncError};
use smallbraces_logging::{debug, trace};
use smallbraces_types::{
    BufferPosition, CaretIndicator, LineCategory, LineSpan, Overlay, OverlayConfig, RenderMode,
};

#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    config: OverlayConfig,
}

impl OverlayRenderer {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Font size of overlay text: the full line height when focused
    pub fn font_size(&self, focused: bool) -> f64 {
        if focused {
            self.config.normal_line_height
        } else {
            self.config.normal_line_height * self.config.text_scale
        }
    }
}

impl<H: HostView> LineRenderer<H> for OverlayRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Overlay
    }

    fn render_line(
        &mut self,
        host: &mut H,
        span: LineSpan,
        text: &str,
        visual: &LineVisual,
    ) -> Result<(), SyncError> {
        host.remove_overlays_in(span);

        if visual.category == LineCategory::Default {
            return Ok(());
        }

        let indent = text.chars().take_while(|c| c.is_whitespace()).count();
        let anchor = span.skip_leading(indent);
        let bounds = host
            .marker_bounds(anchor)
            .ok_or(SyncError::GeometryUnavailable { span: anchor })?;

        let size = self.font_size(visual.focused);
        let mut font = host.text_properties();
        font.size = size;
        if let Some(family) = &self.config.font_family {
            font.family = family.clone();
        }

        let overlay = Overlay {
            text: text.trim().to_string(),
            left: bounds.left,
            top: bounds.top - size / 2.0,
            font,
            scale: visual.scale,
            focused: visual.focused,
        };

        trace!(%span, category = %visual.category, size, "Adding line overlay");
        host.add_overlay(span, overlay)?;
        Ok(())
    }

    fn clear_line(&mut self, host: &mut H, span: LineSpan) -> Result<(), SyncError> {
        host.remove_overlays_in(span);
        Ok(())
    }

    fn update_caret(
        &mut self,
        host: &mut H,
        caret: BufferPosition,
        category: LineCategory,
    ) -> Result<(), SyncError> {
        host.remove_caret();

        if category == LineCategory::Default {
            return Ok(());
        }

        let span = LineSpan::at(caret);
        let Some(bounds) = host.marker_bounds(span) else {
            debug!(%caret, "No geometry under the caret, skipping indicator");
            return Ok(());
        };

        let indicator = CaretIndicator {
            bounds: bounds
                .offset_y(self.config.caret_top_adjust - self.config.normal_line_height / 2.0),
            blink_interval_ms: self.config.caret_blink_ms,
        };

        match host.add_caret(span, indicator) {
            Ok(()) => Ok(()),
            Err(HostError::SpanOutOfRange { span }) => {
                debug!(%caret, %span, "Caret at end of document, skipping indicator");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
