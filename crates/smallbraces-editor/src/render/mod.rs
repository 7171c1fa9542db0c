// ABOUTME: Render strategies that turn computed line visuals into host-visible state
// ABOUTME: Native mode lets the host pull transforms, overlay mode draws on the adornment layer

mod native;
mod overlay;

pub use native::NativeRenderer;
pub use overlay::OverlayRenderer;

use crate::visual_cache::LineVisual;
use smallbraces_core::{HostView, SyncError};
use smallbraces_types::{BufferPosition, LineCategory, LineSpan, RenderMode, SmallBracesConfig};

/// Pluggable mechanism for showing a line at its computed scale
pub trait LineRenderer<H: HostView> {
    fn mode(&self) -> RenderMode;

    /// Show `visual` for the line at `span`, replacing anything shown before
    fn render_line(
        &mut self,
        host: &mut H,
        span: LineSpan,
        text: &str,
        visual: &LineVisual,
    ) -> Result<(), SyncError>;

    /// Drop whatever the renderer shows for the line so it can be rebuilt
    fn clear_line(&mut self, host: &mut H, span: LineSpan) -> Result<(), SyncError>;

    /// Reposition the caret indicator after the caret moved
    fn update_caret(
        &mut self,
        host: &mut H,
        caret: BufferPosition,
        category: LineCategory,
    ) -> Result<(), SyncError>;
}

/// Render strategy chosen from configuration when a view is attached
#[derive(Debug, Clone)]
pub enum ConfiguredRenderer {
    Native(NativeRenderer),
    Overlay(OverlayRenderer),
}

impl ConfiguredRenderer {
    pub fn from_config(config: &SmallBracesConfig) -> Self {
        match config.render_mode {
            RenderMode::Native => ConfiguredRenderer::Native(NativeRenderer),
            RenderMode::Overlay => {
                ConfiguredRenderer::Overlay(OverlayRenderer::new(config.overlay.clone()))
            }
        }
    }
}

impl<H: HostView> LineRenderer<H> for ConfiguredRenderer {
    fn mode(&self) -> RenderMode {
        match self {
            ConfiguredRenderer::Native(renderer) => LineRenderer::<H>::mode(renderer),
            ConfiguredRenderer::Overlay(renderer) => LineRenderer::<H>::mode(renderer),
        }
    }

    fn render_line(
        &mut self,
        host: &mut H,
        span: LineSpan,
        text: &str,
        visual: &LineVisual,
    ) -> Result<(), SyncError> {
        match self {
            ConfiguredRenderer::Native(renderer) => renderer.render_line(host, span, text, visual),
            ConfiguredRenderer::Overlay(renderer) => renderer.render_line(host, span, text, visual),
        }
    }

    fn clear_line(&mut self, host: &mut H, span: LineSpan) -> Result<(), SyncError> {
        match self {
            ConfiguredRenderer::Native(renderer) => renderer.clear_line(host, span),
            ConfiguredRenderer::Overlay(renderer) => renderer.clear_line(host, span),
        }
    }

    fn update_caret(
        &mut self,
        host: &mut H,
        caret: BufferPosition,
        category: LineCategory,
    ) -> Result<(), SyncError> {
        match self {
            ConfiguredRenderer::Native(renderer) => renderer.update_caret(host, caret, category),
            ConfiguredRenderer::Overlay(renderer) => renderer.update_caret(host, caret, category),
        }
    }
}
