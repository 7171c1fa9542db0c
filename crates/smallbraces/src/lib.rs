// ABOUTME: Host-facing facade wiring configuration, the view registry and the fault barrier together
// ABOUTME: Every entry point a host calls is guarded so failures degrade to unmodified lines

pub mod config;
pub mod memory;
pub mod preview;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use memory::{MemoryLine, MemoryView};

use anyhow::{Context, Result};
use smallbraces_core::{HeightPolicy, HostView, LineClassifier, SyncError};
use smallbraces_events::{Event, EventHandler};
use smallbraces_editor::{
    ConfiguredRenderer, SharedViewSync, ViewRegistry, ViewSync, enter, guard,
};
use smallbraces_logging::{info, warn};
use smallbraces_types::{
    BufferPosition, LineTransform, SmallBracesConfig, ViewId, ViewRelativePosition,
};
use std::fmt::Debug;
use std::rc::Rc;

pub type ViewHandle<H> = SharedViewSync<H, ConfiguredRenderer>;

/// Fisheye add-on instance for one host process
pub struct SmallBraces<H: HostView> {
    config: SmallBracesConfig,
    classifier: Rc<LineClassifier>,
    policy: HeightPolicy,
    registry: ViewRegistry<H, ConfiguredRenderer>,
}

impl<H: HostView> SmallBraces<H> {
    pub fn new(config: SmallBracesConfig) -> Result<Self> {
        let classifier =
            LineClassifier::new(&config.classifier).context("Failed to build line classifier")?;
        let policy = HeightPolicy::new(&config.height).context("Invalid height configuration")?;

        info!(render_mode = ?config.render_mode, "SmallBraces initialized");

        Ok(Self {
            config,
            classifier: Rc::new(classifier),
            policy,
            registry: ViewRegistry::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.fisheye.clone())
    }

    pub fn config(&self) -> &SmallBracesConfig {
        &self.config
    }

    /// Attach a view, returning false if one with this id was already attached
    pub fn create(&mut self, view_id: ViewId, host: H) -> bool {
        if self.registry.contains(view_id) {
            return false;
        }

        let classifier = Rc::clone(&self.classifier);
        let policy = self.policy;
        let renderer = ConfiguredRenderer::from_config(&self.config);
        self.registry.get_or_create(view_id, || {
            ViewSync::new(view_id, host, classifier, policy, renderer)
        });
        true
    }

    pub fn close(&mut self, view_id: ViewId) -> bool {
        self.registry.close(view_id)
    }

    pub fn view(&self, view_id: ViewId) -> Option<ViewHandle<H>> {
        self.registry.get(view_id)
    }

    pub fn view_count(&self) -> usize {
        self.registry.len()
    }

    /// Per-line transform for the host's layout pass, identity on any failure
    pub fn line_transform(
        &self,
        view_id: ViewId,
        line: &H::Line,
        y_position: f64,
        placement: ViewRelativePosition,
    ) -> LineTransform {
        guard("line_transform", LineTransform::IDENTITY, || {
            let view = self.lookup(view_id)?;
            let mut sync = enter(&view, "line_transform")?;
            sync.line_transform(line, y_position, placement)
        })
    }

    pub fn on_layout_changed(&self, view_id: ViewId, lines: &[H::Line]) {
        guard("on_layout_changed", (), || {
            let view = self.lookup(view_id)?;
            let mut sync = enter(&view, "on_layout_changed")?;
            sync.on_layout_changed(lines)
        })
    }

    pub fn on_caret_moved(&self, view_id: ViewId, old: BufferPosition, new: BufferPosition) {
        guard("on_caret_moved", (), || {
            let view = self.lookup(view_id)?;
            let mut sync = enter(&view, "on_caret_moved")?;
            sync.on_caret_moved(old, new)
        })
    }

    /// Focus the line under the host's selection for a freshly attached view
    pub fn adopt_selection_focus(&self, view_id: ViewId) {
        guard("adopt_selection_focus", (), || {
            let view = self.lookup(view_id)?;
            let mut sync = enter(&view, "adopt_selection_focus")?;
            sync.adopt_selection_focus()
        })
    }

    /// Route a host event through the registry
    pub fn handle_event(&mut self, event: Event<H::Line>)
    where
        H::Line: Debug,
    {
        let view_id = event.view_id();
        let kind = event.kind();
        guard("handle_event", (), || {
            if let Err(err) = self.registry.handle(event) {
                warn!(%view_id, kind, error = %err, "View event dropped");
            }
            Ok(())
        })
    }

    fn lookup(&self, view_id: ViewId) -> Result<ViewHandle<H>, SyncError> {
        self.registry
            .get(view_id)
            .ok_or(SyncError::UnknownView { view_id })
    }
}
