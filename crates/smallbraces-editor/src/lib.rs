// ABOUTME: Per-view fisheye synchronization built on the core capability traits
// ABOUTME: Reacts to layout and caret notifications without depending on any concrete host

pub mod fault_barrier;
pub mod focus_state;
pub mod registry;
pub mod render;
pub mod view_sync;
pub mod visual_cache;

mod test_utils;

pub use fault_barrier::guard;
pub use focus_state::FocusState;
pub use registry::{SharedViewSync, ViewRegistry, enter};
pub use render::{ConfiguredRenderer, LineRenderer, NativeRenderer, OverlayRenderer};
pub use view_sync::ViewSync;
pub use visual_cache::{LineVisual, VisualCache};
