// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other smallbraces crates

pub mod adornment;
pub mod config;
pub mod fisheye_config;
pub mod geometry;
pub mod line;

// Re-export commonly used types
pub use adornment::{CaretIndicator, Overlay};
pub use config::{Color, FontWeight, TextProperties};
pub use fisheye_config::{
    ClassifierConfig, HeightConfig, OverlayConfig, RenderMode, SmallBracesConfig,
};
pub use geometry::{BufferPosition, LineSpan, Rect, ViewId};
pub use line::{LineCategory, LineTransform, ScaleError, VerticalScale, ViewRelativePosition};
