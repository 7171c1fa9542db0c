// ABOUTME: Descriptions of the visuals placed on the host's adornment layer
// ABOUTME: Overlay text for a compressed line and the caret indicator drawn over it

use crate::config::TextProperties;
use crate::geometry::Rect;
use crate::line::VerticalScale;
use serde::{Deserialize, Serialize};

/// Replacement text drawn over a compressed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    /// Trimmed line text
    pub text: String,
    /// Top-left corner in view coordinates
    pub left: f64,
    pub top: f64,
    /// Font used to draw the text; `size` already reflects the scale
    pub font: TextProperties,
    /// Scale the line was rendered at
    pub scale: VerticalScale,
    pub focused: bool,
}

/// Blinking caret drawn when the caret sits on a compressed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaretIndicator {
    pub bounds: Rect,
    pub blink_interval_ms: u64,
}
