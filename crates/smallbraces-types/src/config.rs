// ABOUTME: Text rendering property types queried from the host
// ABOUTME: Pure data structures used to keep overlay text consistent with the editor font

use serde::{Deserialize, Serialize};

/// Font weight enumeration matching common font weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Normal,
    Medium,
    SemiBold,
    Bold,
}

/// RGBA colour with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn opaque() -> u8 {
    255
}

/// Current text-rendering properties of the host view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProperties {
    /// Font family name
    pub family: String,
    /// Font size in pixels
    #[serde(default = "default_font_size")]
    pub size: f64,
    /// Font weight
    #[serde(default)]
    pub weight: FontWeight,
    /// Foreground colour
    #[serde(default)]
    pub color: Color,
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            size: default_font_size(),
            weight: FontWeight::default(),
            color: Color::default(),
        }
    }
}

/// 10pt at 96 dpi
fn default_font_size() -> f64 {
    10.0 * 96.0 / 72.0
}

fn default_font_family() -> String {
    if cfg!(target_os = "macos") {
        "SF Mono".to_string()
    } else if cfg!(target_os = "windows") {
        "Consolas".to_string()
    } else {
        "monospace".to_string()
    }
}
