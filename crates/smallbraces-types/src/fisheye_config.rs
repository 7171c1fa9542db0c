// ABOUTME: Configuration types for classification, line heights and overlay rendering
// ABOUTME: Shared between the core policy crates and the smallbraces.toml loader

use serde::{Deserialize, Serialize};

/// Boilerplate lines collapsed by default
pub const DEFAULT_CRUFT: &[&str] = &[
    "/// <summary>",
    "/// </summary>",
    "#region",
    "#endregion",
    "[Pure]",
    "break;",
];

/// Structural characters a punctuation-only line may consist of
pub const DEFAULT_PUNCTUATION: &str = "(){};,";

/// Lines longer than this are never classified
pub const DEFAULT_MAX_CLASSIFIABLE_LENGTH: usize = 100;

/// Height of a collapsed line: effectively zero, never exactly zero
pub const DEFAULT_COLLAPSED_SCALE: f64 = 0.000_000_000_1;

/// Line classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Lines with more characters than this are always `Default`
    #[serde(default = "default_max_classifiable_length")]
    pub max_classifiable_length: usize,

    /// Exact (trimmed) line contents treated as comment cruft
    #[serde(default = "default_cruft")]
    pub cruft: Vec<String>,

    /// Characters that may make up a punctuation-only line, besides whitespace
    #[serde(default = "default_punctuation")]
    pub punctuation: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_classifiable_length: default_max_classifiable_length(),
            cruft: default_cruft(),
            punctuation: default_punctuation(),
        }
    }
}

fn default_max_classifiable_length() -> usize {
    DEFAULT_MAX_CLASSIFIABLE_LENGTH
}

fn default_cruft() -> Vec<String> {
    DEFAULT_CRUFT.iter().map(|s| s.to_string()).collect()
}

fn default_punctuation() -> String {
    DEFAULT_PUNCTUATION.to_string()
}

impl ClassifierConfig {
    /// Validate the classifier configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_classifiable_length == 0 {
            return Err("Maximum classifiable length must be greater than 0".to_string());
        }

        for (index, entry) in self.cruft.iter().enumerate() {
            if entry.trim().is_empty() {
                return Err(format!("Cruft entry at index {} cannot be empty", index));
            }
        }

        if self.punctuation.chars().any(char::is_alphanumeric) {
            return Err(format!(
                "Punctuation set '{}' must not contain letters or digits",
                self.punctuation
            ));
        }

        Ok(())
    }

    /// Get a sanitized version of the configuration with valid values
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        if config.max_classifiable_length == 0 {
            config.max_classifiable_length = DEFAULT_MAX_CLASSIFIABLE_LENGTH;
        }

        config.cruft = config
            .cruft
            .into_iter()
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect();

        config.punctuation = config
            .punctuation
            .chars()
            .filter(|c| !c.is_alphanumeric())
            .collect();

        config
    }
}

/// Vertical scale configuration per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightConfig {
    /// Scale of comment cruft and punctuation-only lines
    #[serde(default = "default_collapsed_scale")]
    pub collapsed_scale: f64,

    /// Scale of whitespace-only lines
    #[serde(default = "default_whitespace_scale")]
    pub whitespace_scale: f64,

    /// Scale of the line holding the caret
    #[serde(default = "default_focused_scale")]
    pub focused_scale: f64,
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            collapsed_scale: default_collapsed_scale(),
            whitespace_scale: default_whitespace_scale(),
            focused_scale: default_focused_scale(),
        }
    }
}

fn default_collapsed_scale() -> f64 {
    DEFAULT_COLLAPSED_SCALE
}

fn default_whitespace_scale() -> f64 {
    0.5
}

fn default_focused_scale() -> f64 {
    1.0
}

fn in_scale_range(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= 1.0
}

impl HeightConfig {
    /// Validate the height configuration
    pub fn validate(&self) -> Result<(), String> {
        let scales = [
            ("collapsed_scale", self.collapsed_scale),
            ("whitespace_scale", self.whitespace_scale),
            ("focused_scale", self.focused_scale),
        ];

        for (name, value) in scales {
            if !in_scale_range(value) {
                return Err(format!(
                    "{} must be greater than 0 and at most 1.0, got {}",
                    name, value
                ));
            }
        }

        Ok(())
    }

    /// Get a sanitized version of the configuration with valid values
    pub fn sanitized(&self) -> Self {
        let defaults = HeightConfig::default();
        let mut config = self.clone();

        if !in_scale_range(config.collapsed_scale) {
            config.collapsed_scale = defaults.collapsed_scale;
        }
        if !in_scale_range(config.whitespace_scale) {
            config.whitespace_scale = defaults.whitespace_scale;
        }
        if !in_scale_range(config.focused_scale) {
            config.focused_scale = defaults.focused_scale;
        }

        config
    }
}

/// How compressed lines are drawn by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Host applies the vertical scale natively during layout
    #[default]
    Native,
    /// Lines are redrawn as small text overlays on an adornment layer
    Overlay,
}

/// Overlay rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Height of an uncompressed line in pixels (10pt at 96 dpi)
    #[serde(default = "default_normal_line_height")]
    pub normal_line_height: f64,

    /// Overlay font size relative to the normal line height when unfocused
    #[serde(default = "default_text_scale")]
    pub text_scale: f64,

    /// Overrides the host's font family for overlay text
    #[serde(default)]
    pub font_family: Option<String>,

    /// Blink interval of the caret indicator in milliseconds
    #[serde(default = "default_caret_blink_ms")]
    pub caret_blink_ms: u64,

    /// Extra downward nudge applied to the caret indicator in pixels
    #[serde(default = "default_caret_top_adjust")]
    pub caret_top_adjust: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            normal_line_height: default_normal_line_height(),
            text_scale: default_text_scale(),
            font_family: None,
            caret_blink_ms: default_caret_blink_ms(),
            caret_top_adjust: default_caret_top_adjust(),
        }
    }
}

fn default_normal_line_height() -> f64 {
    10.0 * 96.0 / 72.0
}

fn default_text_scale() -> f64 {
    0.5
}

fn default_caret_blink_ms() -> u64 {
    300
}

fn default_caret_top_adjust() -> f64 {
    2.0
}

impl OverlayConfig {
    /// Validate the overlay configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.normal_line_height.is_finite() && self.normal_line_height > 0.0) {
            return Err("Normal line height must be a positive number".to_string());
        }

        if !in_scale_range(self.text_scale) {
            return Err(format!(
                "Overlay text scale must be greater than 0 and at most 1.0, got {}",
                self.text_scale
            ));
        }

        if let Some(family) = &self.font_family
            && family.trim().is_empty()
        {
            return Err("Overlay font family cannot be empty".to_string());
        }

        if self.caret_blink_ms == 0 {
            return Err("Caret blink interval must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get a sanitized version of the configuration with valid values
    pub fn sanitized(&self) -> Self {
        let defaults = OverlayConfig::default();
        let mut config = self.clone();

        if !(config.normal_line_height.is_finite() && config.normal_line_height > 0.0) {
            config.normal_line_height = defaults.normal_line_height;
        }
        if !in_scale_range(config.text_scale) {
            config.text_scale = defaults.text_scale;
        }
        config.font_family = config
            .font_family
            .map(|family| family.trim().to_string())
            .filter(|family| !family.is_empty());
        if config.caret_blink_ms == 0 {
            config.caret_blink_ms = defaults.caret_blink_ms;
        }

        config
    }
}

/// Complete add-on configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmallBracesConfig {
    /// Render strategy selected when a view is attached
    #[serde(default)]
    pub render_mode: RenderMode,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub height: HeightConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl SmallBracesConfig {
    /// Validate every section, reporting the first problem found
    pub fn validate(&self) -> Result<(), String> {
        self.classifier
            .validate()
            .map_err(|e| format!("[classifier] {}", e))?;
        self.height.validate().map_err(|e| format!("[height] {}", e))?;
        self.overlay
            .validate()
            .map_err(|e| format!("[overlay] {}", e))?;
        Ok(())
    }

    pub fn sanitized(&self) -> Self {
        Self {
            render_mode: self.render_mode,
            classifier: self.classifier.sanitized(),
            height: self.height.sanitized(),
            overlay: self.overlay.sanitized(),
        }
    }
}
