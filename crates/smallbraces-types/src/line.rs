// ABOUTME: Line categories, vertical scale and the per-line transform returned to the host
// ABOUTME: VerticalScale enforces the (0, 1] range so collapsed lines never reach zero height

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification bucket for one line of text, in evaluation priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    /// Empty or whitespace-only
    Whitespace,
    /// Boilerplate such as a lone `/// <summary>` tag
    CommentCruft,
    /// Only structural punctuation like braces and semicolons
    PunctuationOnly,
    /// Everything else, including over-long lines
    Default,
}

impl LineCategory {
    pub const ALL: [LineCategory; 4] = [
        LineCategory::Whitespace,
        LineCategory::CommentCruft,
        LineCategory::PunctuationOnly,
        LineCategory::Default,
    ];

    /// Whether lines of this category render below full height when unfocused
    pub fn is_compressed(self) -> bool {
        !matches!(self, LineCategory::Default)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineCategory::Whitespace => "whitespace",
            LineCategory::CommentCruft => "comment_cruft",
            LineCategory::PunctuationOnly => "punctuation_only",
            LineCategory::Default => "default",
        }
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a scale falls outside `(0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("vertical scale must be greater than zero, got {0}")]
    NotPositive(f64),

    #[error("vertical scale must not exceed 1.0, got {0}")]
    AboveFull(f64),

    #[error("vertical scale must be a finite number")]
    NotFinite,
}

/// Fraction of the normal line height a line is rendered at
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct VerticalScale(f64);

impl VerticalScale {
    pub const FULL: VerticalScale = VerticalScale(1.0);
    pub const HALF: VerticalScale = VerticalScale(0.5);
    /// Effectively collapsed, still strictly positive
    pub const COLLAPSED: VerticalScale =
        VerticalScale(crate::fisheye_config::DEFAULT_COLLAPSED_SCALE);

    pub fn new(value: f64) -> Result<Self, ScaleError> {
        if !value.is_finite() {
            return Err(ScaleError::NotFinite);
        }
        if value <= 0.0 {
            return Err(ScaleError::NotPositive(value));
        }
        if value > 1.0 {
            return Err(ScaleError::AboveFull(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_full(self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for VerticalScale {
    fn default() -> Self {
        Self::FULL
    }
}

impl<'de> Deserialize<'de> for VerticalScale {
    fn deserialize<D>(deserializer: D) -> Result<VerticalScale, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        VerticalScale::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<f64> for VerticalScale {
    type Error = ScaleError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        VerticalScale::new(value)
    }
}

impl From<VerticalScale> for f64 {
    fn from(scale: VerticalScale) -> Self {
        scale.0
    }
}

impl fmt::Display for VerticalScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Native per-line transform handed back to the host's layout pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineTransform {
    pub top_space: f64,
    pub bottom_space: f64,
    pub vertical_scale: VerticalScale,
}

impl LineTransform {
    /// Unmodified line, also the safe fallback when anything fails
    pub const IDENTITY: LineTransform = LineTransform {
        top_space: 0.0,
        bottom_space: 0.0,
        vertical_scale: VerticalScale::FULL,
    };

    pub fn scaled(vertical_scale: VerticalScale) -> Self {
        Self {
            vertical_scale,
            ..Self::IDENTITY
        }
    }
}

impl Default for LineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Placement hint the host passes along with a transform request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewRelativePosition {
    #[default]
    Top,
    Bottom,
}
