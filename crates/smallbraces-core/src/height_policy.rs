// ABOUTME: Height policy mapping a line category and focus flag to a vertical scale
// ABOUTME: Category mapping and the focus override are separate steps composed per call

use smallbraces_types::{HeightConfig, LineCategory, LineTransform, ScaleError, VerticalScale};

/// Maps categories to vertical scales, with a boost for the focused line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightPolicy {
    collapsed: VerticalScale,
    whitespace: VerticalScale,
    focused: VerticalScale,
}

impl HeightPolicy {
    pub fn new(config: &HeightConfig) -> Result<Self, ScaleError> {
        Ok(Self {
            collapsed: VerticalScale::new(config.collapsed_scale)?,
            whitespace: VerticalScale::new(config.whitespace_scale)?,
            focused: VerticalScale::new(config.focused_scale)?,
        })
    }

    /// Scale of an unfocused line of the given category
    pub fn base_scale(&self, category: LineCategory) -> VerticalScale {
        match category {
            LineCategory::Whitespace => self.whitespace,
            LineCategory::CommentCruft | LineCategory::PunctuationOnly => self.collapsed,
            LineCategory::Default => VerticalScale::FULL,
        }
    }

    /// Apply the focus override to a base scale.
    ///
    /// A focused line is never rendered smaller than its base scale, so a
    /// partial boost leaves full-height lines untouched.
    pub fn focus_override(&self, base: VerticalScale, is_focused: bool) -> VerticalScale {
        if is_focused && self.focused > base {
            self.focused
        } else {
            base
        }
    }

    pub fn transform_for(&self, category: LineCategory, is_focused: bool) -> VerticalScale {
        self.focus_override(self.base_scale(category), is_focused)
    }

    pub fn line_transform(&self, category: LineCategory, is_focused: bool) -> LineTransform {
        LineTransform::scaled(self.transform_for(category, is_focused))
    }
}

impl Default for HeightPolicy {
    fn default() -> Self {
        Self {
            collapsed: VerticalScale::COLLAPSED,
            whitespace: VerticalScale::HALF,
            focused: VerticalScale::FULL,
        }
    }
}
