// ABOUTME: Drives a document through the facade and reports each line's computed visual
// ABOUTME: Backs the preview binary and doubles as an end-to-end exercise of the pipeline

use crate::SmallBraces;
use crate::memory::MemoryView;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use smallbraces_types::{
    BufferPosition, LineCategory, RenderMode, SmallBracesConfig, ViewId, ViewRelativePosition,
};

const PREVIEW_VIEW: ViewId = ViewId(0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineReport {
    /// 1-based line number
    pub line: usize,
    pub category: LineCategory,
    pub scale: f64,
    pub focused: bool,
    /// Font size of the overlay drawn for the line, overlay mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_font_size: Option<f64>,
    pub text: String,
}

/// Lay out `text`, optionally place the caret on a 1-based line, and report every line
pub fn preview(
    config: &SmallBracesConfig,
    text: &str,
    caret_line: Option<usize>,
) -> Result<Vec<LineReport>> {
    let mut fisheye = SmallBraces::new(config.clone())?;
    let view = MemoryView::from_text(text);
    let lines = view.lines();
    fisheye.create(PREVIEW_VIEW, view);

    fisheye.on_layout_changed(PREVIEW_VIEW, &lines);

    if let Some(line_number) = caret_line {
        if line_number == 0 || line_number > lines.len() {
            bail!(
                "Caret line {} is outside the document (1..={})",
                line_number,
                lines.len()
            );
        }
        let target = BufferPosition(lines[line_number - 1].span.start);
        fisheye.on_caret_moved(PREVIEW_VIEW, BufferPosition::default(), target);
    }

    let handle = fisheye
        .view(PREVIEW_VIEW)
        .context("Preview view was not attached")?;

    let mut reports = Vec::with_capacity(lines.len());
    let mut y_position = 0.0;
    for line in &lines {
        let transform =
            fisheye.line_transform(PREVIEW_VIEW, line, y_position, ViewRelativePosition::Top);
        y_position += transform.vertical_scale.get() * config.overlay.normal_line_height;

        let sync = handle.borrow();
        let visual = sync
            .visual_for(line.span)
            .with_context(|| format!("No visual computed for line {}", line.index + 1))?;
        let overlay_font_size = match config.render_mode {
            RenderMode::Overlay => sync.host().overlay_for(line.span).map(|o| o.font.size),
            RenderMode::Native => None,
        };

        reports.push(LineReport {
            line: line.index + 1,
            category: visual.category,
            scale: transform.vertical_scale.get(),
            focused: visual.focused,
            overlay_font_size,
            text: line.text.clone(),
        });
    }

    Ok(reports)
}

/// Plain-text table, one row per line
pub fn render_table(reports: &[LineReport]) -> String {
    reports
        .iter()
        .map(|report| {
            let font = report
                .overlay_font_size
                .map(|size| format!("{size:>6.2}"))
                .unwrap_or_else(|| "     -".to_string());
            format!(
                "{:>4} {:<16} {:>12} {} {} | {}",
                report.line,
                report.category,
                format_scale(report.scale),
                if report.focused { '*' } else { ' ' },
                font,
                report.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_scale(scale: f64) -> String {
    if scale < 0.001 {
        format!("{scale:.1e}")
    } else {
        format!("{scale:.3}")
    }
}
