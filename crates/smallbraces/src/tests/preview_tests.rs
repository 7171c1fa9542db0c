// ABOUTME: Tests for the preview report behind the smallbraces binary
// ABOUTME: Covers caret placement, overlay font sizes and table and JSON output

#[cfg(test)]
mod tests {
    use crate::preview::{preview, render_table};
    use smallbraces_types::{LineCategory, RenderMode, SmallBracesConfig};

    const SOURCE: &str = "fn main() {\n    let x = 1;\n\n}\n";

    #[test]
    fn test_native_report() {
        let reports = preview(&SmallBracesConfig::default(), SOURCE, None).unwrap();

        assert_eq!(reports.len(), 4);
        let categories: Vec<LineCategory> = reports.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                LineCategory::Default,
                LineCategory::Default,
                LineCategory::Whitespace,
                LineCategory::PunctuationOnly,
            ]
        );
        assert_eq!(reports[2].scale, 0.5);
        assert!(reports[3].scale < 0.001);
        assert!(reports.iter().all(|r| !r.focused));
        assert!(reports.iter().all(|r| r.overlay_font_size.is_none()));
        assert_eq!(reports[0].line, 1);
        assert_eq!(reports[3].text, "}");
    }

    #[test]
    fn test_caret_line_is_focused() {
        let reports = preview(&SmallBracesConfig::default(), SOURCE, Some(4)).unwrap();

        assert!(reports[3].focused);
        assert_eq!(reports[3].scale, 1.0);
        assert_eq!(reports.iter().filter(|r| r.focused).count(), 1);
    }

    #[test]
    fn test_overlay_font_sizes() {
        let config = SmallBracesConfig {
            render_mode: RenderMode::Overlay,
            ..Default::default()
        };
        let normal = config.overlay.normal_line_height;
        let reports = preview(&config, SOURCE, Some(3)).unwrap();

        assert_eq!(reports[0].overlay_font_size, None);
        assert_eq!(reports[2].overlay_font_size, Some(normal));
        assert_eq!(reports[3].overlay_font_size, Some(normal * 0.5));
    }

    #[test]
    fn test_caret_outside_document() {
        let config = SmallBracesConfig::default();

        let err = preview(&config, SOURCE, Some(0)).unwrap_err();
        assert!(err.to_string().contains("outside the document"));
        assert!(preview(&config, SOURCE, Some(5)).is_err());
    }

    #[test]
    fn test_table_rows() {
        let reports = preview(&SmallBracesConfig::default(), SOURCE, Some(1)).unwrap();
        let table = render_table(&reports);
        let rows: Vec<&str> = table.lines().collect();

        assert_eq!(rows.len(), 4);
        assert!(rows[0].contains('*'));
        assert!(rows[0].ends_with("| fn main() {"));
        assert!(rows[2].contains("whitespace"));
        assert!(rows[2].contains("0.500"));
        assert!(rows[3].contains("punctuation_only"));
        assert!(rows[3].contains("1.0e-10"));
    }

    #[test]
    fn test_json_report() {
        let reports = preview(&SmallBracesConfig::default(), "{\n", None).unwrap();
        let json = serde_json::to_value(&reports).unwrap();

        assert_eq!(json[0]["category"], "punctuation_only");
        assert_eq!(json[0]["line"], 1);
        assert!(json[0].get("overlay_font_size").is_none());
    }
}
