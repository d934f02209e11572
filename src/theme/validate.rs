//! Value-domain checks for a parsed theme.
//!
//! Deserialization already guarantees the key set and the keyword enums;
//! this pass checks that every free-form string is something a browser
//! would accept for that property. Margins may be negative; padding, widths
//! and radii may not; font sizes and breakpoints are a single length.

use super::types::{
    BoxBorder, BoxShadow, ColorValue, Dimension, EdgeBorder, FontFamily, Outline, RadiusValue,
    Theme, UnderlineBorder,
};
use super::{ThemeError, ValidationIssue};

#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, key: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            key: key.to_string(),
            message: message.into(),
        });
    }

    fn color(&mut self, key: &str, value: &ColorValue) {
        if !value.is_current_color() {
            self.concrete_color(key, value);
        }
    }

    /// Palette stops are interpolated, so `currentColor` is not allowed.
    fn concrete_color(&mut self, key: &str, value: &ColorValue) {
        if let Err(e) = value.parse() {
            self.push(key, e.to_string());
        }
    }

    /// Margins: 1 to 4 lengths, any sign.
    fn dimension(&mut self, key: &str, value: &Dimension) {
        if let Err(e) = value.lengths() {
            self.push(key, format!("{e} in `{value}`"));
        }
    }

    /// Padding, border widths and radii: 1 to 4 lengths, none negative.
    fn extent(&mut self, key: &str, value: &Dimension) {
        if let Err(e) = value.non_negative_lengths() {
            self.push(key, format!("{e} in `{value}`"));
        }
    }

    /// Font sizes and breakpoints: one non-negative length.
    fn size(&mut self, key: &str, value: &Dimension) {
        if let Err(e) = value.single_length() {
            self.push(key, format!("{e} in `{value}`"));
        }
    }

    fn shadow(&mut self, key: &str, value: &BoxShadow) {
        if let Err(e) = value.layers() {
            self.push(key, e.to_string());
        }
    }

    fn font(&mut self, key: &str, value: &FontFamily) {
        if value.families().is_empty() {
            self.push(key, "font stack is empty");
        }
    }

    fn underline(&mut self, key: &str, border: &UnderlineBorder) {
        if border.name.trim().is_empty() {
            self.push(&format!("{key}.name"), "name is empty");
        }
        self.extent(&format!("{key}.borderWidth"), &border.border_width);
        match &border.border_radius {
            RadiusValue::Pixels(n) if n.as_f64().is_some_and(|px| px < 0.0) => {
                self.push(&format!("{key}.borderRadius"), "radius must not be negative");
            }
            RadiusValue::Pixels(_) => {}
            RadiusValue::Css(radius) => self.extent(&format!("{key}.borderRadius"), radius),
        }
    }

    fn edge(&mut self, key: &str, border: &EdgeBorder) {
        self.extent(&format!("{key}.width"), &border.width);
        self.color(&format!("{key}.color"), &border.color);
        self.extent(&format!("{key}.radius"), &border.radius);
    }

    fn boxed(&mut self, key: &str, border: &BoxBorder) {
        self.extent(&format!("{key}.width"), &border.width);
        self.color(&format!("{key}.color"), &border.color);
        self.extent(&format!("{key}.radius"), &border.radius);
    }

    fn outline(&mut self, key: &str, outline: &Outline) {
        self.extent(&format!("{key}.width"), &outline.width);
        self.color(&format!("{key}.color"), &outline.color);
    }

    fn palette(&mut self, key: &str, colors: &[ColorValue]) {
        if colors.is_empty() {
            self.push(key, "must contain at least one color");
        }
        for (i, color) in colors.iter().enumerate() {
            self.concrete_color(&format!("{key}[{i}]"), color);
        }
    }

    fn finish(self) -> Result<(), ThemeError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ThemeError::Invalid(self.issues))
        }
    }
}

impl Theme {
    /// Check every value against its domain, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ThemeError> {
        let mut check = Checker::default();

        check.color("accent", &self.accent);
        check.color("accent_positive", &self.accent_positive);
        check.color("accent_negative", &self.accent_negative);
        check.color("background_content", &self.background_content);
        check.color("background_page", &self.background_page);
        check.color("body_text", &self.body_text);
        check.color("border", &self.border);
        check.underline("border_style", &self.border_style);

        check.edge("button_border", &self.button_border);
        check.color("button_text", &self.button_text);
        check.color("button_background_color", &self.button_background_color);
        check.edge("control_border", &self.control_border);
        check.color("control_background_color", &self.control_background_color);
        check.color("control_text", &self.control_text);

        check.dimension("card_margin", &self.card_margin);
        check.extent("card_padding", &self.card_padding);
        check.boxed("card_border", &self.card_border);
        check.color("card_background_color", &self.card_background_color);
        check.shadow("card_box_shadow", &self.card_box_shadow);
        check.outline("card_outline", &self.card_outline);
        check.dimension("card_header_margin", &self.card_header_margin);
        check.extent("card_header_padding", &self.card_header_padding);
        check.boxed("card_header_border", &self.card_header_border);
        check.color(
            "card_header_background_color",
            &self.card_header_background_color,
        );
        check.shadow("card_header_box_shadow", &self.card_header_box_shadow);

        check.size("breakpoint_font", &self.breakpoint_font);
        check.size("breakpoint_stack_blocks", &self.breakpoint_stack_blocks);

        check.palette("colorway", &self.colorway);
        check.palette("colorscale", &self.colorscale);

        check.color("dbc_primary", &self.dbc_primary);
        check.color("dbc_secondary", &self.dbc_secondary);
        check.color("dbc_info", &self.dbc_info);
        check.color("dbc_gray", &self.dbc_gray);
        check.color("dbc_success", &self.dbc_success);
        check.color("dbc_warning", &self.dbc_warning);
        check.color("dbc_danger", &self.dbc_danger);

        check.font("font_family", &self.font_family);
        check.font("font_family_header", &self.font_family_header);
        check.font("font_family_headings", &self.font_family_headings);
        check.size("font_size", &self.font_size);
        check.size("font_size_smaller_screen", &self.font_size_smaller_screen);
        check.size("font_size_header", &self.font_size_header);

        check.dimension("header_margin", &self.header_margin);
        check.extent("header_padding", &self.header_padding);
        check.boxed("header_border", &self.header_border);
        check.color("header_background_color", &self.header_background_color);
        check.shadow("header_box_shadow", &self.header_box_shadow);
        check.color("header_text", &self.header_text);
        check.color("heading_text", &self.heading_text);
        check.color("text", &self.text);

        check.color("report_background_content", &self.report_background_content);
        check.color("report_background_page", &self.report_background_page);
        check.color("report_text", &self.report_text);
        check.font("report_font_family", &self.report_font_family);
        check.size("report_font_size", &self.report_font_size);

        check.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_with(patch: impl FnOnce(&mut serde_json::Value)) -> Theme {
        let mut value = Theme::builtin().to_json_value().unwrap();
        patch(&mut value);
        Theme::from_json(&value.to_string()).unwrap()
    }

    #[test]
    fn test_builtin_theme_is_valid() {
        Theme::builtin().validate().unwrap();
    }

    #[test]
    fn test_bad_color_reported_with_key() {
        let theme = builtin_with(|v| v["accent"] = "#12".into());
        let err = theme.validate().unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].key, "accent");
    }

    #[test]
    fn test_nested_and_palette_keys() {
        let theme = builtin_with(|v| {
            v["card_border"]["color"] = "nope".into();
            v["colorway"][3] = "#zzzzzz".into();
            v["header_margin"] = "1px 2px 3px 4px 5px".into();
        });
        let err = theme.validate().unwrap_err();
        let keys: Vec<&str> = err.issues().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["card_border.color", "colorway[3]", "header_margin"]);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let theme = builtin_with(|v| v["colorscale"] = serde_json::json!([]));
        let err = theme.validate().unwrap_err();
        assert_eq!(err.issues()[0].key, "colorscale");
        assert!(err.to_string().contains("at least one color"));
    }

    #[test]
    fn test_empty_font_stack_rejected() {
        let theme = builtin_with(|v| v["report_font_family"] = " ".into());
        let err = theme.validate().unwrap_err();
        assert_eq!(err.issues()[0].key, "report_font_family");
    }

    #[test]
    fn test_bad_shadow_rejected() {
        let theme = builtin_with(|v| v["card_box_shadow"] = "8px".into());
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_css_color_forms_accepted() {
        for color in [
            "steelblue",
            "dodgerblue",
            "gainsboro",
            "hsl(210, 50%, 40%)",
            "rgb(229 229 229)",
            "currentColor",
        ] {
            let theme = builtin_with(|v| v["accent"] = color.into());
            assert!(theme.validate().is_ok(), "{color} should be a valid accent");
        }
    }

    #[test]
    fn test_current_color_rejected_in_palette() {
        let theme = builtin_with(|v| v["colorscale"][0] = "currentColor".into());
        let err = theme.validate().unwrap_err();
        assert_eq!(err.issues()[0].key, "colorscale[0]");
    }

    #[test]
    fn test_sizes_are_single_lengths() {
        for (key, value) in [
            ("font_size", "1px 2px 3px 4px"),
            ("font_size", "-19px"),
            ("breakpoint_font", "0 0 0 0"),
            ("report_font_size", "12px 12px"),
        ] {
            let theme = builtin_with(|v| v[key] = value.into());
            let err = theme.validate().unwrap_err();
            assert_eq!(err.issues().len(), 1, "{key} = {value}");
            assert_eq!(err.issues()[0].key, key);
        }
    }

    #[test]
    fn test_padding_and_widths_not_negative() {
        let theme = builtin_with(|v| {
            v["card_padding"] = "-10px".into();
            v["card_border"]["width"] = "1px -1px".into();
            v["border_style"]["borderRadius"] = serde_json::json!(-4);
        });
        let err = theme.validate().unwrap_err();
        let keys: Vec<&str> = err.issues().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["border_style.borderRadius", "card_padding", "card_border.width"]
        );
    }

    #[test]
    fn test_margins_may_be_negative() {
        let theme = builtin_with(|v| v["card_margin"] = "-10px 0px".into());
        assert!(theme.validate().is_ok());
    }

    #[test]
    fn test_fractional_radius_accepted() {
        let theme = builtin_with(|v| v["border_style"]["borderRadius"] = serde_json::json!(4.5));
        assert!(theme.validate().is_ok());
    }
}
