//! Pure theme data types.
//!
//! Field names match the keys the dashboard's rendering layer reads, so a
//! `Theme` serializes straight into the `window.theme` object it expects.

use std::fmt;
use std::ops::Deref;

use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ThemeError;

pub const THEME_LAND_COVER: &str = "land-cover";

/// Theme used when nothing else is configured.
pub const DEFAULT_THEME_NAME: &str = THEME_LAND_COVER;

/// A theme compiled into the binary.
pub struct BuiltinTheme {
    pub name: &'static str,
    pub json: &'static str,
}

const LAND_COVER_JSON: &str = include_str!("../../themes/land-cover.json");

pub const BUILTIN_THEMES: &[BuiltinTheme] = &[BuiltinTheme {
    name: THEME_LAND_COVER,
    json: LAND_COVER_JSON,
}];

macro_rules! string_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_value!(
    /// A CSS color: `#rrggbb`, `#rgb`, `rgb(...)`, `rgba(...)` or a named color.
    ColorValue
);
string_value!(
    /// A CSS length or 1-4 value box shorthand, e.g. `"10px"` or `"0px 0px 1px 0px"`.
    Dimension
);
string_value!(
    /// A CSS `box-shadow` value with one or more comma-separated layers.
    BoxShadow
);
string_value!(
    /// A comma-separated CSS font stack.
    FontFamily
);

/// Text transform applied to buttons and titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Capitalization {
    Uppercase,
    Lowercase,
    Capitalize,
    None,
}

impl Capitalization {
    /// Apply the transform the way a browser's `text-transform` would.
    pub fn apply(self, text: &str) -> String {
        match self {
            Capitalization::Uppercase => text.to_uppercase(),
            Capitalization::Lowercase => text.to_lowercase(),
            Capitalization::None => text.to_string(),
            Capitalization::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for c in text.chars() {
                    if at_word_start && c.is_alphabetic() {
                        out.extend(c.to_uppercase());
                    } else {
                        out.push(c);
                    }
                    // Hyphens and other punctuation start a new word, apostrophes don't
                    at_word_start = !c.is_alphanumeric() && !matches!(c, '\'' | '\u{2019}');
                }
                out
            }
        }
    }
}

/// How the header distributes its logo, title and controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAlignment {
    Left,
    Center,
    Right,
    Spread,
    Stack,
}

/// CSS `border-style` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
    None,
    Hidden,
}

/// Corner radius given either as a bare pixel number or a CSS length.
///
/// The number keeps its JSON form, so `0` is written back as `0` and `4.5`
/// as `4.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RadiusValue {
    Pixels(serde_json::Number),
    Css(Dimension),
}

impl RadiusValue {
    /// Radius in pixels, when it doesn't depend on layout context.
    pub fn as_px(&self) -> Option<f64> {
        match self {
            RadiusValue::Pixels(n) => n.as_f64(),
            RadiusValue::Css(dimension) => dimension.as_px().map(f64::from),
        }
    }
}

/// Border applied to inputs and controls, e.g. the "underlined" look.
///
/// Keys are camel-cased because the rendering layer spreads this object
/// directly into an inline style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UnderlineBorder {
    pub name: String,
    #[serde(rename = "borderWidth")]
    pub border_width: Dimension,
    #[serde(rename = "borderStyle")]
    pub border_style: LineStyle,
    #[serde(rename = "borderRadius")]
    pub border_radius: RadiusValue,
}

/// Border without a line style (buttons and controls).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EdgeBorder {
    pub width: Dimension,
    pub color: ColorValue,
    pub radius: Dimension,
}

/// Full border descriptor for cards and the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BoxBorder {
    pub width: Dimension,
    pub style: LineStyle,
    pub color: ColorValue,
    pub radius: Dimension,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Outline {
    pub width: Dimension,
    pub style: LineStyle,
    pub color: ColorValue,
}

/// Ordered palette for discrete series. The first series gets the first color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Colorway(Vec<ColorValue>);

/// Ordered gradient stops for continuous values, low to high.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Colorscale(Vec<ColorValue>);

impl Colorway {
    pub fn new(colors: Vec<ColorValue>) -> Self {
        Self(colors)
    }
}

impl Deref for Colorway {
    type Target = [ColorValue];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Colorscale {
    pub fn new(colors: Vec<ColorValue>) -> Self {
        Self(colors)
    }
}

impl Deref for Colorscale {
    type Target = [ColorValue];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The complete set of visual constants for the dashboard.
///
/// All keys are required and unknown keys are rejected: the rendering layer
/// relies on this exact shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Theme {
    // Core palette
    pub accent: ColorValue,
    pub accent_positive: ColorValue,
    pub accent_negative: ColorValue,
    pub background_content: ColorValue,
    pub background_page: ColorValue,
    pub body_text: ColorValue,
    pub border: ColorValue,
    pub border_style: UnderlineBorder,

    // Buttons and controls
    pub button_border: EdgeBorder,
    pub button_capitalization: Capitalization,
    pub button_text: ColorValue,
    pub button_background_color: ColorValue,
    pub control_border: EdgeBorder,
    pub control_background_color: ColorValue,
    pub control_text: ColorValue,

    // Cards
    pub card_margin: Dimension,
    pub card_padding: Dimension,
    pub card_border: BoxBorder,
    pub card_background_color: ColorValue,
    pub card_box_shadow: BoxShadow,
    pub card_outline: Outline,
    pub card_header_margin: Dimension,
    pub card_header_padding: Dimension,
    pub card_header_border: BoxBorder,
    pub card_header_background_color: ColorValue,
    pub card_header_box_shadow: BoxShadow,

    // Responsive breakpoints
    pub breakpoint_font: Dimension,
    pub breakpoint_stack_blocks: Dimension,

    /// Discrete palette for chart series
    pub colorway: Colorway,
    /// Continuous gradient for heatmaps and choropleths
    pub colorscale: Colorscale,

    // Bootstrap component colors
    pub dbc_primary: ColorValue,
    pub dbc_secondary: ColorValue,
    pub dbc_info: ColorValue,
    pub dbc_gray: ColorValue,
    pub dbc_success: ColorValue,
    pub dbc_warning: ColorValue,
    pub dbc_danger: ColorValue,

    // Typography
    pub font_family: FontFamily,
    pub font_family_header: FontFamily,
    pub font_family_headings: FontFamily,
    pub font_size: Dimension,
    pub font_size_smaller_screen: Dimension,
    pub font_size_header: Dimension,
    pub title_capitalization: Capitalization,

    // Header
    pub header_content_alignment: HeaderAlignment,
    pub header_margin: Dimension,
    pub header_padding: Dimension,
    pub header_border: BoxBorder,
    pub header_background_color: ColorValue,
    pub header_box_shadow: BoxShadow,
    pub header_text: ColorValue,
    pub heading_text: ColorValue,
    pub text: ColorValue,

    // Printable reports
    pub report_background_content: ColorValue,
    pub report_background_page: ColorValue,
    pub report_text: ColorValue,
    pub report_font_family: FontFamily,
    pub report_font_size: Dimension,
}

static DEFAULT_THEME: Lazy<Theme> = Lazy::new(|| {
    tracing::debug!(theme = DEFAULT_THEME_NAME, "parsing builtin theme");
    // The embedded JSON is checked by the test suite
    Theme::from_json(LAND_COVER_JSON).expect("builtin theme JSON is valid")
});

impl Theme {
    /// The default builtin theme, parsed once per process.
    pub fn builtin() -> &'static Theme {
        &DEFAULT_THEME
    }

    /// Parse a theme from JSON text. Does not validate value domains.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a builtin theme by exact name.
    pub fn load_builtin(name: &str) -> Option<Self> {
        if name == DEFAULT_THEME_NAME {
            return Some(Self::builtin().clone());
        }
        let builtin = BUILTIN_THEMES.iter().find(|t| t.name == name)?;
        match Self::from_json(builtin.json) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme = name, error = %e, "builtin theme failed to parse");
                None
            }
        }
    }

    /// Names of the themes compiled into the binary.
    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN_THEMES.iter().map(|t| t.name).collect()
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, ThemeError> {
        serde_json::to_value(self).map_err(ThemeError::Serialize)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
