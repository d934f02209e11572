//! CSS lengths, spacing shorthands, font stacks and box shadows.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::color::CssColor;
use crate::theme::{BoxShadow, Dimension, FontFamily};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("value is empty")]
    Empty,
    #[error("invalid length `{0}`")]
    Length(String),
    #[error("expected 1 to 4 lengths, found {0}")]
    Arity(usize),
    #[error("expected a single length, found {0}")]
    NotSingle(usize),
    #[error("length `{0}` must not be negative")]
    Negative(String),
    #[error("invalid shadow layer `{0}`")]
    Shadow(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Px,
    Em,
    Rem,
    Percent,
    Vh,
    Vw,
    Pt,
    /// Bare number, only valid for zero
    None,
}

impl Unit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "px" => Unit::Px,
            "em" => Unit::Em,
            "rem" => Unit::Rem,
            "%" => Unit::Percent,
            "vh" => Unit::Vh,
            "vw" => Unit::Vw,
            "pt" => Unit::Pt,
            "" => Unit::None,
            _ => return None,
        })
    }

    fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Percent => "%",
            Unit::Vh => "vh",
            Unit::Vw => "vw",
            Unit::Pt => "pt",
            Unit::None => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: Unit,
}

impl Length {
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    /// Value in pixels, for lengths that don't depend on layout context.
    pub fn as_px(&self) -> Option<f32> {
        match self.unit {
            Unit::Px => Some(self.value),
            Unit::Pt => Some(self.value * 4.0 / 3.0),
            Unit::None => Some(0.0),
            _ if self.value == 0.0 => Some(0.0),
            _ => None,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for Length {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DimensionError::Empty);
        }

        let split = s
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
            .unwrap_or(s.len());
        let (number, suffix) = s.split_at(split);

        let invalid = || DimensionError::Length(s.to_string());
        let value: f32 = number.parse().map_err(|_| invalid())?;
        let unit = Unit::from_suffix(&suffix.to_ascii_lowercase()).ok_or_else(invalid)?;

        if !value.is_finite() || (unit == Unit::None && value != 0.0) {
            return Err(invalid());
        }

        Ok(Length { value, unit })
    }
}

impl Dimension {
    /// Parse as a CSS box shorthand (`"10px"`, `"0px 0px 1px 0px"`).
    pub fn lengths(&self) -> Result<Vec<Length>, DimensionError> {
        let parts: Vec<&str> = self.as_str().split_whitespace().collect();
        match parts.len() {
            0 => Err(DimensionError::Empty),
            1..=4 => parts.into_iter().map(str::parse::<Length>).collect(),
            n => Err(DimensionError::Arity(n)),
        }
    }

    /// Box shorthand where every length is zero or positive (padding, widths, radii).
    pub fn non_negative_lengths(&self) -> Result<Vec<Length>, DimensionError> {
        let lengths = self.lengths()?;
        match lengths.iter().find(|l| l.value < 0.0) {
            Some(negative) => Err(DimensionError::Negative(negative.to_string())),
            None => Ok(lengths),
        }
    }

    /// Exactly one non-negative length, as used by font sizes and breakpoints.
    pub fn single_length(&self) -> Result<Length, DimensionError> {
        match self.non_negative_lengths()?.as_slice() {
            [single] => Ok(*single),
            many => Err(DimensionError::NotSingle(many.len())),
        }
    }

    /// Pixel value of a single-length dimension such as a breakpoint.
    pub fn as_px(&self) -> Option<f32> {
        self.single_length().ok()?.as_px()
    }
}

impl FontFamily {
    /// Individual families of the stack, unquoted, in priority order.
    pub fn families(&self) -> Vec<&str> {
        self.as_str()
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|f| !f.is_empty())
            .collect()
    }
}

/// One comma-separated layer of a `box-shadow` value.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLayer {
    pub inset: bool,
    pub offset_x: Length,
    pub offset_y: Length,
    pub blur: Option<Length>,
    pub spread: Option<Length>,
    pub color: Option<CssColor>,
}

impl BoxShadow {
    /// Parse every layer. `none` yields no layers.
    pub fn layers(&self) -> Result<Vec<ShadowLayer>, DimensionError> {
        let value = self.as_str().trim();
        if value.is_empty() {
            return Err(DimensionError::Empty);
        }
        if value.eq_ignore_ascii_case("none") {
            return Ok(Vec::new());
        }
        split_top_level(value, |c| c == ',')
            .into_iter()
            .map(parse_shadow_layer)
            .collect()
    }
}

fn parse_shadow_layer(layer: &str) -> Result<ShadowLayer, DimensionError> {
    let invalid = || DimensionError::Shadow(layer.trim().to_string());

    let mut inset = false;
    let mut lengths = Vec::new();
    let mut color = None;

    for token in split_top_level(layer, char::is_whitespace) {
        if token.eq_ignore_ascii_case("inset") {
            inset = true;
        } else if let Ok(length) = token.parse::<Length>() {
            lengths.push(length);
        } else if color.is_none() {
            color = Some(token.parse::<CssColor>().map_err(|_| invalid())?);
        } else {
            return Err(invalid());
        }
    }

    match lengths.as_slice() {
        [x, y] => Ok(ShadowLayer {
            inset,
            offset_x: *x,
            offset_y: *y,
            blur: None,
            spread: None,
            color,
        }),
        [x, y, blur] => Ok(ShadowLayer {
            inset,
            offset_x: *x,
            offset_y: *y,
            blur: Some(*blur),
            spread: None,
            color,
        }),
        [x, y, blur, spread] => Ok(ShadowLayer {
            inset,
            offset_x: *x,
            offset_y: *y,
            blur: Some(*blur),
            spread: Some(*spread),
            color,
        }),
        _ => Err(invalid()),
    }
}

/// Split on `sep` outside of parentheses, dropping empty pieces.
fn split_top_level(s: &str, sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && sep(c) => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_parse() {
        assert_eq!("10px".parse::<Length>().unwrap(), Length::px(10.0));
        assert_eq!("-5px".parse::<Length>().unwrap(), Length::px(-5.0));
        assert_eq!(
            "1.5rem".parse::<Length>().unwrap(),
            Length {
                value: 1.5,
                unit: Unit::Rem
            }
        );
        assert_eq!("0".parse::<Length>().unwrap().unit, Unit::None);
    }

    #[test]
    fn test_length_rejects_unitless_nonzero() {
        assert!("12".parse::<Length>().is_err());
        assert!("px".parse::<Length>().is_err());
        assert!("10furlongs".parse::<Length>().is_err());
        assert!("".parse::<Length>().is_err());
    }

    #[test]
    fn test_dimension_shorthand() {
        let lengths = Dimension::from("0px 0px 1px 0px").lengths().unwrap();
        assert_eq!(lengths.len(), 4);
        assert_eq!(lengths[2], Length::px(1.0));

        assert_eq!(
            Dimension::from("1px 2px 3px 4px 5px").lengths(),
            Err(DimensionError::Arity(5))
        );
        assert_eq!(Dimension::from("  ").lengths(), Err(DimensionError::Empty));
    }

    #[test]
    fn test_dimension_single_length() {
        assert_eq!(Dimension::from("19px").single_length(), Ok(Length::px(19.0)));
        assert_eq!(
            Dimension::from("1px 2px 3px 4px").single_length(),
            Err(DimensionError::NotSingle(4))
        );
        assert_eq!(
            Dimension::from("0 0 0 0").single_length(),
            Err(DimensionError::NotSingle(4))
        );
        assert_eq!(
            Dimension::from("-19px").single_length(),
            Err(DimensionError::Negative("-19px".to_string()))
        );
    }

    #[test]
    fn test_dimension_non_negative() {
        assert_eq!(
            Dimension::from("0px 0px 1px 0px").non_negative_lengths().unwrap().len(),
            4
        );
        assert!(matches!(
            Dimension::from("10px -10px").non_negative_lengths(),
            Err(DimensionError::Negative(_))
        ));
        // Margins may be negative
        assert!(Dimension::from("10px -10px").lengths().is_ok());
    }

    #[test]
    fn test_dimension_as_px() {
        assert_eq!(Dimension::from("1200px").as_px(), Some(1200.0));
        assert_eq!(Dimension::from("0").as_px(), Some(0.0));
        assert_eq!(Dimension::from("2em").as_px(), None);
        assert_eq!(Dimension::from("0px 1px").as_px(), None);
    }

    #[test]
    fn test_font_family_stack() {
        let stack = FontFamily::from("IBM Plex Sans, sans-serif");
        assert_eq!(stack.families(), vec!["IBM Plex Sans", "sans-serif"]);

        let quoted = FontFamily::from("'Computer Modern', serif");
        assert_eq!(quoted.families(), vec!["Computer Modern", "serif"]);

        assert!(FontFamily::from(" , ").families().is_empty());
    }

    #[test]
    fn test_shadow_layers() {
        let shadow = BoxShadow::from("0px 0px 8px -5px rgba(0,0,0,0.3), 0px 0px 8px -5px rgba(0,0,0,0.3)");
        let layers = shadow.layers().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].blur, Some(Length::px(8.0)));
        assert_eq!(layers[0].spread, Some(Length::px(-5.0)));
        assert_eq!(layers[0].color, Some(CssColor::rgba(0, 0, 0, 0.3)));
    }

    #[test]
    fn test_shadow_unitless_zero_offsets() {
        let layers = BoxShadow::from("0 0 0 rgba(0,0,0,0.12), 0 0 0 rgba(0,0,0,0.24)")
            .layers()
            .unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[1].color.unwrap().a, 0.24);
    }

    #[test]
    fn test_shadow_none_and_inset() {
        assert!(BoxShadow::from("none").layers().unwrap().is_empty());

        let layers = BoxShadow::from("inset 1px 2px #000").layers().unwrap();
        assert!(layers[0].inset);
        assert_eq!(layers[0].blur, None);
    }

    #[test]
    fn test_shadow_rejects_malformed() {
        assert!(BoxShadow::from("1px").layers().is_err());
        assert!(BoxShadow::from("1px 1px red blue").layers().is_err());
        assert!(BoxShadow::from("1px 1px bogus").layers().is_err());
        assert!(BoxShadow::from("").layers().is_err());
    }
}
