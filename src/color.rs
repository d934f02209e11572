//! CSS color parsing and palette helpers.
//!
//! Theme files store colors as the strings a browser understands (`#2186f4`,
//! `rgb(229,229,229)`, `hsl(210 50% 40%)`, `white`). This module turns those
//! strings into [`CssColor`] values so they can be validated, compared and
//! blended. `currentColor` is accepted by validation but has no [`CssColor`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::theme::{ColorValue, Colorscale, Colorway};

/// Error returned when a string is not a color a browser would accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`")]
pub struct ColorParseError(pub String);

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`
    pub a: f32,
}

/// CSS named colors, sorted by name.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

fn named(name: &str) -> Option<CssColor> {
    let i = NAMED_COLORS.binary_search_by(|(n, _)| n.cmp(&name)).ok()?;
    let rgb = NAMED_COLORS[i].1;
    Some(CssColor::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

impl CssColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Lowercase `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shortest CSS form: hex when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            self.to_hex()
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear blend towards `other`. `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: CssColor, t: f32) -> CssColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        CssColor {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for CssColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();

        let parsed = if let Some(hex) = lower.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = functional_args(&lower, &["rgba", "rgb"]) {
            parse_rgb_args(args)
        } else if let Some(args) = functional_args(&lower, &["hsla", "hsl"]) {
            parse_hsl_args(args)
        } else if lower == "transparent" {
            Some(CssColor::rgba(0, 0, 0, 0.0))
        } else {
            named(&lower)
        };

        parsed.ok_or_else(|| ColorParseError(s.to_string()))
    }
}

fn functional_args<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        s.strip_prefix(name)?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')
    })
}

fn parse_hex(hex: &str) -> Option<CssColor> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    // #abc expands each digit to a byte: a -> aa
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(CssColor::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(CssColor::rgba(
            nibble(0)?,
            nibble(1)?,
            nibble(2)?,
            nibble(3)? as f32 / 255.0,
        )),
        6 => Some(CssColor::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(CssColor::rgba(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)? as f32 / 255.0,
        )),
        _ => None,
    }
}

/// Split `a, b, c[, alpha]` or `a b c[ / alpha]` into components and alpha.
fn split_components(args: &str) -> Option<([&str; 3], Option<&str>)> {
    if args.contains(',') {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        return match parts.as_slice() {
            [a, b, c] => Some(([*a, *b, *c], None)),
            [a, b, c, alpha] => Some(([*a, *b, *c], Some(*alpha))),
            _ => None,
        };
    }

    let (body, alpha) = match args.split_once('/') {
        Some((body, alpha)) => (body, Some(alpha.trim())),
        None => (args, None),
    };
    match body.split_whitespace().collect::<Vec<_>>().as_slice() {
        [a, b, c] => Some(([*a, *b, *c], alpha)),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<CssColor> {
    let ([r, g, b], a) = split_components(args)?;
    let a = match a {
        Some(a) => alpha(a)?,
        None => 1.0,
    };
    Some(CssColor::rgba(channel(r)?, channel(g)?, channel(b)?, a))
}

fn parse_hsl_args(args: &str) -> Option<CssColor> {
    let ([h, s, l], a) = split_components(args)?;
    let a = match a {
        Some(a) => alpha(a)?,
        None => 1.0,
    };
    let (r, g, b) = hsl_to_rgb(hue(h)?, fraction(s)?, fraction(l)?);
    Some(CssColor::rgba(r, g, b, a))
}

fn channel(s: &str) -> Option<u8> {
    if let Some(pct) = s.strip_suffix('%') {
        let value: f32 = pct.trim().parse().ok()?;
        if !(0.0..=100.0).contains(&value) {
            return None;
        }
        return Some((value * 2.55).round() as u8);
    }
    let value: f32 = s.parse().ok()?;
    (0.0..=255.0)
        .contains(&value)
        .then(|| value.round() as u8)
}

/// Hue in degrees, normalized to `0.0..360.0`. Accepts `deg`, `grad`, `rad`, `turn`.
fn hue(s: &str) -> Option<f32> {
    let (value, scale) = if let Some(v) = s.strip_suffix("deg") {
        (v, 1.0)
    } else if let Some(v) = s.strip_suffix("grad") {
        (v, 0.9)
    } else if let Some(v) = s.strip_suffix("rad") {
        (v, 180.0 / std::f32::consts::PI)
    } else if let Some(v) = s.strip_suffix("turn") {
        (v, 360.0)
    } else {
        (s, 1.0)
    };
    let value: f32 = value.trim().parse().ok()?;
    value
        .is_finite()
        .then(|| (value * scale).rem_euclid(360.0))
}

/// Saturation or lightness, `40%` or bare `40`, as `0.0..=1.0`.
fn fraction(s: &str) -> Option<f32> {
    let value: f32 = s.strip_suffix('%').unwrap_or(s).trim().parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(value / 100.0)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let a = s * l.min(1.0 - l);
    let f = |n: f32| {
        let k = (n + h / 30.0) % 12.0;
        let v = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        (v * 255.0).round() as u8
    };
    (f(0.0), f(8.0), f(4.0))
}

fn alpha(s: &str) -> Option<f32> {
    let value = match s.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
        None => s.parse().ok()?,
    };
    (0.0..=1.0).contains(&value).then_some(value)
}

impl ColorValue {
    pub fn parse(&self) -> Result<CssColor, ColorParseError> {
        self.as_str().parse()
    }

    /// `currentColor` takes the element's text color, so it has no fixed value.
    pub fn is_current_color(&self) -> bool {
        self.as_str().trim().eq_ignore_ascii_case("currentcolor")
    }
}

impl Colorway {
    /// Color assigned to the `index`-th data series. Wraps around the palette.
    pub fn color_for_series(&self, index: usize) -> Option<&ColorValue> {
        if self.is_empty() {
            return None;
        }
        self.get(index % self.len())
    }
}

impl Colorscale {
    /// Parse every stop, failing on the first invalid one.
    pub fn stops(&self) -> Result<Vec<CssColor>, ColorParseError> {
        self.iter().map(ColorValue::parse).collect()
    }

    /// Interpolate the gradient at `t` (clamped to `0.0..=1.0`).
    ///
    /// Stops are evenly spaced, so with ten stops `t = 1/9` lands exactly on
    /// the second one. Returns `None` for an empty scale or an unparsable stop.
    pub fn sample(&self, t: f64) -> Option<CssColor> {
        let stops = self.stops().ok()?;
        let last = stops.len().checked_sub(1)?;
        if last == 0 {
            return Some(stops[0]);
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * last as f64;
        let idx = (pos.floor() as usize).min(last);
        let frac = pos - idx as f64;
        let next = (idx + 1).min(last);

        Some(stops[idx].lerp(stops[next], frac as f32))
    }
}
