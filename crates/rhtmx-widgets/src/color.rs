// File: src/color.rs
// Purpose: Color model (parse and format css color strings)

use crate::value::format_number;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static HEX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)#([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})").unwrap()
});

static RGB_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rgb\((\d+), (\d+), (\d+)\)").unwrap()
});

static RGBA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rgba\((\d+), (\d+), (\d+), ([\d.]+)\)").unwrap()
});

/// Which textual form a color was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSyntax {
    Hex,
    Rgb,
    Rgba,
    /// Nothing matched; the color is opaque white
    Fallback,
}

/// An RGBA color: 8-bit channels plus a free-form alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 1.0);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 1.0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`
    ///
    /// Never fails: text matching none of the forms yields opaque white.
    pub fn parse(text: &str) -> Self {
        Self::parse_detailed(text).0
    }

    /// Like [`Color::parse`], also reporting which form matched
    pub fn parse_detailed(text: &str) -> (Self, ColorSyntax) {
        if let Some(caps) = HEX_REGEX.captures(text) {
            let color = Color::rgba(
                hex_channel(&caps[1]),
                hex_channel(&caps[2]),
                hex_channel(&caps[3]),
                1.0,
            );
            return (color, ColorSyntax::Hex);
        }

        if let Some(caps) = RGB_REGEX.captures(text) {
            let color = Color::rgba(
                decimal_channel(&caps[1]),
                decimal_channel(&caps[2]),
                decimal_channel(&caps[3]),
                1.0,
            );
            return (color, ColorSyntax::Rgb);
        }

        if let Some(caps) = RGBA_REGEX.captures(text) {
            let color = Color::rgba(
                decimal_channel(&caps[1]),
                decimal_channel(&caps[2]),
                decimal_channel(&caps[3]),
                parse_float_prefix(&caps[4]),
            );
            return (color, ColorSyntax::Rgba);
        }

        tracing::debug!("Unrecognized color {:?}, falling back to white", text);
        (Color::WHITE, ColorSyntax::Fallback)
    }

    /// Format as `#rrggbb`
    ///
    /// **Alpha is dropped.** Hex output feeds the native color picker, which
    /// has no alpha channel; round-tripping through hex loses transparency.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Format as `rgba(r, g, b, a)`, alpha passed through unrounded
    pub fn to_rgba(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            format_number(self.a)
        )
    }

    /// Same color with different r/g/b, alpha kept
    pub fn with_rgb(self, other: Color) -> Self {
        Self {
            r: other.r,
            g: other.g,
            b: other.b,
            a: self.a,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rgba())
    }
}

fn hex_channel(digits: &str) -> u8 {
    // Regex guarantees two hex digits
    u8::from_str_radix(digits, 16).unwrap_or(u8::MAX)
}

/// Decimal channel, saturating at 255
fn decimal_channel(digits: &str) -> u8 {
    digits
        .parse::<u64>()
        .map(|n| n.min(u8::MAX as u64) as u8)
        .unwrap_or(u8::MAX)
}

/// Longest leading float, so `"0.5.1"` reads as `0.5`
fn parse_float_prefix(text: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, ch) in text.char_indices() {
        match ch {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    text[..end].trim_end_matches('.').parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#000000", 0, 0, 0)]
    #[case("#ff0000", 255, 0, 0)]
    #[case("#0A1b2C", 10, 27, 44)]
    #[case("#ffffff", 255, 255, 255)]
    fn test_hex_to_rgba(#[case] hex: &str, #[case] r: u8, #[case] g: u8, #[case] b: u8) {
        let color = Color::parse(hex);
        assert_eq!(color, Color::rgba(r, g, b, 1.0));
        assert_eq!(color.to_rgba(), format!("rgba({}, {}, {}, 1)", r, g, b));
    }

    #[test]
    fn test_rgb_and_rgba() {
        assert_eq!(
            Color::parse_detailed("rgb(1, 2, 3)"),
            (Color::rgba(1, 2, 3, 1.0), ColorSyntax::Rgb)
        );
        assert_eq!(
            Color::parse_detailed("rgba(10, 20, 30, 0.25)"),
            (Color::rgba(10, 20, 30, 0.25), ColorSyntax::Rgba)
        );
    }

    #[test]
    fn test_fallback_is_opaque_white() {
        assert_eq!(Color::parse_detailed("tomato"), (Color::WHITE, ColorSyntax::Fallback));
        assert_eq!(Color::parse(""), Color::WHITE);
        assert_eq!(Color::parse("#12"), Color::WHITE);
    }

    #[rstest]
    #[case("rgb(1,2,3)")]
    #[case("rgba(1,2,3,0.5)")]
    #[case("rgb(1,  2, 3)")]
    fn test_separators_are_comma_space(#[case] text: &str) {
        assert_eq!(Color::parse_detailed(text), (Color::WHITE, ColorSyntax::Fallback));
    }

    #[test]
    fn test_hex_wins_over_rgba() {
        let (color, syntax) = Color::parse_detailed("rgba(1, 2, 3, 0.5) #102030");
        assert_eq!(syntax, ColorSyntax::Hex);
        assert_eq!(color, Color::rgba(16, 32, 48, 1.0));
    }

    #[test]
    fn test_permissive_channels() {
        assert_eq!(Color::parse("rgb(300, 0, 0)").r, 255);
        assert_eq!(Color::parse("rgba(0, 0, 0, 0.5.1)").a, 0.5);
        assert_eq!(Color::parse("rgba(0, 0, 0, 2)").a, 2.0);
    }

    #[test]
    fn test_to_hex_drops_alpha() {
        let color = Color::rgba(255, 0, 10, 0.3);
        assert_eq!(color.to_hex(), "#ff000a");
        assert_eq!(Color::parse(&color.to_hex()).a, 1.0);
    }

    #[rstest]
    #[case(Color::rgba(1, 128, 254, 0.1))]
    #[case(Color::rgba(0, 0, 0, 1.0))]
    #[case(Color::rgba(200, 17, 3, 0.75))]
    fn test_hex_roundtrip_keeps_rgb(#[case] color: Color) {
        let back = Color::parse(&Color::parse(&color.to_hex()).to_rgba());
        assert_eq!((back.r, back.g, back.b), (color.r, color.g, color.b));
        assert_eq!(back.to_hex(), color.to_hex());
    }
}
