//! Color type and CSS-style color parsing.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// An sRGB color with a straight (non-premultiplied) alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    /// Create a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with the given alpha, clamped to `[0, 1]`.
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// The color channels without alpha.
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Composite this color over `dst` using source-over.
    ///
    /// `global_alpha` scales the color's own alpha, the way a 2-D drawing
    /// context applies its global transparency to every fill.
    pub fn blend_onto(self, dst: [u8; 3], global_alpha: f32) -> [u8; 3] {
        let alpha = (self.a * global_alpha).clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| -> u8 {
            let value = src as f32 * alpha + dst as f32 * (1.0 - alpha);
            value.round().clamp(0.0, 255.0) as u8
        };
        [mix(self.r, dst[0]), mix(self.g, dst[1]), mix(self.b, dst[2])]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ConfigError::InvalidColor(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let lower = trimmed.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba") {
            return parse_channels(args, true).ok_or_else(invalid);
        }
        if let Some(args) = function_args(&lower, "rgb") {
            return parse_channels(args, false).ok_or_else(invalid);
        }

        named(&lower).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Strip `name(` and `)` from a functional color notation.
fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

    match hex.len() {
        3 => Some(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)? as f32 / 255.0,
        )),
        _ => None,
    }
}

fn parse_channels(args: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |p: &str| -> Option<u8> {
        let v: f32 = p.parse().ok()?;
        v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = if with_alpha {
        let a: f32 = parts[3].parse().ok()?;
        if !a.is_finite() {
            return None;
        }
        a
    } else {
        1.0
    };

    Some(Rgba::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

fn named(name: &str) -> Option<Rgba> {
    let color = match name {
        "black" => Rgba::opaque(0, 0, 0),
        "white" => Rgba::opaque(255, 255, 255),
        "red" => Rgba::opaque(255, 0, 0),
        "green" => Rgba::opaque(0, 128, 0),
        "lime" => Rgba::opaque(0, 255, 0),
        "blue" => Rgba::opaque(0, 0, 255),
        "cyan" => Rgba::opaque(0, 255, 255),
        "magenta" => Rgba::opaque(255, 0, 255),
        "yellow" => Rgba::opaque(255, 255, 0),
        "gray" | "grey" => Rgba::opaque(128, 128, 128),
        "transparent" => Rgba::new(0, 0, 0, 0.0),
        _ => return None,
    };
    Some(color)
}
