//! Color values and the dispatcher that turns loosely-shaped color input into
//! one of the device color models or a color in a named color space.

use std::fmt;

use crate::errors::{CanvasError, Result};

/// A non-device color space, registered as a `ColorSpace` resource.
///
/// `params` are the array elements following the family name, already in
/// PDF syntax (for example a colorant name and an alternate space).
#[derive(Clone, Debug, PartialEq)]
pub struct ColorSpaceDef {
    pub family: String,
    pub params: Vec<String>,
    /// Number of color components a color in this space carries
    pub components: usize,
}

impl ColorSpaceDef {
    pub fn new(
        family: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
        components: usize,
    ) -> Self {
        Self {
            family: family.into(),
            params: params.into_iter().map(Into::into).collect(),
            components,
        }
    }
}

impl fmt::Display for ColorSpaceDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[/{}", self.family)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        f.write_str("]")
    }
}

/// A color, with components normalized to the `0..=1` range for the device
/// spaces.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Gray(f64),
    Rgb(f64, f64, f64),
    Cmyk(f64, f64, f64, f64),
    Named {
        space: ColorSpaceDef,
        components: Vec<f64>,
    },
}

impl Default for Color {
    fn default() -> Self {
        Color::Gray(0.0)
    }
}

impl Color {
    /// The named color space, if this color lives in one
    pub fn named_space(&self) -> Option<&ColorSpaceDef> {
        match self {
            Color::Named { space, .. } => Some(space),
            _ => None,
        }
    }

    /// Resolve a [`ColorSpec`] into a color.
    ///
    /// Gray and RGB components are given on a `0..=255` scale, CMYK
    /// components on a `0..=100` scale.
    pub fn from_spec(spec: ColorSpec) -> Result<Color> {
        match spec {
            ColorSpec::Components(c) => match c.as_slice() {
                [g] => Ok(Color::Gray(g / 255.0)),
                [r, g, b] => Ok(Color::Rgb(r / 255.0, g / 255.0, b / 255.0)),
                [c, m, y, k] => Ok(Color::Cmyk(c / 100.0, m / 100.0, y / 100.0, k / 100.0)),
                other => Err(CanvasError::invalid_color(format!(
                    "expected 1, 3 or 4 components, got {}",
                    other.len()
                ))),
            },
            ColorSpec::Text(text) => parse_color_text(&text),
            ColorSpec::Color(color) => {
                if let Color::Named { space, components } = &color {
                    if space.components != components.len() {
                        return Err(CanvasError::invalid_color(format!(
                            "color space {} takes {} components, got {}",
                            space.family,
                            space.components,
                            components.len()
                        )));
                    }
                }
                Ok(color)
            }
        }
    }
}

/// Color input as accepted by the stroke and fill color setters
#[derive(Clone, Debug, PartialEq)]
pub enum ColorSpec {
    /// 1 (gray), 3 (RGB) or 4 (CMYK) components; empty means "no color given"
    Components(Vec<f64>),
    /// A hex string (`"6600FF"`, `"#60F"`) or a color name (`"red"`)
    Text(String),
    /// An already-built color, passed through unchanged
    Color(Color),
}

impl ColorSpec {
    pub fn is_empty(&self) -> bool {
        matches!(self, ColorSpec::Components(c) if c.is_empty())
    }
}

impl From<f64> for ColorSpec {
    fn from(gray: f64) -> Self {
        ColorSpec::Components(vec![gray])
    }
}

impl<const N: usize> From<[f64; N]> for ColorSpec {
    fn from(components: [f64; N]) -> Self {
        ColorSpec::Components(components.to_vec())
    }
}

impl From<&[f64]> for ColorSpec {
    fn from(components: &[f64]) -> Self {
        ColorSpec::Components(components.to_vec())
    }
}

impl From<Vec<f64>> for ColorSpec {
    fn from(components: Vec<f64>) -> Self {
        ColorSpec::Components(components)
    }
}

impl From<&str> for ColorSpec {
    fn from(text: &str) -> Self {
        ColorSpec::Text(text.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(text: String) -> Self {
        ColorSpec::Text(text)
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Color(color)
    }
}

/// Named colors understood by the dispatcher, as 0..=255 RGB triples
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("silver", [192, 192, 192]),
];

fn rgb_bytes([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

fn parse_color_text(text: &str) -> Result<Color> {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some((_, rgb)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
        return Ok(rgb_bytes(*rgb));
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CanvasError::invalid_color(format!(
            "unknown color name or hex string: {:?}",
            text
        )));
    }
    let digit = |i: usize| -> Result<u8> {
        u8::from_str_radix(&hex[i..i + 1], 16)
            .map_err(|e| CanvasError::invalid_color(e.to_string()))
    };
    match hex.len() {
        6 => {
            let byte = |i: usize| -> Result<u8> { Ok(digit(i)? * 16 + digit(i + 1)?) };
            Ok(rgb_bytes([byte(0)?, byte(2)?, byte(4)?]))
        }
        3 => {
            let doubled = |i: usize| -> Result<u8> { Ok(digit(i)? * 17) };
            Ok(rgb_bytes([doubled(0)?, doubled(1)?, doubled(2)?]))
        }
        n => Err(CanvasError::invalid_color(format!(
            "hex colors need 3 or 6 digits, got {}",
            n
        ))),
    }
}
