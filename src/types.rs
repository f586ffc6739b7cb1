//! Strongly-typed primitives shared by the canvas, the serializer and the
//! tokenizer.
//!
//! Graphics-state attributes that PDF encodes as small integers or names are
//! enums here, so an out-of-range cap style or intent cannot be expressed.

use std::fmt;

use glam::DVec2;

/// A point in user space
pub type Point = DVec2;

/// Shorthand for building a [`Point`]
#[inline]
pub fn pt(x: f64, y: f64) -> Point {
    DVec2::new(x, y)
}

/// Serialize a number the way content streams expect it: at most
/// `precision` decimals, no trailing zeros, no decimal point for integral
/// values and never a negative zero.
pub fn format_number(value: f64, precision: usize) -> String {
    let mut s = format!("{:.*}", precision, value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// A PDF name such as `/GS1`, stored without the leading slash
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Name(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for byte in self.0.bytes() {
            let regular = (0x21..=0x7e).contains(&byte) && !b"()<>[]{}/%#".contains(&byte);
            if regular {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "#{:02X}", byte)?;
            }
        }
        Ok(())
    }
}

/// A content-stream operand
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Number(f64),
    Name(Name),
    Array(Vec<Operand>),
}

impl Operand {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Operand::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Write the operand in content-stream syntax
    pub fn write_to(&self, out: &mut String, precision: usize) {
        match self {
            Operand::Number(n) => out.push_str(&format_number(*n, precision)),
            Operand::Name(n) => out.push_str(&n.to_string()),
            Operand::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    item.write_to(out, precision);
                }
                out.push(']');
            }
        }
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

impl From<Name> for Operand {
    fn from(n: Name) -> Self {
        Operand::Name(n)
    }
}

/// Shape drawn at the ends of open subpaths (`J`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCapStyle {
    #[default]
    Butt,
    Round,
    ProjectingSquare,
}

impl LineCapStyle {
    pub fn code(self) -> u8 {
        match self {
            LineCapStyle::Butt => 0,
            LineCapStyle::Round => 1,
            LineCapStyle::ProjectingSquare => 2,
        }
    }
}

/// Shape drawn at the corners of stroked paths (`j`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineJoinStyle {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoinStyle {
    pub fn code(self) -> u8 {
        match self {
            LineJoinStyle::Miter => 0,
            LineJoinStyle::Round => 1,
            LineJoinStyle::Bevel => 2,
        }
    }
}

/// Color rendering intent (`ri`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    AbsoluteColorimetric,
    #[default]
    RelativeColorimetric,
    Saturation,
    Perceptual,
}

impl RenderingIntent {
    pub fn name(self) -> Name {
        Name::new(match self {
            RenderingIntent::AbsoluteColorimetric => "AbsoluteColorimetric",
            RenderingIntent::RelativeColorimetric => "RelativeColorimetric",
            RenderingIntent::Saturation => "Saturation",
            RenderingIntent::Perceptual => "Perceptual",
        })
    }
}

/// Rule deciding which regions a fill or clip covers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Dash lengths plus the phase offset into them; no lengths means solid
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LineDashPattern {
    pub array: Vec<f64>,
    pub phase: f64,
}

impl LineDashPattern {
    pub fn new(array: impl Into<Vec<f64>>, phase: f64) -> Self {
        Self {
            array: array.into(),
            phase,
        }
    }

    /// A solid line
    pub fn solid() -> Self {
        Self::default()
    }

    /// Equal dash and gap lengths
    pub fn uniform(length: f64) -> Self {
        Self::new(vec![length], 0.0)
    }

    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
    }
}
