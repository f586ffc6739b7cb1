//! Content-stream operators and the writer that serializes them.

use crate::types::{
    FillRule, LineCapStyle, LineDashPattern, LineJoinStyle, Name, Operand, Point,
    RenderingIntent,
};

use super::geometry::Matrix;

/// Which paint a color operator applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintTarget {
    Stroke,
    Fill,
}

/// One drawing instruction with its operands
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Save,
    Restore,
    Transform(Matrix),
    LineWidth(f64),
    LineCap(LineCapStyle),
    LineJoin(LineJoinStyle),
    MiterLimit(f64),
    Dash(LineDashPattern),
    RenderingIntent(RenderingIntent),
    GraphicsStateParams(Name),
    Gray(PaintTarget, f64),
    Rgb(PaintTarget, [f64; 3]),
    Cmyk(PaintTarget, [f64; 4]),
    ColorSpace(PaintTarget, Name),
    ColorN(PaintTarget, Vec<f64>),
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    /// Initial point doubles as the first control point (`v`)
    CurveToInitial(Point, Point),
    /// Final point doubles as the second control point (`y`)
    CurveToFinal(Point, Point),
    Rectangle(f64, f64, f64, f64),
    ClosePath,
    Stroke,
    CloseStroke,
    Fill(FillRule),
    FillStroke(FillRule),
    CloseFillStroke(FillRule),
    EndPath,
    Clip(FillRule),
    PaintXObject(Name),
}

impl Operator {
    /// The operator token as written to the stream
    pub fn token(&self) -> &'static str {
        use FillRule::*;
        use PaintTarget::*;
        match self {
            Operator::Save => "q",
            Operator::Restore => "Q",
            Operator::Transform(_) => "cm",
            Operator::LineWidth(_) => "w",
            Operator::LineCap(_) => "J",
            Operator::LineJoin(_) => "j",
            Operator::MiterLimit(_) => "M",
            Operator::Dash(_) => "d",
            Operator::RenderingIntent(_) => "ri",
            Operator::GraphicsStateParams(_) => "gs",
            Operator::Gray(Stroke, _) => "G",
            Operator::Gray(Fill, _) => "g",
            Operator::Rgb(Stroke, _) => "RG",
            Operator::Rgb(Fill, _) => "rg",
            Operator::Cmyk(Stroke, _) => "K",
            Operator::Cmyk(Fill, _) => "k",
            Operator::ColorSpace(Stroke, _) => "CS",
            Operator::ColorSpace(Fill, _) => "cs",
            Operator::ColorN(Stroke, _) => "SCN",
            Operator::ColorN(Fill, _) => "scn",
            Operator::MoveTo(_) => "m",
            Operator::LineTo(_) => "l",
            Operator::CurveTo(..) => "c",
            Operator::CurveToInitial(..) => "v",
            Operator::CurveToFinal(..) => "y",
            Operator::Rectangle(..) => "re",
            Operator::ClosePath => "h",
            Operator::Stroke => "S",
            Operator::CloseStroke => "s",
            Operator::Fill(NonZero) => "f",
            Operator::Fill(EvenOdd) => "f*",
            Operator::FillStroke(NonZero) => "B",
            Operator::FillStroke(EvenOdd) => "B*",
            Operator::CloseFillStroke(NonZero) => "b",
            Operator::CloseFillStroke(EvenOdd) => "b*",
            Operator::EndPath => "n",
            Operator::Clip(NonZero) => "W",
            Operator::Clip(EvenOdd) => "W*",
            Operator::PaintXObject(_) => "Do",
        }
    }

    /// The operands, in stream order
    pub fn operands(&self) -> Vec<Operand> {
        fn nums<const N: usize>(values: [f64; N]) -> Vec<Operand> {
            values.into_iter().map(Operand::Number).collect()
        }
        fn points<const N: usize>(points: [Point; N]) -> Vec<Operand> {
            points
                .into_iter()
                .flat_map(|p| [Operand::Number(p.x), Operand::Number(p.y)])
                .collect()
        }

        match self {
            Operator::Transform(m) => nums(m.components()),
            Operator::LineWidth(w) => nums([*w]),
            Operator::LineCap(cap) => nums([cap.code() as f64]),
            Operator::LineJoin(join) => nums([join.code() as f64]),
            Operator::MiterLimit(limit) => nums([*limit]),
            Operator::Dash(dash) => vec![
                Operand::Array(dash.array.iter().copied().map(Operand::Number).collect()),
                Operand::Number(dash.phase),
            ],
            Operator::RenderingIntent(intent) => vec![Operand::Name(intent.name())],
            Operator::GraphicsStateParams(name)
            | Operator::ColorSpace(_, name)
            | Operator::PaintXObject(name) => vec![Operand::Name(name.clone())],
            Operator::Gray(_, g) => nums([*g]),
            Operator::Rgb(_, rgb) => nums(*rgb),
            Operator::Cmyk(_, cmyk) => nums(*cmyk),
            Operator::ColorN(_, components) => {
                components.iter().copied().map(Operand::Number).collect()
            }
            Operator::MoveTo(p) | Operator::LineTo(p) => points([*p]),
            Operator::CurveTo(p1, p2, p3) => points([*p1, *p2, *p3]),
            Operator::CurveToInitial(p2, p3) => points([*p2, *p3]),
            Operator::CurveToFinal(p1, p3) => points([*p1, *p3]),
            Operator::Rectangle(x, y, w, h) => nums([*x, *y, *w, *h]),
            Operator::Save
            | Operator::Restore
            | Operator::ClosePath
            | Operator::Stroke
            | Operator::CloseStroke
            | Operator::Fill(_)
            | Operator::FillStroke(_)
            | Operator::CloseFillStroke(_)
            | Operator::EndPath
            | Operator::Clip(_) => Vec::new(),
        }
    }
}

/// Serializes operators into a content-stream buffer, one per line.
#[derive(Debug, Default)]
pub struct ContentWriter {
    buf: String,
    precision: usize,
}

impl ContentWriter {
    pub fn new(precision: usize) -> Self {
        Self {
            buf: String::new(),
            precision,
        }
    }

    pub fn write(&mut self, op: &Operator) {
        for operand in op.operands() {
            operand.write_to(&mut self.buf, self.precision);
            self.buf.push(' ');
        }
        self.buf.push_str(op.token());
        self.buf.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}
