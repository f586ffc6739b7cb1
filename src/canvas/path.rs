//! Path construction and painting.
//!
//! Coordinates are in user space. Polylines and polygons take a flat list
//! `x0, y0, x1, y1, ...`.

use crate::errors::{CanvasError, Result};
use crate::types::{FillRule, Point, pt};

use super::Canvas;
use super::arc::{ArcParams, ArcPath, approximate_arc};
use super::geometry::{RoundedCorner, point_on_line};
use super::operator::Operator;

/// Pair up a flat coordinate list, requiring at least two points
fn points(operation: &'static str, coords: &[f64]) -> Result<Vec<Point>> {
    if coords.len() < 4 {
        return Err(CanvasError::TooFewPoints {
            operation,
            count: coords.len(),
        });
    }
    if coords.len() % 2 != 0 {
        return Err(CanvasError::OddCoordinates { operation });
    }
    Ok(coords.chunks_exact(2).map(|xy| pt(xy[0], xy[1])).collect())
}

impl Canvas<'_> {
    /// Begin a new subpath at `(x, y)`
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.emit(Operator::MoveTo(pt(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.emit(Operator::LineTo(pt(x, y)));
        self
    }

    /// Append a cubic Bézier curve ending at `(x, y)`.
    ///
    /// With only `p1` the end point doubles as the second control point
    /// (`y`); with only `p2` the current point doubles as the first (`v`).
    pub fn curve_to(
        &mut self,
        x: f64,
        y: f64,
        p1: impl Into<Option<Point>>,
        p2: impl Into<Option<Point>>,
    ) -> Result<&mut Self> {
        let end = pt(x, y);
        let op = match (p1.into(), p2.into()) {
            (Some(p1), Some(p2)) => Operator::CurveTo(p1, p2, end),
            (Some(p1), None) => Operator::CurveToFinal(p1, end),
            (None, Some(p2)) => Operator::CurveToInitial(p2, end),
            (None, None) => return Err(CanvasError::MissingControlPoint),
        };
        self.emit(op);
        Ok(self)
    }

    /// A rectangle with its lower-left corner at `(x, y)`.
    ///
    /// A non-zero `radius` rounds the corners.
    pub fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) -> &mut Self {
        if radius == 0.0 {
            self.emit(Operator::Rectangle(x, y, width, height));
        } else {
            let corners = [
                pt(x, y),
                pt(x + width, y),
                pt(x + width, y + height),
                pt(x, y + height),
            ];
            self.rounded_polygon(&corners, radius);
        }
        self
    }

    pub fn close_subpath(&mut self) -> &mut Self {
        self.emit(Operator::ClosePath);
        self
    }

    /// A single straight segment as its own subpath
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.move_to(x1, y1).line_to(x2, y2)
    }

    /// Connected straight segments through every point
    pub fn polyline(&mut self, coords: &[f64]) -> Result<&mut Self> {
        let points = points("polyline", coords)?;
        self.emit_polyline(&points);
        Ok(self)
    }

    /// A closed polygon; a non-zero `radius` rounds every corner
    pub fn polygon(&mut self, coords: &[f64], radius: f64) -> Result<&mut Self> {
        let points = points("polygon", coords)?;
        if radius == 0.0 {
            self.emit_polyline(&points);
            self.emit(Operator::LineTo(points[0]));
            self.emit(Operator::ClosePath);
        } else {
            self.rounded_polygon(&points, radius);
        }
        Ok(self)
    }

    fn emit_polyline(&mut self, points: &[Point]) {
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.emit(Operator::MoveTo(*first));
        }
        for p in iter {
            self.emit(Operator::LineTo(*p));
        }
    }

    /// Each corner becomes a short straight run into a quarter-circle-like
    /// curve; the subpath starts on the first edge and is closed.
    fn rounded_polygon(&mut self, points: &[Point], radius: f64) {
        let n = points.len();
        self.emit(Operator::MoveTo(point_on_line(points[0], points[1], radius)));
        for i in (1..n).chain([0]) {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            let corner = RoundedCorner::new(prev, points[i], next, radius);
            self.emit(Operator::LineTo(corner.line_end));
            self.emit(Operator::CurveTo(corner.control1, corner.control2, corner.curve_end));
        }
        self.emit(Operator::ClosePath);
    }

    // ========================================================================
    // Arcs
    // ========================================================================

    /// An elliptical arc as a new subpath, using at most the configured
    /// number of Bézier segments
    pub fn arc(&mut self, params: &ArcParams) -> &mut Self {
        let path = approximate_arc(params, self.config.max_arc_curves);
        self.emit(Operator::MoveTo(path.start));
        self.append_curves(&path);
        self
    }

    /// A closed circle
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> &mut Self {
        self.arc(&ArcParams::circle(cx, cy, radius)).close_subpath()
    }

    /// A closed ellipse rotated by `inclination` degrees
    pub fn ellipse(&mut self, cx: f64, cy: f64, a: f64, b: f64, inclination: f64) -> &mut Self {
        let params = ArcParams::ellipse(cx, cy, a, b).with_inclination(inclination);
        self.arc(&params).close_subpath()
    }

    /// Emit the curves of `path`, continuing the current subpath
    pub(crate) fn append_curves(&mut self, path: &ArcPath) {
        for c in &path.curves {
            self.emit(Operator::CurveTo(c.p1, c.p2, c.p3));
        }
    }

    // ========================================================================
    // Painting
    // ========================================================================

    pub fn stroke(&mut self) -> &mut Self {
        self.emit(Operator::Stroke);
        self
    }

    pub fn close_stroke(&mut self) -> &mut Self {
        self.emit(Operator::CloseStroke);
        self
    }

    pub fn fill(&mut self, rule: FillRule) -> &mut Self {
        self.emit(Operator::Fill(rule));
        self
    }

    pub fn fill_stroke(&mut self, rule: FillRule) -> &mut Self {
        self.emit(Operator::FillStroke(rule));
        self
    }

    pub fn close_fill_stroke(&mut self, rule: FillRule) -> &mut Self {
        self.emit(Operator::CloseFillStroke(rule));
        self
    }

    /// End the path without painting it
    pub fn end_path(&mut self) -> &mut Self {
        self.emit(Operator::EndPath);
        self
    }

    /// Intersect the clipping path with the current path; a painting
    /// operator must follow
    pub fn clip_path(&mut self, rule: FillRule) -> &mut Self {
        self.emit(Operator::Clip(rule));
        self
    }
}
