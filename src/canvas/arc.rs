//! Elliptical arcs approximated by cubic Bézier curves.
//!
//! The angular span is cut into at most `max_curves` equal segments of
//! preferably no more than 90°. A segment of width `w` uses the control-point
//! ratio `k = 4/3 · tan(w/4)`, which is [`KAPPA`](super::geometry::KAPPA) for
//! a quarter turn.

use glam::{DAffine2, DVec2, dvec2};

use crate::types::{Point, pt};

/// Parameters of an elliptical arc. Angles are in degrees, measured
/// counterclockwise from the positive x axis of the (inclined) ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub center: Point,
    /// Semi-axis along x
    pub a: f64,
    /// Semi-axis along y
    pub b: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
    /// Rotation of the ellipse in degrees
    pub inclination: f64,
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            a: 1.0,
            b: 1.0,
            start_angle: 0.0,
            end_angle: 360.0,
            clockwise: false,
            inclination: 0.0,
        }
    }
}

impl ArcParams {
    /// A full circle
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::ellipse(cx, cy, radius, radius)
    }

    /// A full ellipse
    pub fn ellipse(cx: f64, cy: f64, a: f64, b: f64) -> Self {
        Self {
            center: pt(cx, cy),
            a,
            b,
            ..Self::default()
        }
    }

    pub fn with_angles(mut self, start: f64, end: f64) -> Self {
        self.start_angle = start;
        self.end_angle = end;
        self
    }

    pub fn with_clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    pub fn with_inclination(mut self, inclination: f64) -> Self {
        self.inclination = inclination;
        self
    }

    /// Swept angle in degrees, in `[0, 360]`, following the arc direction.
    ///
    /// A non-zero span that is a whole number of turns is a full turn.
    pub fn span(&self) -> f64 {
        let raw = if self.clockwise {
            self.start_angle - self.end_angle
        } else {
            self.end_angle - self.start_angle
        };
        let span = raw.rem_euclid(360.0);
        if span == 0.0 && raw != 0.0 { 360.0 } else { span }
    }

    /// Maps the unit circle onto this ellipse
    fn frame(&self) -> DAffine2 {
        DAffine2::from_translation(self.center)
            * DAffine2::from_angle(self.inclination.to_radians())
            * DAffine2::from_scale(dvec2(self.a, self.b))
    }

    /// The point on the ellipse at `angle` degrees
    pub fn point_at(&self, angle: f64) -> Point {
        self.frame().transform_point2(unit(angle.to_radians()))
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }
}

/// One cubic segment; its start is the previous segment's end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// The tessellation of one arc: a start point and the curves that follow it
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPath {
    pub start: Point,
    pub curves: Vec<CubicSegment>,
}

impl ArcPath {
    pub fn end(&self) -> Point {
        self.curves.last().map(|c| c.p3).unwrap_or(self.start)
    }
}

fn unit(theta: f64) -> DVec2 {
    dvec2(theta.cos(), theta.sin())
}

fn tangent(theta: f64) -> DVec2 {
    dvec2(-theta.sin(), theta.cos())
}

/// Number of Bézier segments used for an arc spanning `span` degrees
pub fn segment_count(span: f64, max_curves: usize) -> usize {
    let wanted = (span / 90.0).ceil() as usize;
    wanted.clamp(1, max_curves.max(1))
}

/// Approximate the arc described by `params` with cubic Bézier curves.
pub fn approximate_arc(params: &ArcParams, max_curves: usize) -> ArcPath {
    let span = params.span();
    let count = segment_count(span, max_curves);
    let direction = if params.clockwise { -1.0 } else { 1.0 };
    let step = direction * (span / count as f64).to_radians();
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let frame = params.frame();
    let start = params.start_angle.to_radians();

    let curves = (0..count)
        .map(|i| {
            let t0 = start + step * i as f64;
            let t1 = t0 + step;
            let p0 = unit(t0);
            let p3 = unit(t1);
            CubicSegment {
                p1: frame.transform_point2(p0 + tangent(t0) * k),
                p2: frame.transform_point2(p3 - tangent(t1) * k),
                p3: frame.transform_point2(p3),
            }
        })
        .collect();

    ArcPath {
        start: frame.transform_point2(unit(start)),
        curves,
    }
}
