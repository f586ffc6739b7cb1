//! Affine matrices and the small amount of planar geometry the path builder
//! needs (points along a segment, rounded corners).

use glam::{DAffine2, DVec2, dvec2};

use crate::types::Point;

/// Control-point offset ratio of a cubic Bézier approximating a quarter circle.
pub const KAPPA: f64 = 0.552_284_749_830_793_4;

/// A 2D affine transform `(a, b, c, d, e, f)`.
///
/// Maps `x' = a·x + c·y + e` and `y' = b·x + d·y + f`, which is the operand
/// order of the `cm` operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(DAffine2);

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix(DAffine2::IDENTITY);

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Matrix(DAffine2::from_cols_array(&[a, b, c, d, e, f]))
    }

    /// The six components in `cm` operand order
    pub fn components(&self) -> [f64; 6] {
        self.0.to_cols_array()
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Matrix(DAffine2::from_translation(dvec2(dx, dy)))
    }

    /// Counterclockwise rotation by `angle` degrees about `origin`
    pub fn rotation(angle: f64, origin: Option<Point>) -> Self {
        Matrix(DAffine2::from_angle(angle.to_radians())).around(origin)
    }

    /// Scaling by `(sx, sy)` keeping `origin` fixed
    pub fn scaling(sx: f64, sy: f64, origin: Option<Point>) -> Self {
        Matrix(DAffine2::from_scale(dvec2(sx, sy))).around(origin)
    }

    /// Skew: the x axis is tilted by `a` degrees, the y axis by `b` degrees,
    /// giving `(1, tan a, tan b, 1)` about `origin`.
    pub fn skew(a: f64, b: f64, origin: Option<Point>) -> Self {
        let tan_a = a.to_radians().tan();
        let tan_b = b.to_radians().tan();
        Matrix::new(1.0, tan_a, tan_b, 1.0, 0.0, 0.0).around(origin)
    }

    /// Conjugate with a translation so that `origin` maps onto itself
    fn around(self, origin: Option<Point>) -> Self {
        match origin {
            Some(o) if o != DVec2::ZERO => Matrix(
                DAffine2::from_translation(o) * self.0 * DAffine2::from_translation(-o),
            ),
            _ => self,
        }
    }

    /// `self` followed by `next`
    pub fn then(self, next: Matrix) -> Matrix {
        Matrix(next.0 * self.0)
    }

    pub fn apply(&self, p: Point) -> Point {
        self.0.transform_point2(p)
    }
}

/// The point `distance` away from `from` in the direction of `to`
pub fn point_on_line(from: Point, to: Point, distance: f64) -> Point {
    from + (to - from).normalize_or_zero() * distance
}

/// Geometry of one rounded polygon corner at `corner`, entered from `prev`
/// and left towards `next`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedCorner {
    /// End of the straight segment leading into the corner
    pub line_end: Point,
    pub control1: Point,
    pub control2: Point,
    /// End of the rounding curve, on the outgoing edge
    pub curve_end: Point,
}

impl RoundedCorner {
    pub fn new(prev: Point, corner: Point, next: Point, radius: f64) -> Self {
        let line_end = point_on_line(corner, prev, radius);
        let curve_end = point_on_line(corner, next, radius);
        Self {
            line_end,
            control1: point_on_line(line_end, corner, KAPPA * radius),
            control2: point_on_line(curve_end, corner, KAPPA * radius),
            curve_end,
        }
    }
}
