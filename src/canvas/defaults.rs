//! Default settings and initial graphics-state values

use crate::types::{LineCapStyle, LineJoinStyle, RenderingIntent};

/// Upper bound on the Bézier segments used for one arc
pub const MAX_ARC_CURVES: usize = 4;
/// Decimal digits kept when serializing numbers
pub const PRECISION: usize = 6;

pub const LINE_WIDTH: f64 = 1.0;
pub const LINE_CAP: LineCapStyle = LineCapStyle::Butt;
pub const LINE_JOIN: LineJoinStyle = LineJoinStyle::Miter;
pub const MITER_LIMIT: f64 = 10.0;
pub const RENDERING_INTENT: RenderingIntent = RenderingIntent::RelativeColorimetric;
pub const ALPHA: f64 = 1.0;
