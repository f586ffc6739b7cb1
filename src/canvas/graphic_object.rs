//! Reusable drawable objects, looked up by name.
//!
//! Each kind implements [`Drawable`]; [`GraphicObject`] is the closed set of
//! kinds, dispatched with `enum_dispatch`.

use enum_dispatch::enum_dispatch;

use crate::errors::{CanvasError, Result};
use crate::types::{Point, pt};

use super::Canvas;
use super::arc::{ArcParams, approximate_arc};
use super::defaults;
use super::operator::Operator;

/// Settings applied to a graphic object. Unset fields leave the object's
/// current value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicOptions {
    pub center: Option<Point>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub inner_a: Option<f64>,
    pub inner_b: Option<f64>,
    pub start_angle: Option<f64>,
    pub end_angle: Option<f64>,
    pub clockwise: Option<bool>,
    pub inclination: Option<f64>,
    pub max_curves: Option<usize>,
}

impl GraphicOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(mut self, cx: f64, cy: f64) -> Self {
        self.center = Some(pt(cx, cy));
        self
    }

    /// Both semi-axes
    pub fn radius(self, radius: f64) -> Self {
        self.axes(radius, radius)
    }

    pub fn axes(mut self, a: f64, b: f64) -> Self {
        self.a = Some(a);
        self.b = Some(b);
        self
    }

    /// Both inner semi-axes; zero draws a pie instead of a ring sector
    pub fn inner_radius(self, radius: f64) -> Self {
        self.inner_axes(radius, radius)
    }

    pub fn inner_axes(mut self, a: f64, b: f64) -> Self {
        self.inner_a = Some(a);
        self.inner_b = Some(b);
        self
    }

    pub fn angles(mut self, start: f64, end: f64) -> Self {
        self.start_angle = Some(start);
        self.end_angle = Some(end);
        self
    }

    pub fn clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = Some(clockwise);
        self
    }

    pub fn inclination(mut self, degrees: f64) -> Self {
        self.inclination = Some(degrees);
        self
    }

    pub fn max_curves(mut self, max: usize) -> Self {
        self.max_curves = Some(max);
        self
    }

    fn apply_to(&self, params: &mut ArcParams, max_curves: &mut usize) {
        if let Some(center) = self.center {
            params.center = center;
        }
        if let Some(a) = self.a {
            params.a = a;
        }
        if let Some(b) = self.b {
            params.b = b;
        }
        if let Some(start) = self.start_angle {
            params.start_angle = start;
        }
        if let Some(end) = self.end_angle {
            params.end_angle = end;
        }
        if let Some(clockwise) = self.clockwise {
            params.clockwise = clockwise;
        }
        if let Some(inclination) = self.inclination {
            params.inclination = inclination;
        }
        if let Some(max) = self.max_curves {
            *max_curves = max.max(1);
        }
    }
}

/// Something that can be configured and drawn onto a canvas
#[enum_dispatch]
pub trait Drawable {
    /// Apply the set fields of `options`
    fn configure(&mut self, options: &GraphicOptions);

    /// Append this object's path to the canvas. Painting is left to the
    /// caller.
    fn draw(&self, canvas: &mut Canvas<'_>) -> Result<()>;
}

/// The graphic object kinds known by name
#[enum_dispatch(Drawable)]
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicObject {
    Arc(Arc),
    SolidArc(SolidArc),
}

impl GraphicObject {
    /// A fresh object of the kind registered under `name`
    pub fn from_name(name: &str) -> Result<Self> {
        crate::log::debug!(kind = name, "graphic object lookup");
        match name {
            "arc" => Ok(Arc::default().into()),
            "solid_arc" => Ok(SolidArc::default().into()),
            _ => Err(CanvasError::UnknownGraphicObject {
                name: name.to_string(),
            }),
        }
    }
}

/// An open elliptical arc
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub params: ArcParams,
    pub max_curves: usize,
}

impl Default for Arc {
    fn default() -> Self {
        Self {
            params: ArcParams::default(),
            max_curves: defaults::MAX_ARC_CURVES,
        }
    }
}

impl Drawable for Arc {
    fn configure(&mut self, options: &GraphicOptions) {
        options.apply_to(&mut self.params, &mut self.max_curves);
    }

    fn draw(&self, canvas: &mut Canvas<'_>) -> Result<()> {
        let path = approximate_arc(&self.params, self.max_curves);
        canvas.emit(Operator::MoveTo(path.start));
        canvas.append_curves(&path);
        Ok(())
    }
}

/// A closed arc sector: a pie slice when the inner axes are zero, otherwise
/// the region between two concentric arcs
#[derive(Debug, Clone, PartialEq)]
pub struct SolidArc {
    pub outer: ArcParams,
    pub inner_a: f64,
    pub inner_b: f64,
    pub max_curves: usize,
}

impl Default for SolidArc {
    fn default() -> Self {
        Self {
            outer: ArcParams::default(),
            inner_a: 0.0,
            inner_b: 0.0,
            max_curves: defaults::MAX_ARC_CURVES,
        }
    }
}

impl SolidArc {
    /// The inner arc, traversed from the outer arc's end back to its start
    fn inner(&self) -> ArcParams {
        ArcParams {
            a: self.inner_a,
            b: self.inner_b,
            start_angle: self.outer.end_angle,
            end_angle: self.outer.start_angle,
            clockwise: !self.outer.clockwise,
            ..self.outer
        }
    }
}

impl Drawable for SolidArc {
    fn configure(&mut self, options: &GraphicOptions) {
        options.apply_to(&mut self.outer, &mut self.max_curves);
        if let Some(a) = options.inner_a {
            self.inner_a = a;
        }
        if let Some(b) = options.inner_b {
            self.inner_b = b;
        }
    }

    fn draw(&self, canvas: &mut Canvas<'_>) -> Result<()> {
        let outer = approximate_arc(&self.outer, self.max_curves);
        canvas.emit(Operator::MoveTo(outer.start));
        canvas.append_curves(&outer);

        if self.inner_a == 0.0 && self.inner_b == 0.0 {
            canvas.emit(Operator::LineTo(self.outer.center));
        } else {
            let inner = approximate_arc(&self.inner(), self.max_curves);
            canvas.emit(Operator::LineTo(inner.start));
            canvas.append_curves(&inner);
        }
        canvas.emit(Operator::ClosePath);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasConfig, ContentStrategy, DrawingContext, Page};

    fn ops(content: &str) -> Vec<&str> {
        content
            .lines()
            .map(|l| l.rsplit(' ').next().unwrap_or(l))
            .collect()
    }

    #[test]
    fn lookup_by_name() {
        assert!(matches!(
            GraphicObject::from_name("arc"),
            Ok(GraphicObject::Arc(_))
        ));
        assert!(matches!(
            GraphicObject::from_name("solid_arc"),
            Ok(GraphicObject::SolidArc(_))
        ));
        assert_eq!(
            GraphicObject::from_name("star").err(),
            Some(CanvasError::UnknownGraphicObject {
                name: "star".to_string()
            })
        );
    }

    #[test]
    fn configure_leaves_unset_fields() {
        let mut arc = Arc::default();
        arc.configure(&GraphicOptions::new().radius(5.0));
        arc.configure(&GraphicOptions::new().angles(0.0, 90.0).max_curves(0));
        assert_eq!(arc.params.a, 5.0);
        assert_eq!(arc.params.end_angle, 90.0);
        assert_eq!(arc.max_curves, 1);
    }

    #[test]
    fn canvas_seeds_max_curves_from_config() {
        let mut page = Page::default();
        let config = CanvasConfig::default().with_max_arc_curves(2);
        let canvas = Canvas::new(&mut page, ContentStrategy::Replace, config).unwrap();
        let object = canvas
            .graphic_object("arc", &GraphicOptions::new().radius(3.0))
            .unwrap();
        let GraphicObject::Arc(arc) = object else {
            panic!("expected an arc");
        };
        assert_eq!(arc.max_curves, 2);
        assert_eq!(arc.params.b, 3.0);
    }

    #[test]
    fn reconfigured_objects_are_reused() {
        let mut page = Page::default();
        let mut canvas =
            Canvas::new(&mut page, ContentStrategy::Replace, CanvasConfig::default()).unwrap();
        let mut object = canvas
            .graphic_object("arc", &GraphicOptions::new().radius(10.0).angles(0.0, 90.0))
            .unwrap();
        canvas.draw_object(&object).unwrap();
        canvas.configure_object(&mut object, &GraphicOptions::new().center(100.0, 0.0));
        canvas.draw_object(&object).unwrap();
        canvas.finish();
        assert_eq!(ops(page.contents()), ["m", "c", "m", "c"]);
        assert!(page.contents().contains("110 0 m\n"));
    }

    #[test]
    fn pie_returns_through_the_center() {
        let mut page = Page::default();
        let mut canvas =
            Canvas::new(&mut page, ContentStrategy::Replace, CanvasConfig::default()).unwrap();
        canvas
            .draw(
                "solid_arc",
                &GraphicOptions::new().center(0.0, 0.0).radius(10.0).angles(0.0, 90.0),
            )
            .unwrap();
        canvas.finish();
        assert_eq!(ops(page.contents()), ["m", "c", "l", "h"]);
        assert!(page.contents().contains("0 0 l\nh\n"));
    }

    #[test]
    fn ring_sector_walks_the_inner_arc_backwards() {
        let ring = SolidArc {
            outer: ArcParams::circle(0.0, 0.0, 10.0).with_angles(0.0, 180.0),
            inner_a: 5.0,
            inner_b: 5.0,
            max_curves: 4,
        };
        let inner = ring.inner();
        assert!(inner.clockwise);
        assert_eq!(inner.span(), 180.0);

        let mut page = Page::default();
        let mut canvas =
            Canvas::new(&mut page, ContentStrategy::Replace, CanvasConfig::default()).unwrap();
        canvas.draw_object(&ring.into()).unwrap();
        canvas.finish();
        assert_eq!(ops(page.contents()), ["m", "c", "c", "l", "c", "c", "h"]);
        assert!(page.contents().starts_with("10 0 m\n"));
        assert!(page.contents().contains("-5 0 l\n"));
    }
}
