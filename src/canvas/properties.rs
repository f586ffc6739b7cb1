//! Graphics-state properties: line style, rendering intent, colors and opacity.
//!
//! Every setter compares the new value with the current state and emits an
//! operator only when they differ. The `with_*` variants always wrap their
//! block in `q`/`Q`, and fail when given no value to scope.

use crate::errors::{CanvasError, Result};
use crate::types::{LineCapStyle, LineDashPattern, LineJoinStyle, RenderingIntent};

use super::Canvas;
use super::color::{Color, ColorSpec};
use super::operator::{Operator, PaintTarget};
use super::resources::ExtGState;
use super::state::GraphicsState;

/// Current fill and stroke alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity {
    pub fill_alpha: f64,
    pub stroke_alpha: f64,
}

/// Getter, setter and scoped setter for a property backed by one state field
macro_rules! scalar_property {
    (
        $(#[$doc:meta])*
        $get:ident, $set:ident, $with:ident: $ty:ty => $field:ident, $op:path, $label:literal
    ) => {
        $(#[$doc])*
        pub fn $get(&self) -> $ty {
            self.states.current().$field.clone()
        }

        pub fn $set(&mut self, value: $ty) -> &mut Self {
            self.set_property(value, |state| &mut state.$field, $op)
        }

        pub fn $with<F>(&mut self, value: impl Into<Option<$ty>>, body: F) -> Result<&mut Self>
        where
            F: FnOnce(&mut Self) -> Result<()>,
        {
            let value = value
                .into()
                .ok_or(CanvasError::MissingScopedValue { property: $label })?;
            self.scoped(|c| {
                c.$set(value);
                body(c)
            })
        }
    };
}

impl<'a> Canvas<'a> {
    /// Store `value` in the state slot and emit `op(value)`, unless the slot
    /// already holds an equal value.
    fn set_property<T: PartialEq + Clone>(
        &mut self,
        value: T,
        slot: fn(&mut GraphicsState) -> &mut T,
        op: fn(T) -> Operator,
    ) -> &mut Self {
        let current = slot(self.states.current_mut());
        if *current != value {
            *current = value.clone();
            self.emit(op(value));
        }
        self
    }

    scalar_property! {
        /// Line width in user-space units
        line_width, set_line_width, with_line_width: f64 => line_width, Operator::LineWidth, "line width"
    }

    scalar_property! {
        line_cap_style, set_line_cap_style, with_line_cap_style: LineCapStyle => line_cap, Operator::LineCap, "line cap style"
    }

    scalar_property! {
        line_join_style, set_line_join_style, with_line_join_style: LineJoinStyle => line_join, Operator::LineJoin, "line join style"
    }

    scalar_property! {
        miter_limit, set_miter_limit, with_miter_limit: f64 => miter_limit, Operator::MiterLimit, "miter limit"
    }

    scalar_property! {
        /// Dash pattern; an empty pattern draws solid lines
        line_dash_pattern, set_line_dash_pattern, with_line_dash_pattern: LineDashPattern => dash, Operator::Dash, "line dash pattern"
    }

    scalar_property! {
        rendering_intent, set_rendering_intent, with_rendering_intent: RenderingIntent => rendering_intent, Operator::RenderingIntent, "rendering intent"
    }

    // ========================================================================
    // Colors
    // ========================================================================

    pub fn stroke_color(&self) -> &Color {
        &self.states.current().stroke_color
    }

    pub fn fill_color(&self) -> &Color {
        &self.states.current().fill_color
    }

    /// Set the stroking color; see [`ColorSpec`] for the accepted shapes.
    ///
    /// An empty component list leaves the color untouched.
    pub fn set_stroke_color(&mut self, color: impl Into<ColorSpec>) -> Result<&mut Self> {
        self.set_color(PaintTarget::Stroke, color.into())
    }

    pub fn set_fill_color(&mut self, color: impl Into<ColorSpec>) -> Result<&mut Self> {
        self.set_color(PaintTarget::Fill, color.into())
    }

    pub fn with_stroke_color<F>(&mut self, color: impl Into<ColorSpec>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        self.with_color(PaintTarget::Stroke, color.into(), body)
    }

    pub fn with_fill_color<F>(&mut self, color: impl Into<ColorSpec>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        self.with_color(PaintTarget::Fill, color.into(), body)
    }

    fn with_color<F>(&mut self, target: PaintTarget, spec: ColorSpec, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        if spec.is_empty() {
            return Err(CanvasError::MissingScopedValue {
                property: match target {
                    PaintTarget::Stroke => "stroke color",
                    PaintTarget::Fill => "fill color",
                },
            });
        }
        let color = Color::from_spec(spec)?;
        self.scoped(|c| {
            c.apply_color(target, color);
            body(c)
        })
    }

    fn set_color(&mut self, target: PaintTarget, spec: ColorSpec) -> Result<&mut Self> {
        if spec.is_empty() {
            return Ok(self);
        }
        let color = Color::from_spec(spec)?;
        self.apply_color(target, color);
        Ok(self)
    }

    fn apply_color(&mut self, target: PaintTarget, color: Color) {
        let state = self.states.current();
        let current = match target {
            PaintTarget::Stroke => &state.stroke_color,
            PaintTarget::Fill => &state.fill_color,
        };
        if *current == color {
            return;
        }
        let space_changed = current.named_space() != color.named_space();

        match &color {
            Color::Gray(g) => self.emit(Operator::Gray(target, *g)),
            Color::Rgb(r, g, b) => self.emit(Operator::Rgb(target, [*r, *g, *b])),
            Color::Cmyk(c, m, y, k) => self.emit(Operator::Cmyk(target, [*c, *m, *y, *k])),
            Color::Named { space, components } => {
                if space_changed {
                    let name = self.resources_mut().register_color_space(space.clone());
                    self.emit(Operator::ColorSpace(target, name));
                }
                self.emit(Operator::ColorN(target, components.clone()));
            }
        }

        let state = self.states.current_mut();
        match target {
            PaintTarget::Stroke => state.stroke_color = color,
            PaintTarget::Fill => state.fill_color = color,
        }
    }

    // ========================================================================
    // Opacity
    // ========================================================================

    pub fn opacity(&self) -> Opacity {
        let state = self.states.current();
        Opacity {
            fill_alpha: state.fill_alpha,
            stroke_alpha: state.stroke_alpha,
        }
    }

    /// Set fill and/or stroke alpha through an `ExtGState` resource.
    ///
    /// A missing value keeps the current alpha. Nothing is emitted when
    /// neither alpha changes.
    pub fn set_opacity(
        &mut self,
        fill_alpha: impl Into<Option<f64>>,
        stroke_alpha: impl Into<Option<f64>>,
    ) -> &mut Self {
        let state = self.states.current();
        let fill_alpha = fill_alpha.into().unwrap_or(state.fill_alpha);
        let stroke_alpha = stroke_alpha.into().unwrap_or(state.stroke_alpha);
        if fill_alpha == state.fill_alpha && stroke_alpha == state.stroke_alpha {
            return self;
        }

        let ext_gstate = ExtGState {
            stroke_alpha,
            fill_alpha,
            alpha_source: state.alpha_source,
        };
        let name = self.resources_mut().register_ext_gstate(ext_gstate);
        self.emit(Operator::GraphicsStateParams(name));

        let state = self.states.current_mut();
        state.fill_alpha = fill_alpha;
        state.stroke_alpha = stroke_alpha;
        self
    }

    pub fn with_opacity<F>(
        &mut self,
        fill_alpha: impl Into<Option<f64>>,
        stroke_alpha: impl Into<Option<f64>>,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        let (fill_alpha, stroke_alpha) = (fill_alpha.into(), stroke_alpha.into());
        if fill_alpha.is_none() && stroke_alpha.is_none() {
            return Err(CanvasError::MissingScopedValue { property: "opacity" });
        }
        self.scoped(|c| {
            c.set_opacity(fill_alpha, stroke_alpha);
            body(c)
        })
    }
}
