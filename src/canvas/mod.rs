//! The canvas: turns drawing calls into content-stream operators.
//!
//! A [`Canvas`] borrows a [`DrawingContext`] (a page or a form) for its whole
//! lifetime. Resources are registered into the context as they are needed;
//! the composed content stream is handed to the context when the canvas is
//! finished or dropped.
//!
//! ```
//! use quire::canvas::{Canvas, CanvasConfig, ContentStrategy, DrawingContext, Page};
//! use quire::types::FillRule;
//!
//! let mut page = Page::default();
//! let mut canvas = Canvas::new(&mut page, ContentStrategy::Replace, CanvasConfig::default())?;
//! canvas.scoped(|c| {
//!     c.set_fill_color([255.0, 0.0, 0.0])?;
//!     c.rectangle(10.0, 10.0, 100.0, 50.0, 0.0).fill(FillRule::NonZero);
//!     Ok(())
//! })?;
//! canvas.finish();
//! assert_eq!(page.contents(), "q\n1 0 0 rg\n10 10 100 50 re\nf\nQ\n");
//! # Ok::<(), quire::CanvasError>(())
//! ```

pub mod arc;
pub mod color;
pub mod context;
pub mod defaults;
pub mod geometry;
pub mod graphic_object;
pub mod operator;
mod path;
mod properties;
pub mod resources;
pub mod state;
pub mod xobject;

use std::ops::{Deref, DerefMut};

use crate::errors::{CanvasError, Result};
use crate::types::Point;

pub use arc::{ArcParams, ArcPath, CubicSegment, approximate_arc};
pub use color::{Color, ColorSpaceDef, ColorSpec};
pub use context::{CanvasConfig, ContentStrategy, DrawingContext, Form, Page};
pub use geometry::{KAPPA, Matrix};
pub use graphic_object::{Arc, Drawable, GraphicObject, GraphicOptions, SolidArc};
pub use operator::{ContentWriter, Operator, PaintTarget};
pub use properties::Opacity;
pub use resources::{ExtGState, ResourceCategory, Resources};
pub use state::{GraphicsState, StateStack};
pub use xobject::{XObject, XObjectKind};

/// Composes a content stream for one page or form
pub struct Canvas<'a> {
    context: &'a mut dyn DrawingContext,
    states: StateStack,
    writer: ContentWriter,
    config: CanvasConfig,
}

impl<'a> Canvas<'a> {
    /// Bind a canvas to `context`.
    ///
    /// Only [`ContentStrategy::Replace`] is supported; it discards whatever
    /// content the context already has.
    pub fn new(
        context: &'a mut dyn DrawingContext,
        strategy: ContentStrategy,
        config: CanvasConfig,
    ) -> Result<Self> {
        if strategy != ContentStrategy::Replace {
            crate::log::warn!(strategy = strategy.name(), "unsupported content strategy");
            return Err(CanvasError::UnsupportedStrategy {
                strategy: strategy.name(),
            });
        }

        context.set_contents(String::new());
        let config = CanvasConfig {
            max_arc_curves: config.max_arc_curves.max(1),
            ..config
        };

        Ok(Self {
            context,
            states: StateStack::default(),
            writer: ContentWriter::new(config.precision),
            config,
        })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The resource dictionary of the bound context
    pub fn resources(&self) -> &Resources {
        self.context.resources()
    }

    /// Content emitted so far
    pub fn contents(&self) -> &str {
        self.writer.as_str()
    }

    /// The graphics state in effect
    pub fn graphics_state(&self) -> &GraphicsState {
        self.states.current()
    }

    /// Number of graphics states on the stack, including the base entry
    pub fn graphics_state_depth(&self) -> usize {
        self.states.depth()
    }

    /// Hand the composed content to the context.
    ///
    /// Dropping the canvas does the same; this only makes the point explicit.
    pub fn finish(self) {}

    pub(crate) fn emit(&mut self, op: Operator) {
        self.writer.write(&op);
    }

    pub(crate) fn resources_mut(&mut self) -> &mut Resources {
        self.context.resources_mut()
    }

    // ========================================================================
    // Save / restore
    // ========================================================================

    /// Push a copy of the current state and emit `q`
    pub fn save_graphics_state(&mut self) -> &mut Self {
        self.emit(Operator::Save);
        self.states.push();
        self
    }

    /// Emit `Q` and pop the current state
    pub fn restore_graphics_state(&mut self) -> Result<&mut Self> {
        if self.states.depth() <= 1 {
            return Err(CanvasError::StackUnderflow);
        }
        self.emit(Operator::Restore);
        self.states.pop();
        Ok(self)
    }

    /// Save the state and return a guard that restores it when dropped
    pub fn guard(&mut self) -> StateGuard<'_, 'a> {
        let depth = self.states.depth();
        self.save_graphics_state();
        StateGuard {
            canvas: self,
            depth,
        }
    }

    /// Run `body` between `q` and `Q`.
    ///
    /// The `Q` is emitted on every exit from `body`. When `body` fails, its
    /// error is returned after the state has been restored.
    pub fn scoped<F>(&mut self, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        {
            let mut guard = self.guard();
            body(&mut guard)?;
        }
        Ok(self)
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    /// Concatenate `(a, b, c, d, e, f)` with the current transformation
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.concat(Matrix::new(a, b, c, d, e, f))
    }

    /// Concatenate `matrix` with the current transformation
    pub fn concat(&mut self, matrix: Matrix) -> &mut Self {
        self.emit(Operator::Transform(matrix));
        let state = self.states.current_mut();
        state.ctm = matrix.then(state.ctm);
        self
    }

    /// Run `body` in a saved state with `matrix` applied
    pub fn with_transform<F>(&mut self, matrix: impl Into<Option<Matrix>>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        let matrix = matrix.into().ok_or(CanvasError::MissingScopedValue {
            property: "transformation matrix",
        })?;
        self.scoped(|c| {
            c.concat(matrix);
            body(c)
        })
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.concat(Matrix::translation(dx, dy))
    }

    pub fn with_translate<F>(&mut self, dx: f64, dy: f64, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        self.with_transform(Matrix::translation(dx, dy), body)
    }

    /// Rotate counterclockwise by `angle` degrees about `origin`
    pub fn rotate(&mut self, angle: f64, origin: impl Into<Option<Point>>) -> &mut Self {
        self.concat(Matrix::rotation(angle, origin.into()))
    }

    pub fn with_rotate<F>(&mut self, angle: f64, origin: impl Into<Option<Point>>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        self.with_transform(Matrix::rotation(angle, origin.into()), body)
    }

    /// Scale by `sx` and `sy` (defaulting to `sx`) keeping `origin` fixed
    pub fn scale(&mut self, sx: f64, sy: impl Into<Option<f64>>, origin: impl Into<Option<Point>>) -> &mut Self {
        let sy = sy.into().unwrap_or(sx);
        self.concat(Matrix::scaling(sx, sy, origin.into()))
    }

    pub fn with_scale<F>(
        &mut self,
        sx: f64,
        sy: impl Into<Option<f64>>,
        origin: impl Into<Option<Point>>,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        let sy = sy.into().unwrap_or(sx);
        self.with_transform(Matrix::scaling(sx, sy, origin.into()), body)
    }

    /// Skew the x axis by `a` degrees and the y axis by `b` degrees about `origin`
    pub fn skew(&mut self, a: f64, b: f64, origin: impl Into<Option<Point>>) -> &mut Self {
        self.concat(Matrix::skew(a, b, origin.into()))
    }

    pub fn with_skew<F>(&mut self, a: f64, b: f64, origin: impl Into<Option<Point>>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Canvas<'a>) -> Result<()>,
    {
        self.with_transform(Matrix::skew(a, b, origin.into()), body)
    }

    // ========================================================================
    // External objects
    // ========================================================================

    /// Paint an image or form with its origin at `at`.
    ///
    /// `width` and `height` default to the object's intrinsic size, each on
    /// its own. Emits `q cm Do Q`.
    pub fn xobject(
        &mut self,
        object: &XObject,
        at: Point,
        width: impl Into<Option<f64>>,
        height: impl Into<Option<f64>>,
    ) -> &mut Self {
        let name = self.resources_mut().register_xobject(object.clone());
        let matrix = object.placement(at, width.into(), height.into());
        {
            let mut guard = self.guard();
            guard.concat(matrix);
            guard.emit(Operator::PaintXObject(name));
        }
        self
    }

    // ========================================================================
    // Graphic objects
    // ========================================================================

    /// A fresh graphic object of kind `name`, configured with `options`.
    ///
    /// The arc segment limit starts out as the canvas's `max_arc_curves`.
    pub fn graphic_object(&self, name: &str, options: &GraphicOptions) -> Result<GraphicObject> {
        let mut object = GraphicObject::from_name(name)?;
        object.configure(&GraphicOptions::default().max_curves(self.config.max_arc_curves));
        object.configure(options);
        Ok(object)
    }

    /// Reconfigure an existing graphic object in place
    pub fn configure_object<'o>(
        &self,
        object: &'o mut GraphicObject,
        options: &GraphicOptions,
    ) -> &'o mut GraphicObject {
        object.configure(options);
        object
    }

    /// Create the graphic object `name` and draw it
    pub fn draw(&mut self, name: &str, options: &GraphicOptions) -> Result<&mut Self> {
        let object = self.graphic_object(name, options)?;
        self.draw_object(&object)
    }

    pub fn draw_object(&mut self, object: &GraphicObject) -> Result<&mut Self> {
        object.draw(self)?;
        Ok(self)
    }
}

impl Drop for Canvas<'_> {
    fn drop(&mut self) {
        if self.states.depth() > 1 {
            crate::log::warn!(
                open = self.states.depth() - 1,
                "canvas finished with unrestored graphics states"
            );
        }
        self.context.set_contents(self.writer.take());
    }
}

/// Restores the graphics state saved by [`Canvas::guard`] when dropped.
///
/// Saves left open inside the guarded region are closed as well, so the
/// stream is balanced on every exit path.
pub struct StateGuard<'c, 'a> {
    canvas: &'c mut Canvas<'a>,
    depth: usize,
}

impl<'a> Deref for StateGuard<'_, 'a> {
    type Target = Canvas<'a>;

    fn deref(&self) -> &Self::Target {
        self.canvas
    }
}

impl<'a> DerefMut for StateGuard<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.canvas
    }
}

impl Drop for StateGuard<'_, '_> {
    fn drop(&mut self) {
        let dangling = self.canvas.states.depth().saturating_sub(self.depth + 1);
        if dangling > 0 {
            crate::log::warn!(dangling, "closing graphics states left open in a scoped block");
        }
        while self.canvas.states.depth() > self.depth {
            self.canvas.emit(Operator::Restore);
            self.canvas.states.pop();
        }
    }
}
