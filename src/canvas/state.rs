//! Graphics state tracked while composing, used to skip redundant operators

use crate::types::{LineCapStyle, LineDashPattern, LineJoinStyle, RenderingIntent};

use super::color::Color;
use super::defaults;
use super::geometry::Matrix;

/// Drawing attributes in effect at one save level
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Current transformation matrix, user space to default space
    pub ctm: Matrix,
    pub line_width: f64,
    pub line_cap: LineCapStyle,
    pub line_join: LineJoinStyle,
    pub miter_limit: f64,
    pub dash: LineDashPattern,
    pub rendering_intent: RenderingIntent,
    pub fill_alpha: f64,
    pub stroke_alpha: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    /// Whether alpha values are read as shape rather than opacity (`AIS`)
    pub alpha_source: bool,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            line_width: defaults::LINE_WIDTH,
            line_cap: defaults::LINE_CAP,
            line_join: defaults::LINE_JOIN,
            miter_limit: defaults::MITER_LIMIT,
            dash: LineDashPattern::solid(),
            rendering_intent: defaults::RENDERING_INTENT,
            fill_alpha: defaults::ALPHA,
            stroke_alpha: defaults::ALPHA,
            fill_color: Color::default(),
            stroke_color: Color::default(),
            alpha_source: false,
        }
    }
}

/// Stack of graphics states; never shallower than the base entry
#[derive(Debug, Clone)]
pub struct StateStack {
    states: Vec<GraphicsState>,
}

impl Default for StateStack {
    fn default() -> Self {
        Self {
            states: vec![GraphicsState::default()],
        }
    }
}

impl StateStack {
    pub fn current(&self) -> &GraphicsState {
        // The base entry is never popped
        &self.states[self.states.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut GraphicsState {
        let top = self.states.len() - 1;
        &mut self.states[top]
    }

    /// Push a copy of the current state
    pub fn push(&mut self) {
        let copy = self.current().clone();
        self.states.push(copy);
    }

    /// Pop the current state; `false` when only the base entry is left
    pub fn pop(&mut self) -> bool {
        if self.states.len() > 1 {
            self.states.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }
}
