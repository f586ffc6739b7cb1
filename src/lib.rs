//! Compose PDF content streams from drawing calls.
//!
//! A [`Canvas`] turns path, color, transform and placement calls into
//! content-stream operators. It tracks the graphics state so that setting a
//! property to its current value writes nothing, and registers color spaces,
//! transparency parameters and external objects in the page's or form's
//! resource dictionary under stable names.

use pest_derive::Parser;

pub mod canvas;
pub mod errors;
pub mod log;
pub mod parse;
pub mod types;

pub use canvas::{Canvas, CanvasConfig, ContentStrategy, DrawingContext, Form, Page};
pub use errors::{CanvasError, Result};

/// Content stream grammar, used by [`parse::tokenize`]
#[derive(Parser)]
#[grammar = "content.pest"]
pub struct ContentParser;
