//! Error types with diagnostics using miette
//!
//! Every failure the canvas can report is a variant of [`CanvasError`]. A call
//! that fails never writes a partial operator to the content stream.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = CanvasError> = std::result::Result<T, E>;

// ============================================================================
// Canvas Errors
// ============================================================================

/// Errors raised by the canvas and its helpers
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CanvasError {
    #[error("unsupported content strategy: {strategy}")]
    #[diagnostic(
        code(quire::canvas::unsupported_strategy),
        help("only the `replace` strategy is implemented")
    )]
    UnsupportedStrategy { strategy: &'static str },

    #[error("a scoped block needs a value for {property}")]
    #[diagnostic(
        code(quire::canvas::missing_scoped_value),
        help("pass a value to scope, or call the block through `scoped` instead")
    )]
    MissingScopedValue { property: &'static str },

    #[error("curve_to needs at least one control point")]
    #[diagnostic(code(quire::canvas::missing_control_point))]
    MissingControlPoint,

    #[error("{operation} needs at least two points, got {count} coordinates")]
    #[diagnostic(code(quire::canvas::too_few_points))]
    TooFewPoints {
        operation: &'static str,
        count: usize,
    },

    #[error("{operation} is missing the y coordinate of its last point")]
    #[diagnostic(code(quire::canvas::odd_coordinates))]
    OddCoordinates { operation: &'static str },

    #[error("invalid color: {message}")]
    #[diagnostic(
        code(quire::canvas::invalid_color),
        help("use 1 (gray), 3 (RGB) or 4 (CMYK) components, a hex string, or a color name")
    )]
    InvalidColor { message: String },

    #[error("cannot restore the base graphics state")]
    #[diagnostic(
        code(quire::canvas::stack_underflow),
        help("every restore must be matched by an earlier save")
    )]
    StackUnderflow,

    #[error("unknown graphic object: {name}")]
    #[diagnostic(
        code(quire::canvas::unknown_graphic_object),
        help("known graphic objects are `arc` and `solid_arc`")
    )]
    UnknownGraphicObject { name: String },

    #[error("content stream parse error: {message}")]
    #[diagnostic(code(quire::parse::invalid_content))]
    Parse { message: String },
}

impl CanvasError {
    pub(crate) fn invalid_color(message: impl Into<String>) -> Self {
        CanvasError::InvalidColor {
            message: message.into(),
        }
    }
}
