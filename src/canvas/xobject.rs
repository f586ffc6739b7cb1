//! Handles for external objects (images and forms) and their placement.

use crate::types::Point;

use super::geometry::Matrix;

/// What kind of external object a handle refers to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XObjectKind {
    /// A raster image; painted into the unit square of user space
    Image { width: f64, height: f64 },
    /// A form; painted in its own bounding box `[llx, lly, urx, ury]`
    Form { bbox: [f64; 4] },
}

/// An opaque handle to an image or form owned by the surrounding document
#[derive(Debug, Clone, PartialEq)]
pub struct XObject {
    /// Identity of the object in the document
    pub id: u64,
    pub kind: XObjectKind,
}

impl XObject {
    pub fn new(id: u64, kind: XObjectKind) -> Self {
        Self { id, kind }
    }

    pub fn image(id: u64, width: f64, height: f64) -> Self {
        Self::new(id, XObjectKind::Image { width, height })
    }

    pub fn form(id: u64, bbox: [f64; 4]) -> Self {
        Self::new(id, XObjectKind::Form { bbox })
    }

    /// Intrinsic width and height
    pub fn size(&self) -> (f64, f64) {
        match self.kind {
            XObjectKind::Image { width, height } => (width, height),
            XObjectKind::Form { bbox } => (bbox[2] - bbox[0], bbox[3] - bbox[1]),
        }
    }

    /// The matrix that paints this object with its origin at `at`, sized
    /// `width` x `height` (each defaulting to the intrinsic size).
    pub fn placement(&self, at: Point, width: Option<f64>, height: Option<f64>) -> Matrix {
        let (iw, ih) = self.size();
        let width = width.unwrap_or(iw);
        let height = height.unwrap_or(ih);

        match self.kind {
            XObjectKind::Image { .. } => Matrix::new(width, 0.0, 0.0, height, at.x, at.y),
            XObjectKind::Form { bbox } => {
                let sx = if iw == 0.0 { 1.0 } else { width / iw };
                let sy = if ih == 0.0 { 1.0 } else { height / ih };
                Matrix::new(sx, 0.0, 0.0, sy, at.x - bbox[0] * sx, at.y - bbox[1] * sy)
            }
        }
    }
}
