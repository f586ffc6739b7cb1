//! Drawing targets and construction-time settings for a canvas

use super::defaults;
use super::resources::Resources;
use super::xobject::XObject;

/// Where a canvas registers resources and delivers its content stream.
///
/// Implemented by the document model's pages and forms; [`Page`] and
/// [`Form`] are minimal in-memory versions.
pub trait DrawingContext {
    fn resources(&self) -> &Resources;
    fn resources_mut(&mut self) -> &mut Resources;
    /// The current content stream
    fn contents(&self) -> &str;
    fn set_contents(&mut self, contents: String);
}

/// How a new canvas treats content already present in its context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentStrategy {
    /// Discard existing content
    #[default]
    Replace,
    /// Keep existing content and draw after it (not supported)
    Append,
    /// Keep existing content and draw before it (not supported)
    Prepend,
}

impl ContentStrategy {
    pub fn name(self) -> &'static str {
        match self {
            ContentStrategy::Replace => "replace",
            ContentStrategy::Append => "append",
            ContentStrategy::Prepend => "prepend",
        }
    }
}

/// Settings fixed when a canvas is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    /// Upper bound on Bézier segments per arc; at least 1
    pub max_arc_curves: usize,
    /// Decimal digits kept when serializing numbers
    pub precision: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_arc_curves: defaults::MAX_ARC_CURVES,
            precision: defaults::PRECISION,
        }
    }
}

impl CanvasConfig {
    pub fn with_max_arc_curves(mut self, max: usize) -> Self {
        self.max_arc_curves = max.max(1);
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

/// A page: a media box, its resources and its content stream
#[derive(Debug, Clone)]
pub struct Page {
    pub media_box: [f64; 4],
    resources: Resources,
    contents: String,
}

impl Page {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            media_box: [0.0, 0.0, width, height],
            resources: Resources::new(),
            contents: String::new(),
        }
    }
}

impl Default for Page {
    /// An A4 page
    fn default() -> Self {
        Self::new(595.0, 842.0)
    }
}

impl DrawingContext for Page {
    fn resources(&self) -> &Resources {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    fn contents(&self) -> &str {
        &self.contents
    }

    fn set_contents(&mut self, contents: String) {
        self.contents = contents;
    }
}

/// A form: self-contained content with a bounding box, placeable on other
/// canvases as an external object
#[derive(Debug, Clone)]
pub struct Form {
    pub id: u64,
    pub bbox: [f64; 4],
    resources: Resources,
    contents: String,
}

impl Form {
    pub fn new(id: u64, bbox: [f64; 4]) -> Self {
        Self {
            id,
            bbox,
            resources: Resources::new(),
            contents: String::new(),
        }
    }

    /// Handle for painting this form with `Canvas::xobject`
    pub fn xobject(&self) -> XObject {
        XObject::form(self.id, self.bbox)
    }
}

impl DrawingContext for Form {
    fn resources(&self) -> &Resources {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    fn contents(&self) -> &str {
        &self.contents
    }

    fn set_contents(&mut self, contents: String) {
        self.contents = contents;
    }
}
