//! Resource dictionary shared between a canvas and its page or form.
//!
//! Each category hands out names `PREFIX1`, `PREFIX2`, ... in registration
//! order. Registering a definition equal to one already present returns the
//! existing name.

use std::fmt;

use crate::types::{Name, format_number};

use super::color::ColorSpaceDef;
use super::defaults::PRECISION;
use super::xobject::XObject;

/// The resource categories a canvas registers into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    ColorSpace,
    ExtGState,
    XObject,
}

impl ResourceCategory {
    pub fn prefix(self) -> &'static str {
        match self {
            ResourceCategory::ColorSpace => "CS",
            ResourceCategory::ExtGState => "GS",
            ResourceCategory::XObject => "XO",
        }
    }
}

/// Transparency parameters registered as an `ExtGState` resource
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtGState {
    /// `CA`
    pub stroke_alpha: f64,
    /// `ca`
    pub fill_alpha: f64,
    /// `AIS`
    pub alpha_source: bool,
}

impl fmt::Display for ExtGState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<</Type /ExtGState /CA {} /ca {} /AIS {}>>",
            format_number(self.stroke_alpha, PRECISION),
            format_number(self.fill_alpha, PRECISION),
            self.alpha_source
        )
    }
}

/// Named definitions of one category
#[derive(Debug, Clone)]
pub struct Registry<T> {
    category: ResourceCategory,
    entries: Vec<(Name, T)>,
    next: usize,
}

impl<T: PartialEq> Registry<T> {
    fn new(category: ResourceCategory) -> Self {
        Self {
            category,
            entries: Vec::new(),
            next: 1,
        }
    }

    /// Return the name of an equal definition, or store `value` under a new one
    pub fn register(&mut self, value: T) -> Name {
        if let Some((name, _)) = self.entries.iter().find(|(_, v)| *v == value) {
            crate::log::debug!(category = ?self.category, name = name.as_str(), "reusing resource");
            return name.clone();
        }

        let name = Name::new(format!("{}{}", self.category.prefix(), self.next));
        self.next += 1;
        crate::log::debug!(category = ?self.category, name = name.as_str(), "registered resource");
        self.entries.push((name.clone(), value));
        name
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Entries in name assignment order
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &T)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The resource dictionary of a page or form
#[derive(Debug, Clone)]
pub struct Resources {
    pub color_spaces: Registry<ColorSpaceDef>,
    pub ext_gstates: Registry<ExtGState>,
    pub xobjects: Registry<XObject>,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            color_spaces: Registry::new(ResourceCategory::ColorSpace),
            ext_gstates: Registry::new(ResourceCategory::ExtGState),
            xobjects: Registry::new(ResourceCategory::XObject),
        }
    }
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_color_space(&mut self, space: ColorSpaceDef) -> Name {
        self.color_spaces.register(space)
    }

    pub fn register_ext_gstate(&mut self, state: ExtGState) -> Name {
        self.ext_gstates.register(state)
    }

    pub fn register_xobject(&mut self, xobject: XObject) -> Name {
        self.xobjects.register(xobject)
    }

    /// Names of one category in assignment order
    pub fn names(&self, category: ResourceCategory) -> Vec<&Name> {
        match category {
            ResourceCategory::ColorSpace => self.color_spaces.iter().map(|(n, _)| n).collect(),
            ResourceCategory::ExtGState => self.ext_gstates.iter().map(|(n, _)| n).collect(),
            ResourceCategory::XObject => self.xobjects.iter().map(|(n, _)| n).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.color_spaces.is_empty() && self.ext_gstates.is_empty() && self.xobjects.is_empty()
    }
}
