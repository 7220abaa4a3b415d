// Layout measurement capability.
//
// The navigator and the chart geometry need two measurements from whatever
// renders the page: where a section sits vertically, and how wide a piece of
// text is. Both go through `LayoutProvider` so the logic runs without a
// browser.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vertical placement of a page element, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(top: f64, height: f64) -> Self {
        SectionBounds { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Font used to measure a text label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: &'static str,
    pub size: f64,
}

impl FontSpec {
    pub const fn sans(size: f64) -> Self {
        FontSpec {
            family: "sans-serif",
            size,
        }
    }
}

pub trait LayoutProvider {
    /// Bounds of the element with the given id, if it is laid out.
    fn section_bounds(&self, id: &str) -> Option<SectionBounds>;

    /// Rendered width of `text` in `font`.
    fn text_width(&self, text: &str, font: &FontSpec) -> f64;
}

/// Average glyph width as a fraction of font size.
pub const DEFAULT_GLYPH_WIDTH: f64 = 0.6;

/// In-memory layout: fixed section bounds and an average-glyph text metric.
#[derive(Debug, Clone)]
pub struct StaticLayout {
    sections: HashMap<String, SectionBounds>,
    glyph_width: f64,
}

impl Default for StaticLayout {
    fn default() -> Self {
        StaticLayout {
            sections: HashMap::new(),
            glyph_width: DEFAULT_GLYPH_WIDTH,
        }
    }
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, id: impl Into<String>, top: f64, height: f64) -> Self {
        self.set_section(id, SectionBounds::new(top, height));
        self
    }

    pub fn with_glyph_width(mut self, glyph_width: f64) -> Self {
        self.glyph_width = glyph_width;
        self
    }

    /// Insert or move a section, e.g. after a reflow.
    pub fn set_section(&mut self, id: impl Into<String>, bounds: SectionBounds) {
        self.sections.insert(id.into(), bounds);
    }

    pub fn remove_section(&mut self, id: &str) -> Option<SectionBounds> {
        self.sections.remove(id)
    }
}

impl LayoutProvider for StaticLayout {
    fn section_bounds(&self, id: &str) -> Option<SectionBounds> {
        self.sections.get(id).copied()
    }

    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        text.chars().count() as f64 * font.size * self.glyph_width
    }
}
