use egui::{Color32, FontFamily, Pos2, Rect, pos2};

use crate::surface::Surface;

/// Extra slack around a label's measured box when hit-testing, so small or
/// thin labels stay grabbable.
pub const HIT_MARGIN: f32 = 5.0;

/// Approximate text height relative to the font pixel size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Font styling for a text label: pixel size, family and styling flags.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub family: FontFamily,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub fn new(size: f32, family: FontFamily) -> Self {
        Self {
            size,
            family,
            bold: false,
            italic: false,
        }
    }

    /// Approximate rendered text height for this font.
    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT_FACTOR
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(14.0, FontFamily::Proportional)
    }
}

/// A positioned, restyleable text annotation.
///
/// `pos` is the baseline origin, matching the fill-text convention of the
/// surface. Two labels may share the same text; identity is the slot in the
/// document, not the content.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Pos2,
    pub font: FontSpec,
    pub color: Color32,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, pos: Pos2, font: FontSpec, color: Color32) -> Self {
        Self {
            text: text.into(),
            pos,
            font,
            color,
        }
    }

    /// The label's hit box: measured width, approximated height, expanded
    /// by a fixed margin. The box hangs above the baseline origin.
    pub fn hit_box<S: Surface>(&self, surface: &S) -> Rect {
        let width = surface.measure_text(&self.text, &self.font);
        let height = self.font.line_height();
        Rect::from_min_max(
            pos2(self.pos.x, self.pos.y - height),
            pos2(self.pos.x + width, self.pos.y),
        )
        .expand(HIT_MARGIN)
    }

    /// Draw this label onto a surface at its current position.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.fill_text(&self.text, self.pos, &self.font, self.color);
    }
}
