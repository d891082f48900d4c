use egui::{Color32, Pos2, Vec2};

use crate::label::FontSpec;

/// A drawable pixel surface the overlay paints onto.
///
/// This is the seam between the retained overlay model and whatever owns
/// the pixels. The overlay needs path stroking, text measurement and
/// drawing, and whole-surface snapshot/restore; anything that supplies
/// those can host it. [`crate::RasterCanvas`] is the crate's software
/// implementation.
pub trait Surface {
    /// An opaque copy of the surface contents. Used to erase a dragged
    /// label's previous rendering without touching anything drawn earlier.
    type Snapshot;

    /// Logical pixel size of the surface.
    fn size(&self) -> Vec2;

    /// The background color. Also the color the eraser paints with.
    fn background(&self) -> Color32;

    /// Fill the whole surface with the background color.
    fn clear(&mut self);

    /// Stamp a single round point.
    fn stroke_dot(&mut self, center: Pos2, width: f32, color: Color32);

    /// Stroke a straight line with round caps.
    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);

    /// Measured advance width of `text` in this surface's font.
    fn measure_text(&self, text: &str, font: &FontSpec) -> f32;

    /// Draw `text` with its baseline origin at `baseline`.
    fn fill_text(&mut self, text: &str, baseline: Pos2, font: &FontSpec, color: Color32);

    /// Copy the current pixel contents.
    fn snapshot(&self) -> Self::Snapshot;

    /// Restore pixel contents captured by [`Surface::snapshot`].
    fn restore(&mut self, snapshot: &Self::Snapshot);
}
