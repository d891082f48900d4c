use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use egui::{Color32, ColorImage, FontFamily, Pos2, Vec2, vec2};
use log::warn;

use crate::error::OverlayError;
use crate::label::FontSpec;
use crate::surface::Surface;

/// Horizontal offset, in pixels, of the second stamping pass that fakes a
/// bold face.
const FAUX_BOLD_OFFSET: i32 = 1;

/// Rightward lean per vertical pixel above the baseline for faux italics.
const FAUX_ITALIC_SHEAR: f32 = 0.2;

/// Pixel contents captured from a [`RasterCanvas`].
#[derive(Clone)]
pub struct PixelSnapshot {
    pixels: Vec<Color32>,
}

/// Software canvas backed by a plain pixel buffer.
///
/// Lines are stroked by stamping round discs along the path, which gives
/// freehand strokes the round caps and joins they need. Text is measured
/// and rasterized with `ab_glyph` using the font faces egui ships by
/// default, so metrics behave the same with or without a running UI. Bold
/// and italic are faked by double-stamping and shearing; the bundled faces
/// have no styled siblings.
///
/// Every mutation bumps a revision counter so a caller holding a texture
/// copy of the canvas knows when to re-upload.
pub struct RasterCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
    background: Color32,
    proportional: FontVec,
    monospace: FontVec,
    revision: u64,
}

impl RasterCanvas {
    /// Create a canvas filled with the default white background.
    pub fn new(width: usize, height: usize) -> Result<Self, OverlayError> {
        Self::with_background(width, height, Color32::WHITE)
    }

    pub fn with_background(
        width: usize,
        height: usize,
        background: Color32,
    ) -> Result<Self, OverlayError> {
        Ok(Self {
            width,
            height,
            pixels: vec![background; width * height],
            background,
            proportional: bundled_face(&FontFamily::Proportional)?,
            monospace: bundled_face(&FontFamily::Monospace)?,
            revision: 0,
        })
    }

    pub fn pixel_size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// Raw pixel access for full-surface transforms. Counts as a mutation.
    pub fn pixels_mut(&mut self) -> &mut [Color32] {
        self.revision += 1;
        &mut self.pixels
    }

    /// Monotonic change counter; bumped by every drawing operation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy the buffer into an image suitable for texture upload.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            size: [self.width, self.height],
            pixels: self.pixels.clone(),
        }
    }

    /// Copy RGBA bytes onto the top-left of the canvas, clipping to the
    /// overlapping region. Used to load a background photo.
    pub fn blit_rgba(&mut self, size: [usize; 2], rgba: &[u8]) {
        let copy_width = size[0].min(self.width);
        let rows_in_data = if size[0] == 0 { 0 } else { rgba.len() / (size[0] * 4) };
        let copy_height = size[1].min(self.height).min(rows_in_data);
        for y in 0..copy_height {
            for x in 0..copy_width {
                let src = (y * size[0] + x) * 4;
                self.pixels[y * self.width + x] =
                    Color32::from_rgb(rgba[src], rgba[src + 1], rgba[src + 2]);
            }
        }
        self.revision += 1;
    }

    fn face(&self, family: &FontFamily) -> &FontVec {
        match family {
            FontFamily::Monospace => &self.monospace,
            _ => &self.proportional,
        }
    }

    /// Blend `color` into the pixel at (x, y) with the given coverage.
    /// Out-of-range coordinates are ignored.
    fn blend(&mut self, x: i32, y: i32, color: Color32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 {
            return;
        }
        let index = y as usize * self.width + x as usize;
        let dst = self.pixels[index];
        let mix = |d: u8, s: u8| (f32::from(d) + (f32::from(s) - f32::from(d)) * coverage) as u8;
        self.pixels[index] = Color32::from_rgb(
            mix(dst.r(), color.r()),
            mix(dst.g(), color.g()),
            mix(dst.b(), color.b()),
        );
    }

    fn fill_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        let min_x = (center.x - radius - 1.0).floor() as i32;
        let max_x = (center.x + radius + 1.0).ceil() as i32;
        let min_y = (center.y - radius - 1.0).floor() as i32;
        let max_y = (center.y + radius + 1.0).ceil() as i32;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let distance = (dx * dx + dy * dy).sqrt();
                self.blend(x, y, color, radius - distance + 0.5);
            }
        }
    }

    /// Rasterize `text` into per-pixel coverage stamps without touching the
    /// buffer, so drawing can happen in a second pass.
    fn layout_text(&self, text: &str, baseline: Pos2, spec: &FontSpec) -> Vec<(i32, i32, f32)> {
        let face = self.face(&spec.family);
        let scale = PxScale::from(spec.size);
        let shear = if spec.italic { FAUX_ITALIC_SHEAR } else { 0.0 };

        let mut stamps = Vec::new();
        let mut pen_x = baseline.x;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let glyph_id = face.glyph_id(ch);
            if let Some(previous) = previous {
                pen_x += face.as_scaled(scale).kern(previous, glyph_id);
            }
            let glyph = glyph_id.with_scale_and_position(scale, point(pen_x, baseline.y));
            if let Some(outline) = face.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                outline.draw(|gx, gy, coverage| {
                    let py = bounds.min.y + gy as f32;
                    let px = bounds.min.x + gx as f32 + shear * (baseline.y - py);
                    let (x, y) = (px.round() as i32, py.round() as i32);
                    stamps.push((x, y, coverage));
                    if spec.bold {
                        stamps.push((x + FAUX_BOLD_OFFSET, y, coverage));
                    }
                });
            }
            pen_x += face.as_scaled(scale).h_advance(glyph_id);
            previous = Some(glyph_id);
        }
        stamps
    }
}

impl Surface for RasterCanvas {
    type Snapshot = PixelSnapshot;

    fn size(&self) -> Vec2 {
        vec2(self.width as f32, self.height as f32)
    }

    fn background(&self) -> Color32 {
        self.background
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.revision += 1;
    }

    fn stroke_dot(&mut self, center: Pos2, width: f32, color: Color32) {
        self.fill_disc(center, (width / 2.0).max(0.5), color);
        self.revision += 1;
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let radius = (width / 2.0).max(0.5);
        let length = (to - from).length();
        let steps = ((length / (radius * 0.5)).ceil() as usize).max(1);
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            self.fill_disc(from + (to - from) * t, radius, color);
        }
        self.revision += 1;
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        let face = self.face(&font.family);
        let scale = PxScale::from(font.size);
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let glyph_id = face.glyph_id(ch);
            if let Some(previous) = previous {
                width += face.as_scaled(scale).kern(previous, glyph_id);
            }
            width += face.as_scaled(scale).h_advance(glyph_id);
            previous = Some(glyph_id);
        }
        width
    }

    fn fill_text(&mut self, text: &str, baseline: Pos2, font: &FontSpec, color: Color32) {
        for (x, y, coverage) in self.layout_text(text, baseline, font) {
            self.blend(x, y, color, coverage);
        }
        self.revision += 1;
    }

    fn snapshot(&self) -> PixelSnapshot {
        PixelSnapshot {
            pixels: self.pixels.clone(),
        }
    }

    fn restore(&mut self, snapshot: &PixelSnapshot) {
        if snapshot.pixels.len() != self.pixels.len() {
            warn!(
                "ignoring restore from a {}-pixel snapshot onto a {}-pixel canvas",
                snapshot.pixels.len(),
                self.pixels.len()
            );
            return;
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        self.revision += 1;
    }
}

/// Pull a font face out of egui's bundled defaults, so the canvas measures
/// and draws with the same faces the UI renders with.
fn bundled_face(family: &FontFamily) -> Result<FontVec, OverlayError> {
    let definitions = egui::FontDefinitions::default();
    let name = definitions
        .families
        .get(family)
        .and_then(|names| names.first())
        .ok_or_else(|| {
            OverlayError::FontUnavailable(format!("no face registered for {family:?}"))
        })?;
    let data = definitions
        .font_data
        .get(name)
        .ok_or_else(|| OverlayError::FontUnavailable(name.clone()))?;
    FontVec::try_from_vec(data.font.to_vec())
        .map_err(|err| OverlayError::FontUnavailable(format!("{name}: {err}")))
}
