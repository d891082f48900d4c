use egui::Color32;

use crate::canvas::RasterCanvas;

/// Threshold between "round down to black" and "up to white".
const MID_GRAY: f32 = 128.0;

/// Reduce the canvas to the black/white panel palette with Floyd-Steinberg
/// error diffusion.
///
/// Works on luma; each pixel's quantization error is spread to its right
/// and lower neighbours with the classic 7/16, 3/16, 5/16, 1/16 weights.
/// Destroys whatever was drawn on the canvas, which is why callers go
/// through [`crate::PaintOverlay::apply_transform`] so annotations are
/// replayed on top afterwards.
pub fn floyd_steinberg(canvas: &mut RasterCanvas) {
    let [width, height] = canvas.pixel_size();
    if width == 0 || height == 0 {
        return;
    }

    let mut luma: Vec<f32> = canvas
        .pixels()
        .iter()
        .map(|color| {
            0.299 * f32::from(color.r()) + 0.587 * f32::from(color.g()) + 0.114 * f32::from(color.b())
        })
        .collect();

    for y in 0..height {
        for x in 0..width {
            let index = y * width + x;
            let old = luma[index];
            let new = if old >= MID_GRAY { 255.0 } else { 0.0 };
            let error = old - new;
            luma[index] = new;

            if x + 1 < width {
                luma[index + 1] += error * 7.0 / 16.0;
            }
            if y + 1 < height {
                if x > 0 {
                    luma[index + width - 1] += error * 3.0 / 16.0;
                }
                luma[index + width] += error * 5.0 / 16.0;
                if x + 1 < width {
                    luma[index + width + 1] += error * 1.0 / 16.0;
                }
            }
        }
    }

    for (pixel, value) in canvas.pixels_mut().iter_mut().zip(&luma) {
        *pixel = if *value >= MID_GRAY {
            Color32::WHITE
        } else {
            Color32::BLACK
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_strictly_black_and_white() {
        let mut canvas = RasterCanvas::new(32, 32).expect("bundled fonts load");
        for (index, pixel) in canvas.pixels_mut().iter_mut().enumerate() {
            let shade = (index % 256) as u8;
            *pixel = Color32::from_rgb(shade, shade / 2, 255 - shade);
        }

        floyd_steinberg(&mut canvas);

        assert!(
            canvas
                .pixels()
                .iter()
                .all(|&p| p == Color32::BLACK || p == Color32::WHITE)
        );
    }

    #[test]
    fn white_canvas_stays_white() {
        let mut canvas = RasterCanvas::new(16, 16).expect("bundled fonts load");
        floyd_steinberg(&mut canvas);

        assert!(canvas.pixels().iter().all(|&p| p == Color32::WHITE));
    }

    #[test]
    fn mid_gray_dithers_into_a_mix() {
        let mut canvas = RasterCanvas::new(16, 16).expect("bundled fonts load");
        canvas
            .pixels_mut()
            .fill(Color32::from_rgb(127, 127, 127));

        floyd_steinberg(&mut canvas);

        let black = canvas.pixels().iter().filter(|&&p| p == Color32::BLACK).count();
        let white = canvas.pixels().iter().filter(|&&p| p == Color32::WHITE).count();
        assert!(black > 0 && white > 0);
    }
}
