use eframe::egui;
use egui::{Color32, Rect, pos2};

use crate::canvas::RasterCanvas;
use crate::error::OverlayError;
use crate::filter;
use crate::input::{InputHandler, PointerEvent};
use crate::overlay::{ActiveTool, PaintOverlay};
use crate::surface::Surface;

/// Default canvas size, matching the e-paper panel the drawings end up on.
const CANVAS_SIZE: [usize; 2] = [800, 480];

/// The eframe shell around the overlay core: toolbar, canvas display and
/// pointer wiring.
pub struct ScribbleApp {
    canvas: RasterCanvas,
    overlay: PaintOverlay<RasterCanvas>,
    input: InputHandler,
    texture: Option<egui::TextureHandle>,
    uploaded_revision: Option<u64>,
    text_input: String,
    status: String,
    show_empty_text_alert: bool,
}

impl ScribbleApp {
    /// Called once before the first frame. An optional background photo is
    /// blitted onto the canvas before any annotation happens.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        background: Option<image::RgbaImage>,
    ) -> Result<Self, OverlayError> {
        let mut canvas = RasterCanvas::new(CANVAS_SIZE[0], CANVAS_SIZE[1])?;
        if let Some(photo) = background {
            canvas.blit_rgba(
                [photo.width() as usize, photo.height() as usize],
                photo.as_raw(),
            );
        }
        let input = InputHandler::new(canvas.size());
        Ok(Self {
            canvas,
            overlay: PaintOverlay::new(),
            input,
            texture: None,
            uploaded_revision: None,
            text_input: String::new(),
            status: String::new(),
            show_empty_text_alert: false,
        })
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for (label, tool, title) in [
                ("🖌 Brush", ActiveTool::Brush, "Brush mode"),
                ("⌫ Eraser", ActiveTool::Eraser, "Eraser mode"),
                ("🅰 Text", ActiveTool::Text, "Text mode"),
            ] {
                let selected = self.overlay.tool() == Some(tool);
                if ui.selectable_label(selected, label).clicked() {
                    // Clicking the active tool deselects it.
                    if selected {
                        self.overlay.set_tool(None);
                        self.status.clear();
                    } else {
                        self.overlay.set_tool(Some(tool));
                        self.status = title.to_owned();
                    }
                }
            }

            ui.separator();

            ui.label("Color:");
            egui::color_picker::color_edit_button_srgba(
                ui,
                &mut self.overlay.settings_mut().brush_color,
                egui::color_picker::Alpha::Opaque,
            );
            ui.add(
                egui::Slider::new(&mut self.overlay.settings_mut().brush_width, 1.0..=20.0)
                    .text("Width"),
            );

            ui.separator();

            if ui.button("Dither").clicked() {
                self.overlay
                    .apply_transform(&mut self.canvas, filter::floyd_steinberg);
            }
            if ui.button("Clear").clicked() {
                self.overlay.clear_all(&mut self.canvas);
                self.status.clear();
            }
        });

        if self.overlay.tool() == Some(ActiveTool::Text) {
            ui.horizontal_wrapped(|ui| self.text_controls(ui));
        }

        if !self.status.is_empty() {
            ui.label(&self.status);
        }
    }

    fn text_controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Text:");
        ui.text_edit_singleline(&mut self.text_input);

        let settings = self.overlay.settings_mut();
        if ui
            .selectable_label(settings.bold, egui::RichText::new("B").strong())
            .clicked()
        {
            settings.bold = !settings.bold;
        }
        if ui
            .selectable_label(settings.italic, egui::RichText::new("I").italics())
            .clicked()
        {
            settings.italic = !settings.italic;
        }
        ui.add(
            egui::DragValue::new(&mut settings.font_size)
                .range(8.0..=72.0)
                .suffix("px"),
        );
        egui::ComboBox::from_id_salt("font-family")
            .selected_text(family_name(&settings.font_family))
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut settings.font_family,
                    egui::FontFamily::Proportional,
                    "Proportional",
                );
                ui.selectable_value(
                    &mut settings.font_family,
                    egui::FontFamily::Monospace,
                    "Monospace",
                );
            });

        if ui.button("Add text").clicked() {
            match self.overlay.begin_placement(&self.text_input) {
                Ok(()) => {
                    self.text_input.clear();
                    self.status = "Click the canvas to place the text".to_owned();
                }
                Err(_) => self.show_empty_text_alert = true,
            }
        }
    }

    fn canvas_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let canvas_size = self.canvas.size();
        let available = ui.available_size();
        let scale = (available.x / canvas_size.x)
            .min(available.y / canvas_size.y)
            .max(0.05);
        let (rect, _response) =
            ui.allocate_exact_size(canvas_size * scale, egui::Sense::click_and_drag());
        self.input.set_display_rect(rect);

        if self.uploaded_revision != Some(self.canvas.revision()) {
            let image = self.canvas.to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture(
                        "scribble-canvas",
                        image,
                        egui::TextureOptions::NEAREST,
                    ));
                }
            }
            self.uploaded_revision = Some(self.canvas.revision());
        }

        if let Some(texture) = &self.texture {
            ui.painter_at(rect).image(
                texture.id(),
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }
}

impl eframe::App for ScribbleApp {
    /// Called each time the UI needs repainting, which may be many times
    /// per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.canvas_panel(ctx, ui));

        for event in self.input.process_input(ctx) {
            match event {
                PointerEvent::Down(pos) => {
                    let placing = self.overlay.placement_armed();
                    self.overlay.pointer_down(pos, &mut self.canvas);
                    if placing {
                        self.status = "Drag the new text to adjust its position".to_owned();
                    }
                }
                PointerEvent::Moved(pos) => self.overlay.pointer_moved(pos, &mut self.canvas),
                PointerEvent::Up | PointerEvent::Left => self.overlay.pointer_up(),
            }
        }

        if self.show_empty_text_alert {
            egui::Window::new("Text required")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Enter the text content first.");
                    if ui.button("OK").clicked() {
                        self.show_empty_text_alert = false;
                    }
                });
        }
    }
}

fn family_name(family: &egui::FontFamily) -> &'static str {
    match family {
        egui::FontFamily::Monospace => "Monospace",
        _ => "Proportional",
    }
}
