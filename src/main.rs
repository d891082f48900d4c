use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional background photo to annotate, given as the first argument.
    let background = std::env::args().nth(1).and_then(|path| {
        match image::open(&path) {
            Ok(photo) => Some(photo.to_rgba8()),
            Err(err) => {
                log::error!("could not open {path}: {err}");
                None
            }
        }
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 620.0])
            .with_title("eframe scribble"),
        ..Default::default()
    };
    eframe::run_native(
        "eframe_scribble",
        native_options,
        Box::new(move |cc| Ok(Box::new(eframe_scribble::ScribbleApp::new(cc, background)?))),
    )
}
