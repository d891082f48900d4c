use egui::{Context, Pos2, Rect, Vec2, pos2};

/// A pointer event in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed on the canvas.
    Down(Pos2),
    /// Pointer moved while over the canvas.
    Moved(Pos2),
    /// Primary button released.
    Up,
    /// Pointer left the canvas area. Ends strokes and drags like a
    /// release, so no gesture keeps running off-screen.
    Left,
}

/// Converts egui pointer state into surface-space [`PointerEvent`]s.
///
/// The on-screen rect the canvas is displayed in rarely matches its
/// logical pixel size, so device positions are scaled by the fixed factor
/// (surface size / displayed size). Touch input arrives through the same
/// pointer state, so it follows the identical path and ordering.
pub struct InputHandler {
    surface_size: Vec2,
    display_rect: Rect,
    last_pos: Option<Pos2>,
    pointer_down: bool,
}

impl InputHandler {
    pub fn new(surface_size: Vec2) -> Self {
        Self {
            surface_size,
            display_rect: Rect::NOTHING,
            last_pos: None,
            pointer_down: false,
        }
    }

    /// Update the on-screen rect the surface is currently displayed in
    /// (e.g. after a window resize).
    pub fn set_display_rect(&mut self, rect: Rect) {
        self.display_rect = rect;
    }

    /// Map a device position into surface coordinates.
    pub fn to_surface(&self, pos: Pos2) -> Pos2 {
        let scale_x = self.surface_size.x / self.display_rect.width();
        let scale_y = self.surface_size.y / self.display_rect.height();
        pos2(
            (pos.x - self.display_rect.min.x) * scale_x,
            (pos.y - self.display_rect.min.y) * scale_y,
        )
    }

    /// Poll the context and produce this frame's pointer events, in the
    /// order moved, pressed, released.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let over_canvas = hover.is_some_and(|pos| self.display_rect.contains(pos));

            match hover {
                Some(pos) => {
                    if over_canvas && Some(pos) != self.last_pos {
                        events.push(PointerEvent::Moved(self.to_surface(pos)));
                    }
                    let was_over = self
                        .last_pos
                        .is_some_and(|last| self.display_rect.contains(last));
                    if !over_canvas && was_over {
                        events.push(PointerEvent::Left);
                    }
                    self.last_pos = Some(pos);
                }
                None => {
                    if self.last_pos.take().is_some() {
                        events.push(PointerEvent::Left);
                    }
                }
            }

            if input.pointer.primary_pressed() && over_canvas {
                self.pointer_down = true;
                if let Some(pos) = hover {
                    events.push(PointerEvent::Down(self.to_surface(pos)));
                }
            }

            if input.pointer.primary_released() && self.pointer_down {
                self.pointer_down = false;
                events.push(PointerEvent::Up);
            }
        });
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    fn handler() -> InputHandler {
        let mut handler = InputHandler::new(vec2(200.0, 100.0));
        handler.set_display_rect(Rect::from_min_size(pos2(10.0, 20.0), vec2(400.0, 200.0)));
        handler
    }

    #[test]
    fn device_positions_scale_into_surface_space() {
        let handler = handler();

        assert_eq!(handler.to_surface(pos2(10.0, 20.0)), pos2(0.0, 0.0));
        assert_eq!(handler.to_surface(pos2(410.0, 220.0)), pos2(200.0, 100.0));
        assert_eq!(handler.to_surface(pos2(210.0, 120.0)), pos2(100.0, 50.0));
    }

    #[test]
    fn press_over_canvas_emits_scaled_down_event() {
        let ctx = Context::default();
        let mut handler = handler();

        let mut raw = egui::RawInput::default();
        raw.events.push(egui::Event::PointerMoved(pos2(110.0, 70.0)));
        raw.events.push(egui::Event::PointerButton {
            pos: pos2(110.0, 70.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::default(),
        });
        ctx.begin_pass(raw);

        let events = handler.process_input(&ctx);
        assert!(events.contains(&PointerEvent::Down(pos2(50.0, 25.0))));
        assert!(events.contains(&PointerEvent::Moved(pos2(50.0, 25.0))));
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let ctx = Context::default();
        let mut handler = handler();

        let mut raw = egui::RawInput::default();
        raw.events.push(egui::Event::PointerMoved(pos2(500.0, 500.0)));
        raw.events.push(egui::Event::PointerButton {
            pos: pos2(500.0, 500.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::default(),
        });
        ctx.begin_pass(raw);

        let events = handler.process_input(&ctx);
        assert!(events.is_empty());
    }
}
