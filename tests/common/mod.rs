#![allow(dead_code)]

use std::cell::Cell;

use eframe_scribble::{FontSpec, Surface};
use egui::{Color32, Pos2, Vec2, vec2};

/// Fixed advance width per character, so label hit boxes are predictable.
pub const GLYPH_WIDTH: f32 = 8.0;

/// Everything a surface was asked to draw, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceCall {
    Clear,
    Dot {
        pos: Pos2,
        width: f32,
        color: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
    Text {
        text: String,
        baseline: Pos2,
        color: Color32,
    },
    Restore {
        snapshot: u64,
    },
}

/// Records drawing calls instead of owning pixels. Snapshots are numbered
/// so tests can see which one a restore came from.
pub struct TraceSurface {
    pub calls: Vec<TraceCall>,
    snapshots: Cell<u64>,
}

impl TraceSurface {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            snapshots: Cell::new(0),
        }
    }

    /// Drawing calls issued after the most recent restore (or all of them
    /// if nothing was ever restored).
    pub fn calls_since_last_restore(&self) -> &[TraceCall] {
        let start = self
            .calls
            .iter()
            .rposition(|call| matches!(call, TraceCall::Restore { .. }))
            .map_or(0, |index| index + 1);
        &self.calls[start..]
    }

    /// How many renderings of `text` are currently visible, i.e. drawn
    /// since the most recent restore.
    pub fn visible_renderings(&self, text: &str) -> usize {
        self.calls_since_last_restore()
            .iter()
            .filter(|call| matches!(call, TraceCall::Text { text: drawn, .. } if drawn == text))
            .count()
    }
}

impl Surface for TraceSurface {
    type Snapshot = u64;

    fn size(&self) -> Vec2 {
        vec2(800.0, 480.0)
    }

    fn background(&self) -> Color32 {
        Color32::WHITE
    }

    fn clear(&mut self) {
        self.calls.push(TraceCall::Clear);
    }

    fn stroke_dot(&mut self, center: Pos2, width: f32, color: Color32) {
        self.calls.push(TraceCall::Dot {
            pos: center,
            width,
            color,
        });
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.calls.push(TraceCall::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn measure_text(&self, text: &str, _font: &FontSpec) -> f32 {
        text.chars().count() as f32 * GLYPH_WIDTH
    }

    fn fill_text(&mut self, text: &str, baseline: Pos2, _font: &FontSpec, color: Color32) {
        self.calls.push(TraceCall::Text {
            text: text.to_owned(),
            baseline,
            color,
        });
    }

    fn snapshot(&self) -> u64 {
        let next = self.snapshots.get() + 1;
        self.snapshots.set(next);
        next
    }

    fn restore(&mut self, snapshot: &u64) {
        self.calls.push(TraceCall::Restore {
            snapshot: *snapshot,
        });
    }
}
